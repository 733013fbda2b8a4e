//! Integration tests for the Session: connect handshake, parameter
//! entry, program runs with the trailing reset, and the talent-show
//! routines.

use std::time::Duration;

use super::mock_hw::{MockRobot, RecordingSink, RobotCall};

use finchcontrol::app::commands::Command;
use finchcontrol::app::events::AppEvent;
use finchcontrol::app::monitor::{MonitorConfig, RangeType};
use finchcontrol::app::program::ProgramBuilder;
use finchcontrol::app::routines;
use finchcontrol::app::session::Session;
use finchcontrol::config::SessionConfig;
use finchcontrol::error::{ConfigError, DeviceError, Error, ValidationError};
use finchcontrol::timing::{CancelToken, ManualTicker};

fn session() -> Session {
    Session::new(SessionConfig::default()).unwrap()
}

const RESET: [RobotCall; 3] = [
    RobotCall::SetMotors(0, 0),
    RobotCall::NoteOff,
    RobotCall::SetLed(0, 0, 0),
];

// ── Construction and parameters ──────────────────────────────

#[test]
fn new_session_uses_configured_defaults() {
    let s = session();
    assert_eq!(s.params().motor_speed(), 100);
    assert_eq!(s.params().led_brightness(), 255);
    assert_eq!(s.params().wait_secs(), 1.0);
    assert!(s.program().is_empty());
    assert!(!s.is_connected());
}

#[test]
fn invalid_config_is_rejected() {
    let config = SessionConfig {
        connect_attempts: 0,
        ..SessionConfig::default()
    };
    assert!(matches!(
        Session::new(config),
        Err(Error::Config(ConfigError::ValidationFailed(_)))
    ));
}

#[test]
fn rejected_parameter_entry_keeps_previous_values() {
    let mut s = session();
    s.enter_parameters("40", "128", "2.5").unwrap();
    assert_eq!(s.params().motor_speed(), 40);

    let err = s.enter_parameters("300", "128", "2.5").unwrap_err();
    assert_eq!(
        err,
        Error::Validation(ValidationError::OutOfRange {
            min: -255.0,
            max: 255.0
        })
    );
    assert_eq!(s.params().motor_speed(), 40);
    assert_eq!(s.params().wait_secs(), 2.5);
}

// ── Connect / disconnect ─────────────────────────────────────

#[test]
fn connect_shows_blue_then_resets() {
    let mut s = session();
    let mut robot = MockRobot::new();
    let mut sink = RecordingSink::new();

    assert_eq!(s.connect(&mut robot, &mut sink), Ok(true));
    assert!(s.is_connected());

    let mut expected = vec![
        RobotCall::Connect,
        RobotCall::SetLed(0, 0, 255),
        RobotCall::Wait(1500),
    ];
    expected.extend(RESET);
    assert_eq!(robot.calls, expected);
    assert_eq!(
        sink.events,
        vec![
            AppEvent::ConnectAttempt {
                attempt: 1,
                connected: true
            },
            AppEvent::RobotReset,
        ]
    );
}

#[test]
fn connect_retries_until_reachable() {
    let mut s = session();
    let mut robot = MockRobot::new();
    robot.connect_results = [false, false, true].into_iter().collect();

    assert_eq!(s.connect(&mut robot, &mut RecordingSink::new()), Ok(true));
    let reds = robot
        .calls
        .iter()
        .filter(|c| **c == RobotCall::SetLed(255, 0, 0))
        .count();
    assert_eq!(reds, 2);
}

#[test]
fn connect_gives_up_after_configured_attempts() {
    let mut s = session();
    let mut robot = MockRobot::new();
    robot.connect_results = [false; 5].into_iter().collect();
    let mut sink = RecordingSink::new();

    assert_eq!(s.connect(&mut robot, &mut sink), Ok(false));
    assert!(!s.is_connected());
    assert_eq!(
        robot.calls.iter().filter(|c| **c == RobotCall::Connect).count(),
        3
    );
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::ConnectAttempt { connected: false, .. })),
        3
    );
}

#[test]
fn disconnect_resets_before_closing_link() {
    let mut s = session();
    let mut robot = MockRobot::new();
    let mut sink = RecordingSink::new();
    s.connect(&mut robot, &mut sink).unwrap();
    robot.calls.clear();

    s.disconnect(&mut robot, &mut sink).unwrap();

    let mut expected = RESET.to_vec();
    expected.push(RobotCall::Disconnect);
    assert_eq!(robot.calls, expected);
    assert_eq!(sink.events.last(), Some(&AppEvent::Disconnected));
    assert!(!s.is_connected());
}

// ── Program runs ─────────────────────────────────────────────

#[test]
fn run_program_ends_with_reset() {
    let mut s = session();
    let mut b = ProgramBuilder::new();
    for entry in ["move_forward", "wait", "stop_motors", "done"] {
        b.enter(entry).unwrap();
    }
    s.set_program(b.finish());
    s.enter_parameters("100", "255", "2").unwrap();

    let mut robot = MockRobot::new();
    let trace = s
        .run_program(&mut robot, &mut RecordingSink::new())
        .unwrap();

    assert_eq!(
        trace,
        vec![Command::MoveForward, Command::Wait, Command::StopMotors]
    );
    let mut expected = vec![
        RobotCall::SetMotors(100, 100),
        RobotCall::Wait(2000),
        RobotCall::SetMotors(0, 0),
    ];
    expected.extend(RESET);
    assert_eq!(robot.calls, expected);
}

#[test]
fn run_program_resets_even_after_device_failure() {
    let mut s = session();
    s.set_program([Command::MoveForward, Command::TurnLeft].into_iter().collect());

    let mut robot = MockRobot::new();
    robot.fail_motors_at = Some(1);
    let err = s
        .run_program(&mut robot, &mut RecordingSink::new())
        .unwrap_err();

    assert_eq!(err, Error::Device(DeviceError::WriteFailed("set_motors")));
    assert!(robot.ends_with_reset());
}

#[test]
fn program_ignores_cancellation_meant_for_the_monitor() {
    let mut s = session();
    s.set_program([Command::GetTemperature].into_iter().collect());
    s.enter_parameters("0", "0", "3").unwrap();

    let token = CancelToken::new();
    token.cancel();
    let mut ticker = ManualTicker::new().with_token(token.clone());
    let mut robot = MockRobot::with_temperatures(&[20.0, 21.0, 22.0, 40.0]);
    let mut sink = RecordingSink::new();

    s.run_program(&mut robot, &mut sink).unwrap();
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::TemperatureRecorded { .. })),
        3
    );
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::RecordingCancelled { .. })),
        0
    );

    token.reset();
    let report = s
        .monitor_temperature(
            &MonitorConfig::from_raw("maximum", "30", "5").unwrap(),
            &mut robot,
            &mut ticker,
            &mut sink,
        )
        .unwrap();
    assert!(report.triggered());
    assert_eq!(report.elapsed_secs, 1);
}

#[test]
fn monitor_delegates_through_session() {
    let s = session();
    let mut robot = MockRobot::with_temperatures(&[30.0, 31.0]);
    let report = s
        .monitor_temperature(
            &MonitorConfig::from_raw("maximum", "31", "5").unwrap(),
            &mut robot,
            &mut ManualTicker::new(),
            &mut RecordingSink::new(),
        )
        .unwrap();
    assert!(report.triggered());
    assert_eq!(report.elapsed_secs, 2);
    assert_eq!(MonitorConfig::from_raw("max", "31", "5").unwrap().range, RangeType::Maximum);
}

#[test]
fn record_temperature_reports_statistics() {
    let s = session();
    let mut robot = MockRobot::with_temperatures(&[20.0, 22.0, 24.0]);
    let mut ticker = ManualTicker::new();
    let series = s
        .record_temperature(
            3,
            Duration::from_millis(500),
            &mut robot,
            &mut ticker,
            &mut RecordingSink::new(),
        )
        .unwrap();

    assert!(series.is_complete());
    assert_eq!(series.average(), Some(22.0));
    assert_eq!(series.min(), Some(20.0));
    assert_eq!(series.max(), Some(24.0));
    assert_eq!(ticker.total(), Duration::from_millis(1500));
}

#[test]
fn cancelled_recording_keeps_partial_series() {
    let s = session();
    let mut robot = MockRobot::with_temperatures(&[20.0, 21.0, 22.0, 23.0]);
    let mut sink = RecordingSink::new();
    let series = s
        .record_temperature(
            4,
            Duration::from_secs(1),
            &mut robot,
            &mut ManualTicker::new().cancel_after(1),
            &mut sink,
        )
        .unwrap();

    assert_eq!(series.samples(), &[20.0, 21.0]);
    assert!(!series.is_complete());
    assert_eq!(
        sink.events.last(),
        Some(&AppEvent::RecordingCancelled {
            taken: 2,
            requested: 4
        })
    );
}

// ── Talent show ──────────────────────────────────────────────

#[test]
fn dance_follows_choreography_then_quiesces() {
    let mut robot = MockRobot::new();
    routines::dance(&mut robot).unwrap();

    assert_eq!(
        robot.motor_calls(),
        vec![(0, 100), (0, -100), (100, 0), (-100, 0), (200, 0), (0, -200), (0, 0)]
    );
    assert!(robot.ends_with_reset());
}

#[test]
fn mixing_it_up_swerves_and_sweeps_tones() {
    let mut robot = MockRobot::new();
    routines::mixing_it_up(&mut robot).unwrap();

    assert_eq!(&robot.motor_calls()[..2], &[(200, 250), (250, 200)]);
    let tones = robot.note_ons();
    assert_eq!(tones.first(), Some(&100));
    assert!(tones.iter().max().is_some_and(|&hz| hz > 500));
    assert!(robot.ends_with_reset());
}

#[test]
fn light_and_sound_sweeps_to_top_note() {
    let mut robot = MockRobot::new();
    routines::light_and_sound(&mut robot, routines::LIGHT_AND_SOUND_DEFAULT_HZ).unwrap();

    let tones = robot.note_ons();
    assert_eq!(tones.len(), 8);
    assert!(tones.windows(2).all(|w| w[0] < w[1]));
    assert!(robot.calls.contains(&RobotCall::SetLed(255, 0, 0)));
    assert!(robot.calls.contains(&RobotCall::SetLed(0, 255, 255)));
    assert!(robot.ends_with_reset());
}
