//! Integration tests for the ThresholdMonitor sampling loop.
//!
//! Sensor streams are scripted on the mock robot; the manual ticker
//! stands in for the one-second wait.

use std::time::Duration;

use super::mock_hw::{MockRobot, RecordingSink, RobotCall};

use finchcontrol::app::events::AppEvent;
use finchcontrol::app::monitor::{
    LightSensor, MonitorConfig, MonitorKind, MonitorStatus, RangeType, Sample, ThresholdMonitor,
};
use finchcontrol::config::SessionConfig;
use finchcontrol::timing::ManualTicker;

fn monitor() -> ThresholdMonitor {
    ThresholdMonitor::new(&SessionConfig::default())
}

fn cfg(range: RangeType, threshold: i32, duration_secs: u32) -> MonitorConfig {
    MonitorConfig {
        range,
        threshold,
        duration_secs,
    }
}

// ── Light ────────────────────────────────────────────────────

#[test]
fn both_sensors_trigger_on_third_sample() {
    let mut robot = MockRobot::with_light(&[10, 20, 60], &[5, 5, 5]);
    let mut ticker = ManualTicker::new();
    let mut sink = RecordingSink::new();

    let report = monitor()
        .monitor_light(
            LightSensor::Both,
            &cfg(RangeType::Maximum, 50, 5),
            &mut robot,
            &mut ticker,
            &mut sink,
        )
        .unwrap();

    assert_eq!(report.status, MonitorStatus::Triggered);
    assert!(report.triggered());
    assert_eq!(report.elapsed_secs, 3);
    assert_eq!(report.samples.len(), 3);
    assert_eq!(ticker.ticks(), 3);
    assert_eq!(ticker.total(), Duration::from_secs(3));

    // Exactly one alarm, then silence.
    assert_eq!(robot.note_ons(), vec![1000]);
    assert!(robot.calls.ends_with(&[
        RobotCall::NoteOn(1000),
        RobotCall::Wait(1000),
        RobotCall::NoteOff,
    ]));
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::AlarmTriggered { .. })),
        1
    );
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::MonitorSample { .. })),
        3
    );
}

#[test]
fn quiet_run_times_out_without_alarm() {
    let mut robot = MockRobot::with_light(&[10; 5], &[10; 5]);
    let mut ticker = ManualTicker::new();
    let mut sink = RecordingSink::new();

    let report = monitor()
        .monitor_light(
            LightSensor::Both,
            &cfg(RangeType::Maximum, 50, 5),
            &mut robot,
            &mut ticker,
            &mut sink,
        )
        .unwrap();

    assert_eq!(report.status, MonitorStatus::TimedOut);
    assert_eq!(report.elapsed_secs, 5);
    assert_eq!(report.samples.len(), 5);
    assert!(robot.note_ons().is_empty());
    assert_eq!(
        sink.events.last(),
        Some(&AppEvent::MonitorTimedOut {
            kind: MonitorKind::Light,
            elapsed_secs: 5
        })
    );
}

#[test]
fn threshold_is_inclusive() {
    let mut robot = MockRobot::with_light(&[50], &[]);
    let report = monitor()
        .monitor_light(
            LightSensor::Left,
            &cfg(RangeType::Maximum, 50, 3),
            &mut robot,
            &mut ManualTicker::new(),
            &mut RecordingSink::new(),
        )
        .unwrap();
    assert!(report.triggered());
    assert_eq!(report.elapsed_secs, 1);
}

#[test]
fn right_sensor_only_reads_right() {
    let mut robot = MockRobot::with_light(&[], &[30, 3]);
    let report = monitor()
        .monitor_light(
            LightSensor::Right,
            &cfg(RangeType::Minimum, 5, 10),
            &mut robot,
            &mut ManualTicker::new(),
            &mut RecordingSink::new(),
        )
        .unwrap();

    assert!(report.triggered());
    assert_eq!(
        report.samples,
        vec![
            Sample::Light {
                left: None,
                right: Some(30)
            },
            Sample::Light {
                left: None,
                right: Some(3)
            },
        ]
    );
    assert!(!robot.calls.contains(&RobotCall::ReadLeftLight));
}

#[test]
fn zero_duration_takes_no_samples() {
    let mut robot = MockRobot::new();
    let mut ticker = ManualTicker::new();
    let report = monitor()
        .monitor_light(
            LightSensor::Both,
            &cfg(RangeType::Maximum, 0, 0),
            &mut robot,
            &mut ticker,
            &mut RecordingSink::new(),
        )
        .unwrap();

    assert_eq!(report.status, MonitorStatus::TimedOut);
    assert_eq!(report.elapsed_secs, 0);
    assert!(report.samples.is_empty());
    assert!(robot.calls.is_empty());
    assert_eq!(ticker.ticks(), 0);
}

#[test]
fn cancelled_ticker_ends_run_early() {
    let mut robot = MockRobot::with_light(&[1, 1, 1], &[]);
    let mut ticker = ManualTicker::new().cancel_after(2);
    let mut sink = RecordingSink::new();

    let report = monitor()
        .monitor_light(
            LightSensor::Left,
            &cfg(RangeType::Maximum, 50, 10),
            &mut robot,
            &mut ticker,
            &mut sink,
        )
        .unwrap();

    assert_eq!(report.status, MonitorStatus::Cancelled);
    assert_eq!(report.elapsed_secs, 2);
    assert_eq!(report.samples.len(), 3);
    assert!(robot.note_ons().is_empty());
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::MonitorCancelled { .. })),
        1
    );
}

#[test]
fn cancel_after_trigger_still_alarms_and_counts_the_tick() {
    let mut robot = MockRobot::with_light(&[60], &[]);
    let mut ticker = ManualTicker::new().cancel_after(0);
    let mut sink = RecordingSink::new();

    let report = monitor()
        .monitor_light(
            LightSensor::Left,
            &cfg(RangeType::Maximum, 50, 5),
            &mut robot,
            &mut ticker,
            &mut sink,
        )
        .unwrap();

    assert_eq!(report.status, MonitorStatus::Triggered);
    assert_eq!(report.elapsed_secs, 1);
    assert_eq!(report.samples.len(), 1);
    assert_eq!(robot.note_ons(), vec![1000]);
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::AlarmTriggered { elapsed_secs: 1, .. })),
        1
    );
}

#[test]
fn sensor_failure_propagates() {
    let mut robot = MockRobot::with_light(&[10], &[10]);
    let result = monitor().monitor_light(
        LightSensor::Both,
        &cfg(RangeType::Maximum, 50, 5),
        &mut robot,
        &mut ManualTicker::new(),
        &mut RecordingSink::new(),
    );
    assert!(result.is_err());
}

// ── Temperature ──────────────────────────────────────────────

#[test]
fn temperature_minimum_triggers_on_cold_reading() {
    let mut robot = MockRobot::with_temperatures(&[22.5, 21.0, 18.0]);
    let report = monitor()
        .monitor_temperature(
            &cfg(RangeType::Minimum, 18, 30),
            &mut robot,
            &mut ManualTicker::new(),
            &mut RecordingSink::new(),
        )
        .unwrap();

    assert!(report.triggered());
    assert_eq!(report.elapsed_secs, 3);
    assert_eq!(report.samples.last(), Some(&Sample::Temperature(18.0)));
    assert_eq!(robot.note_ons(), vec![1000]);
}

#[test]
fn custom_alarm_tone_is_used() {
    let config = SessionConfig {
        alarm_frequency_hz: 440,
        alarm_duration_ms: 250,
        ..SessionConfig::default()
    };
    let mut robot = MockRobot::with_temperatures(&[40.0]);
    ThresholdMonitor::new(&config)
        .monitor_temperature(
            &cfg(RangeType::Maximum, 30, 5),
            &mut robot,
            &mut ManualTicker::new(),
            &mut RecordingSink::new(),
        )
        .unwrap();

    assert!(robot.calls.ends_with(&[
        RobotCall::NoteOn(440),
        RobotCall::Wait(250),
        RobotCall::NoteOff,
    ]));
}
