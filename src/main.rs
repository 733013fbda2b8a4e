//! FinchControl: host entry point.
//!
//! Drives one session against the simulated robot.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │  SimulatedRobot    LogEventSink    JsonConfigFile        │
//! │  (RobotPort)       (EventSink)     (ConfigPort)          │
//! │                                                          │
//! │  ─────────────── Port Trait Boundary ───────────────     │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │           Session (pure logic)                     │  │
//! │  │  Interpreter · ThresholdMonitor · DataRecorder     │  │
//! │  └────────────────────────────────────────────────────┘  │
//! │                                                          │
//! │  SleepTicker / ManualTicker  ◀── Ctrl-C CancelToken      │
//! └──────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use log::{info, warn};

use finchcontrol::adapters::json_config::JsonConfigFile;
use finchcontrol::adapters::log_sink::LogEventSink;
use finchcontrol::adapters::sim::SimulatedRobot;
use finchcontrol::app::monitor::{LightSensor, MonitorConfig};
use finchcontrol::app::ports::ConfigPort;
use finchcontrol::app::program::{ProgramBuilder, ProgramEntry};
use finchcontrol::app::session::Session;
use finchcontrol::timing::{CancelToken, ManualTicker, SleepTicker, Ticker};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MonitorArg {
    Light,
    Temperature,
}

/// Run a command program and/or a threshold monitor on a simulated Finch.
#[derive(Debug, Parser)]
#[command(name = "finchcontrol", version, about)]
struct Args {
    /// JSON session config; defaults are used if the file is missing.
    #[arg(long, default_value = "finchcontrol.json")]
    config: PathBuf,

    /// Comma-separated commands, e.g. "move_forward,wait,stop_motors".
    #[arg(long)]
    program: Option<String>,

    /// Motor speed (-255..=255).
    #[arg(long, allow_hyphen_values = true)]
    speed: Option<String>,

    /// LED brightness (0..=255).
    #[arg(long)]
    brightness: Option<String>,

    /// Wait duration in seconds (0..=180).
    #[arg(long)]
    wait: Option<String>,

    /// Run a threshold monitor after the program.
    #[arg(long, value_enum)]
    monitor: Option<MonitorArg>,

    /// Light sensor to watch: left, right or both.
    #[arg(long, default_value = "both")]
    sensor: String,

    /// Threshold direction: minimum or maximum.
    #[arg(long, default_value = "maximum")]
    range: String,

    /// Threshold value.
    #[arg(long, allow_hyphen_values = true, default_value = "50")]
    threshold: String,

    /// Monitoring duration in seconds.
    #[arg(long, default_value = "10")]
    duration: String,

    /// Sleep in real time instead of simulating instantly.
    #[arg(long)]
    realtime: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    info!("=== FinchControl v{} ===", env!("CARGO_PKG_VERSION"));

    let config = JsonConfigFile::new(&args.config)
        .load()
        .map_err(finchcontrol::Error::from)
        .with_context(|| format!("loading {}", args.config.display()))?;
    let mut session = Session::new(config)?;

    if args.speed.is_some() || args.brightness.is_some() || args.wait.is_some() {
        let current = *session.params();
        let speed = args.speed.clone().unwrap_or_else(|| current.motor_speed().to_string());
        let brightness = args
            .brightness
            .clone()
            .unwrap_or_else(|| current.led_brightness().to_string());
        let wait = args.wait.clone().unwrap_or_else(|| current.wait_secs().to_string());
        session
            .enter_parameters(&speed, &brightness, &wait)
            .context("invalid parameters")?;
    }

    if let Some(text) = &args.program {
        session.set_program(build_program(text)?);
    }

    let token = CancelToken::new();
    let t = token.clone();
    ctrlc::set_handler(move || {
        eprintln!("\nReceived Ctrl-C, cancelling...");
        t.cancel();
    })?;

    let mut robot = SimulatedRobot::new().realtime(args.realtime);
    let mut sink = LogEventSink::new();

    if !session.connect(&mut robot, &mut sink)? {
        bail!("robot unreachable");
    }

    let outcome = if args.realtime {
        drive(
            &mut session,
            &args,
            &mut robot,
            &token,
            &mut SleepTicker::new(token.clone()),
            &mut sink,
        )
    } else {
        drive(
            &mut session,
            &args,
            &mut robot,
            &token,
            &mut ManualTicker::new().with_token(token.clone()),
            &mut sink,
        )
    };

    if let Err(e) = session.disconnect(&mut robot, &mut sink) {
        warn!("disconnect failed: {e}");
    }
    outcome
}

fn build_program(text: &str) -> Result<finchcontrol::app::program::CommandProgram> {
    let mut builder = ProgramBuilder::new();
    for entry in text.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if builder.enter(entry).context("invalid program")? == ProgramEntry::Closed {
            break;
        }
    }
    Ok(builder.finish())
}

fn drive(
    session: &mut Session,
    args: &Args,
    robot: &mut SimulatedRobot,
    token: &CancelToken,
    ticker: &mut impl Ticker,
    sink: &mut LogEventSink,
) -> Result<()> {
    if !session.program().is_empty() {
        let trace = session.run_program(robot, sink)?;
        let names: Vec<_> = trace.iter().map(|c| c.name()).collect();
        info!("Program complete: {}", names.join(" "));
    }

    let Some(kind) = args.monitor else {
        return Ok(());
    };
    let cfg = MonitorConfig::from_raw(&args.range, &args.threshold, &args.duration)
        .map_err(finchcontrol::Error::from)
        .context("invalid monitor settings")?;

    // Programs run to completion; a Ctrl-C pressed meanwhile must not
    // cancel the monitor before it starts.
    token.reset();

    let report = match kind {
        MonitorArg::Light => {
            let sensor: LightSensor = args
                .sensor
                .parse()
                .map_err(finchcontrol::Error::from)
                .context("invalid --sensor")?;
            session.monitor_light(sensor, &cfg, robot, ticker, sink)?
        }
        MonitorArg::Temperature => session.monitor_temperature(&cfg, robot, ticker, sink)?,
    };
    info!("Monitor: {report}");
    Ok(())
}
