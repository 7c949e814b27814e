//! rtouch - replay recorded touch interactions and print the recognized gestures.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use rtouch::replay::DEFAULT_FRAME_INTERVAL_MS;
use rtouch::{
    EventName, GestureRecognizer, GestureThresholds, ReplayOptions, TouchEvent, TraceSource,
};
use std::collections::BTreeSet;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (RUST_LOG=debug shows recognizer decisions)
    env_logger::init();

    let matches = cli().get_matches();

    let thresholds = load_thresholds(&matches)?;

    if matches.get_flag("print-config") {
        print_config(&thresholds)?;
        return Ok(());
    }

    let trace_path = PathBuf::from(
        matches
            .get_one::<String>("trace")
            .context("a trace file is required")?,
    );

    let frame_ms = *matches
        .get_one::<f64>("frame-ms")
        .unwrap_or(&DEFAULT_FRAME_INTERVAL_MS);
    let throttle = !matches.get_flag("no-throttle");
    let options = ReplayOptions {
        frame_interval_ms: throttle.then_some(frame_ms),
        realtime: matches.get_flag("realtime"),
    };

    let only = match matches.get_one::<String>("only") {
        Some(list) => Some(parse_event_filter(list)?),
        None => None,
    };

    let mut source = TraceSource::from_path(&trace_path)
        .await
        .with_context(|| format!("failed to load trace {}", trace_path.display()))?;
    let mut recognizer = GestureRecognizer::with_thresholds(thresholds)?;
    recognizer.set_throttle_enabled(throttle);

    log::info!(
        "replaying {} notifications from {}",
        source.len(),
        trace_path.display()
    );
    let report = rtouch::replay(&mut source, &mut recognizer, &options).await?;

    for event in &report.events {
        if only.as_ref().map_or(true, |names| names.contains(&event.name)) {
            println!("{}", format_event(event));
        }
    }

    if matches.get_flag("summary") {
        println!();
        println!("notifications: {}", report.notifications);
        println!("events: {}", report.events.len());
        let counts = report.gesture_counts();
        if counts.is_empty() {
            println!("gestures: none");
        } else {
            for (name, count) in counts {
                println!("{name}: {count}");
            }
        }
    }

    Ok(())
}

fn cli() -> Command {
    let command = Command::new("rtouch")
        .version(rtouch::VERSION)
        .about("Replay recorded touch interactions through the gesture recognizer")
        .long_about(
            "rtouch replays a recorded touch trace (one `<time_ms> <down|move|up|cancel> \
             [x,y ...]` notification per line) through the single-contact gesture \
             recognizer and prints every event it publishes.",
        )
        .arg(
            Arg::new("trace")
                .help("Path to the trace file to replay")
                .required_unless_present("print-config")
                .index(1),
        )
        .arg(
            Arg::new("frame-ms")
                .long("frame-ms")
                .value_name("MS")
                .help("Interval between synthesized rendering frames")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("no-throttle")
                .long("no-throttle")
                .help("Do not emit per-frame throttle events")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("realtime")
                .long("realtime")
                .help("Pace the replay according to the recorded timestamps")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("only")
                .long("only")
                .value_name("NAMES")
                .help("Comma-separated event names to print (e.g. tap,press,swipe)"),
        )
        .arg(
            Arg::new("summary")
                .long("summary")
                .help("Print gesture counts after the event list")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("print-config")
                .long("print-config")
                .help("Print the effective thresholds and exit")
                .action(ArgAction::SetTrue),
        );

    #[cfg(feature = "config")]
    let command = command.arg(
        Arg::new("config")
            .long("config")
            .short('c')
            .value_name("PATH")
            .help("Thresholds file (defaults to <config dir>/rtouch/config.toml)"),
    );

    command
}

#[cfg(feature = "config")]
fn load_thresholds(matches: &ArgMatches) -> Result<GestureThresholds> {
    let thresholds = match matches.get_one::<String>("config") {
        Some(path) => GestureThresholds::load(&PathBuf::from(path))
            .with_context(|| format!("failed to load config {path}"))?,
        None => GestureThresholds::load_default()?,
    };
    Ok(thresholds)
}

#[cfg(not(feature = "config"))]
fn load_thresholds(_matches: &ArgMatches) -> Result<GestureThresholds> {
    Ok(GestureThresholds::default())
}

#[cfg(feature = "config")]
fn print_config(thresholds: &GestureThresholds) -> Result<()> {
    print!("{}", thresholds.to_toml()?);
    Ok(())
}

#[cfg(not(feature = "config"))]
fn print_config(thresholds: &GestureThresholds) -> Result<()> {
    println!("{thresholds:#?}");
    Ok(())
}

fn parse_event_filter(list: &str) -> Result<BTreeSet<EventName>> {
    let mut names = BTreeSet::new();
    for item in list.split(',').filter(|item| !item.trim().is_empty()) {
        names.insert(item.parse::<EventName>()?);
    }
    if names.is_empty() {
        anyhow::bail!("--only needs at least one event name");
    }
    Ok(names)
}

fn format_event(event: &TouchEvent) -> String {
    let mut line = format!(
        "{:>9.1} {:<12} dx={} dy={}",
        event.time_ms,
        event.name.as_str(),
        event.delta.x,
        event.delta.y
    );
    if let Some(point) = event.point {
        line.push_str(&format!(" at={point}"));
    }
    if let Some(metrics) = event.metrics {
        line.push_str(&format!(
            " duration={} vx={:.3} dir={}",
            metrics.duration, metrics.velocity_x, metrics.direction
        ));
    }
    line
}
