//! The record command: drive the live recorder from a session script.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use jiff::Timestamp;
use tokio::sync::watch;

use crate::capture::{FileMedia, Replay};
use crate::config::Config;
use crate::recorder::{self, Progress, Recorder};
use crate::session;
use crate::share;
use crate::storage::{RouteBook, Storage};

use super::format::{format_distance, format_elapsed};

#[derive(Debug, Args)]
pub struct RecordArgs {
    /// Session script: one JSON cue per line.
    script: PathBuf,

    /// Replay speed relative to the fix timestamps (2 = twice as fast).
    /// 0 replays instantly.
    #[arg(long, default_value_t = 0.0, value_parser = parse_speed)]
    speed: f64,

    /// Save the finished route under this name.
    #[arg(long)]
    save: Option<String>,

    /// Print a share link for the recorded events.
    #[arg(long)]
    share: bool,
}

/// A finite, non-negative replay speed.
fn parse_speed(s: &str) -> Result<f64, String> {
    let speed: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if !speed.is_finite() || speed < 0.0 {
        return Err(format!("speed must be a finite number >= 0, got {s}"));
    }
    Ok(speed)
}

pub(super) async fn cmd_record(
    config: &Config,
    storage: &Storage,
    args: RecordArgs,
) -> Result<(), String> {
    let script = fs::read_to_string(&args.script)
        .map_err(|e| format!("failed to read {}: {e}", args.script.display()))?;
    let replay = Replay::parse(&script)
        .map_err(|e| format!("invalid script {}: {e}", args.script.display()))?
        .with_speed(args.speed);
    tracing::info!(cues = replay.cues().len(), speed = args.speed, "replaying script");

    let recorder = Recorder::new(config.filter(), replay, FileMedia);
    let live = (args.speed > 0.0).then(|| tokio::spawn(show_progress(recorder.progress())));

    let (controls, inbox) = recorder::channel();
    let interrupt = controls.clone();
    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = interrupt.stop();
        }
    });

    let recording = recorder
        .run(controls, inbox)
        .await
        .map_err(|e| e.to_string())?;
    ctrl_c.abort();
    if let Some(live) = live {
        let _ = live.await;
        eprintln!();
    }

    for notice in &recording.notices {
        eprintln!("{notice}");
    }

    let state = &recording.state;
    println!("Distance: {}", format_distance(state.total_distance_km));
    println!("Time:     {}", format_elapsed(recording.elapsed));
    println!("Points:   {}  Events: {}", state.path().len(), state.log.len());

    if let Some(name) = args.save.as_deref() {
        let summary = session::freeze(name, state, recording.elapsed, Timestamp::now())
            .map_err(|e| format!("route not saved: {e}"))?;
        let index = RouteBook::new(storage)
            .append(summary)
            .map_err(|e| format!("failed to save route: {e}"))?;
        tracing::info!(index, "route saved");
        eprintln!("Route saved! ({index})");
    }

    if args.share {
        let link = share::link(&config.share_base, state.log.events())
            .map_err(|e| format!("failed to build share link: {e}"))?;
        println!("{link}");
    }

    Ok(())
}

/// Redraws a one-line progress readout until the recorder goes away.
async fn show_progress(mut progress: watch::Receiver<Progress>) {
    while progress.changed().await.is_ok() {
        let snapshot = progress.borrow_and_update().clone();
        let paused = if snapshot.paused { "  [paused]" } else { "" };
        eprint!(
            "\r{} points  {}{paused}   ",
            snapshot.path.len(),
            format_distance(snapshot.total_distance_km)
        );
    }
}
