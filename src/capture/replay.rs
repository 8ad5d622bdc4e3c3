//! Scripted position source: replays a recorded walk from JSONL.
//!
//! One cue per line, tagged by `cue`:
//!
//! ```text
//! {"cue":"fix","lat":51.5,"lng":-0.12,"accuracy":8.0,"timestamp":"2024-05-01T09:00:00Z"}
//! {"cue":"pause"}
//! {"cue":"note","text":"Gate is locked"}
//! {"cue":"photo","file":"gate.jpg"}
//! {"cue":"stop"}
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Cues are delivered
//! in file order. With a speed factor, the gaps between fix timestamps are
//! replayed in scaled real time.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use jiff::Timestamp;
use serde::Deserialize;
use tokio::sync::watch;

use crate::model::{Coordinate, MediaKind, Sample};
use crate::recorder::{Annotation, Controls, Signal};

use super::{MediaRequest, PositionError, PositionSource, Watch};

/// One scripted happening.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "cue", rename_all = "camelCase")]
pub enum Cue {
    Fix {
        lat: f64,
        lng: f64,
        accuracy: f64,
        timestamp: Timestamp,
    },
    Pause,
    Note {
        text: String,
    },
    Photo {
        file: PathBuf,
    },
    Video {
        file: PathBuf,
    },
    Audio {
        file: PathBuf,
    },
    Stop,
}

impl Cue {
    fn into_signal(self) -> Signal {
        let media = |kind, file| Signal::Annotate(Annotation::Media(MediaRequest { kind, file }));
        match self {
            Self::Fix {
                lat,
                lng,
                accuracy,
                timestamp,
            } => Signal::Fix(Sample {
                coordinate: Coordinate::new(lat, lng),
                accuracy,
                timestamp,
            }),
            Self::Pause => Signal::TogglePause,
            Self::Note { text } => Signal::Annotate(Annotation::Note(text)),
            Self::Photo { file } => media(MediaKind::Photo, file),
            Self::Video { file } => media(MediaKind::Video, file),
            Self::Audio { file } => media(MediaKind::Audio, file),
            Self::Stop => Signal::Stop,
        }
    }
}

/// A script line that isn't a valid cue.
#[derive(Debug, thiserror::Error)]
#[error("line {line}: {source}")]
pub struct ScriptError {
    pub line: usize,
    #[source]
    pub source: serde_json::Error,
}

/// Position source driven by a cue script.
pub struct Replay {
    cues: Vec<Cue>,
    speed: f64,
    latest: Arc<watch::Sender<Option<Coordinate>>>,
}

impl Replay {
    pub fn new(cues: Vec<Cue>) -> Self {
        Self {
            cues,
            speed: 0.0,
            latest: Arc::new(watch::Sender::new(None)),
        }
    }

    /// Parses a JSONL cue script.
    pub fn parse(script: &str) -> Result<Self, ScriptError> {
        let mut cues = Vec::new();
        for (i, line) in script.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let cue = serde_json::from_str(line)
                .map_err(|source| ScriptError { line: i + 1, source })?;
            cues.push(cue);
        }
        Ok(Self::new(cues))
    }

    /// Replays fix gaps divided by `speed`. Zero or less replays instantly.
    #[must_use]
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn cues(&self) -> &[Cue] {
        &self.cues
    }
}

impl PositionSource for Replay {
    fn watch(&self, controls: Controls) -> Result<Watch, PositionError> {
        if self.cues.is_empty() {
            return Err(PositionError::Unavailable("script has no cues".into()));
        }
        let cues = self.cues.clone();
        let speed = self.speed;
        let latest = Arc::clone(&self.latest);

        let task = tokio::spawn(async move {
            let mut previous: Option<Timestamp> = None;
            for cue in cues {
                if let Cue::Fix {
                    lat,
                    lng,
                    timestamp,
                    ..
                } = cue
                {
                    if let Some(prev) = previous
                        && speed > 0.0
                    {
                        let gap = timestamp.duration_since(prev).as_secs_f64() / speed;
                        if gap > 0.0 {
                            match Duration::try_from_secs_f64(gap) {
                                Ok(wait) => tokio::time::sleep(wait).await,
                                Err(e) => tracing::warn!(
                                    gap_secs = gap,
                                    "replay gap out of range, delivering at once: {e}"
                                ),
                            }
                        }
                    }
                    previous = Some(timestamp);
                    latest.send_replace(Some(Coordinate::new(lat, lng)));
                }
                if controls.send(cue.into_signal()).is_err() {
                    break;
                }
            }
        });
        Ok(Watch::new(task))
    }

    async fn locate(&self) -> Result<Coordinate, PositionError> {
        let latest = *self.latest.borrow();
        latest.ok_or_else(|| PositionError::Unavailable("no fix received yet".into()))
    }
}
