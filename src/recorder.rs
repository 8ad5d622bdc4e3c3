//! The live recorder: one event loop that owns the tracking session.
//!
//! Position fixes, pause toggles, annotation requests and the stop
//! request all arrive through a single inbox, so each one is applied to
//! the session to completion before the next is looked at. Annotation
//! captures run concurrently in a [`JoinSet`] and are appended in the
//! order they finish. Captures still running at stop are awaited and
//! still land in the log.

use std::fmt;
use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;

use crate::capture::{CaptureError, MediaCapture, MediaRequest, PositionError, PositionSource};
use crate::filter::SampleFilter;
use crate::model::{Coordinate, Event, EventKind, MediaKind, Sample};
use crate::tracking::{TrackingSession, TrackingState};

/// Something the recorder must react to.
#[derive(Debug)]
pub enum Signal {
    Fix(Sample),
    TogglePause,
    Annotate(Annotation),
    Stop,
}

/// A request to attach something to the current position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Annotation {
    Note(String),
    Media(MediaRequest),
}

impl Annotation {
    fn label(&self) -> &'static str {
        match self {
            Self::Note(_) => "note",
            Self::Media(request) => match request.kind {
                MediaKind::Photo => "photo",
                MediaKind::Video => "video",
                MediaKind::Audio => "audio",
            },
        }
    }
}

/// The recorder has shut down and no longer takes signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("recorder has stopped")]
pub struct Closed;

/// Sending half of the recorder inbox.
#[derive(Debug, Clone)]
pub struct Controls {
    tx: mpsc::UnboundedSender<Signal>,
}

impl Controls {
    pub fn send(&self, signal: Signal) -> Result<(), Closed> {
        self.tx.send(signal).map_err(|_| Closed)
    }

    pub fn stop(&self) -> Result<(), Closed> {
        self.send(Signal::Stop)
    }
}

/// Receiving half of the recorder inbox.
#[derive(Debug)]
pub struct Inbox {
    rx: mpsc::UnboundedReceiver<Signal>,
}

impl Inbox {
    pub async fn recv(&mut self) -> Option<Signal> {
        self.rx.recv().await
    }
}

/// Creates a connected inbox.
pub fn channel() -> (Controls, Inbox) {
    let (tx, rx) = mpsc::unbounded_channel();
    (Controls { tx }, Inbox { rx })
}

/// Snapshot for redrawing a live map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Progress {
    pub path: Vec<Coordinate>,
    pub total_distance_km: f64,
    pub paused: bool,
}

/// Outcome of one annotation capture.
#[derive(Debug)]
pub enum Notice {
    Saved(EventKind),
    Failed {
        what: &'static str,
        error: CaptureError,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Saved(kind) => {
                let what = match kind {
                    EventKind::Location => "Location",
                    EventKind::TextNote => "Note",
                    EventKind::Photo => "Photo",
                    EventKind::Video => "Video",
                    EventKind::AudioNote => "Audio",
                };
                write!(f, "{what} saved.")
            }
            Self::Failed { what, error } => write!(f, "Could not save {what}: {error}"),
        }
    }
}

/// A finished recording.
#[derive(Debug)]
pub struct Recording {
    pub state: TrackingState,
    pub elapsed: SignedDuration,
    pub notices: Vec<Notice>,
}

#[derive(Debug, thiserror::Error)]
pub enum RecorderError {
    #[error("could not start tracking: {0}")]
    Position(#[from] PositionError),
}

type Captured = (&'static str, Result<Event, CaptureError>);

/// Drives a [`TrackingSession`] from a position source and capture device.
pub struct Recorder<P, M> {
    filter: SampleFilter,
    source: Arc<P>,
    media: Arc<M>,
    progress: watch::Sender<Progress>,
}

impl<P: PositionSource, M: MediaCapture> Recorder<P, M> {
    pub fn new(filter: SampleFilter, source: P, media: M) -> Self {
        Self {
            filter,
            source: Arc::new(source),
            media: Arc::new(media),
            progress: watch::Sender::new(Progress::default()),
        }
    }

    /// Live progress, updated after every accepted fix and pause toggle.
    pub fn progress(&self) -> watch::Receiver<Progress> {
        self.progress.subscribe()
    }

    /// Records until a stop signal arrives or every sender is gone.
    ///
    /// `controls` is handed to the position source; keep a clone to
    /// pause, annotate, or stop from outside.
    pub async fn run(
        self,
        controls: Controls,
        mut inbox: Inbox,
    ) -> Result<Recording, RecorderError> {
        let mut subscription = Some(self.source.watch(controls)?);
        let mut session = TrackingSession::start(self.filter, Timestamp::now());
        tracing::info!("tracking started");

        let mut captures: JoinSet<Captured> = JoinSet::new();
        let mut notices = Vec::new();
        let mut elapsed = None;

        loop {
            if elapsed.is_some() && captures.is_empty() {
                break;
            }
            tokio::select! {
                signal = inbox.recv(), if elapsed.is_none() => match signal {
                    Some(Signal::Fix(sample)) => {
                        if session.offer(&sample).is_accepted() {
                            self.publish(&session);
                        }
                    }
                    Some(Signal::TogglePause) => {
                        let now = Timestamp::now();
                        let paused = session.toggle_pause(now);
                        tracing::info!(paused, elapsed = %session.elapsed(now), "pause toggled");
                        self.publish(&session);
                    }
                    Some(Signal::Annotate(annotation)) => {
                        let what = annotation.label();
                        let source = Arc::clone(&self.source);
                        let media = Arc::clone(&self.media);
                        captures.spawn(async move {
                            (what, capture(annotation, source, media).await)
                        });
                    }
                    Some(Signal::Stop) | None => {
                        subscription.take();
                        elapsed = Some(session.stop(Timestamp::now()));
                        tracing::info!(pending = captures.len(), "tracking stopped");
                    }
                },
                Some(joined) = captures.join_next(), if !captures.is_empty() => match joined {
                    Ok((_, Ok(event))) => {
                        notices.push(Notice::Saved(event.kind()));
                        session.annotate(event);
                    }
                    Ok((what, Err(error))) => {
                        tracing::warn!("could not save {what}: {error}");
                        notices.push(Notice::Failed { what, error });
                    }
                    Err(e) => tracing::warn!("capture task failed: {e}"),
                },
            }
        }

        Ok(Recording {
            state: session.into_state(),
            elapsed: elapsed.unwrap_or(SignedDuration::ZERO),
            notices,
        })
    }

    fn publish(&self, session: &TrackingSession) {
        let state = session.state();
        self.progress.send_replace(Progress {
            path: session.path(),
            total_distance_km: state.total_distance_km,
            paused: state.paused,
        });
    }
}

/// Captures one annotation at the device's current position.
async fn capture<P: PositionSource, M: MediaCapture>(
    annotation: Annotation,
    source: Arc<P>,
    media: Arc<M>,
) -> Result<Event, CaptureError> {
    match annotation {
        Annotation::Note(text) => {
            let coordinate = source.locate().await?;
            Ok(Event::TextNote {
                timestamp: Timestamp::now(),
                coordinate,
                text,
            })
        }
        Annotation::Media(request) => {
            let kind = request.kind;
            let bytes = media.capture(request).await?;
            let coordinate = source.locate().await?;
            Ok(Event::media(kind, Timestamp::now(), coordinate, bytes))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;
    use std::time::Duration;

    use crate::capture::{FileMedia, Replay, Watch};

    fn fix(lng: f64, accuracy: f64, minute: u8) -> String {
        format!(
            r#"{{"cue":"fix","lat":0.0,"lng":{lng},"accuracy":{accuracy},"timestamp":"2024-05-01T09:{minute:02}:00Z"}}"#
        )
    }

    async fn record<M: MediaCapture>(script: &str, media: M) -> Recording {
        let recorder = Recorder::new(
            SampleFilter::default(),
            Replay::parse(script).unwrap(),
            media,
        );
        let (controls, inbox) = channel();
        recorder.run(controls, inbox).await.unwrap()
    }

    /// Media device that takes a while and returns fixed bytes.
    struct SlowMedia(Duration);

    impl MediaCapture for SlowMedia {
        async fn capture(&self, _request: MediaRequest) -> Result<Vec<u8>, CaptureError> {
            tokio::time::sleep(self.0).await;
            Ok(vec![7, 7, 7])
        }
    }

    /// Source whose subscription always fails.
    struct NoGps;

    impl PositionSource for NoGps {
        fn watch(&self, _controls: Controls) -> Result<Watch, PositionError> {
            Err(PositionError::Unavailable("no receiver".into()))
        }

        async fn locate(&self) -> Result<Coordinate, PositionError> {
            Err(PositionError::Unavailable("no receiver".into()))
        }
    }

    #[tokio::test]
    async fn replayed_walk_accumulates_distance() {
        let script = [fix(0.0, 5.0, 0), fix(0.001, 5.0, 1), fix(0.002, 5.0, 2)].join("\n");
        let recording = record(&script, FileMedia).await;

        assert_eq!(recording.state.path().len(), 3);
        assert!((recording.state.total_distance_km - 0.2224).abs() < 1e-4);
        assert!(recording.notices.is_empty());
    }

    #[tokio::test]
    async fn rejected_and_paused_fixes_are_dropped() {
        let script = [
            fix(0.0, 5.0, 0),
            fix(0.0005, 40.0, 1),
            fix(0.5, 5.0, 2),
            r#"{"cue":"pause"}"#.into(),
            fix(0.0001, 5.0, 3),
            fix(0.0002, 5.0, 4),
            r#"{"cue":"pause"}"#.into(),
            fix(0.001, 5.0, 5),
            r#"{"cue":"stop"}"#.into(),
        ]
        .join("\n");
        let recording = record(&script, FileMedia).await;

        assert_eq!(
            recording.state.path(),
            vec![Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.001)]
        );
        assert!(!recording.state.paused);
    }

    #[tokio::test]
    async fn note_lands_at_latest_fix() {
        let script = [
            fix(0.0, 5.0, 0),
            r#"{"cue":"note","text":"Stile"}"#.into(),
            r#"{"cue":"stop"}"#.into(),
        ]
        .join("\n");
        let recording = record(&script, FileMedia).await;

        let events = recording.state.log.events();
        assert_eq!(events.len(), 2);
        match &events[1] {
            Event::TextNote {
                coordinate, text, ..
            } => {
                assert_eq!(*coordinate, Coordinate::new(0.0, 0.0));
                assert_eq!(text, "Stile");
            }
            other => panic!("expected note, got {other:?}"),
        }
        assert_eq!(recording.notices.len(), 1);
        assert_eq!(recording.notices[0].to_string(), "Note saved.");
    }

    #[tokio::test]
    async fn capture_in_flight_at_stop_still_lands() {
        let script = [
            fix(0.0, 5.0, 0),
            r#"{"cue":"photo","file":"any.jpg"}"#.into(),
            r#"{"cue":"stop"}"#.into(),
            fix(0.001, 5.0, 1),
        ]
        .join("\n");
        let recording = record(&script, SlowMedia(Duration::from_millis(50))).await;

        let kinds: Vec<EventKind> = recording.state.log.events().iter().map(Event::kind).collect();
        assert_eq!(kinds, vec![EventKind::Location, EventKind::Photo]);
        assert_eq!(recording.notices[0].to_string(), "Photo saved.");
    }

    #[tokio::test]
    async fn failed_capture_reports_without_appending() {
        let dir = tempfile::TempDir::new().unwrap();
        let missing: PathBuf = dir.path().join("missing.jpg");
        let script = [
            fix(0.0, 5.0, 0),
            format!(r#"{{"cue":"photo","file":{:?}}}"#, missing.display().to_string()),
            r#"{"cue":"stop"}"#.into(),
        ]
        .join("\n");
        let recording = record(&script, FileMedia).await;

        assert_eq!(recording.state.log.len(), 1);
        assert!(matches!(
            recording.notices.as_slice(),
            [Notice::Failed {
                what: "photo",
                error: CaptureError::DeviceUnavailable(_)
            }]
        ));
    }

    #[tokio::test]
    async fn note_before_any_fix_has_no_position() {
        let script = [r#"{"cue":"note","text":"lost"}"#, r#"{"cue":"stop"}"#].join("\n");
        let recording = record(&script, FileMedia).await;

        assert!(recording.state.log.is_empty());
        assert!(matches!(
            recording.notices.as_slice(),
            [Notice::Failed {
                error: CaptureError::Position(_),
                ..
            }]
        ));
    }

    #[tokio::test]
    async fn unavailable_source_fails_to_start() {
        let recorder = Recorder::new(SampleFilter::default(), NoGps, FileMedia);
        let (controls, inbox) = channel();

        let result = recorder.run(controls, inbox).await;
        assert!(matches!(result, Err(RecorderError::Position(_))));
    }

    #[tokio::test]
    async fn progress_follows_accepted_fixes() {
        let script = [fix(0.0, 5.0, 0), fix(0.001, 5.0, 1), r#"{"cue":"pause"}"#.into()]
            .join("\n");
        let recorder = Recorder::new(
            SampleFilter::default(),
            Replay::parse(&script).unwrap(),
            FileMedia,
        );
        let progress = recorder.progress();
        let (controls, inbox) = channel();

        recorder.run(controls, inbox).await.unwrap();

        let last = progress.borrow().clone();
        assert_eq!(last.path.len(), 2);
        assert!((last.total_distance_km - 0.1112).abs() < 1e-4);
        assert!(last.paused);
    }

    #[tokio::test]
    async fn controls_steer_a_running_recorder() {
        let script = fix(0.0, 5.0, 0);
        let recorder = Recorder::new(
            SampleFilter::default(),
            Replay::parse(&script).unwrap().with_speed(1.0),
            FileMedia,
        );
        let (controls, inbox) = channel();
        let remote = controls.clone();
        remote
            .send(Signal::Annotate(Annotation::Note("remote".into())))
            .unwrap();
        remote.send(Signal::TogglePause).unwrap();
        remote.stop().unwrap();

        let recording = recorder.run(controls, inbox).await.unwrap();

        assert!(recording.state.paused);
        assert_eq!(recording.notices.len(), 1);
        assert!(recording.elapsed < SignedDuration::from_secs(1));
        assert_eq!(remote.stop(), Err(Closed));
    }
}
