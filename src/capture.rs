//! Devices the recorder talks to: position sources and media capture.
//!
//! Both are asynchronous. A position source streams fixes into the
//! recorder until its [`Watch`] is dropped, and answers one-shot
//! `locate` requests for annotations. Media capture yields raw bytes.

mod files;
mod replay;

use std::future::Future;
use std::path::PathBuf;

use tokio::task::JoinHandle;

use crate::model::{Coordinate, MediaKind};
use crate::recorder::Controls;

pub use files::FileMedia;
pub use replay::Replay;

/// The position source could not produce a fix.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("position unavailable: {0}")]
    Unavailable(String),
}

/// Why an annotation capture was abandoned.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error(transparent)]
    Position(#[from] PositionError),
}

/// What to capture, and where the capture device reads it from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaRequest {
    pub kind: MediaKind,
    pub file: PathBuf,
}

/// A stream of position fixes plus one-shot lookups.
pub trait PositionSource: Send + Sync + 'static {
    /// Starts delivering fixes through `controls`.
    ///
    /// Delivery stops when the returned [`Watch`] is dropped.
    fn watch(&self, controls: Controls) -> Result<Watch, PositionError>;

    /// The device's best current position.
    fn locate(&self) -> impl Future<Output = Result<Coordinate, PositionError>> + Send;
}

/// A still, video, or audio capture device.
pub trait MediaCapture: Send + Sync + 'static {
    fn capture(
        &self,
        request: MediaRequest,
    ) -> impl Future<Output = Result<Vec<u8>, CaptureError>> + Send;
}

/// A live position subscription. Dropping it cancels delivery.
#[derive(Debug)]
pub struct Watch {
    task: JoinHandle<()>,
}

impl Watch {
    pub fn new(task: JoinHandle<()>) -> Self {
        Self { task }
    }
}

impl Drop for Watch {
    fn drop(&mut self) {
        self.task.abort();
    }
}
