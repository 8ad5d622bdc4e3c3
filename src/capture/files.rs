//! File-backed media capture: the picked file is the captured media.

use std::io;

use super::{CaptureError, MediaCapture, MediaRequest};

/// Reads captured media from files, like a file picker.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileMedia;

impl MediaCapture for FileMedia {
    async fn capture(&self, request: MediaRequest) -> Result<Vec<u8>, CaptureError> {
        tokio::fs::read(&request.file).await.map_err(|e| {
            let what = format!("{}: {e}", request.file.display());
            match e.kind() {
                io::ErrorKind::PermissionDenied => CaptureError::PermissionDenied(what),
                _ => CaptureError::DeviceUnavailable(what),
            }
        })
    }
}
