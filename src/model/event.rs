//! Event: one timestamped, geolocated record in a route's log.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_with::{base64::Base64, serde_as};

use super::Coordinate;

/// A single entry in the event log.
///
/// Tagged enum so each element of a stored or shared array is
/// self-describing when read back. Media bytes travel as base64 in
/// `content`; note text travels as-is.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Event {
    /// An accepted position fix.
    Location {
        timestamp: Timestamp,
        #[serde(rename = "coords")]
        coordinate: Coordinate,
    },

    /// A typed note.
    #[serde(rename = "text")]
    TextNote {
        timestamp: Timestamp,
        #[serde(rename = "coords")]
        coordinate: Coordinate,
        #[serde(rename = "content")]
        text: String,
    },

    /// A still image.
    Photo {
        timestamp: Timestamp,
        #[serde(rename = "coords")]
        coordinate: Coordinate,
        #[serde_as(as = "Base64")]
        #[serde(rename = "content")]
        image: Vec<u8>,
    },

    /// A video clip.
    Video {
        timestamp: Timestamp,
        #[serde(rename = "coords")]
        coordinate: Coordinate,
        #[serde_as(as = "Base64")]
        #[serde(rename = "content")]
        video: Vec<u8>,
    },

    /// A short audio recording.
    #[serde(rename = "audio")]
    AudioNote {
        timestamp: Timestamp,
        #[serde(rename = "coords")]
        coordinate: Coordinate,
        #[serde_as(as = "Base64")]
        #[serde(rename = "content")]
        audio: Vec<u8>,
    },
}

impl Event {
    /// Builds a media event of the given kind from captured bytes.
    pub fn media(
        kind: MediaKind,
        timestamp: Timestamp,
        coordinate: Coordinate,
        bytes: Vec<u8>,
    ) -> Self {
        match kind {
            MediaKind::Photo => Self::Photo {
                timestamp,
                coordinate,
                image: bytes,
            },
            MediaKind::Video => Self::Video {
                timestamp,
                coordinate,
                video: bytes,
            },
            MediaKind::Audio => Self::AudioNote {
                timestamp,
                coordinate,
                audio: bytes,
            },
        }
    }

    pub fn kind(&self) -> EventKind {
        match self {
            Self::Location { .. } => EventKind::Location,
            Self::TextNote { .. } => EventKind::TextNote,
            Self::Photo { .. } => EventKind::Photo,
            Self::Video { .. } => EventKind::Video,
            Self::AudioNote { .. } => EventKind::AudioNote,
        }
    }

    pub fn timestamp(&self) -> Timestamp {
        match self {
            Self::Location { timestamp, .. }
            | Self::TextNote { timestamp, .. }
            | Self::Photo { timestamp, .. }
            | Self::Video { timestamp, .. }
            | Self::AudioNote { timestamp, .. } => *timestamp,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        match self {
            Self::Location { coordinate, .. }
            | Self::TextNote { coordinate, .. }
            | Self::Photo { coordinate, .. }
            | Self::Video { coordinate, .. }
            | Self::AudioNote { coordinate, .. } => *coordinate,
        }
    }
}

/// Which variant an event is, without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Location,
    TextNote,
    Photo,
    Video,
    AudioNote,
}

impl EventKind {
    /// The wire name, as it appears in the `type` field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::TextNote => "text",
            Self::Photo => "photo",
            Self::Video => "video",
            Self::AudioNote => "audio",
        }
    }
}

/// The kinds of media a capture device can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Video,
    Audio,
}
