//! Share links: an event log packed into a URL query parameter.
//!
//! ```text
//! <base>?data=<percent-encoded base64 of the JSON event array>
//! ```
//!
//! Only the events travel. Name, duration, and distance stay behind.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use percent_encoding::{NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use url::Url;

use crate::model::Event;

/// Query parameter carrying the packed log.
pub const DATA_PARAM: &str = "data";

/// Errors from packing or unpacking shared data.
#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    #[error("malformed share data: {0}")]
    Malformed(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Packs events into the URL-safe text blob.
pub fn encode(events: &[Event]) -> Result<String, ShareError> {
    let json = serde_json::to_string(events)?;
    let packed = STANDARD.encode(json);
    Ok(utf8_percent_encode(&packed, NON_ALPHANUMERIC).to_string())
}

/// Unpacks a blob produced by [`encode`].
///
/// All or nothing: any flaw in the blob fails the whole decode.
pub fn decode(blob: &str) -> Result<Vec<Event>, ShareError> {
    let packed = percent_decode_str(blob)
        .decode_utf8()
        .map_err(|e| ShareError::Malformed(format!("bad percent-encoding: {e}")))?;
    unpack(&packed)
}

/// Base64 text back to events.
fn unpack(packed: &str) -> Result<Vec<Event>, ShareError> {
    let bytes = STANDARD
        .decode(packed.as_bytes())
        .map_err(|e| ShareError::Malformed(format!("bad base64: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| ShareError::Malformed(format!("not an event list: {e}")))
}

/// Builds a full share link on top of `base`.
///
/// An existing query on `base` is kept; the data parameter goes last.
pub fn link(base: &str, events: &[Event]) -> Result<String, ShareError> {
    let mut url = parse(base)?;
    let data = format!("{DATA_PARAM}={}", encode(events)?);
    let query = match url.query() {
        Some(existing) if !existing.is_empty() => format!("{existing}&{data}"),
        _ => data,
    };
    url.set_query(Some(&query));
    Ok(url.into())
}

/// Extracts and decodes the events carried by a link.
///
/// `Ok(None)` means the link's query carries no share data at all.
pub fn from_link(link: &str) -> Result<Option<Vec<Event>>, ShareError> {
    let url = parse(link)?;
    let Some((_, packed)) = url.query_pairs().find(|(key, _)| key == DATA_PARAM) else {
        return Ok(None);
    };
    unpack(&packed).map(Some)
}

fn parse(link: &str) -> Result<Url, ShareError> {
    Url::parse(link).map_err(|e| ShareError::Malformed(format!("bad link {link:?}: {e}")))
}
