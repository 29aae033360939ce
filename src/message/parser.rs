//! Frame parser and envelope encoder

use crate::error::Result;
use crate::types::messages::{CHUNK_PREFIX, DONE_MARKER, Envelope, InboundFrame};

/// Parse an inbound text frame
///
/// Returns `None` for frames that are neither the completion marker nor
/// `chunk:`-prefixed; callers ignore those.
#[must_use]
pub fn parse_frame(payload: &str) -> Option<InboundFrame> {
    if payload == DONE_MARKER {
        return Some(InboundFrame::Done);
    }
    payload
        .strip_prefix(CHUNK_PREFIX)
        .map(|text| InboundFrame::Chunk(text.to_string()))
}

/// Encode an envelope as one JSON text frame
///
/// # Errors
/// Returns `LinkError::JsonDecode` if serialization fails
pub fn encode_envelope(envelope: &Envelope<'_>) -> Result<String> {
    Ok(serde_json::to_string(envelope)?)
}
