//! Wire handling for the assistant channel
//!
//! Inbound text frames are parsed into [`InboundFrame`](crate::types::InboundFrame)s;
//! outbound envelopes are encoded as single JSON text frames.

mod parser;

pub use parser::{encode_envelope, parse_frame};
