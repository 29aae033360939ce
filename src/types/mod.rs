//! Type definitions for the assistant link client
//!
//! - [`identifiers`] - `SessionId` newtype
//! - [`messages`] - transcript turns, outbound envelope, inbound frames
//! - [`options`] - widget configuration and builder
//! - [`state`] - connection state

pub mod identifiers;
pub mod messages;
pub mod options;
pub mod state;

pub use identifiers::SessionId;
pub use messages::{Envelope, InboundFrame, Role, TranscriptMessage};
pub use options::{WidgetConfig, WidgetConfigBuilder};
pub use state::ConnectionState;
