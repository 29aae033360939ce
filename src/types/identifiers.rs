//! Newtype wrappers for type safety
//!
//! This module contains newtype wrappers that keep identifiers from being
//! mixed up with arbitrary strings.

use serde::{Deserialize, Serialize};

/// Length of the random suffix appended to generated session IDs
const SESSION_SUFFIX_LEN: usize = 9;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Session ID newtype for type safety
///
/// One session ID is generated per client and sent with every envelope so the
/// assistant service can correlate turns. It is never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// Create a session ID from an existing value
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh `session_<unix-millis>_<suffix>` identifier
    #[must_use]
    pub fn generate() -> Self {
        let millis = chrono::Utc::now().timestamp_millis();
        Self(format!("session_{millis}_{}", random_suffix()))
    }

    /// Get the session ID as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

fn random_suffix() -> String {
    let mut value = uuid::Uuid::new_v4().as_u128();
    let mut suffix = String::with_capacity(SESSION_SUFFIX_LEN);
    for _ in 0..SESSION_SUFFIX_LEN {
        suffix.push(BASE36[(value % 36) as usize] as char);
        value /= 36;
    }
    suffix
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_have_expected_shape() {
        let id = SessionId::generate();
        let parts: Vec<&str> = id.as_str().split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "session");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), SESSION_SUFFIX_LEN);
        assert!(parts[2].bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = SessionId::new("session_1_abc");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"session_1_abc\"");
    }
}
