//! Session domain model.
//!
//! Contains the shared "who is the current user" state that every surface of
//! the client reads to gate UI and attach credentials.

use serde::{Deserialize, Serialize};

/// Display name shown before a profile has been resolved.
pub const DEFAULT_DISPLAY_NAME: &str = "Citizen";

/// The authenticated user's identity as known to this client.
///
/// There is exactly one logical instance of this state per process, owned by
/// the session service. It starts logged out, is populated by a successful
/// profile fetch, and is reset to defaults on logout or on an irrecoverable
/// credential refresh failure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Userinfo {
    /// True once a valid access credential has been confirmed against the API.
    pub is_logged_in: bool,
    /// Resolved display name; `DEFAULT_DISPLAY_NAME` until known.
    pub display_name: String,
    /// Raw profile payload from the API. `None` when logged out. The client
    /// never interprets this beyond the display name.
    pub profile: Option<serde_json::Value>,
}

impl Default for Userinfo {
    fn default() -> Self {
        Self {
            is_logged_in: false,
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            profile: None,
        }
    }
}

impl Userinfo {
    /// Returns the logged-out default state.
    pub fn logged_out() -> Self {
        Self::default()
    }

    /// Builds the logged-in state from a profile payload.
    ///
    /// The display name is taken from the payload's `nick` field, falling
    /// back to the placeholder when the field is missing or not a string.
    pub fn from_profile(profile: serde_json::Value) -> Self {
        let display_name = profile
            .get("nick")
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_DISPLAY_NAME)
            .to_string();
        Self {
            is_logged_in: true,
            display_name,
            profile: Some(profile),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_is_logged_out() {
        let info = Userinfo::default();
        assert!(!info.is_logged_in);
        assert_eq!(info.display_name, DEFAULT_DISPLAY_NAME);
        assert!(info.profile.is_none());
    }

    #[test]
    fn test_from_profile_reads_nick() {
        let info = Userinfo::from_profile(json!({ "nick": "alice", "id": 42 }));
        assert!(info.is_logged_in);
        assert_eq!(info.display_name, "alice");
        assert!(info.profile.is_some());
    }

    #[test]
    fn test_from_profile_without_nick_keeps_placeholder() {
        let info = Userinfo::from_profile(json!({ "id": 42 }));
        assert!(info.is_logged_in);
        assert_eq!(info.display_name, DEFAULT_DISPLAY_NAME);
    }
}
