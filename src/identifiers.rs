//! Type-safe identifiers for capture sessions.
//!
//! Newtype wrappers prevent mixing incompatible IDs at compile time:
//! a [`TabId`] cannot be passed where an [`ElementId`] is expected.
//!
//! # ID Sources
//!
//! | Type | Generated by |
//! |------|--------------|
//! | [`RequestId`] | Local end (UUID v4 per request) |
//! | [`SessionId`] | Remote end (READY handshake) |
//! | [`TabId`] | Remote end (READY handshake) |
//! | [`ElementId`] | Remote end (per resolved element) |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// RequestId
// ============================================================================

/// Unique identifier for request/response correlation.
///
/// Each command carries a freshly generated UUID; the remote end echoes it
/// back in the response. The nil UUID is reserved for the READY handshake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Generates a new random request ID.
    #[inline]
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the reserved READY handshake ID (nil UUID).
    ///
    /// The remote end sends its READY message with this ID so the local end
    /// can correlate it before any request has been issued.
    #[inline]
    #[must_use]
    pub const fn ready() -> Self {
        Self(Uuid::nil())
    }

    /// Returns `true` if this is the READY handshake ID.
    #[inline]
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.0.is_nil()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// SessionId
// ============================================================================

/// Identifier of a bridge session, assigned by the remote end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(NonZeroU32);

impl SessionId {
    /// Creates a session ID. Returns `None` for zero.
    #[inline]
    #[must_use]
    pub const fn new(id: u32) -> Option<Self> {
        match NonZeroU32::new(id) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }

    /// Returns the raw numeric value.
    #[inline]
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// TabId
// ============================================================================

/// Identifier of the browser tab the bridge is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(NonZeroU32);

impl TabId {
    /// Creates a tab ID. Returns `None` for zero.
    #[inline]
    #[must_use]
    pub const fn new(id: u32) -> Option<Self> {
        match NonZeroU32::new(id) {
            Some(id) => Some(Self(id)),
            None => None,
        }
    }

    /// Returns the raw numeric value.
    #[inline]
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// ElementId
// ============================================================================

/// Reference to a DOM element held by the remote end.
///
/// The bridge stores resolved elements in an internal map keyed by UUID
/// string; the local end only ever sees the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Creates an element ID from the remote end's key.
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_unique() {
        let a = RequestId::generate();
        let b = RequestId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn test_request_id_ready_is_nil() {
        let ready = RequestId::ready();
        assert!(ready.is_ready());
        assert!(!RequestId::generate().is_ready());
    }

    #[test]
    fn test_request_id_serde_transparent() {
        let id = RequestId::generate();
        let json = serde_json::to_string(&id).expect("serialize");
        // Serializes as a bare UUID string, not an object.
        assert!(json.starts_with('"') && json.ends_with('"'));

        let back: RequestId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(id, back);
    }

    #[test]
    fn test_session_id_rejects_zero() {
        assert!(SessionId::new(0).is_none());
        assert_eq!(SessionId::new(7).expect("valid session id").get(), 7);
    }

    #[test]
    fn test_tab_id_rejects_zero() {
        assert!(TabId::new(0).is_none());
        assert_eq!(TabId::new(1).expect("valid tab id").get(), 1);
    }

    #[test]
    fn test_element_id_round_trip() {
        let id = ElementId::new("550e8400-e29b-41d4-a716-446655440000");
        assert_eq!(id.as_str(), "550e8400-e29b-41d4-a716-446655440000");

        let json = serde_json::to_string(&id).expect("serialize");
        let back: ElementId = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(id, back);
    }

    #[test]
    fn test_display_formats() {
        let tab = TabId::new(3).expect("valid tab id");
        assert_eq!(tab.to_string(), "3");

        let element = ElementId::new("abc");
        assert_eq!(element.to_string(), "abc");
    }
}
