//! Error types for statement capture.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use fincap::{Result, Error};
//!
//! async fn example(page: &Page) -> Result<()> {
//!     let tabs = page.find_elements("a.v-tab").await?;
//!     tabs[0].click().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`] |
//! | Connection | [`Error::Connection`], [`Error::ConnectionTimeout`], [`Error::ConnectionClosed`] |
//! | Protocol | [`Error::Protocol`] |
//! | Element | [`Error::ElementNotFound`], [`Error::StaleElement`] |
//! | Capture | [`Error::EmptyTitle`], [`Error::TabCountMismatch`], [`Error::PanelNotReady`] |
//! | Execution | [`Error::RequestTimeout`] |
//! | External | [`Error::Io`], [`Error::Json`], [`Error::WebSocket`] |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;
use tokio::sync::oneshot::error::RecvError;
use tokio_tungstenite::tungstenite::Error as WsError;

use crate::identifiers::{ElementId, RequestId, TabId};

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when capture configuration is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Connection Errors
    // ========================================================================
    /// WebSocket connection failed.
    ///
    /// Returned when the bridge connection cannot be established.
    #[error("Connection failed: {message}")]
    Connection {
        /// Description of the connection error.
        message: String,
    },

    /// Connection timeout waiting for the page bridge.
    ///
    /// Returned when the bridge does not connect within the timeout period.
    #[error("Connection timeout after {timeout_ms}ms")]
    ConnectionTimeout {
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    /// WebSocket connection closed unexpectedly.
    ///
    /// Returned when the connection is lost during operation.
    #[error("Connection closed")]
    ConnectionClosed,

    // ========================================================================
    // Protocol Errors
    // ========================================================================
    /// Protocol violation or unexpected response.
    ///
    /// Returned when a protocol message is malformed or the remote end
    /// reports a failure this crate has no dedicated variant for.
    #[error("Protocol error: {message}")]
    Protocol {
        /// Description of the protocol violation.
        message: String,
    },

    // ========================================================================
    // Element Errors
    // ========================================================================
    /// Element not found by selector.
    ///
    /// Returned when a CSS selector matches no elements.
    #[error("Element not found: selector={selector}, tab={tab_id}")]
    ElementNotFound {
        /// CSS selector used.
        selector: String,
        /// Tab where the search was performed.
        tab_id: TabId,
    },

    /// Element is stale (no longer in the DOM).
    ///
    /// Returned when an element reference is no longer valid, typically
    /// after the page re-rendered the subtree holding it.
    #[error("Stale element: {element_id}")]
    StaleElement {
        /// The stale element's ID.
        element_id: ElementId,
    },

    // ========================================================================
    // Capture Errors
    // ========================================================================
    /// The page title element yielded no text.
    ///
    /// The report filename is derived from this text, so a blank title
    /// aborts the capture before any tab is touched.
    #[error("Empty page title: selector={selector}")]
    EmptyTitle {
        /// CSS selector used for the title element.
        selector: String,
    },

    /// The page exposes fewer statement tabs than statements to capture.
    #[error("Expected {expected} statement tabs, found {found}")]
    TabCountMismatch {
        /// Number of statements to capture.
        expected: usize,
        /// Number of tab anchors matched.
        found: usize,
    },

    /// The active statement panel never became ready.
    ///
    /// Returned when, after a tab switch, the panel selector has no
    /// non-blank match within the readiness timeout.
    #[error("Panel not ready for {statement} after {timeout_ms}ms")]
    PanelNotReady {
        /// Display name of the statement being captured.
        statement: String,
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    // ========================================================================
    // Execution Errors
    // ========================================================================
    /// Command request timeout.
    ///
    /// Returned when a WebSocket request times out.
    #[error("Request {request_id} timed out after {timeout_ms}ms")]
    RequestTimeout {
        /// The request ID that timed out.
        request_id: RequestId,
        /// Milliseconds waited before timeout.
        timeout_ms: u64,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// WebSocket error.
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] WsError),

    /// Channel receive error.
    #[error("Channel closed")]
    ChannelClosed(#[from] RecvError),
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[inline]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a connection timeout error.
    #[inline]
    pub fn connection_timeout(timeout_ms: u64) -> Self {
        Self::ConnectionTimeout { timeout_ms }
    }

    /// Creates a protocol error.
    #[inline]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates an element not found error.
    #[inline]
    pub fn element_not_found(selector: impl Into<String>, tab_id: TabId) -> Self {
        Self::ElementNotFound {
            selector: selector.into(),
            tab_id,
        }
    }

    /// Creates a stale element error.
    #[inline]
    pub fn stale_element(element_id: ElementId) -> Self {
        Self::StaleElement { element_id }
    }

    /// Creates an empty title error.
    #[inline]
    pub fn empty_title(selector: impl Into<String>) -> Self {
        Self::EmptyTitle {
            selector: selector.into(),
        }
    }

    /// Creates a tab count mismatch error.
    #[inline]
    pub fn tab_count_mismatch(expected: usize, found: usize) -> Self {
        Self::TabCountMismatch { expected, found }
    }

    /// Creates a panel not ready error.
    #[inline]
    pub fn panel_not_ready(statement: impl Into<String>, timeout_ms: u64) -> Self {
        Self::PanelNotReady {
            statement: statement.into(),
            timeout_ms,
        }
    }

    /// Creates a request timeout error.
    #[inline]
    pub fn request_timeout(request_id: RequestId, timeout_ms: u64) -> Self {
        Self::RequestTimeout {
            request_id,
            timeout_ms,
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a timeout error.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::ConnectionTimeout { .. }
                | Self::RequestTimeout { .. }
                | Self::PanelNotReady { .. }
        )
    }

    /// Returns `true` if this is an element error.
    #[inline]
    #[must_use]
    pub fn is_element_error(&self) -> bool {
        matches!(
            self,
            Self::ElementNotFound { .. } | Self::StaleElement { .. }
        )
    }

    /// Returns `true` if this is a connection error.
    #[inline]
    #[must_use]
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::Connection { .. }
                | Self::ConnectionTimeout { .. }
                | Self::ConnectionClosed
                | Self::WebSocket(_)
        )
    }

    /// Returns `true` if this error is recoverable.
    ///
    /// Recoverable errors may succeed on retry.
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionTimeout { .. }
                | Self::RequestTimeout { .. }
                | Self::PanelNotReady { .. }
                | Self::StaleElement { .. }
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
