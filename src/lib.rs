//! fincap - Financial statement table capture.
//!
//! This library drives an already-loaded financial-statements page through
//! its four report tabs (income, balance sheet, cash flow, ratios),
//! snapshots each active panel's markup, and writes the concatenated
//! document to `<company>.html`.
//!
//! # Architecture
//!
//! The library follows a client-server model:
//!
//! - **Local End (Rust)**: Sends commands, receives responses via WebSocket
//! - **Remote End (page bridge)**: Executes commands in the loaded page
//!
//! Key design principles:
//!
//! - One [`Session`] owns: WebSocket connection + event loop
//! - Protocol uses `module.methodName` format (BiDi-inspired)
//! - Elements stored by reference in the bridge's internal `Map`
//! - Capture runs against the [`PageDriver`] trait, so it is testable
//!   against a simulated page double
//! - Host-page selectors are injectable configuration, never hard-coded
//!
//! # Quick Start
//!
//! ```no_run
//! use fincap::{Bridge, CaptureConfig, CaptureSession, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     // Bind and wait for the page bridge to connect
//!     let bridge = Bridge::bind(0).await?;
//!     println!("bridge URL: {}", bridge.ws_url());
//!     let session = bridge.accept().await?;
//!
//!     // Capture the four statements and save the report
//!     let page = session.page();
//!     let report = CaptureSession::new(&page, CaptureConfig::new())
//!         .run()
//!         .await?;
//!     let path = report.save("reports")?;
//!     println!("saved: {}", path.display());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`bridge`] | Bridge server and [`Session`] lifecycle |
//! | [`capture`] | The statement capture sequence and report |
//! | [`config`] | Injectable selectors and timing |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`page`] | Page entities: [`Page`], [`Element`], [`PageDriver`] |
//! | [`protocol`] | WebSocket message types (internal) |
//! | [`transport`] | WebSocket transport layer (internal) |

// ============================================================================
// Modules
// ============================================================================

/// Bridge server and page session lifecycle.
///
/// Use [`Bridge::bind`] then [`Bridge::accept`] to establish a [`Session`].
pub mod bridge;

/// The statement capture sequence.
///
/// [`CaptureSession::run`] produces a [`StatementReport`].
pub mod capture;

/// Capture configuration: selector set and timing knobs.
pub mod config;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Type-safe identifiers for capture sessions.
///
/// Newtype wrappers prevent mixing incompatible IDs at compile time.
pub mod identifiers;

/// Page entities: [`Page`], [`Element`], and the [`PageDriver`] seam.
pub mod page;

/// WebSocket protocol message types.
///
/// Internal module defining command/response structures.
pub mod protocol;

/// WebSocket transport layer.
///
/// Internal module handling the WebSocket server and connection.
pub mod transport;

// ============================================================================
// Re-exports
// ============================================================================

// Bridge types
pub use bridge::{Bridge, Session};

// Capture types
pub use capture::{CaptureSession, Statement, StatementReport};

// Configuration types
pub use config::{CaptureConfig, CaptureOptions, SelectorSet};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{ElementId, RequestId, SessionId, TabId};

// Page types
pub use page::{Element, Page, PageDriver};
