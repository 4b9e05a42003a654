//! WebSocket transport layer.
//!
//! This module handles communication between local end (Rust) and
//! remote end (page bridge) via WebSocket.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐                              ┌─────────────────┐
//! │  fincap (Rust)  │                              │  Page bridge    │
//! │                 │         WebSocket            │  (in-page)      │
//! │  PendingServer  │◄────────────────────────────►│                 │
//! │  → Connection   │      localhost:PORT          │  WebSocket      │
//! │                 │                              │  Client         │
//! └─────────────────┘                              └─────────────────┘
//! ```
//!
//! # Connection Lifecycle
//!
//! 1. `PendingServer::bind` - Bind to localhost with random port
//! 2. Point the page bridge at the WebSocket URL
//! 3. `PendingServer::accept` - Wait for the bridge to connect
//! 4. `Connection` - Send commands, receive responses
//! 5. `Connection::shutdown` - Close connection when the session ends
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `connection` | WebSocket connection and event loop |
//! | `server` | WebSocket server binding and acceptance |

// ============================================================================
// Submodules
// ============================================================================

/// WebSocket connection and event loop.
pub mod connection;

/// WebSocket server for bridge communication.
pub mod server;

// ============================================================================
// Re-exports
// ============================================================================

pub use connection::{Connection, ReadyData};
pub use server::PendingServer;
