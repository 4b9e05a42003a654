//! Bridge server and page session lifecycle.
//!
//! The statements page is already loaded in the user's browser; a small
//! bridge extension inside it connects outward to this crate. [`Bridge`]
//! owns the bound-but-unconnected state, [`Session`] the established one.
//!
//! # Example
//!
//! ```no_run
//! use fincap::{Bridge, Result};
//!
//! # async fn example() -> Result<()> {
//! let bridge = Bridge::bind(0).await?;
//! println!("point the page bridge at {}", bridge.ws_url());
//!
//! let session = bridge.accept().await?;
//! let page = session.page();
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

use tracing::{debug, info};
use url::Url;

use crate::error::{Error, Result};
use crate::identifiers::{SessionId, TabId};
use crate::page::Page;
use crate::transport::{Connection, PendingServer, ReadyData};

// ============================================================================
// Bridge
// ============================================================================

/// A bound WebSocket server waiting for the page bridge to connect.
///
/// Consumed by [`accept`](Self::accept), which yields the established
/// [`Session`].
pub struct Bridge {
    /// Bound, not-yet-connected server.
    server: PendingServer,
}

impl fmt::Debug for Bridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bridge")
            .field("port", &self.server.port())
            .finish_non_exhaustive()
    }
}

impl Bridge {
    /// Binds the bridge server on localhost.
    ///
    /// Use port 0 to let the OS assign a random available port.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if binding fails.
    pub async fn bind(port: u16) -> Result<Self> {
        let server = PendingServer::bind(IpAddr::V4(Ipv4Addr::LOCALHOST), port).await?;
        debug!(port = server.port(), "Bridge bound");
        Ok(Self { server })
    }

    /// Returns the port the bridge is bound to.
    #[inline]
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.server.port()
    }

    /// Returns the WebSocket URL the page bridge must connect to.
    #[inline]
    #[must_use]
    pub fn ws_url(&self) -> String {
        self.server.ws_url()
    }

    /// Waits for the page bridge to connect and complete its handshake.
    ///
    /// # Errors
    ///
    /// - [`Error::ConnectionTimeout`] if nothing connects within 30s
    /// - [`Error::Connection`] if the WebSocket upgrade fails
    /// - [`Error::Protocol`] if the READY handshake is malformed
    pub async fn accept(self) -> Result<Session> {
        let (connection, ready) = self.server.accept().await?;

        info!(
            session_id = %ready.session_id,
            tab_id = %ready.tab_id,
            url = %ready.url,
            "Page session established"
        );

        Ok(Session {
            inner: Arc::new(SessionInner { connection, ready }),
        })
    }
}

// ============================================================================
// Session
// ============================================================================

/// Internal shared state for a session.
struct SessionInner {
    /// Bridge connection.
    connection: Connection,
    /// READY handshake data.
    ready: ReadyData,
}

/// An established session with the statements page.
///
/// The session owns the connection; [`Page`] handles borrow it. Closing the
/// session shuts the event loop down and fails outstanding requests.
#[derive(Clone)]
pub struct Session {
    /// Shared inner state.
    inner: Arc<SessionInner>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("session_id", &self.inner.ready.session_id)
            .field("tab_id", &self.inner.ready.tab_id)
            .field("url", &self.inner.ready.url)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Returns the session ID.
    #[inline]
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.inner.ready.session_id
    }

    /// Returns the tab the bridge is attached to.
    #[inline]
    #[must_use]
    pub fn tab_id(&self) -> TabId {
        self.inner.ready.tab_id
    }

    /// Returns the page URL reported in the READY handshake.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Protocol`] if the bridge reported an invalid URL.
    pub fn page_url(&self) -> Result<Url> {
        Url::parse(&self.inner.ready.url)
            .map_err(|e| Error::protocol(format!("invalid page URL in READY: {e}")))
    }

    /// Returns a page handle for this session.
    #[must_use]
    pub fn page(&self) -> Page {
        Page::new(
            self.inner.ready.tab_id,
            self.inner.ready.session_id,
            self.inner.connection.clone(),
        )
    }

    /// Closes the session.
    ///
    /// Outstanding requests fail with [`Error::ConnectionClosed`].
    pub fn close(&self) {
        debug!(session_id = %self.inner.ready.session_id, "Closing session");
        self.inner.connection.shutdown();
    }
}

// ============================================================================
// Tests
// ============================================================================
