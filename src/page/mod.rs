//! Page entities: [`Page`], [`Element`], and the [`PageDriver`] seam.
//!
//! A [`Page`] is a handle to the statements page driven through the bridge
//! connection. The capture engine does not use [`Page`] directly; it is
//! written against the [`PageDriver`] trait so it can run against a
//! simulated DOM double in tests.
//!
//! # Example
//!
//! ```ignore
//! let page = session.page();
//!
//! let tabs = page.find_elements("a.v-tab").await?;
//! tabs[0].click().await?;
//!
//! let panel = page.find_element(".active table").await?;
//! let markup = panel.outer_html().await?;
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// DOM element interaction.
pub mod element;

pub use element::Element;

// ============================================================================
// Imports
// ============================================================================

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::error::{Error, Result};
use crate::identifiers::{ElementId, SessionId, TabId};
use crate::protocol::{Command, ElementCommand, PageCommand, Request, Response};
use crate::transport::Connection;

// ============================================================================
// PageDriver
// ============================================================================

/// DOM capabilities the capture sequence needs from a page.
///
/// The live implementation is [`Page`]; tests substitute a scripted double.
/// Element references are opaque [`ElementId`]s so a double does not need to
/// model handles, only behavior.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Returns the trimmed text content of the first match for `selector`.
    async fn element_text(&self, selector: &str) -> Result<String>;

    /// Returns the first element matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ElementNotFound`] if nothing matches.
    async fn find_element(&self, selector: &str) -> Result<ElementId>;

    /// Returns all elements matching `selector`, in document order.
    async fn find_elements(&self, selector: &str) -> Result<Vec<ElementId>>;

    /// Clicks an element.
    async fn click(&self, element: &ElementId) -> Result<()>;

    /// Returns an element's `outerHTML`.
    async fn outer_html(&self, element: &ElementId) -> Result<String>;
}

// ============================================================================
// Types
// ============================================================================

/// Internal shared state for a page.
pub(crate) struct PageInner {
    /// Tab the bridge is attached to.
    pub tab_id: TabId,
    /// Session ID.
    pub session_id: SessionId,
    /// Bridge connection.
    pub connection: Connection,
}

// ============================================================================
// Page
// ============================================================================

/// A handle to the statements page driven through the bridge.
///
/// Pages provide document-level reads and element search; element-level
/// interaction goes through the [`Element`] handles a search returns.
#[derive(Clone)]
pub struct Page {
    pub(crate) inner: Arc<PageInner>,
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("tab_id", &self.inner.tab_id)
            .field("session_id", &self.inner.session_id)
            .finish_non_exhaustive()
    }
}

impl Page {
    /// Creates a new page handle.
    pub(crate) fn new(tab_id: TabId, session_id: SessionId, connection: Connection) -> Self {
        Self {
            inner: Arc::new(PageInner {
                tab_id,
                session_id,
                connection,
            }),
        }
    }
}

// ============================================================================
// Page - Accessors
// ============================================================================

impl Page {
    /// Returns the tab ID.
    #[inline]
    #[must_use]
    pub fn tab_id(&self) -> TabId {
        self.inner.tab_id
    }

    /// Returns the session ID.
    #[inline]
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.inner.session_id
    }
}

// ============================================================================
// Page - Document Reads
// ============================================================================

impl Page {
    /// Gets the document title.
    pub async fn document_title(&self) -> Result<String> {
        let response = self.send_command(Command::Page(PageCommand::GetTitle)).await?;
        Ok(response.get_string("title"))
    }
}

// ============================================================================
// Page - Element Search
// ============================================================================

impl Page {
    /// Finds a single element by CSS selector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ElementNotFound`] if no matching element exists.
    pub async fn find_element(&self, selector: &str) -> Result<Element> {
        let command = Command::Element(ElementCommand::Find {
            selector: selector.to_string(),
            parent_id: None,
        });

        let response = self.send_command(command).await?;

        let element_id = response
            .result
            .as_ref()
            .and_then(|v| v.get("elementId"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::element_not_found(selector, self.inner.tab_id))?;

        Ok(Element::new(ElementId::new(element_id), self.clone()))
    }

    /// Finds all elements matching a CSS selector.
    pub async fn find_elements(&self, selector: &str) -> Result<Vec<Element>> {
        let command = Command::Element(ElementCommand::FindAll {
            selector: selector.to_string(),
            parent_id: None,
        });

        let response = self.send_command(command).await?;

        let elements = response
            .result
            .as_ref()
            .and_then(|v| v.get("elementIds"))
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| v.as_str())
                    .map(|id| Element::new(ElementId::new(id), self.clone()))
                    .collect()
            })
            .unwrap_or_default();

        Ok(elements)
    }
}

// ============================================================================
// Page - Internal
// ============================================================================

impl Page {
    /// Sends a command and returns the response.
    pub(crate) async fn send_command(&self, command: Command) -> Result<Response> {
        debug!(tab_id = %self.inner.tab_id, ?command, "Sending command");

        let request = Request::new(self.inner.tab_id, command);
        self.inner.connection.send(request).await
    }
}

// ============================================================================
// Page - PageDriver
// ============================================================================

#[async_trait]
impl PageDriver for Page {
    async fn element_text(&self, selector: &str) -> Result<String> {
        let element = Page::find_element(self, selector).await?;
        element.inner_text().await
    }

    async fn find_element(&self, selector: &str) -> Result<ElementId> {
        let element = Page::find_element(self, selector).await?;
        Ok(element.id().clone())
    }

    async fn find_elements(&self, selector: &str) -> Result<Vec<ElementId>> {
        let elements = Page::find_elements(self, selector).await?;
        Ok(elements.into_iter().map(|e| e.id().clone()).collect())
    }

    async fn click(&self, element: &ElementId) -> Result<()> {
        Element::new(element.clone(), self.clone()).click().await
    }

    async fn outer_html(&self, element: &ElementId) -> Result<String> {
        Element::new(element.clone(), self.clone()).outer_html().await
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::Page;

    #[test]
    fn test_page_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<Page>();
    }

    #[test]
    fn test_page_is_debug() {
        fn assert_debug<T: std::fmt::Debug>() {}
        assert_debug::<Page>();
    }
}
