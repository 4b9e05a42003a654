//! DOM element interaction and markup extraction.
//!
//! Elements are identified by UUID and stored in the bridge's internal
//! `Map<UUID, Element>`; the local end only holds the key.
//!
//! # Example
//!
//! ```ignore
//! let tab = page.find_element("a.v-tab").await?;
//! tab.click().await?;
//!
//! let panel = page.find_element(".active table").await?;
//! let markup = panel.outer_html().await?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::identifiers::ElementId;
use crate::protocol::{Command, ElementCommand, Response};

use super::Page;

// ============================================================================
// Constants
// ============================================================================

/// Error code the bridge reports for references the page re-rendered away.
const STALE_ELEMENT_CODE: &str = "stale element";

// ============================================================================
// Element
// ============================================================================

/// A handle to a DOM element on the statements page.
///
/// Operations use generic dynamic property access (`element[name]`) on the
/// remote end, so one pair of commands covers markup reads, text reads,
/// and method calls.
#[derive(Clone)]
pub struct Element {
    /// This element's remote-side ID.
    id: ElementId,
    /// Page the element belongs to.
    page: Page,
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.id)
            .field("tab_id", &self.page.tab_id())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Element - Constructor / Accessors
// ============================================================================

impl Element {
    /// Creates a new element handle.
    pub(crate) fn new(id: ElementId, page: Page) -> Self {
        Self { id, page }
    }

    /// Returns this element's ID.
    #[inline]
    #[must_use]
    pub fn id(&self) -> &ElementId {
        &self.id
    }
}

// ============================================================================
// Element - Actions
// ============================================================================

impl Element {
    /// Clicks the element.
    ///
    /// Uses `element.click()` internally.
    pub async fn click(&self) -> Result<()> {
        debug!(element_id = %self.id, "Clicking element");
        self.call_method("click", vec![]).await?;
        Ok(())
    }
}

// ============================================================================
// Element - Properties
// ============================================================================

impl Element {
    /// Gets the element's rendered markup (`outerHTML`).
    pub async fn outer_html(&self) -> Result<String> {
        let value = self.get_property("outerHTML").await?;
        Ok(value.as_str().unwrap_or("").to_string())
    }

    /// Gets the element's visible text (`innerText`), trimmed.
    pub async fn inner_text(&self) -> Result<String> {
        let value = self.get_property("innerText").await?;
        Ok(value.as_str().unwrap_or("").trim().to_string())
    }

    /// Gets a property value via `element[name]`.
    ///
    /// # Arguments
    ///
    /// * `name` - Property name (e.g., "outerHTML", "innerText")
    pub async fn get_property(&self, name: &str) -> Result<Value> {
        let command = Command::Element(ElementCommand::GetProperty {
            element_id: self.id.clone(),
            name: name.to_string(),
        });

        let response = self.send_command(command).await?;

        Ok(response
            .result
            .and_then(|v| v.get("value").cloned())
            .unwrap_or(Value::Null))
    }

    /// Calls a method via `element[name](...args)`.
    ///
    /// # Arguments
    ///
    /// * `name` - Method name
    /// * `args` - Method arguments
    pub async fn call_method(&self, name: &str, args: Vec<Value>) -> Result<Value> {
        let command = Command::Element(ElementCommand::CallMethod {
            element_id: self.id.clone(),
            name: name.to_string(),
            args,
        });

        let response = self.send_command(command).await?;

        Ok(response
            .result
            .and_then(|v| v.get("value").cloned())
            .unwrap_or(Value::Null))
    }
}

// ============================================================================
// Element - Nested Search
// ============================================================================

impl Element {
    /// Finds a child element by CSS selector.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let panel = page.find_element(".active").await?;
    /// let table = panel.find_element("table").await?;
    /// ```
    pub async fn find_element(&self, selector: &str) -> Result<Element> {
        let command = Command::Element(ElementCommand::Find {
            selector: selector.to_string(),
            parent_id: Some(self.id.clone()),
        });

        let response = self.send_command(command).await?;

        let element_id = response
            .result
            .as_ref()
            .and_then(|v| v.get("elementId"))
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::element_not_found(selector, self.page.tab_id()))?;

        Ok(Element::new(ElementId::new(element_id), self.page.clone()))
    }
}

// ============================================================================
// Element - Internal
// ============================================================================

impl Element {
    /// Sends a command, mapping bridge-reported failures to crate errors.
    async fn send_command(&self, command: Command) -> Result<Response> {
        let response = self.page.send_command(command).await?;

        if response.error_code() == Some(STALE_ELEMENT_CODE) {
            return Err(Error::stale_element(self.id.clone()));
        }

        if response.is_error() {
            let message = response
                .message
                .or(response.error)
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(Error::protocol(message));
        }

        Ok(response)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::Element;

    #[test]
    fn test_element_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<Element>();
    }

    #[test]
    fn test_element_is_debug() {
        fn assert_debug<T: std::fmt::Debug>() {}
        assert_debug::<Element>();
    }
}
