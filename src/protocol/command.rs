//! Command definitions organized by module.
//!
//! Commands follow `module.methodName` format. The capture flow only needs
//! two modules: `page` for document-level reads and `element` for DOM
//! queries and interaction.
//!
//! # Command Modules
//!
//! | Module | Commands |
//! |--------|----------|
//! | `page` | Document title |
//! | `element` | Find, properties, methods |

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::identifiers::ElementId;

// ============================================================================
// Command Wrapper
// ============================================================================

/// All protocol commands organized by module.
///
/// This enum wraps module-specific command enums for unified serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Command {
    /// Page module commands.
    Page(PageCommand),
    /// Element module commands.
    Element(ElementCommand),
}

// ============================================================================
// Page Commands
// ============================================================================

/// Page module commands for document-level reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum PageCommand {
    /// Get the document title.
    #[serde(rename = "page.getTitle")]
    GetTitle,
}

// ============================================================================
// Element Commands
// ============================================================================

/// Element module commands for DOM interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum ElementCommand {
    /// Find single element by CSS selector.
    #[serde(rename = "element.find")]
    Find {
        /// CSS selector.
        selector: String,
        /// Parent element ID (optional).
        #[serde(rename = "parentId", skip_serializing_if = "Option::is_none")]
        parent_id: Option<ElementId>,
    },

    /// Find all elements by CSS selector.
    #[serde(rename = "element.findAll")]
    FindAll {
        /// CSS selector.
        selector: String,
        /// Parent element ID (optional).
        #[serde(rename = "parentId", skip_serializing_if = "Option::is_none")]
        parent_id: Option<ElementId>,
    },

    /// Get property via `element[name]`.
    #[serde(rename = "element.getProperty")]
    GetProperty {
        /// Element ID.
        #[serde(rename = "elementId")]
        element_id: ElementId,
        /// Property name.
        name: String,
    },

    /// Call method via `element[name](...args)`.
    #[serde(rename = "element.callMethod")]
    CallMethod {
        /// Element ID.
        #[serde(rename = "elementId")]
        element_id: ElementId,
        /// Method name.
        name: String,
        /// Method arguments.
        #[serde(default)]
        args: Vec<Value>,
    },
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_get_title_serialization() {
        let command = Command::Page(PageCommand::GetTitle);
        let json = serde_json::to_string(&command).expect("serialize");

        assert!(json.contains("page.getTitle"));
    }

    #[test]
    fn test_element_find_serialization() {
        let command = Command::Element(ElementCommand::Find {
            selector: "a.v-tab".to_string(),
            parent_id: None,
        });
        let json = serde_json::to_string(&command).expect("serialize");

        assert!(json.contains("element.find"));
        assert!(json.contains("a.v-tab"));
        // parentId is omitted when absent.
        assert!(!json.contains("parentId"));
    }

    #[test]
    fn test_element_find_with_parent() {
        let command = Command::Element(ElementCommand::Find {
            selector: "table".to_string(),
            parent_id: Some(ElementId::new("parent-uuid")),
        });
        let json = serde_json::to_string(&command).expect("serialize");

        assert!(json.contains("parentId"));
        assert!(json.contains("parent-uuid"));
    }

    #[test]
    fn test_get_property_serialization() {
        let command = Command::Element(ElementCommand::GetProperty {
            element_id: ElementId::new("abc"),
            name: "outerHTML".to_string(),
        });
        let json = serde_json::to_string(&command).expect("serialize");

        assert!(json.contains("element.getProperty"));
        assert!(json.contains("elementId"));
        assert!(json.contains("outerHTML"));
    }

    #[test]
    fn test_call_method_serialization() {
        let command = Command::Element(ElementCommand::CallMethod {
            element_id: ElementId::new("abc"),
            name: "click".to_string(),
            args: vec![],
        });
        let json = serde_json::to_string(&command).expect("serialize");

        assert!(json.contains("element.callMethod"));
        assert!(json.contains("click"));
    }

    #[test]
    fn test_command_round_trip() {
        let command = Command::Element(ElementCommand::FindAll {
            selector: ".active table".to_string(),
            parent_id: None,
        });

        let json = serde_json::to_string(&command).expect("serialize");
        let back: Command = serde_json::from_str(&json).expect("deserialize");

        match back {
            Command::Element(ElementCommand::FindAll { selector, .. }) => {
                assert_eq!(selector, ".active table");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
