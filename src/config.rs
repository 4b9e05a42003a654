//! Capture configuration: selector set and timing knobs.
//!
//! The selectors naming the title element, the statement tab anchors, and
//! the active panel are page-specific class names with no stability
//! guarantee, so they are injectable configuration rather than hard-coded
//! literals. The defaults reproduce the statement application this crate
//! was written against.
//!
//! # Example
//!
//! ```ignore
//! use fincap::CaptureConfig;
//!
//! // Defaults
//! let config = CaptureConfig::new();
//!
//! // Or from a JSON file
//! let config = CaptureConfig::from_path("selectors.json")?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ============================================================================
// Constants
// ============================================================================

/// Default selector for the page-title element.
const DEFAULT_TITLE_SELECTOR: &str = ".v-main__wrap .container.container--fluid span";

/// Default selector for the statement tab anchors.
const DEFAULT_STATEMENT_TABS_SELECTOR: &str =
    "main .v-tabs.v-tabs--centered.theme--dark.tabs .v-slide-group__wrapper a.v-tab";

/// Default selector for the active panel's table.
const DEFAULT_ACTIVE_PANEL_SELECTOR: &str =
    ".v-responsive.tblcontainer.d-inline-block.active table";

/// Default panel readiness timeout in milliseconds.
const DEFAULT_PANEL_TIMEOUT_MS: u64 = 10_000;

/// Default readiness poll interval in milliseconds.
const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

// ============================================================================
// SelectorSet
// ============================================================================

/// The CSS selectors consumed from the host page.
///
/// All three are undocumented third-party class names; when the page's
/// markup changes, this is the struct to update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorSet {
    /// Element whose text names the company/ticker (report filename).
    #[serde(default = "SelectorSet::default_title")]
    pub title: String,

    /// Anchors that switch the visible statement panel, in page order.
    #[serde(default = "SelectorSet::default_statement_tabs")]
    pub statement_tabs: String,

    /// The currently visible statement table.
    #[serde(default = "SelectorSet::default_active_panel")]
    pub active_panel: String,
}

impl SelectorSet {
    fn default_title() -> String {
        DEFAULT_TITLE_SELECTOR.to_string()
    }

    fn default_statement_tabs() -> String {
        DEFAULT_STATEMENT_TABS_SELECTOR.to_string()
    }

    fn default_active_panel() -> String {
        DEFAULT_ACTIVE_PANEL_SELECTOR.to_string()
    }

    /// Validates that no selector is blank.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        for (name, selector) in [
            ("title", &self.title),
            ("statement_tabs", &self.statement_tabs),
            ("active_panel", &self.active_panel),
        ] {
            if selector.trim().is_empty() {
                return Err(Error::config(format!("selector '{name}' is blank")));
            }
        }
        Ok(())
    }
}

impl Default for SelectorSet {
    fn default() -> Self {
        Self {
            title: Self::default_title(),
            statement_tabs: Self::default_statement_tabs(),
            active_panel: Self::default_active_panel(),
        }
    }
}

// ============================================================================
// CaptureOptions
// ============================================================================

/// Timing knobs for panel readiness.
///
/// Replaces the fixed per-tab delay of naive captures with
/// "poll until ready or timeout".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureOptions {
    /// Maximum time to wait for a panel after a tab switch, in milliseconds.
    #[serde(default = "CaptureOptions::default_panel_timeout_ms")]
    pub panel_timeout_ms: u64,

    /// Readiness poll interval, in milliseconds.
    #[serde(default = "CaptureOptions::default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl CaptureOptions {
    const fn default_panel_timeout_ms() -> u64 {
        DEFAULT_PANEL_TIMEOUT_MS
    }

    const fn default_poll_interval_ms() -> u64 {
        DEFAULT_POLL_INTERVAL_MS
    }

    /// Creates options with default timing.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            panel_timeout_ms: DEFAULT_PANEL_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }

    /// Sets the panel readiness timeout.
    #[inline]
    #[must_use]
    pub const fn with_panel_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.panel_timeout_ms = timeout_ms;
        self
    }

    /// Sets the readiness poll interval.
    #[inline]
    #[must_use]
    pub const fn with_poll_interval_ms(mut self, interval_ms: u64) -> Self {
        self.poll_interval_ms = interval_ms;
        self
    }

    /// Returns the panel readiness timeout as a [`Duration`].
    #[inline]
    #[must_use]
    pub const fn panel_timeout(&self) -> Duration {
        Duration::from_millis(self.panel_timeout_ms)
    }

    /// Returns the poll interval as a [`Duration`].
    #[inline]
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Validates the timing configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for zero or inverted intervals.
    pub fn validate(&self) -> Result<()> {
        if self.panel_timeout_ms == 0 {
            return Err(Error::config("panel_timeout_ms must be greater than zero"));
        }
        if self.poll_interval_ms == 0 {
            return Err(Error::config("poll_interval_ms must be greater than zero"));
        }
        if self.poll_interval_ms > self.panel_timeout_ms {
            return Err(Error::config(format!(
                "poll_interval_ms ({}) exceeds panel_timeout_ms ({})",
                self.poll_interval_ms, self.panel_timeout_ms
            )));
        }
        Ok(())
    }
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CaptureConfig
// ============================================================================

/// Complete capture configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Host page selectors.
    #[serde(default)]
    pub selectors: SelectorSet,

    /// Readiness timing.
    #[serde(default)]
    pub options: CaptureOptions,
}

impl CaptureConfig {
    /// Creates a configuration with all defaults.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a configuration from a JSON file.
    ///
    /// Missing fields fall back to their defaults, so a file may override
    /// just one selector.
    ///
    /// # Errors
    ///
    /// - [`Error::Io`] if the file cannot be read
    /// - [`Error::Json`] if the contents are not valid JSON
    /// - [`Error::Config`] if a field fails validation
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates selectors and timing together.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for blank selectors or bad intervals.
    pub fn validate(&self) -> Result<()> {
        self.selectors.validate()?;
        self.options.validate()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_selectors() {
        let selectors = SelectorSet::default();
        assert!(selectors.title.contains("container--fluid"));
        assert!(selectors.statement_tabs.ends_with("a.v-tab"));
        assert!(selectors.active_panel.ends_with("table"));
        assert!(selectors.validate().is_ok());
    }

    #[test]
    fn test_blank_selector_rejected() {
        let selectors = SelectorSet {
            active_panel: "  ".to_string(),
            ..Default::default()
        };

        let err = selectors.validate().unwrap_err();
        assert!(err.to_string().contains("active_panel"));
    }

    #[test]
    fn test_default_options() {
        let options = CaptureOptions::new();
        assert_eq!(options.panel_timeout(), Duration::from_secs(10));
        assert_eq!(options.poll_interval(), Duration::from_millis(100));
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_options_builder_chain() {
        let options = CaptureOptions::new()
            .with_panel_timeout_ms(2_000)
            .with_poll_interval_ms(50);

        assert_eq!(options.panel_timeout_ms, 2_000);
        assert_eq!(options.poll_interval_ms, 50);
    }

    #[test]
    fn test_zero_intervals_rejected() {
        assert!(
            CaptureOptions::new()
                .with_panel_timeout_ms(0)
                .validate()
                .is_err()
        );
        assert!(
            CaptureOptions::new()
                .with_poll_interval_ms(0)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_inverted_intervals_rejected() {
        let options = CaptureOptions::new()
            .with_panel_timeout_ms(100)
            .with_poll_interval_ms(500);

        assert!(options.validate().is_err());
    }

    #[test]
    fn test_config_from_partial_json() {
        let json = r#"{"selectors": {"title": "h1.company-name"}}"#;
        let config: CaptureConfig = serde_json::from_str(json).expect("parse");

        // Overridden field
        assert_eq!(config.selectors.title, "h1.company-name");
        // Everything else defaulted
        assert_eq!(config.selectors.active_panel, DEFAULT_ACTIVE_PANEL_SELECTOR);
        assert_eq!(config.options, CaptureOptions::new());
    }

    #[test]
    fn test_config_round_trip() {
        let config = CaptureConfig::new();
        let json = serde_json::to_string(&config).expect("serialize");
        let back: CaptureConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(config, back);
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = CaptureConfig::from_path("/nonexistent/selectors.json");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
