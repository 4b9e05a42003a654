//! The statement capture sequence.
//!
//! Drives the loaded statements page through its four report tabs and
//! snapshots each active panel's markup:
//!
//! 1. read the company title (the report filename),
//! 2. resolve the statement tab anchors,
//! 3. per statement: click its tab, await panel readiness, extract
//!    `outerHTML`,
//! 4. assemble the [`StatementReport`].
//!
//! The sequence is written against [`PageDriver`], so tests run it against
//! a scripted page double instead of a live browser.
//!
//! # Example
//!
//! ```ignore
//! use fincap::{CaptureConfig, CaptureSession};
//!
//! let session = CaptureSession::new(&page, CaptureConfig::new());
//! let report = session.run().await?;
//! let path = report.save("out")?;
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Report assembly and file output.
pub mod report;

pub use report::StatementReport;

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::time::{Instant, sleep};
use tracing::{debug, info, warn};

use crate::config::CaptureConfig;
use crate::error::{Error, Result};
use crate::page::PageDriver;

// ============================================================================
// Statement
// ============================================================================

/// The four report panels, in capture order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Statement {
    /// Income statement.
    Income,
    /// Balance sheet.
    BalanceSheet,
    /// Cash flow statement.
    CashFlow,
    /// Ratios.
    Ratios,
}

impl Statement {
    /// All statements in the fixed capture order.
    pub const ALL: [Statement; 4] = [
        Statement::Income,
        Statement::BalanceSheet,
        Statement::CashFlow,
        Statement::Ratios,
    ];

    /// Returns the human-readable statement name.
    #[must_use]
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Income => "income statement",
            Self::BalanceSheet => "balance sheet",
            Self::CashFlow => "cash flow",
            Self::Ratios => "ratios",
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ============================================================================
// CaptureSession
// ============================================================================

/// A single capture run over a statements page.
///
/// The session holds no mutable state: [`run`](Self::run) re-queries the
/// page every time, so repeated runs against the same page are independent
/// and leave nothing behind.
#[derive(Debug)]
pub struct CaptureSession<'a, P: PageDriver> {
    /// Page being driven.
    page: &'a P,
    /// Selectors and timing.
    config: CaptureConfig,
}

impl<'a, P: PageDriver> CaptureSession<'a, P> {
    /// Creates a capture session over a page.
    #[inline]
    #[must_use]
    pub fn new(page: &'a P, config: CaptureConfig) -> Self {
        Self { page, config }
    }

    /// Returns the session's configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }
}

// ============================================================================
// CaptureSession - Run
// ============================================================================

impl<P: PageDriver> CaptureSession<'_, P> {
    /// Executes the capture sequence and assembles the report.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the configuration fails validation
    /// - [`Error::ElementNotFound`] if the title element is missing
    /// - [`Error::EmptyTitle`] if the title element has no text
    /// - [`Error::TabCountMismatch`] if fewer tab anchors match than
    ///   statements to capture
    /// - [`Error::PanelNotReady`] if a panel never renders after its tab
    ///   switch
    pub async fn run(&self) -> Result<StatementReport> {
        self.config.validate()?;

        let selectors = &self.config.selectors;

        let company = self.page.element_text(&selectors.title).await?;
        let company = company.trim().to_string();
        if company.is_empty() {
            return Err(Error::empty_title(&selectors.title));
        }

        info!(%company, "Starting statement capture");

        let tabs = self.page.find_elements(&selectors.statement_tabs).await?;
        if tabs.len() < Statement::ALL.len() {
            return Err(Error::tab_count_mismatch(Statement::ALL.len(), tabs.len()));
        }
        if tabs.len() > Statement::ALL.len() {
            // Extra anchors (e.g. segment tabs) are ignored; the first four
            // are the statement tabs on the pages this targets.
            warn!(
                found = tabs.len(),
                used = Statement::ALL.len(),
                "More tab anchors than statements, using the first ones"
            );
        }

        let mut fragments = Vec::with_capacity(Statement::ALL.len());
        let mut previous: Option<String> = None;

        for (index, statement) in Statement::ALL.iter().enumerate() {
            debug!(%statement, index, "Selecting statement tab");
            self.page.click(&tabs[index]).await?;

            let markup = self.await_panel(*statement, previous.as_deref()).await?;
            debug!(%statement, markup_len = markup.len(), "Captured panel");

            previous = Some(markup.clone());
            fragments.push((*statement, markup));
        }

        info!(%company, statements = fragments.len(), "Capture complete");

        Ok(StatementReport::new(company, fragments))
    }

    /// Waits until the active panel is ready, then returns its markup.
    ///
    /// Ready means: the panel selector matches, the markup is non-blank,
    /// and — when a previous statement's fragment exists — the markup
    /// differs from it. A present but unchanged panel at the deadline is
    /// accepted with a warning: two statements can legitimately render
    /// identical markup, and only absence is an error.
    async fn await_panel(&self, statement: Statement, previous: Option<&str>) -> Result<String> {
        let selector = &self.config.selectors.active_panel;
        let panel_timeout = self.config.options.panel_timeout();
        let deadline = Instant::now() + panel_timeout;

        let mut last_seen: Option<String> = None;

        loop {
            match self.page.find_element(selector).await {
                Ok(panel) => {
                    let markup = self.page.outer_html(&panel).await?;
                    if !markup.trim().is_empty() {
                        if previous.is_none_or(|p| p != markup) {
                            return Ok(markup);
                        }
                        last_seen = Some(markup);
                    }
                }
                // Not rendered yet; keep polling until the deadline.
                Err(Error::ElementNotFound { .. }) => {}
                Err(e) => return Err(e),
            }

            if Instant::now() >= deadline {
                return match last_seen {
                    Some(markup) => {
                        warn!(%statement, "Panel unchanged at deadline, accepting snapshot");
                        Ok(markup)
                    }
                    None => Err(Error::panel_not_ready(
                        statement.to_string(),
                        panel_timeout.as_millis() as u64,
                    )),
                };
            }

            sleep(self.config.options.poll_interval()).await;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
