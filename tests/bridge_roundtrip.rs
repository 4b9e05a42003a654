//! End-to-end bridge tests.
//!
//! An in-process fake page bridge connects to the bound server over a real
//! WebSocket and serves the command protocol against an in-memory
//! statements page model. The capture sequence then runs against it through
//! the public API, exactly as it would against a live page.

// ============================================================================
// Imports
// ============================================================================

use anyhow::Result as AnyResult;
use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

use fincap::config::{CaptureOptions, SelectorSet};
use fincap::{Bridge, CaptureConfig, CaptureSession, Error};

// ============================================================================
// Constants
// ============================================================================

const TITLE_SELECTOR: &str = "#company-title";
const TABS_SELECTOR: &str = "#statement-tabs a";
const PANEL_SELECTOR: &str = "#active-panel table";

const PAGE_URL: &str = "https://statements.example/stocks/acme/financials";

// ============================================================================
// Fake page bridge
// ============================================================================

/// In-memory model of the statements page the fake bridge serves.
struct FakeStatementsPage {
    title: String,
    panels: Vec<String>,
    active: Option<usize>,
}

impl FakeStatementsPage {
    fn new(title: &str, panels: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            panels: panels.iter().map(|p| p.to_string()).collect(),
            active: None,
        }
    }

    /// Computes the response payload for one decoded request.
    fn handle(&mut self, method: &str, params: &Value) -> Value {
        match method {
            "page.getTitle" => json!({"title": format!("{} | Financials", self.title)}),

            "element.find" => {
                let selector = params["selector"].as_str().unwrap_or_default();
                match selector {
                    TITLE_SELECTOR => json!({"elementId": "title-node"}),
                    // A node the page has since re-rendered away; any
                    // interaction with it reports the stale error code.
                    "#retired" => json!({"elementId": "retired-node"}),
                    PANEL_SELECTOR => match self.active {
                        Some(index) => json!({"elementId": format!("panel-{index}")}),
                        // No match: success with no elementId, the local end
                        // turns this into ElementNotFound.
                        None => json!({}),
                    },
                    // Nested search inside whichever parent was given.
                    "tr" if params["parentId"].is_string() => json!({"elementId": "row-node"}),
                    _ => json!({}),
                }
            }

            "element.findAll" => {
                let selector = params["selector"].as_str().unwrap_or_default();
                if selector == TABS_SELECTOR {
                    let ids: Vec<String> =
                        (0..self.panels.len()).map(|i| format!("tab-{i}")).collect();
                    json!({"elementIds": ids})
                } else {
                    json!({"elementIds": []})
                }
            }

            "element.getProperty" => {
                let element_id = params["elementId"].as_str().unwrap_or_default();
                let name = params["name"].as_str().unwrap_or_default();

                match (element_id, name) {
                    ("title-node", "innerText") => json!({"value": self.title.clone()}),
                    (panel, "outerHTML") => {
                        let index: usize = panel
                            .strip_prefix("panel-")
                            .and_then(|i| i.parse().ok())
                            .unwrap_or(usize::MAX);
                        json!({"value": self.panels.get(index).cloned().unwrap_or_default()})
                    }
                    _ => json!({"value": null}),
                }
            }

            "element.callMethod" => {
                let element_id = params["elementId"].as_str().unwrap_or_default();
                let name = params["name"].as_str().unwrap_or_default();

                if name == "click"
                    && let Some(index) = element_id
                        .strip_prefix("tab-")
                        .and_then(|i| i.parse::<usize>().ok())
                    && index < self.panels.len()
                {
                    self.active = Some(index);
                }
                json!({"value": null})
            }

            _ => json!({}),
        }
    }
}

/// Connects to the bridge server, sends READY, and serves the protocol
/// until the connection closes.
async fn run_fake_bridge(ws_url: String, mut page: FakeStatementsPage) -> AnyResult<()> {
    let (mut ws, _) = connect_async(ws_url.as_str()).await?;

    // READY handshake: nil UUID, success envelope.
    let ready = json!({
        "id": "00000000-0000-0000-0000-000000000000",
        "type": "success",
        "result": {"tabId": 1, "sessionId": 7, "url": PAGE_URL},
    });
    ws.send(Message::Text(ready.to_string().into())).await?;

    while let Some(message) = ws.next().await {
        let message = match message {
            Ok(m) => m,
            Err(_) => break,
        };

        match message {
            Message::Text(text) => {
                let request: Value = serde_json::from_str(text.as_str())?;
                let id = request["id"].as_str().unwrap_or_default().to_string();
                let method = request["method"].as_str().unwrap_or_default().to_string();

                // A click on a retired element reports the stale error code.
                let reply = if method == "element.callMethod"
                    && request["params"]["elementId"].as_str() == Some("retired-node")
                {
                    json!({
                        "id": id,
                        "type": "error",
                        "error": "stale element",
                        "message": "Element no longer attached",
                    })
                } else {
                    let result = page.handle(&method, &request["params"]);
                    json!({"id": id, "type": "success", "result": result})
                };

                ws.send(Message::Text(reply.to_string().into())).await?;
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

fn test_config() -> CaptureConfig {
    CaptureConfig {
        selectors: SelectorSet {
            title: TITLE_SELECTOR.to_string(),
            statement_tabs: TABS_SELECTOR.to_string(),
            active_panel: PANEL_SELECTOR.to_string(),
        },
        options: CaptureOptions::new()
            .with_panel_timeout_ms(2_000)
            .with_poll_interval_ms(10),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_capture_through_real_websocket() -> AnyResult<()> {
    let bridge = Bridge::bind(0).await?;
    let ws_url = bridge.ws_url();

    let page_model = FakeStatementsPage::new(
        "  ACME Corp  ",
        &[
            "<table>1</table>",
            "<table>2</table>",
            "<table>3</table>",
            "<table>4</table>",
        ],
    );
    let peer = tokio::spawn(run_fake_bridge(ws_url, page_model));

    let session = bridge.accept().await?;
    assert_eq!(session.session_id().get(), 7);
    assert_eq!(session.tab_id().get(), 1);
    assert_eq!(session.page_url()?.host_str(), Some("statements.example"));

    let page = session.page();
    let report = CaptureSession::new(&page, test_config()).run().await?;

    assert_eq!(report.company(), "ACME Corp");
    assert_eq!(report.file_name(), "ACME Corp.html");
    assert_eq!(
        report.render(),
        "<table>1</table>\n\n<table>2</table>\n\n<table>3</table>\n\n<table>4</table>"
    );

    // Save and read back the full document.
    let dir = tempfile::tempdir()?;
    let path = report.save(dir.path())?;
    assert_eq!(path, dir.path().join("ACME Corp.html"));
    assert_eq!(std::fs::read_to_string(&path)?, report.render());

    session.close();
    peer.await??;
    Ok(())
}

#[tokio::test]
async fn test_document_title_and_missing_element() -> AnyResult<()> {
    let bridge = Bridge::bind(0).await?;
    let ws_url = bridge.ws_url();

    let page_model = FakeStatementsPage::new("ACME Corp", &["<table>1</table>"]);
    let peer = tokio::spawn(run_fake_bridge(ws_url, page_model));

    let session = bridge.accept().await?;
    let page = session.page();

    let title = page.document_title().await?;
    assert_eq!(title, "ACME Corp | Financials");

    // Nested search is scoped to the parent element.
    let heading = page.find_element(TITLE_SELECTOR).await?;
    let row = heading.find_element("tr").await?;
    assert_eq!(row.id().as_str(), "row-node");

    let err = page
        .find_element("#does-not-exist")
        .await
        .expect_err("unmatched selector must error");
    assert!(matches!(err, Error::ElementNotFound { .. }));

    session.close();
    peer.await??;
    Ok(())
}

#[tokio::test]
async fn test_stale_element_code_is_mapped() -> AnyResult<()> {
    let bridge = Bridge::bind(0).await?;
    let ws_url = bridge.ws_url();

    let page_model = FakeStatementsPage::new("ACME Corp", &["<table>1</table>"]);
    let peer = tokio::spawn(run_fake_bridge(ws_url, page_model));

    let session = bridge.accept().await?;
    let page = session.page();

    let elements = page.find_elements(TABS_SELECTOR).await?;
    assert_eq!(elements.len(), 1);

    // The fake bridge reports "stale element" for this node.
    let retired = page.find_element("#retired").await?;
    let err = retired
        .click()
        .await
        .expect_err("stale reference must error");
    assert!(matches!(err, Error::StaleElement { .. }));
    assert!(err.is_recoverable());

    session.close();
    peer.await??;
    Ok(())
}
