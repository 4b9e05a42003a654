//! End-to-end statement capture demonstration.
//!
//! Demonstrates:
//! - Binding the bridge server and printing its WebSocket URL
//! - Accepting the page bridge connection
//! - Running the four-statement capture sequence
//! - Saving the report to disk
//!
//! Usage:
//!   cargo run --example capture_statements
//!   cargo run --example capture_statements -- ./reports
//!   RUST_LOG=fincap=debug cargo run --example capture_statements

// ============================================================================
// Imports
// ============================================================================

use fincap::{Bridge, CaptureConfig, CaptureSession, Result};
use tracing_subscriber::EnvFilter;

// ============================================================================
// Constants
// ============================================================================

const DEFAULT_OUTPUT_DIR: &str = "reports";

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let output_dir = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string());

    if let Err(e) = run(&output_dir).await {
        eprintln!("\n[ERROR] {e}");
        std::process::exit(1);
    }
}

async fn run(output_dir: &str) -> Result<()> {
    println!("=== fincap: capture statements ===\n");

    // ========================================================================
    // Bind
    // ========================================================================

    println!("[1] Binding bridge server...");
    let bridge = Bridge::bind(0).await?;
    println!("    ✓ Bound on port {}", bridge.port());
    println!("    Point the page bridge at: {}\n", bridge.ws_url());

    // ========================================================================
    // Accept
    // ========================================================================

    println!("[2] Waiting for the statements page to connect...");
    let session = bridge.accept().await?;
    println!("    ✓ Session established (session={})", session.session_id());
    if let Ok(url) = session.page_url() {
        println!("    Page: {url}");
    }
    println!();

    // ========================================================================
    // Capture
    // ========================================================================

    println!("[3] Capturing statements...");
    let page = session.page();
    let report = CaptureSession::new(&page, CaptureConfig::new())
        .run()
        .await?;

    println!("    ✓ Captured {} statements for '{}'", report.fragments().len(), report.company());
    for (statement, markup) in report.fragments() {
        println!("      {statement}: {} bytes", markup.len());
    }
    println!();

    // ========================================================================
    // Save
    // ========================================================================

    println!("[4] Saving report...");
    let path = report.save(output_dir)?;
    println!("    ✓ Saved: {}\n", path.display());

    session.close();
    println!("=== Done ===");

    Ok(())
}
