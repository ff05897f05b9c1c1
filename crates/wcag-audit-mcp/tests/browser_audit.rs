// wcag-audit-mcp/tests/browser_audit.rs
// ============================================================================
// Module: Browser Audit System Tests
// Description: End-to-end audits against a live headless browser.
// Purpose: Exercise the session runner and engine adapter for real.
// Dependencies: serde_json, tokio, wcag-audit-mcp
// ============================================================================

//! ## Overview
//! These tests drive the full tool path: launch headless Chromium, inject
//! markup, run the engine bundle, and assert on the shaped report. They
//! need a browser and an engine bundle on the host, so they are ignored by
//! default and configured through environment variables:
//!
//! - `WCAG_AUDIT_E2E_ENGINE` (required): path to the engine JS bundle.
//! - `WCAG_AUDIT_E2E_BROWSER` (optional): explicit browser executable.
//! - `WCAG_AUDIT_E2E_NO_SANDBOX` (optional): disable the browser sandbox,
//!   needed inside most containers.
//!
//! Run with `cargo test -p wcag-audit-mcp --test browser_audit -- --ignored`.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only panic-based assertions."
)]

use std::env;
use std::path::PathBuf;

use serde_json::json;
use wcag_audit_mcp::ToolRouter;
use wcag_audit_mcp::WcagAuditConfig;

/// Environment variable naming the engine bundle path.
const ENGINE_ENV: &str = "WCAG_AUDIT_E2E_ENGINE";
/// Environment variable naming an explicit browser executable.
const BROWSER_ENV: &str = "WCAG_AUDIT_E2E_BROWSER";
/// Environment variable disabling the browser sandbox.
const NO_SANDBOX_ENV: &str = "WCAG_AUDIT_E2E_NO_SANDBOX";

/// Builds a router configured from the system-test environment.
fn router_from_env() -> ToolRouter {
    let engine = env::var(ENGINE_ENV)
        .unwrap_or_else(|_| panic!("{ENGINE_ENV} must point at the engine bundle"));
    let mut config = WcagAuditConfig::default();
    config.engine.script_path = Some(PathBuf::from(engine));
    config.browser.no_sandbox = env::var(NO_SANDBOX_ENV).is_ok();
    if let Ok(executable) = env::var(BROWSER_ENV) {
        config.browser.executable = Some(PathBuf::from(executable));
    }
    ToolRouter::new(config).expect("bundled catalog loads")
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires headless Chromium and an engine bundle"]
async fn missing_alt_text_fragment_reports_image_alt_violation() {
    let router = router_from_env();
    let value = router
        .handle_tool_call("test_html_string", json!({"html": "<img src='x.jpg'>"}))
        .await
        .expect("audit succeeds");
    let violations = value["violations"].as_array().expect("violations array");
    assert!(
        violations.iter().any(|violation| violation["id"] == json!("image-alt")),
        "expected an image-alt violation, got {violations:?}"
    );
}

#[tokio::test(flavor = "multi_thread")]
#[ignore = "requires headless Chromium and an engine bundle"]
async fn scaling_lock_markup_reports_orientation_lock() {
    let router = router_from_env();
    let html = "<html><head><meta name='viewport' \
                content='width=device-width, user-scalable=no'></head>\
                <body><p>locked</p></body></html>";
    let value = router
        .handle_tool_call("check_orientation_lock", json!({"html": html}))
        .await
        .expect("audit succeeds");
    assert_eq!(value["hasOrientationLock"], json!(true));
}
