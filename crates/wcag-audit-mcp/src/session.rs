// wcag-audit-mcp/src/session.rs
// ============================================================================
// Module: Browser Session Runner
// Description: Scoped headless-browser sessions for single tool invocations.
// Purpose: One launch, one page, one load, guaranteed release.
// Dependencies: chromiumoxide, futures, tokio, tracing
// ============================================================================

//! ## Overview
//! Every browser-backed tool call owns exactly one [`BrowserSession`]: a
//! headless Chromium process, its CDP handler task, and a single page. The
//! session is created at the start of the invocation and released at its
//! end on every exit path; release failures are logged and never surfaced
//! to the caller. No session state is shared between invocations.
//!
//! Both content-loading operations (URL navigation and HTML injection) are
//! governed by the one configured navigation timeout.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use chromiumoxide::Page;
use chromiumoxide::browser::Browser;
use chromiumoxide::browser::BrowserConfig;
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use futures::StreamExt;
use serde_json::Value;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::debug;
use tracing::warn;

use crate::config::BrowserConfig as BrowserSettings;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Script probing reachable stylesheets for orientation media features.
///
/// Cross-origin stylesheets throw on `cssRules` access; those are skipped,
/// degrading to "no CSS lock detected" rather than failing the call.
const CSS_ORIENTATION_PROBE: &str = r"
(() => {
    let locked = false;
    for (const sheet of Array.from(document.styleSheets)) {
        let rules;
        try {
            rules = sheet.cssRules;
        } catch (_) {
            continue;
        }
        if (!rules) {
            continue;
        }
        for (const rule of Array.from(rules)) {
            const text = rule.cssText || '';
            if (text.toLowerCase().includes('orientation')) {
                locked = true;
            }
        }
    }
    return locked;
})()
";

// ============================================================================
// SECTION: Session Errors
// ============================================================================

/// Browser session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Browser process could not be configured or launched.
    #[error("browser launch failed: {0}")]
    Launch(String),
    /// Page creation failed.
    #[error("page creation failed: {0}")]
    Page(String),
    /// Content loading failed.
    #[error("content load failed: {0}")]
    Load(String),
    /// Content loading exceeded the navigation timeout.
    #[error("content load timed out after {0} ms")]
    LoadTimeout(u64),
    /// Script evaluation in the page failed.
    #[error("script evaluation failed: {0}")]
    Evaluate(String),
}

// ============================================================================
// SECTION: Browser Session
// ============================================================================

/// A scoped headless-browser session for one tool invocation.
pub struct BrowserSession {
    /// Browser process handle.
    browser: Browser,
    /// The single page used by this invocation.
    page: Page,
    /// CDP handler task pumping protocol messages.
    handler: JoinHandle<()>,
    /// Navigation timeout applied to content loading.
    navigation_timeout: Duration,
    /// Timeout setting in milliseconds, kept for error reporting.
    navigation_timeout_ms: u64,
}

impl BrowserSession {
    /// Launches a headless browser and opens a blank page sized to the
    /// configured viewport.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when the browser cannot be launched or the
    /// page cannot be created.
    pub async fn launch(settings: &BrowserSettings) -> Result<Self, SessionError> {
        let mut builder = BrowserConfig::builder()
            .window_size(settings.viewport_width, settings.viewport_height)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions");
        if settings.no_sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(executable) = &settings.executable {
            builder = builder.chrome_executable(executable);
        }
        let config = builder.build().map_err(SessionError::Launch)?;
        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|err| SessionError::Launch(err.to_string()))?;
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    debug!("cdp handler loop ended");
                    break;
                }
            }
        });
        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(err) => {
                release(browser, handler).await;
                return Err(SessionError::Page(err.to_string()));
            }
        };
        debug!(
            width = settings.viewport_width,
            height = settings.viewport_height,
            "browser session started"
        );
        Ok(Self {
            browser,
            page,
            handler,
            navigation_timeout: Duration::from_millis(settings.navigation_timeout_ms),
            navigation_timeout_ms: settings.navigation_timeout_ms,
        })
    }

    /// Navigates the page to a URL and waits for the load to settle, under
    /// the configured navigation timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when navigation fails or times out.
    pub async fn goto(&self, url: &str) -> Result<(), SessionError> {
        let navigation = async {
            self.page.goto(url).await.map_err(|err| SessionError::Load(err.to_string()))?;
            self.page
                .wait_for_navigation()
                .await
                .map_err(|err| SessionError::Load(err.to_string()))?;
            Ok(())
        };
        tokio::time::timeout(self.navigation_timeout, navigation)
            .await
            .map_err(|_| SessionError::LoadTimeout(self.navigation_timeout_ms))?
    }

    /// Replaces the page document with literal HTML markup, under the
    /// configured navigation timeout.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] when injection fails or times out.
    pub async fn set_content(&self, html: &str) -> Result<(), SessionError> {
        let injection = async {
            self.page
                .set_content(html)
                .await
                .map_err(|err| SessionError::Load(err.to_string()))?;
            Ok(())
        };
        tokio::time::timeout(self.navigation_timeout, injection)
            .await
            .map_err(|_| SessionError::LoadTimeout(self.navigation_timeout_ms))?
    }

    /// Evaluates a script expression in the page, awaiting promises, and
    /// returns the result as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Evaluate`] when evaluation fails or the
    /// result cannot be represented as JSON.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, SessionError> {
        let params = EvaluateParams::builder()
            .expression(expression)
            .await_promise(true)
            .return_by_value(true)
            .build()
            .map_err(SessionError::Evaluate)?;
        let result = self
            .page
            .evaluate(params)
            .await
            .map_err(|err| SessionError::Evaluate(err.to_string()))?;
        result.into_value().map_err(|err| SessionError::Evaluate(err.to_string()))
    }

    /// Scans the page's reachable stylesheets for orientation media
    /// features. Inaccessible stylesheets count as unlocked.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Evaluate`] when the probe itself cannot run.
    pub async fn detect_css_orientation_lock(&self) -> Result<bool, SessionError> {
        let value = self.evaluate(CSS_ORIENTATION_PROBE).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    /// Releases the browser. Failures are logged, never escalated.
    pub async fn close(self) {
        release(self.browser, self.handler).await;
    }
}

/// Closes a browser and stops its handler task, best-effort.
async fn release(mut browser: Browser, handler: JoinHandle<()>) {
    if let Err(err) = browser.close().await {
        warn!(error = %err, "browser close failed");
    }
    if let Err(err) = browser.wait().await {
        debug!(error = %err, "browser wait failed");
    }
    handler.abort();
}
