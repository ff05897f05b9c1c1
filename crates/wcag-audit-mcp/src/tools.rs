// wcag-audit-mcp/src/tools.rs
// ============================================================================
// Module: MCP Tool Router
// Description: Tool routing for the WCAG Audit MCP server.
// Purpose: Validate arguments, run sessions, and shape engine reports.
// Dependencies: wcag-audit-contract, wcag-audit-core, crate::{config, engine, session}
// ============================================================================

//! ## Overview
//! The tool router dispatches MCP tool calls to the session runner and the
//! result shaper. Tool inputs are untrusted: required arguments are
//! validated here, before any browser work, regardless of what the client
//! claims to have checked against the published schemas.
//!
//! ## Layer Responsibilities
//! - Route tool calls to the matching session/shaper pairing.
//! - Surface missing or malformed arguments as invalid-params failures.
//! - Wrap browser, load, and engine failures as internal errors.
//!
//! ## Invariants
//! - A failed invocation yields exactly one error, never a partial report.
//! - Every launched browser session is released before the call returns.
//! - The router holds no mutable state; calls are independent.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::info;
use tracing::warn;
use url::Url;
use wcag_audit_contract::ToolDefinition;
use wcag_audit_contract::ToolName;
use wcag_audit_contract::tool_definitions;
use wcag_audit_core::ARIA_RULE_IDS;
use wcag_audit_core::AccessibilityReport;
use wcag_audit_core::AriaReport;
use wcag_audit_core::AuditSummary;
use wcag_audit_core::CatalogError;
use wcag_audit_core::ContrastAssessment;
use wcag_audit_core::ContrastReport;
use wcag_audit_core::OrientationReport;
use wcag_audit_core::RuleCatalog;
use wcag_audit_core::parse_color;

use crate::config::WcagAuditConfig;
use crate::engine::AnalysisScope;
use crate::engine::EngineError;
use crate::engine::RulesEngine;
use crate::session::BrowserSession;
use crate::session::SessionError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Rule identifier used by the orientation check.
const META_VIEWPORT_RULE: &str = "meta-viewport";
/// Default font size in CSS pixels for contrast assessment.
const DEFAULT_FONT_SIZE_PX: f64 = 16.0;

// ============================================================================
// SECTION: Tool Requests
// ============================================================================

/// Request payload for `test_accessibility`.
#[derive(Debug, Deserialize)]
pub struct TestAccessibilityRequest {
    /// URL of the page to audit.
    pub url: String,
    /// Optional rule tags selecting the rules to run.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request payload for `test_html_string`.
#[derive(Debug, Deserialize)]
pub struct TestHtmlStringRequest {
    /// Literal HTML markup to audit.
    pub html: String,
    /// Optional rule tags selecting the rules to run.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request payload for `get_rules`.
#[derive(Debug, Deserialize)]
pub struct GetRulesRequest {
    /// Optional rule tags; rules matching any tag are returned.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request payload for `check_color_contrast`.
#[derive(Debug, Deserialize)]
pub struct CheckColorContrastRequest {
    /// Foreground color in any recognized notation.
    pub foreground: String,
    /// Background color in any recognized notation.
    pub background: String,
    /// Font size in CSS pixels.
    #[serde(default = "default_font_size", rename = "fontSize")]
    pub font_size: f64,
    /// Whether the text is bold.
    #[serde(default, rename = "isBold")]
    pub is_bold: bool,
}

/// Returns the default contrast font size.
const fn default_font_size() -> f64 {
    DEFAULT_FONT_SIZE_PX
}

/// Request payload for `check_aria_attributes`.
#[derive(Debug, Deserialize)]
pub struct CheckAriaAttributesRequest {
    /// Literal HTML markup to audit.
    pub html: String,
}

/// Request payload for `check_orientation_lock`.
#[derive(Debug, Deserialize)]
pub struct CheckOrientationLockRequest {
    /// Literal HTML markup to audit.
    pub html: String,
}

// ============================================================================
// SECTION: Tool Errors
// ============================================================================

/// Tool routing errors, mapped onto the JSON-RPC error taxonomy.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The tool name is not part of the catalog.
    #[error("unknown tool")]
    UnknownTool,
    /// A required argument is missing or malformed.
    #[error("invalid params: {0}")]
    InvalidParams(String),
    /// Browser, load, or engine failure.
    #[error("internal error: {0}")]
    Internal(String),
    /// Response serialization failed.
    #[error("serialization failed")]
    Serialization,
}

impl From<SessionError> for ToolError {
    fn from(err: SessionError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<EngineError> for ToolError {
    fn from(err: EngineError) -> Self {
        Self::Internal(err.to_string())
    }
}

// ============================================================================
// SECTION: Tool Router
// ============================================================================

/// Routes tool calls to session runners and result shapers.
pub struct ToolRouter {
    /// Process-wide configuration, read-only after startup.
    config: WcagAuditConfig,
    /// Static rule catalog, loaded once.
    catalog: RuleCatalog,
}

/// Content to load into a session's page.
enum PageContent<'a> {
    /// Navigate to a URL.
    Url(&'a str),
    /// Inject literal markup.
    Html(&'a str),
}

impl ToolRouter {
    /// Builds a router over the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] when the bundled rule catalog is malformed.
    pub fn new(config: WcagAuditConfig) -> Result<Self, CatalogError> {
        let catalog = RuleCatalog::bundled()?;
        Ok(Self {
            config,
            catalog,
        })
    }

    /// Returns the tool catalog in listing form.
    #[must_use]
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        tool_definitions()
    }

    /// Dispatches one tool call by name.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError`] for unknown tools, invalid arguments, and
    /// session or engine failures.
    pub async fn handle_tool_call(
        &self,
        name: &str,
        arguments: Value,
    ) -> Result<Value, ToolError> {
        let tool = ToolName::parse(name).ok_or(ToolError::UnknownTool)?;
        info!(tool = name, "tool call");
        let result = match tool {
            ToolName::TestAccessibility => self.test_accessibility(arguments).await,
            ToolName::TestHtmlString => self.test_html_string(arguments).await,
            ToolName::GetRules => self.get_rules(&arguments),
            ToolName::CheckColorContrast => Self::check_color_contrast(arguments),
            ToolName::CheckAriaAttributes => self.check_aria_attributes(arguments).await,
            ToolName::CheckOrientationLock => self.check_orientation_lock(arguments).await,
        };
        if let Err(err) = &result {
            warn!(tool = name, error = %err, "tool call failed");
        }
        result
    }

    /// Audits a URL with the full rules engine.
    async fn test_accessibility(&self, arguments: Value) -> Result<Value, ToolError> {
        let request: TestAccessibilityRequest = parse_request(arguments)?;
        let url = request.url.trim();
        if url.is_empty() {
            return Err(ToolError::InvalidParams("url must not be empty".to_string()));
        }
        Url::parse(url)
            .map_err(|err| ToolError::InvalidParams(format!("invalid url {url:?}: {err}")))?;
        let (report, _) =
            self.run_analysis(PageContent::Url(url), AnalysisScope::Tags(request.tags), false)
                .await?;
        to_response(&AuditSummary::from_report(report))
    }

    /// Audits a literal HTML string with the full rules engine.
    async fn test_html_string(&self, arguments: Value) -> Result<Value, ToolError> {
        let request: TestHtmlStringRequest = parse_request(arguments)?;
        let html = non_empty_html(&request.html)?;
        let (report, _) =
            self.run_analysis(PageContent::Html(html), AnalysisScope::Tags(request.tags), false)
                .await?;
        to_response(&AuditSummary::from_report(report))
    }

    /// Lists the rule catalog, optionally filtered by tag.
    fn get_rules(&self, arguments: &Value) -> Result<Value, ToolError> {
        let request: GetRulesRequest = parse_request(arguments.clone())?;
        to_response(&self.catalog.filtered(&request.tags))
    }

    /// Assesses WCAG contrast directly from relative luminance.
    fn check_color_contrast(arguments: Value) -> Result<Value, ToolError> {
        let request: CheckColorContrastRequest = parse_request(arguments)?;
        let foreground = parse_color(&request.foreground)
            .map_err(|err| ToolError::InvalidParams(err.to_string()))?;
        let background = parse_color(&request.background)
            .map_err(|err| ToolError::InvalidParams(err.to_string()))?;
        if !request.font_size.is_finite() || request.font_size <= 0.0 {
            return Err(ToolError::InvalidParams(
                "fontSize must be a positive number".to_string(),
            ));
        }
        let assessment =
            ContrastAssessment::assess(foreground, background, request.font_size, request.is_bold);
        to_response(&ContrastReport::new(&request.foreground, &request.background, assessment))
    }

    /// Audits a literal HTML string against the ARIA rule subset.
    async fn check_aria_attributes(&self, arguments: Value) -> Result<Value, ToolError> {
        let request: CheckAriaAttributesRequest = parse_request(arguments)?;
        let html = non_empty_html(&request.html)?;
        let rules = ARIA_RULE_IDS.iter().map(ToString::to_string).collect();
        let (report, _) =
            self.run_analysis(PageContent::Html(html), AnalysisScope::Rules(rules), false).await?;
        to_response(&AriaReport::from_report(&report))
    }

    /// Detects viewport and CSS orientation locks in a literal HTML string.
    async fn check_orientation_lock(&self, arguments: Value) -> Result<Value, ToolError> {
        let request: CheckOrientationLockRequest = parse_request(arguments)?;
        let html = non_empty_html(&request.html)?;
        let scope = AnalysisScope::WithRuleEnabled(META_VIEWPORT_RULE.to_string());
        let (report, has_css_lock) =
            self.run_analysis(PageContent::Html(html), scope, true).await?;
        to_response(&OrientationReport::from_report(&report, has_css_lock))
    }

    /// Runs one scoped browser session: load content, analyze, optionally
    /// probe stylesheets, and release the browser on every path.
    async fn run_analysis(
        &self,
        content: PageContent<'_>,
        scope: AnalysisScope,
        probe_css: bool,
    ) -> Result<(AccessibilityReport, bool), ToolError> {
        let engine = RulesEngine::load(&self.config.engine).await?;
        let session = BrowserSession::launch(&self.config.browser).await?;
        let outcome = analyze_in_session(&session, &engine, content, &scope, probe_css).await;
        session.close().await;
        outcome
    }
}

/// Loads content and runs the engine inside an already-launched session.
///
/// Kept separate from [`ToolRouter::run_analysis`] so the session is
/// released exactly once no matter where this fails.
async fn analyze_in_session(
    session: &BrowserSession,
    engine: &RulesEngine,
    content: PageContent<'_>,
    scope: &AnalysisScope,
    probe_css: bool,
) -> Result<(AccessibilityReport, bool), ToolError> {
    match content {
        PageContent::Url(url) => session.goto(url).await?,
        PageContent::Html(html) => session.set_content(html).await?,
    }
    let report = engine.analyze(session, scope).await?;
    let has_css_lock =
        if probe_css { session.detect_css_orientation_lock().await? } else { false };
    Ok((report, has_css_lock))
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Deserializes tool arguments, surfacing failures as invalid params.
fn parse_request<T: DeserializeOwned>(arguments: Value) -> Result<T, ToolError> {
    serde_json::from_value(arguments).map_err(|err| ToolError::InvalidParams(err.to_string()))
}

/// Rejects empty HTML payloads before any browser work.
fn non_empty_html(html: &str) -> Result<&str, ToolError> {
    if html.trim().is_empty() {
        return Err(ToolError::InvalidParams("html must not be empty".to_string()));
    }
    Ok(html)
}

/// Serializes a tool response payload.
fn to_response<T: serde::Serialize>(payload: &T) -> Result<Value, ToolError> {
    serde_json::to_value(payload).map_err(|_| ToolError::Serialization)
}
