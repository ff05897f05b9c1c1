// wcag-audit-mcp/src/engine.rs
// ============================================================================
// Module: Rules Engine Adapter
// Description: Injects the accessibility rules engine and collects reports.
// Purpose: Consume the external engine at its analyze() boundary.
// Dependencies: crate::session, serde_json, wcag-audit-core
// ============================================================================

//! ## Overview
//! The rules engine is an external collaborator: a JS bundle evaluated
//! inside the analyzed page. This adapter loads the bundle from the
//! configured path, injects it into a prepared [`BrowserSession`] page, and
//! runs one analysis scoped by tags, an explicit rule allowlist, or a
//! forced rule enablement. The raw JSON result is deserialized into the
//! explicit [`AccessibilityReport`] contract; the engine's own rule
//! semantics are never reimplemented here.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::path::Path;

use thiserror::Error;
use wcag_audit_core::AccessibilityReport;

use crate::config::EngineConfig;
use crate::config::MAX_ENGINE_SCRIPT_BYTES;
use crate::session::BrowserSession;
use crate::session::SessionError;

// ============================================================================
// SECTION: Analysis Scope
// ============================================================================

/// Rule selection for one analysis run.
#[derive(Debug, Clone)]
pub enum AnalysisScope {
    /// Run the engine's default rule set.
    Default,
    /// Run only rules matching any of these tags.
    Tags(Vec<String>),
    /// Run only these rule identifiers.
    Rules(Vec<String>),
    /// Run the default set with one rule explicitly enabled.
    WithRuleEnabled(String),
}

impl AnalysisScope {
    /// Renders the scope as the engine's run-options JSON.
    fn to_options(&self) -> serde_json::Value {
        match self {
            Self::Default => serde_json::json!({}),
            Self::Tags(tags) if tags.is_empty() => serde_json::json!({}),
            Self::Tags(tags) => serde_json::json!({
                "runOnly": {"type": "tag", "values": tags}
            }),
            Self::Rules(rules) => serde_json::json!({
                "runOnly": {"type": "rule", "values": rules}
            }),
            Self::WithRuleEnabled(rule) => {
                let mut rules = serde_json::Map::new();
                rules.insert(rule.clone(), serde_json::json!({"enabled": true}));
                serde_json::json!({"rules": rules})
            }
        }
    }
}

// ============================================================================
// SECTION: Engine Adapter
// ============================================================================

/// Rules engine adapter holding the loaded JS bundle.
pub struct RulesEngine {
    /// Engine bundle source injected into analyzed pages.
    script: String,
}

/// Rules engine errors.
#[derive(Debug, Error)]
pub enum EngineError {
    /// No engine bundle is configured.
    #[error("engine.script_path is not configured")]
    ScriptNotConfigured,
    /// Engine bundle could not be read.
    #[error("engine script read failed for {path}: {message}")]
    ScriptRead {
        /// Path that failed to read.
        path: String,
        /// Underlying error message.
        message: String,
    },
    /// Engine bundle exceeds the size limit.
    #[error("engine script {path} exceeds {limit} bytes")]
    ScriptTooLarge {
        /// Path that was rejected.
        path: String,
        /// Maximum allowed size in bytes.
        limit: u64,
    },
    /// Injection or analysis failed inside the page.
    #[error("engine analysis failed: {0}")]
    Analysis(String),
    /// The engine's result did not match the report contract.
    #[error("engine report parse failed: {0}")]
    Report(String),
}

impl From<SessionError> for EngineError {
    fn from(err: SessionError) -> Self {
        Self::Analysis(err.to_string())
    }
}

impl RulesEngine {
    /// Loads the engine bundle named by configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] when no bundle is configured, the file is
    /// unreadable, or it exceeds the size limit.
    pub async fn load(config: &EngineConfig) -> Result<Self, EngineError> {
        let path = config.script_path.as_deref().ok_or(EngineError::ScriptNotConfigured)?;
        let metadata = tokio::fs::metadata(path).await.map_err(|err| read_error(path, &err))?;
        if metadata.len() > MAX_ENGINE_SCRIPT_BYTES {
            return Err(EngineError::ScriptTooLarge {
                path: path.display().to_string(),
                limit: MAX_ENGINE_SCRIPT_BYTES,
            });
        }
        let script =
            tokio::fs::read_to_string(path).await.map_err(|err| read_error(path, &err))?;
        Ok(Self {
            script,
        })
    }

    /// Injects the engine into the session's page and runs one analysis.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] when injection, evaluation, or report
    /// deserialization fails.
    pub async fn analyze(
        &self,
        session: &BrowserSession,
        scope: &AnalysisScope,
    ) -> Result<AccessibilityReport, EngineError> {
        session.evaluate(&self.script).await?;
        let options = scope.to_options();
        let expression = format!("axe.run(document, {options})");
        let raw = session.evaluate(&expression).await?;
        serde_json::from_value(raw).map_err(|err| EngineError::Report(err.to_string()))
    }
}

/// Builds a script-read error for a path.
fn read_error(path: &Path, err: &std::io::Error) -> EngineError {
    EngineError::ScriptRead {
        path: path.display().to_string(),
        message: err.to_string(),
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        reason = "Test-only panic-based assertions."
    )]

    use super::AnalysisScope;

    #[test]
    fn default_scope_renders_empty_options() {
        assert_eq!(AnalysisScope::Default.to_options(), serde_json::json!({}));
    }

    #[test]
    fn empty_tag_list_falls_back_to_default_rules() {
        assert_eq!(AnalysisScope::Tags(vec![]).to_options(), serde_json::json!({}));
    }

    #[test]
    fn tag_scope_renders_run_only_tags() {
        let options = AnalysisScope::Tags(vec!["wcag2aa".to_string()]).to_options();
        assert_eq!(options["runOnly"]["type"], "tag");
        assert_eq!(options["runOnly"]["values"][0], "wcag2aa");
    }

    #[test]
    fn rule_scope_renders_run_only_rules() {
        let options = AnalysisScope::Rules(vec!["color-contrast".to_string()]).to_options();
        assert_eq!(options["runOnly"]["type"], "rule");
    }

    #[test]
    fn enabled_rule_scope_targets_one_rule() {
        let options = AnalysisScope::WithRuleEnabled("meta-viewport".to_string()).to_options();
        assert_eq!(options["rules"]["meta-viewport"]["enabled"], true);
    }
}
