// wcag-audit-core/src/report.rs
// ============================================================================
// Module: Engine Report Model
// Description: Explicit data contract for raw accessibility-engine output.
// Purpose: Replace duck-typed engine results with a tagged, defaulted model.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The rules engine returns one JSON report per page analysis: collections
//! of violations, passes, incomplete, and inapplicable check results plus
//! engine, runner, and environment metadata. This module pins that shape
//! down as an explicit contract with serde defaults so that optional fields
//! (`impact`, `failureSummary`, metadata blocks) are resolved once at the
//! deserialization boundary instead of ad hoc per call site. The report is
//! read-only: the shaper consumes it without mutation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Report Types
// ============================================================================

/// Raw result of one page analysis by the rules engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityReport {
    /// Rule checks that failed against the loaded content.
    #[serde(default)]
    pub violations: Vec<RawCheckResult>,
    /// Rule checks that passed.
    #[serde(default)]
    pub passes: Vec<RawCheckResult>,
    /// Rule checks that could not be conclusively evaluated.
    #[serde(default)]
    pub incomplete: Vec<RawCheckResult>,
    /// Rules with no applicable nodes on the page.
    #[serde(default)]
    pub inapplicable: Vec<RawCheckResult>,
    /// Analysis timestamp as reported by the engine.
    #[serde(default)]
    pub timestamp: String,
    /// URL of the analyzed page.
    #[serde(default)]
    pub url: String,
    /// Engine name and version metadata.
    #[serde(default)]
    pub test_engine: EngineMetadata,
    /// Runner metadata, passed through verbatim.
    #[serde(default)]
    pub test_runner: Value,
    /// Environment metadata, passed through verbatim.
    #[serde(default)]
    pub test_environment: Value,
}

/// Engine identification metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineMetadata {
    /// Engine name.
    #[serde(default)]
    pub name: String,
    /// Engine version.
    #[serde(default)]
    pub version: String,
}

/// One rule's outcome within a report collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCheckResult {
    /// Rule identifier.
    pub id: String,
    /// Impact severity; absent for passes and some engine versions.
    #[serde(default)]
    pub impact: Option<String>,
    /// Short description of what the rule checks.
    #[serde(default)]
    pub description: String,
    /// Human-readable help text.
    #[serde(default)]
    pub help: String,
    /// Link to the rule documentation.
    #[serde(default)]
    pub help_url: String,
    /// Tags selecting this rule (WCAG levels, categories).
    #[serde(default)]
    pub tags: Vec<String>,
    /// Nodes affected by this outcome.
    #[serde(default)]
    pub nodes: Vec<RawNode>,
}

/// One affected DOM node within a check result.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    /// Markup snippet of the node.
    #[serde(default)]
    pub html: String,
    /// Selector path identifying the node; nested arrays for frames.
    #[serde(default)]
    pub target: Vec<Value>,
    /// Summary of why the node failed; absent for passes.
    #[serde(default)]
    pub failure_summary: Option<String>,
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

    use serde_json::json;

    use super::AccessibilityReport;

    #[test]
    fn report_defaults_absorb_missing_fields() {
        let report: AccessibilityReport = serde_json::from_value(json!({
            "violations": [{"id": "image-alt"}]
        }))
        .unwrap();
        assert_eq!(report.violations.len(), 1);
        assert!(report.passes.is_empty());
        assert!(report.violations[0].impact.is_none());
        assert!(report.test_engine.name.is_empty());
    }

    #[test]
    fn report_parses_full_engine_output() {
        let report: AccessibilityReport = serde_json::from_value(json!({
            "violations": [{
                "id": "color-contrast",
                "impact": "serious",
                "description": "Ensures sufficient contrast",
                "help": "Elements must meet contrast thresholds",
                "helpUrl": "https://dequeuniversity.com/rules/axe/4.10/color-contrast",
                "tags": ["wcag2aa", "wcag143"],
                "nodes": [{
                    "html": "<p style=\"color: #777\">text</p>",
                    "target": ["p"],
                    "failureSummary": "Fix any of the following: contrast is 2.2:1"
                }]
            }],
            "passes": [],
            "incomplete": [],
            "inapplicable": [],
            "timestamp": "2026-02-11T08:00:00.000Z",
            "url": "https://example.com/",
            "testEngine": {"name": "axe-core", "version": "4.10.2"},
            "testRunner": {"name": "axe"},
            "testEnvironment": {"userAgent": "HeadlessChrome"}
        }))
        .unwrap();
        assert_eq!(report.violations[0].impact.as_deref(), Some("serious"));
        assert_eq!(report.violations[0].nodes[0].target, vec![serde_json::json!("p")]);
        assert_eq!(report.test_engine.version, "4.10.2");
    }
}
