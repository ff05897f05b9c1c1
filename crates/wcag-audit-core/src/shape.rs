// wcag-audit-core/src/shape.rs
// ============================================================================
// Module: Result Shaper
// Description: Projects raw engine reports onto the stable tool output schemas.
// Purpose: Keep the public JSON contract compact and defaulted in one place.
// Dependencies: crate::color, crate::report, serde, serde_json
// ============================================================================

//! ## Overview
//! The shaper maps [`AccessibilityReport`] into the public output schemas of
//! the audit tools. The default shape keeps full violation detail but
//! collapses passes, incomplete, and inapplicable results to counts. The
//! specialized tools (ARIA, orientation, contrast) derive their own views
//! over the same raw report. Optional upstream fields are defaulted here
//! and nowhere else: violation `impact` becomes `"unknown"` and node
//! `failureSummary` becomes the empty string.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::color::ContrastAssessment;
use crate::report::AccessibilityReport;
use crate::report::RawCheckResult;
use crate::report::RawNode;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Impact label substituted when the engine reports none.
const UNKNOWN_IMPACT: &str = "unknown";
/// Viewport markup fragments that lock orientation or scaling.
const ORIENTATION_LOCK_MARKERS: [&str; 4] =
    ["user-scalable=no", "maximum-scale=1.0", "orientation=portrait", "orientation=landscape"];
/// WCAG success criterion covered by the orientation check.
const ORIENTATION_WCAG_CRITERIA: &str = "WCAG 2.1 Success Criterion 1.3.4 (Orientation, Level AA)";
/// Documentation link for the orientation criterion.
const ORIENTATION_HELP_URL: &str = "https://www.w3.org/WAI/WCAG21/Understanding/orientation.html";
/// Rule identifier for viewport meta checks.
const META_VIEWPORT_RULE: &str = "meta-viewport";
/// Method label for directly computed contrast ratios.
const CONTRAST_METHOD: &str = "relative-luminance";

// ============================================================================
// SECTION: Shaped Types
// ============================================================================

/// Stable public projection of one raw violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapedViolation {
    /// Rule identifier.
    pub id: String,
    /// Impact severity, `"unknown"` when the engine reports none.
    pub impact: String,
    /// Short description of what the rule checks.
    pub description: String,
    /// Human-readable help text.
    pub help: String,
    /// Link to the rule documentation.
    pub help_url: String,
    /// Nodes affected by the violation.
    pub affected_nodes: Vec<ShapedNode>,
}

/// Stable public projection of one affected node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapedNode {
    /// Markup snippet of the node.
    pub html: String,
    /// Selector path identifying the node.
    pub target: Vec<Value>,
    /// Failure summary, empty when the engine reports none.
    pub failure_summary: String,
}

/// Default output shape for full-page audits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditSummary {
    /// Violations in full detail.
    pub violations: Vec<ShapedViolation>,
    /// Count of passed checks.
    pub passes: usize,
    /// Count of inconclusive checks.
    pub incomplete: usize,
    /// Count of inapplicable checks.
    pub inapplicable: usize,
    /// Analysis timestamp as reported by the engine.
    pub timestamp: String,
    /// URL of the analyzed page.
    pub url: String,
    /// Engine name and version.
    pub test_engine: crate::report::EngineMetadata,
    /// Runner metadata passthrough.
    pub test_runner: Value,
    /// Environment metadata passthrough.
    pub test_environment: Value,
}

/// Output shape for the ARIA attribute check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AriaReport {
    /// ARIA violations; impact is passed through without substitution.
    pub violations: Vec<AriaViolation>,
    /// Passed ARIA checks summarized per rule.
    pub passes: Vec<AriaPass>,
}

/// One ARIA violation with the engine's impact left as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AriaViolation {
    /// Rule identifier.
    pub id: String,
    /// Impact severity exactly as reported, omitted when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    /// Short description of what the rule checks.
    pub description: String,
    /// Human-readable help text.
    pub help: String,
    /// Link to the rule documentation.
    pub help_url: String,
    /// Nodes affected by the violation.
    pub affected_nodes: Vec<ShapedNode>,
}

/// Per-rule summary of passed ARIA checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AriaPass {
    /// Rule identifier.
    pub id: String,
    /// Short description of what the rule checks.
    pub description: String,
    /// Human-readable help text.
    pub help: String,
    /// Number of nodes that passed the rule.
    pub nodes: usize,
}

/// Output shape for the orientation lock check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrientationReport {
    /// Whether any orientation lock was detected.
    pub has_orientation_lock: bool,
    /// Qualifying viewport violations in full detail.
    pub viewport_issues: Vec<ShapedViolation>,
    /// Whether a CSS orientation lock was detected in stylesheets.
    pub has_css_orientation_lock: bool,
    /// WCAG criterion covered by this check.
    pub wcag_criteria: String,
    /// Documentation link for the criterion.
    pub help_url: String,
}

/// Output shape for the color contrast check.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContrastReport {
    /// Foreground color exactly as supplied by the caller.
    pub foreground_input: String,
    /// Background color exactly as supplied by the caller.
    pub background_input: String,
    /// Method used to obtain the ratio.
    pub method: String,
    /// Normalized colors, ratio, and threshold assessment.
    #[serde(flatten)]
    pub assessment: ContrastAssessment,
}

// ============================================================================
// SECTION: Shaping
// ============================================================================

impl AuditSummary {
    /// Builds the default audit shape from a raw report.
    #[must_use]
    pub fn from_report(report: AccessibilityReport) -> Self {
        Self {
            violations: report.violations.iter().map(shape_violation).collect(),
            passes: report.passes.len(),
            incomplete: report.incomplete.len(),
            inapplicable: report.inapplicable.len(),
            timestamp: report.timestamp,
            url: report.url,
            test_engine: report.test_engine,
            test_runner: report.test_runner,
            test_environment: report.test_environment,
        }
    }
}

impl AriaReport {
    /// Builds the ARIA shape from a raw report.
    #[must_use]
    pub fn from_report(report: &AccessibilityReport) -> Self {
        let violations = report
            .violations
            .iter()
            .map(|violation| AriaViolation {
                id: violation.id.clone(),
                impact: violation.impact.clone(),
                description: violation.description.clone(),
                help: violation.help.clone(),
                help_url: violation.help_url.clone(),
                affected_nodes: violation.nodes.iter().map(shape_node).collect(),
            })
            .collect();
        let passes = report
            .passes
            .iter()
            .map(|pass| AriaPass {
                id: pass.id.clone(),
                description: pass.description.clone(),
                help: pass.help.clone(),
                nodes: pass.nodes.len(),
            })
            .collect();
        Self {
            violations,
            passes,
        }
    }
}

impl OrientationReport {
    /// Builds the orientation shape from a raw report and the outcome of the
    /// stylesheet scan.
    ///
    /// A qualifying violation is a `meta-viewport` violation with at least
    /// one node whose markup contains an orientation or scaling lock marker.
    #[must_use]
    pub fn from_report(report: &AccessibilityReport, has_css_orientation_lock: bool) -> Self {
        let viewport_issues: Vec<ShapedViolation> = report
            .violations
            .iter()
            .filter(|violation| violation.id == META_VIEWPORT_RULE && has_lock_marker(violation))
            .map(shape_violation)
            .collect();
        Self {
            has_orientation_lock: !viewport_issues.is_empty() || has_css_orientation_lock,
            viewport_issues,
            has_css_orientation_lock,
            wcag_criteria: ORIENTATION_WCAG_CRITERIA.to_string(),
            help_url: ORIENTATION_HELP_URL.to_string(),
        }
    }
}

impl ContrastReport {
    /// Builds the contrast shape from the caller's raw inputs and a
    /// completed assessment.
    #[must_use]
    pub fn new(foreground_input: &str, background_input: &str, assessment: ContrastAssessment) -> Self {
        Self {
            foreground_input: foreground_input.to_string(),
            background_input: background_input.to_string(),
            method: CONTRAST_METHOD.to_string(),
            assessment,
        }
    }
}

/// Projects one raw violation into the stable shape with defaults applied.
fn shape_violation(violation: &RawCheckResult) -> ShapedViolation {
    ShapedViolation {
        id: violation.id.clone(),
        impact: violation.impact.clone().unwrap_or_else(|| UNKNOWN_IMPACT.to_string()),
        description: violation.description.clone(),
        help: violation.help.clone(),
        help_url: violation.help_url.clone(),
        affected_nodes: violation.nodes.iter().map(shape_node).collect(),
    }
}

/// Projects one raw node into the stable shape with defaults applied.
fn shape_node(node: &RawNode) -> ShapedNode {
    ShapedNode {
        html: node.html.clone(),
        target: node.target.clone(),
        failure_summary: node.failure_summary.clone().unwrap_or_default(),
    }
}

/// Returns whether any node of the violation carries a lock marker.
fn has_lock_marker(violation: &RawCheckResult) -> bool {
    violation.nodes.iter().any(|node| {
        let html = node.html.to_ascii_lowercase();
        ORIENTATION_LOCK_MARKERS.iter().any(|marker| html.contains(marker))
    })
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

    use super::AriaReport;
    use super::AuditSummary;
    use super::ContrastReport;
    use super::OrientationReport;
    use crate::color::ContrastAssessment;
    use crate::color::Rgb;
    use crate::report::AccessibilityReport;

    /// Parses a raw report fixture.
    fn report(value: serde_json::Value) -> AccessibilityReport {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn default_shape_counts_and_defaults() {
        let raw = report(json!({
            "violations": [{
                "id": "image-alt",
                "description": "Images must have alternate text",
                "help": "Images must have alternate text",
                "helpUrl": "https://dequeuniversity.com/rules/axe/4.10/image-alt",
                "nodes": [{"html": "<img src=\"x.jpg\">", "target": ["img"]}]
            }],
            "passes": [{"id": "document-title"}, {"id": "html-has-lang"}],
            "incomplete": [{"id": "color-contrast"}],
            "inapplicable": [],
            "url": "https://example.com/",
            "timestamp": "2026-02-11T08:00:00.000Z"
        }));
        let shaped = AuditSummary::from_report(raw);
        assert_eq!(shaped.passes, 2);
        assert_eq!(shaped.incomplete, 1);
        assert_eq!(shaped.inapplicable, 0);
        assert_eq!(shaped.violations[0].impact, "unknown");
        assert_eq!(shaped.violations[0].affected_nodes[0].failure_summary, "");
    }

    #[test]
    fn aria_shape_keeps_impact_untouched_and_counts_pass_nodes() {
        let raw = report(json!({
            "violations": [{"id": "aria-valid-attr", "nodes": []}],
            "passes": [{
                "id": "aria-roles",
                "description": "ARIA roles must be valid",
                "help": "ARIA roles used must conform to valid values",
                "nodes": [{"html": "<div role=\"main\">"}, {"html": "<div role=\"banner\">"}]
            }]
        }));
        let shaped = AriaReport::from_report(&raw);
        assert!(shaped.violations[0].impact.is_none());
        assert_eq!(shaped.passes[0].nodes, 2);
    }

    #[test]
    fn orientation_shape_requires_lock_marker() {
        let raw = report(json!({
            "violations": [{
                "id": "meta-viewport",
                "impact": "critical",
                "nodes": [{"html": "<meta name=\"viewport\" content=\"width=device-width\">"}]
            }]
        }));
        let shaped = OrientationReport::from_report(&raw, false);
        assert!(!shaped.has_orientation_lock);
        assert!(shaped.viewport_issues.is_empty());
    }

    #[test]
    fn orientation_shape_flags_scaling_lock() {
        let raw = report(json!({
            "violations": [{
                "id": "meta-viewport",
                "impact": "critical",
                "nodes": [{"html": "<meta name=\"viewport\" content=\"user-scalable=NO\">"}]
            }]
        }));
        let shaped = OrientationReport::from_report(&raw, false);
        assert!(shaped.has_orientation_lock);
        assert_eq!(shaped.viewport_issues.len(), 1);
    }

    #[test]
    fn orientation_shape_honors_css_lock_alone() {
        let shaped = OrientationReport::from_report(&report(json!({})), true);
        assert!(shaped.has_orientation_lock);
        assert!(shaped.has_css_orientation_lock);
        assert!(shaped.viewport_issues.is_empty());
    }

    #[test]
    fn contrast_shape_echoes_inputs_and_flattens_assessment() {
        let assessment =
            ContrastAssessment::assess(Rgb::new(0, 0, 0), Rgb::new(255, 255, 255), 16.0, false);
        let shaped = ContrastReport::new("rgb(0,0,0)", "#FFFFFF", assessment);
        let value = serde_json::to_value(&shaped).unwrap();
        assert_eq!(value["foregroundInput"], "rgb(0,0,0)");
        assert_eq!(value["method"], "relative-luminance");
        assert_eq!(value["foregroundColor"], "#000000");
        assert_eq!(value["contrastRatio"], 21.0);
        assert_eq!(value["passesAA"], true);
    }
}
