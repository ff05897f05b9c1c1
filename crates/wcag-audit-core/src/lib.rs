// wcag-audit-core/src/lib.rs
// ============================================================================
// Module: WCAG Audit Core Library
// Description: Public API surface for the WCAG Audit core.
// Purpose: Expose color math, engine report model, shaping, and rule catalog.
// Dependencies: crate::{color, report, rules, shape}
// ============================================================================

//! ## Overview
//! WCAG Audit core provides the pure logic of the audit surface: color
//! parsing and WCAG contrast math, the explicit data contract for raw
//! accessibility-engine reports, the shaping of those reports into the
//! stable tool output schemas, and the static rule catalog. It has no
//! dependency on the browser or the transport layers.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod color;
pub mod report;
pub mod rules;
pub mod shape;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use color::ColorError;
pub use color::ContrastAssessment;
pub use color::Rgb;
pub use color::contrast_ratio;
pub use color::hsv_to_rgb;
pub use color::parse_color;
pub use color::rgb_to_hex;
pub use report::AccessibilityReport;
pub use report::EngineMetadata;
pub use report::RawCheckResult;
pub use report::RawNode;
pub use rules::ARIA_RULE_IDS;
pub use rules::CatalogError;
pub use rules::RuleCatalog;
pub use rules::RuleDescriptor;
pub use shape::AriaReport;
pub use shape::AuditSummary;
pub use shape::ContrastReport;
pub use shape::OrientationReport;
pub use shape::ShapedViolation;
