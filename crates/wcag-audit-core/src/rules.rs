// wcag-audit-core/src/rules.rs
// ============================================================================
// Module: Rule Catalog
// Description: Static catalog of the rules engine's rule metadata.
// Purpose: Serve rule listing queries without touching the browser.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! The rules engine exposes a static rule catalog (`get_rules`) that is
//! independent of any page analysis. The engine itself only runs inside a
//! browser page, so the catalog ships as checked-in engine metadata and is
//! embedded at compile time. Each entry mirrors the engine's own rule
//! descriptor: identifier, description, help text, documentation link, and
//! selection tags. The catalog is loaded once and read-only thereafter.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Embedded rule metadata for the bundled engine version.
const BUNDLED_RULES: &str = include_str!("../assets/rules.json");

/// Rule allowlist used by the ARIA attribute check.
pub const ARIA_RULE_IDS: [&str; 8] = [
    "aria-allowed-attr",
    "aria-hidden-body",
    "aria-required-attr",
    "aria-required-children",
    "aria-required-parent",
    "aria-roles",
    "aria-valid-attr",
    "aria-valid-attr-value",
];

// ============================================================================
// SECTION: Catalog Types
// ============================================================================

/// Metadata for one engine rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDescriptor {
    /// Rule identifier.
    pub rule_id: String,
    /// Short description of what the rule checks.
    pub description: String,
    /// Human-readable help text.
    pub help: String,
    /// Link to the rule documentation.
    pub help_url: String,
    /// Tags selecting this rule (WCAG levels, categories).
    pub tags: Vec<String>,
}

/// The engine's static rule catalog.
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    /// All known rules in catalog order.
    rules: Vec<RuleDescriptor>,
}

/// Rule catalog errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The embedded catalog asset failed to parse.
    #[error("rule catalog parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}

impl RuleCatalog {
    /// Loads the catalog bundled with this build.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] when the embedded asset is malformed.
    pub fn bundled() -> Result<Self, CatalogError> {
        let rules: Vec<RuleDescriptor> = serde_json::from_str(BUNDLED_RULES)?;
        Ok(Self {
            rules,
        })
    }

    /// Returns all rules in catalog order.
    #[must_use]
    pub fn rules(&self) -> &[RuleDescriptor] {
        &self.rules
    }

    /// Returns rules matching any of the given tags; an empty filter
    /// returns the whole catalog.
    #[must_use]
    pub fn filtered(&self, tags: &[String]) -> Vec<RuleDescriptor> {
        if tags.is_empty() {
            return self.rules.clone();
        }
        self.rules
            .iter()
            .filter(|rule| rule.tags.iter().any(|tag| tags.contains(tag)))
            .cloned()
            .collect()
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

    use super::ARIA_RULE_IDS;
    use super::RuleCatalog;

    #[test]
    fn bundled_catalog_parses_and_is_nonempty() {
        let catalog = RuleCatalog::bundled().unwrap();
        assert!(catalog.rules().len() >= 20);
    }

    #[test]
    fn catalog_contains_every_aria_allowlist_rule() {
        let catalog = RuleCatalog::bundled().unwrap();
        for id in ARIA_RULE_IDS {
            assert!(
                catalog.rules().iter().any(|rule| rule.rule_id == id),
                "missing aria rule {id}"
            );
        }
    }

    #[test]
    fn tag_filter_selects_matching_rules_only() {
        let catalog = RuleCatalog::bundled().unwrap();
        let filtered = catalog.filtered(&["wcag2aa".to_string()]);
        assert!(!filtered.is_empty());
        assert!(filtered.iter().all(|rule| rule.tags.iter().any(|tag| tag == "wcag2aa")));
        assert!(filtered.len() < catalog.rules().len());
    }

    #[test]
    fn empty_tag_filter_returns_full_catalog() {
        let catalog = RuleCatalog::bundled().unwrap();
        assert_eq!(catalog.filtered(&[]).len(), catalog.rules().len());
    }
}
