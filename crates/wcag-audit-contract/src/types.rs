// wcag-audit-contract/src/types.rs
// ============================================================================
// Module: Contract Types
// Description: Tool name, definition, and contract shapes.
// Purpose: Provide stable serializable types for the MCP tool catalog.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! These types describe the audit server's tool surface. [`ToolDefinition`]
//! is the shape returned by `tools/list`; [`ToolContract`] adds output
//! schemas, examples, and notes for documentation generation.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Tool Names
// ============================================================================

/// Canonical MCP tool names exposed by the audit server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolName {
    /// Audit a URL with the full rules engine.
    TestAccessibility,
    /// Audit a literal HTML string with the full rules engine.
    TestHtmlString,
    /// List the engine's rule catalog, optionally filtered by tag.
    GetRules,
    /// Assess WCAG contrast for a foreground/background pair.
    CheckColorContrast,
    /// Audit a literal HTML string against the ARIA rule subset.
    CheckAriaAttributes,
    /// Detect viewport or CSS orientation locks in a literal HTML string.
    CheckOrientationLock,
}

impl ToolName {
    /// Returns the canonical string name for the tool.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TestAccessibility => "test_accessibility",
            Self::TestHtmlString => "test_html_string",
            Self::GetRules => "get_rules",
            Self::CheckColorContrast => "check_color_contrast",
            Self::CheckAriaAttributes => "check_aria_attributes",
            Self::CheckOrientationLock => "check_orientation_lock",
        }
    }

    /// Parses a tool name from its canonical string form.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "test_accessibility" => Some(Self::TestAccessibility),
            "test_html_string" => Some(Self::TestHtmlString),
            "get_rules" => Some(Self::GetRules),
            "check_color_contrast" => Some(Self::CheckColorContrast),
            "check_aria_attributes" => Some(Self::CheckAriaAttributes),
            "check_orientation_lock" => Some(Self::CheckOrientationLock),
            _ => None,
        }
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Tool Definitions
// ============================================================================

/// Tool definition shape used by MCP tool listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    /// MCP tool name.
    pub name: ToolName,
    /// Tool description for clients.
    pub description: String,
    /// JSON schema for tool input.
    pub input_schema: Value,
}

/// Tool contract with full request and response schemas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolContract {
    /// Tool name.
    pub name: ToolName,
    /// Tool description.
    pub description: String,
    /// JSON schema for tool input payload.
    pub input_schema: Value,
    /// JSON schema for tool response payload.
    pub output_schema: Value,
    /// Example payloads for documentation.
    pub examples: Vec<ToolExample>,
    /// Notes describing tool usage.
    pub notes: Vec<String>,
}

impl ToolContract {
    /// Projects the contract onto the listing shape.
    #[must_use]
    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name,
            description: self.description.clone(),
            input_schema: self.input_schema.clone(),
        }
    }
}

/// Tool example with input/output payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolExample {
    /// Short example description.
    pub description: String,
    /// Example input payload.
    pub input: Value,
    /// Example output payload.
    pub output: Value,
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

    use super::ToolName;

    #[test]
    fn tool_names_round_trip_through_strings() {
        for name in [
            ToolName::TestAccessibility,
            ToolName::TestHtmlString,
            ToolName::GetRules,
            ToolName::CheckColorContrast,
            ToolName::CheckAriaAttributes,
            ToolName::CheckOrientationLock,
        ] {
            assert_eq!(ToolName::parse(name.as_str()), Some(name));
        }
    }

    #[test]
    fn unknown_tool_name_does_not_parse() {
        assert_eq!(ToolName::parse("take_screenshot"), None);
    }

    #[test]
    fn tool_names_serialize_snake_case() {
        let json = serde_json::to_string(&ToolName::CheckColorContrast).unwrap();
        assert_eq!(json, "\"check_color_contrast\"");
    }
}
