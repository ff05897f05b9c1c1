// wcag-audit-contract/src/tooling.rs
// ============================================================================
// Module: MCP Tool Contracts
// Description: Canonical MCP tool definitions and schemas for WCAG Audit.
// Purpose: Provide tool contracts for docs and MCP listing.
// Dependencies: serde_json, crate::types
// ============================================================================

//! ## Overview
//! This module defines the canonical MCP tool surface: six audit tools with
//! strict JSON input/output schemas. Tool contracts drive both `tools/list`
//! responses and generated documentation. The dispatcher performs its own
//! required-field validation; the schemas here are hints for clients, which
//! cannot be trusted to enforce them.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;
use serde_json::json;

use crate::types::ToolContract;
use crate::types::ToolDefinition;
use crate::types::ToolExample;
use crate::types::ToolName;

// ============================================================================
// SECTION: Tool Contracts
// ============================================================================

/// Returns the canonical MCP tool contracts.
///
/// The order is intentional: it is preserved in tool listings and generated
/// docs to keep diffs stable across releases. Append new tools at the end.
#[must_use]
pub fn tool_contracts() -> Vec<ToolContract> {
    vec![
        test_accessibility_contract(),
        test_html_string_contract(),
        get_rules_contract(),
        check_color_contrast_contract(),
        check_aria_attributes_contract(),
        check_orientation_lock_contract(),
    ]
}

/// Returns the tool catalog in the listing shape.
#[must_use]
pub fn tool_definitions() -> Vec<ToolDefinition> {
    tool_contracts().iter().map(ToolContract::definition).collect()
}

/// Builds the tool contract for `test_accessibility`.
fn test_accessibility_contract() -> ToolContract {
    build_tool_contract(
        ToolName::TestAccessibility,
        "Load a URL in a headless browser and audit it against the accessibility rules engine, \
         optionally scoped by WCAG or category tags.",
        tool_input_schema(
            &json!({
                "url": schema_for_string("URL of the page to audit."),
                "tags": schema_for_string_array("Optional rule tags (e.g. wcag2a, wcag2aa, best-practice) selecting the rules to run.")
            }),
            &["url"],
        ),
        audit_summary_schema(),
        vec![ToolExample {
            description: "Audit a page against WCAG 2.0 A and AA rules.".to_string(),
            input: json!({"url": "https://example.com/", "tags": ["wcag2a", "wcag2aa"]}),
            output: json!({
                "violations": [],
                "passes": 31,
                "incomplete": 0,
                "inapplicable": 48,
                "timestamp": "2026-02-11T08:00:00.000Z",
                "url": "https://example.com/",
                "testEngine": {"name": "axe-core", "version": "4.10.2"}
            }),
        }],
        vec![
            "Each call launches its own browser instance; no state is shared between calls."
                .to_string(),
            "An empty tags array runs the engine's default rule set.".to_string(),
            "Navigation is bounded by the configured navigation timeout.".to_string(),
        ],
    )
}

/// Builds the tool contract for `test_html_string`.
fn test_html_string_contract() -> ToolContract {
    build_tool_contract(
        ToolName::TestHtmlString,
        "Inject a literal HTML string into a headless browser page and audit it against the \
         accessibility rules engine, optionally scoped by tags.",
        tool_input_schema(
            &json!({
                "html": schema_for_string("Literal HTML markup to audit."),
                "tags": schema_for_string_array("Optional rule tags selecting the rules to run.")
            }),
            &["html"],
        ),
        audit_summary_schema(),
        vec![ToolExample {
            description: "Audit a fragment with a missing text alternative.".to_string(),
            input: json!({"html": "<img src='x.jpg'>"}),
            output: json!({
                "violations": [{
                    "id": "image-alt",
                    "impact": "critical",
                    "description": "Ensure <img> elements have alternate text",
                    "help": "Images must have alternate text",
                    "helpUrl": "https://dequeuniversity.com/rules/axe/4.10/image-alt",
                    "affectedNodes": [{"html": "<img src=\"x.jpg\">", "target": ["img"], "failureSummary": "Fix any of the following: Element does not have an alt attribute"}]
                }],
                "passes": 2,
                "incomplete": 0,
                "inapplicable": 60
            }),
        }],
        vec!["Markup is loaded as the page document, not appended to an existing page."
            .to_string()],
    )
}

/// Builds the tool contract for `get_rules`.
fn get_rules_contract() -> ToolContract {
    build_tool_contract(
        ToolName::GetRules,
        "List the accessibility rules engine's rule catalog, optionally filtered by tag. Does \
         not launch a browser.",
        tool_input_schema(
            &json!({
                "tags": schema_for_string_array("Optional rule tags; rules matching any tag are returned.")
            }),
            &[],
        ),
        json!({
            "type": "array",
            "items": object_schema(
                &json!({
                    "ruleId": schema_for_string("Rule identifier."),
                    "description": schema_for_string("What the rule checks."),
                    "help": schema_for_string("Human-readable help text."),
                    "helpUrl": schema_for_string("Rule documentation link."),
                    "tags": schema_for_string_array("Tags selecting this rule.")
                }),
                &["ruleId", "description", "help", "helpUrl", "tags"],
            )
        }),
        vec![ToolExample {
            description: "List AA-level contrast rules.".to_string(),
            input: json!({"tags": ["wcag2aa"]}),
            output: json!([{
                "ruleId": "color-contrast",
                "description": "Ensure the contrast between foreground and background colors meets WCAG 2 AA minimum thresholds",
                "help": "Elements must meet minimum color contrast ratio thresholds",
                "helpUrl": "https://dequeuniversity.com/rules/axe/4.10/color-contrast",
                "tags": ["cat.color", "wcag2aa", "wcag143"]
            }]),
        }],
        vec!["Served from the bundled engine rule metadata.".to_string()],
    )
}

/// Builds the tool contract for `check_color_contrast`.
fn check_color_contrast_contract() -> ToolContract {
    build_tool_contract(
        ToolName::CheckColorContrast,
        "Compute the WCAG contrast ratio for a foreground/background color pair and assess it \
         against the AA and AAA thresholds for the given font size and weight.",
        tool_input_schema(
            &json!({
                "foreground": schema_for_string("Foreground color as #RGB, #RRGGBB, rgb(r,g,b), or hsv(h,s%,v%)."),
                "background": schema_for_string("Background color in the same notations."),
                "fontSize": {
                    "type": "number",
                    "description": "Font size in CSS pixels.",
                    "default": 16
                },
                "isBold": {
                    "type": "boolean",
                    "description": "Whether the text is bold.",
                    "default": false
                }
            }),
            &["foreground", "background"],
        ),
        object_schema(
            &json!({
                "foregroundInput": schema_for_string("Foreground color exactly as supplied."),
                "backgroundInput": schema_for_string("Background color exactly as supplied."),
                "method": schema_for_string("Method used to obtain the ratio."),
                "foregroundColor": schema_for_string("Normalized foreground color as #rrggbb."),
                "backgroundColor": schema_for_string("Normalized background color as #rrggbb."),
                "fontSizePx": {"type": "number", "description": "Font size in CSS pixels."},
                "isBold": {"type": "boolean", "description": "Whether the text is bold."},
                "contrastRatio": {"type": "number", "description": "Contrast ratio rounded to two decimals."},
                "isLargeText": {"type": "boolean", "description": "Whether the text qualifies as WCAG large text."},
                "requiredRatioAA": {"type": "number", "description": "Required ratio for AA conformance."},
                "requiredRatioAAA": {"type": "number", "description": "Required ratio for AAA conformance."},
                "passesAA": {"type": "boolean", "description": "Whether the pair meets AA."},
                "passesAAA": {"type": "boolean", "description": "Whether the pair meets AAA."}
            }),
            &[
                "foregroundInput",
                "backgroundInput",
                "method",
                "foregroundColor",
                "backgroundColor",
                "fontSizePx",
                "isBold",
                "contrastRatio",
                "isLargeText",
                "requiredRatioAA",
                "requiredRatioAAA",
                "passesAA",
                "passesAAA",
            ],
        ),
        vec![ToolExample {
            description: "Black text on a white background at the default size.".to_string(),
            input: json!({"foreground": "#000000", "background": "#FFFFFF"}),
            output: json!({
                "foregroundInput": "#000000",
                "backgroundInput": "#FFFFFF",
                "method": "relative-luminance",
                "foregroundColor": "#000000",
                "backgroundColor": "#ffffff",
                "fontSizePx": 16.0,
                "isBold": false,
                "contrastRatio": 21.0,
                "isLargeText": false,
                "requiredRatioAA": 4.5,
                "requiredRatioAAA": 7.0,
                "passesAA": true,
                "passesAAA": true
            }),
        }],
        vec![
            "The ratio is computed directly from relative luminance; no browser is launched."
                .to_string(),
            "Large text (>= 18px, or >= 14px bold) lowers the required ratios to 3.0 (AA) and \
             4.5 (AAA)."
                .to_string(),
        ],
    )
}

/// Builds the tool contract for `check_aria_attributes`.
fn check_aria_attributes_contract() -> ToolContract {
    build_tool_contract(
        ToolName::CheckAriaAttributes,
        "Audit a literal HTML string against the ARIA attribute rule subset (allowed, required, \
         and valid ARIA attributes, roles, and containment).",
        tool_input_schema(
            &json!({
                "html": schema_for_string("Literal HTML markup to audit.")
            }),
            &["html"],
        ),
        object_schema(
            &json!({
                "violations": {"type": "array", "description": "ARIA violations with affected nodes."},
                "passes": {"type": "array", "description": "Passed ARIA checks summarized per rule."}
            }),
            &["violations", "passes"],
        ),
        vec![],
        vec!["Runs only the eight ARIA rules; other engine rules are disabled.".to_string()],
    )
}

/// Builds the tool contract for `check_orientation_lock`.
fn check_orientation_lock_contract() -> ToolContract {
    build_tool_contract(
        ToolName::CheckOrientationLock,
        "Detect orientation locks in a literal HTML string: viewport meta restrictions reported \
         by the rules engine plus orientation media queries in reachable stylesheets.",
        tool_input_schema(
            &json!({
                "html": schema_for_string("Literal HTML markup to audit.")
            }),
            &["html"],
        ),
        object_schema(
            &json!({
                "hasOrientationLock": {"type": "boolean", "description": "Whether any orientation lock was detected."},
                "viewportIssues": {"type": "array", "description": "Qualifying viewport violations."},
                "hasCssOrientationLock": {"type": "boolean", "description": "Whether a stylesheet orientation lock was detected."},
                "wcagCriteria": schema_for_string("WCAG criterion covered by this check."),
                "helpUrl": schema_for_string("Documentation link for the criterion.")
            }),
            &[
                "hasOrientationLock",
                "viewportIssues",
                "hasCssOrientationLock",
                "wcagCriteria",
                "helpUrl",
            ],
        ),
        vec![],
        vec![
            "Cross-origin stylesheets that cannot be inspected are treated as having no lock."
                .to_string(),
        ],
    )
}

// ============================================================================
// SECTION: Schema Helpers
// ============================================================================

/// Builds a tool contract from its parts.
fn build_tool_contract(
    name: ToolName,
    description: &str,
    input_schema: Value,
    output_schema: Value,
    examples: Vec<ToolExample>,
    notes: Vec<String>,
) -> ToolContract {
    ToolContract {
        name,
        description: description.to_string(),
        input_schema,
        output_schema,
        examples,
        notes,
    }
}

/// Builds a standard tool input schema wrapper.
#[must_use]
fn tool_input_schema(properties: &Value, required: &[&str]) -> Value {
    object_schema(properties, required)
}

/// Builds an object schema with required fields and closed properties.
fn object_schema(properties: &Value, required: &[&str]) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false
    })
}

/// Returns a JSON schema for strings.
#[must_use]
fn schema_for_string(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description
    })
}

/// Returns a JSON schema for string arrays.
#[must_use]
fn schema_for_string_array(description: &str) -> Value {
    json!({
        "type": "array",
        "items": { "type": "string" },
        "description": description
    })
}

/// Returns the output schema shared by the full-page audit tools.
fn audit_summary_schema() -> Value {
    object_schema(
        &json!({
            "violations": {"type": "array", "description": "Violations with affected nodes."},
            "passes": {"type": "integer", "description": "Count of passed checks."},
            "incomplete": {"type": "integer", "description": "Count of inconclusive checks."},
            "inapplicable": {"type": "integer", "description": "Count of inapplicable checks."},
            "timestamp": schema_for_string("Analysis timestamp reported by the engine."),
            "url": schema_for_string("URL of the analyzed page."),
            "testEngine": {"type": "object", "description": "Engine name and version."},
            "testRunner": {"description": "Runner metadata passthrough."},
            "testEnvironment": {"description": "Environment metadata passthrough."}
        }),
        &["violations", "passes", "incomplete", "inapplicable"],
    )
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

    use super::tool_contracts;
    use super::tool_definitions;
    use crate::types::ToolName;

    #[test]
    fn catalog_lists_exactly_six_tools_in_stable_order() {
        let names: Vec<ToolName> =
            tool_contracts().iter().map(|contract| contract.name).collect();
        assert_eq!(
            names,
            vec![
                ToolName::TestAccessibility,
                ToolName::TestHtmlString,
                ToolName::GetRules,
                ToolName::CheckColorContrast,
                ToolName::CheckAriaAttributes,
                ToolName::CheckOrientationLock,
            ]
        );
    }

    #[test]
    fn every_contract_has_object_input_schema() {
        for contract in tool_contracts() {
            assert_eq!(
                contract.input_schema["type"], "object",
                "tool {} input schema must be an object",
                contract.name
            );
            assert!(
                contract.input_schema["required"].is_array(),
                "tool {} must declare required fields",
                contract.name
            );
        }
    }

    #[test]
    fn required_fields_match_the_tool_surface() {
        let contracts = tool_contracts();
        let required = |name: ToolName| -> Vec<String> {
            contracts
                .iter()
                .find(|contract| contract.name == name)
                .map(|contract| {
                    contract.input_schema["required"]
                        .as_array()
                        .into_iter()
                        .flatten()
                        .filter_map(|value| value.as_str().map(str::to_string))
                        .collect()
                })
                .unwrap_or_default()
        };
        assert_eq!(required(ToolName::TestAccessibility), vec!["url"]);
        assert_eq!(required(ToolName::TestHtmlString), vec!["html"]);
        assert!(required(ToolName::GetRules).is_empty());
        assert_eq!(required(ToolName::CheckColorContrast), vec!["foreground", "background"]);
        assert_eq!(required(ToolName::CheckAriaAttributes), vec!["html"]);
        assert_eq!(required(ToolName::CheckOrientationLock), vec!["html"]);
    }

    #[test]
    fn contrast_defaults_are_declared_in_schema() {
        let contracts = tool_contracts();
        let contrast = contracts
            .iter()
            .find(|contract| contract.name == ToolName::CheckColorContrast)
            .unwrap();
        assert_eq!(contrast.input_schema["properties"]["fontSize"]["default"], 16);
        assert_eq!(contrast.input_schema["properties"]["isBold"]["default"], false);
    }

    #[test]
    fn definitions_project_contracts_verbatim() {
        let contracts = tool_contracts();
        let definitions = tool_definitions();
        assert_eq!(contracts.len(), definitions.len());
        for (contract, definition) in contracts.iter().zip(&definitions) {
            assert_eq!(contract.name, definition.name);
            assert_eq!(contract.input_schema, definition.input_schema);
        }
    }
}
