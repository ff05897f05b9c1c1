// wcag-audit-mcp/tests/tool_router.rs
// ============================================================================
// Module: Tool Router Integration Tests
// Description: End-to-end tool dispatch tests without a live browser.
// Purpose: Verify validation, catalog, and contrast paths of the router.
// Dependencies: serde_json, tokio, wcag-audit-mcp
// ============================================================================

//! Integration tests for the MCP tool router: end-to-end tool dispatch,
//! validation, catalog, and contrast paths without a live browser.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "Test-only panic-based assertions."
)]

use serde_json::Value;
use serde_json::json;
use wcag_audit_mcp::ToolError;
use wcag_audit_mcp::ToolRouter;
use wcag_audit_mcp::WcagAuditConfig;

/// Builds a router over default configuration.
fn router() -> ToolRouter {
    ToolRouter::new(WcagAuditConfig::default()).expect("bundled catalog loads")
}

#[tokio::test]
async fn unknown_tool_is_rejected() {
    let result = router().handle_tool_call("no_such_tool", json!({})).await;
    assert!(matches!(result, Err(ToolError::UnknownTool)));
}

#[tokio::test]
async fn missing_url_fails_before_any_browser_work() {
    let result = router().handle_tool_call("test_accessibility", json!({})).await;
    assert!(matches!(result, Err(ToolError::InvalidParams(_))));
}

#[tokio::test]
async fn blank_url_is_invalid() {
    let result =
        router().handle_tool_call("test_accessibility", json!({"url": "   "})).await;
    assert!(matches!(result, Err(ToolError::InvalidParams(_))));
}

#[tokio::test]
async fn unparseable_url_is_invalid() {
    let result =
        router().handle_tool_call("test_accessibility", json!({"url": "not a url"})).await;
    assert!(matches!(result, Err(ToolError::InvalidParams(_))));
}

#[tokio::test]
async fn empty_html_is_invalid_for_aria_check() {
    let result = router().handle_tool_call("check_aria_attributes", json!({"html": ""})).await;
    assert!(matches!(result, Err(ToolError::InvalidParams(_))));
}

#[tokio::test]
async fn empty_html_is_invalid_for_orientation_check() {
    let result =
        router().handle_tool_call("check_orientation_lock", json!({"html": " \n "})).await;
    assert!(matches!(result, Err(ToolError::InvalidParams(_))));
}

#[tokio::test]
async fn malformed_color_is_invalid_and_echoed() {
    let result = router()
        .handle_tool_call(
            "check_color_contrast",
            json!({"foreground": "not-a-color", "background": "#ffffff"}),
        )
        .await;
    match result {
        Err(ToolError::InvalidParams(message)) => assert!(message.contains("not-a-color")),
        other => panic!("expected invalid params, got {other:?}"),
    }
}

#[tokio::test]
async fn black_on_white_passes_both_levels_at_default_size() {
    let value = router()
        .handle_tool_call(
            "check_color_contrast",
            json!({"foreground": "#000000", "background": "#ffffff"}),
        )
        .await
        .expect("contrast succeeds");
    assert_eq!(value["contrastRatio"], json!(21.0));
    assert_eq!(value["passesAA"], json!(true));
    assert_eq!(value["passesAAA"], json!(true));
    assert_eq!(value["isLargeText"], json!(false));
    assert_eq!(value["requiredRatioAA"], json!(4.5));
    assert_eq!(value["method"], json!("relative-luminance"));
    assert_eq!(value["foregroundInput"], json!("#000000"));
    assert_eq!(value["foregroundColor"], json!("#000000"));
}

#[tokio::test]
async fn large_text_lowers_the_required_ratios() {
    let value = router()
        .handle_tool_call(
            "check_color_contrast",
            json!({
                "foreground": "rgb(0, 0, 0)",
                "background": "rgb(255, 255, 255)",
                "fontSize": 24
            }),
        )
        .await
        .expect("contrast succeeds");
    assert_eq!(value["isLargeText"], json!(true));
    assert_eq!(value["requiredRatioAA"], json!(3.0));
    assert_eq!(value["requiredRatioAAA"], json!(4.5));
}

#[tokio::test]
async fn bold_fourteen_pixel_text_counts_as_large() {
    let value = router()
        .handle_tool_call(
            "check_color_contrast",
            json!({
                "foreground": "#767676",
                "background": "#ffffff",
                "fontSize": 14,
                "isBold": true
            }),
        )
        .await
        .expect("contrast succeeds");
    assert_eq!(value["isLargeText"], json!(true));
}

#[tokio::test]
async fn non_positive_font_size_is_invalid() {
    let result = router()
        .handle_tool_call(
            "check_color_contrast",
            json!({"foreground": "#000", "background": "#fff", "fontSize": 0}),
        )
        .await;
    assert!(matches!(result, Err(ToolError::InvalidParams(_))));
}

#[tokio::test]
async fn get_rules_without_tags_returns_the_full_catalog() {
    let value = router().handle_tool_call("get_rules", json!({})).await.expect("rules load");
    let rules = value.as_array().expect("rules array");
    assert!(!rules.is_empty());
    assert!(rules.iter().any(|rule| rule["ruleId"] == json!("color-contrast")));
}

#[tokio::test]
async fn get_rules_filters_by_any_matching_tag() {
    let value = router()
        .handle_tool_call("get_rules", json!({"tags": ["cat.aria"]}))
        .await
        .expect("rules load");
    let rules = value.as_array().expect("rules array");
    assert!(!rules.is_empty());
    for rule in rules {
        let tags: Vec<Value> = rule["tags"].as_array().expect("tags array").clone();
        assert!(tags.contains(&json!("cat.aria")), "rule lacks tag: {rule}");
    }
}

#[test]
fn tool_listing_is_complete_and_stable() {
    let names: Vec<&str> = router()
        .list_tools()
        .into_iter()
        .map(|definition| definition.name.as_str())
        .collect();
    assert_eq!(names, vec![
        "test_accessibility",
        "test_html_string",
        "get_rules",
        "check_color_contrast",
        "check_aria_attributes",
        "check_orientation_lock",
    ]);
}
