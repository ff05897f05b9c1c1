// wcag-audit-contract/src/lib.rs
// ============================================================================
// Module: WCAG Audit Contract Library
// Description: Canonical tool names, definitions, and schemas.
// Purpose: Single source of truth for the MCP tool surface.
// Dependencies: crate::{tooling, types}
// ============================================================================

//! ## Overview
//! `wcag-audit-contract` defines the canonical MCP tool surface of the audit
//! server: tool names, client-facing definitions, and full contracts with
//! input/output schemas and usage notes. The catalog is pure data, defined
//! once at process start and returned verbatim to tool-listing queries.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod tooling;
pub mod types;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use tooling::tool_contracts;
pub use tooling::tool_definitions;
pub use types::ToolContract;
pub use types::ToolDefinition;
pub use types::ToolExample;
pub use types::ToolName;
