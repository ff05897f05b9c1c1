// wcag-audit-mcp/src/lib.rs
// ============================================================================
// Module: WCAG Audit MCP Library
// Description: MCP server crate for the WCAG Audit tool surface.
// Purpose: Expose configuration, browser sessions, engine adapter, and server.
// Dependencies: crate::{config, engine, server, session, tools}
// ============================================================================

//! ## Overview
//! `wcag-audit-mcp` exposes browser-based accessibility auditing as MCP
//! tools over JSON-RPC 2.0. Each tool call is an independent unit of work:
//! the session runner launches its own headless browser, loads the target
//! content, delegates analysis to the rules engine injected into the page,
//! and releases the browser on every exit path. The tool router validates
//! arguments before any browser work and maps failures onto the JSON-RPC
//! error taxonomy.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod engine;
pub mod server;
pub mod session;
pub mod tools;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::ConfigError;
pub use config::ServerTransport;
pub use config::WcagAuditConfig;
pub use server::McpServer;
pub use server::McpServerError;
pub use tools::ToolError;
pub use tools::ToolRouter;
