// wcag-audit-mcp/src/config.rs
// ============================================================================
// Module: WCAG Audit Configuration
// Description: Configuration loading and validation for the audit server.
// Purpose: Provide strict, fail-closed config parsing with hard limits.
// Dependencies: serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size limits and
//! bounds on every numeric knob. The navigation timeout is a single
//! explicit setting applied to both URL navigation and HTML injection;
//! there is deliberately no per-call-site timeout policy. Missing or
//! invalid configuration fails closed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
const DEFAULT_CONFIG_NAME: &str = "wcag-audit.toml";
/// Environment variable used to override the config path.
pub(crate) const CONFIG_ENV_VAR: &str = "WCAG_AUDIT_CONFIG";
/// Maximum configuration file size in bytes.
pub(crate) const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Default maximum JSON-RPC body size in bytes.
const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;
/// Maximum allowed JSON-RPC body size in bytes.
const MAX_MAX_BODY_BYTES: usize = 16 * 1024 * 1024;
/// Default navigation timeout in milliseconds.
const DEFAULT_NAVIGATION_TIMEOUT_MS: u64 = 30_000;
/// Minimum allowed navigation timeout in milliseconds.
const MIN_NAVIGATION_TIMEOUT_MS: u64 = 1_000;
/// Maximum allowed navigation timeout in milliseconds.
const MAX_NAVIGATION_TIMEOUT_MS: u64 = 120_000;
/// Default viewport width in pixels.
const DEFAULT_VIEWPORT_WIDTH: u32 = 1280;
/// Default viewport height in pixels.
const DEFAULT_VIEWPORT_HEIGHT: u32 = 1024;
/// Minimum allowed viewport dimension in pixels.
const MIN_VIEWPORT_DIMENSION: u32 = 320;
/// Maximum allowed viewport dimension in pixels.
const MAX_VIEWPORT_DIMENSION: u32 = 7_680;
/// Maximum allowed engine script size in bytes.
pub(crate) const MAX_ENGINE_SCRIPT_BYTES: u64 = 8 * 1024 * 1024;

// ============================================================================
// SECTION: Configuration Types
// ============================================================================

/// WCAG Audit MCP configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WcagAuditConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Browser session configuration.
    #[serde(default)]
    pub browser: BrowserConfig,
    /// Rules engine configuration.
    #[serde(default)]
    pub engine: EngineConfig,
}

/// JSON-RPC server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Transport used to serve JSON-RPC requests.
    #[serde(default)]
    pub transport: ServerTransport,
    /// Bind address, required for the HTTP transport.
    #[serde(default)]
    pub bind: Option<String>,
    /// Maximum allowed request body size in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

/// Supported JSON-RPC transports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerTransport {
    /// JSON-RPC over stdin/stdout with Content-Length framing.
    #[default]
    Stdio,
    /// JSON-RPC over HTTP POST.
    Http,
}

/// Browser session configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BrowserConfig {
    /// Single timeout applied to URL navigation and HTML injection waits.
    #[serde(default = "default_navigation_timeout_ms")]
    pub navigation_timeout_ms: u64,
    /// Viewport width in pixels.
    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,
    /// Viewport height in pixels.
    #[serde(default = "default_viewport_height")]
    pub viewport_height: u32,
    /// Disable the browser sandbox (needed inside some containers).
    #[serde(default)]
    pub no_sandbox: bool,
    /// Explicit browser executable path; auto-detected when unset.
    #[serde(default)]
    pub executable: Option<PathBuf>,
}

/// Rules engine configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    /// Path to the engine's JS bundle injected into analyzed pages.
    #[serde(default)]
    pub script_path: Option<PathBuf>,
}

/// Returns the default maximum body size.
const fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

/// Returns the default navigation timeout.
const fn default_navigation_timeout_ms() -> u64 {
    DEFAULT_NAVIGATION_TIMEOUT_MS
}

/// Returns the default viewport width.
const fn default_viewport_width() -> u32 {
    DEFAULT_VIEWPORT_WIDTH
}

/// Returns the default viewport height.
const fn default_viewport_height() -> u32 {
    DEFAULT_VIEWPORT_HEIGHT
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: ServerTransport::default(),
            bind: None,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            navigation_timeout_ms: DEFAULT_NAVIGATION_TIMEOUT_MS,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            no_sandbox: false,
            executable: None,
        }
    }
}

// ============================================================================
// SECTION: Loading and Validation
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("config read failed for {path}: {message}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying error message.
        message: String,
    },
    /// Config file exceeds the size limit.
    #[error("config file {path} exceeds {limit} bytes")]
    TooLarge {
        /// Path that was rejected.
        path: PathBuf,
        /// Maximum allowed size in bytes.
        limit: usize,
    },
    /// Config file failed to parse as TOML.
    #[error("config parse failed: {0}")]
    Parse(String),
    /// A config value is outside its allowed bounds.
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl WcagAuditConfig {
    /// Loads configuration from the given path, the `WCAG_AUDIT_CONFIG`
    /// environment variable, or `wcag-audit.toml` in the working directory.
    /// A missing default file yields the built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when an explicitly named file is missing or
    /// unreadable, oversized, malformed, or out of bounds.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let explicit = path.map(Path::to_path_buf).or_else(|| {
            env::var(CONFIG_ENV_VAR).ok().filter(|value| !value.is_empty()).map(PathBuf::from)
        });
        let (resolved, required) = match explicit {
            Some(path) => (path, true),
            None => (PathBuf::from(DEFAULT_CONFIG_NAME), false),
        };
        if !resolved.exists() && !required {
            let config = Self::default();
            config.validate()?;
            return Ok(config);
        }
        let metadata = fs::metadata(&resolved).map_err(|err| ConfigError::Read {
            path: resolved.clone(),
            message: err.to_string(),
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE as u64 {
            return Err(ConfigError::TooLarge {
                path: resolved,
                limit: MAX_CONFIG_FILE_SIZE,
            });
        }
        let text = fs::read_to_string(&resolved).map_err(|err| ConfigError::Read {
            path: resolved.clone(),
            message: err.to_string(),
        })?;
        let config: Self = toml::from_str(&text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates all bounds, failing closed on the first violation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when a value is out of bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.max_body_bytes == 0 || self.server.max_body_bytes > MAX_MAX_BODY_BYTES {
            return Err(ConfigError::Invalid(format!(
                "server.max_body_bytes must be in 1..={MAX_MAX_BODY_BYTES}"
            )));
        }
        if self.server.transport == ServerTransport::Http && self.server.bind.is_none() {
            return Err(ConfigError::Invalid(
                "server.bind is required for the http transport".to_string(),
            ));
        }
        let timeout = self.browser.navigation_timeout_ms;
        if !(MIN_NAVIGATION_TIMEOUT_MS..=MAX_NAVIGATION_TIMEOUT_MS).contains(&timeout) {
            return Err(ConfigError::Invalid(format!(
                "browser.navigation_timeout_ms must be in \
                 {MIN_NAVIGATION_TIMEOUT_MS}..={MAX_NAVIGATION_TIMEOUT_MS}"
            )));
        }
        for (label, value) in [
            ("browser.viewport_width", self.browser.viewport_width),
            ("browser.viewport_height", self.browser.viewport_height),
        ] {
            if !(MIN_VIEWPORT_DIMENSION..=MAX_VIEWPORT_DIMENSION).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{label} must be in {MIN_VIEWPORT_DIMENSION}..={MAX_VIEWPORT_DIMENSION}"
                )));
            }
        }
        Ok(())
    }
}

/// Returns an annotated example configuration file.
#[must_use]
pub fn config_toml_example() -> String {
    concat!(
        "# wcag-audit.toml\n",
        "\n",
        "[server]\n",
        "# Transport: \"stdio\" (default) or \"http\".\n",
        "transport = \"stdio\"\n",
        "# Bind address, required for http.\n",
        "# bind = \"127.0.0.1:8591\"\n",
        "max_body_bytes = 1048576\n",
        "\n",
        "[browser]\n",
        "# One timeout governs both URL navigation and HTML injection.\n",
        "navigation_timeout_ms = 30000\n",
        "viewport_width = 1280\n",
        "viewport_height = 1024\n",
        "no_sandbox = false\n",
        "# executable = \"/usr/bin/chromium\"\n",
        "\n",
        "[engine]\n",
        "# Rules engine JS bundle injected into analyzed pages.\n",
        "script_path = \"assets/axe.min.js\"\n",
    )
    .to_string()
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

    use super::ServerTransport;
    use super::WcagAuditConfig;
    use super::config_toml_example;

    #[test]
    fn defaults_validate() {
        let config = WcagAuditConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.transport, ServerTransport::Stdio);
        assert_eq!(config.browser.navigation_timeout_ms, 30_000);
    }

    #[test]
    fn example_config_parses_and_validates() {
        let config: WcagAuditConfig = toml::from_str(&config_toml_example()).unwrap();
        config.validate().unwrap();
        assert_eq!(config.browser.viewport_width, 1280);
        assert!(config.engine.script_path.is_some());
    }

    #[test]
    fn http_transport_requires_bind() {
        let config: WcagAuditConfig =
            toml::from_str("[server]\ntransport = \"http\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_bounds_timeout_is_rejected() {
        let config: WcagAuditConfig =
            toml::from_str("[browser]\nnavigation_timeout_ms = 500\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_reads_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wcag-audit.toml");
        std::fs::write(&path, "[browser]\nnavigation_timeout_ms = 5000\n").unwrap();
        let config = WcagAuditConfig::load(Some(&path)).unwrap();
        assert_eq!(config.browser.navigation_timeout_ms, 5_000);
    }

    #[test]
    fn load_rejects_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(WcagAuditConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn tiny_viewport_is_rejected() {
        let config: WcagAuditConfig =
            toml::from_str("[browser]\nviewport_width = 100\n").unwrap();
        assert!(config.validate().is_err());
    }
}
