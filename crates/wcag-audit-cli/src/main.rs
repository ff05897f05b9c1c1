// wcag-audit-cli/src/main.rs
// ============================================================================
// Module: WCAG Audit CLI Entry Point
// Description: Command dispatcher for the WCAG Audit MCP server and tools.
// Purpose: Provide server startup and offline tool utilities.
// Dependencies: clap, tokio, tracing-subscriber, wcag-audit-mcp
// ============================================================================

//! ## Overview
//! The WCAG Audit CLI starts the MCP server and offers offline utilities
//! for the parts of the tool surface that need no browser: the tool
//! catalog, the rule catalog, the contrast assessment, and an annotated
//! example configuration.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use serde_json::Value;
use thiserror::Error;
use wcag_audit_contract::tool_contracts;
use wcag_audit_contract::tool_definitions;
use wcag_audit_core::ContrastAssessment;
use wcag_audit_core::ContrastReport;
use wcag_audit_core::RuleCatalog;
use wcag_audit_core::parse_color;
use wcag_audit_mcp::McpServer;
use wcag_audit_mcp::WcagAuditConfig;
use wcag_audit_mcp::config::config_toml_example;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "wcag-audit", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the WCAG Audit MCP server.
    Serve(ServeCommand),
    /// Print the MCP tool catalog.
    Tools(ToolsCommand),
    /// Print the engine rule catalog.
    Rules(RulesCommand),
    /// Assess WCAG color contrast for one color pair.
    Contrast(ContrastCommand),
    /// Configuration utilities.
    Config {
        /// Selected config subcommand.
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Arguments for the `serve` command.
#[derive(Args, Debug)]
struct ServeCommand {
    /// Optional config file path (defaults to wcag-audit.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

/// Arguments for the `tools` command.
#[derive(Args, Debug)]
struct ToolsCommand {
    /// Print full contracts with output schemas, examples, and notes.
    #[arg(long, action = ArgAction::SetTrue)]
    contracts: bool,
}

/// Arguments for the `rules` command.
#[derive(Args, Debug)]
struct RulesCommand {
    /// Rule tags to filter by; rules matching any tag are printed.
    #[arg(long, value_name = "TAG", action = ArgAction::Append)]
    tag: Vec<String>,
}

/// Arguments for the `contrast` command.
#[derive(Args, Debug)]
struct ContrastCommand {
    /// Foreground color (hex, rgb(), or hsv() notation).
    #[arg(long, value_name = "COLOR")]
    foreground: String,
    /// Background color (hex, rgb(), or hsv() notation).
    #[arg(long, value_name = "COLOR")]
    background: String,
    /// Font size in CSS pixels.
    #[arg(long, value_name = "PX", default_value_t = 16.0)]
    font_size: f64,
    /// Treat the text as bold.
    #[arg(long, action = ArgAction::SetTrue)]
    bold: bool,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print an annotated example configuration file.
    Example,
    /// Validate a WCAG Audit configuration file.
    Validate(ConfigValidateCommand),
}

/// Arguments for config validation.
#[derive(Args, Debug)]
struct ConfigValidateCommand {
    /// Optional config file path (defaults to wcag-audit.toml or env override).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper carrying a user-facing message.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    init_tracing();
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Initializes stderr logging honoring `RUST_LOG`.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Executes the CLI command dispatcher.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&format!("wcag-audit {version}"))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let Some(command) = cli.command else {
        show_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    match command {
        Commands::Serve(command) => command_serve(command).await,
        Commands::Tools(command) => command_tools(&command),
        Commands::Rules(command) => command_rules(&command),
        Commands::Contrast(command) => command_contrast(&command),
        Commands::Config {
            command,
        } => command_config(&command),
    }
}

/// Emits the top-level help message for the CLI.
fn show_help() -> CliResult<()> {
    let mut command = Cli::command();
    command.print_help().map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(())
}

// ============================================================================
// SECTION: Serve Command
// ============================================================================

/// Executes the `serve` command.
async fn command_serve(command: ServeCommand) -> CliResult<ExitCode> {
    let config = WcagAuditConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(format!("config load failed: {err}")))?;
    let server = McpServer::from_config(config)
        .map_err(|err| CliError::new(format!("server init failed: {err}")))?;
    server
        .serve()
        .await
        .map_err(|err| CliError::new(format!("server failed: {err}")))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Tool and Rule Commands
// ============================================================================

/// Executes the `tools` command.
fn command_tools(command: &ToolsCommand) -> CliResult<ExitCode> {
    let value = if command.contracts {
        serde_json::to_value(tool_contracts())
    } else {
        serde_json::to_value(tool_definitions())
    }
    .map_err(|err| CliError::new(format!("tool catalog serialization failed: {err}")))?;
    write_json_value(&value)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `rules` command.
fn command_rules(command: &RulesCommand) -> CliResult<ExitCode> {
    let catalog = RuleCatalog::bundled()
        .map_err(|err| CliError::new(format!("rule catalog load failed: {err}")))?;
    let value = serde_json::to_value(catalog.filtered(&command.tag))
        .map_err(|err| CliError::new(format!("rule catalog serialization failed: {err}")))?;
    write_json_value(&value)?;
    Ok(ExitCode::SUCCESS)
}

/// Executes the `contrast` command.
fn command_contrast(command: &ContrastCommand) -> CliResult<ExitCode> {
    let foreground = parse_color(&command.foreground)
        .map_err(|err| CliError::new(err.to_string()))?;
    let background = parse_color(&command.background)
        .map_err(|err| CliError::new(err.to_string()))?;
    if !command.font_size.is_finite() || command.font_size <= 0.0 {
        return Err(CliError::new("font size must be a positive number".to_string()));
    }
    let assessment =
        ContrastAssessment::assess(foreground, background, command.font_size, command.bold);
    let report = ContrastReport::new(&command.foreground, &command.background, assessment);
    let value = serde_json::to_value(&report)
        .map_err(|err| CliError::new(format!("contrast serialization failed: {err}")))?;
    write_json_value(&value)?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Config Commands
// ============================================================================

/// Dispatches config subcommands.
fn command_config(command: &ConfigCommand) -> CliResult<ExitCode> {
    match command {
        ConfigCommand::Example => command_config_example(),
        ConfigCommand::Validate(command) => command_config_validate(command),
    }
}

/// Executes `config example`.
fn command_config_example() -> CliResult<ExitCode> {
    write_stdout_line(config_toml_example().trim_end())
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

/// Executes `config validate`.
fn command_config_validate(command: &ConfigValidateCommand) -> CliResult<ExitCode> {
    let _config = WcagAuditConfig::load(command.config.as_deref())
        .map_err(|err| CliError::new(format!("config load failed: {err}")))?;
    write_stdout_line("config ok").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Writes pretty-printed JSON to stdout.
fn write_json_value(value: &Value) -> CliResult<()> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::new(format!("json serialization failed: {err}")))?;
    write_stdout_line(&rendered).map_err(|err| CliError::new(output_error("stdout", &err)))
}

/// Formats an output error message for a stream.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    format!("failed to write to {stream}: {error}")
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
