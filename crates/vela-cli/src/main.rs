use anyhow::Result;
use clap::{Parser, Subcommand};

mod action;
mod commands;
mod config;
mod output;

use commands::{
    config::{handle_config_command, ConfigCommands},
    repo::{handle_repo_command, RepoCommands},
};
use config::Overrides;

#[derive(Parser)]
#[command(name = "vela")]
#[command(about = "CLI for the Vela CI/CD platform", version = vela_core::VERSION, long_about = None)]
struct Cli {
    /// Configuration profile to use
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Vela server address (overrides profile)
    #[arg(long, env = "VELA_ADDR", global = true)]
    server: Option<String>,

    /// API token (overrides profile)
    #[arg(long, env = "VELA_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,

    /// Output driver: dump, json, spew, yaml (anything else prints plain text)
    #[arg(long, env = "VELA_OUTPUT", global = true)]
    output: Option<String>,

    /// Log level; RUST_LOG takes precedence when set
    #[arg(long, env = "VELA_LOG_LEVEL", global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Repository management
    #[command(subcommand)]
    Repo(RepoCommands),

    /// Manage CLI configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Default filter directive; the binary's own events log under the `vela` target.
fn log_directive(level: &str) -> String {
    format!("vela={level},vela_core={level}")
}

/// Logs go to stderr so rendered output on stdout stays machine-readable.
fn init_tracing(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_directive(level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (doesn't override existing env vars)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_tracing(&cli.log_level);

    // Config commands don't need server connection, handle separately
    let cmd = match cli.command {
        Commands::Config(cmd) => return handle_config_command(cmd),
        Commands::Repo(cmd) => cmd,
    };

    let file_config = config::load_config().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config file: {:#}", e);
        None
    });

    let resolved = config::resolve_config(
        Overrides {
            profile: cli.profile.as_deref(),
            server: cli.server.as_deref(),
            token: cli.token.as_deref(),
            output: cli.output.as_deref(),
        },
        file_config,
    )?;

    tracing::debug!(server = %resolved.server, output = %resolved.output, "resolved configuration");

    handle_repo_command(&resolved, cmd).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "vela", "repo", "view", "--org", "octo", "--repo", "repo", "--output", "json",
            "--server", "https://vela.example.com",
        ])
        .unwrap();

        assert_eq!(cli.output.as_deref(), Some("json"));
        assert_eq!(cli.server.as_deref(), Some("https://vela.example.com"));
        assert!(matches!(cli.command, Commands::Repo(RepoCommands::View(_))));
    }

    #[test]
    fn test_log_directive_targets_binary_and_core() {
        assert_eq!(log_directive("trace"), "vela=trace,vela_core=trace");

        // The directive must match events emitted from this crate's modules
        assert!(module_path!().starts_with("vela::") || module_path!() == "vela");
        assert!(tracing_subscriber::EnvFilter::try_new(log_directive("debug")).is_ok());
    }

    #[test]
    fn test_repo_add_requires_org_and_repo() {
        temp_env::with_vars_unset(["VELA_ORG", "VELA_REPO"], || {
            assert!(Cli::try_parse_from(["vela", "repo", "add", "--org", "octo"]).is_err());
        });
    }
}
