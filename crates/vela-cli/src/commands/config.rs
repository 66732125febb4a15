//! `vela config` commands for managing CLI configuration.

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use crate::config::{config_path, load_config, CliConfig, Profile, DEFAULT_SERVER};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Create a new config file with default settings
    Init {
        /// Server address for the default profile
        #[arg(long)]
        server: Option<String>,

        /// API token for the default profile
        #[arg(long)]
        token: Option<String>,

        /// Default output driver for the default profile
        #[arg(long)]
        output: Option<String>,

        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },

    /// Set profile values (creates profile if it doesn't exist)
    Set {
        /// Profile name to update (defaults to "default")
        #[arg(long, default_value = "default")]
        profile: String,

        /// Server address
        #[arg(long)]
        server: Option<String>,

        /// API token
        #[arg(long)]
        token: Option<String>,

        /// Default output driver
        #[arg(long)]
        output: Option<String>,

        /// Set this profile as the default
        #[arg(long)]
        default: bool,
    },

    /// Show current configuration
    Show {
        /// Show actual token values (by default tokens are masked)
        #[arg(long)]
        show_token: bool,
    },

    /// List all available profiles
    Profiles,

    /// Show config file path
    Path,
}

pub fn handle_config_command(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Init {
            server,
            token,
            output,
            force,
        } => init_config(server, token, output, force),
        ConfigCommands::Set {
            profile,
            server,
            token,
            output,
            default,
        } => set_config(profile, server, token, output, default),
        ConfigCommands::Show { show_token } => show_config(show_token),
        ConfigCommands::Profiles => list_profiles(),
        ConfigCommands::Path => show_path(),
    }
}

/// Create a new config file.
fn init_config(
    server: Option<String>,
    token: Option<String>,
    output: Option<String>,
    force: bool,
) -> Result<()> {
    let path = config_path()?;

    if path.exists() && !force {
        bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    let mut profiles = HashMap::new();
    profiles.insert(
        "default".to_string(),
        Profile {
            server: server.unwrap_or_else(|| DEFAULT_SERVER.to_string()),
            token,
            output,
        },
    );

    let config = CliConfig {
        default_profile: "default".to_string(),
        profiles,
    };

    write_config(&path, &config)?;

    println!("Created config file at {}", path.display());
    println!();
    println!("To add more profiles:");
    println!("  vela config set --profile work --server https://vela.company.com");
    println!();
    println!("To set a token:");
    println!("  vela config set --token <your-token>");

    Ok(())
}

/// Update profile values.
fn set_config(
    profile_name: String,
    server: Option<String>,
    token: Option<String>,
    output: Option<String>,
    set_default: bool,
) -> Result<()> {
    let path = config_path()?;

    let mut config = load_config()?.unwrap_or_else(|| CliConfig {
        default_profile: "default".to_string(),
        profiles: HashMap::new(),
    });

    let updated = apply_profile_update(&mut config, &profile_name, server, token, output, set_default);

    if !updated {
        println!("No changes specified. Use --server, --token, --output, or --default.");
        return Ok(());
    }

    write_config(&path, &config)?;

    println!("Updated profile '{}'", profile_name);
    if set_default {
        println!("Set '{}' as default profile", profile_name);
    }

    Ok(())
}

/// Applies `config set` changes in memory. Returns whether anything changed.
fn apply_profile_update(
    config: &mut CliConfig,
    profile_name: &str,
    server: Option<String>,
    token: Option<String>,
    output: Option<String>,
    set_default: bool,
) -> bool {
    let profile = config
        .profiles
        .entry(profile_name.to_string())
        .or_insert_with(|| Profile {
            server: DEFAULT_SERVER.to_string(),
            ..Default::default()
        });

    let mut updated = false;
    if let Some(s) = server {
        profile.server = s;
        updated = true;
    }
    if let Some(t) = token {
        profile.token = Some(t);
        updated = true;
    }
    if let Some(o) = output {
        profile.output = Some(o);
        updated = true;
    }

    if set_default && config.default_profile != profile_name {
        config.default_profile = profile_name.to_string();
        updated = true;
    }

    updated || set_default
}

/// Display current configuration.
fn show_config(show_token: bool) -> Result<()> {
    let path = config_path()?;

    let config = match load_config()? {
        Some(c) => c,
        None => {
            println!("No config file found at {}", path.display());
            println!();
            println!("Using defaults:");
            println!("  Server: {}", DEFAULT_SERVER);
            println!();
            println!("Run 'vela config init' to create a config file.");
            return Ok(());
        }
    };

    println!("Config file: {}", path.display());
    println!("Default profile: {}", config.default_profile);
    println!();

    let mut names: Vec<_> = config.profiles.keys().collect();
    names.sort();

    for name in names {
        let profile = &config.profiles[name];
        let marker = if name == &config.default_profile { " *" } else { "" };

        println!("[{}]{}", name, marker);
        println!("  Server: {}", profile.server);
        match &profile.token {
            Some(token) if show_token => println!("  Token:  {}", token),
            Some(token) => println!("  Token:  {} (use --show-token to reveal)", mask_token(token)),
            None => println!("  Token:  (not set)"),
        }
        println!("  Output: {}", profile.output.as_deref().unwrap_or("(default)"));
        println!();
    }

    Ok(())
}

/// List all available profiles.
fn list_profiles() -> Result<()> {
    let config = match load_config()? {
        Some(c) => c,
        None => {
            println!("No config file found. Run 'vela config init' to create one.");
            return Ok(());
        }
    };

    let mut names: Vec<_> = config.profiles.keys().collect();
    names.sort();

    println!("Available profiles:");
    for name in names {
        if name == &config.default_profile {
            println!("  {} *", name);
        } else {
            println!("  {}", name);
        }
    }
    println!();
    println!("* = default profile");

    Ok(())
}

/// Show the config file path.
fn show_path() -> Result<()> {
    println!("{}", config_path()?.display());

    if let Ok(env_path) = std::env::var("VELA_CONFIG") {
        println!();
        println!("Note: VELA_CONFIG is set to: {}", env_path);
    }

    Ok(())
}

/// Mask a token for display (show first 4 and last 4 characters).
/// Requires at least 12 characters to show partial content.
fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() < 12 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}...{}", head, tail)
    }
}

/// Write config to file with proper HUML formatting and secure permissions.
fn write_config(path: &Path, config: &CliConfig) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
            #[cfg(unix)]
            fs::set_permissions(dir, fs::Permissions::from_mode(0o700))?;
        }
    }

    let content = serialize_to_huml(config);

    fs::write(path, &content).with_context(|| format!("Failed to write {}", path.display()))?;

    // Owner read/write only
    #[cfg(unix)]
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;

    tracing::debug!("Wrote config to {}", path.display());

    Ok(())
}

/// Quotes a HUML string value, escaping what would end or corrupt it.
fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Serialize config to HUML format.
///
/// huml-rs only deserializes, so the document is written by hand.
fn serialize_to_huml(config: &CliConfig) -> String {
    let mut output = String::new();

    output.push_str("%HUML v0.2.0\n");
    output.push_str(&format!("default_profile: {}\n", quote(&config.default_profile)));
    output.push('\n');
    output.push_str("profiles::\n");

    // Sorted for deterministic output
    let mut profile_names: Vec<_> = config.profiles.keys().collect();
    profile_names.sort();

    for name in profile_names {
        let profile = &config.profiles[name];
        output.push_str(&format!("  {}::\n", name));
        output.push_str(&format!("    server: {}\n", quote(&profile.server)));
        if let Some(ref token) = profile.token {
            output.push_str(&format!("    token: {}\n", quote(token)));
        }
        if let Some(ref driver) = profile.output {
            output.push_str(&format!("    output: {}\n", quote(driver)));
        }
        output.push('\n');
    }

    output
}
