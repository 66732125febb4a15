//! CLI configuration loading and resolution.
//!
//! Supports profile-based configuration from `~/.vela/config.huml` with
//! priority order: CLI flags > environment variables > config file > defaults.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::output::Driver;

/// Server used when nothing else is configured.
pub const DEFAULT_SERVER: &str = "http://localhost:8080";

/// CLI configuration loaded from config.huml file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    /// Name of the default profile to use.
    pub default_profile: String,
    /// Map of profile name to profile configuration.
    pub profiles: HashMap<String, Profile>,
}

/// A named profile containing server connection settings.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Vela server address (e.g., "https://vela.company.com").
    pub server: String,
    /// Optional API token for this server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Optional default output driver (dump, json, spew, yaml).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

/// Resolved configuration after applying priority rules.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Server address to connect to.
    pub server: String,
    /// API token (if available).
    pub token: Option<String>,
    /// Output driver for rendered results.
    pub output: Driver,
}

/// Values supplied on the command line or through the environment.
///
/// clap fills these from both sources, so they already outrank the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides<'a> {
    pub profile: Option<&'a str>,
    pub server: Option<&'a str>,
    pub token: Option<&'a str>,
    pub output: Option<&'a str>,
}

impl Default for CliConfig {
    fn default() -> Self {
        let mut profiles = HashMap::new();
        profiles.insert(
            "default".to_string(),
            Profile {
                server: DEFAULT_SERVER.to_string(),
                ..Default::default()
            },
        );
        Self {
            default_profile: "default".to_string(),
            profiles,
        }
    }
}

/// Returns the default config file path (~/.vela/config.huml).
pub fn default_config_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|h| h.join(".vela/config.huml"))
        .context("Could not determine home directory")
}

/// Returns the config file path, honoring `VELA_CONFIG`.
pub fn config_path() -> Result<PathBuf> {
    match std::env::var("VELA_CONFIG") {
        Ok(p) => Ok(PathBuf::from(p)),
        Err(_) => default_config_path(),
    }
}

/// Load configuration from the config file.
///
/// Returns `Ok(None)` if the config file doesn't exist.
/// Returns an error if the file exists but is invalid.
pub fn load_config() -> Result<Option<CliConfig>> {
    let path = config_path()?;

    if !path.exists() {
        return Ok(None);
    }

    let content =
        std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;

    let config: CliConfig = huml_rs::serde::from_str(&content)
        .with_context(|| format!("Invalid HUML in {}", path.display()))?;

    validate_config(&config)?;
    check_file_permissions(&path);

    tracing::debug!("Loaded config from {}", path.display());

    Ok(Some(config))
}

/// Validate that the config has at least one profile and the default profile exists.
fn validate_config(config: &CliConfig) -> Result<()> {
    if config.profiles.is_empty() {
        bail!("Config file must contain at least one profile");
    }

    if !config.profiles.contains_key(&config.default_profile) {
        bail!(
            "Default profile '{}' not found in profiles",
            config.default_profile
        );
    }

    for (name, profile) in &config.profiles {
        if profile.server.is_empty() {
            bail!("Profile '{}' has an empty server address", name);
        }
    }

    Ok(())
}

/// Warn if config file has overly permissive permissions (on Unix).
#[cfg(unix)]
fn check_file_permissions(path: &std::path::Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(metadata) = std::fs::metadata(path) {
        let mode = metadata.permissions().mode();
        // Group or others can read the token
        if mode & 0o077 != 0 {
            tracing::warn!(
                "{} has overly permissive permissions ({:o}). Consider running: chmod 600 {}",
                path.display(),
                mode & 0o777,
                path.display()
            );
        }
    }
}

#[cfg(not(unix))]
fn check_file_permissions(_path: &std::path::Path) {}

/// Resolve configuration by applying priority rules.
///
/// Priority order (highest to lowest):
/// 1. CLI flags (`--server`, `--token`, `--output`)
/// 2. Environment variables (`VELA_ADDR`, `VELA_TOKEN`, `VELA_OUTPUT`)
/// 3. Config file profile
/// 4. Hardcoded defaults (`http://localhost:8080`, stdout output)
pub fn resolve_config(overrides: Overrides<'_>, file_config: Option<CliConfig>) -> Result<ResolvedConfig> {
    let mut server = DEFAULT_SERVER.to_string();
    let mut token: Option<String> = None;
    let mut output: Option<String> = None;

    // Apply config file (lowest priority)
    if let Some(config) = file_config {
        let profile_name = overrides.profile.unwrap_or(&config.default_profile);
        if let Some(profile) = config.profiles.get(profile_name) {
            server = profile.server.clone();
            token = profile.token.clone();
            output = profile.output.clone();
        } else if overrides.profile.is_some() {
            bail!(
                "Profile '{}' not found. Run 'vela config profiles' to see available profiles.",
                profile_name
            );
        }
    } else if let Some(requested_profile) = overrides.profile {
        // User requested a specific profile but no config file exists
        if requested_profile != "default" {
            bail!(
                "Profile '{}' not found. No config file exists. Run 'vela config init' to create one.",
                requested_profile
            );
        }
    }

    // Apply flags and environment (highest priority)
    if let Some(s) = overrides.server {
        server = s.to_string();
    }
    if let Some(t) = overrides.token {
        token = Some(t.to_string());
    }
    if let Some(o) = overrides.output {
        output = Some(o.to_string());
    }

    Ok(ResolvedConfig {
        server,
        token,
        output: output.as_deref().map(Driver::from).unwrap_or_default(),
    })
}
