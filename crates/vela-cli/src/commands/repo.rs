//! Repository management commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use vela_core::VelaClient;

use crate::action::repo::{Action, Config};
use crate::config::ResolvedConfig;

#[derive(Subcommand)]
pub enum RepoCommands {
    /// Add a repository to the server
    Add(AddArgs),

    /// View details of a repository
    View(RepoArgs),

    /// Remove a repository from the server
    Remove(RepoArgs),
}

/// Identifies a single repository.
#[derive(Args)]
pub struct RepoArgs {
    /// Organization that owns the repository
    #[arg(long, env = "VELA_ORG")]
    org: String,

    /// Repository name
    #[arg(long = "repo", env = "VELA_REPO")]
    name: String,
}

#[derive(Args)]
pub struct AddArgs {
    #[command(flatten)]
    repo: RepoArgs,

    /// Full URL to the repository
    #[arg(long, env = "VELA_LINK", default_value = "")]
    link: String,

    /// Clone URL of the repository
    #[arg(long, env = "VELA_CLONE", default_value = "")]
    clone: String,

    /// Default branch
    #[arg(long, env = "VELA_BRANCH", default_value = "main")]
    branch: String,

    /// Build timeout
    #[arg(long, env = "VELA_TIMEOUT", default_value_t = 30)]
    timeout: i64,

    /// Starting build number
    #[arg(long, env = "VELA_COUNTER", default_value_t = 0)]
    counter: i32,

    /// Repository visibility (public or private)
    #[arg(long, env = "VELA_VISIBILITY", default_value = "public")]
    visibility: String,

    /// Disable public access to the repository
    #[arg(long, env = "VELA_PRIVATE")]
    private: bool,

    /// Allow privileged containers in builds
    #[arg(long, env = "VELA_TRUSTED")]
    trusted: bool,

    /// Whether the repository is active
    #[arg(long, env = "VELA_ACTIVE", default_value_t = true, action = clap::ArgAction::Set)]
    active: bool,

    /// Events that trigger builds (push, pull_request, tag, deployment, comment)
    #[arg(
        long = "event",
        env = "VELA_EVENTS",
        value_delimiter = ',',
        default_value = "push,pull_request"
    )]
    events: Vec<String>,

    /// Pipeline configuration format
    #[arg(long, env = "VELA_PIPELINE_TYPE", default_value = "yaml")]
    pipeline_type: String,
}

impl AddArgs {
    fn into_config(self, resolved: &ResolvedConfig) -> Config {
        Config {
            action: Action::Add,
            org: self.repo.org,
            name: self.repo.name,
            link: self.link,
            clone: self.clone,
            branch: self.branch,
            timeout: self.timeout,
            counter: self.counter,
            visibility: self.visibility,
            private: self.private,
            trusted: self.trusted,
            active: self.active,
            events: self.events,
            pipeline_type: self.pipeline_type,
            output: resolved.output,
        }
    }
}

impl RepoArgs {
    fn into_config(self, action: Action, resolved: &ResolvedConfig) -> Config {
        let mut config = Config::for_repo(action, self.org, self.name);
        config.output = resolved.output;
        config
    }
}

pub async fn handle_repo_command(resolved: &ResolvedConfig, cmd: RepoCommands) -> Result<()> {
    let config = match cmd {
        RepoCommands::Add(args) => args.into_config(resolved),
        RepoCommands::View(args) => args.into_config(Action::View, resolved),
        RepoCommands::Remove(args) => args.into_config(Action::Remove, resolved),
    };

    config.validate()?;

    let client = VelaClient::new(&resolved.server, resolved.token.clone())
        .with_context(|| format!("Invalid server address '{}'", resolved.server))?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match config.action {
        Action::Add => config.add(&client, &mut out).await?,
        Action::View => config.view(&client, &mut out).await?,
        Action::Remove => config.remove(&client, &mut out).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::Driver;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(subcommand)]
        command: RepoCommands,
    }

    fn resolved(output: Driver) -> ResolvedConfig {
        ResolvedConfig {
            server: "http://localhost:8080".to_string(),
            token: None,
            output,
        }
    }

    /// Every variable the repo subcommands read, so ambient values can't leak into defaults.
    const REPO_ENV_VARS: [&str; 13] = [
        "VELA_ORG",
        "VELA_REPO",
        "VELA_LINK",
        "VELA_CLONE",
        "VELA_BRANCH",
        "VELA_TIMEOUT",
        "VELA_COUNTER",
        "VELA_VISIBILITY",
        "VELA_PRIVATE",
        "VELA_TRUSTED",
        "VELA_ACTIVE",
        "VELA_EVENTS",
        "VELA_PIPELINE_TYPE",
    ];

    fn parse(argv: &[&str]) -> TestCli {
        temp_env::with_vars_unset(REPO_ENV_VARS, || TestCli::try_parse_from(argv).unwrap())
    }

    fn parse_add(args: &[&str]) -> AddArgs {
        let argv: Vec<&str> = ["repo", "add"].iter().chain(args.iter()).copied().collect();
        match parse(&argv).command {
            RepoCommands::Add(args) => args,
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn test_add_defaults() {
        let config = parse_add(&["--org", "octo", "--repo", "repo"]).into_config(&resolved(Driver::Json));

        assert_eq!(config.action, Action::Add);
        assert_eq!(config.org, "octo");
        assert_eq!(config.name, "repo");
        assert_eq!(config.branch, "main");
        assert_eq!(config.timeout, 30);
        assert_eq!(config.counter, 0);
        assert_eq!(config.visibility, "public");
        assert!(!config.private);
        assert!(!config.trusted);
        assert!(config.active);
        assert_eq!(config.events, vec!["push", "pull_request"]);
        assert_eq!(config.pipeline_type, "yaml");
        assert_eq!(config.output, Driver::Json);
    }

    #[test]
    fn test_add_events_comma_separated_and_repeated() {
        let config = parse_add(&[
            "--org", "octo", "--repo", "repo", "--event", "push,tag", "--event", "comment",
        ])
        .into_config(&resolved(Driver::Stdout));

        assert_eq!(config.events, vec!["push", "tag", "comment"]);
    }

    #[test]
    fn test_add_overrides() {
        let config = parse_add(&[
            "--org",
            "octo",
            "--repo",
            "repo",
            "--branch",
            "develop",
            "--timeout",
            "90",
            "--private",
            "--trusted",
            "--active",
            "false",
            "--visibility",
            "private",
            "--link",
            "https://github.com/octo/repo",
        ])
        .into_config(&resolved(Driver::Stdout));

        assert_eq!(config.branch, "develop");
        assert_eq!(config.timeout, 90);
        assert!(config.private);
        assert!(config.trusted);
        assert!(!config.active);
        assert_eq!(config.visibility, "private");
        assert_eq!(config.link, "https://github.com/octo/repo");
    }

    #[test]
    fn test_add_defaults_ignore_unrelated_environment() {
        let config = temp_env::with_vars(
            [("VELA_BRANCH", Some("release")), ("VELA_EVENTS", Some("tag"))],
            || parse_add(&["--org", "octo", "--repo", "repo"]),
        )
        .into_config(&resolved(Driver::Stdout));

        assert_eq!(config.branch, "main");
        assert_eq!(config.events, vec!["push", "pull_request"]);
    }

    #[test]
    fn test_view_args() {
        let cli = parse(&["repo", "view", "--org", "octo", "--repo", "repo"]);
        let config = match cli.command {
            RepoCommands::View(args) => args.into_config(Action::View, &resolved(Driver::Yaml)),
            _ => panic!("expected view"),
        };

        assert_eq!(config.action, Action::View);
        assert_eq!(config.org, "octo");
        assert_eq!(config.output, Driver::Yaml);
    }
}
