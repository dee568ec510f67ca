//! CLI commands and argument parsing
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, their arguments, and command execution.

use crate::config::{api_parameters, ConfigLoader, ConfigSnapshot};
use crate::env::Environment;
use crate::error::Result;
use crate::utils::format::{DisplayUtils, OutputFormat, TableFormatter};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, info};

/// Get the full version string with build information
fn get_version() -> &'static str {
    env!("VERSION_WITH_GIT")
}

#[derive(Parser)]
#[command(name = "apienv")]
#[command(about = "Resolve and validate the photo API environment configuration")]
#[command(version = get_version(), author)]
pub struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Env file layered beneath the process environment
    #[arg(long, global = true, value_name = "PATH", env = "APIENV_ENV_FILE")]
    pub env_file: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show every resolved parameter with its source
    Show,
    /// Validate the configuration and report the first problem
    Check,
    /// Print the resolved value of one parameter
    Get {
        /// Parameter name
        name: String,
    },
    /// List the declared parameters
    Params,
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        match &self.command {
            Commands::Show => execute_show(&self).await,
            Commands::Check => execute_check(&self).await,
            Commands::Get { name } => execute_get(&self, name).await,
            Commands::Params => execute_params(&self),
        }
    }

    fn formatter(&self) -> TableFormatter {
        TableFormatter::new(self.format, self.no_color)
    }
}

/// Build the environment the commands resolve against
///
/// The process environment wins over values from the env file.
pub async fn resolve_environment(env_file: Option<&PathBuf>) -> Result<Environment> {
    let process = Environment::from_process();
    match env_file {
        Some(path) => {
            info!("Layering process environment over {}", path.display());
            let file = Environment::from_env_file(path).await?;
            Ok(Environment::layered(file, process))
        }
        None => Ok(process),
    }
}

async fn load_snapshot(cli: &Cli) -> Result<ConfigSnapshot> {
    let env = resolve_environment(cli.env_file.as_ref()).await?;
    debug!("Environment has {} variables", env.len());
    ConfigLoader::load(&api_parameters(), &env)
}

async fn execute_show(cli: &Cli) -> Result<()> {
    let snapshot = load_snapshot(cli).await?;
    println!("{}", cli.formatter().format_snapshot(&snapshot)?);
    Ok(())
}

/// Failures are returned to `main`, which reports them
async fn execute_check(cli: &Cli) -> Result<()> {
    let snapshot = load_snapshot(cli).await?;
    DisplayUtils::new(cli.no_color).print_success(&format!(
        "Configuration is valid ({} parameters)",
        snapshot.len()
    ));
    Ok(())
}

async fn execute_get(cli: &Cli, name: &str) -> Result<()> {
    let snapshot = load_snapshot(cli).await?;
    let rendered = cli.formatter().format_value(name, snapshot.get(name)?)?;
    if !(cli.format == OutputFormat::Env && rendered.is_empty()) {
        println!("{}", rendered);
    }
    Ok(())
}

fn execute_params(cli: &Cli) -> Result<()> {
    let params = api_parameters();
    println!("{}", cli.formatter().format_parameters(&params)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::EnvSource;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_get() {
        let cli = Cli::try_parse_from(["apienv", "--format", "json", "get", "PORT"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Get { ref name } if name == "PORT"));
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["apienv", "show", "--env-file", "api.env", "--no-color"])
            .unwrap();
        assert_eq!(cli.env_file, Some(PathBuf::from("api.env")));
        assert!(cli.no_color);
    }

    #[tokio::test]
    async fn test_check_returns_error_to_caller() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"PORT=3000\nthis line is wrong\n").unwrap();

        let path = file.path().to_str().unwrap().to_string();
        let cli = Cli::try_parse_from(["apienv", "check", "--no-color", "--env-file", path.as_str()]).unwrap();
        let err = cli.execute().await.unwrap_err();
        assert_eq!(err.kind(), "env_file");
        assert_eq!(err.to_string().lines().count(), 1);
    }

    #[tokio::test]
    async fn test_resolve_environment_layers_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"APIENV_TEST_ONLY_IN_FILE=from-file\n").unwrap();

        let env = resolve_environment(Some(&file.path().to_path_buf()))
            .await
            .unwrap();
        assert_eq!(env.lookup("APIENV_TEST_ONLY_IN_FILE"), Some("from-file"));
    }
}
