//! routemu-config - offline configuration text utility
//!
//! Checks, converts and evaluates router configuration files without
//! starting a shell.

mod check;
mod example;
mod routes;

use std::path::Path;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use routemu::config::{self, ConfigFormat};
use routemu::router::{Router, RouterInterface};

#[derive(Parser)]
#[command(name = "routemu-config")]
#[command(about = "Router configuration text utility", long_about = None)]
#[command(version)]
struct Cli {
    /// Interface the router has (repeatable). Defaults to eth0 and lo.
    #[arg(short, long = "interface", value_name = "IF", global = true)]
    interfaces: Vec<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate a configuration file
    Check(check::CheckArgs),

    /// Convert a configuration file to another syntax
    Convert(check::ConvertArgs),

    /// Show the routing table a configuration produces
    Routes(routes::RoutesArgs),

    /// Print an example configuration
    Example(example::ExampleArgs),
}

/// Configuration syntax, as accepted on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Syntax {
    /// `set` commands, one per line
    Flat,
    /// Nested brace blocks
    Hierarchical,
}

impl From<Syntax> for ConfigFormat {
    fn from(syntax: Syntax) -> Self {
        match syntax {
            Syntax::Flat => ConfigFormat::Flat,
            Syntax::Hierarchical => ConfigFormat::Hierarchical,
        }
    }
}

/// Build the router configurations are loaded into.
pub fn router(interfaces: &[String]) -> anyhow::Result<Router> {
    if interfaces.is_empty() {
        return Ok(Router::new("vyos"));
    }
    Ok(Router::with_interfaces(
        "vyos",
        interfaces.iter().map(RouterInterface::new),
    )?)
}

/// Load `path` into a fresh router, returning it with the number of
/// statements applied.
pub fn load(path: &Path, interfaces: &[String]) -> anyhow::Result<(Router, usize)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let mut router = router(interfaces)?;
    let applied = config::load_configuration(&mut router, &text)
        .with_context(|| format!("{} is not a valid configuration", path.display()))?;
    tracing::debug!(path = %path.display(), statements = applied, "loaded");
    Ok((router, applied))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Check(args) => check::run_check(args, &cli.interfaces),
        Command::Convert(args) => check::run_convert(args, &cli.interfaces),
        Command::Routes(args) => routes::run(args, &cli.interfaces),
        Command::Example(args) => example::run(args),
    }
}
