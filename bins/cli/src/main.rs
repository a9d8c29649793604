//! routemu - interactive VyOS style router shell.

mod session;
mod terminal;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use routemu::cli::{Outcome, Session};
use routemu::config;
use routemu::router::{Router, RouterInterface};
use tracing::{debug, info};

use crate::session::SessionFile;
use crate::terminal::{Input, Terminal};

#[derive(Parser)]
#[command(name = "routemu", version, about = "VyOS style router emulator shell")]
struct Cli {
    /// Router name, shown in the prompt.
    #[arg(long, default_value = "vyos")]
    name: String,

    /// Interface to create (repeatable). Defaults to eth0 and lo.
    #[arg(short, long = "interface", value_name = "IF")]
    interfaces: Vec<String>,

    /// YAML session file describing the router.
    #[arg(long, value_name = "FILE", conflicts_with = "interfaces")]
    session: Option<PathBuf>,

    /// Load a configuration file at startup.
    #[arg(long, value_name = "FILE")]
    load: Option<PathBuf>,

    /// Run a command and exit instead of starting the shell (repeatable).
    #[arg(short = 'c', long = "command", value_name = "LINE")]
    commands: Vec<String>,

    /// Do not read or write the history file.
    #[arg(long)]
    no_history: bool,
}

impl Cli {
    fn router(&self) -> anyhow::Result<Router> {
        if let Some(ref path) = self.session {
            return SessionFile::load(path)?.router();
        }
        if self.interfaces.is_empty() {
            return Ok(Router::new(&self.name));
        }
        Ok(Router::with_interfaces(
            &self.name,
            self.interfaces.iter().map(RouterInterface::new),
        )?)
    }
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries operator output.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut router = cli.router()?;

    if let Some(ref path) = cli.load {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let applied = config::load_configuration(&mut router, &text)
            .with_context(|| format!("failed to load {}", path.display()))?;
        info!(path = %path.display(), statements = applied, "startup configuration loaded");
    }

    let mut session = Session::new(router);
    if cli.commands.is_empty() {
        let history = if cli.no_history {
            None
        } else {
            terminal::default_history_path()
        };
        interactive(&mut session, history)
    } else {
        scripted(&mut session, &cli.commands)
    }
}

/// Run the given lines in order, stopping early on `exit` in operational
/// mode.
fn scripted(session: &mut Session, lines: &[String]) -> anyhow::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in lines {
        if session.execute(line, &mut out)? == Outcome::Exit {
            break;
        }
    }
    out.flush()?;
    Ok(())
}

fn interactive(session: &mut Session, history: Option<PathBuf>) -> anyhow::Result<()> {
    let mut terminal = Terminal::new(session.router(), history);
    loop {
        let line = match terminal.read(session.router())? {
            Input::Line(line) => line,
            Input::Interrupted => continue,
            Input::Eof => break,
        };
        let mut out = io::stdout().lock();
        let outcome = session.execute(&line, &mut out)?;
        out.flush()?;
        if outcome == Outcome::Exit {
            break;
        }
    }
    debug!(router = session.router().name(), "session ended");
    Ok(())
}
