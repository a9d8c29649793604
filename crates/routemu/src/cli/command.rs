//! The command abstraction and its error type.

use std::fmt;
use std::io::{self, Write};

use super::pattern::{Args, Pattern};
use crate::router::{Router, RouterError, RouterMode};

/// What the session should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    /// Read the next line.
    #[default]
    Continue,
    /// End the session.
    Exit,
}

/// Kind of configuration edit a command performs, for error wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Set,
    Delete,
    /// `set ... disable` on an existing route.
    Disable,
}

/// The configuration path a command was editing, e.g.
/// `protocols static route 0.0.0.0/0 next-hop 10.0.0.254`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPath {
    pub verb: Verb,
    pub path: String,
}

impl ConfigPath {
    pub fn new(verb: Verb, path: impl Into<String>) -> Self {
        Self {
            verb,
            path: path.into(),
        }
    }
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Errors raised while executing a command.
///
/// Router and value errors are reported to the operator and the session
/// continues; only I/O errors on the output sink end a dispatch.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// The router rejected the operation.
    #[error("{source}")]
    Router {
        source: RouterError,
        /// The configuration path being edited, when there is one.
        path: Option<ConfigPath>,
    },

    /// An argument could not be parsed.
    #[error("Invalid value '{value}': {reason}")]
    Value { value: String, reason: String },

    /// Writing to the output sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CommandError {
    /// A router error raised while editing `path`.
    pub fn at(source: RouterError, path: &ConfigPath) -> Self {
        Self::Router {
            source,
            path: Some(path.clone()),
        }
    }

    pub fn router_error(&self) -> Option<&RouterError> {
        match self {
            Self::Router { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

impl From<RouterError> for CommandError {
    fn from(source: RouterError) -> Self {
        Self::Router { source, path: None }
    }
}

/// Everything a command can touch while it runs.
pub struct Context<'a> {
    pub router: &'a mut Router,
    pub out: &'a mut dyn Write,
    /// All registered commands, in registration order.
    pub catalog: &'a [Box<dyn Command>],
}

/// An operator command.
pub trait Command {
    /// The pattern the command answers to.
    fn pattern(&self) -> &Pattern;

    /// One-line help text.
    fn description(&self) -> &str;

    /// Whether completion should offer this command in `mode`.
    fn available_in(&self, _mode: RouterMode) -> bool {
        true
    }

    /// Run the command with the placeholder values of a matched line.
    fn execute(&self, ctx: &mut Context<'_>, args: &Args<'_>) -> Result<Outcome, CommandError>;
}

/// Fail with an invalid-mode error outside configuration mode.
///
/// Commands check this before parsing their arguments, so an operator in
/// the wrong mode learns that first.
pub(crate) fn require_configuration(router: &Router, command: &str) -> Result<(), CommandError> {
    if router.mode() == RouterMode::Configuration {
        Ok(())
    } else {
        Err(RouterError::invalid_mode(command).into())
    }
}

/// Write one line of operator output.
pub(crate) fn say(out: &mut dyn Write, text: &str) -> Result<Outcome, CommandError> {
    writeln!(out, "{}", text)?;
    Ok(Outcome::Continue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_router_error_conversion() {
        let err: CommandError = RouterError::NoChangesToCommit.into();
        assert_eq!(err.router_error(), Some(&RouterError::NoChangesToCommit));
        assert!(!err.is_io());

        let path = ConfigPath::new(Verb::Set, "interfaces ethernet eth0 disable");
        match CommandError::at(RouterError::duplicate("Configuration"), &path) {
            CommandError::Router { path: Some(p), .. } => assert_eq!(p.to_string(), path.path),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_require_configuration() {
        let mut router = Router::new("R1");
        let err = require_configuration(&router, "set [protocols]").unwrap_err();
        assert_eq!(
            err.router_error(),
            Some(&RouterError::invalid_mode("set [protocols]"))
        );
        router.set_mode(RouterMode::Configuration).unwrap();
        assert!(require_configuration(&router, "set [protocols]").is_ok());
    }
}
