//! Operator-facing wording for command errors.
//!
//! Engine errors only state what went wrong. The text an operator sees
//! depends on what they typed, so it is produced here from the error and
//! the configuration path the command was editing.

use super::command::{CommandError, ConfigPath, Verb};
use crate::router::{Missing, RouterError};

/// Render a command error as operator output (without trailing newline).
pub fn render(err: &CommandError) -> String {
    match err {
        CommandError::Router { source, path } => router_error(source, path.as_ref()),
        CommandError::Value { value, reason } => format!(
            "\tInvalid value: {}\n\t{}\n\n\tValue validation failed",
            value, reason
        ),
        CommandError::Io(e) => format!("\t{}", e),
    }
}

/// Render a router error raised while editing `path`.
pub fn router_error(err: &RouterError, path: Option<&ConfigPath>) -> String {
    match (err, path) {
        (RouterError::Duplicate { .. }, Some(path)) if path.verb == Verb::Disable => {
            format!("\tConfiguration path: [{}] is already disabled", path)
        }
        (RouterError::Duplicate { .. }, Some(path)) => {
            format!("\tConfiguration path: [{}] already exists", path)
        }
        (RouterError::NotFound { what }, path) => match (what, path) {
            (Missing::Route, Some(path)) => {
                format!("\tConfiguration path: [{}] does not exist", path)
            }
            (Missing::Address, _) => {
                "\tNothing to delete (the specified value does not exist)".to_string()
            }
            _ => "\tNothing to delete (the specified node does not exist)".to_string(),
        },
        (RouterError::InvalidAddress { address, kind }, _) => format!(
            "\tError: {} is not a valid host IP: it is the {} address of {}\n\
             \tUse a host address instead, e.g. {}\n\n\n\
             \tInvalid value\n\tValue validation failed\n\tSet failed",
            address,
            kind.name(),
            address.subnet(),
            address.nearest_host()
        ),
        (RouterError::InvalidMode { .. }, _) => format!("\n\t{}\n", err),
        (RouterError::NoChangesToCommit, _) | (RouterError::UncommittedChanges, _) => {
            err.to_string()
        }
        _ => format!("\t{}", err),
    }
}
