//! Errors raised while parsing or applying configuration text.

use super::token::Token;
use crate::router::RouterError;
use crate::util::addr::AddrError;

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

fn at(token: &Option<Token>) -> String {
    match token {
        Some(token) => format!("\nInvalid token: {}", token),
        None => String::new(),
    }
}

/// Configuration text errors.
///
/// Any of these aborts a load and rolls the router back to its last
/// committed configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Text does not follow the grammar.
    #[error("{message}{}", at(.token))]
    Syntax {
        message: String,
        token: Option<Token>,
    },

    /// Text ended in the middle of a statement or block.
    #[error("Unexpected end of configuration at line {line}")]
    UnexpectedEnd { line: usize },

    /// A statement names an interface the router does not have.
    #[error("Interface {name} does not exist on this router{}", at(.token))]
    UnknownInterface { name: String, token: Option<Token> },

    /// The router refused a statement.
    #[error("{source}{}", at(.token))]
    Rejected {
        source: RouterError,
        token: Option<Token>,
    },

    /// A value (address, prefix) failed to parse.
    #[error("{source}{}", at(.token))]
    Value {
        source: AddrError,
        token: Option<Token>,
    },
}

impl ConfigError {
    pub fn syntax(message: impl Into<String>, token: &Token) -> Self {
        Self::Syntax {
            message: message.into(),
            token: Some(token.clone()),
        }
    }

    pub fn unknown_interface(token: &Token) -> Self {
        Self::UnknownInterface {
            name: token.value.clone(),
            token: Some(token.clone()),
        }
    }

    pub fn rejected(source: RouterError, token: Option<&Token>) -> Self {
        Self::Rejected {
            source,
            token: token.cloned(),
        }
    }

    pub fn value(source: AddrError, token: &Token) -> Self {
        Self::Value {
            source,
            token: Some(token.clone()),
        }
    }

    /// The token the error points at, if any.
    pub fn token(&self) -> Option<&Token> {
        match self {
            Self::Syntax { token, .. }
            | Self::UnknownInterface { token, .. }
            | Self::Rejected { token, .. }
            | Self::Value { token, .. } => token.as_ref(),
            Self::UnexpectedEnd { .. } => None,
        }
    }

    /// The line the error points at, if known.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::UnexpectedEnd { line } => Some(*line),
            _ => self.token().map(|t| t.line),
        }
    }

    /// The underlying router error, for rejected statements.
    pub fn router_error(&self) -> Option<&RouterError> {
        match self {
            Self::Rejected { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_with_token() {
        let err = ConfigError::unknown_interface(&Token::new("eth9", 2, 25));
        assert_eq!(
            err.to_string(),
            "Interface eth9 does not exist on this router\nInvalid token: 'eth9' at line 2, column 25"
        );
        assert_eq!(err.line(), Some(2));
    }

    #[test]
    fn test_message_without_token() {
        let err = ConfigError::Syntax {
            message: "Unbalanced braces".into(),
            token: None,
        };
        assert_eq!(err.to_string(), "Unbalanced braces");
        assert_eq!(err.line(), None);
        assert_eq!(
            ConfigError::UnexpectedEnd { line: 4 }.to_string(),
            "Unexpected end of configuration at line 4"
        );
    }

    #[test]
    fn test_router_error() {
        let err = ConfigError::rejected(RouterError::InvalidDistance(300), None);
        assert_eq!(err.router_error(), Some(&RouterError::InvalidDistance(300)));
        assert_eq!(
            err.to_string(),
            "Administrative distance must be between 1 and 255. Provided: 300"
        );
    }
}
