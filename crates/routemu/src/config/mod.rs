//! Router configuration language.
//!
//! Two surface syntaxes describe the same state:
//!
//! - [`flat`] - one `set ...` command per line
//! - [`hierarchical`] - nested `key { ... }` blocks
//!
//! [`load_configuration`] replays a complete configuration against a router
//! as one transaction: either every statement is applied and committed, or
//! the router is left exactly as it was. [`generate`] is the inverse.
//!
//! # Example
//!
//! ```
//! use routemu::config::{self, ConfigFormat};
//! use routemu::router::Router;
//!
//! let mut router = Router::new("R1");
//! config::load_configuration(
//!     &mut router,
//!     "set interfaces ethernet eth0 address 10.0.0.1/24\n",
//! )?;
//! assert_eq!(
//!     config::generate(&router, ConfigFormat::Flat),
//!     "set interfaces ethernet eth0 address 10.0.0.1/24\n",
//! );
//! # Ok::<(), routemu::config::ConfigError>(())
//! ```

pub mod directive;
mod error;
pub mod flat;
pub mod generate;
pub mod hierarchical;
pub mod token;

use std::fmt;
use std::str::FromStr;

use tracing::{debug, info, warn};

pub use directive::{Directive, DirectiveSource, Statement};
pub use error::{ConfigError, Result};
pub use flat::FlatParser;
pub use generate::{generate_flat, generate_hierarchical};
pub use hierarchical::HierarchicalParser;
pub use token::Token;

use crate::router::{Router, RouterMode};

/// Surface syntax of configuration text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ConfigFormat {
    /// `set` commands.
    #[default]
    Flat,
    /// Brace blocks.
    Hierarchical,
}

impl ConfigFormat {
    /// Guess the syntax: a non-comment line opening a block means
    /// hierarchical.
    pub fn detect(text: &str) -> Self {
        let opens_block = text
            .lines()
            .filter(|line| !token::is_blank_or_comment(line))
            .any(|line| line.trim_end().ends_with('{'));
        if opens_block {
            Self::Hierarchical
        } else {
            Self::Flat
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Hierarchical => "hierarchical",
        }
    }

    /// A parser for `text` in this syntax.
    pub fn parser(&self, text: &str) -> Box<dyn DirectiveSource> {
        match self {
            Self::Flat => Box::new(FlatParser::new(text)),
            Self::Hierarchical => Box::new(HierarchicalParser::new(text)),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConfigFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "flat" | "set" | "commands" => Ok(Self::Flat),
            "hierarchical" | "tree" | "curly" => Ok(Self::Hierarchical),
            _ => Err(format!("unknown configuration format: {}", s)),
        }
    }
}

/// Serialize the router's committed configuration.
pub fn generate(router: &Router, format: ConfigFormat) -> String {
    match format {
        ConfigFormat::Flat => generate_flat(router),
        ConfigFormat::Hierarchical => generate_hierarchical(router),
    }
}

/// Load a complete configuration, detecting its syntax.
///
/// See [`load_configuration_as`].
pub fn load_configuration(router: &mut Router, text: &str) -> Result<usize> {
    load_configuration_as(router, text, ConfigFormat::detect(text))
}

/// Load a complete configuration in the given syntax.
///
/// The text replaces the router's configuration: staged state is cleared,
/// every statement is replayed against it, and the result is committed.
/// Statements that restate existing configuration are accepted. On any
/// error the staged state is discarded, so the committed configuration is
/// unchanged. The router's mode is restored either way; pending staged
/// edits from before the load do not survive it.
///
/// Returns the number of statements applied.
pub fn load_configuration_as(router: &mut Router, text: &str, format: ConfigFormat) -> Result<usize> {
    let original = router.mode();
    router.set_mode_forced(RouterMode::Configuration);

    let result = replay(router, format.parser(text).as_mut());
    let result = match result {
        Ok(applied) => router
            .commit_changes()
            .map(|()| applied)
            .map_err(|e| ConfigError::rejected(e, None)),
        Err(e) => Err(e),
    };

    if let Err(ref e) = result {
        warn!(format = %format, error = %e, "configuration load failed, rolling back");
        // In configuration mode, so discard cannot fail.
        let _ = router.discard_changes();
    }
    router.set_mode_forced(original);

    if let Ok(applied) = result {
        info!(router = router.name(), format = %format, statements = applied, "configuration loaded");
    }
    result
}

fn replay(router: &mut Router, source: &mut dyn DirectiveSource) -> Result<usize> {
    router
        .clear_staged_configuration()
        .map_err(|e| ConfigError::rejected(e, None))?;
    let mut applied = 0;
    while let Some(statement) = source.next_statement(router)? {
        debug!(directive = ?statement.directive, "applying");
        statement
            .directive
            .apply(router, statement.token.as_ref())?;
        applied += 1;
    }
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(
            ConfigFormat::detect("set interfaces ethernet eth0 disable"),
            ConfigFormat::Flat
        );
        assert_eq!(
            ConfigFormat::detect("interfaces {\n}\n"),
            ConfigFormat::Hierarchical
        );
        assert_eq!(ConfigFormat::detect(""), ConfigFormat::Flat);
        assert_eq!(
            ConfigFormat::detect("# interfaces {\nset interfaces ethernet eth0 disable\n"),
            ConfigFormat::Flat
        );
        assert_eq!(
            ConfigFormat::detect("# core router\n\ninterfaces {\n    ethernet eth0 {\n"),
            ConfigFormat::Hierarchical
        );
    }

    #[test]
    fn test_load_flat_with_brace_in_comment() {
        let mut router = Router::new("R1");
        let applied = load_configuration(
            &mut router,
            "# copied from interfaces { ... }\nset interfaces ethernet eth0 address 10.0.0.1/24\n",
        )
        .unwrap();
        assert_eq!(applied, 1);
        assert!(router.interfaces()[0].get_address().is_some());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("flat".parse::<ConfigFormat>(), Ok(ConfigFormat::Flat));
        assert_eq!(
            "hierarchical".parse::<ConfigFormat>(),
            Ok(ConfigFormat::Hierarchical)
        );
        assert!("yaml".parse::<ConfigFormat>().is_err());
    }

    #[test]
    fn test_load_restores_mode() {
        let mut router = Router::new("R1");
        let applied =
            load_configuration(&mut router, "set interfaces ethernet eth0 address 10.0.0.1/24\n")
                .unwrap();
        assert_eq!(applied, 1);
        assert_eq!(router.mode(), RouterMode::Operational);
        assert!(!router.has_uncommitted_changes());
        assert!(router.interfaces()[0].get_address().is_some());
    }

    #[test]
    fn test_load_replaces_configuration() {
        let mut router = Router::new("R1");
        load_configuration(
            &mut router,
            "set interfaces ethernet eth0 address 10.0.0.1/24\nset interfaces ethernet lo disable\n",
        )
        .unwrap();
        load_configuration(&mut router, "set protocols static route 0.0.0.0/0 next-hop 1.1.1.1\n")
            .unwrap();
        assert!(router.interfaces().iter().all(|i| i.get_address().is_none()));
        assert!(router.interfaces().iter().all(|i| !i.is_disabled()));
        assert_eq!(router.routing_table().len(), 1);
    }

    #[test]
    fn test_load_rolls_back() {
        let mut router = Router::new("R1");
        load_configuration(&mut router, "set interfaces ethernet eth0 address 10.0.0.1/24\n")
            .unwrap();
        let before = generate_flat(&router);

        let err = load_configuration(
            &mut router,
            "set protocols static route 0.0.0.0/0 next-hop 10.0.0.254\nset interfaces ethernet eth0 address 10.0.0.0/24\n",
        )
        .unwrap_err();
        assert_eq!(err.line(), Some(2));
        assert_eq!(generate_flat(&router), before);
        assert!(router.staged_routing_table().is_empty());
        assert_eq!(router.mode(), RouterMode::Operational);
    }
}
