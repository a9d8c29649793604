//! The built-in command set.

use std::borrow::Cow;

use super::pattern::Pattern;
use super::registry::Registry;
use crate::config::ConfigFormat;

/// Implements `pattern()` and `description()` for a newtype over
/// [`Signature`].
macro_rules! signature_accessors {
    () => {
        fn pattern(&self) -> &$crate::cli::pattern::Pattern {
            &self.0.pattern
        }

        fn description(&self) -> &str {
            &self.0.description
        }
    };
}

pub mod interface;
pub mod misc;
pub mod mode;
pub mod route;
pub mod show;

pub use interface::{InterfaceAction, InterfaceCommand};
pub use misc::{Help, Save};
pub use mode::{Commit, Configure, Discard, Exit, ExitDiscard};
pub use route::{RouteCommand, TargetKind};
pub use show::{ShowConfiguration, ShowInterfaces, ShowIpRoute};

/// Pattern and help text of a command.
#[derive(Debug, Clone)]
pub struct Signature {
    pub pattern: Pattern,
    pub description: Cow<'static, str>,
}

impl Signature {
    pub fn new(pattern: &str, description: &'static str) -> Self {
        Self {
            pattern: Pattern::new(pattern),
            description: Cow::Borrowed(description),
        }
    }

    pub fn owned(pattern: &str, description: String) -> Self {
        Self {
            pattern: Pattern::new(pattern),
            description: Cow::Owned(description),
        }
    }
}

/// Register the built-in commands.
///
/// An exact match goes to the first registered command, so within a family
/// the longer patterns come first. An abbreviation must identify exactly
/// one command.
pub fn register_all(registry: &mut Registry) {
    registry.register(ShowIpRoute::new());
    registry.register(ShowInterfaces::new());
    registry.register(ShowConfiguration::new(ConfigFormat::Hierarchical));
    registry.register(ShowConfiguration::new(ConfigFormat::Flat));

    registry.register(Configure::new());
    registry.register(Commit::new());
    registry.register(ExitDiscard::new());
    registry.register(Exit::new());
    registry.register(Discard::new());
    registry.register(Save::new());
    registry.register(Help::new());

    for command in route::all() {
        registry.register(command);
    }
    for command in interface::all() {
        registry.register(command);
    }
}
