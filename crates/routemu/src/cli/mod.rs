//! VyOS style command layer.
//!
//! Input lines are matched against registered [`Pattern`]s and executed
//! against a [`Router`]. Operator output goes to any [`Write`] sink, so a
//! session can be driven from a terminal, a script or a test buffer.
//!
//! # Example
//!
//! ```
//! use routemu::cli::Session;
//! use routemu::router::Router;
//!
//! let mut session = Session::new(Router::new("vyos"));
//! let mut out = Vec::new();
//! for line in [
//!     "configure",
//!     "set interfaces ethernet eth0 address 10.0.0.1/24",
//!     "commit",
//!     "exit",
//!     "show ip route",
//! ] {
//!     session.execute(line, &mut out)?;
//! }
//! let text = String::from_utf8(out)?;
//! assert!(text.contains("C>* 10.0.0.0/24 is directly connected, eth0"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::io::{self, Write};

pub mod command;
pub mod commands;
pub mod completion;
pub mod pattern;
pub mod present;
pub mod registry;

pub use command::{Command, CommandError, ConfigPath, Context, Outcome, Verb};
pub use completion::{Completion, complete};
pub use pattern::{Args, Pattern, Segment};
pub use registry::{NOT_RECOGNIZED, Registry};

use crate::router::Router;

/// A router paired with the commands that drive it.
pub struct Session {
    router: Router,
    registry: Registry,
}

impl Session {
    /// A session over `router` with the built-in command set.
    pub fn new(router: Router) -> Self {
        Self::with_registry(router, Registry::default())
    }

    pub fn with_registry(router: Router, registry: Registry) -> Self {
        Self { router, registry }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn router_mut(&mut self) -> &mut Router {
        &mut self.router
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn prompt(&self) -> String {
        self.router.prompt()
    }

    /// Run one input line. See [`Registry::dispatch`].
    pub fn execute(&mut self, line: &str, out: &mut dyn Write) -> io::Result<Outcome> {
        self.registry.dispatch(&mut self.router, line, out)
    }

    /// Completion candidates for `line` with the cursor at `pos`.
    pub fn complete(&self, line: &str, pos: usize) -> Completion {
        complete(&self.registry, &self.router, line, pos)
    }

    pub fn into_router(self) -> Router {
        self.router
    }
}
