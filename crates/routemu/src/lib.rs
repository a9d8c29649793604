//! VyOS style router configuration emulator.
//!
//! This crate emulates the configuration plane of a VyOS router: a staged
//! (candidate) configuration edited in configuration mode, committed into
//! the running configuration, and inspected with operational `show`
//! commands. It has no data plane and performs no real networking.
//!
//! # Features
//!
//! - `output` - JSON/text output formatting for the `show` views
//!
//! # Example
//!
//! ```
//! use routemu::cli::Session;
//! use routemu::router::Router;
//!
//! let mut session = Session::new(Router::new("vyos"));
//! let mut out = Vec::new();
//! session.execute("configure", &mut out)?;
//! session.execute("set protocols static route 0.0.0.0/0 interface eth0", &mut out)?;
//! session.execute("commit", &mut out)?;
//! assert_eq!(String::from_utf8(out)?, "[edit]\n[edit]\n[edit]\n");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Configuration text
//!
//! ```
//! use routemu::config;
//! use routemu::router::Router;
//!
//! let mut router = Router::new("vyos");
//! let loaded = config::load_configuration(
//!     &mut router,
//!     "set interfaces ethernet eth0 address 192.168.1.1/24\n",
//! )?;
//! assert_eq!(loaded, 1);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Core modules (always available)
pub mod cli;
pub mod config;
pub mod router;
pub mod util;

// Feature-gated modules
#[cfg(feature = "output")]
pub mod output;

// Re-export common types at crate root for convenience
pub use cli::{Outcome, Registry, Session};
pub use config::{ConfigError, ConfigFormat};
pub use router::{Router, RouterError, RouterMode, Result};
