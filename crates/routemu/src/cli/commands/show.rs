//! `show` commands.

use std::io::Write;

use super::Signature;
use crate::cli::command::{Command, CommandError, Context, Outcome};
use crate::cli::pattern::{Args, Pattern};
use crate::config::{self, ConfigFormat};
use crate::router::RouterMode;

/// Printed by `show configuration` for a router with nothing configured.
pub const NO_CONFIGURATION: &str = "/* No configuration */";

/// `show ip route`
pub struct ShowIpRoute(Signature);

impl ShowIpRoute {
    pub fn new() -> Self {
        Self(Signature::new("show ip route", "Display IP routing table"))
    }
}

impl Command for ShowIpRoute {
    signature_accessors!();

    fn available_in(&self, mode: RouterMode) -> bool {
        mode == RouterMode::Operational
    }

    fn execute(&self, ctx: &mut Context<'_>, _args: &Args<'_>) -> Result<Outcome, CommandError> {
        let table = ctx.router.show_ip_route()?;
        ctx.out.write_all(table.as_bytes())?;
        Ok(Outcome::Continue)
    }
}

/// `show interfaces`
pub struct ShowInterfaces(Signature);

impl ShowInterfaces {
    pub fn new() -> Self {
        Self(Signature::new("show interfaces", "Display interface status"))
    }
}

impl Command for ShowInterfaces {
    signature_accessors!();

    fn available_in(&self, mode: RouterMode) -> bool {
        mode == RouterMode::Operational
    }

    fn execute(&self, ctx: &mut Context<'_>, _args: &Args<'_>) -> Result<Outcome, CommandError> {
        let table = ctx.router.show_interfaces()?;
        ctx.out.write_all(table.as_bytes())?;
        Ok(Outcome::Continue)
    }
}

/// `show configuration` and `show configuration commands`.
///
/// Works in both modes and always shows the committed configuration.
pub struct ShowConfiguration {
    signature: Signature,
    format: ConfigFormat,
}

impl ShowConfiguration {
    pub fn new(format: ConfigFormat) -> Self {
        let signature = match format {
            ConfigFormat::Hierarchical => {
                Signature::new("show configuration", "Display the current configuration")
            }
            ConfigFormat::Flat => Signature::new(
                "show configuration commands",
                "Display the current configuration as set commands",
            ),
        };
        Self { signature, format }
    }
}

impl Command for ShowConfiguration {
    fn pattern(&self) -> &Pattern {
        &self.signature.pattern
    }

    fn description(&self) -> &str {
        &self.signature.description
    }

    fn execute(&self, ctx: &mut Context<'_>, _args: &Args<'_>) -> Result<Outcome, CommandError> {
        let text = config::generate(ctx.router, self.format);
        if text.is_empty() {
            writeln!(ctx.out, "{}", NO_CONFIGURATION)?;
        } else {
            ctx.out.write_all(text.as_bytes())?;
        }
        Ok(Outcome::Continue)
    }
}
