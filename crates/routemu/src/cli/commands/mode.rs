//! Mode and transaction commands: `configure`, `commit`, `exit`,
//! `exit discard`, `discard`.

use std::io::Write;

use super::Signature;
use crate::cli::command::{Command, CommandError, Context, Outcome, say};
use crate::cli::pattern::Args;
use crate::router::{RouterError, RouterMode};

/// Printed after every successful configuration-mode command.
pub const EDIT: &str = "[edit]";

/// `configure`
pub struct Configure(Signature);

impl Configure {
    pub fn new() -> Self {
        Self(Signature::new("configure", "Enter configuration mode"))
    }
}

impl Command for Configure {
    signature_accessors!();

    fn available_in(&self, mode: RouterMode) -> bool {
        mode == RouterMode::Operational
    }

    fn execute(&self, ctx: &mut Context<'_>, _args: &Args<'_>) -> Result<Outcome, CommandError> {
        if ctx.router.mode() == RouterMode::Configuration {
            return say(ctx.out, "\n\tInvalid command: [configure]\n\n[edit]");
        }
        ctx.router.set_mode(RouterMode::Configuration)?;
        say(ctx.out, EDIT)
    }
}

/// `commit`
pub struct Commit(Signature);

impl Commit {
    pub fn new() -> Self {
        Self(Signature::new("commit", "Commit configuration changes"))
    }
}

impl Command for Commit {
    signature_accessors!();

    fn available_in(&self, mode: RouterMode) -> bool {
        mode == RouterMode::Configuration
    }

    fn execute(&self, ctx: &mut Context<'_>, _args: &Args<'_>) -> Result<Outcome, CommandError> {
        match ctx.router.commit_changes() {
            Ok(()) => {
                tracing::info!(router = ctx.router.name(), "configuration committed");
                say(ctx.out, EDIT)
            }
            Err(e @ RouterError::NoChangesToCommit) => {
                writeln!(ctx.out, "{}", e)?;
                say(ctx.out, EDIT)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// `exit`
///
/// Leaves configuration mode, refusing while changes are uncommitted. In
/// operational mode it ends the session.
pub struct Exit(Signature);

impl Exit {
    pub fn new() -> Self {
        Self(Signature::new("exit", "Exit configuration mode"))
    }
}

impl Command for Exit {
    signature_accessors!();

    fn execute(&self, ctx: &mut Context<'_>, _args: &Args<'_>) -> Result<Outcome, CommandError> {
        if ctx.router.mode() == RouterMode::Operational {
            return Ok(Outcome::Exit);
        }
        ctx.router.set_mode(RouterMode::Operational)?;
        say(ctx.out, "exit")
    }
}

/// `exit discard`
pub struct ExitDiscard(Signature);

impl ExitDiscard {
    pub fn new() -> Self {
        Self(Signature::new(
            "exit discard",
            "Exit configuration mode and forcibly discard changes",
        ))
    }
}

impl Command for ExitDiscard {
    signature_accessors!();

    fn available_in(&self, mode: RouterMode) -> bool {
        mode == RouterMode::Configuration
    }

    fn execute(&self, ctx: &mut Context<'_>, _args: &Args<'_>) -> Result<Outcome, CommandError> {
        if ctx.router.has_uncommitted_changes() {
            tracing::debug!(router = ctx.router.name(), "discarding staged changes on exit");
        }
        ctx.router.set_mode_forced(RouterMode::Operational);
        say(ctx.out, "exit")
    }
}

/// `discard`
pub struct Discard(Signature);

impl Discard {
    pub fn new() -> Self {
        Self(Signature::new(
            "discard",
            "Discard uncommitted changes and stay in configuration mode",
        ))
    }
}

impl Command for Discard {
    signature_accessors!();

    fn available_in(&self, mode: RouterMode) -> bool {
        mode == RouterMode::Configuration
    }

    fn execute(&self, ctx: &mut Context<'_>, _args: &Args<'_>) -> Result<Outcome, CommandError> {
        ctx.router.discard_changes()?;
        say(ctx.out, EDIT)
    }
}
