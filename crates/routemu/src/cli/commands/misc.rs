//! `save` and `help`.

use std::io::Write;

use super::Signature;
use crate::cli::command::{Command, CommandError, Context, Outcome};
use crate::cli::pattern::Args;

/// `save`: configuration does not persist, so this always fails.
pub struct Save(Signature);

impl Save {
    pub fn new() -> Self {
        Self(Signature::new("save", "Save the running configuration"))
    }
}

impl Command for Save {
    signature_accessors!();

    fn execute(&self, ctx: &mut Context<'_>, _args: &Args<'_>) -> Result<Outcome, CommandError> {
        ctx.router.save_configuration()?;
        Ok(Outcome::Continue)
    }
}

/// `help`: list every registered command.
pub struct Help(Signature);

impl Help {
    pub fn new() -> Self {
        Self(Signature::new("help", "List available commands"))
    }
}

impl Command for Help {
    signature_accessors!();

    fn execute(&self, ctx: &mut Context<'_>, _args: &Args<'_>) -> Result<Outcome, CommandError> {
        for command in ctx.catalog {
            writeln!(ctx.out, " - {}: {}", command.pattern(), command.description())?;
        }
        Ok(Outcome::Continue)
    }
}
