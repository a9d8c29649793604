//! Check and convert commands.

use std::path::PathBuf;

use clap::Args;
use routemu::config::{self, ConfigFormat};

use crate::Syntax;

#[derive(Args)]
pub struct CheckArgs {
    /// Configuration file
    pub file: PathBuf,
}

#[derive(Args)]
pub struct ConvertArgs {
    /// Configuration file (syntax is detected)
    pub file: PathBuf,

    /// Target syntax
    #[arg(short, long, value_enum)]
    pub to: Syntax,
}

pub fn run_check(args: CheckArgs, interfaces: &[String]) -> anyhow::Result<()> {
    let (_, applied) = crate::load(&args.file, interfaces)?;
    println!("{}: OK ({} statements)", args.file.display(), applied);
    Ok(())
}

pub fn run_convert(args: ConvertArgs, interfaces: &[String]) -> anyhow::Result<()> {
    let (router, _) = crate::load(&args.file, interfaces)?;
    print!("{}", config::generate(&router, ConfigFormat::from(args.to)));
    Ok(())
}
