//! Routes command - evaluate a configuration into a routing table.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use routemu::output::{OutputFormat, OutputOptions, PrintableList, RouteList};

#[derive(Args)]
pub struct RoutesArgs {
    /// Configuration file
    pub file: PathBuf,

    /// Output JSON
    #[arg(short, long)]
    pub json: bool,

    /// Pretty print JSON
    #[arg(short, long)]
    pub pretty: bool,
}

pub fn run(args: RoutesArgs, interfaces: &[String]) -> anyhow::Result<()> {
    let (router, _) = crate::load(&args.file, interfaces)?;
    let routes = RouteList(router.ip_routes()?);

    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let opts = OutputOptions {
        headers: true,
        pretty: args.pretty,
    };

    let mut stdout = std::io::stdout().lock();
    routes.print(&mut stdout, format, &opts)?;
    stdout.flush()?;
    Ok(())
}
