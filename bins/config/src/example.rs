//! Example command - print an example configuration.

use clap::Args;
use routemu::config::{self, ConfigFormat};
use routemu::router::{Router, RouterInterface};

use crate::Syntax;

#[derive(Args)]
pub struct ExampleArgs {
    /// Output syntax
    #[arg(short, long, value_enum, default_value = "hierarchical")]
    pub format: Syntax,
}

/// A small edge router: WAN uplink, LAN, a disabled spare port, and a
/// floating default route.
const EXAMPLE: &str = "\
set interfaces ethernet eth0 address 203.0.113.2/30
set interfaces ethernet eth1 address 192.168.10.1/24
set interfaces ethernet eth2 disable
set protocols static route 0.0.0.0/0 next-hop 203.0.113.1
set protocols static route 0.0.0.0/0 next-hop 192.168.10.254 distance 200
set protocols static route 10.10.0.0/16 interface eth1
";

pub fn run(args: ExampleArgs) -> anyhow::Result<()> {
    let mut router = Router::with_interfaces(
        "vyos",
        ["eth0", "eth1", "eth2", "lo"].map(RouterInterface::new),
    )?;
    config::load_configuration(&mut router, EXAMPLE)?;
    print!("{}", config::generate(&router, ConfigFormat::from(args.format)));
    Ok(())
}
