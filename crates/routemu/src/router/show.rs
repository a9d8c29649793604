//! Operational views: `show ip route` and `show interfaces`.
//!
//! Views are built from committed state only.

use std::fmt;
use std::net::Ipv4Addr;

use super::interface::RouterInterface;
use super::route::{RouteTarget, RoutingTable};
use super::status::InterfaceStatus;
use crate::util::addr::{InterfaceAddress, Ipv4Prefix, format_mac};

/// Route code legend printed above the routing table (VyOS wording).
pub const ROUTE_CODES: &str = "\
Codes: K - kernel route, C - connected, S - static, R - RIP,
       O - OSPF, I - IS-IS, B - BGP, E - EIGRP, N - NHRP,
       T - Table, v - VNC, V - VNC-Direct, A - Babel, F - PBR,
       f - OpenFabric,
       > - selected route, * - FIB route, q - queued, r - rejected, b - backup
       t - trapped, o - offload failure
";

/// Status code legend printed above the interface table.
pub const INTERFACE_CODES: &str = "Codes: S - State, L - Link, u - Up, D - Down, A - Admin Down";

/// Origin of a routing table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Connected,
    Static,
}

impl RouteKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Connected => "connected",
            Self::Static => "static",
        }
    }

    /// Row prefix: type code, selected, installed.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Connected => "C>*",
            Self::Static => "S>*",
        }
    }
}

/// One row of `show ip route`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteView {
    pub kind: RouteKind,
    pub destination: Ipv4Prefix,
    /// Administrative distance; static routes only.
    pub distance: Option<u8>,
    pub next_hop: Option<Ipv4Addr>,
    /// Exit interface: the connected interface, the static route's
    /// interface, or the interface whose subnet holds the next hop.
    pub interface: Option<String>,
}

impl RouteView {
    /// Build the sorted routing table rows for a committed configuration.
    ///
    /// Connected routes come from every admin-up interface with an address.
    /// Disabled static routes are left out. Rows sort by the destination
    /// network address as text, then by longer prefix first.
    pub fn collect(interfaces: &[RouterInterface], table: &RoutingTable) -> Vec<Self> {
        let connected: Vec<(Ipv4Prefix, &str)> = interfaces
            .iter()
            .filter_map(|i| i.connected_subnet().map(|s| (s, i.name())))
            .collect();

        let mut rows: Vec<Self> = connected
            .iter()
            .map(|(subnet, name)| Self {
                kind: RouteKind::Connected,
                destination: *subnet,
                distance: None,
                next_hop: None,
                interface: Some(name.to_string()),
            })
            .collect();

        for route in table.iter().filter(|r| !r.is_disabled()) {
            let (next_hop, interface) = match route.target() {
                RouteTarget::NextHop(gw) => (
                    Some(*gw),
                    connected
                        .iter()
                        .find(|(subnet, _)| subnet.contains(*gw))
                        .map(|(_, name)| name.to_string()),
                ),
                RouteTarget::Interface(name) => (None, Some(name.clone())),
            };
            rows.push(Self {
                kind: RouteKind::Static,
                destination: route.destination(),
                distance: Some(route.distance()),
                next_hop,
                interface,
            });
        }

        rows.sort_by(|a, b| {
            a.destination
                .network()
                .to_string()
                .cmp(&b.destination.network().to_string())
                .then(b.destination.prefix_len().cmp(&a.destination.prefix_len()))
        });
        rows
    }
}

impl fmt::Display for RouteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.prefix(), self.destination)?;
        match self.kind {
            RouteKind::Connected => {
                write!(
                    f,
                    " is directly connected, {}",
                    self.interface.as_deref().unwrap_or("-")
                )
            }
            RouteKind::Static => {
                write!(f, " [{}]", self.distance.unwrap_or(1))?;
                match (self.next_hop, self.interface.as_deref()) {
                    (Some(gw), Some(dev)) => write!(f, " via {}, {}", gw, dev),
                    (Some(gw), None) => write!(f, " via {}", gw),
                    (None, Some(dev)) => write!(f, " via {}", dev),
                    (None, None) => Ok(()),
                }
            }
        }
    }
}

/// Render the full `show ip route` output.
pub fn render_routes(rows: &[RouteView]) -> String {
    let mut out = String::from(ROUTE_CODES);
    out.push('\n');
    for row in rows {
        out.push_str(&row.to_string());
        out.push('\n');
    }
    out
}

/// One row of `show interfaces`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceView {
    pub name: String,
    pub address: Option<InterfaceAddress>,
    pub status: InterfaceStatus,
    pub mac: [u8; 6],
    pub vrf: String,
    pub mtu: u32,
    pub description: Option<String>,
}

impl From<&RouterInterface> for InterfaceView {
    fn from(iface: &RouterInterface) -> Self {
        Self {
            name: iface.name().to_string(),
            address: iface.get_address(),
            status: iface.status(),
            mac: iface.mac_address(),
            vrf: iface.get_vrf().to_string(),
            mtu: iface.get_mtu(),
            description: iface.get_description().map(str::to_string),
        }
    }
}

fn interface_row(f: &mut impl fmt::Write, cols: [&str; 7]) -> fmt::Result {
    write!(
        f,
        "{:<16} {:<33} {:<4} {:<17} {:<10} {:<6} {}",
        cols[0], cols[1], cols[2], cols[3], cols[4], cols[5], cols[6]
    )
}

impl fmt::Display for InterfaceView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let address = self
            .address
            .map(|a| a.to_string())
            .unwrap_or_else(|| "-".to_string());
        interface_row(
            f,
            [
                &self.name,
                &address,
                &self.status.to_string(),
                &format_mac(&self.mac),
                &self.vrf,
                &self.mtu.to_string(),
                self.description.as_deref().unwrap_or(""),
            ],
        )
    }
}

/// Render the full `show interfaces` output.
pub fn render_interfaces(rows: &[InterfaceView]) -> String {
    let mut out = String::new();
    out.push_str(INTERFACE_CODES);
    out.push('\n');
    // Writing into a String cannot fail.
    let _ = interface_row(
        &mut out,
        ["Interface", "IP Address", "S/L", "MAC", "VRF", "MTU", "Description"],
    );
    out.push('\n');
    let _ = interface_row(
        &mut out,
        ["---------", "----------", "---", "---", "---", "---", "-----------"],
    );
    out.push('\n');
    for row in rows {
        out.push_str(&row.to_string());
        out.push('\n');
    }
    out
}
