//! Router interface entity.

use std::sync::atomic::{AtomicU32, Ordering};

use super::status::{AdminState, InterfaceStatus, LinkState};
use crate::util::addr::{InterfaceAddress, Ipv4Prefix, format_mac};

/// VRF every interface starts in.
pub const DEFAULT_VRF: &str = "default";

/// MTU for Ethernet-like and unknown interfaces.
pub const DEFAULT_MTU: u32 = 1500;

/// MTU for loopback interfaces.
pub const LOOPBACK_MTU: u32 = 65536;

static NEXT_MAC: AtomicU32 = AtomicU32::new(0);

/// Allocate a locally administered unicast MAC (`02:00:xx:xx:xx:xx`).
fn next_mac() -> [u8; 6] {
    let n = NEXT_MAC.fetch_add(1, Ordering::Relaxed).to_be_bytes();
    [0x02, 0x00, n[0], n[1], n[2], n[3]]
}

fn default_mtu(name: &str) -> u32 {
    if name.starts_with("lo") {
        LOOPBACK_MTU
    } else {
        DEFAULT_MTU
    }
}

/// A layer 3 interface owned by a router.
///
/// The name is the interface's identity: it never changes after creation
/// and is how routes and the topology refer to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterInterface {
    name: String,
    address: Option<InterfaceAddress>,
    mac: [u8; 6],
    status: InterfaceStatus,
    mtu: u32,
    vrf: String,
    description: Option<String>,
}

impl RouterInterface {
    /// Create an interface with default parameters for its name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            mtu: default_mtu(&name),
            name,
            address: None,
            mac: next_mac(),
            status: InterfaceStatus::default(),
            vrf: DEFAULT_VRF.to_string(),
            description: None,
        }
    }

    /// Set the MTU (builder style).
    pub fn mtu(mut self, mtu: u32) -> Self {
        self.mtu = mtu;
        self
    }

    /// Set the VRF name (builder style).
    pub fn vrf(mut self, vrf: impl Into<String>) -> Self {
        self.vrf = vrf.into();
        self
    }

    /// Set the description (builder style).
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the MAC address (builder style).
    pub fn mac(mut self, mac: [u8; 6]) -> Self {
        self.mac = mac;
        self
    }

    /// Set the initial address (builder style). Not validated.
    pub fn address(mut self, address: InterfaceAddress) -> Self {
        self.address = Some(address);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_address(&self) -> Option<InterfaceAddress> {
        self.address
    }

    pub fn mac_address(&self) -> [u8; 6] {
        self.mac
    }

    pub fn mac_string(&self) -> String {
        format_mac(&self.mac)
    }

    pub fn status(&self) -> InterfaceStatus {
        self.status
    }

    pub fn get_mtu(&self) -> u32 {
        self.mtu
    }

    pub fn get_vrf(&self) -> &str {
        &self.vrf
    }

    pub fn get_description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// The connected subnet, if an address is set.
    pub fn subnet(&self) -> Option<Ipv4Prefix> {
        self.address.map(|a| a.subnet())
    }

    /// Administratively disabled.
    pub fn is_disabled(&self) -> bool {
        self.status.admin == AdminState::AdminDown
    }

    /// Admin up with carrier.
    pub fn is_operational(&self) -> bool {
        self.status.is_admin_up() && self.status.is_link_up()
    }

    /// The subnet this interface contributes as a connected route.
    ///
    /// Requires an address and admin up; link state does not matter.
    pub fn connected_subnet(&self) -> Option<Ipv4Prefix> {
        if self.status.is_admin_up() {
            self.subnet()
        } else {
            None
        }
    }

    pub(crate) fn set_address(&mut self, address: Option<InterfaceAddress>) {
        self.address = address;
    }

    pub(crate) fn set_admin(&mut self, admin: AdminState) {
        self.status = self.status.with_admin(admin);
    }

    pub(crate) fn set_link(&mut self, link: LinkState) {
        self.status = self.status.with_link(link);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let eth = RouterInterface::new("eth0");
        assert_eq!(eth.get_mtu(), 1500);
        assert_eq!(eth.get_vrf(), "default");
        assert_eq!(eth.status().to_string(), "u/D");
        assert_eq!(eth.get_address(), None);
        assert!(!eth.is_disabled());
        assert!(!eth.is_operational());

        assert_eq!(RouterInterface::new("lo").get_mtu(), 65536);
        assert_eq!(RouterInterface::new("wan").get_mtu(), 1500);
    }

    #[test]
    fn test_macs_are_unique_and_local() {
        let a = RouterInterface::new("eth0");
        let b = RouterInterface::new("eth0");
        assert_ne!(a.mac_address(), b.mac_address());
        assert_eq!(a.mac_address()[0] & 0x02, 0x02);
        assert_eq!(a.mac_address()[0] & 0x01, 0);
    }

    #[test]
    fn test_connected_subnet_requires_admin_up() {
        let mut eth = RouterInterface::new("eth0").address("10.0.0.1/24".parse().unwrap());
        assert_eq!(
            eth.connected_subnet().map(|s| s.to_string()),
            Some("10.0.0.0/24".to_string())
        );

        eth.set_admin(AdminState::AdminDown);
        assert!(eth.is_disabled());
        assert_eq!(eth.connected_subnet(), None);
    }
}
