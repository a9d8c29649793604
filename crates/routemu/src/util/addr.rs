//! Address parsing and formatting utilities.
//!
//! The router core consumes IPv4 values only: interface addresses in CIDR
//! form ([`InterfaceAddress`]), destination prefixes ([`Ipv4Prefix`]) and
//! plain next-hop addresses.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Error type for address parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddrError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid prefix length: {0}")]
    InvalidPrefix(String),

    #[error("missing prefix length: {0}")]
    MissingPrefix(String),

    #[error("{0} is not a network prefix (host bits are set)")]
    HostBitsSet(String),

    #[error("invalid MAC address: {0}")]
    InvalidMac(String),
}

pub type Result<T> = std::result::Result<T, AddrError>;

/// Parse an IPv4 address from string.
pub fn parse_addr(s: &str) -> Result<Ipv4Addr> {
    s.parse()
        .map_err(|_| AddrError::InvalidAddress(s.to_string()))
}

/// Parse an IPv4 address with a mandatory prefix length (CIDR notation).
/// Returns (address, prefix_length).
pub fn parse_prefix(s: &str) -> Result<(Ipv4Addr, u8)> {
    let (addr_str, prefix_str) = s
        .split_once('/')
        .ok_or_else(|| AddrError::MissingPrefix(s.to_string()))?;

    let addr = parse_addr(addr_str)?;
    let prefix: u8 = prefix_str
        .parse()
        .map_err(|_| AddrError::InvalidPrefix(prefix_str.to_string()))?;

    if prefix > 32 {
        return Err(AddrError::InvalidPrefix(format!(
            "{} exceeds maximum 32 for IPv4",
            prefix
        )));
    }

    Ok((addr, prefix))
}

/// Format an IPv4 address with prefix.
pub fn format_prefix(addr: &Ipv4Addr, prefix: u8) -> String {
    format!("{}/{}", addr, prefix)
}

/// Network mask for a prefix length.
pub fn prefix_mask(prefix_len: u8) -> u32 {
    if prefix_len == 0 {
        0
    } else {
        !0u32 << (32 - u32::from(prefix_len.min(32)))
    }
}

/// Check if an IPv4 address is in a given prefix.
pub fn ipv4_in_prefix(addr: Ipv4Addr, prefix_addr: Ipv4Addr, prefix_len: u8) -> bool {
    if prefix_len > 32 {
        return false;
    }

    let mask = prefix_mask(prefix_len);
    (u32::from(addr) & mask) == (u32::from(prefix_addr) & mask)
}

/// Parse a MAC address from string.
pub fn parse_mac(s: &str) -> Result<[u8; 6]> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 6 {
        return Err(AddrError::InvalidMac(s.to_string()));
    }

    let mut mac = [0u8; 6];
    for (i, part) in parts.iter().enumerate() {
        mac[i] = u8::from_str_radix(part, 16).map_err(|_| AddrError::InvalidMac(s.to_string()))?;
    }

    Ok(mac)
}

/// Format a MAC address.
pub fn format_mac(bytes: &[u8; 6]) -> String {
    format!(
        "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5]
    )
}

/// An IPv4 destination prefix such as `192.168.1.0/24`.
///
/// The address is always the network address: parsing rejects values with
/// host bits set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ipv4Prefix {
    network: Ipv4Addr,
    len: u8,
}

impl Ipv4Prefix {
    /// Create a prefix, masking away any host bits.
    pub fn new(addr: Ipv4Addr, len: u8) -> Self {
        let len = len.min(32);
        Self {
            network: Ipv4Addr::from(u32::from(addr) & prefix_mask(len)),
            len,
        }
    }

    /// The default route, `0.0.0.0/0`.
    pub fn default_route() -> Self {
        Self::new(Ipv4Addr::UNSPECIFIED, 0)
    }

    pub fn network(&self) -> Ipv4Addr {
        self.network
    }

    pub fn prefix_len(&self) -> u8 {
        self.len
    }

    /// Check whether `addr` falls inside this prefix.
    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        ipv4_in_prefix(addr, self.network, self.len)
    }
}

impl FromStr for Ipv4Prefix {
    type Err = AddrError;

    fn from_str(s: &str) -> Result<Self> {
        let (addr, len) = parse_prefix(s)?;
        let prefix = Self::new(addr, len);
        if prefix.network != addr {
            return Err(AddrError::HostBitsSet(s.to_string()));
        }
        Ok(prefix)
    }
}

impl fmt::Display for Ipv4Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network, self.len)
    }
}

/// Which reserved address of a prefix a value collides with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservedAddress {
    /// All host bits zero.
    Network,
    /// All host bits one.
    Broadcast,
}

impl ReservedAddress {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Broadcast => "broadcast",
        }
    }
}

/// An address assigned to an interface: host address plus prefix length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InterfaceAddress {
    ip: Ipv4Addr,
    prefix_len: u8,
}

impl InterfaceAddress {
    pub fn new(ip: Ipv4Addr, prefix_len: u8) -> Self {
        Self {
            ip,
            prefix_len: prefix_len.min(32),
        }
    }

    pub fn ip(&self) -> Ipv4Addr {
        self.ip
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// The connected subnet this address lives in.
    pub fn subnet(&self) -> Ipv4Prefix {
        Ipv4Prefix::new(self.ip, self.prefix_len)
    }

    fn host_bits(&self) -> (u32, u32) {
        let host_mask = !prefix_mask(self.prefix_len);
        (u32::from(self.ip) & host_mask, host_mask)
    }

    /// `/31` and `/32` have no distinct network/broadcast addresses.
    fn has_reserved_addresses(&self) -> bool {
        self.prefix_len < 31
    }

    pub fn is_network_address(&self) -> bool {
        self.has_reserved_addresses() && self.host_bits().0 == 0
    }

    pub fn is_broadcast_address(&self) -> bool {
        let (host, mask) = self.host_bits();
        self.has_reserved_addresses() && host == mask
    }

    /// Which reserved address this value is, if any.
    pub fn reserved(&self) -> Option<ReservedAddress> {
        if self.is_network_address() {
            Some(ReservedAddress::Network)
        } else if self.is_broadcast_address() {
            Some(ReservedAddress::Broadcast)
        } else {
            None
        }
    }

    /// The nearest usable host address in the same prefix.
    ///
    /// Network addresses move up by one, broadcast addresses down by one;
    /// anything else is returned unchanged.
    pub fn nearest_host(&self) -> Self {
        let raw = u32::from(self.ip);
        let ip = match self.reserved() {
            Some(ReservedAddress::Network) => raw.wrapping_add(1),
            Some(ReservedAddress::Broadcast) => raw.wrapping_sub(1),
            None => raw,
        };
        Self::new(Ipv4Addr::from(ip), self.prefix_len)
    }
}

impl FromStr for InterfaceAddress {
    type Err = AddrError;

    fn from_str(s: &str) -> Result<Self> {
        let (ip, len) = parse_prefix(s)?;
        Ok(Self::new(ip, len))
    }
}

impl fmt::Display for InterfaceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_prefix(&self.ip, self.prefix_len))
    }
}
