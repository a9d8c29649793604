//! Shared utilities for routemu.

pub mod addr;

pub use addr::{AddrError, InterfaceAddress, Ipv4Prefix, ReservedAddress, parse_addr, parse_prefix};
