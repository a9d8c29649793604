//! Link-state resolution against an external topology.
//!
//! The router does not own the cabling. A [`NeighborLookup`] answers "what
//! is plugged into this interface", and the router derives the interface's
//! link state from that answer:
//!
//! - no neighbor: link down
//! - a switch port or host: link up
//! - another router's interface: link up only while that interface is
//!   administratively up
//!
//! The topology owner calls [`Router::update_link_state`] whenever a
//! connection is added or removed (both endpoints) and whenever an
//! interface's admin state changes (its neighbor only).
//!
//! [`Router::update_link_state`]: super::Router::update_link_state

use std::collections::HashMap;

use super::engine::Router;
use super::status::{AdminState, LinkState};
use crate::util::addr::InterfaceAddress;

/// What kind of device a peer interface belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerKind {
    /// An interface managed by a [`Router`].
    Router {
        /// Name of the owning router.
        router: String,
        /// The peer's current admin state.
        admin: AdminState,
    },
    /// A switch port. Always forwarding.
    SwitchPort,
    /// An end host NIC.
    Host,
}

/// The far end of a connection, as seen by the link-state resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerInterface {
    pub name: String,
    pub address: Option<InterfaceAddress>,
    pub mac: Option<[u8; 6]>,
    pub kind: PeerKind,
}

impl PeerInterface {
    /// A router interface peer.
    pub fn router(router: impl Into<String>, name: impl Into<String>, admin: AdminState) -> Self {
        Self {
            name: name.into(),
            address: None,
            mac: None,
            kind: PeerKind::Router {
                router: router.into(),
                admin,
            },
        }
    }

    /// Build a router peer from another router's committed interface.
    ///
    /// Returns `None` if the router has no interface with that name.
    pub fn from_router(router: &Router, interface: &str) -> Option<Self> {
        router
            .interfaces()
            .iter()
            .find(|i| i.name() == interface)
            .map(|i| Self {
                name: i.name().to_string(),
                address: i.get_address(),
                mac: Some(i.mac_address()),
                kind: PeerKind::Router {
                    router: router.name().to_string(),
                    admin: i.status().admin,
                },
            })
    }

    pub fn switch_port(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: None,
            mac: None,
            kind: PeerKind::SwitchPort,
        }
    }

    pub fn host(name: impl Into<String>, address: Option<InterfaceAddress>) -> Self {
        Self {
            name: name.into(),
            address,
            mac: None,
            kind: PeerKind::Host,
        }
    }

    /// Set the MAC address (builder style).
    pub fn with_mac(mut self, mac: [u8; 6]) -> Self {
        self.mac = Some(mac);
        self
    }

    /// Admin state, for router peers only.
    pub fn admin(&self) -> Option<AdminState> {
        match self.kind {
            PeerKind::Router { admin, .. } => Some(admin),
            _ => None,
        }
    }
}

/// Topology query used to resolve link state.
pub trait NeighborLookup {
    /// The peer connected to `interface` on `router`, if any.
    fn neighbor(&self, router: &str, interface: &str) -> Option<PeerInterface>;
}

/// Link state implied by a neighbor observation.
pub fn resolve(peer: Option<&PeerInterface>) -> LinkState {
    match peer {
        None => LinkState::Down,
        Some(peer) => match peer.admin() {
            Some(AdminState::AdminDown) => LinkState::Down,
            _ => LinkState::Up,
        },
    }
}

/// An in-memory neighbor table keyed by `(router, interface)`.
#[derive(Debug, Clone, Default)]
pub struct StaticNeighbors {
    links: HashMap<(String, String), PeerInterface>,
}

impl StaticNeighbors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `peer` is plugged into `interface` on `router`.
    ///
    /// One direction only; see [`connect_routers`](Self::connect_routers)
    /// for a router-to-router cable.
    pub fn connect(
        &mut self,
        router: impl Into<String>,
        interface: impl Into<String>,
        peer: PeerInterface,
    ) {
        self.links.insert((router.into(), interface.into()), peer);
    }

    /// Cable two router interfaces together, both directions.
    ///
    /// Returns `false` (and records nothing) if either interface is unknown.
    pub fn connect_routers(&mut self, a: &Router, a_if: &str, b: &Router, b_if: &str) -> bool {
        let (Some(peer_of_a), Some(peer_of_b)) =
            (PeerInterface::from_router(b, b_if), PeerInterface::from_router(a, a_if))
        else {
            return false;
        };
        self.connect(a.name(), a_if, peer_of_a);
        self.connect(b.name(), b_if, peer_of_b);
        true
    }

    /// Remove whatever is plugged into `interface` on `router`.
    pub fn disconnect(&mut self, router: &str, interface: &str) -> Option<PeerInterface> {
        self.links
            .remove(&(router.to_string(), interface.to_string()))
    }

    /// Refresh the recorded admin state of every peer that belongs to
    /// `router`, from its committed interfaces.
    ///
    /// Returns the `(router, interface)` keys whose peer changed; those are
    /// the interfaces whose link state needs recomputing.
    pub fn sync_admin(&mut self, router: &Router) -> Vec<(String, String)> {
        let mut changed = Vec::new();
        for (key, peer) in self.links.iter_mut() {
            let PeerKind::Router {
                router: ref owner,
                ref mut admin,
            } = peer.kind
            else {
                continue;
            };
            if owner != router.name() {
                continue;
            }
            let Some(current) = router
                .interfaces()
                .iter()
                .find(|i| i.name() == peer.name)
                .map(|i| i.status().admin)
            else {
                continue;
            };
            if *admin != current {
                *admin = current;
                changed.push(key.clone());
            }
        }
        changed
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl NeighborLookup for StaticNeighbors {
    fn neighbor(&self, router: &str, interface: &str) -> Option<PeerInterface> {
        self.links
            .get(&(router.to_string(), interface.to_string()))
            .cloned()
    }
}
