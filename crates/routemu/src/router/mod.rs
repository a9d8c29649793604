//! The router configuration engine.
//!
//! - [`Router`] - committed/staged configuration, modes, transactions
//! - [`RouterInterface`] - an L3 interface with admin and link state
//! - [`StaticRoute`] / [`RoutingTable`] - static routing entries
//! - [`link_state`] - link-state resolution from an external topology
//! - [`show`] - `show ip route` and `show interfaces` views
//!
//! The engine performs no I/O and no logging. Errors are typed
//! ([`RouterError`]) and left to the caller to present.

mod engine;
mod error;
mod interface;
pub mod link_state;
mod route;
pub mod show;
mod status;

pub use engine::{DEFAULT_INTERFACES, Router, RouterMode};
pub use error::{Missing, Result, RouterError};
pub use interface::{DEFAULT_MTU, DEFAULT_VRF, LOOPBACK_MTU, RouterInterface};
pub use link_state::{NeighborLookup, PeerInterface, PeerKind, StaticNeighbors};
pub use route::{DEFAULT_DISTANCE, RouteTarget, RoutingTable, StaticRoute, validate_distance};
pub use show::{InterfaceView, RouteKind, RouteView};
pub use status::{AdminState, InterfaceStatus, LinkState};
