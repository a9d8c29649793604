//! Static routes and the routing table.

use std::fmt;
use std::net::Ipv4Addr;

use super::error::{Result, RouterError};
use crate::util::addr::Ipv4Prefix;

/// Administrative distance used when none is given.
pub const DEFAULT_DISTANCE: u8 = 1;

/// Where a static route sends traffic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RouteTarget {
    /// Forward to a gateway address.
    NextHop(Ipv4Addr),
    /// Send out of an interface, referenced by name.
    Interface(String),
}

impl RouteTarget {
    pub fn next_hop(&self) -> Option<Ipv4Addr> {
        match self {
            Self::NextHop(addr) => Some(*addr),
            Self::Interface(_) => None,
        }
    }

    pub fn interface(&self) -> Option<&str> {
        match self {
            Self::NextHop(_) => None,
            Self::Interface(name) => Some(name),
        }
    }

    /// Configuration keyword for this kind of target.
    pub fn keyword(&self) -> &'static str {
        match self {
            Self::NextHop(_) => "next-hop",
            Self::Interface(_) => "interface",
        }
    }
}

impl fmt::Display for RouteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NextHop(addr) => write!(f, "next-hop {}", addr),
            Self::Interface(name) => write!(f, "interface {}", name),
        }
    }
}

/// A static routing entry.
///
/// Equality ignores the `disabled` flag: a disabled route is still the
/// same route, so it can be found again to re-disable or delete it.
#[derive(Debug, Clone, Eq)]
pub struct StaticRoute {
    destination: Ipv4Prefix,
    target: RouteTarget,
    distance: u8,
    disabled: bool,
}

impl StaticRoute {
    /// Route via a gateway with the default distance.
    pub fn via(destination: Ipv4Prefix, next_hop: Ipv4Addr) -> Self {
        Self::new(destination, RouteTarget::NextHop(next_hop))
    }

    /// Route out of an interface with the default distance.
    pub fn dev(destination: Ipv4Prefix, interface: impl Into<String>) -> Self {
        Self::new(destination, RouteTarget::Interface(interface.into()))
    }

    pub fn new(destination: Ipv4Prefix, target: RouteTarget) -> Self {
        Self {
            destination,
            target,
            distance: DEFAULT_DISTANCE,
            disabled: false,
        }
    }

    /// Set the administrative distance, rejecting values outside 1..=255.
    pub fn with_distance(mut self, distance: u32) -> Result<Self> {
        self.distance = validate_distance(distance)?;
        Ok(self)
    }

    /// Mark the route disabled (builder style).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn destination(&self) -> Ipv4Prefix {
        self.destination
    }

    pub fn target(&self) -> &RouteTarget {
        &self.target
    }

    pub fn distance(&self) -> u8 {
        self.distance
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub(crate) fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }
}

impl PartialEq for StaticRoute {
    fn eq(&self, other: &Self) -> bool {
        self.destination == other.destination
            && self.target == other.target
            && self.distance == other.distance
    }
}

impl fmt::Display for StaticRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "route {} {}", self.destination, self.target)?;
        if self.distance != DEFAULT_DISTANCE {
            write!(f, " distance {}", self.distance)?;
        }
        if self.disabled {
            write!(f, " disable")?;
        }
        Ok(())
    }
}

/// Validate an administrative distance.
pub fn validate_distance(distance: u32) -> Result<u8> {
    match u8::try_from(distance) {
        Ok(d) if d >= 1 => Ok(d),
        _ => Err(RouterError::InvalidDistance(distance)),
    }
}

/// Ordered list of static routes.
///
/// The table does not deduplicate; the engine checks before inserting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingTable {
    routes: Vec<StaticRoute>,
}

impl RoutingTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> &[StaticRoute] {
        &self.routes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StaticRoute> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn contains(&self, route: &StaticRoute) -> bool {
        self.routes.contains(route)
    }

    /// The stored entry equal to `route`, disabled or not.
    pub fn find(&self, route: &StaticRoute) -> Option<&StaticRoute> {
        self.routes.iter().find(|r| *r == route)
    }

    pub(crate) fn find_mut(&mut self, route: &StaticRoute) -> Option<&mut StaticRoute> {
        self.routes.iter_mut().find(|r| *r == route)
    }

    pub(crate) fn push(&mut self, route: StaticRoute) {
        self.routes.push(route);
    }

    /// Remove the first entry equal to `route`. Returns whether one was found.
    pub(crate) fn remove(&mut self, route: &StaticRoute) -> bool {
        match self.routes.iter().position(|r| r == route) {
            Some(idx) => {
                self.routes.remove(idx);
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.routes.clear();
    }
}

impl<'a> IntoIterator for &'a RoutingTable {
    type Item = &'a StaticRoute;
    type IntoIter = std::slice::Iter<'a, StaticRoute>;

    fn into_iter(self) -> Self::IntoIter {
        self.routes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_route() -> StaticRoute {
        StaticRoute::via(Ipv4Prefix::default_route(), Ipv4Addr::new(10, 0, 0, 254))
    }

    #[test]
    fn test_equality_ignores_disabled() {
        let enabled = default_route();
        let disabled = default_route().disabled(true);
        assert_eq!(enabled, disabled);
    }

    #[test]
    fn test_equality_includes_distance() {
        let a = default_route();
        let b = default_route().with_distance(10).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_distance_bounds() {
        assert!(default_route().with_distance(1).is_ok());
        assert!(default_route().with_distance(255).is_ok());
        assert_eq!(
            default_route().with_distance(0),
            Err(RouterError::InvalidDistance(0))
        );
        assert_eq!(
            default_route().with_distance(256),
            Err(RouterError::InvalidDistance(256))
        );
    }

    #[test]
    fn test_table_find_and_remove() {
        let mut table = RoutingTable::new();
        table.push(default_route().disabled(true));
        assert!(table.contains(&default_route()));
        assert!(table.find(&default_route()).unwrap().is_disabled());

        assert!(table.remove(&default_route()));
        assert!(!table.remove(&default_route()));
        assert!(table.is_empty());
    }

    #[test]
    fn test_display() {
        let route = StaticRoute::dev("192.168.0.0/16".parse().unwrap(), "eth1")
            .with_distance(20)
            .unwrap()
            .disabled(true);
        assert_eq!(
            route.to_string(),
            "route 192.168.0.0/16 interface eth1 distance 20 disable"
        );
    }
}
