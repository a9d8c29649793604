//! The configuration engine.
//!
//! A [`Router`] holds two copies of its configuration: the committed one
//! that is active, and a staged (candidate) one that configuration-mode
//! commands edit. `commit` promotes staged to committed; `discard` throws
//! the staged edits away.
//!
//! # Example
//!
//! ```
//! use routemu::router::{Router, RouterMode, StaticRoute};
//!
//! let mut router = Router::new("R1");
//! router.set_mode(RouterMode::Configuration)?;
//! router.configure_interface_address("eth0", "10.0.0.1/24".parse()?)?;
//! router.add_route(StaticRoute::via("0.0.0.0/0".parse()?, "10.0.0.254".parse()?))?;
//! router.commit_changes()?;
//! router.set_mode(RouterMode::Operational)?;
//!
//! let table = router.show_ip_route()?;
//! assert!(table.contains("C>* 10.0.0.0/24 is directly connected, eth0"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::HashSet;
use std::fmt;

use super::error::{Missing, Result, RouterError};
use super::interface::RouterInterface;
use super::link_state::{self, NeighborLookup};
use super::route::{RouteTarget, RoutingTable, StaticRoute};
use super::show::{self, InterfaceView, RouteView};
use super::status::{AdminState, LinkState};
use crate::util::addr::InterfaceAddress;

/// Interfaces a router starts with when none are given.
pub const DEFAULT_INTERFACES: [&str; 2] = ["eth0", "lo"];

/// Session mode of a router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RouterMode {
    #[default]
    Operational,
    Configuration,
}

impl RouterMode {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Operational => "operational",
            Self::Configuration => "configuration",
        }
    }

    /// Prompt terminator: `$` in operational mode, `#` in configuration mode.
    pub fn prompt_char(&self) -> char {
        match self {
            Self::Operational => '$',
            Self::Configuration => '#',
        }
    }
}

impl fmt::Display for RouterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An emulated router: committed and staged configuration plus session mode.
///
/// Routes refer to interfaces by name, so copying one configuration into the
/// other is a plain clone.
#[derive(Debug, Clone)]
pub struct Router {
    name: String,
    mode: RouterMode,
    interfaces: Vec<RouterInterface>,
    routes: RoutingTable,
    staged_interfaces: Vec<RouterInterface>,
    staged_routes: RoutingTable,
    dirty: bool,
}

fn default_interfaces() -> Vec<RouterInterface> {
    DEFAULT_INTERFACES
        .iter()
        .map(|name| RouterInterface::new(*name))
        .collect()
}

impl Router {
    /// Create a router with the default interfaces (`eth0`, `lo`).
    pub fn new(name: impl Into<String>) -> Self {
        Self::build(name.into(), default_interfaces())
    }

    /// Create a router with an explicit interface list.
    ///
    /// Interface names must be unique.
    pub fn with_interfaces(
        name: impl Into<String>,
        interfaces: impl IntoIterator<Item = RouterInterface>,
    ) -> Result<Self> {
        let interfaces: Vec<RouterInterface> = interfaces.into_iter().collect();
        let mut seen = HashSet::new();
        for iface in &interfaces {
            if !seen.insert(iface.name()) {
                return Err(RouterError::duplicate(format!(
                    "Interface {}",
                    iface.name()
                )));
            }
        }
        Ok(Self::build(name.into(), interfaces))
    }

    fn build(name: String, interfaces: Vec<RouterInterface>) -> Self {
        Self {
            name,
            mode: RouterMode::Operational,
            staged_interfaces: interfaces.clone(),
            interfaces,
            routes: RoutingTable::new(),
            staged_routes: RoutingTable::new(),
            dirty: false,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mode(&self) -> RouterMode {
        self.mode
    }

    /// Whether the staged configuration differs from the committed one.
    pub fn has_uncommitted_changes(&self) -> bool {
        self.dirty
    }

    /// Committed interfaces.
    pub fn interfaces(&self) -> &[RouterInterface] {
        &self.interfaces
    }

    /// Committed routing table.
    pub fn routing_table(&self) -> &RoutingTable {
        &self.routes
    }

    pub fn staged_interfaces(&self) -> &[RouterInterface] {
        &self.staged_interfaces
    }

    pub fn staged_routing_table(&self) -> &RoutingTable {
        &self.staged_routes
    }

    /// Look up an interface in the configuration the current mode edits:
    /// staged in configuration mode, committed otherwise.
    pub fn find_interface(&self, name: &str) -> Option<&RouterInterface> {
        let list = match self.mode {
            RouterMode::Configuration => &self.staged_interfaces,
            RouterMode::Operational => &self.interfaces,
        };
        list.iter().find(|i| i.name() == name)
    }

    /// VyOS style prompt, e.g. `vyos$ ` or `vyos# `.
    pub fn prompt(&self) -> String {
        format!("{}{} ", self.name, self.mode.prompt_char())
    }

    // ------------------------------------------------------------------
    // Mode transitions
    // ------------------------------------------------------------------

    /// Switch mode.
    ///
    /// Entering configuration mode from operational mode restages the
    /// committed configuration. Leaving configuration mode fails with
    /// [`RouterError::UncommittedChanges`] while staged edits are pending.
    pub fn set_mode(&mut self, mode: RouterMode) -> Result<()> {
        if self.mode == RouterMode::Configuration
            && mode != RouterMode::Configuration
            && self.dirty
        {
            return Err(RouterError::UncommittedChanges);
        }
        if self.mode == RouterMode::Operational && mode == RouterMode::Configuration {
            self.restage();
        }
        self.mode = mode;
        Ok(())
    }

    /// Switch mode, discarding staged edits if leaving configuration mode.
    pub fn set_mode_forced(&mut self, mode: RouterMode) {
        if self.mode == RouterMode::Configuration && self.dirty {
            self.restage();
        }
        if self.mode == RouterMode::Operational && mode == RouterMode::Configuration {
            self.restage();
        }
        self.mode = mode;
    }

    fn require_configuration(&self, command: &str) -> Result<()> {
        if self.mode == RouterMode::Configuration {
            Ok(())
        } else {
            Err(RouterError::invalid_mode(command))
        }
    }

    fn require_operational(&self, command: &str) -> Result<()> {
        if self.mode == RouterMode::Operational {
            Ok(())
        } else {
            Err(RouterError::invalid_mode(command))
        }
    }

    /// Staged := committed, clean.
    fn restage(&mut self) {
        self.staged_interfaces = self.interfaces.clone();
        self.staged_routes = self.routes.clone();
        self.dirty = false;
    }

    fn staged_interface_mut(&mut self, name: &str) -> Result<&mut RouterInterface> {
        self.staged_interfaces
            .iter_mut()
            .find(|i| i.name() == name)
            .ok_or_else(|| RouterError::interface_not_found(name))
    }

    // ------------------------------------------------------------------
    // Static routes
    // ------------------------------------------------------------------

    /// Add a static route to the staged table.
    pub fn add_route(&mut self, route: StaticRoute) -> Result<()> {
        self.require_configuration("set [protocols]")?;
        if let RouteTarget::Interface(name) = route.target()
            && !self.staged_interfaces.iter().any(|i| i.name() == name)
        {
            return Err(RouterError::interface_not_found(name.as_str()));
        }
        if self.staged_routes.contains(&route) {
            return Err(RouterError::duplicate("Route"));
        }
        self.staged_routes.push(route);
        self.dirty = true;
        Ok(())
    }

    /// Remove a static route from the staged table. The disabled flag of
    /// `route` is ignored when matching.
    pub fn remove_route(&mut self, route: &StaticRoute) -> Result<()> {
        self.require_configuration("delete [protocols]")?;
        if !self.staged_routes.remove(route) {
            return Err(RouterError::NotFound {
                what: Missing::Route,
            });
        }
        self.dirty = true;
        Ok(())
    }

    /// Disable a staged static route in place.
    pub fn disable_route(&mut self, route: &StaticRoute) -> Result<()> {
        self.require_configuration("set [protocols]")?;
        let existing = self
            .staged_routes
            .find_mut(route)
            .ok_or(RouterError::NotFound {
                what: Missing::Route,
            })?;
        if existing.is_disabled() {
            return Err(RouterError::duplicate("Route"));
        }
        existing.set_disabled(true);
        self.dirty = true;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Interfaces
    // ------------------------------------------------------------------

    /// Set the address of a staged interface.
    ///
    /// Network and broadcast addresses of the prefix are rejected, except on
    /// `/31` and `/32`.
    pub fn configure_interface_address(
        &mut self,
        name: &str,
        address: InterfaceAddress,
    ) -> Result<()> {
        self.require_configuration("set [interfaces]")?;
        let iface = self.staged_interface_mut(name)?;
        if let Some(kind) = address.reserved() {
            return Err(RouterError::InvalidAddress { address, kind });
        }
        if iface.get_address() == Some(address) {
            return Err(RouterError::duplicate("Configuration"));
        }
        iface.set_address(Some(address));
        self.dirty = true;
        Ok(())
    }

    /// Administratively disable a staged interface. Link state is kept.
    pub fn disable_interface(&mut self, name: &str) -> Result<()> {
        self.require_configuration("set [interfaces]")?;
        let iface = self.staged_interface_mut(name)?;
        if iface.is_disabled() {
            return Err(RouterError::duplicate("Configuration"));
        }
        iface.set_admin(AdminState::AdminDown);
        self.dirty = true;
        Ok(())
    }

    /// Administratively enable a staged interface. Link state is kept.
    pub fn enable_interface(&mut self, name: &str) -> Result<()> {
        self.require_configuration("delete [interfaces]")?;
        let iface = self.staged_interface_mut(name)?;
        if !iface.is_disabled() {
            return Err(RouterError::NotFound {
                what: Missing::DisableFlag,
            });
        }
        iface.set_admin(AdminState::Up);
        self.dirty = true;
        Ok(())
    }

    /// Remove the address of a staged interface.
    pub fn delete_interface_address(&mut self, name: &str) -> Result<()> {
        self.require_configuration("delete [interfaces]")?;
        let iface = self.staged_interface_mut(name)?;
        if iface.get_address().is_none() {
            return Err(RouterError::NotFound {
                what: Missing::Address,
            });
        }
        iface.set_address(None);
        self.dirty = true;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Transactions
    // ------------------------------------------------------------------

    /// Promote the staged configuration to committed.
    pub fn commit_changes(&mut self) -> Result<()> {
        self.require_configuration("[commit]")?;
        if !self.dirty {
            return Err(RouterError::NoChangesToCommit);
        }
        self.interfaces = self.staged_interfaces.clone();
        self.routes = self.staged_routes.clone();
        self.dirty = false;
        Ok(())
    }

    /// Drop staged edits, staying in configuration mode.
    pub fn discard_changes(&mut self) -> Result<()> {
        self.require_configuration("[discard]")?;
        self.restage();
        Ok(())
    }

    /// Reset the staged configuration to an empty one: no addresses, every
    /// interface enabled, no routes. Marks the configuration modified.
    ///
    /// Used before replaying a complete configuration.
    pub fn clear_staged_configuration(&mut self) -> Result<()> {
        self.require_configuration("[load]")?;
        for iface in &mut self.staged_interfaces {
            iface.set_address(None);
            if iface.is_disabled() {
                iface.set_admin(AdminState::Up);
            }
        }
        self.staged_routes.clear();
        self.dirty = true;
        Ok(())
    }

    /// Restore factory state: default interfaces, no routes, operational
    /// mode, nothing staged.
    pub fn reset(&mut self) {
        *self = Self::build(std::mem::take(&mut self.name), default_interfaces());
    }

    /// Persist the configuration across restarts. Not supported.
    pub fn save_configuration(&self) -> Result<()> {
        Err(RouterError::Unsupported(
            "Saving configuration is not supported.".to_string(),
        ))
    }

    // ------------------------------------------------------------------
    // Operational views
    // ------------------------------------------------------------------

    /// Routing table rows, sorted, from committed state.
    pub fn ip_routes(&self) -> Result<Vec<RouteView>> {
        self.require_operational("show [ip]")?;
        Ok(RouteView::collect(&self.interfaces, &self.routes))
    }

    /// `show ip route` output.
    pub fn show_ip_route(&self) -> Result<String> {
        Ok(show::render_routes(&self.ip_routes()?))
    }

    /// Interface table rows from committed state.
    pub fn interface_views(&self) -> Result<Vec<InterfaceView>> {
        self.require_operational("show [interfaces]")?;
        Ok(self.interfaces.iter().map(InterfaceView::from).collect())
    }

    /// `show interfaces` output.
    pub fn show_interfaces(&self) -> Result<String> {
        Ok(show::render_interfaces(&self.interface_views()?))
    }

    // ------------------------------------------------------------------
    // Link state
    // ------------------------------------------------------------------

    /// Recompute the link state of one interface from the topology.
    ///
    /// Link state is observed, not configured: both the committed and the
    /// staged copy are updated and the modified flag is left alone.
    pub fn update_link_state(
        &mut self,
        interface: &str,
        lookup: &dyn NeighborLookup,
    ) -> Result<LinkState> {
        if !self.interfaces.iter().any(|i| i.name() == interface) {
            return Err(RouterError::interface_not_found(interface));
        }
        let link = link_state::resolve(lookup.neighbor(&self.name, interface).as_ref());
        for iface in self
            .interfaces
            .iter_mut()
            .chain(self.staged_interfaces.iter_mut())
            .filter(|i| i.name() == interface)
        {
            iface.set_link(link);
        }
        Ok(link)
    }

    /// Recompute the link state of every interface.
    pub fn update_all_link_states(&mut self, lookup: &dyn NeighborLookup) {
        let names: Vec<String> = self
            .interfaces
            .iter()
            .map(|i| i.name().to_string())
            .collect();
        for name in names {
            // Names come from the committed list, so the lookup cannot miss.
            let _ = self.update_link_state(&name, lookup);
        }
    }
}
