//! YAML session files describing the router to emulate.
//!
//! ```yaml
//! name: R1
//! interfaces:
//!   - name: eth0
//!     description: uplink
//!   - name: eth1
//!     mtu: 9000
//!     vrf: mgmt
//!   - name: lo
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use routemu::router::{Router, RouterInterface};
use serde::Deserialize;

/// Top-level session file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionFile {
    pub name: String,
    #[serde(default)]
    pub interfaces: Vec<InterfaceEntry>,
}

/// One interface entry.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterfaceEntry {
    pub name: String,
    pub mtu: Option<u32>,
    pub description: Option<String>,
    pub vrf: Option<String>,
}

impl InterfaceEntry {
    fn build(&self) -> RouterInterface {
        let mut iface = RouterInterface::new(&self.name);
        if let Some(mtu) = self.mtu {
            iface = iface.mtu(mtu);
        }
        if let Some(ref description) = self.description {
            iface = iface.description(description);
        }
        if let Some(ref vrf) = self.vrf {
            iface = iface.vrf(vrf);
        }
        iface
    }
}

impl SessionFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read session file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid session file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Build the router. An empty interface list means the default set.
    pub fn router(&self) -> Result<Router> {
        if self.interfaces.is_empty() {
            return Ok(Router::new(&self.name));
        }
        Ok(Router::with_interfaces(
            &self.name,
            self.interfaces.iter().map(InterfaceEntry::build),
        )?)
    }
}
