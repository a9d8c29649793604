//! Serialize a router's committed configuration.
//!
//! Only configured attributes are written: interfaces without an address
//! that are not disabled produce nothing, and the default distance is
//! omitted.

use std::fmt::Write;

use crate::router::{DEFAULT_DISTANCE, RouteTarget, Router, RouterInterface, StaticRoute};

const INDENT: &str = "    ";

fn configured(iface: &RouterInterface) -> bool {
    iface.get_address().is_some() || iface.is_disabled()
}

fn route_options(route: &StaticRoute) -> String {
    let mut out = String::new();
    if route.distance() != DEFAULT_DISTANCE {
        let _ = write!(out, " distance {}", route.distance());
    }
    if route.is_disabled() {
        out.push_str(" disable");
    }
    out
}

/// Flat `set` commands, one statement per line.
pub fn generate_flat(router: &Router) -> String {
    let mut out = String::new();
    for iface in router.interfaces() {
        if let Some(address) = iface.get_address() {
            let _ = writeln!(
                out,
                "set interfaces ethernet {} address {}",
                iface.name(),
                address
            );
        }
        if iface.is_disabled() {
            let _ = writeln!(out, "set interfaces ethernet {} disable", iface.name());
        }
    }
    for route in router.routing_table() {
        let _ = writeln!(
            out,
            "set protocols static {}{}",
            route_head(route),
            route_options(route)
        );
    }
    out
}

fn route_head(route: &StaticRoute) -> String {
    format!("route {} {}", route.destination(), route.target())
}

/// Nested brace blocks with four-space indentation.
pub fn generate_hierarchical(router: &Router) -> String {
    let mut out = String::new();

    if router.interfaces().iter().any(configured) {
        out.push_str("interfaces {\n");
        for iface in router.interfaces().iter().filter(|i| configured(i)) {
            let _ = writeln!(out, "{INDENT}ethernet {} {{", iface.name());
            if let Some(address) = iface.get_address() {
                let _ = writeln!(out, "{INDENT}{INDENT}address {}", address);
            }
            if iface.is_disabled() {
                let _ = writeln!(out, "{INDENT}{INDENT}disable");
            }
            let _ = writeln!(out, "{INDENT}}}");
        }
        out.push_str("}\n");
    }

    if !router.routing_table().is_empty() {
        out.push_str("protocols {\n");
        let _ = writeln!(out, "{INDENT}static {{");
        for route in router.routing_table() {
            let pad = INDENT.repeat(3);
            let _ = writeln!(out, "{INDENT}{INDENT}route {} {{", route.destination());
            match route.target() {
                RouteTarget::NextHop(gw) => {
                    let _ = writeln!(out, "{pad}next-hop {}", gw);
                }
                RouteTarget::Interface(name) => {
                    let _ = writeln!(out, "{pad}interface {}", name);
                }
            }
            if route.distance() != DEFAULT_DISTANCE {
                let _ = writeln!(out, "{pad}distance {}", route.distance());
            }
            if route.is_disabled() {
                let _ = writeln!(out, "{pad}disable");
            }
            let _ = writeln!(out, "{INDENT}{INDENT}}}");
        }
        let _ = writeln!(out, "{INDENT}}}");
        out.push_str("}\n");
    }

    out
}
