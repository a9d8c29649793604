//! Output formatting (JSON/text) for operational views.
//!
//! Text output matches the interactive `show` commands; JSON output carries
//! the same rows as objects.

use std::io::Write;

use serde_json::json;

use crate::router::{InterfaceView, RouteView};
use crate::router::show::{ROUTE_CODES, render_interfaces};
use crate::util::addr::format_mac;

/// Output format options.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputOptions {
    /// Print legends and headers in text output.
    pub headers: bool,
    /// Pretty print (for JSON).
    pub pretty: bool,
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Plain text output.
    #[default]
    Text,
    /// JSON output.
    Json,
}

fn write_json<W: Write + ?Sized>(
    w: &mut W,
    value: &serde_json::Value,
    opts: &OutputOptions,
) -> std::io::Result<()> {
    if opts.pretty {
        serde_json::to_writer_pretty(&mut *w, value)?;
    } else {
        serde_json::to_writer(&mut *w, value)?;
    }
    writeln!(w)
}

/// Trait for types that can be printed.
pub trait Printable {
    /// Print as plain text.
    fn print_text<W: Write + ?Sized>(&self, w: &mut W, opts: &OutputOptions)
    -> std::io::Result<()>;

    /// Convert to JSON value.
    fn to_json(&self) -> serde_json::Value;

    /// Print in the specified format.
    fn print<W: Write + ?Sized>(
        &self,
        w: &mut W,
        format: OutputFormat,
        opts: &OutputOptions,
    ) -> std::io::Result<()> {
        match format {
            OutputFormat::Text => self.print_text(w, opts),
            OutputFormat::Json => write_json(w, &self.to_json(), opts),
        }
    }
}

/// Trait for collections of printable items.
pub trait PrintableList {
    /// The item type.
    type Item: Printable;

    /// Get the items.
    fn items(&self) -> &[Self::Item];

    /// Text printed before the items when headers are enabled.
    fn header(&self) -> Option<String> {
        None
    }

    /// Print all items as text.
    fn print_text<W: Write + ?Sized>(
        &self,
        w: &mut W,
        opts: &OutputOptions,
    ) -> std::io::Result<()> {
        if opts.headers
            && let Some(header) = self.header()
        {
            w.write_all(header.as_bytes())?;
        }
        for item in self.items() {
            item.print_text(w, opts)?;
        }
        Ok(())
    }

    /// Convert to JSON array.
    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(self.items().iter().map(|item| item.to_json()).collect())
    }

    /// Print in the specified format.
    fn print<W: Write + ?Sized>(
        &self,
        w: &mut W,
        format: OutputFormat,
        opts: &OutputOptions,
    ) -> std::io::Result<()> {
        match format {
            OutputFormat::Text => self.print_text(w, opts),
            OutputFormat::Json => write_json(w, &PrintableList::to_json(self), opts),
        }
    }
}

impl Printable for RouteView {
    fn print_text<W: Write + ?Sized>(
        &self,
        w: &mut W,
        _opts: &OutputOptions,
    ) -> std::io::Result<()> {
        writeln!(w, "{}", self)
    }

    fn to_json(&self) -> serde_json::Value {
        let mut obj = json!({
            "type": self.kind.name(),
            "dst": self.destination.to_string(),
        });

        if let Some(distance) = self.distance {
            obj["distance"] = json!(distance);
        }

        if let Some(ref gw) = self.next_hop {
            obj["gateway"] = json!(gw.to_string());
        }

        if let Some(ref dev) = self.interface {
            obj["dev"] = json!(dev);
        }

        obj
    }
}

impl Printable for InterfaceView {
    fn print_text<W: Write + ?Sized>(
        &self,
        w: &mut W,
        _opts: &OutputOptions,
    ) -> std::io::Result<()> {
        writeln!(w, "{}", self)
    }

    fn to_json(&self) -> serde_json::Value {
        let mut obj = json!({
            "ifname": self.name,
            "admin": self.status.admin.name(),
            "link": self.status.link.name(),
            "address": format_mac(&self.mac),
            "vrf": self.vrf,
            "mtu": self.mtu,
        });

        if let Some(ref addr) = self.address {
            obj["local"] = json!(addr.ip().to_string());
            obj["prefixlen"] = json!(addr.prefix_len());
        }

        if let Some(ref desc) = self.description {
            obj["description"] = json!(desc);
        }

        obj
    }
}

/// The rows of `show ip route`.
#[derive(Debug, Clone, Default)]
pub struct RouteList(pub Vec<RouteView>);

impl PrintableList for RouteList {
    type Item = RouteView;

    fn items(&self) -> &[RouteView] {
        &self.0
    }

    fn header(&self) -> Option<String> {
        Some(format!("{}\n", ROUTE_CODES))
    }
}

/// The rows of `show interfaces`.
#[derive(Debug, Clone, Default)]
pub struct InterfaceList(pub Vec<InterfaceView>);

impl PrintableList for InterfaceList {
    type Item = InterfaceView;

    fn items(&self) -> &[InterfaceView] {
        &self.0
    }

    fn header(&self) -> Option<String> {
        // Legend plus the two header rows.
        Some(render_interfaces(&[]))
    }
}
