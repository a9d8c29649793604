//! Typed configuration statements and the path grammar shared by both
//! surface syntaxes.
//!
//! Both parsers reduce their input to configuration paths such as
//! `interfaces ethernet eth0 address 10.0.0.1/24` and hand them to
//! [`parse_path`], which produces a [`Directive`]. Directives are applied to
//! the staged configuration one at a time, so a parser sees the effect of
//! every earlier statement.

use std::net::Ipv4Addr;

use super::error::{ConfigError, Result};
use super::token::Token;
use crate::router::{RouteTarget, Router, RouterError, StaticRoute};
use crate::util::addr::{InterfaceAddress, Ipv4Prefix};

/// One configuration statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `interfaces ethernet <name> address <cidr>`
    InterfaceAddress {
        interface: String,
        address: InterfaceAddress,
    },
    /// `interfaces ethernet <name> disable`
    InterfaceDisable { interface: String },
    /// `protocols static route <cidr> (next-hop <ip> | interface <name>)
    /// [distance <n>] [disable]`
    Route(StaticRoute),
}

impl Directive {
    /// Apply to the router's staged configuration.
    ///
    /// Statements already present are accepted silently: a load describes
    /// the desired state, not a list of changes.
    pub fn apply(&self, router: &mut Router, token: Option<&Token>) -> Result<()> {
        let outcome = match self {
            Self::InterfaceAddress { interface, address } => {
                ignore_duplicate(router.configure_interface_address(interface, *address))
            }
            Self::InterfaceDisable { interface } => {
                ignore_duplicate(router.disable_interface(interface))
            }
            Self::Route(route) => {
                ignore_duplicate(router.add_route(route.clone().disabled(false))).and_then(|()| {
                    if route.is_disabled() {
                        ignore_duplicate(router.disable_route(route))
                    } else {
                        Ok(())
                    }
                })
            }
        };
        outcome.map_err(|e| ConfigError::rejected(e, token))
    }
}

fn ignore_duplicate(result: crate::router::Result<()>) -> crate::router::Result<()> {
    match result {
        Err(RouterError::Duplicate { .. }) => Ok(()),
        other => other,
    }
}

/// A directive together with the token errors from applying it point at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub directive: Directive,
    pub token: Option<Token>,
}

/// A parser that yields statements one at a time.
///
/// The router is passed in so interface names can be checked as soon as
/// they are read, against the configuration being built.
pub trait DirectiveSource {
    fn next_statement(&mut self, router: &Router) -> Result<Option<Statement>>;
}

/// Cursor over the words of one configuration path.
pub(crate) struct Words<'a> {
    words: &'a [Token],
    pos: usize,
    line: usize,
}

impl<'a> Words<'a> {
    pub(crate) fn new(words: &'a [Token], line: usize) -> Self {
        Self {
            words,
            pos: 0,
            line,
        }
    }

    fn peek(&self) -> Option<&'a Token> {
        self.words.get(self.pos)
    }

    fn next(&mut self) -> Result<&'a Token> {
        let token = self
            .words
            .get(self.pos)
            .ok_or(ConfigError::UnexpectedEnd { line: self.line })?;
        self.pos += 1;
        Ok(token)
    }

    fn expect(&mut self, keyword: &str) -> Result<&'a Token> {
        let token = self.next()?;
        if token.is(keyword) {
            Ok(token)
        } else {
            Err(ConfigError::syntax(format!("Expected '{}'", keyword), token))
        }
    }

    fn finish(&self) -> Result<()> {
        match self.peek() {
            Some(extra) => Err(ConfigError::syntax("Unexpected trailing token", extra)),
            None => Ok(()),
        }
    }
}

/// Parse a configuration path (without any leading `set`).
///
/// Returns `Ok(None)` for statements that are valid but have no effect
/// here, such as `address dhcp`.
pub(crate) fn parse_path(words: &mut Words<'_>, router: &Router) -> Result<Option<Statement>> {
    let head = words.next()?;
    match head.as_str() {
        "interfaces" => parse_interfaces(words, router),
        "protocols" => parse_protocols(words, router).map(Some),
        _ => Err(ConfigError::syntax("Unrecognized configuration path", head)),
    }
}

/// Resolve an interface name against the router, failing on unknown names.
pub(crate) fn check_interface(router: &Router, token: &Token) -> Result<()> {
    match router.find_interface(token.as_str()) {
        Some(_) => Ok(()),
        None => Err(ConfigError::unknown_interface(token)),
    }
}

fn parse_interfaces(words: &mut Words<'_>, router: &Router) -> Result<Option<Statement>> {
    words.expect("ethernet")?;
    let name = words.next()?;
    check_interface(router, name)?;
    let interface = name.value.clone();

    let option = words.next()?;
    let (directive, token) = match option.as_str() {
        "address" => {
            let value = words.next()?;
            words.finish()?;
            if value.is("dhcp") {
                tracing::debug!(interface = %interface, "skipping dhcp address");
                return Ok(None);
            }
            let address = value
                .as_str()
                .parse::<InterfaceAddress>()
                .map_err(|e| ConfigError::value(e, value))?;
            (Directive::InterfaceAddress { interface, address }, value)
        }
        "disable" => {
            words.finish()?;
            (Directive::InterfaceDisable { interface }, name)
        }
        _ => {
            return Err(ConfigError::syntax(
                "Unrecognized interface configuration option",
                option,
            ));
        }
    };
    Ok(Some(Statement {
        directive,
        token: Some(token.clone()),
    }))
}

fn parse_protocols(words: &mut Words<'_>, router: &Router) -> Result<Statement> {
    words.expect("static")?;
    words.expect("route")?;
    let dest = words.next()?;
    let destination = dest
        .as_str()
        .parse::<Ipv4Prefix>()
        .map_err(|e| ConfigError::value(e, dest))?;

    let kind = words.next()?;
    let target = match kind.as_str() {
        "next-hop" => {
            let value = words.next()?;
            let gateway = value
                .as_str()
                .parse::<Ipv4Addr>()
                .map_err(|_| ConfigError::syntax("Invalid next-hop address", value))?;
            RouteTarget::NextHop(gateway)
        }
        "interface" => {
            let value = words.next()?;
            check_interface(router, value)?;
            RouteTarget::Interface(value.value.clone())
        }
        _ => {
            return Err(ConfigError::syntax(
                "Expected 'next-hop' or 'interface'",
                kind,
            ));
        }
    };

    let mut route = StaticRoute::new(destination, target);
    let mut seen_distance = false;
    let mut seen_disable = false;
    while let Some(option) = words.peek() {
        words.pos += 1;
        match option.as_str() {
            "distance" if !seen_distance => {
                let value = words.next()?;
                let distance: u32 = value
                    .as_str()
                    .parse()
                    .map_err(|_| ConfigError::syntax("Invalid distance value", value))?;
                route = route
                    .with_distance(distance)
                    .map_err(|e| ConfigError::rejected(e, Some(value)))?;
                seen_distance = true;
            }
            "disable" if !seen_disable => {
                route = route.disabled(true);
                seen_disable = true;
            }
            _ => return Err(ConfigError::syntax("Unrecognized route option", option)),
        }
    }

    Ok(Statement {
        directive: Directive::Route(route),
        token: Some(dest.clone()),
    })
}
