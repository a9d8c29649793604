//! Static route commands under `protocols static route`.

use std::net::Ipv4Addr;

use super::Signature;
use super::mode::EDIT;
use crate::cli::command::{
    Command, CommandError, ConfigPath, Context, Outcome, Verb, require_configuration, say,
};
use crate::cli::pattern::Args;
use crate::router::{DEFAULT_DISTANCE, RouteTarget, RouterMode, StaticRoute};
use crate::util::addr::Ipv4Prefix;

/// How a route leaves the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    NextHop,
    Interface,
}

impl TargetKind {
    fn keyword(self) -> &'static str {
        match self {
            Self::NextHop => "next-hop",
            Self::Interface => "interface",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            Self::NextHop => "<next-hop>",
            Self::Interface => "<interface>",
        }
    }
}

/// One variant of the route command family: add, disable or delete, via a
/// next-hop or an interface, with or without an explicit distance.
pub struct RouteCommand {
    signature: Signature,
    verb: Verb,
    kind: TargetKind,
    with_distance: bool,
}

impl RouteCommand {
    pub fn new(verb: Verb, kind: TargetKind, with_distance: bool) -> Self {
        let head = match verb {
            Verb::Delete => "delete",
            Verb::Set | Verb::Disable => "set",
        };
        let mut pattern = format!(
            "{} protocols static route <destination> {} {}",
            head,
            kind.keyword(),
            kind.placeholder()
        );
        if with_distance {
            pattern.push_str(" distance <distance>");
        }
        if verb == Verb::Disable {
            pattern.push_str(" disable");
        }

        let via = match kind {
            TargetKind::NextHop => "via next-hop",
            TargetKind::Interface => "via interface",
        };
        let distance = if with_distance {
            "with distance"
        } else {
            "with default distance"
        };
        let action = match verb {
            Verb::Set => "Add static route",
            Verb::Disable => "Disable static route",
            Verb::Delete => "Delete static route",
        };
        let description = format!("{} {} {}", action, via, distance);

        Self {
            signature: Signature::owned(&pattern, description),
            verb,
            kind,
            with_distance,
        }
    }

    /// The route an input line describes, and its configuration path as
    /// typed.
    fn route(&self, args: &Args<'_>) -> Result<(StaticRoute, ConfigPath), CommandError> {
        let destination: Ipv4Prefix = args.parse("destination")?;
        let target = match self.kind {
            TargetKind::NextHop => RouteTarget::NextHop(args.parse::<Ipv4Addr>("next-hop")?),
            TargetKind::Interface => RouteTarget::Interface(args.value("interface")?.to_string()),
        };

        let mut path = format!(
            "protocols static route {} {} {}",
            args.value("destination")?,
            self.kind.keyword(),
            args.value(self.kind.keyword())?
        );
        let distance = if self.with_distance {
            let raw = args.value("distance")?;
            path.push_str(" distance ");
            path.push_str(raw);
            args.parse::<u32>("distance")?
        } else {
            u32::from(DEFAULT_DISTANCE)
        };
        if self.verb == Verb::Disable {
            path.push_str(" disable");
        }
        let path = ConfigPath::new(self.verb, path);

        let route = StaticRoute::new(destination, target)
            .with_distance(distance)
            .map_err(|e| CommandError::at(e, &path))?;
        Ok((route, path))
    }
}

impl Command for RouteCommand {
    fn pattern(&self) -> &crate::cli::pattern::Pattern {
        &self.signature.pattern
    }

    fn description(&self) -> &str {
        &self.signature.description
    }

    fn available_in(&self, mode: RouterMode) -> bool {
        mode == RouterMode::Configuration
    }

    fn execute(&self, ctx: &mut Context<'_>, args: &Args<'_>) -> Result<Outcome, CommandError> {
        let mode_command = match self.verb {
            Verb::Delete => "delete [protocols]",
            Verb::Set | Verb::Disable => "set [protocols]",
        };
        require_configuration(ctx.router, mode_command)?;

        let (route, path) = self.route(args)?;
        let result = match self.verb {
            Verb::Set => ctx.router.add_route(route),
            Verb::Disable => ctx.router.disable_route(&route),
            Verb::Delete => ctx.router.remove_route(&route),
        };
        result.map_err(|e| CommandError::at(e, &path))?;
        say(ctx.out, EDIT)
    }
}

/// The whole family, most specific patterns first within each verb.
pub fn all() -> Vec<RouteCommand> {
    let mut commands = Vec::new();
    for verb in [Verb::Delete, Verb::Disable, Verb::Set] {
        for with_distance in [true, false] {
            for kind in [TargetKind::NextHop, TargetKind::Interface] {
                commands.push(RouteCommand::new(verb, kind, with_distance));
            }
        }
    }
    commands
}
