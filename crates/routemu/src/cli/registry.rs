//! Command registration and dispatch.

use std::io::{self, Write};

use tracing::debug;

use super::command::{Command, CommandError, Context, Outcome};
use super::commands;
use super::pattern::Args;
use super::present;
use crate::router::Router;

/// Printed when no command matches an input line.
pub const NOT_RECOGNIZED: &str = "Command not recognized or not supported";

/// An ordered set of commands.
pub struct Registry {
    commands: Vec<Box<dyn Command>>,
}

impl Default for Registry {
    /// The built-in command set.
    fn default() -> Self {
        let mut registry = Self::new();
        commands::register_all(&mut registry);
        registry
    }
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Append a command. Earlier commands win exact matches.
    pub fn register(&mut self, command: impl Command + 'static) {
        self.commands.push(Box::new(command));
    }

    pub fn commands(&self) -> &[Box<dyn Command>] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Find the command for an input line.
    ///
    /// The first command whose pattern matches exactly wins. Otherwise the
    /// words may abbreviate the leading keywords of a command, as long as
    /// exactly one command fits. A command resolved that way runs without
    /// placeholder values.
    pub fn resolve<'a>(&'a self, words: &[&'a str]) -> Option<(&'a dyn Command, Args<'a>)> {
        for command in &self.commands {
            if let Some(args) = command.pattern().matches(words) {
                return Some((command.as_ref(), args));
            }
        }

        let mut candidates = self
            .commands
            .iter()
            .filter(|c| c.pattern().abbreviated_by(words));
        match (candidates.next(), candidates.next()) {
            (Some(only), None) => Some((only.as_ref(), Args::default())),
            _ => None,
        }
    }

    /// Run one input line against the router, writing operator output.
    ///
    /// Command failures are reported on `out` and never end the session.
    /// Only a failure to write `out` itself is returned.
    pub fn dispatch(&self, router: &mut Router, line: &str, out: &mut dyn Write) -> io::Result<Outcome> {
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            return Ok(Outcome::Continue);
        }

        let Some((command, args)) = self.resolve(&words) else {
            debug!(line, "no command matched");
            writeln!(out, "{}", NOT_RECOGNIZED)?;
            return Ok(Outcome::Continue);
        };
        debug!(
            router = router.name(),
            mode = %router.mode(),
            pattern = command.pattern().as_str(),
            "dispatching"
        );

        let mut ctx = Context {
            router,
            out,
            catalog: &self.commands,
        };
        match command.execute(&mut ctx, &args) {
            Ok(outcome) => Ok(outcome),
            Err(CommandError::Io(e)) => Err(e),
            Err(e) => {
                debug!(error = %e, "command failed");
                writeln!(ctx.out, "{}", present::render(&e))?;
                Ok(Outcome::Continue)
            }
        }
    }

    /// Write one line per command: pattern and description.
    pub fn help(&self, out: &mut dyn Write) -> io::Result<()> {
        for command in &self.commands {
            writeln!(out, " - {}: {}", command.pattern(), command.description())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::RouterMode;

    fn run(registry: &Registry, router: &mut Router, line: &str) -> (Outcome, String) {
        let mut out = Vec::new();
        let outcome = registry.dispatch(router, line, &mut out).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    fn words(line: &str) -> Vec<&str> {
        line.split_whitespace().collect()
    }

    #[test]
    fn test_exact_match() {
        let registry = Registry::default();
        let input = words("set protocols static route 0.0.0.0/0 next-hop 1.1.1.1 distance 5");
        let (command, args) = registry.resolve(&input).unwrap();
        assert_eq!(
            command.pattern().as_str(),
            "set protocols static route <destination> next-hop <next-hop> distance <distance>"
        );
        assert_eq!(args.get("distance"), Some("5"));
    }

    #[test]
    fn test_abbreviations() {
        let registry = Registry::default();
        let pattern = |line: &str| {
            let input = words(line);
            registry
                .resolve(&input)
                .map(|(c, _)| c.pattern().as_str().to_string())
        };
        assert_eq!(pattern("conf").as_deref(), Some("configure"));
        assert_eq!(pattern("sh ip r").as_deref(), Some("show ip route"));
        assert_eq!(pattern("sh int").as_deref(), Some("show interfaces"));
        assert_eq!(pattern("show ip").as_deref(), Some("show ip route"));
        // show configuration or show configuration commands
        assert_eq!(pattern("sh conf"), None);
        assert_eq!(pattern("show configuration").as_deref(), Some("show configuration"));
        assert_eq!(
            pattern("sh conf comm").as_deref(),
            Some("show configuration commands")
        );
        // commit or configure
        assert_eq!(pattern("co"), None);
        assert_eq!(pattern("di").as_deref(), Some("discard"));
        assert_eq!(pattern("ex disc").as_deref(), Some("exit discard"));
        // exit or exit discard
        assert_eq!(pattern("ex"), None);
        assert_eq!(pattern("sh i"), None);
        assert_eq!(pattern("s x"), None);
        assert_eq!(pattern("set protocols"), None);
        assert_eq!(pattern("Configure"), None);
    }

    #[test]
    fn test_unrecognized() {
        let registry = Registry::default();
        let mut router = Router::new("R1");
        let (outcome, out) = run(&registry, &mut router, "reboot now");
        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(out, format!("{}\n", NOT_RECOGNIZED));

        let (_, out) = run(&registry, &mut router, "   ");
        assert_eq!(out, "");
    }

    #[test]
    fn test_errors_are_reported() {
        let registry = Registry::default();
        let mut router = Router::new("R1");
        let (outcome, out) = run(
            &registry,
            &mut router,
            "set interfaces ethernet eth0 address 10.0.0.1/24",
        );
        assert_eq!(outcome, Outcome::Continue);
        assert_eq!(out, "\n\tInvalid command: set [interfaces]\n\n");
        assert_eq!(router.mode(), RouterMode::Operational);
    }

    #[test]
    fn test_help_lists_everything() {
        let registry = Registry::default();
        let mut out = Vec::new();
        registry.help(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), registry.len());
        assert!(text.contains(" - show ip route: Display IP routing table\n"));

        let mut router = Router::new("R1");
        let (_, out) = run(&registry, &mut router, "help");
        assert_eq!(out, text);
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_io_errors_escape() {
        let registry = Registry::default();
        let mut router = Router::new("R1");
        assert!(registry.dispatch(&mut router, "configure", &mut Broken).is_err());
    }
}
