//! Interface commands under `interfaces ethernet`.

use super::Signature;
use super::mode::EDIT;
use crate::cli::command::{
    Command, CommandError, ConfigPath, Context, Outcome, Verb, require_configuration, say,
};
use crate::cli::pattern::{Args, Pattern};
use crate::router::{Missing, RouterError, RouterMode};
use crate::util::addr::InterfaceAddress;

/// What an interface command changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceAction {
    /// `set interfaces ethernet <interface> address <address>`
    SetAddress,
    /// `set interfaces ethernet <interface> disable`
    Disable,
    /// `delete interfaces ethernet <interface> address <address>`
    DeleteAddress,
    /// `delete interfaces ethernet <interface> disable`
    Enable,
}

impl InterfaceAction {
    fn pattern(self) -> &'static str {
        match self {
            Self::SetAddress => "set interfaces ethernet <interface> address <address>",
            Self::Disable => "set interfaces ethernet <interface> disable",
            Self::DeleteAddress => "delete interfaces ethernet <interface> address <address>",
            Self::Enable => "delete interfaces ethernet <interface> disable",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Self::SetAddress => "Configure interface with one IP address",
            Self::Disable => "Administratively disable an ethernet interface",
            Self::DeleteAddress => "Remove IP address from an ethernet interface",
            Self::Enable => "Re-enable an administratively disabled ethernet interface",
        }
    }

    fn verb(self) -> Verb {
        match self {
            Self::SetAddress | Self::Disable => Verb::Set,
            Self::DeleteAddress | Self::Enable => Verb::Delete,
        }
    }
}

/// An `interfaces ethernet` command.
pub struct InterfaceCommand {
    signature: Signature,
    action: InterfaceAction,
}

impl InterfaceCommand {
    pub fn new(action: InterfaceAction) -> Self {
        Self {
            signature: Signature::new(action.pattern(), action.description()),
            action,
        }
    }

    pub fn action(&self) -> InterfaceAction {
        self.action
    }
}

impl Command for InterfaceCommand {
    fn pattern(&self) -> &Pattern {
        &self.signature.pattern
    }

    fn description(&self) -> &str {
        &self.signature.description
    }

    fn available_in(&self, mode: RouterMode) -> bool {
        mode == RouterMode::Configuration
    }

    fn execute(&self, ctx: &mut Context<'_>, args: &Args<'_>) -> Result<Outcome, CommandError> {
        let mode_command = match self.action.verb() {
            Verb::Delete => "delete [interfaces]",
            _ => "set [interfaces]",
        };
        require_configuration(ctx.router, mode_command)?;

        let name = args.value("interface")?;
        let router = &mut *ctx.router;
        let result = match self.action {
            InterfaceAction::SetAddress => {
                let address: InterfaceAddress = args.parse("address")?;
                let path = format!("interfaces ethernet {} address {}", name, address);
                router
                    .configure_interface_address(name, address)
                    .map_err(|e| CommandError::at(e, &ConfigPath::new(Verb::Set, path)))
            }
            InterfaceAction::Disable => {
                let path = format!("interfaces ethernet {} disable", name);
                router
                    .disable_interface(name)
                    .map_err(|e| CommandError::at(e, &ConfigPath::new(Verb::Set, path)))
            }
            InterfaceAction::DeleteAddress => {
                let address: InterfaceAddress = args.parse("address")?;
                let path = ConfigPath::new(
                    Verb::Delete,
                    format!("interfaces ethernet {} address {}", name, address),
                );
                // Only the address that is configured can be deleted.
                let current = router
                    .find_interface(name)
                    .ok_or_else(|| RouterError::interface_not_found(name))?
                    .get_address();
                match current {
                    Some(current) if current != address => Err(CommandError::at(
                        RouterError::NotFound {
                            what: Missing::Address,
                        },
                        &path,
                    )),
                    _ => router
                        .delete_interface_address(name)
                        .map_err(|e| CommandError::at(e, &path)),
                }
            }
            InterfaceAction::Enable => {
                let path = format!("interfaces ethernet {} disable", name);
                router
                    .enable_interface(name)
                    .map_err(|e| CommandError::at(e, &ConfigPath::new(Verb::Delete, path)))
            }
        };
        result?;
        say(ctx.out, EDIT)
    }
}

/// All interface commands, in registration order.
pub fn all() -> Vec<InterfaceCommand> {
    [
        InterfaceAction::DeleteAddress,
        InterfaceAction::Enable,
        InterfaceAction::Disable,
        InterfaceAction::SetAddress,
    ]
    .into_iter()
    .map(InterfaceCommand::new)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::registry::Registry;
    use crate::router::Router;

    fn configuring() -> (Registry, Router) {
        let mut router = Router::new("R1");
        router.set_mode(RouterMode::Configuration).unwrap();
        (Registry::default(), router)
    }

    fn run(registry: &Registry, router: &mut Router, line: &str) -> String {
        let mut out = Vec::new();
        registry.dispatch(router, line, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_set_address() {
        let (registry, mut router) = configuring();
        let line = "set interfaces ethernet eth0 address 10.0.0.1/24";
        assert_eq!(run(&registry, &mut router, line), "[edit]\n");
        assert_eq!(
            run(&registry, &mut router, line),
            "\tConfiguration path: [interfaces ethernet eth0 address 10.0.0.1/24] already exists\n"
        );
        assert!(router.has_uncommitted_changes());
    }

    #[test]
    fn test_set_reserved_address() {
        let (registry, mut router) = configuring();
        let out = run(
            &registry,
            &mut router,
            "set interfaces ethernet eth0 address 10.0.0.0/24",
        );
        assert!(out.starts_with(
            "\tError: 10.0.0.0/24 is not a valid host IP: it is the network address of 10.0.0.0/24\n"
        ));
        assert!(out.contains("e.g. 10.0.0.1/24"));
        assert!(!router.has_uncommitted_changes());
    }

    #[test]
    fn test_invalid_value() {
        let (registry, mut router) = configuring();
        let out = run(
            &registry,
            &mut router,
            "set interfaces ethernet eth0 address 300.0.0.1/24",
        );
        assert!(out.starts_with("\tInvalid value: 300.0.0.1/24\n"));
        assert!(out.ends_with("\tValue validation failed\n"));
    }

    #[test]
    fn test_delete_address_must_match() {
        let (registry, mut router) = configuring();
        run(&registry, &mut router, "set interfaces ethernet eth0 address 10.0.0.1/24");
        assert_eq!(
            run(&registry, &mut router, "delete interfaces ethernet eth0 address 10.0.0.2/24"),
            "\tNothing to delete (the specified value does not exist)\n"
        );
        assert_eq!(
            run(&registry, &mut router, "delete interfaces ethernet eth0 address 10.0.0.1/24"),
            "[edit]\n"
        );
        assert_eq!(router.find_interface("eth0").unwrap().get_address(), None);
    }

    #[test]
    fn test_disable_and_enable() {
        let (registry, mut router) = configuring();
        assert_eq!(
            run(&registry, &mut router, "delete interfaces ethernet eth0 disable"),
            "\tNothing to delete (the specified node does not exist)\n"
        );
        assert_eq!(
            run(&registry, &mut router, "set interfaces ethernet eth0 disable"),
            "[edit]\n"
        );
        assert!(router.find_interface("eth0").unwrap().is_disabled());
        assert_eq!(
            run(&registry, &mut router, "delete interfaces ethernet eth0 disable"),
            "[edit]\n"
        );
        assert!(!router.find_interface("eth0").unwrap().is_disabled());
    }

    #[test]
    fn test_unknown_interface() {
        let (registry, mut router) = configuring();
        assert_eq!(
            run(&registry, &mut router, "set interfaces ethernet eth9 disable"),
            "\tWARN: interface eth9 does not exist, changes will not be committed\n"
        );
    }

    #[test]
    fn test_operational_mode_rejected() {
        let registry = Registry::default();
        let mut router = Router::new("R1");
        assert_eq!(
            run(&registry, &mut router, "delete interfaces ethernet eth0 disable"),
            "\n\tInvalid command: delete [interfaces]\n\n"
        );
    }
}
