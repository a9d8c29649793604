//! Error types for configuration engine operations.
//!
//! Engine errors carry domain facts only. The command layer
//! ([`crate::cli::present`]) decides the operator-facing wording.

use crate::util::addr::{InterfaceAddress, ReservedAddress};

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, RouterError>;

/// The kind of staged configuration node an operation expected to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    /// A static route entry.
    Route,
    /// An interface address.
    Address,
    /// The `disable` flag of an interface.
    DisableFlag,
}

impl Missing {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Route => "route",
            Self::Address => "address",
            Self::DisableFlag => "disable",
        }
    }
}

/// Errors that can occur while operating the configuration engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
    /// Operation attempted in the wrong mode.
    #[error("Invalid command: {command}")]
    InvalidMode {
        /// The rejected command, VyOS style (e.g. `set [protocols]`).
        command: String,
    },

    /// The staged configuration already contains this node.
    #[error("{what} already exists")]
    Duplicate {
        /// Short description of the duplicated node.
        what: String,
    },

    /// The staged configuration does not contain this node.
    #[error("{} not found", .what.name())]
    NotFound {
        /// What was looked up.
        what: Missing,
    },

    /// No interface with this name exists on the router.
    #[error("WARN: interface {name} does not exist, changes will not be committed")]
    InterfaceNotFound {
        /// The interface name that was not found.
        name: String,
    },

    /// The address is the network or broadcast address of its prefix.
    #[error("Cannot assign {} address {address} to the interface. Use a host address instead", .kind.name())]
    InvalidAddress {
        /// The rejected address.
        address: InterfaceAddress,
        /// Which reserved address it collides with.
        kind: ReservedAddress,
    },

    /// Administrative distance outside 1..=255.
    #[error("Administrative distance must be between 1 and 255. Provided: {0}")]
    InvalidDistance(u32),

    /// Commit requested with a clean staged configuration.
    #[error("No configuration changes to commit")]
    NoChangesToCommit,

    /// Leaving configuration mode with a dirty staged configuration.
    #[error(
        "Cannot exit: configuration modified.\nUse 'exit discard' to discard the changes and exit.\n[edit]"
    )]
    UncommittedChanges,

    /// Operation the emulated router does not support.
    #[error("{0}")]
    Unsupported(String),
}

impl RouterError {
    /// Create an invalid-mode error for a VyOS command path.
    pub fn invalid_mode(command: impl Into<String>) -> Self {
        Self::InvalidMode {
            command: command.into(),
        }
    }

    /// Create a duplicate-configuration error.
    pub fn duplicate(what: impl Into<String>) -> Self {
        Self::Duplicate { what: what.into() }
    }

    /// Create an interface-not-found error.
    pub fn interface_not_found(name: impl Into<String>) -> Self {
        Self::InterfaceNotFound { name: name.into() }
    }

    /// Check if this is a duplicate-configuration error.
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    /// Check if this is a "not found" error (configuration node or interface).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::InterfaceNotFound { .. })
    }

    /// Check if this is an invalid-mode error.
    pub fn is_invalid_mode(&self) -> bool {
        matches!(self, Self::InvalidMode { .. })
    }

    /// Check if this error is informational rather than a failure.
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::NoChangesToCommit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_mode_message() {
        let err = RouterError::invalid_mode("set [protocols]");
        assert!(err.is_invalid_mode());
        assert_eq!(err.to_string(), "Invalid command: set [protocols]");
    }

    #[test]
    fn test_classification() {
        assert!(RouterError::duplicate("route").is_duplicate());
        assert!(RouterError::NotFound { what: Missing::Route }.is_not_found());
        assert!(RouterError::interface_not_found("eth9").is_not_found());
        assert!(RouterError::NoChangesToCommit.is_benign());
        assert!(!RouterError::UncommittedChanges.is_benign());
    }

    #[test]
    fn test_invalid_address_message() {
        let err = RouterError::InvalidAddress {
            address: "10.0.0.0/24".parse().unwrap(),
            kind: ReservedAddress::Network,
        };
        assert_eq!(
            err.to_string(),
            "Cannot assign network address 10.0.0.0/24 to the interface. Use a host address instead"
        );
    }
}
