//! Interface status: administrative intent paired with observed link state.
//!
//! Rendered VyOS style as `<admin>/<link>`, e.g. `u/D` for an enabled
//! interface without carrier.

use std::fmt;

/// Operator-controlled interface state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AdminState {
    #[default]
    Up,
    AdminDown,
}

impl AdminState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::AdminDown => "admin-down",
        }
    }

    /// Single-character code used by `show interfaces`.
    pub fn code(&self) -> char {
        match self {
            Self::Up => 'u',
            Self::AdminDown => 'A',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'u' => Some(Self::Up),
            'A' => Some(Self::AdminDown),
            _ => None,
        }
    }
}

/// Derived connectivity state. Never set by the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LinkState {
    Up,
    #[default]
    Down,
}

impl LinkState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }

    pub fn code(&self) -> char {
        match self {
            Self::Up => 'u',
            Self::Down => 'D',
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'u' => Some(Self::Up),
            'D' => Some(Self::Down),
            _ => None,
        }
    }

    /// Link state for a boolean "carrier present" observation.
    pub fn from_carrier(carrier: bool) -> Self {
        if carrier { Self::Up } else { Self::Down }
    }
}

/// Admin and link state of an interface.
///
/// New interfaces start administratively up with the link down: nothing is
/// plugged in until the topology says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InterfaceStatus {
    pub admin: AdminState,
    pub link: LinkState,
}

impl InterfaceStatus {
    pub fn new(admin: AdminState, link: LinkState) -> Self {
        Self { admin, link }
    }

    /// Parse a status from its two display codes, e.g. `('u', 'D')`.
    pub fn from_codes(admin: char, link: char) -> Option<Self> {
        Some(Self::new(
            AdminState::from_code(admin)?,
            LinkState::from_code(link)?,
        ))
    }

    /// Same link state, new admin state.
    pub fn with_admin(self, admin: AdminState) -> Self {
        Self { admin, ..self }
    }

    /// Same admin state, new link state.
    pub fn with_link(self, link: LinkState) -> Self {
        Self { link, ..self }
    }

    pub fn is_admin_up(&self) -> bool {
        self.admin == AdminState::Up
    }

    pub fn is_link_up(&self) -> bool {
        self.link == LinkState::Up
    }
}

impl fmt::Display for InterfaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.admin.code(), self.link.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status() {
        let status = InterfaceStatus::default();
        assert!(status.is_admin_up());
        assert!(!status.is_link_up());
        assert_eq!(status.to_string(), "u/D");
    }

    #[test]
    fn test_codes() {
        assert_eq!(
            InterfaceStatus::from_codes('A', 'u'),
            Some(InterfaceStatus::new(AdminState::AdminDown, LinkState::Up))
        );
        assert_eq!(InterfaceStatus::from_codes('x', 'u'), None);
    }

    #[test]
    fn test_with_admin_preserves_link() {
        let status = InterfaceStatus::new(AdminState::Up, LinkState::Up);
        let down = status.with_admin(AdminState::AdminDown);
        assert_eq!(down.link, LinkState::Up);
        assert_eq!(down.to_string(), "A/u");
    }
}
