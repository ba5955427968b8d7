//! Well-known role names and the closed [`Role`] enum built from them.
//!
//! The role travels as a plain string attribute on the caller's certificate;
//! it is parsed once per invocation and then matched exhaustively.

use std::fmt;

/// Default name of the caller attribute that carries the role.
pub const ROLE_ATTRIBUTE: &str = "role";

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_AUDITOR: &str = "auditor";
pub const ROLE_USER: &str = "user";

/// A caller role resolved from its attribute value.
///
/// Matching is exact and case-sensitive. Any value outside the three known
/// names is kept verbatim in [`Role::Unknown`] so it can be logged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    Admin,
    Auditor,
    User,
    Unknown(String),
}

impl Role {
    /// Parse from the attribute value.
    pub fn from_name(name: &str) -> Self {
        match name {
            ROLE_ADMIN => Self::Admin,
            ROLE_AUDITOR => Self::Auditor,
            ROLE_USER => Self::User,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Attribute value for this role.
    pub fn name(&self) -> &str {
        match self {
            Self::Admin => ROLE_ADMIN,
            Self::Auditor => ROLE_AUDITOR,
            Self::User => ROLE_USER,
            Self::Unknown(name) => name,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_parse() {
        assert_eq!(Role::from_name("admin"), Role::Admin);
        assert_eq!(Role::from_name("auditor"), Role::Auditor);
        assert_eq!(Role::from_name("user"), Role::User);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(Role::from_name("Admin"), Role::Unknown("Admin".into()));
    }

    #[test]
    fn unknown_role_keeps_its_name() {
        let role = Role::from_name("operator");
        assert_eq!(role.name(), "operator");
        assert_eq!(role.to_string(), "operator");
    }

    #[test]
    fn empty_value_is_unknown() {
        assert_eq!(Role::from_name(""), Role::Unknown(String::new()));
    }
}
