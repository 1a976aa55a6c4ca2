//! User roles.
//!
//! The backend sends roles in whatever case it stores them ("ADMIN",
//! "Employer", ...). [`Role::parse`] is the only place a raw role string is
//! interpreted; everything downstream compares typed variants.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Normalized account role.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Role {
    /// Job seeker
    #[default]
    User,
    /// Posts and manages jobs
    Employer,
    /// Approves jobs and manages users
    Admin,
    /// Any role this client does not know about, lower-cased.
    Other(String),
}

impl Role {
    /// Parse and normalize a role string (case-insensitive, trimmed).
    pub fn parse(s: &str) -> Self {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "user" => Role::User,
            "employer" => Role::Employer,
            "admin" => Role::Admin,
            _ => Role::Other(normalized),
        }
    }

    /// Lower-case string form.
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Employer => "employer",
            Role::Admin => "admin",
            Role::Other(s) => s.as_str(),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Roles an administrator can assign from the user management screen.
    pub fn assignable() -> [Role; 3] {
        [Role::User, Role::Employer, Role::Admin]
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Role::parse(s))
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Role::parse(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Role::parse("ADMIN"), Role::Admin);
        assert_eq!(Role::parse("Employer"), Role::Employer);
        assert_eq!(Role::parse(" user "), Role::User);
    }

    #[test]
    fn test_unknown_role_is_lowercased() {
        assert_eq!(Role::parse("Moderator"), Role::Other("moderator".to_string()));
        assert_eq!(Role::parse("Moderator").as_str(), "moderator");
    }

    #[test]
    fn test_deserialize_normalizes() {
        let role: Role = serde_json::from_str("\"ADMIN\"").unwrap();
        assert_eq!(role, Role::Admin);
        assert_eq!(serde_json::to_string(&role).unwrap(), "\"admin\"");
    }

    #[test]
    fn test_assignable_roles() {
        let names: Vec<_> = Role::assignable().iter().map(|r| r.to_string()).collect();
        assert_eq!(names, vec!["user", "employer", "admin"]);
    }
}
