//! Account role

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValueParseError;

/// Role of an account, stored explicitly on the `users` row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Faculty,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Faculty, Role::Admin];

    /// Lowercase name as persisted in the database
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Faculty => "faculty",
            Self::Admin => "admin",
        }
    }

    /// Faculty and admins record attendance and read class reports
    #[inline]
    pub const fn is_staff(self) -> bool {
        matches!(self, Self::Faculty | Self::Admin)
    }

    #[inline]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValueParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "faculty" => Ok(Self::Faculty),
            "admin" => Ok(Self::Admin),
            other => Err(ValueParseError::InvalidRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trips_through_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!("Faculty".parse::<Role>().unwrap(), Role::Faculty);
        assert!("teacher".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }

    #[test]
    fn test_staff_roles() {
        assert!(!Role::Student.is_staff());
        assert!(Role::Faculty.is_staff());
        assert!(Role::Admin.is_staff());
        assert!(!Role::Faculty.is_admin());
    }
}
