//! User entity - an authenticated account and its role-specific profile

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{FacultyProfile, StudentProfile};
use crate::value_objects::Role;

/// Account row. The role is stored explicitly and checked by the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User; the email is normalized
    pub fn new(id: Uuid, email: &str, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id,
            email: normalize_email(email),
            role,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Lower-case and trim an email address for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Role-specific profile created together with an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoleProfile {
    Student(StudentProfile),
    Faculty(FacultyProfile),
    Admin,
}

impl RoleProfile {
    /// Role this profile implies
    pub fn role(&self) -> Role {
        match self {
            Self::Student(_) => Role::Student,
            Self::Faculty(_) => Role::Faculty,
            Self::Admin => Role::Admin,
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Student(s) => Some(&s.name),
            Self::Faculty(f) => Some(&f.name),
            Self::Admin => None,
        }
    }
}

/// Account joined with whichever profile rows exist for it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserWithProfile {
    pub user: User,
    pub student: Option<StudentProfile>,
    pub faculty: Option<FacultyProfile>,
}

impl UserWithProfile {
    pub fn name(&self) -> Option<&str> {
        self.student
            .as_ref()
            .map(|s| s.name.as_str())
            .or_else(|| self.faculty.as_ref().map(|f| f.name.as_str()))
    }

    /// Case-insensitive match over name, enrollment number, class, course and semester
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        let contains = |value: &str| value.to_lowercase().contains(&term);

        if self.name().is_some_and(contains) || contains(self.user.email.as_str()) {
            return true;
        }

        self.student.as_ref().is_some_and(|s| {
            contains(s.enrollment_number.as_str())
                || contains(s.population.class.as_str())
                || contains(s.population.course.as_str())
                || s.population.semester.to_string().contains(&term)
        })
    }
}
