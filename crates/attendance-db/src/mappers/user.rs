//! User, student and faculty model -> entity mappers

use attendance_core::entities::{FacultyProfile, StudentProfile, User, UserWithProfile};
use attendance_core::error::DomainError;
use attendance_core::value_objects::{Population, Role};

use crate::models::{FacultyModel, StudentModel, UserModel, UserWithProfileModel};

use super::corrupt_column;

impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        Ok(User {
            id: model.id,
            email: model.email,
            role: model.role.parse::<Role>().map_err(corrupt_column)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<StudentModel> for StudentProfile {
    fn from(model: StudentModel) -> Self {
        StudentProfile {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            enrollment_number: model.enrollment_number,
            mobile_number: model.mobile_number,
            population: Population::new(model.course, model.class, model.semester),
            created_at: model.created_at,
        }
    }
}

impl From<FacultyModel> for FacultyProfile {
    fn from(model: FacultyModel) -> Self {
        FacultyProfile {
            id: model.id,
            user_id: model.user_id,
            name: model.name,
            faculty_id: model.faculty_id,
            created_at: model.created_at,
        }
    }
}

impl TryFrom<UserWithProfileModel> for UserWithProfile {
    type Error = DomainError;

    fn try_from(row: UserWithProfileModel) -> Result<Self, Self::Error> {
        let student = match (
            row.student_profile_id,
            row.student_name,
            row.enrollment_number,
            row.semester,
            row.course,
            row.class,
            row.student_created_at,
        ) {
            (
                Some(id),
                Some(name),
                Some(enrollment_number),
                Some(semester),
                Some(course),
                Some(class),
                Some(created_at),
            ) => Some(StudentProfile {
                id,
                user_id: row.id,
                name,
                enrollment_number,
                mobile_number: row.mobile_number,
                population: Population::new(course, class, semester),
                created_at,
            }),
            _ => None,
        };

        let faculty = match (
            row.faculty_profile_id,
            row.faculty_name,
            row.faculty_code,
            row.faculty_created_at,
        ) {
            (Some(id), Some(name), Some(faculty_id), Some(created_at)) => Some(FacultyProfile {
                id,
                user_id: row.id,
                name,
                faculty_id,
                created_at,
            }),
            _ => None,
        };

        let user = User {
            id: row.id,
            email: row.email,
            role: row.role.parse::<Role>().map_err(corrupt_column)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
        };

        Ok(UserWithProfile {
            user,
            student,
            faculty,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn bare_row(role: &str) -> UserWithProfileModel {
        UserWithProfileModel {
            id: Uuid::new_v4(),
            email: "someone@college.edu".to_string(),
            role: role.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            student_profile_id: None,
            student_name: None,
            enrollment_number: None,
            mobile_number: None,
            semester: None,
            course: None,
            class: None,
            student_created_at: None,
            faculty_profile_id: None,
            faculty_name: None,
            faculty_code: None,
            faculty_created_at: None,
        }
    }

    #[test]
    fn test_admin_row_has_no_profiles() {
        let mapped = UserWithProfile::try_from(bare_row("admin")).unwrap();
        assert_eq!(mapped.user.role, Role::Admin);
        assert!(mapped.student.is_none());
        assert!(mapped.faculty.is_none());
    }

    #[test]
    fn test_student_row_builds_population() {
        let mut row = bare_row("student");
        row.student_profile_id = Some(Uuid::new_v4());
        row.student_name = Some("Asha Rao".to_string());
        row.enrollment_number = Some("EN-001".to_string());
        row.semester = Some(3);
        row.course = Some("BCA".to_string());
        row.class = Some("A".to_string());
        row.student_created_at = Some(Utc::now());
        let user_id = row.id;

        let mapped = UserWithProfile::try_from(row).unwrap();
        let student = mapped.student.as_ref().unwrap();
        assert_eq!(student.user_id, user_id);
        assert_eq!(student.population, Population::new("BCA", "A", 3));
        assert_eq!(mapped.name(), Some("Asha Rao"));
    }

    #[test]
    fn test_unknown_role_is_database_error() {
        let err = UserWithProfile::try_from(bare_row("janitor")).unwrap_err();
        assert!(matches!(err, DomainError::DatabaseError(_)));
    }
}
