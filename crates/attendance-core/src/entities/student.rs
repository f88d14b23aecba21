//! Student profile

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::value_objects::Population;

/// Student profile; `id` is the identifier stored in attendance rosters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentProfile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub enrollment_number: String,
    pub mobile_number: Option<String>,
    pub population: Population,
    pub created_at: DateTime<Utc>,
}

impl StudentProfile {
    pub fn new(
        id: Uuid,
        user_id: Uuid,
        name: String,
        enrollment_number: String,
        mobile_number: Option<String>,
        population: Population,
    ) -> Self {
        Self {
            id,
            user_id,
            name,
            enrollment_number,
            mobile_number,
            population,
            created_at: Utc::now(),
        }
    }

    #[inline]
    pub fn belongs_to(&self, population: &Population) -> bool {
        self.population == *population
    }
}
