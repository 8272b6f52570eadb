use serde::Deserialize;

use crate::db::models::student::Student;
use crate::utils::validation::{self, Field, FieldErrors, WriteMode};

/// Body of a student write. Every field is optional so that missing ones
/// are reported per field rather than as a parse failure.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct StudentPayload {
    /// Roll number; only accepted on create.
    pub roll_number: Field,
    /// Full name.
    pub name: Field,
    /// Contact email.
    pub email: Field,
    /// Branch code.
    pub branch_code: Field,
}

impl StudentPayload {
    /// Check the payload against the field constraints and produce the
    /// record to store.
    ///
    /// # Errors
    /// Errors with every failed field.
    pub fn validate(self, mode: WriteMode<'_, Student>) -> Result<Student, FieldErrors> {
        let mut errors = FieldErrors::default();
        let fallback = mode.fallback();
        let roll_number = validation::primary_key(
            &mut errors,
            "roll_number",
            self.roll_number,
            mode.existing().map(|stored| stored.roll_number.as_str()),
            20,
        );
        let name = validation::text(
            &mut errors,
            "name",
            self.name,
            fallback.map(|stored| stored.name.as_str()),
            100,
        );
        let email = validation::email(
            &mut errors,
            "email",
            self.email,
            fallback.map(|stored| stored.email.as_str()),
        );
        let branch_code = validation::text(
            &mut errors,
            "branch_code",
            self.branch_code,
            fallback.map(|stored| stored.branch_code.as_str()),
            10,
        );
        match (roll_number, name, email, branch_code) {
            (Some(roll_number), Some(name), Some(email), Some(branch_code)) if errors.is_empty() => {
                Ok(Student {
                    roll_number,
                    name,
                    email,
                    branch_code,
                })
            }
            _ => Err(errors),
        }
    }
}
