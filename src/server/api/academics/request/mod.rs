use serde::Deserialize;

use crate::db::models::academic::Academic;
use crate::utils::validation::{self, Field, FieldErrors, WriteMode};

/// Body of an academic record write.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct AcademicPayload {
    /// Employee code of the owning professor.
    pub professor: Field,
    /// Degree code: `UG`, `PG` or `PHD`.
    pub degree_type: Field,
    /// Awarding university.
    pub university: Field,
    /// Year awarded.
    pub year: Field,
}

impl AcademicPayload {
    /// Check the payload and produce the record to store. On create the
    /// returned `id` is a placeholder; the database assigns the real one.
    ///
    /// # Errors
    /// Errors with every failed field.
    pub fn validate(self, mode: WriteMode<'_, Academic>) -> Result<Academic, FieldErrors> {
        let mut errors = FieldErrors::default();
        let fallback = mode.fallback();
        let professor_id = validation::text(
            &mut errors,
            "professor",
            self.professor,
            fallback.map(|stored| stored.professor_id.as_str()),
            20,
        );
        let degree_type = validation::choice(
            &mut errors,
            "degree_type",
            self.degree_type,
            fallback.map(|stored| stored.degree_type),
        );
        let university = validation::text(
            &mut errors,
            "university",
            self.university,
            fallback.map(|stored| stored.university.as_str()),
            150,
        );
        let year = validation::non_negative(
            &mut errors,
            "year",
            self.year,
            fallback.map(|stored| stored.year),
        );
        match (professor_id, degree_type, university, year) {
            (Some(professor_id), Some(degree_type), Some(university), Some(year))
                if errors.is_empty() =>
            {
                Ok(Academic {
                    id: mode.existing().map_or(0, |stored| stored.id),
                    professor_id,
                    degree_type,
                    university,
                    year,
                })
            }
            _ => Err(errors),
        }
    }
}
