use serde::Serialize;

use crate::db::models::academic;

/// Response for an academic record served on its own.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct Academic {
    /// Surrogate key.
    pub id: i64,
    /// Employee code of the owning professor.
    pub professor: String,
    /// Stored degree code, as accepted on writes.
    pub degree_type: &'static str,
    /// Human-readable degree label.
    pub degree_type_display: &'static str,
    /// Awarding university.
    pub university: String,
    /// Year awarded.
    pub year: i64,
}

impl From<academic::Academic> for Academic {
    fn from(found: academic::Academic) -> Self {
        Self {
            id: found.id,
            professor: found.professor_id,
            degree_type: found.degree_type.code(),
            degree_type_display: found.degree_type.label(),
            university: found.university,
            year: found.year,
        }
    }
}
