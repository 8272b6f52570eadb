use chrono::NaiveDate;
use serde::Serialize;

use crate::db::models::{academic, professor, publication};
use crate::db::queries::ProfessorWithRelations;

/// Response for a professor, with its history nested.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct Professor {
    /// Employee code.
    pub employee_code: String,
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Department.
    pub department: String,
    /// Degrees, in insertion order.
    pub academics: Vec<Academic>,
    /// Publications, in insertion order.
    pub publications: Vec<Publication>,
}

/// Response for a degree nested under its professor.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct Academic {
    /// Human-readable label, e.g. `PhD` for the stored `PHD`.
    pub degree_type: &'static str,
    /// Awarding university.
    pub university: String,
    /// Year awarded.
    pub year: i64,
}

/// Response for a publication nested under its professor.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct Publication {
    /// Title of the paper.
    pub title: String,
    /// Human-readable label of the publication type.
    pub publication_type: &'static str,
    /// Date of publication.
    pub publication_date: NaiveDate,
    /// Venue name.
    pub venue_name: String,
}

impl From<ProfessorWithRelations> for Professor {
    fn from(loaded: ProfessorWithRelations) -> Self {
        let professor::Professor {
            employee_code,
            name,
            email,
            department,
        } = loaded.professor;
        Self {
            employee_code,
            name,
            email,
            department,
            academics: loaded.academics.into_iter().map(Into::into).collect(),
            publications: loaded.publications.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<professor::Professor> for Professor {
    /// A professor that has no relations loaded, e.g. one just created.
    fn from(found: professor::Professor) -> Self {
        ProfessorWithRelations {
            professor: found,
            academics: vec![],
            publications: vec![],
        }
        .into()
    }
}

impl From<academic::Academic> for Academic {
    fn from(found: academic::Academic) -> Self {
        Self {
            degree_type: found.degree_type.label(),
            university: found.university,
            year: found.year,
        }
    }
}

impl From<publication::Publication> for Publication {
    fn from(found: publication::Publication) -> Self {
        Self {
            title: found.title,
            publication_type: found.publication_type.label(),
            publication_date: found.publication_date,
            venue_name: found.venue_name,
        }
    }
}
