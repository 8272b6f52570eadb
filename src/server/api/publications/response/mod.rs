use chrono::NaiveDate;
use serde::Serialize;

use crate::db::models::publication;

/// Response for a publication served on its own.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct Publication {
    /// Surrogate key.
    pub id: i64,
    /// Employee code of the authoring professor.
    pub professor: String,
    /// Paper title.
    pub title: String,
    /// Stored publication type code.
    pub publication_type: &'static str,
    /// Date of publication.
    pub publication_date: NaiveDate,
    /// Venue name.
    pub venue_name: String,
}

impl From<publication::Publication> for Publication {
    fn from(found: publication::Publication) -> Self {
        Self {
            id: found.id,
            professor: found.professor_id,
            title: found.title,
            publication_type: found.publication_type.code(),
            publication_date: found.publication_date,
            venue_name: found.venue_name,
        }
    }
}
