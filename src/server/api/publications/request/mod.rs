use serde::Deserialize;

use crate::db::models::publication::Publication;
use crate::utils::validation::{self, Field, FieldErrors, WriteMode};

/// Body of a publication write.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct PublicationPayload {
    /// Employee code of the authoring professor.
    pub professor: Field,
    /// Paper title.
    pub title: Field,
    /// `Journal` or `Conference`.
    pub publication_type: Field,
    /// ISO date, `YYYY-MM-DD`.
    pub publication_date: Field,
    /// Venue name.
    pub venue_name: Field,
}

impl PublicationPayload {
    /// Check the payload and produce the record to store.
    ///
    /// # Errors
    /// Errors with every failed field.
    pub fn validate(self, mode: WriteMode<'_, Publication>) -> Result<Publication, FieldErrors> {
        let mut errors = FieldErrors::default();
        let fallback = mode.fallback();
        let professor_id = validation::text(
            &mut errors,
            "professor",
            self.professor,
            fallback.map(|stored| stored.professor_id.as_str()),
            20,
        );
        let title = validation::text(
            &mut errors,
            "title",
            self.title,
            fallback.map(|stored| stored.title.as_str()),
            250,
        );
        let publication_type = validation::choice(
            &mut errors,
            "publication_type",
            self.publication_type,
            fallback.map(|stored| stored.publication_type),
        );
        let publication_date = validation::date(
            &mut errors,
            "publication_date",
            self.publication_date,
            fallback.map(|stored| stored.publication_date),
        );
        let venue_name = validation::text(
            &mut errors,
            "venue_name",
            self.venue_name,
            fallback.map(|stored| stored.venue_name.as_str()),
            200,
        );
        match (professor_id, title, publication_type, publication_date, venue_name) {
            (
                Some(professor_id),
                Some(title),
                Some(publication_type),
                Some(publication_date),
                Some(venue_name),
            ) if errors.is_empty() => Ok(Publication {
                id: mode.existing().map_or(0, |stored| stored.id),
                professor_id,
                title,
                publication_type,
                publication_date,
                venue_name,
            }),
            _ => Err(errors),
        }
    }
}
