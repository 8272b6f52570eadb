use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sqlx::{any::AnyRow, FromRow, Row as _};
use std::{fmt, str::FromStr};

use super::InvalidChoice;

pub mod manager;

/// Format in which publication dates are stored and exchanged.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trait for reading publications.
#[async_trait]
pub trait Manager {
    /// Find all publications in insertion order.
    async fn find_all(&self) -> anyhow::Result<Vec<Publication>>;
    /// Find a publication by id.
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Publication>;
    /// Find the publications of every given professor in one batched lookup
    /// per [`super::BATCH_SIZE`] professors.
    async fn find_all_by_professors(
        &self,
        employee_codes: &[String],
    ) -> anyhow::Result<Vec<Publication>>;
}

/// Trait for managing transactions on publications.
#[async_trait]
pub trait TxManager {
    /// Insert a new publication. Returns the new id.
    async fn create(
        &mut self,
        professor_id: &str,
        title: &str,
        publication_type: PublicationType,
        publication_date: &NaiveDate,
        venue_name: &str,
    ) -> anyhow::Result<i64>;
    /// Find a publication by id inside the transaction.
    async fn find_by_id(&mut self, id: i64) -> anyhow::Result<Publication>;
    /// Overwrite every field of an existing publication.
    async fn update(&mut self, publication: &Publication) -> anyhow::Result<()>;
    /// Delete a publication. Returns the number of deleted rows.
    async fn delete(&mut self, id: i64) -> anyhow::Result<u64>;
}

/// Kind of venue a paper appeared in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PublicationType {
    /// Peer-reviewed journal.
    Journal,
    /// Conference proceedings.
    Conference,
}

impl PublicationType {
    /// Stored code and human-readable label of every publication type.
    pub const CHOICES: [(Self, &'static str, &'static str); 2] = [
        (Self::Journal, "Journal", "Journal"),
        (Self::Conference, "Conference", "Conference"),
    ];

    /// Code stored in the database and accepted on writes.
    #[must_use]
    pub fn code(self) -> &'static str {
        self.choice().1
    }

    /// Label shown to readers.
    #[must_use]
    pub fn label(self) -> &'static str {
        self.choice().2
    }

    /// Row of [`Self::CHOICES`] for this variant.
    fn choice(self) -> (Self, &'static str, &'static str) {
        Self::CHOICES
            .into_iter()
            .find(|&(variant, _, _)| variant == self)
            .unwrap_or(Self::CHOICES[0])
    }
}

impl FromStr for PublicationType {
    type Err = InvalidChoice;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Self::CHOICES
            .into_iter()
            .find(|&(_, choice_code, _)| choice_code == code)
            .map(|(variant, _, _)| variant)
            .ok_or_else(|| InvalidChoice(code.to_owned()))
    }
}

impl Serialize for PublicationType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for PublicationType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(de::Error::custom)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
/// Model for a paper authored by a professor.
pub struct Publication {
    /// Surrogate key.
    pub id: i64,
    /// Foreign key reference to professor by employee code.
    pub professor_id: String,
    /// Title of the paper.
    pub title: String,
    /// Journal or conference.
    pub publication_type: PublicationType,
    /// Date of publication.
    pub publication_date: NaiveDate,
    /// Venue, e.g. "IEEE Transactions" or "NeurIPS 2024".
    pub venue_name: String,
}

impl FromRow<'_, AnyRow> for Publication {
    fn from_row(row: &AnyRow) -> Result<Self, sqlx::Error> {
        let publication_type: String = row.try_get("publication_type")?;
        let publication_date: String = row.try_get("publication_date")?;
        Ok(Self {
            id: row.try_get("id")?,
            professor_id: row.try_get("professor_id")?,
            title: row.try_get("title")?,
            publication_type: publication_type
                .parse()
                .map_err(|err| sqlx::Error::Decode(Box::new(err)))?,
            publication_date: NaiveDate::parse_from_str(&publication_date, DATE_FORMAT)
                .map_err(|err| sqlx::Error::Decode(Box::new(err)))?,
            venue_name: row.try_get("venue_name")?,
        })
    }
}

impl fmt::Display for Publication {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}", self.title)
    }
}
