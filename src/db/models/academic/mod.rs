use async_trait::async_trait;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sqlx::{any::AnyRow, FromRow, Row as _};
use std::{fmt, str::FromStr};

use super::InvalidChoice;

pub mod manager;

/// Trait for reading academic records.
#[async_trait]
pub trait Manager {
    /// Find all academic records in insertion order.
    async fn find_all(&self) -> anyhow::Result<Vec<Academic>>;
    /// Find an academic record by id.
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Academic>;
    /// Find the academic records of every given professor in one batched
    /// lookup per [`super::BATCH_SIZE`] professors.
    async fn find_all_by_professors(
        &self,
        employee_codes: &[String],
    ) -> anyhow::Result<Vec<Academic>>;
}

/// Trait for managing transactions on academic records.
#[async_trait]
pub trait TxManager {
    /// Insert a new academic record. Returns the new id.
    async fn create(
        &mut self,
        professor_id: &str,
        degree_type: DegreeType,
        university: &str,
        year: i64,
    ) -> anyhow::Result<i64>;
    /// Find an academic record by id inside the transaction.
    async fn find_by_id(&mut self, id: i64) -> anyhow::Result<Academic>;
    /// Overwrite every field of an existing academic record.
    async fn update(&mut self, academic: &Academic) -> anyhow::Result<()>;
    /// Delete an academic record. Returns the number of deleted rows.
    async fn delete(&mut self, id: i64) -> anyhow::Result<u64>;
}

/// Degree a professor holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DegreeType {
    /// Bachelor level degree.
    Undergraduate,
    /// Master level degree.
    Postgraduate,
    /// Doctorate.
    PhD,
}

impl DegreeType {
    /// Stored code and human-readable label of every degree type.
    pub const CHOICES: [(Self, &'static str, &'static str); 3] = [
        (Self::Undergraduate, "UG", "Undergraduate"),
        (Self::Postgraduate, "PG", "Postgraduate"),
        (Self::PhD, "PHD", "PhD"),
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

impl FromStr for DegreeType {
    type Err = InvalidChoice;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Self::CHOICES
            .into_iter()
            .find(|&(_, choice_code, _)| choice_code == code)
            .map(|(variant, _, _)| variant)
            .ok_or_else(|| InvalidChoice(code.to_owned()))
    }
}

impl fmt::Display for DegreeType {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}", self.label())
    }
}

impl Serialize for DegreeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for DegreeType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        code.parse().map_err(de::Error::custom)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
/// Model for a degree held by a professor.
pub struct Academic {
    /// Surrogate key.
    pub id: i64,
    /// Foreign key reference to professor by employee code.
    pub professor_id: String,
    /// Degree obtained.
    pub degree_type: DegreeType,
    /// Awarding university.
    pub university: String,
    /// Year the degree was awarded.
    pub year: i64,
}

impl FromRow<'_, AnyRow> for Academic {
    fn from_row(row: &AnyRow) -> Result<Self, sqlx::Error> {
        let degree_type: String = row.try_get("degree_type")?;
        Ok(Self {
            id: row.try_get("id")?,
            professor_id: row.try_get("professor_id")?,
            degree_type: degree_type
                .parse()
                .map_err(|err| sqlx::Error::Decode(Box::new(err)))?,
            university: row.try_get("university")?,
            year: row.try_get("year")?,
        })
    }
}
