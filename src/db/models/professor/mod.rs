use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod manager;

/// Trait for reading professors.
///
/// Listing with relations attached lives in [`crate::db::queries`].
#[async_trait]
pub trait Manager {
    /// Find all professors in insertion order, without relations.
    async fn find_all(&self) -> anyhow::Result<Vec<Professor>>;
    /// Find a professor by employee code, without relations.
    async fn find_by_employee_code(&self, employee_code: &str) -> anyhow::Result<Professor>;
}

/// Trait for managing transactions on professors.
#[async_trait]
pub trait TxManager {
    /// Insert a new professor.
    async fn create(&mut self, professor: &Professor) -> anyhow::Result<()>;
    /// Find a professor by employee code inside the transaction.
    async fn find_by_employee_code(&mut self, employee_code: &str) -> anyhow::Result<Professor>;
    /// Overwrite the flat fields of an existing professor.
    async fn update(&mut self, professor: &Professor) -> anyhow::Result<()>;
    /// Delete a professor. Academics and publications go with it through the
    /// foreign key cascade. Returns the number of deleted professor rows.
    async fn delete(&mut self, employee_code: &str) -> anyhow::Result<u64>;
}

#[derive(sqlx::FromRow, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
/// Model for a professor.
pub struct Professor {
    /// Employee code. Primary key, never reassigned.
    pub employee_code: String,
    /// Full name.
    pub name: String,
    /// Contact email, unique across all professors.
    pub email: String,
    /// Department the professor belongs to.
    pub department: String,
}

impl fmt::Display for Professor {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}", self.name)
    }
}
