use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod manager;

/// Trait for reading students.
#[async_trait]
pub trait Manager {
    /// Find all students in insertion order.
    async fn find_all(&self) -> anyhow::Result<Vec<Student>>;
    /// Find a student by roll number.
    async fn find_by_roll_number(&self, roll_number: &str) -> anyhow::Result<Student>;
}

/// Trait for managing transactions on students.
#[async_trait]
pub trait TxManager {
    /// Insert a new student.
    async fn create(&mut self, student: &Student) -> anyhow::Result<()>;
    /// Find a student by roll number inside the transaction.
    async fn find_by_roll_number(&mut self, roll_number: &str) -> anyhow::Result<Student>;
    /// Overwrite the mutable fields of an existing student.
    async fn update(&mut self, student: &Student) -> anyhow::Result<()>;
    /// Delete a student. Returns the number of deleted rows.
    async fn delete(&mut self, roll_number: &str) -> anyhow::Result<u64>;
}

#[derive(sqlx::FromRow, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
/// Model for a student.
pub struct Student {
    /// University roll number. Primary key, never reassigned.
    pub roll_number: String,
    /// Full name.
    pub name: String,
    /// Contact email, unique across all students.
    pub email: String,
    /// Code of the branch the student is enrolled in, e.g. `CSE`.
    pub branch_code: String,
}

impl fmt::Display for Student {
    fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "{}", self.name)
    }
}
