//! This module contains all the sqlx structs for the database tables.
use derive_more::Display;

/// sqlx structs for academic table.
pub mod academic;
/// sqlx structs for professor table.
pub mod professor;
/// sqlx structs for publication table.
pub mod publication;
/// sqlx structs for student table.
pub mod student;

/// Maximum number of bound values sent in a single `IN (...)` lookup.
/// Kept well under `SQLite`'s host parameter limit.
pub const BATCH_SIZE: usize = 500;

/// A stored code that is not a member of its enumerated set.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
#[display(fmt = "\"{}\" is not a valid choice.", _0)]
pub struct InvalidChoice(pub String);

impl std::error::Error for InvalidChoice {}
