//! Registry of the models exposed for administration.
//!
//! [`SITE`] is fixed at compile time. The HTTP layer serves it as-is and
//! builds changelists from it; nothing registers models at runtime.
use std::collections::HashMap;

use serde::Serialize;

use crate::db::models::academic::{self, Academic};
use crate::db::models::{professor, publication, student};
use crate::db::DatabaseConnection;

/// Operation an admin entry allows on its model.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// List every record.
    List,
    /// Read one record.
    Retrieve,
    /// Add a record.
    Create,
    /// Replace a record.
    Update,
    /// Change some fields of a record.
    PartialUpdate,
    /// Remove a record.
    Delete,
}

/// Every operation, in the order they are listed.
const ALL_OPERATIONS: &[Operation] = &[
    Operation::List,
    Operation::Retrieve,
    Operation::Create,
    Operation::Update,
    Operation::PartialUpdate,
    Operation::Delete,
];

/// Child model edited on its parent's page.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct Inline {
    /// Name of the child model.
    pub model: &'static str,
    /// Blank rows offered for new children.
    pub extra: u32,
}

/// Admin configuration of one model.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct ModelAdmin {
    /// Model name, also the path segment under `/admin/`.
    pub name: &'static str,
    /// Plural shown on the index.
    pub verbose_name_plural: &'static str,
    /// Allowed operations.
    pub operations: &'static [Operation],
    /// Columns shown on the changelist.
    pub list_display: &'static [&'static str],
    /// Children edited inline.
    pub inlines: &'static [Inline],
}

/// The admin site: one entry per model.
pub static SITE: &[ModelAdmin] = &[
    ModelAdmin {
        name: "student",
        verbose_name_plural: "students",
        operations: ALL_OPERATIONS,
        list_display: &["roll_number", "name", "email", "branch_code"],
        inlines: &[],
    },
    ModelAdmin {
        name: "professor",
        verbose_name_plural: "professors",
        operations: ALL_OPERATIONS,
        list_display: &["employee_code", "name", "email", "department"],
        inlines: &[
            Inline {
                model: "academic",
                extra: 1,
            },
            Inline {
                model: "publication",
                extra: 1,
            },
        ],
    },
    ModelAdmin {
        name: "academic",
        verbose_name_plural: "academics",
        operations: ALL_OPERATIONS,
        list_display: &["professor", "degree_type", "university", "year"],
        inlines: &[],
    },
    ModelAdmin {
        name: "publication",
        verbose_name_plural: "publications",
        operations: ALL_OPERATIONS,
        list_display: &[
            "professor",
            "title",
            "publication_type",
            "publication_date",
            "venue_name",
        ],
        inlines: &[],
    },
];

/// Look up a registered model by name.
#[must_use]
pub fn find(name: &str) -> Option<&'static ModelAdmin> {
    SITE.iter().find(|entry| entry.name == name)
}

/// One row of a changelist.
#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct ChangelistEntry {
    /// Primary key, rendered as a string.
    pub pk: String,
    /// Display string of the record.
    pub display: String,
}

impl ChangelistEntry {
    fn new(pk: impl ToString, display: impl ToString) -> Self {
        Self {
            pk: pk.to_string(),
            display: display.to_string(),
        }
    }
}

/// Display string of an academic record: `"{professor name} - {degree label}"`.
#[must_use]
pub fn academic_display(professor_name: &str, found: &Academic) -> String {
    format!("{professor_name} - {}", found.degree_type)
}

/// Build the changelist of a registered model, in insertion order.
///
/// # Errors
/// Errors if the model is not one of [`SITE`] or the database query fails.
pub async fn changelist(
    conn: &DatabaseConnection,
    entry: &ModelAdmin,
) -> anyhow::Result<Vec<ChangelistEntry>> {
    let rows: Vec<ChangelistEntry> = match entry.name {
        "student" => student::Manager::find_all(conn)
            .await?
            .into_iter()
            .map(|found| ChangelistEntry::new(&found.roll_number, &found))
            .collect(),
        "professor" => professor::Manager::find_all(conn)
            .await?
            .into_iter()
            .map(|found| ChangelistEntry::new(&found.employee_code, &found))
            .collect(),
        "academic" => {
            let names: HashMap<String, String> = professor::Manager::find_all(conn)
                .await?
                .into_iter()
                .map(|found| (found.employee_code, found.name))
                .collect();
            academic::Manager::find_all(conn)
                .await?
                .into_iter()
                .map(|found| {
                    let name = names
                        .get(&found.professor_id)
                        .map_or(found.professor_id.as_str(), String::as_str);
                    ChangelistEntry::new(found.id, academic_display(name, &found))
                })
                .collect()
        }
        "publication" => publication::Manager::find_all(conn)
            .await?
            .into_iter()
            .map(|found| ChangelistEntry::new(found.id, &found))
            .collect(),
        other => anyhow::bail!("Model {other} is not registered"),
    };
    Ok(rows)
}
