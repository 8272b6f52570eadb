//! Central place for professor listing queries.
//!
//! A professor listing is always three round trips regardless of how many
//! professors match: one for the professors, then one batched lookup each
//! for their academics and publications.

use std::collections::HashMap;

use chrono::NaiveDate;
use sqlx::QueryBuilder;

use crate::db::models::academic::{self, Academic};
use crate::db::models::professor::{self, Professor};
use crate::db::models::publication::{self, Publication, DATE_FORMAT};
use crate::db::{DatabaseConnection, DatabaseKind};

/// Narrows down which professors are listed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfessorFilter {
    /// Keep only professors with at least one publication dated inside
    /// `[start, end]`, both ends inclusive.
    pub publication_date_range: Option<(NaiveDate, NaiveDate)>,
    /// Keep only professors of this department.
    pub department: Option<String>,
}

/// A professor with its academic history and publications attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfessorWithRelations {
    /// The professor itself.
    pub professor: Professor,
    /// Degrees, in insertion order.
    pub academics: Vec<Academic>,
    /// Publications, in insertion order.
    pub publications: Vec<Publication>,
}

/// Find every professor matching `filter`, with relations eagerly loaded.
///
/// Each professor appears at most once, however many of its publications
/// fall into the requested date range.
///
/// # Errors
/// Errors if can't establish a connection to the database.
#[tracing::instrument(level = "debug", skip(conn))]
pub async fn find_professors(
    conn: &DatabaseConnection,
    filter: &ProfessorFilter,
) -> anyhow::Result<Vec<ProfessorWithRelations>> {
    let professors = find_filtered_professors(conn, filter).await?;
    tracing::debug!("Found {} professors", professors.len());
    attach_relations(conn, professors).await
}

/// Find a single professor by `employee_code`, with relations eagerly loaded.
///
/// # Errors
/// Errors with `sqlx::Error::RowNotFound` if no such professor exists.
pub async fn find_professor(
    conn: &DatabaseConnection,
    employee_code: &str,
) -> anyhow::Result<ProfessorWithRelations> {
    let found = professor::Manager::find_by_employee_code(conn, employee_code).await?;
    attach_relations(conn, vec![found])
        .await?
        .pop()
        .ok_or_else(|| sqlx::Error::RowNotFound.into())
}

/// Select the professors matching `filter` in insertion order.
async fn find_filtered_professors(
    conn: &DatabaseConnection,
    filter: &ProfessorFilter,
) -> anyhow::Result<Vec<Professor>> {
    let mut query_builder = QueryBuilder::new(
        "SELECT p.employee_code, p.name, p.email, p.department FROM professor p WHERE 1 = 1",
    );
    if let Some(department) = filter.department.as_ref() {
        query_builder
            .push(" AND p.department = ")
            .push_bind(department.clone());
    }
    if let Some((start, end)) = filter.publication_date_range {
        // One row per professor however many publications match.
        query_builder
            .push(
                " AND EXISTS (SELECT 1 FROM publication pb WHERE pb.professor_id = p.employee_code AND pb.publication_date BETWEEN ",
            )
            .push_bind(start.format(DATE_FORMAT).to_string())
            .push(" AND ")
            .push_bind(end.format(DATE_FORMAT).to_string())
            .push(")");
    }
    query_builder.push(" ORDER BY p.rowid");
    let rows = match conn.kind {
        DatabaseKind::Sqlite => {
            let mut connection = conn.pool.acquire().await?;
            query_builder
                .build_query_as::<Professor>()
                .fetch_all(&mut *connection)
                .await?
        }
    };
    Ok(rows)
}

/// Load academics and publications for all `professors` at once and hand
/// each professor its own.
async fn attach_relations(
    conn: &DatabaseConnection,
    professors: Vec<Professor>,
) -> anyhow::Result<Vec<ProfessorWithRelations>> {
    let employee_codes: Vec<String> = professors
        .iter()
        .map(|found| found.employee_code.clone())
        .collect();
    let academics = academic::Manager::find_all_by_professors(conn, &employee_codes).await?;
    let publications =
        publication::Manager::find_all_by_professors(conn, &employee_codes).await?;

    let mut academics_by_professor =
        group_by_professor(academics, |academic| academic.professor_id.as_str());
    let mut publications_by_professor =
        group_by_professor(publications, |publication| publication.professor_id.as_str());

    Ok(professors
        .into_iter()
        .map(|found| ProfessorWithRelations {
            academics: academics_by_professor
                .remove(&found.employee_code)
                .unwrap_or_default(),
            publications: publications_by_professor
                .remove(&found.employee_code)
                .unwrap_or_default(),
            professor: found,
        })
        .collect())
}

/// Bucket `rows` by owning professor, keeping their relative order.
fn group_by_professor<T>(rows: Vec<T>, owner: impl Fn(&T) -> &str) -> HashMap<String, Vec<T>> {
    let mut grouped: HashMap<String, Vec<T>> = HashMap::new();
    for row in rows {
        grouped.entry(owner(&row).to_owned()).or_default().push(row);
    }
    grouped
}
