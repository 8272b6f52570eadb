//! Manager for the publication model.
use crate::db::{models::BATCH_SIZE, DatabaseConnection, DatabaseKind, DatabaseTransaction};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::QueryBuilder;

use super::{Publication, PublicationType, DATE_FORMAT};

#[async_trait]
impl super::Manager for DatabaseConnection {
    /// Find all publications.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_all(&self) -> anyhow::Result<Vec<Publication>> {
        let statement = "
            SELECT id, professor_id, title, publication_type, publication_date, venue_name
            FROM publication
            ORDER BY id
        ";
        let rows = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, Publication>(statement)
                    .fetch_all(&mut *connection)
                    .await?
            }
        };
        Ok(rows)
    }

    /// Find a publication by `id`.
    ///
    /// # Errors
    /// Errors with `sqlx::Error::RowNotFound` if no such publication exists.
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Publication> {
        let statement = "
            SELECT id, professor_id, title, publication_type, publication_date, venue_name
            FROM publication
            WHERE id = $1
        ";
        let row = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, Publication>(statement)
                    .bind(id)
                    .fetch_one(&mut *connection)
                    .await?
            }
        };
        Ok(row)
    }

    /// Find all publications belonging to any of `employee_codes`.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_all_by_professors(
        &self,
        employee_codes: &[String],
    ) -> anyhow::Result<Vec<Publication>> {
        let mut rows = Vec::new();
        if employee_codes.is_empty() {
            return Ok(rows);
        }
        let mut connection = self.pool.acquire().await?;
        for chunk in employee_codes.chunks(BATCH_SIZE) {
            let mut query_builder = QueryBuilder::new(
                "SELECT id, professor_id, title, publication_type, publication_date, venue_name FROM publication WHERE professor_id IN (",
            );
            let mut separated = query_builder.separated(", ");
            for code in chunk {
                separated.push_bind(code);
            }
            separated.push_unseparated(") ORDER BY id");
            let mut found = query_builder
                .build_query_as::<Publication>()
                .fetch_all(&mut *connection)
                .await?;
            rows.append(&mut found);
        }
        Ok(rows)
    }
}

#[async_trait]
impl super::TxManager for DatabaseTransaction {
    /// Insert a new publication.
    ///
    /// # Errors
    /// Errors if `professor_id` does not reference an existing professor.
    async fn create(
        &mut self,
        professor_id: &str,
        title: &str,
        publication_type: PublicationType,
        publication_date: &NaiveDate,
        venue_name: &str,
    ) -> anyhow::Result<i64> {
        let statement = "
            INSERT INTO publication ( professor_id, title, publication_type, publication_date, venue_name )
            VALUES ( $1, $2, $3, $4, $5 )
            RETURNING id
        ";
        let id = sqlx::query_scalar::<_, i64>(statement)
            .bind(professor_id)
            .bind(title)
            .bind(publication_type.code())
            .bind(publication_date.format(DATE_FORMAT).to_string())
            .bind(venue_name)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(id)
    }

    /// Find a publication by `id`.
    ///
    /// # Errors
    /// Errors with `sqlx::Error::RowNotFound` if no such publication exists.
    async fn find_by_id(&mut self, id: i64) -> anyhow::Result<Publication> {
        let statement = "
            SELECT id, professor_id, title, publication_type, publication_date, venue_name
            FROM publication
            WHERE id = $1
        ";
        let row = sqlx::query_as::<_, Publication>(statement)
            .bind(id)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(row)
    }

    /// Update a publication by `id`.
    ///
    /// # Errors
    /// Errors if `professor_id` does not reference an existing professor.
    async fn update(&mut self, publication: &Publication) -> anyhow::Result<()> {
        let statement = "
            UPDATE publication
            SET professor_id = $1, title = $2, publication_type = $3, publication_date = $4, venue_name = $5
            WHERE id = $6
        ";
        sqlx::query(statement)
            .bind(&publication.professor_id)
            .bind(&publication.title)
            .bind(publication.publication_type.code())
            .bind(publication.publication_date.format(DATE_FORMAT).to_string())
            .bind(&publication.venue_name)
            .bind(publication.id)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    /// Delete a publication by `id`.
    ///
    /// # Errors
    /// Errors if the statement fails to execute.
    async fn delete(&mut self, id: i64) -> anyhow::Result<u64> {
        let statement = "
            DELETE FROM publication
            WHERE id = $1
        ";
        let affected = sqlx::query(statement)
            .bind(id)
            .execute(&mut *self.tx)
            .await?
            .rows_affected();
        Ok(affected)
    }
}
