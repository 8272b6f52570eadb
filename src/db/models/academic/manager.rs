//! Manager for the academic model.
use super::{Academic, DegreeType};
use crate::db::{models::BATCH_SIZE, DatabaseConnection, DatabaseKind, DatabaseTransaction};
use async_trait::async_trait;
use sqlx::QueryBuilder;

#[async_trait]
impl super::Manager for DatabaseConnection {
    /// Find all academic records.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_all(&self) -> anyhow::Result<Vec<Academic>> {
        let statement = "
            SELECT id, professor_id, degree_type, university, year
            FROM academic
            ORDER BY id
        ";
        let rows = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, Academic>(statement)
                    .fetch_all(&mut *connection)
                    .await?
            }
        };
        Ok(rows)
    }

    /// Find an academic record by `id`.
    ///
    /// # Errors
    /// Errors with `sqlx::Error::RowNotFound` if no such record exists.
    async fn find_by_id(&self, id: i64) -> anyhow::Result<Academic> {
        let statement = "
            SELECT id, professor_id, degree_type, university, year
            FROM academic
            WHERE id = $1
        ";
        let row = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, Academic>(statement)
                    .bind(id)
                    .fetch_one(&mut *connection)
                    .await?
            }
        };
        Ok(row)
    }

    /// Find all academic records belonging to any of `employee_codes`.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_all_by_professors(
        &self,
        employee_codes: &[String],
    ) -> anyhow::Result<Vec<Academic>> {
        let mut rows = Vec::new();
        if employee_codes.is_empty() {
            return Ok(rows);
        }
        let mut connection = self.pool.acquire().await?;
        for chunk in employee_codes.chunks(BATCH_SIZE) {
            let mut query_builder = QueryBuilder::new(
                "SELECT id, professor_id, degree_type, university, year FROM academic WHERE professor_id IN (",
            );
            let mut separated = query_builder.separated(", ");
            for code in chunk {
                separated.push_bind(code);
            }
            separated.push_unseparated(") ORDER BY id");
            let mut found = query_builder
                .build_query_as::<Academic>()
                .fetch_all(&mut *connection)
                .await?;
            rows.append(&mut found);
        }
        Ok(rows)
    }
}

#[async_trait]
impl super::TxManager for DatabaseTransaction {
    /// Insert a new academic record.
    ///
    /// # Errors
    /// Errors if `professor_id` does not reference an existing professor.
    async fn create(
        &mut self,
        professor_id: &str,
        degree_type: DegreeType,
        university: &str,
        year: i64,
    ) -> anyhow::Result<i64> {
        let statement = "
            INSERT INTO academic ( professor_id, degree_type, university, year )
            VALUES ( $1, $2, $3, $4 )
            RETURNING id
        ";
        let id = sqlx::query_scalar::<_, i64>(statement)
            .bind(professor_id)
            .bind(degree_type.code())
            .bind(university)
            .bind(year)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(id)
    }

    /// Find an academic record by `id`.
    ///
    /// # Errors
    /// Errors with `sqlx::Error::RowNotFound` if no such record exists.
    async fn find_by_id(&mut self, id: i64) -> anyhow::Result<Academic> {
        let statement = "
            SELECT id, professor_id, degree_type, university, year
            FROM academic
            WHERE id = $1
        ";
        let row = sqlx::query_as::<_, Academic>(statement)
            .bind(id)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(row)
    }

    /// Update an academic record by `id`.
    ///
    /// # Errors
    /// Errors if `professor_id` does not reference an existing professor.
    async fn update(&mut self, academic: &Academic) -> anyhow::Result<()> {
        let statement = "
            UPDATE academic
            SET professor_id = $1, degree_type = $2, university = $3, year = $4
            WHERE id = $5
        ";
        sqlx::query(statement)
            .bind(&academic.professor_id)
            .bind(academic.degree_type.code())
            .bind(&academic.university)
            .bind(academic.year)
            .bind(academic.id)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    /// Delete an academic record by `id`.
    ///
    /// # Errors
    /// Errors if the statement fails to execute.
    async fn delete(&mut self, id: i64) -> anyhow::Result<u64> {
        let statement = "
            DELETE FROM academic
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
