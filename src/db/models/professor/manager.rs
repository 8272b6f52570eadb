//! Manager for the professor model.
use super::Professor;
use crate::db::{DatabaseConnection, DatabaseKind, DatabaseTransaction};
use async_trait::async_trait;

#[async_trait]
impl super::Manager for DatabaseConnection {
    /// Find all professors.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_all(&self) -> anyhow::Result<Vec<Professor>> {
        let statement = "
            SELECT employee_code, name, email, department
            FROM professor
            ORDER BY rowid
        ";
        let rows = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, Professor>(statement)
                    .fetch_all(&mut *connection)
                    .await?
            }
        };
        Ok(rows)
    }

    /// Find a professor by `employee_code`.
    ///
    /// # Errors
    /// Errors with `sqlx::Error::RowNotFound` if no such professor exists.
    async fn find_by_employee_code(&self, employee_code: &str) -> anyhow::Result<Professor> {
        let statement = "
            SELECT employee_code, name, email, department
            FROM professor
            WHERE employee_code = $1
        ";
        let row = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, Professor>(statement)
                    .bind(employee_code)
                    .fetch_one(&mut *connection)
                    .await?
            }
        };
        Ok(row)
    }
}

#[async_trait]
impl super::TxManager for DatabaseTransaction {
    /// Insert a new professor.
    ///
    /// # Errors
    /// Errors if the employee code or email is already taken.
    async fn create(&mut self, professor: &Professor) -> anyhow::Result<()> {
        let statement = "
            INSERT INTO professor ( employee_code, name, email, department )
            VALUES ( $1, $2, $3, $4 )
        ";
        sqlx::query(statement)
            .bind(&professor.employee_code)
            .bind(&professor.name)
            .bind(&professor.email)
            .bind(&professor.department)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    /// Find a professor by `employee_code`.
    ///
    /// # Errors
    /// Errors with `sqlx::Error::RowNotFound` if no such professor exists.
    async fn find_by_employee_code(&mut self, employee_code: &str) -> anyhow::Result<Professor> {
        let statement = "
            SELECT employee_code, name, email, department
            FROM professor
            WHERE employee_code = $1
        ";
        let row = sqlx::query_as::<_, Professor>(statement)
            .bind(employee_code)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(row)
    }

    /// Update a professor by `employee_code`.
    ///
    /// # Errors
    /// Errors if the new email collides with another professor.
    async fn update(&mut self, professor: &Professor) -> anyhow::Result<()> {
        let statement = "
            UPDATE professor
            SET name = $1, email = $2, department = $3
            WHERE employee_code = $4
        ";
        sqlx::query(statement)
            .bind(&professor.name)
            .bind(&professor.email)
            .bind(&professor.department)
            .bind(&professor.employee_code)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    /// Delete a professor by `employee_code`.
    ///
    /// # Errors
    /// Errors if the statement fails to execute.
    async fn delete(&mut self, employee_code: &str) -> anyhow::Result<u64> {
        let statement = "
            DELETE FROM professor
            WHERE employee_code = $1
        ";
        let affected = sqlx::query(statement)
            .bind(employee_code)
            .execute(&mut *self.tx)
            .await?
            .rows_affected();
        Ok(affected)
    }
}
