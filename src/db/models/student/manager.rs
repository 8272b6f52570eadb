//! Manager for the student model.
use super::Student;
use crate::db::{DatabaseConnection, DatabaseKind, DatabaseTransaction};
use async_trait::async_trait;

#[async_trait]
impl super::Manager for DatabaseConnection {
    /// Find all students.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn find_all(&self) -> anyhow::Result<Vec<Student>> {
        let statement = "
            SELECT roll_number, name, email, branch_code
            FROM student
            ORDER BY rowid
        ";
        let rows = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, Student>(statement)
                    .fetch_all(&mut *connection)
                    .await?
            }
        };
        Ok(rows)
    }

    /// Find a student by `roll_number`.
    ///
    /// # Errors
    /// Errors with `sqlx::Error::RowNotFound` if no such student exists.
    async fn find_by_roll_number(&self, roll_number: &str) -> anyhow::Result<Student> {
        let statement = "
            SELECT roll_number, name, email, branch_code
            FROM student
            WHERE roll_number = $1
        ";
        let row = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, Student>(statement)
                    .bind(roll_number)
                    .fetch_one(&mut *connection)
                    .await?
            }
        };
        Ok(row)
    }
}

#[async_trait]
impl super::TxManager for DatabaseTransaction {
    /// Insert a new student.
    ///
    /// # Errors
    /// Errors if the roll number or email is already taken.
    async fn create(&mut self, student: &Student) -> anyhow::Result<()> {
        let statement = "
            INSERT INTO student ( roll_number, name, email, branch_code )
            VALUES ( $1, $2, $3, $4 )
        ";
        sqlx::query(statement)
            .bind(&student.roll_number)
            .bind(&student.name)
            .bind(&student.email)
            .bind(&student.branch_code)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    /// Find a student by `roll_number`.
    ///
    /// # Errors
    /// Errors with `sqlx::Error::RowNotFound` if no such student exists.
    async fn find_by_roll_number(&mut self, roll_number: &str) -> anyhow::Result<Student> {
        let statement = "
            SELECT roll_number, name, email, branch_code
            FROM student
            WHERE roll_number = $1
        ";
        let row = sqlx::query_as::<_, Student>(statement)
            .bind(roll_number)
            .fetch_one(&mut *self.tx)
            .await?;
        Ok(row)
    }

    /// Update a student by `roll_number`.
    ///
    /// # Errors
    /// Errors if the new email collides with another student.
    async fn update(&mut self, student: &Student) -> anyhow::Result<()> {
        let statement = "
            UPDATE student
            SET name = $1, email = $2, branch_code = $3
            WHERE roll_number = $4
        ";
        sqlx::query(statement)
            .bind(&student.name)
            .bind(&student.email)
            .bind(&student.branch_code)
            .bind(&student.roll_number)
            .execute(&mut *self.tx)
            .await?;
        Ok(())
    }

    /// Delete a student by `roll_number`.
    ///
    /// # Errors
    /// Errors if the statement fails to execute.
    async fn delete(&mut self, roll_number: &str) -> anyhow::Result<u64> {
        let statement = "
            DELETE FROM student
            WHERE roll_number = $1
        ";
        let affected = sqlx::query(statement)
            .bind(roll_number)
            .execute(&mut *self.tx)
            .await?
            .rows_affected();
        Ok(affected)
    }
}
