use async_trait::async_trait;
use thiserror::Error;

use crate::models::{NewStudent, Student};
use crate::session::SessionFactory;

const STUDENT_COLUMNS: &str = "id, name, email, password, phone, reg_no, marks1, marks2, marks3";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(String),

    #[error("more than one student matches reg_no `{reg_no}`")]
    NonUnique { reg_no: String },

    #[error("constraint violated: {0}")]
    Constraint(String),
}

/// Data access for the `students` table. Every call runs in its own scoped
/// session; nothing spans two calls.
#[async_trait]
pub trait StudentRepository: Send + Sync {
    async fn save(&self, student: &NewStudent) -> Result<(), StoreError>;

    async fn find_by_reg_no_and_password(
        &self,
        reg_no: &str,
        password: &str,
    ) -> Result<Option<Student>, StoreError>;

    async fn find_by_reg_no(&self, reg_no: &str) -> Result<Option<Student>, StoreError>;

    /// Round-trips an empty transaction through the store.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// At most one row may match; a second one is an error rather than a pick.
pub(crate) fn unique_result(reg_no: &str, mut rows: Vec<Student>) -> Result<Option<Student>, StoreError> {
    if rows.len() > 1 {
        return Err(StoreError::NonUnique {
            reg_no: reg_no.to_string(),
        });
    }
    Ok(rows.pop())
}

#[derive(Debug, Clone)]
pub struct PgStudentRepository {
    sessions: SessionFactory,
}

impl PgStudentRepository {
    pub fn new(sessions: SessionFactory) -> Self {
        Self { sessions }
    }
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    async fn save(&self, student: &NewStudent) -> Result<(), StoreError> {
        let mut tx = self.sessions.begin().await?;
        sqlx::query(
            "INSERT INTO students (name, email, password, phone, reg_no, marks1, marks2, marks3) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(&student.name)
        .bind(&student.email)
        .bind(&student.password)
        .bind(student.phone)
        .bind(&student.reg_no)
        .bind(student.marks1)
        .bind(student.marks2)
        .bind(student.marks3)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(())
    }

    async fn find_by_reg_no_and_password(
        &self,
        reg_no: &str,
        password: &str,
    ) -> Result<Option<Student>, StoreError> {
        let mut session = self.sessions.open_session().await?;
        let rows = sqlx::query_as::<_, Student>(&format!(
            "SELECT {} FROM students WHERE reg_no = $1 AND password = $2 LIMIT 2",
            STUDENT_COLUMNS
        ))
        .bind(reg_no)
        .bind(password)
        .fetch_all(&mut *session)
        .await?;
        unique_result(reg_no, rows)
    }

    async fn find_by_reg_no(&self, reg_no: &str) -> Result<Option<Student>, StoreError> {
        let mut session = self.sessions.open_session().await?;
        let rows = sqlx::query_as::<_, Student>(&format!(
            "SELECT {} FROM students WHERE reg_no = $1 LIMIT 2",
            STUDENT_COLUMNS
        ))
        .bind(reg_no)
        .fetch_all(&mut *session)
        .await?;
        unique_result(reg_no, rows)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut tx = self.sessions.begin().await?;
        sqlx::query("SELECT 1").execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }
}
