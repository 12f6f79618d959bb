use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{NewStudent, Student};
use crate::repository::{unique_result, StoreError, StudentRepository};

/// In-process `students` table with the same `NOT NULL` and `UNIQUE (reg_no)`
/// constraints as the Postgres schema. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStudentRepository {
    table: RwLock<Table>,
}

#[derive(Debug, Default)]
struct Table {
    last_id: i64,
    rows: Vec<Student>,
}

impl MemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

fn required(column: &str, value: &Option<String>) -> Result<String, StoreError> {
    value.clone().ok_or_else(|| {
        StoreError::Constraint(format!("null value in column \"{}\" of relation \"students\"", column))
    })
}

#[async_trait]
impl StudentRepository for MemoryStudentRepository {
    async fn save(&self, student: &NewStudent) -> Result<(), StoreError> {
        let password = required("password", &student.password)?;
        let reg_no = required("reg_no", &student.reg_no)?;

        let mut table = self.table.write().await;
        if table.rows.iter().any(|row| row.reg_no == reg_no) {
            return Err(StoreError::Constraint(format!(
                "duplicate key value violates unique constraint: reg_no = {}",
                reg_no
            )));
        }
        table.last_id += 1;
        let id = table.last_id;
        table.rows.push(Student {
            id,
            name: student.name.clone(),
            email: student.email.clone(),
            password,
            phone: student.phone,
            reg_no,
            marks1: student.marks1,
            marks2: student.marks2,
            marks3: student.marks3,
        });
        Ok(())
    }

    async fn find_by_reg_no_and_password(
        &self,
        reg_no: &str,
        password: &str,
    ) -> Result<Option<Student>, StoreError> {
        let table = self.table.read().await;
        let rows = table
            .rows
            .iter()
            .filter(|row| row.reg_no == reg_no && row.password == password)
            .cloned()
            .collect();
        unique_result(reg_no, rows)
    }

    async fn find_by_reg_no(&self, reg_no: &str) -> Result<Option<Student>, StoreError> {
        let table = self.table.read().await;
        let rows = table
            .rows
            .iter()
            .filter(|row| row.reg_no == reg_no)
            .cloned()
            .collect();
        unique_result(reg_no, rows)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
