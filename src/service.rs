use std::sync::Arc;

use crate::models::{NewStudent, Student};
use crate::repository::{StoreError, StudentRepository};

/// Thin delegation layer between the handlers and the repository.
#[derive(Clone)]
pub struct StudentService {
    repository: Arc<dyn StudentRepository>,
}

impl StudentService {
    pub fn new(repository: Arc<dyn StudentRepository>) -> Self {
        Self { repository }
    }

    pub async fn register_student(&self, student: &NewStudent) -> Result<(), StoreError> {
        self.repository.save(student).await
    }

    pub async fn find_by_reg_no_and_password(
        &self,
        reg_no: &str,
        password: &str,
    ) -> Result<Option<Student>, StoreError> {
        self.repository
            .find_by_reg_no_and_password(reg_no, password)
            .await
    }

    pub async fn find_by_reg_no(&self, reg_no: &str) -> Result<Option<Student>, StoreError> {
        self.repository.find_by_reg_no(reg_no).await
    }

    pub async fn check_store(&self) -> Result<(), StoreError> {
        self.repository.ping().await
    }
}
