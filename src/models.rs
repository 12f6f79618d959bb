use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// A stored student row. Serialized as-is as the login and results payload,
/// stored password included.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Student {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: String,
    pub phone: Option<i64>,
    pub reg_no: String,
    pub marks1: Option<i32>,
    pub marks2: Option<i32>,
    pub marks3: Option<i32>,
}

/// Registration payload. Every field is optional: nothing is checked before
/// the insert, so a missing `reg_no` or `password` is left for the store to reject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct NewStudent {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub phone: Option<i64>,
    pub reg_no: Option<String>,
    pub marks1: Option<i32>,
    pub marks2: Option<i32>,
    pub marks3: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginStudent {
    pub reg_no: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryResults {
    pub reg_no: String,
}
