use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct Manage {
    pub id: i32,
    pub user_id: i32,
    pub survey_id: i32,
}

pub struct Insert {
    pub user_id: i32,
    pub survey_id: i32,
}
