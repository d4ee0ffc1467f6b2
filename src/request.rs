use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Pagination {
    pub page: i64,
    pub size: i64,
}

#[derive(Debug, Deserialize)]
pub struct StatusChange {
    pub status: crate::core::models::survey::SurveyStatus,
}

#[derive(Debug, Deserialize)]
pub struct ManagerGrant {
    pub user_id: i32,
}
