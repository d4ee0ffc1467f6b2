use crate::core::models::option::{Opt, OptCreate};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, Default)]
#[sqlx(type_name = "question_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    #[default]
    Single,
    Multi,
    ShortText,
    LongText,
    Image,
}

#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct Question {
    pub id: i32,
    pub survey_id: i32,
    pub serial_num: i32,
    pub subject: String,
    pub description: String,
    pub img: String,
    pub required: bool,
    #[sqlx(rename = "is_unique")]
    pub unique: bool,
    pub question_type: QuestionType,
    pub reg: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionWithOptions {
    #[serde(flatten)]
    pub question: Question,
    pub options: Vec<Opt>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionCreate {
    pub serial_num: i32,
    pub subject: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub img: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub unique: bool,
    pub question_type: QuestionType,
    #[serde(default)]
    pub reg: Option<String>,
    #[serde(default)]
    pub options: Vec<OptCreate>,
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub survey_id: i32,
    pub serial_num: i32,
    pub subject: String,
    pub description: String,
    pub img: String,
    pub required: bool,
    pub unique: bool,
    pub question_type: QuestionType,
    pub reg: Option<String>,
}

#[derive(Debug, Default)]
pub struct Query {
    pub survey_id_eq: Option<i32>,
}
