use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, Default)]
#[sqlx(type_name = "option_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    #[default]
    Text,
    Image,
}

#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct Opt {
    pub id: i32,
    pub question_id: i32,
    pub serial_num: i32,
    pub content: String,
    pub option_type: OptionType,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptCreate {
    pub serial_num: i32,
    pub content: String,
    #[serde(default)]
    pub option_type: OptionType,
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub question_id: i32,
    pub serial_num: i32,
    pub content: String,
    pub option_type: OptionType,
}

#[derive(Debug, Default)]
pub struct Query {
    pub question_id_eq: Option<i32>,
}
