use crate::core::models::question::{QuestionCreate, QuestionWithOptions};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, Default)]
#[sqlx(type_name = "survey_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SurveyStatus {
    #[default]
    Draft,
    Published,
    Closed,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Survey {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    #[sqlx(rename = "description")]
    pub desc: String,
    pub img: String,
    pub status: SurveyStatus,
    pub deadline: DateTime<Utc>,
    pub num: i32,
}

/// Row shape of the survey listings: only what the admin index page shows.
#[derive(Debug, Clone, Serialize, FromRow, PartialEq)]
pub struct Summary {
    pub id: i32,
    pub title: String,
    pub status: SurveyStatus,
    pub num: i32,
}

impl From<&Survey> for Summary {
    fn from(s: &Survey) -> Self {
        Summary {
            id: s.id,
            title: s.title.clone(),
            status: s.status,
            num: s.num,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SurveyCreate {
    pub title: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub img: String,
    #[serde(default)]
    pub status: SurveyStatus,
    pub deadline: DateTime<Utc>,
    pub questions: Vec<QuestionCreate>,
}

/// Full replacement of a survey's editable fields and question tree.
#[derive(Debug, Deserialize)]
pub struct SurveyEdit {
    pub title: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub img: String,
    pub deadline: DateTime<Utc>,
    pub questions: Vec<QuestionCreate>,
}

#[derive(Debug, Clone)]
pub struct Insert {
    pub user_id: i32,
    pub title: String,
    pub desc: String,
    pub img: String,
    pub status: SurveyStatus,
    pub deadline: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Update {
    pub title: String,
    pub desc: String,
    pub img: String,
    pub deadline: DateTime<Utc>,
}

#[derive(Debug, Default)]
pub struct Query {
    pub user_id_eq: Option<i32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SurveyDetail {
    #[serde(flatten)]
    pub survey: Survey,
    pub questions: Vec<QuestionWithOptions>,
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::models::{option::OptionType, question::QuestionType};

    #[test]
    fn test_create_payload_defaults() {
        let body = r#"{
            "title": "Club fair",
            "deadline": "2030-01-01T00:00:00Z",
            "questions": [
                {"serial_num": 1, "subject": "Which club?", "question_type": "single",
                 "options": [{"serial_num": 1, "content": "chess"}, {"serial_num": 2, "content": "http://h/static/go.png", "option_type": "image"}]},
                {"serial_num": 2, "subject": "Photo", "question_type": "image", "required": true, "reg": "^.+$"}
            ]
        }"#;
        let create: SurveyCreate = serde_json::from_str(body).unwrap();
        assert_eq!(create.status, SurveyStatus::Draft);
        assert!(create.img.is_empty());
        assert_eq!(create.questions[0].question_type, QuestionType::Single);
        assert_eq!(create.questions[0].options[0].option_type, OptionType::Text);
        assert_eq!(create.questions[0].options[1].option_type, OptionType::Image);
        assert!(create.questions[1].required);
        assert_eq!(create.questions[1].reg.as_deref(), Some("^.+$"));
    }
}
