use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Answer {
    pub question_id: i32,
    pub content: String,
}

/// One respondent's submission. `time` is kept in the format it was submitted with.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnswerSheet {
    pub id: i32,
    pub survey_id: i32,
    pub time: String,
    pub answers: Vec<Answer>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct QuestionAnswers {
    pub question_id: i32,
    pub title: String,
    pub answers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct AnswersView {
    pub question_answers: Vec<QuestionAnswers>,
    pub time: Vec<String>,
}
