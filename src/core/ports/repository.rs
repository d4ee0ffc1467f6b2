use crate::core::models::{
    answer_sheet::AnswerSheet,
    manage::{Insert as ManageInsert, Manage},
    option::{Insert as OptionInsert, Opt, Query as OptionQuery},
    question::{Insert as QuestionInsert, Query as QuestionQuery, Question},
    survey::{Insert as SurveyInsert, Query as SurveyQuery, Summary as SurveySummary, Survey, SurveyStatus, Update as SurveyUpdate},
};
use crate::error::Error;

pub trait SurveyCommon {
    async fn insert(&mut self, survey: SurveyInsert) -> Result<i32, Error>;
    async fn get(&mut self, id: i32) -> Result<Survey, Error>;
    async fn get_for_update(&mut self, id: i32) -> Result<Survey, Error>;
    /// Ordered by id descending.
    async fn query(&mut self, query: SurveyQuery) -> Result<Vec<SurveySummary>, Error>;
    async fn update(&mut self, id: i32, update: SurveyUpdate) -> Result<(), Error>;
    async fn update_status(&mut self, id: i32, status: SurveyStatus) -> Result<(), Error>;
    async fn delete(&mut self, id: i32) -> Result<(), Error>;
}

pub trait QuestionCommon {
    async fn insert(&mut self, question: QuestionInsert) -> Result<i32, Error>;
    /// Ordered by serial number.
    async fn query(&mut self, query: QuestionQuery) -> Result<Vec<Question>, Error>;
    async fn delete_by_survey(&mut self, survey_id: i32) -> Result<(), Error>;
}

pub trait OptionCommon {
    async fn insert(&mut self, option: OptionInsert) -> Result<i32, Error>;
    /// Ordered by serial number.
    async fn query(&mut self, query: OptionQuery) -> Result<Vec<Opt>, Error>;
    async fn delete_by_question(&mut self, question_id: i32) -> Result<(), Error>;
}

pub trait ManageCommon {
    async fn insert(&mut self, manage: ManageInsert) -> Result<i32, Error>;
    async fn exists(&mut self, user_id: i32, survey_id: i32) -> Result<bool, Error>;
    /// Ordered by id descending.
    async fn query_by_user(&mut self, user_id: i32) -> Result<Vec<Manage>, Error>;
    async fn delete_by_survey(&mut self, survey_id: i32) -> Result<(), Error>;
}

pub trait AnswerSheetCommon {
    /// Sheets in submission order.
    async fn get_by_survey_id(&mut self, survey_id: i32) -> Result<Vec<AnswerSheet>, Error>;
    async fn delete_by_survey_id(&mut self, survey_id: i32) -> Result<(), Error>;
}

pub trait Common: SurveyCommon + QuestionCommon + OptionCommon + ManageCommon + AnswerSheetCommon {}

pub trait Store: Common {}

pub trait TxStore: Store {
    async fn commit(self) -> Result<(), Error>;
}
