use crate::core::models::{
    answer_sheet::{AnswerSheet, AnswersView, QuestionAnswers},
    common::Pagination,
    question::{Query as QuestionQuery, Question},
};
use crate::core::ports::repository::{AnswerSheetCommon, QuestionCommon, Store, SurveyCommon};
use crate::error::Error;
use log::debug;
use std::collections::HashMap;

/// One column per question in display order; answers are matched by question id.
fn shape(questions: &[Question], sheets: &[AnswerSheet]) -> AnswersView {
    let mut columns: Vec<QuestionAnswers> = questions
        .iter()
        .map(|q| QuestionAnswers {
            question_id: q.id,
            title: q.subject.clone(),
            answers: Vec::new(),
        })
        .collect();
    let index: HashMap<i32, usize> = questions.iter().enumerate().map(|(i, q)| (q.id, i)).collect();
    let mut time = Vec::with_capacity(sheets.len());
    for sheet in sheets {
        time.push(sheet.time.clone());
        for answer in &sheet.answers {
            match index.get(&answer.question_id) {
                Some(&i) => columns[i].answers.push(answer.content.clone()),
                None => debug!("sheet {} answers unknown question {}", sheet.id, answer.question_id),
            }
        }
    }
    AnswersView { question_answers: columns, time }
}

async fn load<S>(store: &mut S, survey_id: i32) -> Result<(Vec<Question>, Vec<AnswerSheet>), Error>
where
    S: Store,
{
    SurveyCommon::get(store, survey_id).await?;
    let questions = QuestionCommon::query(store, QuestionQuery { survey_id_eq: Some(survey_id) }).await?;
    let sheets = AnswerSheetCommon::get_by_survey_id(store, survey_id).await?;
    Ok((questions, sheets))
}

/// A page of answer sheets and the total number of sheets of the survey.
pub async fn survey_answers<S>(store: &mut S, survey_id: i32, pagination: Pagination) -> Result<(AnswersView, i64), Error>
where
    S: Store,
{
    let (questions, sheets) = load(store, survey_id).await?;
    let total = sheets.len() as i64;
    match pagination.bounds(sheets.len()) {
        Some(range) => Ok((shape(&questions, &sheets[range]), total)),
        None => Ok((AnswersView::default(), total)),
    }
}

pub async fn all_survey_answers<S>(store: &mut S, survey_id: i32) -> Result<AnswersView, Error>
where
    S: Store,
{
    let (questions, sheets) = load(store, survey_id).await?;
    Ok(shape(&questions, &sheets))
}
