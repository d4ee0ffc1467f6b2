use crate::core::images::{collect_answer_images, collect_image_references, collect_submitted_references};
use crate::core::models::{
    manage::{Insert as ManageInsert, Manage},
    option::{Insert as OptionInsert, Query as OptionQuery},
    question::{Insert as QuestionInsert, Query as QuestionQuery, QuestionCreate, QuestionWithOptions},
    survey::{Insert as SurveyInsert, Query as SurveyQuery, Summary as SurveySummary, Survey, SurveyCreate, SurveyDetail, SurveyEdit, SurveyStatus, Update as SurveyUpdate},
};
use crate::core::ports::image_store::ImageStore;
use crate::core::ports::repository::{AnswerSheetCommon, ManageCommon, OptionCommon, QuestionCommon, Store, SurveyCommon, TxStore};
use crate::error::Error;
use log::{debug, info, warn};

pub(crate) async fn load_questions<S>(store: &mut S, survey_id: i32) -> Result<Vec<QuestionWithOptions>, Error>
where
    S: Store,
{
    let questions = QuestionCommon::query(store, QuestionQuery { survey_id_eq: Some(survey_id) }).await?;
    let mut tree = Vec::with_capacity(questions.len());
    for question in questions {
        let options = OptionCommon::query(store, OptionQuery { question_id_eq: Some(question.id) }).await?;
        tree.push(QuestionWithOptions { question, options });
    }
    Ok(tree)
}

async fn insert_questions<S>(store: &mut S, survey_id: i32, questions: Vec<QuestionCreate>) -> Result<(), Error>
where
    S: Store,
{
    for q in questions {
        let question_id = QuestionCommon::insert(
            store,
            QuestionInsert {
                survey_id,
                serial_num: q.serial_num,
                subject: q.subject,
                description: q.description,
                img: q.img,
                required: q.required,
                unique: q.unique,
                question_type: q.question_type,
                reg: q.reg,
            },
        )
        .await?;
        for o in q.options {
            OptionCommon::insert(
                store,
                OptionInsert {
                    question_id,
                    serial_num: o.serial_num,
                    content: o.content,
                    option_type: o.option_type,
                },
            )
            .await?;
        }
    }
    Ok(())
}

async fn delete_questions<S>(store: &mut S, survey_id: i32, tree: &[QuestionWithOptions]) -> Result<(), Error>
where
    S: Store,
{
    for q in tree {
        OptionCommon::delete_by_question(store, q.question.id).await?;
    }
    QuestionCommon::delete_by_survey(store, survey_id).await?;
    Ok(())
}

async fn remove_images<I>(images: &I, paths: impl IntoIterator<Item = String>)
where
    I: ImageStore,
{
    for path in paths {
        match images.remove(&path).await {
            Ok(()) => debug!("removed image {}", path),
            Err(e) => warn!("failed to remove image {}: {}", path, e),
        }
    }
}

pub async fn create_survey<T>(mut store: T, uid: i32, survey: SurveyCreate) -> Result<i32, Error>
where
    T: TxStore,
{
    let survey_id = SurveyCommon::insert(
        &mut store,
        SurveyInsert {
            user_id: uid,
            title: survey.title,
            desc: survey.desc,
            img: survey.img,
            status: survey.status,
            deadline: survey.deadline,
        },
    )
    .await?;
    insert_questions(&mut store, survey_id, survey.questions).await?;
    store.commit().await?;
    info!("user {} created survey {}", uid, survey_id);
    Ok(survey_id)
}

pub async fn update_survey_status<S>(store: &mut S, id: i32, status: SurveyStatus) -> Result<(), Error>
where
    S: Store,
{
    SurveyCommon::update_status(store, id, status).await
}

/// Replaces the survey's fields and its whole question tree, then removes
/// image files the old tree referenced and the new one does not.
pub async fn update_survey<T, I>(mut store: T, images: &I, id: i32, edit: SurveyEdit) -> Result<(), Error>
where
    T: TxStore,
    I: ImageStore,
{
    let survey = SurveyCommon::get_for_update(&mut store, id).await?;
    let old_tree = load_questions(&mut store, id).await?;
    let old_images = collect_image_references(&survey, &old_tree);
    delete_questions(&mut store, id, &old_tree).await?;
    SurveyCommon::update(
        &mut store,
        id,
        SurveyUpdate {
            title: edit.title,
            desc: edit.desc,
            img: edit.img.clone(),
            deadline: edit.deadline,
        },
    )
    .await?;
    let new_images = collect_submitted_references(&edit.img, &edit.questions);
    insert_questions(&mut store, id, edit.questions).await?;
    store.commit().await?;
    let stale: Vec<String> = old_images.difference(&new_images).cloned().collect();
    info!("survey {} updated, {} stale images", id, stale.len());
    remove_images(images, stale).await;
    Ok(())
}

/// Removes the survey with its questions, options, manage grants and answer
/// sheets, then every image file the survey or its respondents referenced.
pub async fn delete_survey<T, I>(mut store: T, images: &I, id: i32) -> Result<(), Error>
where
    T: TxStore,
    I: ImageStore,
{
    let survey = SurveyCommon::get_for_update(&mut store, id).await?;
    let tree = load_questions(&mut store, id).await?;
    let sheets = AnswerSheetCommon::get_by_survey_id(&mut store, id).await?;
    let mut doomed = collect_image_references(&survey, &tree);
    doomed.extend(collect_answer_images(&tree, &sheets));
    AnswerSheetCommon::delete_by_survey_id(&mut store, id).await?;
    delete_questions(&mut store, id, &tree).await?;
    // grants reference the survey row
    ManageCommon::delete_by_survey(&mut store, id).await?;
    SurveyCommon::delete(&mut store, id).await?;
    store.commit().await?;
    info!("survey {} deleted with {} answer sheets, {} images", id, sheets.len(), doomed.len());
    remove_images(images, doomed).await;
    Ok(())
}

pub async fn user_in_manage<S>(store: &mut S, uid: i32, survey_id: i32) -> Result<bool, Error>
where
    S: Store,
{
    ManageCommon::exists(store, uid, survey_id).await
}

/// Owner or holder of a manage grant.
pub async fn can_manage<S>(store: &mut S, uid: i32, survey_id: i32) -> Result<bool, Error>
where
    S: Store,
{
    let survey = SurveyCommon::get(store, survey_id).await?;
    if survey.user_id == uid {
        return Ok(true);
    }
    user_in_manage(store, uid, survey_id).await
}

pub async fn add_manager<S>(store: &mut S, survey_id: i32, uid: i32) -> Result<(), Error>
where
    S: Store,
{
    SurveyCommon::get(store, survey_id).await?;
    if ManageCommon::exists(store, uid, survey_id).await? {
        return Ok(());
    }
    ManageCommon::insert(store, ManageInsert { user_id: uid, survey_id }).await?;
    Ok(())
}

pub async fn get_survey<S>(store: &mut S, id: i32) -> Result<Survey, Error>
where
    S: Store,
{
    SurveyCommon::get(store, id).await
}

pub async fn survey_detail<S>(store: &mut S, id: i32) -> Result<SurveyDetail, Error>
where
    S: Store,
{
    let survey = SurveyCommon::get(store, id).await?;
    let questions = load_questions(store, id).await?;
    Ok(SurveyDetail { survey, questions })
}

pub async fn surveys_of_user<S>(store: &mut S, uid: i32) -> Result<Vec<SurveySummary>, Error>
where
    S: Store,
{
    SurveyCommon::query(store, SurveyQuery { user_id_eq: Some(uid) }).await
}

pub async fn all_surveys<S>(store: &mut S) -> Result<Vec<SurveySummary>, Error>
where
    S: Store,
{
    SurveyCommon::query(store, SurveyQuery::default()).await
}

pub async fn managed_surveys<S>(store: &mut S, uid: i32) -> Result<Vec<Manage>, Error>
where
    S: Store,
{
    ManageCommon::query_by_user(store, uid).await
}
