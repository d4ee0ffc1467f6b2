use crate::config::Config;
use crate::context::UserInfo;
use crate::core::models::{
    answer_sheet::AnswersView,
    common::Pagination,
    manage::Manage,
    survey::{Summary as SurveySummary, SurveyCreate, SurveyDetail, SurveyEdit},
};
use crate::core::services::{answer, survey};
use crate::database::sqlx::PgSqlxManager;
use crate::error::Error;
use crate::impls::image_store::local_storage::LocalImageStorage;
use crate::request::{ManagerGrant, Pagination as PaginationParams, StatusChange};
use crate::response::{CreateResponse, List, Page};
use actix_web::{
    http::StatusCode,
    web::{Data, Json, Path, Query},
    HttpResponse,
};

async fn ensure_manager(manager: &PgSqlxManager, uid: i32, survey_id: i32) -> Result<(), Error> {
    let mut db = manager.acquire().await?;
    if !survey::can_manage(&mut db, uid, survey_id).await? {
        return Err(Error::Forbidden);
    }
    Ok(())
}

pub async fn create(user_info: UserInfo, Json(body): Json<SurveyCreate>, manager: Data<PgSqlxManager>) -> Result<Json<CreateResponse>, Error> {
    let id = survey::create_survey(manager.begin().await?, user_info.id, body).await?;
    Ok(Json(CreateResponse { id }))
}

pub async fn list(user_info: UserInfo, manager: Data<PgSqlxManager>) -> Result<Json<List<SurveySummary>>, Error> {
    let mut db = manager.acquire().await?;
    let surveys = survey::surveys_of_user(&mut db, user_info.id).await?;
    Ok(Json(List::new(surveys)))
}

pub async fn list_all(user_info: UserInfo, config: Data<Config>, manager: Data<PgSqlxManager>) -> Result<Json<List<SurveySummary>>, Error> {
    if !config.super_admins.contains(&user_info.id) {
        return Err(Error::Forbidden);
    }
    let mut db = manager.acquire().await?;
    Ok(Json(List::new(survey::all_surveys(&mut db).await?)))
}

pub async fn managed(user_info: UserInfo, manager: Data<PgSqlxManager>) -> Result<Json<List<Manage>>, Error> {
    let mut db = manager.acquire().await?;
    let manages = survey::managed_surveys(&mut db, user_info.id).await?;
    Ok(Json(List::new(manages)))
}

pub async fn detail(user_info: UserInfo, id: Path<(i32,)>, manager: Data<PgSqlxManager>) -> Result<Json<SurveyDetail>, Error> {
    let id = id.into_inner().0;
    ensure_manager(&manager, user_info.id, id).await?;
    let mut db = manager.acquire().await?;
    Ok(Json(survey::survey_detail(&mut db, id).await?))
}

pub async fn update(
    user_info: UserInfo,
    id: Path<(i32,)>,
    Json(body): Json<SurveyEdit>,
    manager: Data<PgSqlxManager>,
    images: Data<LocalImageStorage>,
) -> Result<HttpResponse, Error> {
    let id = id.into_inner().0;
    ensure_manager(&manager, user_info.id, id).await?;
    survey::update_survey(manager.begin().await?, images.get_ref(), id, body).await?;
    Ok(HttpResponse::build(StatusCode::OK).finish())
}

pub async fn update_status(user_info: UserInfo, id: Path<(i32,)>, Json(StatusChange { status }): Json<StatusChange>, manager: Data<PgSqlxManager>) -> Result<HttpResponse, Error> {
    let id = id.into_inner().0;
    ensure_manager(&manager, user_info.id, id).await?;
    let mut db = manager.acquire().await?;
    survey::update_survey_status(&mut db, id, status).await?;
    Ok(HttpResponse::build(StatusCode::OK).finish())
}

pub async fn delete(user_info: UserInfo, id: Path<(i32,)>, manager: Data<PgSqlxManager>, images: Data<LocalImageStorage>) -> Result<HttpResponse, Error> {
    let id = id.into_inner().0;
    ensure_manager(&manager, user_info.id, id).await?;
    survey::delete_survey(manager.begin().await?, images.get_ref(), id).await?;
    Ok(HttpResponse::build(StatusCode::OK).finish())
}

pub async fn add_manager(user_info: UserInfo, id: Path<(i32,)>, Json(ManagerGrant { user_id }): Json<ManagerGrant>, manager: Data<PgSqlxManager>) -> Result<HttpResponse, Error> {
    let id = id.into_inner().0;
    let mut db = manager.acquire().await?;
    if survey::get_survey(&mut db, id).await?.user_id != user_info.id {
        return Err(Error::Forbidden);
    }
    survey::add_manager(&mut db, id, user_id).await?;
    Ok(HttpResponse::build(StatusCode::OK).finish())
}

pub async fn answers(
    user_info: UserInfo,
    id: Path<(i32,)>,
    Query(PaginationParams { page, size }): Query<PaginationParams>,
    manager: Data<PgSqlxManager>,
) -> Result<Json<Page<AnswersView>>, Error> {
    let id = id.into_inner().0;
    let pagination = Pagination::new(page, size)?;
    ensure_manager(&manager, user_info.id, id).await?;
    let mut db = manager.acquire().await?;
    let (view, total) = answer::survey_answers(&mut db, id, pagination).await?;
    Ok(Json(Page::new(view, total)))
}

pub async fn all_answers(user_info: UserInfo, id: Path<(i32,)>, manager: Data<PgSqlxManager>) -> Result<Json<AnswersView>, Error> {
    let id = id.into_inner().0;
    ensure_manager(&manager, user_info.id, id).await?;
    let mut db = manager.acquire().await?;
    Ok(Json(answer::all_survey_answers(&mut db, id).await?))
}
