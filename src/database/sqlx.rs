use crate::core::models::{
    answer_sheet::{Answer, AnswerSheet},
    manage::{Insert as ManageInsert, Manage},
    option::{Insert as OptionInsert, Opt, Query as OptionQuery},
    question::{Insert as QuestionInsert, Query as QuestionQuery, Question},
    survey::{Insert as SurveyInsert, Query as SurveyQuery, Summary as SurveySummary, Survey, SurveyStatus, Update as SurveyUpdate},
};
use crate::core::ports::repository::{AnswerSheetCommon, Common, ManageCommon, OptionCommon, QuestionCommon, Store, SurveyCommon, TxStore};
use crate::error::Error;
use sqlx::pool::PoolConnection;
use sqlx::postgres::PgQueryResult;
use sqlx::types::Json;
use sqlx::{query, query_as, query_scalar, Executor, FromRow, PgPool, Postgres, QueryBuilder, Transaction};

pub struct PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e>,
{
    executor: E,
}

impl<E> PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e>,
{
    pub fn new(executor: E) -> Self {
        Self { executor }
    }
}

fn expect_row(res: PgQueryResult, what: &str, id: i32) -> Result<(), Error> {
    if res.rows_affected() == 0 {
        return Err(Error::NotFound(format!("{} {}", what, id)));
    }
    Ok(())
}

impl<E> SurveyCommon for PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert(&mut self, survey: SurveyInsert) -> Result<i32, Error> {
        let id = query_scalar("INSERT INTO surveys (user_id, title, description, img, status, deadline) VALUES ($1, $2, $3, $4, $5, $6) RETURNING id")
            .bind(survey.user_id)
            .bind(survey.title)
            .bind(survey.desc)
            .bind(survey.img)
            .bind(survey.status)
            .bind(survey.deadline)
            .fetch_one(&mut self.executor)
            .await?;
        Ok(id)
    }

    async fn get(&mut self, id: i32) -> Result<Survey, Error> {
        let survey = query_as("SELECT * FROM surveys WHERE id = $1").bind(id).fetch_one(&mut self.executor).await?;
        Ok(survey)
    }

    async fn get_for_update(&mut self, id: i32) -> Result<Survey, Error> {
        let survey = query_as("SELECT * FROM surveys WHERE id = $1 FOR UPDATE").bind(id).fetch_one(&mut self.executor).await?;
        Ok(survey)
    }

    async fn query(&mut self, query: SurveyQuery) -> Result<Vec<SurveySummary>, Error> {
        let mut stmt = QueryBuilder::new("SELECT id, title, status, num FROM surveys WHERE 1 = 1");
        if let Some(uid) = query.user_id_eq {
            stmt.push(" AND user_id = ").push_bind(uid);
        }
        stmt.push(" ORDER BY id DESC");
        let surveys = stmt.build_query_as().fetch_all(&mut self.executor).await?;
        Ok(surveys)
    }

    async fn update(&mut self, id: i32, update: SurveyUpdate) -> Result<(), Error> {
        let res = query("UPDATE surveys SET title = $1, description = $2, img = $3, deadline = $4 WHERE id = $5")
            .bind(update.title)
            .bind(update.desc)
            .bind(update.img)
            .bind(update.deadline)
            .bind(id)
            .execute(&mut self.executor)
            .await?;
        expect_row(res, "survey", id)
    }

    async fn update_status(&mut self, id: i32, status: SurveyStatus) -> Result<(), Error> {
        let res = query("UPDATE surveys SET status = $1 WHERE id = $2").bind(status).bind(id).execute(&mut self.executor).await?;
        expect_row(res, "survey", id)
    }

    async fn delete(&mut self, id: i32) -> Result<(), Error> {
        query("DELETE FROM surveys WHERE id = $1").bind(id).execute(&mut self.executor).await?;
        Ok(())
    }
}

impl<E> QuestionCommon for PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert(&mut self, question: QuestionInsert) -> Result<i32, Error> {
        let id = query_scalar(
            "INSERT INTO questions (survey_id, serial_num, subject, description, img, required, is_unique, question_type, reg)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) RETURNING id",
        )
        .bind(question.survey_id)
        .bind(question.serial_num)
        .bind(question.subject)
        .bind(question.description)
        .bind(question.img)
        .bind(question.required)
        .bind(question.unique)
        .bind(question.question_type)
        .bind(question.reg)
        .fetch_one(&mut self.executor)
        .await?;
        Ok(id)
    }

    async fn query(&mut self, query: QuestionQuery) -> Result<Vec<Question>, Error> {
        let mut stmt = QueryBuilder::new("SELECT * FROM questions WHERE 1 = 1");
        if let Some(survey_id) = query.survey_id_eq {
            stmt.push(" AND survey_id = ").push_bind(survey_id);
        }
        stmt.push(" ORDER BY serial_num, id");
        let questions = stmt.build_query_as().fetch_all(&mut self.executor).await?;
        Ok(questions)
    }

    async fn delete_by_survey(&mut self, survey_id: i32) -> Result<(), Error> {
        query("DELETE FROM questions WHERE survey_id = $1").bind(survey_id).execute(&mut self.executor).await?;
        Ok(())
    }
}

impl<E> OptionCommon for PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert(&mut self, option: OptionInsert) -> Result<i32, Error> {
        let id = query_scalar("INSERT INTO options (question_id, serial_num, content, option_type) VALUES ($1, $2, $3, $4) RETURNING id")
            .bind(option.question_id)
            .bind(option.serial_num)
            .bind(option.content)
            .bind(option.option_type)
            .fetch_one(&mut self.executor)
            .await?;
        Ok(id)
    }

    async fn query(&mut self, query: OptionQuery) -> Result<Vec<Opt>, Error> {
        let mut stmt = QueryBuilder::new("SELECT * FROM options WHERE 1 = 1");
        if let Some(question_id) = query.question_id_eq {
            stmt.push(" AND question_id = ").push_bind(question_id);
        }
        stmt.push(" ORDER BY serial_num, id");
        let options = stmt.build_query_as().fetch_all(&mut self.executor).await?;
        Ok(options)
    }

    async fn delete_by_question(&mut self, question_id: i32) -> Result<(), Error> {
        query("DELETE FROM options WHERE question_id = $1").bind(question_id).execute(&mut self.executor).await?;
        Ok(())
    }
}

impl<E> ManageCommon for PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn insert(&mut self, manage: ManageInsert) -> Result<i32, Error> {
        let id = query_scalar("INSERT INTO manages (user_id, survey_id) VALUES ($1, $2) RETURNING id")
            .bind(manage.user_id)
            .bind(manage.survey_id)
            .fetch_one(&mut self.executor)
            .await?;
        Ok(id)
    }

    async fn exists(&mut self, user_id: i32, survey_id: i32) -> Result<bool, Error> {
        let exists = query_scalar("SELECT EXISTS(SELECT * FROM manages WHERE user_id = $1 AND survey_id = $2)")
            .bind(user_id)
            .bind(survey_id)
            .fetch_one(&mut self.executor)
            .await?;
        Ok(exists)
    }

    async fn query_by_user(&mut self, user_id: i32) -> Result<Vec<Manage>, Error> {
        let manages = query_as("SELECT * FROM manages WHERE user_id = $1 ORDER BY id DESC")
            .bind(user_id)
            .fetch_all(&mut self.executor)
            .await?;
        Ok(manages)
    }

    async fn delete_by_survey(&mut self, survey_id: i32) -> Result<(), Error> {
        query("DELETE FROM manages WHERE survey_id = $1").bind(survey_id).execute(&mut self.executor).await?;
        Ok(())
    }
}

#[derive(FromRow)]
struct AnswerSheetRow {
    id: i32,
    survey_id: i32,
    time: String,
    answers: Json<Vec<Answer>>,
}

impl From<AnswerSheetRow> for AnswerSheet {
    fn from(row: AnswerSheetRow) -> Self {
        AnswerSheet {
            id: row.id,
            survey_id: row.survey_id,
            time: row.time,
            answers: row.answers.0,
        }
    }
}

impl<E> AnswerSheetCommon for PgSqlx<E>
where
    for<'e> &'e mut E: Executor<'e, Database = Postgres>,
{
    async fn get_by_survey_id(&mut self, survey_id: i32) -> Result<Vec<AnswerSheet>, Error> {
        let rows: Vec<AnswerSheetRow> = query_as("SELECT id, survey_id, time, answers FROM answer_sheets WHERE survey_id = $1 ORDER BY id")
            .bind(survey_id)
            .fetch_all(&mut self.executor)
            .await?;
        Ok(rows.into_iter().map(AnswerSheet::from).collect())
    }

    async fn delete_by_survey_id(&mut self, survey_id: i32) -> Result<(), Error> {
        query("DELETE FROM answer_sheets WHERE survey_id = $1").bind(survey_id).execute(&mut self.executor).await?;
        Ok(())
    }
}

impl Common for PgSqlx<PoolConnection<Postgres>> {}
impl<'a> Common for PgSqlx<Transaction<'a, Postgres>> {}
impl Store for PgSqlx<PoolConnection<Postgres>> {}
impl<'a> Store for PgSqlx<Transaction<'a, Postgres>> {}

impl<'a> TxStore for PgSqlx<Transaction<'a, Postgres>> {
    async fn commit(self) -> Result<(), Error> {
        self.executor.commit().await?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct PgSqlxManager {
    pool: PgPool,
}

impl PgSqlxManager {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn begin(&self) -> Result<PgSqlx<Transaction<'static, Postgres>>, Error> {
        let tx = self.pool.begin().await?;
        Ok(PgSqlx::new(tx))
    }

    pub async fn acquire(&self) -> Result<PgSqlx<PoolConnection<Postgres>>, Error> {
        let conn = self.pool.acquire().await?;
        Ok(PgSqlx::new(conn))
    }
}
