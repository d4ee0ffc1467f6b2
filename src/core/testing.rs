//! In-memory repository and image store used by the service tests.
//!
//! `MemDb::tx` hands out a store working on a snapshot of the shared state;
//! the snapshot replaces the shared state on commit and is discarded when the
//! store is dropped without committing.

use chrono::{DateTime, TimeZone, Utc};
use crate::core::models::{
    answer_sheet::{Answer, AnswerSheet},
    manage::{Insert as ManageInsert, Manage},
    option::{Insert as OptionInsert, OptCreate, Opt, OptionType, Query as OptionQuery},
    question::{Insert as QuestionInsert, Query as QuestionQuery, Question, QuestionCreate, QuestionType},
    survey::{Insert as SurveyInsert, Query as SurveyQuery, Summary as SurveySummary, Survey, SurveyCreate, SurveyEdit, SurveyStatus, Update as SurveyUpdate},
};
use crate::core::ports::image_store::ImageStore;
use crate::core::ports::repository::{AnswerSheetCommon, Common, ManageCommon, OptionCommon, QuestionCommon, Store, SurveyCommon, TxStore};
use crate::error::Error;
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct State {
    pub surveys: BTreeMap<i32, Survey>,
    pub questions: BTreeMap<i32, Question>,
    pub options: BTreeMap<i32, Opt>,
    pub manages: BTreeMap<i32, Manage>,
    pub sheets: Vec<AnswerSheet>,
    next_id: i32,
}

impl State {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Clone, Default)]
pub struct MemDb {
    shared: Rc<RefCell<State>>,
    inserts_left: Rc<Cell<Option<usize>>>,
}

impl MemDb {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tx(&self) -> MemStore {
        MemStore {
            db: self.clone(),
            staged: Some(self.shared.borrow().clone()),
        }
    }

    pub fn conn(&self) -> MemStore {
        MemStore { db: self.clone(), staged: None }
    }

    /// Makes every insert after the next `n` fail with a store error.
    pub fn fail_inserts_after(&self, n: usize) {
        self.inserts_left.set(Some(n));
    }

    pub fn state(&self) -> State {
        self.shared.borrow().clone()
    }

    pub fn add_sheet(&self, survey_id: i32, time: &str, answers: Vec<(i32, &str)>) {
        let mut state = self.shared.borrow_mut();
        let id = state.next_id();
        state.sheets.push(AnswerSheet {
            id,
            survey_id,
            time: time.into(),
            answers: answers
                .into_iter()
                .map(|(question_id, content)| Answer {
                    question_id,
                    content: content.into(),
                })
                .collect(),
        });
    }
}

pub struct MemStore {
    db: MemDb,
    staged: Option<State>,
}

impl MemStore {
    fn with<R>(&mut self, f: impl FnOnce(&mut State) -> R) -> R {
        match &mut self.staged {
            Some(state) => f(state),
            None => f(&mut self.db.shared.borrow_mut()),
        }
    }

    fn check_insert(&self) -> Result<(), Error> {
        match self.db.inserts_left.get() {
            Some(0) => Err(Error::StoreError(sqlx::Error::Protocol("injected insert failure".into()))),
            Some(n) => {
                self.db.inserts_left.set(Some(n - 1));
                Ok(())
            }
            None => Ok(()),
        }
    }
}

fn not_found(what: &str, id: i32) -> Error {
    Error::NotFound(format!("{} {}", what, id))
}

impl SurveyCommon for MemStore {
    async fn insert(&mut self, survey: SurveyInsert) -> Result<i32, Error> {
        self.check_insert()?;
        Ok(self.with(|s| {
            let id = s.next_id();
            s.surveys.insert(
                id,
                Survey {
                    id,
                    user_id: survey.user_id,
                    title: survey.title,
                    desc: survey.desc,
                    img: survey.img,
                    status: survey.status,
                    deadline: survey.deadline,
                    num: 0,
                },
            );
            id
        }))
    }

    async fn get(&mut self, id: i32) -> Result<Survey, Error> {
        self.with(|s| s.surveys.get(&id).cloned()).ok_or_else(|| not_found("survey", id))
    }

    async fn get_for_update(&mut self, id: i32) -> Result<Survey, Error> {
        SurveyCommon::get(self, id).await
    }

    async fn query(&mut self, query: SurveyQuery) -> Result<Vec<SurveySummary>, Error> {
        Ok(self.with(|s| {
            s.surveys
                .values()
                .rev()
                .filter(|v| query.user_id_eq.map_or(true, |uid| v.user_id == uid))
                .map(SurveySummary::from)
                .collect()
        }))
    }

    async fn update(&mut self, id: i32, update: SurveyUpdate) -> Result<(), Error> {
        self.with(|s| match s.surveys.get_mut(&id) {
            Some(v) => {
                v.title = update.title;
                v.desc = update.desc;
                v.img = update.img;
                v.deadline = update.deadline;
                Ok(())
            }
            None => Err(not_found("survey", id)),
        })
    }

    async fn update_status(&mut self, id: i32, status: SurveyStatus) -> Result<(), Error> {
        self.with(|s| match s.surveys.get_mut(&id) {
            Some(v) => {
                v.status = status;
                Ok(())
            }
            None => Err(not_found("survey", id)),
        })
    }

    async fn delete(&mut self, id: i32) -> Result<(), Error> {
        self.with(|s| s.surveys.remove(&id));
        Ok(())
    }
}

impl QuestionCommon for MemStore {
    async fn insert(&mut self, q: QuestionInsert) -> Result<i32, Error> {
        self.check_insert()?;
        self.with(|s| {
            if !s.surveys.contains_key(&q.survey_id) {
                return Err(not_found("survey", q.survey_id));
            }
            let id = s.next_id();
            s.questions.insert(
                id,
                Question {
                    id,
                    survey_id: q.survey_id,
                    serial_num: q.serial_num,
                    subject: q.subject,
                    description: q.description,
                    img: q.img,
                    required: q.required,
                    unique: q.unique,
                    question_type: q.question_type,
                    reg: q.reg,
                },
            );
            Ok(id)
        })
    }

    async fn query(&mut self, query: QuestionQuery) -> Result<Vec<Question>, Error> {
        let mut questions: Vec<Question> = self.with(|s| {
            s.questions
                .values()
                .filter(|q| query.survey_id_eq.map_or(true, |sid| q.survey_id == sid))
                .cloned()
                .collect()
        });
        questions.sort_by_key(|q| (q.serial_num, q.id));
        Ok(questions)
    }

    async fn delete_by_survey(&mut self, survey_id: i32) -> Result<(), Error> {
        self.with(|s| s.questions.retain(|_, q| q.survey_id != survey_id));
        Ok(())
    }
}

impl OptionCommon for MemStore {
    async fn insert(&mut self, o: OptionInsert) -> Result<i32, Error> {
        self.check_insert()?;
        self.with(|s| {
            if !s.questions.contains_key(&o.question_id) {
                return Err(not_found("question", o.question_id));
            }
            let id = s.next_id();
            s.options.insert(
                id,
                Opt {
                    id,
                    question_id: o.question_id,
                    serial_num: o.serial_num,
                    content: o.content,
                    option_type: o.option_type,
                },
            );
            Ok(id)
        })
    }

    async fn query(&mut self, query: OptionQuery) -> Result<Vec<Opt>, Error> {
        let mut options: Vec<Opt> = self.with(|s| {
            s.options
                .values()
                .filter(|o| query.question_id_eq.map_or(true, |qid| o.question_id == qid))
                .cloned()
                .collect()
        });
        options.sort_by_key(|o| (o.serial_num, o.id));
        Ok(options)
    }

    async fn delete_by_question(&mut self, question_id: i32) -> Result<(), Error> {
        self.with(|s| s.options.retain(|_, o| o.question_id != question_id));
        Ok(())
    }
}

impl ManageCommon for MemStore {
    async fn insert(&mut self, m: ManageInsert) -> Result<i32, Error> {
        self.check_insert()?;
        Ok(self.with(|s| {
            let id = s.next_id();
            s.manages.insert(
                id,
                Manage {
                    id,
                    user_id: m.user_id,
                    survey_id: m.survey_id,
                },
            );
            id
        }))
    }

    async fn exists(&mut self, user_id: i32, survey_id: i32) -> Result<bool, Error> {
        Ok(self.with(|s| s.manages.values().any(|m| m.user_id == user_id && m.survey_id == survey_id)))
    }

    async fn query_by_user(&mut self, user_id: i32) -> Result<Vec<Manage>, Error> {
        Ok(self.with(|s| s.manages.values().rev().filter(|m| m.user_id == user_id).cloned().collect()))
    }

    async fn delete_by_survey(&mut self, survey_id: i32) -> Result<(), Error> {
        self.with(|s| s.manages.retain(|_, m| m.survey_id != survey_id));
        Ok(())
    }
}

impl AnswerSheetCommon for MemStore {
    async fn get_by_survey_id(&mut self, survey_id: i32) -> Result<Vec<AnswerSheet>, Error> {
        Ok(self.with(|s| s.sheets.iter().filter(|a| a.survey_id == survey_id).cloned().collect()))
    }

    async fn delete_by_survey_id(&mut self, survey_id: i32) -> Result<(), Error> {
        self.with(|s| s.sheets.retain(|a| a.survey_id != survey_id));
        Ok(())
    }
}

impl Common for MemStore {}
impl Store for MemStore {}

impl TxStore for MemStore {
    async fn commit(mut self) -> Result<(), Error> {
        if let Some(state) = self.staged.take() {
            *self.db.shared.borrow_mut() = state;
        }
        Ok(())
    }
}

/// Records removals instead of touching the filesystem.
#[derive(Default)]
pub struct MemImages {
    pub removed: RefCell<BTreeSet<String>>,
}

impl ImageStore for MemImages {
    async fn remove(&self, url: &str) -> Result<(), Error> {
        self.removed.borrow_mut().insert(url.to_owned());
        Ok(())
    }
}

pub fn deadline() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap()
}

pub fn question(
    serial_num: i32,
    subject: &str,
    img: &str,
    question_type: QuestionType,
    options: Vec<(OptionType, &str)>,
) -> QuestionCreate {
    QuestionCreate {
        serial_num,
        subject: subject.into(),
        description: format!("about {}", subject),
        img: img.into(),
        required: true,
        unique: false,
        question_type,
        reg: None,
        options: options
            .into_iter()
            .enumerate()
            .map(|(i, (option_type, content))| OptCreate {
                serial_num: i as i32 + 1,
                content: content.into(),
                option_type,
            })
            .collect(),
    }
}

pub fn survey(img: &str, questions: Vec<QuestionCreate>) -> SurveyCreate {
    SurveyCreate {
        title: "Canteen feedback".into(),
        desc: "tell us".into(),
        img: img.into(),
        status: SurveyStatus::Draft,
        deadline: deadline(),
        questions,
    }
}

pub fn edit(img: &str, questions: Vec<QuestionCreate>) -> SurveyEdit {
    SurveyEdit {
        title: "Canteen feedback v2".into(),
        desc: "tell us more".into(),
        img: img.into(),
        deadline: deadline(),
        questions,
    }
}

/// Fails every removal with a permission error, recording the attempts.
#[derive(Default)]
pub struct FailingImages {
    pub attempted: RefCell<BTreeSet<String>>,
}

impl ImageStore for FailingImages {
    async fn remove(&self, url: &str) -> Result<(), Error> {
        self.attempted.borrow_mut().insert(url.to_owned());
        Err(Error::FileError(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only static dir")))
    }
}
