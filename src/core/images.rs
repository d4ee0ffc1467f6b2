//! Image reference tracking.
//!
//! A survey references images through its cover, through question images and
//! through the content of image options. Respondents may also upload images as
//! answers to image questions. The functions here enumerate those references so
//! the lifecycle services can tell which files are no longer in use.

use crate::core::models::{
    answer_sheet::AnswerSheet,
    option::{OptCreate, OptionType},
    question::{QuestionCreate, QuestionType, QuestionWithOptions},
    survey::Survey,
};
use std::collections::{BTreeSet, HashSet};

fn push(images: &mut BTreeSet<String>, path: &str) {
    if !path.is_empty() {
        images.insert(path.to_owned());
    }
}

fn push_options<'a>(images: &mut BTreeSet<String>, options: impl IntoIterator<Item = (OptionType, &'a str)>) {
    for (option_type, content) in options {
        if option_type == OptionType::Image {
            push(images, content);
        }
    }
}

/// Images in use by a stored survey and its question tree.
pub fn collect_image_references(survey: &Survey, questions: &[QuestionWithOptions]) -> BTreeSet<String> {
    let mut images = BTreeSet::new();
    push(&mut images, &survey.img);
    for q in questions {
        push(&mut images, &q.question.img);
        push_options(&mut images, q.options.iter().map(|o| (o.option_type, o.content.as_str())));
    }
    images
}

/// Images an incoming submission will reference once it is stored.
pub fn collect_submitted_references(cover: &str, questions: &[QuestionCreate]) -> BTreeSet<String> {
    let mut images = BTreeSet::new();
    push(&mut images, cover);
    for q in questions {
        push(&mut images, &q.img);
        push_options(&mut images, q.options.iter().map(|o: &OptCreate| (o.option_type, o.content.as_str())));
    }
    images
}

/// Images uploaded by respondents as answers to image questions.
pub fn collect_answer_images(questions: &[QuestionWithOptions], sheets: &[AnswerSheet]) -> BTreeSet<String> {
    let image_questions: HashSet<i32> = questions
        .iter()
        .filter(|q| q.question.question_type == QuestionType::Image)
        .map(|q| q.question.id)
        .collect();
    let mut images = BTreeSet::new();
    for sheet in sheets {
        for answer in sheet.answers.iter().filter(|a| image_questions.contains(&a.question_id)) {
            push(&mut images, &answer.content);
        }
    }
    images
}
