pub mod answer_sheet;
pub mod common;
pub mod manage;
pub mod option;
pub mod question;
pub mod survey;
