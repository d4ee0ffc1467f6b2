pub mod answer;
pub mod survey;
