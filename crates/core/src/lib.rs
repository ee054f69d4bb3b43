#![forbid(unsafe_code)]

pub mod generator;
pub mod model;
pub mod selector;

pub use generator::QuestionGenerator;
pub use selector::Selector;
