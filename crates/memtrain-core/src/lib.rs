//! memtrain-core: quiz engine for flashcard tables.
//!
//! This crate ingests a flashcard table into a relational store and provides
//! everything a front end needs to run a question-and-answer session:
//! prefix aliases, multiple-choice distractors, grading and statistics.

pub mod alias;
pub mod distractor;
pub mod engine;
pub mod error;
pub mod grader;
pub mod model;
pub mod question;
pub mod settings;
pub mod statistics;
pub mod store;
pub mod table;

pub use engine::{Engine, EngineOptions};
pub use error::{MemtrainError, Result};
