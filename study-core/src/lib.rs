//! Retrieval-augmented study pipeline over the note store and LLM gateway.
//!
//! Public API:
//! - [`quiz::assemble_quiz`]: generate → parse → validate → dedup loop that
//!   assembles a session of unique multiple-choice questions.
//! - [`doubt::solve_doubt`]: answers a question from the notes, or refines
//!   the previous answer when the query reads like a follow-up.
//! - [`summarize::summarize_notes`]: two-level windowed reduction of every
//!   stored chunk into a brief or detailed summary.
//!
//! The LLM and the vector store are reached through the [`traits::Completion`]
//! and [`traits::ContextSource`] seams so the pipeline can be exercised
//! without network access.

pub mod doubt;
pub mod error;
pub mod generator;
pub mod parser;
pub mod prompt;
pub mod question;
pub mod quiz;
pub mod summarize;
pub mod traits;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::StudyError;
pub use parser::parse_question;
pub use prompt::Difficulty;
pub use question::{QuestionRecord, check_answer};
pub use quiz::{UsedQuestionSet, assemble_quiz};
pub use summarize::{SummaryMode, summarize_notes};
pub use traits::{Completion, ContextSource};
