//! Quiz domain model and answer grading.
//!
//! A [`Quiz`] is built from a flat [`QuizRecord`], validated once, and then graded against
//! submitted answers. Storage and transport belong to collaborators that implement
//! [`QuizRepository`] or consume [`QuizView`].

pub mod answer;
mod entity;
pub mod error;
mod grading;
pub mod kind;
pub mod knowledge_point;
pub mod record;
pub mod repository;
pub mod review;
pub mod service;

#[cfg(test)]
mod tests;

pub use answer::{AnswerKey, AnswerText};
pub use entity::Quiz;
pub use error::{InvariantViolation, QuizError};
pub use grading::{GradeOutcome, OrderGroups, ORDER_INDEPENDENT_GROUPS_KEY};
pub use kind::QuizTypeKind;
pub use knowledge_point::KnowledgePointRef;
pub use record::{AnswerInput, QuizRecord, QuizView, UserAnswer};
pub use repository::{QuizId, QuizRepository, RepositoryError};
pub use review::ReviewPolicy;
pub use service::{AnswerFeedback, QuizService, QuizServiceError};
