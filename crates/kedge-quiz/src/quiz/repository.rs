use std::fmt;

use serde::{Deserialize, Serialize};

use super::record::QuizRecord;

/// Identifier wrapper for stored quizzes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuizId(pub String);

impl fmt::Display for QuizId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Storage seam implemented by the SQL collaborator. Records are kept in persistence shape
/// and re-validated on the way out.
pub trait QuizRepository: Send + Sync {
    fn insert(&self, record: QuizRecord) -> Result<QuizRecord, RepositoryError>;
    fn update(&self, record: QuizRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &QuizId) -> Result<Option<QuizRecord>, RepositoryError>;
    fn list(&self, limit: usize) -> Result<Vec<QuizRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("quiz already exists")]
    Conflict,
    #[error("quiz not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
