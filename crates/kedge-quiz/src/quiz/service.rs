use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use super::entity::Quiz;
use super::error::QuizError;
use super::grading::GradeOutcome;
use super::knowledge_point::KnowledgePointRef;
use super::record::{QuizRecord, QuizView, UserAnswer};
use super::repository::{QuizId, QuizRepository, RepositoryError};
use super::review::ReviewPolicy;

/// Service composing quiz validation, storage, and grading for a practice session.
pub struct QuizService<R> {
    repository: Arc<R>,
    policy: ReviewPolicy,
}

static QUIZ_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_quiz_id() -> QuizId {
    let id = QUIZ_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    QuizId(format!("quiz-{id:06}"))
}

/// What the quiz taker sees after submitting an answer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerFeedback {
    pub quiz_id: QuizId,
    pub outcome: GradeOutcome,
    pub attempt: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<Option<String>>>,
    pub submitted_at: DateTime<Utc>,
}

impl<R> QuizService<R>
where
    R: QuizRepository + 'static,
{
    pub fn new(repository: Arc<R>, policy: ReviewPolicy) -> Self {
        Self { repository, policy }
    }

    pub fn policy(&self) -> &ReviewPolicy {
        &self.policy
    }

    /// Validate and store a new quiz, assigning an id when the record has none.
    pub fn create(&self, mut record: QuizRecord) -> Result<Quiz, QuizServiceError> {
        if record.id.is_none() {
            record.id = Some(next_quiz_id().0);
        }

        let quiz = Quiz::create(record)?;
        self.repository.insert(quiz.to_persistence())?;

        info!(quiz_id = ?quiz.id(), kind = %quiz.kind(), "quiz stored");
        Ok(quiz)
    }

    pub fn load(&self, id: &QuizId) -> Result<Quiz, QuizServiceError> {
        let record = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(Quiz::from_persistence(record)?)
    }

    pub fn view(&self, id: &QuizId, include_answer: bool) -> Result<QuizView, QuizServiceError> {
        Ok(self.load(id)?.to_api_response(include_answer))
    }

    /// Client views for up to `limit` stored quizzes. A stored record that no longer
    /// validates fails the whole listing.
    pub fn list(&self, limit: usize, include_answer: bool) -> Result<Vec<QuizView>, QuizServiceError> {
        self.repository
            .list(limit)?
            .into_iter()
            .map(|record| {
                Quiz::from_persistence(record)
                    .map(|quiz| quiz.to_api_response(include_answer))
                    .map_err(QuizServiceError::from)
            })
            .collect()
    }

    /// Grade one attempt. The explanation is only revealed for wrong answers, hints only
    /// when the review policy allows them for this attempt.
    pub fn submit_answer(
        &self,
        id: &QuizId,
        answer: &UserAnswer,
        attempt: u32,
    ) -> Result<AnswerFeedback, QuizServiceError> {
        let quiz = self.load(id)?;
        let outcome = quiz.grade(answer);

        let (explanation, hints) = match outcome {
            GradeOutcome::Correct | GradeOutcome::NeedsReview => (None, None),
            GradeOutcome::Incorrect => {
                let hints = if self.policy.should_show_hints(&quiz, attempt) {
                    quiz.hints()
                } else {
                    None
                };
                (quiz.explanation().map(str::to_string), hints)
            }
        };

        info!(quiz_id = %id, attempt, outcome = outcome.label(), "answer graded");

        Ok(AnswerFeedback {
            quiz_id: id.clone(),
            outcome,
            attempt,
            explanation,
            hints,
            submitted_at: Utc::now(),
        })
    }

    /// Move a stored quiz to another knowledge point. Returns whether the record changed.
    pub fn change_knowledge_point(
        &self,
        id: &QuizId,
        knowledge_point: KnowledgePointRef,
    ) -> Result<bool, QuizServiceError> {
        let mut quiz = self.load(id)?;
        if !quiz.change_knowledge_point(knowledge_point) {
            return Ok(false);
        }

        self.repository.update(quiz.to_persistence())?;
        Ok(true)
    }
}

/// Error raised by the quiz service.
#[derive(Debug, thiserror::Error)]
pub enum QuizServiceError {
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
