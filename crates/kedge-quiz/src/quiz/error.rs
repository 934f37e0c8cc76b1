use super::kind::QuizTypeKind;

/// Construction-time failures for quiz definitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuizError {
    #[error("invalid quiz type: {value}. Valid types: {}", QuizTypeKind::valid_names())]
    InvalidQuizType { value: String },
    #[error("quiz must have either answer or answer_index")]
    MissingAnswer,
    #[error("answer text not found in options: {}", .answers.join(", "))]
    AnswerNotInOptions { answers: Vec<String> },
    #[error("answer index out of options range. Indices: {indices:?}, options length: {options_len}")]
    IndexOutOfRange { indices: Vec<i64>, options_len: usize },
    #[error(transparent)]
    InvariantViolation(#[from] InvariantViolation),
    #[error("knowledge point id cannot be empty")]
    EmptyKnowledgePointId,
}

/// Structural rules a quiz definition must satisfy for its whole lifetime.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("{kind} questions must have options")]
    OptionsRequired { kind: QuizTypeKind },
    #[error("single-choice question must have exactly one answer, got {found}")]
    SingleChoiceAnswerCount { found: usize },
    #[error("multiple-choice question must have at least two answers, got {found}")]
    MultipleChoiceAnswerCount { found: usize },
    #[error("question cannot be empty")]
    EmptyQuestion,
    #[error("order-independent-groups must be a list of lists of blank positions")]
    MalformedOrderGroups,
    #[error("order-independent group refers to blank {position} but only {blanks} blank(s) are defined")]
    OrderGroupOutOfRange { position: usize, blanks: usize },
}
