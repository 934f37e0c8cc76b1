use std::collections::BTreeMap;

use serde_json::Value;
use tracing::debug;

use super::answer::AnswerKey;
use super::error::{InvariantViolation, QuizError};
use super::grading::OrderGroups;
use super::kind::QuizTypeKind;
use super::knowledge_point::KnowledgePointRef;
use super::record::{AnswerInput, QuizRecord, QuizView};
use super::review::ReviewPolicy;

/// One gradable question together with its canonical answer.
///
/// A `Quiz` only exists once every structural rule has been checked, so grading and the
/// output projections never re-validate. The knowledge point is the one field that may
/// change after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Quiz {
    pub(super) id: Option<String>,
    pub(super) kind: QuizTypeKind,
    pub(super) question: String,
    pub(super) answer: AnswerKey,
    pub(super) options: Vec<String>,
    pub(super) knowledge_point: KnowledgePointRef,
    pub(super) alternative_answers: Vec<String>,
    pub(super) explanation: Option<String>,
    pub(super) hints: Option<Vec<Option<String>>>,
    pub(super) extra_properties: Option<BTreeMap<String, Value>>,
    pub(super) order_groups: OrderGroups,
    pub(super) images: Option<Vec<String>>,
    pub(super) tags: Option<Vec<String>>,
}

impl Quiz {
    /// Build a quiz from raw field data.
    pub fn create(record: QuizRecord) -> Result<Self, QuizError> {
        let kind = QuizTypeKind::from_string(&record.quiz_type)?;
        let options = record.options.unwrap_or_default();
        check_options(kind, &options)?;

        let answer = build_answer_key(kind, record.answer, record.answer_index, &options)?;
        let knowledge_point = KnowledgePointRef::new(record.knowledge_point_id)?;

        let order_groups = match kind {
            QuizTypeKind::FillInTheBlank => OrderGroups::from_extra_properties(
                record.extra_properties.as_ref(),
                answer.text().len(),
            )?,
            QuizTypeKind::SingleChoice
            | QuizTypeKind::MultipleChoice
            | QuizTypeKind::Subjective
            | QuizTypeKind::Other => OrderGroups::default(),
        };

        let quiz = Self {
            id: record.id,
            kind,
            question: record.question,
            answer,
            options,
            knowledge_point,
            alternative_answers: record.alternative_answers,
            explanation: record.explanation,
            hints: record.hints,
            extra_properties: record.extra_properties,
            order_groups,
            images: record.images,
            tags: record.tags,
        };
        quiz.validate_invariants()?;

        debug!(quiz_id = ?quiz.id, kind = %quiz.kind, "quiz definition accepted");
        Ok(quiz)
    }

    /// Rehydrate a stored quiz. Stored data goes through the same checks as new input.
    pub fn from_persistence(record: QuizRecord) -> Result<Self, QuizError> {
        Self::create(record)
    }

    fn validate_invariants(&self) -> Result<(), QuizError> {
        check_options(self.kind, &self.options)?;

        let answer_count = self.answer.indices().len();
        if self.kind.is_single_choice() && answer_count != 1 {
            return Err(InvariantViolation::SingleChoiceAnswerCount {
                found: answer_count,
            }
            .into());
        }
        if self.kind.is_multiple_choice() && answer_count < 2 {
            return Err(InvariantViolation::MultipleChoiceAnswerCount {
                found: answer_count,
            }
            .into());
        }

        let out_of_range: Vec<i64> = self
            .answer
            .indices()
            .into_iter()
            .filter(|index| *index >= self.options.len())
            .map(|index| index as i64)
            .collect();
        if !out_of_range.is_empty() {
            return Err(QuizError::IndexOutOfRange {
                indices: out_of_range,
                options_len: self.options.len(),
            });
        }

        if self.question.trim().is_empty() {
            return Err(InvariantViolation::EmptyQuestion.into());
        }

        Ok(())
    }

    /// Re-tag the quiz. Returns whether anything changed.
    pub fn change_knowledge_point(&mut self, knowledge_point: KnowledgePointRef) -> bool {
        if self.knowledge_point == knowledge_point {
            return false;
        }

        debug!(
            quiz_id = ?self.id,
            from = %self.knowledge_point,
            to = %knowledge_point,
            "knowledge point changed"
        );
        self.knowledge_point = knowledge_point;
        true
    }

    pub fn needs_improvement(&self, error_rate: f32) -> bool {
        ReviewPolicy::default().needs_improvement(error_rate)
    }

    pub fn should_show_hints(&self, attempt_count: u32) -> bool {
        ReviewPolicy::default().should_show_hints(self, attempt_count)
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn kind(&self) -> QuizTypeKind {
        self.kind
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &AnswerKey {
        &self.answer
    }

    pub fn options(&self) -> Vec<String> {
        self.options.clone()
    }

    pub fn knowledge_point(&self) -> &KnowledgePointRef {
        &self.knowledge_point
    }

    pub fn alternative_answers(&self) -> Vec<String> {
        self.alternative_answers.clone()
    }

    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    pub fn hints(&self) -> Option<Vec<Option<String>>> {
        self.hints.clone()
    }

    pub fn extra_properties(&self) -> Option<BTreeMap<String, Value>> {
        self.extra_properties.clone()
    }

    pub fn order_groups(&self) -> &OrderGroups {
        &self.order_groups
    }

    pub fn images(&self) -> Option<Vec<String>> {
        self.images.clone()
    }

    pub fn tags(&self) -> Option<Vec<String>> {
        self.tags.clone()
    }

    /// Field record for the storage collaborator. An empty option list is left out.
    pub fn to_persistence(&self) -> QuizRecord {
        QuizRecord {
            id: self.id.clone(),
            quiz_type: self.kind.as_str().to_string(),
            question: self.question.clone(),
            answer: Some(AnswerInput::from(self.answer.text().clone())),
            answer_index: self.answer.has_indices().then(|| {
                self.answer
                    .indices()
                    .into_iter()
                    .map(|index| index as i64)
                    .collect()
            }),
            options: self.non_empty_options(),
            knowledge_point_id: self.knowledge_point.to_string(),
            alternative_answers: self.alternative_answers.clone(),
            explanation: self.explanation.clone(),
            hints: self.hints.clone(),
            extra_properties: self.extra_properties.clone(),
            images: self.images.clone(),
            tags: self.tags.clone(),
        }
    }

    /// Client projection. Without `include_answer` nothing that reveals the solution is emitted.
    pub fn to_api_response(&self, include_answer: bool) -> QuizView {
        let mut view = QuizView {
            id: self.id.clone(),
            quiz_type: self.kind,
            question: self.question.clone(),
            options: self.non_empty_options(),
            images: self.images.clone(),
            tags: self.tags.clone(),
            hints: self.hints.clone(),
            answer: None,
            answer_index: None,
            alternative_answers: None,
            explanation: None,
        };

        if include_answer {
            view.answer = Some(self.answer.text().clone());
            view.answer_index = self.answer.has_indices().then(|| self.answer.indices());
            view.alternative_answers = Some(self.alternative_answers.clone());
            view.explanation = self.explanation.clone();
        }

        view
    }

    fn non_empty_options(&self) -> Option<Vec<String>> {
        (!self.options.is_empty()).then(|| self.options.clone())
    }
}

fn check_options(kind: QuizTypeKind, options: &[String]) -> Result<(), InvariantViolation> {
    if kind.requires_options() && options.is_empty() {
        return Err(InvariantViolation::OptionsRequired { kind });
    }
    Ok(())
}

fn build_answer_key(
    kind: QuizTypeKind,
    answer: Option<AnswerInput>,
    answer_index: Option<Vec<i64>>,
    options: &[String],
) -> Result<AnswerKey, QuizError> {
    let answer = answer.filter(|answer| !answer.is_blank());

    match kind {
        QuizTypeKind::SingleChoice | QuizTypeKind::MultipleChoice => {
            match (answer_index.filter(|indices| !indices.is_empty()), answer) {
                (Some(indices), _) => AnswerKey::from_indices(&indices, options),
                (None, Some(answer)) => AnswerKey::from_text(answer.to_answer_text(), options),
                (None, None) => Err(QuizError::MissingAnswer),
            }
        }
        QuizTypeKind::FillInTheBlank | QuizTypeKind::Subjective | QuizTypeKind::Other => answer
            .map(|answer| AnswerKey::from_raw_text(answer.to_answer_text()))
            .ok_or(QuizError::MissingAnswer),
    }
}
