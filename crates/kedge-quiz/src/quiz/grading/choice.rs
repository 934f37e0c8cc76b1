use tracing::debug;

use super::super::answer::AnswerKey;
use super::super::record::UserAnswer;

pub(super) fn grade_choice(
    key: &AnswerKey,
    options: &[String],
    order_independent: bool,
    user_answer: &UserAnswer,
) -> bool {
    match parse_choice_answer(user_answer, options) {
        Some(candidate) => key.matches(&candidate, order_independent),
        None => {
            debug!(?user_answer, "ungradable choice submission");
            false
        }
    }
}

/// Text lookup wins; numeric strings are only read as option positions when no text matches.
fn parse_choice_answer(user_answer: &UserAnswer, options: &[String]) -> Option<AnswerKey> {
    match user_answer {
        UserAnswer::Indices(indices) => AnswerKey::from_indices(indices, options).ok(),
        UserAnswer::Text(_) | UserAnswer::Texts(_) => {
            AnswerKey::from_text(user_answer.to_answer_text(), options)
                .ok()
                .or_else(|| {
                    let indices = user_answer
                        .to_texts()
                        .iter()
                        .map(|text| text.trim().parse::<i64>().ok())
                        .collect::<Option<Vec<_>>>()?;
                    AnswerKey::from_indices(&indices, options).ok()
                })
        }
    }
}
