use std::collections::BTreeMap;

use serde_json::Value;

use super::super::error::InvariantViolation;

pub const ORDER_INDEPENDENT_GROUPS_KEY: &str = "order-independent-groups";

/// Blank positions whose answers may be given in any order relative to each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderGroups(Vec<Vec<usize>>);

impl OrderGroups {
    /// Parse the `order-independent-groups` extra property once, checking every position
    /// against the number of blanks the quiz defines.
    pub(crate) fn from_extra_properties(
        extra_properties: Option<&BTreeMap<String, Value>>,
        blanks: usize,
    ) -> Result<Self, InvariantViolation> {
        let raw = match extra_properties.and_then(|props| props.get(ORDER_INDEPENDENT_GROUPS_KEY)) {
            None | Some(Value::Null) => return Ok(Self::default()),
            Some(raw) => raw,
        };

        let groups: Vec<Vec<usize>> = serde_json::from_value(raw.clone())
            .map_err(|_| InvariantViolation::MalformedOrderGroups)?;

        if let Some(position) = groups.iter().flatten().find(|position| **position >= blanks) {
            return Err(InvariantViolation::OrderGroupOutOfRange {
                position: *position,
                blanks,
            });
        }

        Ok(Self(groups))
    }

    pub fn groups(&self) -> &[Vec<usize>] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Case-insensitive, whitespace-trimmed comparison that also accepts any alternative answer.
pub(crate) fn matches_with_alternatives(user: &str, correct: &str, alternatives: &[String]) -> bool {
    let user = normalize(user);
    if user == normalize(correct) {
        return true;
    }

    alternatives
        .iter()
        .any(|alternative| user == normalize(alternative))
}

pub(super) fn grade_blanks(
    user: &[String],
    correct: &[String],
    groups: &OrderGroups,
    alternatives: &[String],
) -> bool {
    if user.len() != correct.len() {
        return false;
    }

    let mut grouped = vec![false; correct.len()];
    for group in groups.groups() {
        let (Some(mut user_group), Some(mut correct_group)) =
            (collect_group(user, group), collect_group(correct, group))
        else {
            return false;
        };
        user_group.sort_by_cached_key(|text| normalize(text));
        correct_group.sort_by_cached_key(|text| normalize(text));

        let group_matches = user_group
            .iter()
            .zip(correct_group.iter())
            .all(|(user, correct)| matches_with_alternatives(user, correct, alternatives));
        if !group_matches {
            return false;
        }

        for position in group {
            grouped[*position] = true;
        }
    }

    user.iter()
        .zip(correct.iter())
        .zip(grouped)
        .filter(|(_, in_group)| !in_group)
        .all(|((user, correct), _)| matches_with_alternatives(user, correct, alternatives))
}

fn collect_group<'a>(answers: &'a [String], group: &[usize]) -> Option<Vec<&'a str>> {
    group
        .iter()
        .map(|position| answers.get(*position).map(String::as_str))
        .collect()
}
