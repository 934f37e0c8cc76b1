use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::QuizError;

/// Reference to a knowledge point owned by the external catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KnowledgePointRef(String);

impl KnowledgePointRef {
    pub fn new(id: impl Into<String>) -> Result<Self, QuizError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(QuizError::EmptyKnowledgePointId);
        }
        Ok(Self(id))
    }

    /// Absent or empty ids mean "not linked yet"; whitespace-only ids are still rejected.
    pub fn from_optional(id: Option<&str>) -> Result<Option<Self>, QuizError> {
        match id {
            None | Some("") => Ok(None),
            Some(id) => Self::new(id).map(Some),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KnowledgePointRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for KnowledgePointRef {
    type Error = QuizError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<KnowledgePointRef> for String {
    fn from(value: KnowledgePointRef) -> Self {
        value.0
    }
}
