use crate::config::ReviewConfig;

use super::entity::Quiz;

const DEFAULT_IMPROVEMENT_ERROR_RATE: f32 = 0.5;
const DEFAULT_HINT_AFTER_ATTEMPTS: u32 = 2;

/// Thresholds deciding when a quiz gets flagged for rework and when hints are offered.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewPolicy {
    improvement_error_rate: f32,
    hint_after_attempts: u32,
}

impl ReviewPolicy {
    pub fn new(improvement_error_rate: f32, hint_after_attempts: u32) -> Self {
        let improvement_error_rate =
            if improvement_error_rate.is_finite() && (0.0..=1.0).contains(&improvement_error_rate) {
                improvement_error_rate
            } else {
                DEFAULT_IMPROVEMENT_ERROR_RATE
            };

        Self {
            improvement_error_rate,
            hint_after_attempts,
        }
    }

    pub fn improvement_error_rate(&self) -> f32 {
        self.improvement_error_rate
    }

    pub fn hint_after_attempts(&self) -> u32 {
        self.hint_after_attempts
    }

    pub fn needs_improvement(&self, error_rate: f32) -> bool {
        error_rate > self.improvement_error_rate
    }

    /// Hints only exist for blanks, and only once the learner has struggled.
    pub fn should_show_hints(&self, quiz: &Quiz, attempt_count: u32) -> bool {
        quiz.kind().is_fill_in_the_blank() && attempt_count >= self.hint_after_attempts
    }
}

impl Default for ReviewPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_IMPROVEMENT_ERROR_RATE, DEFAULT_HINT_AFTER_ATTEMPTS)
    }
}

impl From<&ReviewConfig> for ReviewPolicy {
    fn from(config: &ReviewConfig) -> Self {
        Self::new(config.improvement_error_rate, config.hint_after_attempts)
    }
}
