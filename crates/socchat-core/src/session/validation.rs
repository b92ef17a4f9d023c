//! Format-acceptance rule for submitted text.

use crate::config::InputConfig;
use crate::error::{ChatError, Result};
use crate::ioc::{ClassifiedInput, Classifier};

/// Inline hint shown when short free text is rejected.
pub const INPUT_FORMAT_HINT: &str = "Please enter a plain question, URL (https://...), an IP (1.1.1.1), or a hash (MD5/SHA1/SHA256).";

const EMPTY_INPUT: &str = "input is empty";

/// Accepts indicators of any length, and free text longer than
/// `min_question_len` characters.
#[derive(Debug, Clone)]
pub struct InputValidator {
    classifier: Classifier,
    min_question_len: usize,
}

impl InputValidator {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            classifier: Classifier::new(config.ipv4_policy),
            min_question_len: config.min_question_len,
        }
    }

    /// Live feedback for the input field.
    ///
    /// Empty input gets no message; it simply cannot be sent.
    pub fn feedback(&self, input: &str) -> Option<&'static str> {
        match self.validate(input) {
            Err(_) if !input.trim().is_empty() => Some(INPUT_FORMAT_HINT),
            _ => None,
        }
    }

    /// Classifies `input` and applies the acceptance rule.
    ///
    /// # Errors
    ///
    /// `ChatError::Validation` for empty input or short unclassified text.
    pub fn validate(&self, input: &str) -> Result<ClassifiedInput> {
        if input.trim().is_empty() {
            return Err(ChatError::validation(EMPTY_INPUT));
        }

        let classified = self.classifier.classify(input);
        let long_enough = classified.raw_text.chars().count() > self.min_question_len;

        if classified.indicator().is_some() || long_enough {
            Ok(classified)
        } else {
            Err(ChatError::validation(INPUT_FORMAT_HINT))
        }
    }
}

impl Default for InputValidator {
    fn default() -> Self {
        Self::new(&InputConfig::default())
    }
}
