//! Submission state and the read-only view handed to the presentation layer.

use serde::{Deserialize, Serialize};

use crate::ioc::IndicatorKind;

/// Where a session is in processing a submission.
///
/// ```text
/// Idle -> Validating -> Enriching -> Composing -> Idle   (ip / url / hash)
/// Idle -> Validating -> Composing -> Idle                (free text)
/// Idle -> Uploading -> Idle                              (file upload)
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum SubmissionState {
    /// No pending submission; input is editable.
    #[default]
    Idle,
    /// Input is being classified and checked.
    Validating,
    /// Waiting on a threat-intelligence lookup.
    Enriching { kind: IndicatorKind },
    /// Assistant reply is being produced and appended.
    Composing,
    /// An uploaded file is being fingerprinted and looked up.
    Uploading { file_name: String },
}

impl SubmissionState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// True while an assistant reply is pending.
    pub fn is_composing(&self) -> bool {
        matches!(self, Self::Enriching { .. } | Self::Composing)
    }

    pub fn is_uploading(&self) -> bool {
        matches!(self, Self::Uploading { .. })
    }
}

/// Snapshot of session state for rendering.
///
/// The flags are derived from `state`, never set independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub state: SubmissionState,
    pub composing: bool,
    pub uploading: bool,
    /// Inline validation feedback for the last rejected submission.
    pub input_error: Option<String>,
    pub message_count: usize,
}

impl SessionView {
    pub fn new(state: SubmissionState, input_error: Option<String>, message_count: usize) -> Self {
        Self {
            composing: state.is_composing(),
            uploading: state.is_uploading(),
            state,
            input_error,
            message_count,
        }
    }

    /// Whether the send control should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.composing && !self.uploading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_follow_state() {
        let enriching = SessionView::new(
            SubmissionState::Enriching {
                kind: IndicatorKind::Hash,
            },
            None,
            0,
        );
        assert!(enriching.composing);
        assert!(!enriching.uploading);
        assert!(!enriching.can_submit());

        let uploading = SessionView::new(
            SubmissionState::Uploading {
                file_name: "sample.exe".to_string(),
            },
            None,
            2,
        );
        assert!(uploading.uploading);
        assert!(!uploading.composing);

        let idle = SessionView::default();
        assert!(idle.can_submit());
        assert!(idle.state.is_idle());
    }

    #[test]
    fn test_validating_is_not_composing() {
        assert!(!SubmissionState::Validating.is_composing());
        assert!(SubmissionState::Composing.is_composing());
    }

    #[test]
    fn test_state_serializes_tagged() {
        let value = serde_json::to_value(SubmissionState::Enriching {
            kind: IndicatorKind::Ip,
        })
        .unwrap();
        assert_eq!(value["type"], "Enriching");
        assert_eq!(value["data"]["kind"], "ip");
    }
}
