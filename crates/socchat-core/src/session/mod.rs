//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: the append-only conversation (`ChatSession`)
//! - `message`: message types (`MessageRole`, `ChatMessage`, `Citation`)
//! - `state`: submission state machine states and the `SessionView` projection
//! - `validation`: format-acceptance rule for submitted text
//! - `responder`: seam for answering free-text questions

mod message;
mod model;
mod responder;
mod state;
mod validation;

pub use message::{ChatMessage, Citation, MessageRole};
pub use model::ChatSession;
pub use responder::{ConversationalResponder, StaticResponder};
pub use state::{SessionView, SubmissionState};
pub use validation::{INPUT_FORMAT_HINT, InputValidator};
