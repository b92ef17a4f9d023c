//! Session application services.
//!
//! This module contains the submission state machine that merges analyst
//! input, enrichment results and assistant replies into a chat session.

mod mutator;

pub use mutator::{ChatSessionMutator, EscalationHandler, SubmitOutcome};
