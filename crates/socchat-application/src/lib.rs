pub mod session;

pub use session::{ChatSessionMutator, EscalationHandler, SubmitOutcome};
