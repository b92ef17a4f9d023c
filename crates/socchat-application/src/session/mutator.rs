//! Session mutator: the submission state machine.
//!
//! `ChatSessionMutator` owns one `ChatSession` and is its only writer. It
//! drives each submission through validation, enrichment or reply
//! generation, and appends the resulting messages, while publishing a
//! `SessionView` for the presentation layer.

use std::sync::Arc;

use socchat_core::ChatConfig;
use socchat_core::config::InputConfig;
use socchat_core::enrichment::{
    DemoThreatIntel, EnrichmentService, ScanSubject, Verdict, format_unavailable, format_verdict,
};
use socchat_core::error::{ChatError, Result};
use socchat_core::ioc::{IndicatorKind, UploadFingerprint};
use socchat_core::session::{
    ChatMessage, ChatSession, ConversationalResponder, InputValidator, SessionView,
    SubmissionState,
};
use tokio::sync::{Mutex, RwLock, watch};
use tokio_util::sync::CancellationToken;

/// Callback invoked when the analyst escalates a conversation.
pub type EscalationHandler = Arc<dyn Fn(&ChatSession) + Send + Sync>;

const UPLOAD_PREFIX: &str = "(File uploaded)";

/// How an accepted submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// An indicator (or uploaded file) was looked up and the verdict appended.
    Enriched {
        kind: IndicatorKind,
        verdict: Verdict,
    },
    /// Free text was answered by the responder.
    Replied,
    /// The lookup or reply failed; a degraded assistant message was appended.
    Degraded { reason: String },
}

/// Owns a chat session and serializes all writes to it.
///
/// # Ordering
///
/// Submissions run one at a time behind a fair async lock, so the user
/// message and assistant message of one submission are always adjacent in
/// the session, in that order. A submission made while another is pending
/// waits its turn.
///
/// # Cancellation
///
/// [`shutdown`](Self::shutdown) aborts any in-flight lookup or reply. Its
/// result is discarded and later submissions fail with
/// `ChatError::Cancelled`.
pub struct ChatSessionMutator {
    session: RwLock<ChatSession>,
    view: watch::Sender<SessionView>,
    submission_lock: Mutex<()>,
    validator: InputValidator,
    enrichment: EnrichmentService,
    responder: Arc<dyn ConversationalResponder>,
    escalation_handler: RwLock<Option<EscalationHandler>>,
    shutdown: CancellationToken,
}

impl ChatSessionMutator {
    /// Creates a mutator for `session`.
    pub fn new(
        session: ChatSession,
        enrichment: EnrichmentService,
        responder: Arc<dyn ConversationalResponder>,
        input_config: &InputConfig,
    ) -> Self {
        let initial_view = SessionView::new(SubmissionState::Idle, None, session.len());
        let (view, _) = watch::channel(initial_view);

        Self {
            session: RwLock::new(session),
            view,
            submission_lock: Mutex::new(()),
            validator: InputValidator::new(input_config),
            enrichment,
            responder,
            escalation_handler: RwLock::new(None),
            shutdown: CancellationToken::new(),
        }
    }

    /// Creates a mutator backed by the demo threat-intelligence provider.
    pub fn with_demo_provider(
        session: ChatSession,
        config: &ChatConfig,
        responder: Arc<dyn ConversationalResponder>,
    ) -> Self {
        let provider = Arc::new(DemoThreatIntel::from_config(&config.enrichment));
        let enrichment = EnrichmentService::new(provider, &config.enrichment);
        Self::new(session, enrichment, responder, &config.input)
    }

    // ============================================================================
    // Read-only projections
    // ============================================================================

    /// Copy of the session as it is now.
    pub async fn snapshot(&self) -> ChatSession {
        self.session.read().await.clone()
    }

    /// Current view.
    pub fn view(&self) -> SessionView {
        self.view.borrow().clone()
    }

    /// Receiver that observes every view change.
    pub fn subscribe(&self) -> watch::Receiver<SessionView> {
        self.view.subscribe()
    }

    /// Live validation hint for the text currently in the input field.
    pub fn input_feedback(&self, input: &str) -> Option<&'static str> {
        self.validator.feedback(input)
    }

    pub fn is_closed(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    // ============================================================================
    // Submissions
    // ============================================================================

    /// Submits analyst text.
    ///
    /// Indicators are looked up first and appended together with their
    /// verdict; free text is appended immediately and answered by the
    /// responder.
    ///
    /// # Errors
    ///
    /// - `ChatError::Validation` if the input is rejected; nothing is appended.
    /// - `ChatError::Cancelled` if the session is shut down.
    pub async fn submit_text(&self, input: &str) -> Result<SubmitOutcome> {
        let _turn = self.acquire_turn().await?;

        let classified = match self.validator.validate(input) {
            Ok(classified) => {
                self.publish(SubmissionState::Validating, None).await;
                classified
            }
            Err(err) => {
                let feedback = self.validator.feedback(input).map(str::to_string);
                tracing::debug!(
                    target: "chat_pipeline",
                    "[ChatSessionMutator] rejected input: {}",
                    err
                );
                self.publish(SubmissionState::Idle, feedback).await;
                return Err(err);
            }
        };

        match classified.indicator() {
            Some(kind) => {
                self.run_lookup(
                    classified.raw_text.clone(),
                    &classified.raw_text,
                    kind,
                    ScanSubject::Indicator(kind),
                    SubmissionState::Enriching { kind },
                )
                .await
            }
            None => self.run_reply(classified.raw_text).await,
        }
    }

    /// Submits an uploaded file.
    ///
    /// Only the name is used: a fingerprint is synthesized from it and
    /// looked up as a hash.
    ///
    /// # Errors
    ///
    /// `ChatError::Cancelled` if the session is shut down.
    pub async fn submit_upload(&self, file_name: &str) -> Result<SubmitOutcome> {
        let _turn = self.acquire_turn().await?;

        let fingerprint = UploadFingerprint::from_file_name(file_name);
        tracing::debug!(
            target: "chat_pipeline",
            "[ChatSessionMutator] upload {} fingerprinted as {}",
            file_name,
            fingerprint
        );

        self.run_lookup(
            format!("{UPLOAD_PREFIX} {file_name}"),
            fingerprint.as_str(),
            IndicatorKind::Hash,
            ScanSubject::File(file_name.to_string()),
            SubmissionState::Uploading {
                file_name: file_name.to_string(),
            },
        )
        .await
    }

    /// Appends a message outside the submission flow and returns the
    /// updated session.
    ///
    /// Waits for any pending submission so the message cannot split a
    /// user/assistant pair.
    ///
    /// # Errors
    ///
    /// `ChatError::Cancelled` if the session is shut down.
    pub async fn append_message(&self, message: ChatMessage) -> Result<ChatSession> {
        let _turn = self.acquire_turn().await?;
        let updated = {
            let mut session = self.session.write().await;
            session.append(message);
            session.clone()
        };
        self.publish(SubmissionState::Idle, None).await;
        Ok(updated)
    }

    // ============================================================================
    // Escalation and teardown
    // ============================================================================

    pub async fn set_escalation_handler(&self, handler: EscalationHandler) {
        *self.escalation_handler.write().await = Some(handler);
    }

    /// Hands the current session to the escalation handler.
    ///
    /// Returns `false` when no handler is registered.
    pub async fn escalate(&self) -> bool {
        let handler = self.escalation_handler.read().await.clone();
        let Some(handler) = handler else {
            return false;
        };

        let session = self.session.read().await;
        tracing::info!(
            target: "chat_pipeline",
            "[ChatSessionMutator] escalating session {} ({} messages)",
            session.id(),
            session.len()
        );
        handler(&*session);
        true
    }

    /// Cancels any in-flight work and rejects further submissions.
    pub fn shutdown(&self) {
        tracing::debug!(target: "chat_pipeline", "[ChatSessionMutator] shutdown requested");
        self.shutdown.cancel();
    }

    // ============================================================================
    // Internals
    // ============================================================================

    async fn acquire_turn(&self) -> Result<tokio::sync::MutexGuard<'_, ()>> {
        if self.shutdown.is_cancelled() {
            return Err(ChatError::cancelled("session is closed"));
        }
        tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => Err(ChatError::cancelled("session is closed")),
            guard = self.submission_lock.lock() => Ok(guard),
        }
    }

    async fn run_lookup(
        &self,
        user_content: String,
        value: &str,
        kind: IndicatorKind,
        subject: ScanSubject,
        pending: SubmissionState,
    ) -> Result<SubmitOutcome> {
        let uploading = pending.is_uploading();
        self.publish(pending, None).await;

        let lookup = tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => {
                self.publish(SubmissionState::Idle, None).await;
                return Err(ChatError::cancelled("session closed during enrichment"));
            }
            result = self.enrichment.enrich(value, kind) => result,
        };

        if !uploading {
            self.publish(SubmissionState::Composing, None).await;
        }

        let (annotation, outcome) = match lookup {
            Ok(result) => (
                format_verdict(&subject, &result),
                SubmitOutcome::Enriched {
                    kind,
                    verdict: result.verdict,
                },
            ),
            Err(err) => {
                tracing::warn!(
                    target: "chat_pipeline",
                    "[ChatSessionMutator] lookup via {} failed, appending degraded reply: {}",
                    self.enrichment.provider_name(),
                    err
                );
                (
                    format_unavailable(&subject, &err),
                    SubmitOutcome::Degraded {
                        reason: err.to_string(),
                    },
                )
            }
        };

        {
            let mut session = self.session.write().await;
            session.append_exchange(
                ChatMessage::user(user_content),
                ChatMessage::assistant(annotation),
            );
            tracing::info!(
                target: "chat_pipeline",
                "[ChatSessionMutator] session {} appended {} result ({} messages)",
                session.id(),
                kind,
                session.len()
            );
        }

        self.publish(SubmissionState::Idle, None).await;
        Ok(outcome)
    }

    async fn run_reply(&self, prompt: String) -> Result<SubmitOutcome> {
        self.session
            .write()
            .await
            .append(ChatMessage::user(prompt.clone()));
        self.publish(SubmissionState::Composing, None).await;

        let reply = {
            let session = self.session.read().await;
            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => None,
                reply = self.responder.respond(&session, &prompt) => Some(reply),
            }
        };

        let Some(reply) = reply else {
            self.publish(SubmissionState::Idle, None).await;
            return Err(ChatError::cancelled("session closed during reply"));
        };

        let (message, outcome) = match reply {
            Ok(message) => (message, SubmitOutcome::Replied),
            Err(err) => {
                tracing::warn!(
                    target: "chat_pipeline",
                    "[ChatSessionMutator] responder failed, appending degraded reply: {}",
                    err
                );
                (
                    ChatMessage::assistant(format!("Assistant reply unavailable: {err}")),
                    SubmitOutcome::Degraded {
                        reason: err.to_string(),
                    },
                )
            }
        };

        self.session.write().await.append(message);
        self.publish(SubmissionState::Idle, None).await;
        Ok(outcome)
    }

    async fn publish(&self, state: SubmissionState, input_error: Option<String>) {
        let message_count = self.session.read().await.len();
        tracing::debug!(
            target: "chat_pipeline",
            "[ChatSessionMutator] state -> {:?} (messages={})",
            state,
            message_count
        );
        let next = SessionView::new(state, input_error, message_count);
        self.view.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            *current = next;
            true
        });
    }
}
