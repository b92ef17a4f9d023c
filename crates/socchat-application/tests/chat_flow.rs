use std::sync::Arc;

use socchat_application::{ChatSessionMutator, SubmitOutcome};
use socchat_core::ChatConfig;
use socchat_core::config::EnrichmentConfig;
use socchat_core::enrichment::Verdict;
use socchat_core::ioc::IndicatorKind;
use socchat_core::session::{ChatSession, MessageRole, StaticResponder};

fn fast_config() -> ChatConfig {
    ChatConfig {
        enrichment: EnrichmentConfig {
            latency_ms: 5,
            ..EnrichmentConfig::default()
        },
        ..ChatConfig::default()
    }
}

#[tokio::test]
async fn test_analyst_conversation_with_demo_provider() {
    let mutator = ChatSessionMutator::with_demo_provider(
        ChatSession::new("Shift handover"),
        &fast_config(),
        Arc::new(StaticResponder::new("Check the proxy logs for that host.")),
    );

    assert!(mutator.submit_text("ok").await.is_err());
    let question = mutator
        .submit_text("anything odd on the proxy tonight?")
        .await
        .unwrap();
    let ip = mutator.submit_text("203.0.113.7").await.unwrap();
    let url = mutator
        .submit_text("http://invoice-update.example/pay")
        .await
        .unwrap();
    let upload = mutator.submit_upload("payload_dropper.bin").await.unwrap();

    assert_eq!(question, SubmitOutcome::Replied);
    assert_eq!(
        ip,
        SubmitOutcome::Enriched {
            kind: IndicatorKind::Ip,
            verdict: Verdict::Malicious
        }
    );
    assert_eq!(
        url,
        SubmitOutcome::Enriched {
            kind: IndicatorKind::Url,
            verdict: Verdict::Suspicious
        }
    );
    assert_eq!(
        upload,
        SubmitOutcome::Enriched {
            kind: IndicatorKind::Hash,
            verdict: Verdict::Malicious
        }
    );

    let session = mutator.snapshot().await;
    assert_eq!(session.title(), "Shift handover");
    assert_eq!(session.len(), 8);

    // strictly alternating user / assistant pairs
    for (index, message) in session.messages().iter().enumerate() {
        let expected = if index % 2 == 0 {
            MessageRole::User
        } else {
            MessageRole::Assistant
        };
        assert_eq!(message.role, expected, "message {index}");
    }

    let last = session.last_message().unwrap();
    assert!(last.content.contains("(File: payload_dropper.bin)"));
    assert!(last.content.contains("file_type: exe"));

    let view = mutator.view();
    assert!(view.can_submit());
    assert_eq!(view.message_count, 8);
}
