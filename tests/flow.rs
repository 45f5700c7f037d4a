use async_trait::async_trait;
use rastreio_zap::contract::{
    Carrier, GenerationProvider, GenerationRequest, MockGenerationProvider, ProviderError,
    ProviderResponse, TrackingFormData,
};
use rastreio_zap::credential::StaticCredentials;
use rastreio_zap::flow::{FlowState, NotificationFlow};
use rastreio_zap::generate::NotificationGenerator;
use std::time::Duration;

const VALID: &str = r#"{"subject":"Seu pedido saiu!","whatsappMessage":"📦 Chegando!","emailBody":"Olá Ana, seu pedido foi enviado."}"#;

fn form(phone: &str, email: &str) -> TrackingFormData {
    TrackingFormData {
        customer_name: "Ana".into(),
        customer_phone: phone.into(),
        customer_email: email.into(),
        tracking_code: "AA123456789BR".into(),
        carrier: Carrier::Correios,
        product_name: "Tênis".into(),
        tracking_link: None,
        invoice_number: None,
    }
}

fn flow_answering(
    answers: Vec<Result<ProviderResponse, ProviderError>>,
) -> NotificationFlow<MockGenerationProvider, StaticCredentials> {
    let mut provider = MockGenerationProvider::new();
    let mut answers = answers.into_iter();
    let count = answers.len();
    provider
        .expect_generate_content()
        .times(count)
        .returning(move |_, _| answers.next().expect("scripted answer"));
    NotificationFlow::new(NotificationGenerator::new(
        provider,
        StaticCredentials::new("k"),
    ))
}

fn ok(text: &str) -> Result<ProviderResponse, ProviderError> {
    Ok(ProviderResponse {
        text: Some(text.to_string()),
    })
}

#[tokio::test]
async fn test_success_moves_to_ready_with_complete_content() {
    let mut flow = flow_answering(vec![ok(VALID)]);
    assert_eq!(flow.state(), &FlowState::Editing { error: None });

    let state = flow.submit(form("+55 11 91234-5678", "")).await.clone();

    match state {
        FlowState::Ready { form, content } => {
            assert_eq!(form.customer_name, "Ana");
            assert_eq!(content.subject, "Seu pedido saiu!");
        }
        other => panic!("expected Ready, got {other:?}"),
    }
    assert!(!flow.is_loading());
    assert_eq!(flow.error(), None);
}

#[tokio::test]
async fn test_failure_is_prefixed_and_returns_to_form() {
    let mut flow = flow_answering(vec![Err(ProviderError::new(
        "API key not valid. Please pass a valid API key.",
    ))]);

    flow.submit(form("", "")).await;

    assert_eq!(
        flow.error(),
        Some("Error: API key not valid. Please pass a valid API key.")
    );
    assert!(flow.content().is_none());
    assert!(flow.preview().is_none());
    assert!(!flow.is_loading());
}

#[tokio::test]
async fn test_resubmit_after_failure_replaces_state() {
    let mut flow = flow_answering(vec![ok(""), ok(VALID)]);

    flow.submit(form("", "")).await;
    assert_eq!(flow.error(), Some("Error: The model returned an empty response."));

    flow.submit(form("", "")).await;
    assert_eq!(flow.error(), None);
    assert!(flow.content().is_some());
}

#[tokio::test]
async fn test_whatsapp_disabled_without_phone() {
    let mut flow = flow_answering(vec![ok(VALID)]);
    flow.submit(form("", "ana@example.com")).await;

    let preview = flow.preview().expect("preview after success");
    assert!(!preview.whatsapp_enabled());
    assert_eq!(preview.whatsapp_clipboard, "📦 Chegando!");
    assert!(preview
        .email_link
        .as_deref()
        .unwrap()
        .starts_with("mailto:ana@example.com?subject=Seu%20pedido%20saiu!&body="));
    assert_eq!(
        preview.email_clipboard,
        "Seu pedido saiu!\n\nOlá Ana, seu pedido foi enviado."
    );
}

#[tokio::test]
async fn test_reset_discards_everything() {
    let mut flow = flow_answering(vec![ok(VALID)]);
    flow.submit(form("11 99999-0000", "")).await;
    assert!(flow.preview().unwrap().whatsapp_enabled());

    flow.reset();

    assert_eq!(flow.state(), &FlowState::Editing { error: None });
    assert!(flow.content().is_none());
}

#[tokio::test]
async fn test_no_credential_surfaces_missing_key_message() {
    let mut provider = MockGenerationProvider::new();
    provider.expect_generate_content().times(0);
    let mut flow = NotificationFlow::new(NotificationGenerator::new(
        provider,
        StaticCredentials::none(),
    ));

    flow.submit(form("", "")).await;

    let msg = flow.error().expect("error message");
    assert!(msg.starts_with("Error: "));
    assert!(msg.contains("VITE_API_KEY"));
    assert!(flow.content().is_none());
}

/// A provider whose request never completes.
struct Unanswered;

#[async_trait]
impl GenerationProvider for Unanswered {
    async fn generate_content(
        &self,
        _api_key: &str,
        _request: &GenerationRequest,
    ) -> Result<ProviderResponse, ProviderError> {
        std::future::pending().await
    }
}

#[tokio::test]
async fn test_abandoned_submit_returns_to_empty_form() {
    let mut flow = NotificationFlow::new(NotificationGenerator::new(
        Unanswered,
        StaticCredentials::new("k"),
    ));

    let outcome =
        tokio::time::timeout(Duration::from_millis(20), flow.submit(form("", ""))).await;

    assert!(outcome.is_err(), "submit should not have completed");
    assert!(!flow.is_loading());
    assert_eq!(flow.state(), &FlowState::Editing { error: None });
}
