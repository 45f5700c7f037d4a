//! Generation client: one form in, one complete [`GeneratedContent`] or one error out.
//!
//! The pipeline for a call is fixed:
//!   1. resolve the API key (fail with `MissingCredential` before any network activity)
//!   2. build the prompt
//!   3. issue exactly one provider request with the output schema
//!   4. validate the answer against the schema
//!
//! There is no retry, no backoff and no caching; each call is independent.

use tracing::{error, info};

use crate::contract::{GeneratedContent, GenerationProvider, GenerationRequest, TrackingFormData};
use crate::credential::{CredentialSource, EnvCredentials};
use crate::error::GenerationError;
use crate::gemini::{GeminiClient, DEFAULT_MODEL};
use crate::prompt::build_prompt;
use crate::schema::{notification_schema, parse_generated_content, RESPONSE_MIME_TYPE};

pub struct NotificationGenerator<P, C> {
    provider: P,
    credentials: C,
    model: String,
}

impl<P, C> NotificationGenerator<P, C>
where
    P: GenerationProvider,
    C: CredentialSource,
{
    pub fn new(provider: P, credentials: C) -> Self {
        Self {
            provider,
            credentials,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// The request that would be sent for `data`, without sending it.
    pub fn request_for(&self, data: &TrackingFormData) -> GenerationRequest {
        GenerationRequest {
            model: self.model.clone(),
            prompt: build_prompt(data),
            response_mime_type: RESPONSE_MIME_TYPE.to_string(),
            response_schema: notification_schema(),
        }
    }

    pub async fn generate(&self, data: &TrackingFormData) -> Result<GeneratedContent, GenerationError> {
        let api_key = match self.credentials.api_key() {
            Some(key) => key,
            None => {
                error!("No API key available, refusing to call the provider");
                return Err(GenerationError::MissingCredential);
            }
        };

        let request = self.request_for(data);
        info!(
            model = %request.model,
            carrier = %data.carrier,
            has_link = data.tracking_link().is_some(),
            has_invoice = data.invoice_number().is_some(),
            "Requesting notification content"
        );

        let response = self
            .provider
            .generate_content(&api_key, &request)
            .await
            .map_err(|e| {
                error!(error = %e, status = ?e.status, "Provider call failed");
                GenerationError::ProviderFailure(e.message)
            })?;

        let content = match response.text {
            Some(text) => parse_generated_content(&text),
            None => Err(GenerationError::EmptyResponse),
        }
        .map_err(|e| {
            error!(error = %e, "Provider response rejected");
            e
        })?;

        info!("Notification content generated");
        Ok(content)
    }
}

/// Generates content with the environment's API key and the default Gemini client.
pub async fn generate(data: &TrackingFormData) -> Result<GeneratedContent, GenerationError> {
    NotificationGenerator::new(GeminiClient::default(), EnvCredentials::default())
        .generate(data)
        .await
}
