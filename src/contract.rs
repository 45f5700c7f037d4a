//! # contract: data model and the provider seam
//!
//! This module holds the plain data that flows through a notification run and the
//! single trait (`GenerationProvider`) behind which the hosted language model lives.
//!
//! - [`TrackingFormData`] is what the user typed in; it is immutable once submitted.
//! - [`GeneratedContent`] is what the model produced; it is either complete or absent.
//! - [`GenerationRequest`] / [`ProviderResponse`] / [`ProviderError`] describe the one
//!   outbound call, independent of any particular provider's wire format.
//!
//! ## Mocking & Testing
//! - The trait is annotated for `mockall` so tests can count provider calls and
//!   script responses without touching the network.

use async_trait::async_trait;
use mockall::automock;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shipping carriers offered by the form. Closed set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Carrier {
    #[default]
    Correios,
    Jadlog,
    FedEx,
    DHL,
    Other,
}

impl Carrier {
    pub const ALL: [Carrier; 5] = [
        Carrier::Correios,
        Carrier::Jadlog,
        Carrier::FedEx,
        Carrier::DHL,
        Carrier::Other,
    ];

    /// Label shown to the user and embedded in the prompt.
    pub fn display_name(&self) -> &'static str {
        match self {
            Carrier::Correios => "Correios",
            Carrier::Jadlog => "Jadlog",
            Carrier::FedEx => "FedEx",
            Carrier::DHL => "DHL",
            Carrier::Other => "Outra",
        }
    }

    /// Public tracking page of the carrier, used when the user gave no link.
    pub fn default_tracking_url(&self) -> Option<&'static str> {
        match self {
            Carrier::Correios => Some("https://rastreamento.correios.com.br/app/index.php"),
            Carrier::Jadlog => Some("https://www.jadlog.com.br/jadlog/tracking"),
            Carrier::FedEx => Some("https://www.fedex.com/fedextrack/"),
            Carrier::DHL => Some("https://www.dhl.com/br-pt/home/rastreamento.html"),
            Carrier::Other => None,
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Carrier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "correios" => Ok(Carrier::Correios),
            "jadlog" => Ok(Carrier::Jadlog),
            "fedex" => Ok(Carrier::FedEx),
            "dhl" => Ok(Carrier::DHL),
            "outra" | "other" => Ok(Carrier::Other),
            _ => {
                let known: Vec<&str> = Carrier::ALL.iter().map(Carrier::display_name).collect();
                Err(format!(
                    "unknown carrier '{}', expected one of: {}",
                    s.trim(),
                    known.join(", ")
                ))
            }
        }
    }
}

impl TryFrom<String> for Carrier {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Carrier> for String {
    fn from(carrier: Carrier) -> Self {
        carrier.display_name().to_string()
    }
}

/// Shipment facts entered by the user. Lives for the duration of one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingFormData {
    pub customer_name: String,
    /// Only needed for the WhatsApp deep link.
    #[serde(default)]
    pub customer_phone: String,
    /// Only needed for the e-mail deep link.
    #[serde(default)]
    pub customer_email: String,
    pub tracking_code: String,
    pub carrier: Carrier,
    pub product_name: String,
    #[serde(default)]
    pub tracking_link: Option<String>,
    #[serde(default)]
    pub invoice_number: Option<String>,
}

impl TrackingFormData {
    /// The tracking link, if one was given and it is not blank.
    pub fn tracking_link(&self) -> Option<&str> {
        non_blank(self.tracking_link.as_deref())
    }

    /// The invoice number, if one was given and it is not blank.
    pub fn invoice_number(&self) -> Option<&str> {
        non_blank(self.invoice_number.as_deref())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Notification texts returned by the model. All three fields are non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GeneratedContent {
    pub subject: String,
    pub whatsapp_message: String,
    pub email_body: String,
}

/// Provider-neutral description of the single outbound generation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub response_mime_type: String,
    pub response_schema: serde_json::Value,
}

/// Raw answer from the provider: the generated text, if there was any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProviderResponse {
    pub text: Option<String>,
}

/// Transport or provider-level failure, carrying the provider's own message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ProviderError {
    /// HTTP status when the provider answered at all.
    pub status: Option<u16>,
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }
}

/// Trait for the hosted model that turns a prompt into schema-constrained text.
///
/// The API key is passed per call: implementors hold no credential, so building
/// one never depends on the environment.
#[cfg_attr(any(test, feature = "test-export-mocks"), automock)]
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Issue exactly one generation request.
    async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerationRequest,
    ) -> Result<ProviderResponse, ProviderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn carrier_parses_display_and_variant_names() {
        assert_eq!("Outra".parse::<Carrier>().unwrap(), Carrier::Other);
        assert_eq!("other".parse::<Carrier>().unwrap(), Carrier::Other);
        assert_eq!("FEDEX".parse::<Carrier>().unwrap(), Carrier::FedEx);
        assert!("Sedex".parse::<Carrier>().is_err());
    }

    #[test]
    fn form_deserialises_from_camel_case_with_optional_fields_absent() {
        let json = r#"{
            "customerName": "Ana",
            "trackingCode": "AA123456789BR",
            "carrier": "Correios",
            "productName": "Tênis"
        }"#;
        let form: TrackingFormData = serde_json::from_str(json).unwrap();
        assert_eq!(form.customer_name, "Ana");
        assert_eq!(form.customer_phone, "");
        assert_eq!(form.carrier, Carrier::Correios);
        assert_eq!(form.tracking_link(), None);
        assert_eq!(form.invoice_number(), None);
    }

    #[test]
    fn blank_optional_fields_count_as_absent() {
        let form = TrackingFormData {
            tracking_link: Some("   ".into()),
            invoice_number: Some("".into()),
            ..Default::default()
        };
        assert_eq!(form.tracking_link(), None);
        assert_eq!(form.invoice_number(), None);
    }

    #[test]
    fn generated_content_rejects_unknown_fields() {
        let json = r#"{"subject":"S","whatsappMessage":"W","emailBody":"E","extra":"x"}"#;
        assert!(serde_json::from_str::<GeneratedContent>(json).is_err());
    }
}
