//! Deep links and clipboard payloads built from generated content.
//!
//! Nothing here talks to the model; it only reshapes [`GeneratedContent`] for the
//! WhatsApp (`wa.me`) and e-mail (`mailto:`) handlers.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use std::sync::OnceLock;

use crate::contract::{GeneratedContent, TrackingFormData};

/// Same unreserved set as JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub fn encode_uri_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

fn non_digits() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^0-9]").expect("static regex"))
}

/// `https://wa.me/<digits>?text=<message>`, or `None` when no phone was given.
pub fn whatsapp_link(phone: &str, content: &GeneratedContent) -> Option<String> {
    if phone.trim().is_empty() {
        return None;
    }
    let digits = non_digits().replace_all(phone, "");
    Some(format!(
        "https://wa.me/{}?text={}",
        digits,
        encode_uri_component(&content.whatsapp_message)
    ))
}

/// `mailto:<email>?subject=..&body=..`, or `None` when no e-mail was given.
pub fn email_link(email: &str, content: &GeneratedContent) -> Option<String> {
    if email.trim().is_empty() {
        return None;
    }
    Some(format!(
        "mailto:{}?subject={}&body={}",
        email.trim(),
        encode_uri_component(&content.subject),
        encode_uri_component(&content.email_body)
    ))
}

pub fn whatsapp_clipboard(content: &GeneratedContent) -> String {
    content.whatsapp_message.clone()
}

pub fn email_clipboard(content: &GeneratedContent) -> String {
    format!("{}\n\n{}", content.subject, content.email_body)
}

/// Everything the preview needs to dispatch one notification by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationPreview {
    pub whatsapp_link: Option<String>,
    pub email_link: Option<String>,
    pub whatsapp_clipboard: String,
    pub email_clipboard: String,
}

impl NotificationPreview {
    pub fn new(form: &TrackingFormData, content: &GeneratedContent) -> Self {
        NotificationPreview {
            whatsapp_link: whatsapp_link(&form.customer_phone, content),
            email_link: email_link(&form.customer_email, content),
            whatsapp_clipboard: whatsapp_clipboard(content),
            email_clipboard: email_clipboard(content),
        }
    }

    pub fn whatsapp_enabled(&self) -> bool {
        self.whatsapp_link.is_some()
    }

    pub fn email_enabled(&self) -> bool {
        self.email_link.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content() -> GeneratedContent {
        GeneratedContent {
            subject: "Seu pedido saiu!".into(),
            whatsapp_message: "📦 Ana, seu Tênis já está a caminho!".into(),
            email_body: "Olá Ana,\nseu pedido foi enviado.".into(),
        }
    }

    #[test]
    fn encoding_matches_encode_uri_component() {
        assert_eq!(encode_uri_component("a b&c=d"), "a%20b%26c%3Dd");
        assert_eq!(encode_uri_component("-_.!~*'()"), "-_.!~*'()");
        assert_eq!(encode_uri_component("é"), "%C3%A9");
        assert_eq!(encode_uri_component("\n"), "%0A");
    }

    #[test]
    fn whatsapp_link_keeps_only_phone_digits() {
        let link = whatsapp_link("+55 (11) 98765-4321", &content()).unwrap();
        assert!(link.starts_with("https://wa.me/5511987654321?text="), "got: {link}");
        assert!(link.contains("%F0%9F%93%A6%20Ana"));
    }

    #[test]
    fn links_are_disabled_without_contact() {
        assert_eq!(whatsapp_link("", &content()), None);
        assert_eq!(email_link("  ", &content()), None);
    }

    #[test]
    fn email_link_encodes_subject_and_body() {
        let link = email_link("ana@example.com", &content()).unwrap();
        assert_eq!(
            link,
            "mailto:ana@example.com?subject=Seu%20pedido%20saiu!&body=Ol%C3%A1%20Ana%2C%0Aseu%20pedido%20foi%20enviado."
        );
    }

    #[test]
    fn clipboard_payloads_are_verbatim() {
        assert_eq!(whatsapp_clipboard(&content()), "📦 Ana, seu Tênis já está a caminho!");
        assert_eq!(
            email_clipboard(&content()),
            "Seu pedido saiu!\n\nOlá Ana,\nseu pedido foi enviado."
        );
    }

    #[test]
    fn preview_reflects_missing_phone() {
        let form = TrackingFormData {
            customer_email: "ana@example.com".into(),
            ..Default::default()
        };
        let preview = NotificationPreview::new(&form, &content());
        assert!(!preview.whatsapp_enabled());
        assert!(preview.email_enabled());
    }
}
