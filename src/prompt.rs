//! Prompt construction for the notification generator.
//!
//! The prompt is the only place where output requirements (tone, emojis, link
//! handling) are expressed; the response shape itself is enforced by the schema.

use crate::contract::TrackingFormData;

/// Builds the generation prompt for a submitted form.
///
/// Pure and deterministic: the same form always yields the same string. The link
/// and invoice lines only appear when those fields hold a non-blank value.
pub fn build_prompt(data: &TrackingFormData) -> String {
    let mut prompt = String::new();

    prompt.push_str("Você é um assistente de e-commerce profissional.\n");
    prompt.push_str("Gere um JSON com mensagens de notificação de envio.\n\n");

    prompt.push_str("Dados:\n");
    prompt.push_str(&format!("- Cliente: {}\n", data.customer_name));
    prompt.push_str(&format!("- Produto: {}\n", data.product_name));
    prompt.push_str(&format!("- Transportadora: {}\n", data.carrier));
    prompt.push_str(&format!("- Código: {}\n", data.tracking_code));
    if let Some(link) = data.tracking_link() {
        prompt.push_str(&format!("- Link: {link}\n"));
    }
    if let Some(invoice) = data.invoice_number() {
        prompt.push_str(&format!("- NF: {invoice}\n"));
    }

    prompt.push_str("\nRequisitos:\n");
    prompt.push_str(&format!(
        "1. 'whatsappMessage': Use emojis. Seja breve. {}\n",
        link_instruction(data)
    ));
    prompt.push_str("2. 'emailBody': Texto cordial, formal e bem formatado.\n");
    prompt.push_str("3. 'subject': Assunto curto do e-mail.\n\n");

    prompt.push_str("Retorne APENAS JSON válido, sem texto adicional e sem blocos de markdown.\n");
    prompt
}

fn link_instruction(data: &TrackingFormData) -> String {
    match data.tracking_link() {
        Some(link) => format!("Use exatamente o link fornecido, sem alterações: {link}"),
        None => match data.carrier.default_tracking_url() {
            Some(url) => format!("Inclua o link genérico de rastreio da transportadora: {url}"),
            None => "Inclua um link genérico de rastreio da transportadora.".to_string(),
        },
    }
}
