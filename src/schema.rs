//! Output schema sent to the provider, and the validation applied to whatever
//! comes back. Model output is untrusted: the provider's schema constraint is a
//! request, not a guarantee, so every answer is re-checked here.

use serde_json::error::Category;
use serde_json::{json, Value};
use tracing::debug;

use crate::contract::GeneratedContent;
use crate::error::GenerationError;

/// MIME type the provider is asked to answer with.
pub const RESPONSE_MIME_TYPE: &str = "application/json";

/// Fields of [`GeneratedContent`] as they appear on the wire, all required.
pub const REQUIRED_FIELDS: [&str; 3] = ["subject", "whatsappMessage", "emailBody"];

/// Response schema declared to the provider: an object with three required strings.
pub fn notification_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "subject": { "type": "STRING" },
            "whatsappMessage": { "type": "STRING" },
            "emailBody": { "type": "STRING" }
        },
        "required": REQUIRED_FIELDS
    })
}

/// Parses provider text into [`GeneratedContent`], all-or-nothing.
///
/// Blank text is an [`GenerationError::EmptyResponse`]. Anything else that is not a
/// JSON object holding exactly the three required non-blank strings is an
/// [`GenerationError::InvalidResponse`] with a description of the first problem.
/// Field presence, types and extra-field rejection come from the
/// `GeneratedContent` deserializer (`deny_unknown_fields`).
pub fn parse_generated_content(text: &str) -> Result<GeneratedContent, GenerationError> {
    if text.trim().is_empty() {
        return Err(GenerationError::EmptyResponse);
    }

    let content: GeneratedContent = serde_json::from_str(text).map_err(|e| match e.classify() {
        Category::Data => {
            GenerationError::InvalidResponse(format!("response does not match the schema: {e}"))
        }
        Category::Syntax | Category::Eof | Category::Io => {
            GenerationError::InvalidResponse(format!("response is not valid JSON: {e}"))
        }
    })?;

    let fields = [
        ("subject", &content.subject),
        ("whatsappMessage", &content.whatsapp_message),
        ("emailBody", &content.email_body),
    ];
    if let Some((field, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(GenerationError::InvalidResponse(format!(
            "required field `{field}` is empty"
        )));
    }

    debug!(
        subject_len = content.subject.len(),
        whatsapp_len = content.whatsapp_message.len(),
        email_len = content.email_body.len(),
        "Model response validated against schema"
    );
    Ok(content)
}
