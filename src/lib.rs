#![doc = "rastreio-zap: shipment-tracking notifications generated by a hosted LLM."]

//! A submitted [`contract::TrackingFormData`] is turned into a prompt, sent once to the
//! provider with a strict output schema, and the validated [`contract::GeneratedContent`]
//! is reshaped into WhatsApp and e-mail deep links.
//!
//! # Navigation
//! - Data model and provider seam: [`contract`]
//! - Prompt: [`prompt`]; output schema and validation: [`schema`]
//! - API key lookup: [`credential`]; HTTPS client: [`gemini`]
//! - One generation call: [`generate`]; user-facing state: [`flow`]
//! - Deep links and clipboard text: [`dispatch`]
//! - Settings and form files: [`load_config`]; command line: [`cli`]

pub mod cli;
pub mod contract;
pub mod credential;
pub mod dispatch;
pub mod error;
pub mod flow;
pub mod gemini;
pub mod generate;
pub mod load_config;
pub mod prompt;
pub mod schema;

pub use cli::{run, Cli, Commands};
pub use contract::{Carrier, GeneratedContent, TrackingFormData};
pub use error::{GenerationError, GenerationErrorKind};
pub use generate::{generate, NotificationGenerator};
