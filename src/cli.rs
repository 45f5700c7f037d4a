///
/// This module implements the CLI for rastreio-zap: command parsing, the async entry
/// point shared by `main` and the tests, and user-visible output.
///
/// All generation logic lives in the library modules; this module is glue.
///
/// ## How To Use
/// - For command-line users: run the `rastreio-zap` binary with `--help`.
/// - For programmatic/integration use: call [`run`] with a constructed [`Cli`].
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::contract::GeneratedContent;
use crate::credential::EnvCredentials;
use crate::dispatch::NotificationPreview;
use crate::flow::{FlowState, NotificationFlow};
use crate::gemini::GeminiClient;
use crate::generate::NotificationGenerator;
use crate::load_config::{load_config, load_form, AppConfig};
use crate::prompt::build_prompt;

/// CLI for rastreio-zap: shipment notifications for WhatsApp and e-mail.
#[derive(Parser)]
#[clap(
    name = "rastreio-zap",
    version,
    about = "Generate shipment-tracking notifications for WhatsApp and e-mail with an LLM"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the prompt that would be sent for a shipment form, without calling the model
    Prompt {
        /// Path to the shipment form (YAML or JSON)
        #[clap(long)]
        form: PathBuf,
    },
    /// Generate the WhatsApp message and e-mail for a shipment form
    Generate {
        /// Path to the shipment form (YAML or JSON)
        #[clap(long)]
        form: PathBuf,
        /// Path to the optional YAML settings file
        #[clap(long)]
        config: Option<PathBuf>,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    // Emit a top-level 'trace_initialised' event at the very start
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Prompt { form } => {
            let form = load_form(form)?;
            tracing::info!(command = "prompt", "Printing prompt");
            println!("{}", build_prompt(&form));
            Ok(())
        }
        Commands::Generate { form, config } => {
            let config = match config {
                Some(path) => load_config(path)?,
                None => AppConfig::default(),
            };
            let form = load_form(form)?;
            tracing::info!(command = "generate", model = %config.provider.model, "Starting generation");

            let client = GeminiClient::new(&config.provider.base_url, config.provider.timeout());
            let credentials = EnvCredentials::new(config.provider.api_key_vars.clone());
            let generator =
                NotificationGenerator::new(client, credentials).with_model(&config.provider.model);
            let mut flow = NotificationFlow::new(generator);

            match flow.submit(form).await {
                FlowState::Ready { form, content } => {
                    tracing::info!(command = "generate", "Generation complete");
                    print_preview(&NotificationPreview::new(form, content), content);
                    Ok(())
                }
                FlowState::Editing { error: Some(msg) } => {
                    tracing::error!(command = "generate", error = %msg, "Generation failed");
                    Err(anyhow::Error::msg(msg.clone()))
                }
                other => Err(anyhow::anyhow!("Unexpected flow state after submit: {other:?}")),
            }
        }
    }
}

fn print_preview(preview: &NotificationPreview, content: &GeneratedContent) {
    println!("== WhatsApp ==");
    println!("{}", preview.whatsapp_clipboard);
    match &preview.whatsapp_link {
        Some(link) => println!("\nSend: {link}"),
        None => println!("\nSend: disabled (add a phone number to send directly)"),
    }

    println!("\n== E-mail ==");
    println!("Subject: {}", content.subject);
    println!();
    println!("{}", content.email_body);
    match &preview.email_link {
        Some(link) => println!("\nOpen: {link}"),
        None => println!("\nOpen: disabled (add an e-mail address to send directly)"),
    }
}
