/// `load_config` module: reads the static YAML settings and the shipment form from disk.
///
/// Secrets never live in these files. The API key is resolved from the environment at
/// generation time (see [`crate::credential`]); the config only says which variables
/// to look in and in what order.
///
/// # Errors
/// All errors here use `anyhow::Error` for context-rich diagnostics and are surfaced
/// at the CLI boundary.
use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::{error, info};

use crate::contract::TrackingFormData;
use crate::credential::API_KEY_VARS;
use crate::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_key_vars")]
    pub api_key_vars: Vec<String>,
    /// No timeout unless set.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ProviderConfig {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            model: default_model(),
            base_url: default_base_url(),
            api_key_vars: default_api_key_vars(),
            timeout_secs: None,
        }
    }
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_api_key_vars() -> Vec<String> {
    API_KEY_VARS.iter().map(|s| s.to_string()).collect()
}

fn read_file(path: &Path, what: &str) -> Result<String> {
    match fs::read_to_string(path) {
        Ok(content) => {
            info!(path = ?path, "{what} file read successfully");
            Ok(content)
        }
        Err(e) => {
            error!(error = ?e, path = ?path, "Failed to read {what} file");
            Err(anyhow::anyhow!("Failed to read {what} file {:?}: {}", path, e))
        }
    }
}

/// Loads the YAML settings file. Every key is optional.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    info!(config_path = ?path_ref, "Loading configuration from file");

    let content = read_file(path_ref, "config")?;

    // An empty document deserialises to unit, not to a map.
    if content.trim().is_empty() {
        info!(config_path = ?path_ref, "Config file is empty, using defaults");
        return Ok(AppConfig::default());
    }

    let config: AppConfig = match serde_yaml::from_str(&content) {
        Ok(conf) => conf,
        Err(e) => {
            error!(error = ?e, config_path = ?path_ref, "Failed to parse config YAML");
            return Err(anyhow::anyhow!("Failed to parse config YAML: {e}"));
        }
    };

    if config.provider.api_key_vars.is_empty() {
        error!(config_path = ?path_ref, "provider.api_key_vars is empty");
        anyhow::bail!("provider.api_key_vars must name at least one environment variable");
    }

    info!(
        model = %config.provider.model,
        base_url = %config.provider.base_url,
        api_key_vars = ?config.provider.api_key_vars,
        "Config loaded successfully"
    );
    Ok(config)
}

/// Loads a shipment form from YAML (or JSON, which YAML accepts) with camelCase keys.
pub fn load_form<P: AsRef<Path>>(path: P) -> Result<TrackingFormData> {
    let path_ref = path.as_ref();
    info!(form_path = ?path_ref, "Loading shipment form");

    let content = read_file(path_ref, "form")?;

    let form: TrackingFormData = match serde_yaml::from_str(&content) {
        Ok(form) => form,
        Err(e) => {
            error!(error = ?e, form_path = ?path_ref, "Failed to parse form");
            return Err(anyhow::anyhow!("Failed to parse form: {e}"));
        }
    };

    validate_form(&form)?;
    info!(carrier = %form.carrier, "Shipment form loaded");
    Ok(form)
}

/// Rejects forms missing a required field, before any generation is attempted.
pub fn validate_form(form: &TrackingFormData) -> Result<()> {
    let required = [
        ("customerName", &form.customer_name),
        ("trackingCode", &form.tracking_code),
        ("productName", &form.product_name),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            error!(field, "Required form field is blank");
            anyhow::bail!("Form field '{field}' is required");
        }
    }
    Ok(())
}
