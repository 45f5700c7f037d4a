//! Resolution of the provider API key from an ordered list of named sources.

use tracing::{debug, info};

/// Environment variables checked for the API key, highest priority first.
pub const API_KEY_VARS: [&str; 4] = [
    "VITE_API_KEY",
    "API_KEY",
    "REACT_APP_API_KEY",
    "NEXT_PUBLIC_API_KEY",
];

/// A key together with the name of the source that supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedKey {
    pub source: String,
    pub value: String,
}

/// Looks up `names` in order through `lookup`; the first non-blank value wins.
pub fn resolve_api_key<S, F>(names: &[S], lookup: F) -> Option<ResolvedKey>
where
    S: AsRef<str>,
    F: Fn(&str) -> Option<String>,
{
    names.iter().find_map(|name| {
        let name = name.as_ref();
        match lookup(name) {
            Some(value) if !value.trim().is_empty() => Some(ResolvedKey {
                source: name.to_string(),
                value: value.trim().to_string(),
            }),
            _ => {
                debug!(source = name, "API key source empty or unset");
                None
            }
        }
    })
}

/// Something that can hand out the provider API key at call time.
pub trait CredentialSource: Send + Sync {
    fn api_key(&self) -> Option<String>;
}

/// Reads the key from the process environment.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    names: Vec<String>,
}

impl EnvCredentials {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new(API_KEY_VARS)
    }
}

impl CredentialSource for EnvCredentials {
    fn api_key(&self) -> Option<String> {
        let resolved = resolve_api_key(self.names.as_slice(), |name| std::env::var(name).ok())?;
        info!(source = %resolved.source, "API key resolved from environment");
        Some(resolved.value)
    }
}

/// A fixed key, or none at all.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials(Option<String>);

impl StaticCredentials {
    pub fn new(key: impl Into<String>) -> Self {
        Self(Some(key.into()))
    }

    pub fn none() -> Self {
        Self(None)
    }
}

impl CredentialSource for StaticCredentials {
    fn api_key(&self) -> Option<String> {
        self.0.clone().filter(|k| !k.trim().is_empty())
    }
}
