//! Localized text lookup

use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Named placeholder values, e.g. `[("filter_name", "EasyList")]`
pub type MessageParams<'a> = &'a [(&'a str, &'a str)];

/// Looks up localized text by message key
pub trait Translator: Send + Sync {
    /// Returns the text for `key` with `params` substituted into its placeholders
    fn get_message(&self, key: &str, params: MessageParams<'_>) -> String;
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read messages file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid messages file: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    message: String,
}

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%([A-Za-z0-9_]+)%").expect("valid placeholder pattern"));

/// In-memory translator backed by an extension `messages.json` file
///
/// Placeholders use the `%name%` form. Unknown keys resolve to the key itself,
/// unknown placeholders are left untouched.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    pub fn new(messages: HashMap<String, String>) -> Self {
        Self { messages }
    }

    /// Parses the `{"key": {"message": "..."}}` layout
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let entries: HashMap<String, CatalogEntry> = serde_json::from_str(raw)?;
        let messages = entries
            .into_iter()
            .map(|(key, entry)| (key, entry.message))
            .collect();
        Ok(Self { messages })
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }
}

impl Translator for MessageCatalog {
    fn get_message(&self, key: &str, params: MessageParams<'_>) -> String {
        let Some(template) = self.messages.get(key) else {
            debug!("No message for key {}", key);
            return key.to_string();
        };

        if params.is_empty() {
            return template.clone();
        }

        PLACEHOLDER
            .replace_all(template, |caps: &regex::Captures| {
                let name = &caps[1];
                params
                    .iter()
                    .find(|(param, _)| *param == name)
                    .map(|(_, value)| value.to_string())
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }
}
