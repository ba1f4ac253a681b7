//! Configuration for the mock dispatcher.
//!
//! Defines mock responses, the default reply, and logging settings.

use crate::error::MockError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Response header mapping.
pub type Headers = HashMap<String, String>;

/// Main configuration for a [`MockDispatcher`](crate::MockDispatcher).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct DispatcherConfig {
    /// Reply sent when no mock matches
    #[serde(default)]
    pub default_reply: Option<DefaultReplyOverride>,

    /// Global settings
    #[serde(default)]
    pub settings: DispatcherSettings,
}

impl DispatcherConfig {
    /// Load configuration from a YAML file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        Ok(Self::from_yaml(&content)?)
    }

    /// Parse and validate configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, MockError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), MockError> {
        if let Some(status) = self.default_reply.as_ref().and_then(|d| d.status) {
            validate_status(status)?;
        }
        Ok(())
    }
}

fn validate_status(status: u16) -> Result<(), MockError> {
    if !(100..=599).contains(&status) {
        return Err(MockError::InvalidStatus(status));
    }
    Ok(())
}

/// Global settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DispatcherSettings {
    /// Log every matched mock
    #[serde(default = "default_true")]
    pub log_matches: bool,

    /// Log requests that fall through to the default reply
    #[serde(default = "default_true")]
    pub log_unmatched: bool,
}

impl Default for DispatcherSettings {
    fn default() -> Self {
        Self {
            log_matches: true,
            log_unmatched: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// A registered mock response.
///
/// Every field is optional; missing fields are filled in when the response
/// is emitted (status 200, `Content-Type: application/json`, empty body).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MockResponse {
    /// HTTP status code
    #[serde(default)]
    pub status: Option<u16>,

    /// Response headers, used verbatim when present
    #[serde(default)]
    pub headers: Option<Headers>,

    /// Response body
    #[serde(default)]
    pub body: Option<ResponseBody>,
}

impl MockResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Add a single header, creating the mapping if needed.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), value.into());
        self
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_body(mut self, body: ResponseBody) -> Self {
        self.body = Some(body);
        self
    }
}

/// Response body, tagged as text or JSON when the mock is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseBody {
    /// Plain text body, emitted verbatim
    Text { content: String },
    /// JSON body, emitted as compact JSON
    Json { content: serde_json::Value },
}

impl ResponseBody {
    pub fn text(content: impl Into<String>) -> Self {
        ResponseBody::Text {
            content: content.into(),
        }
    }

    /// Build a JSON body from any serializable value.
    pub fn json<T: Serialize>(value: &T) -> Result<Self, MockError> {
        Ok(ResponseBody::Json {
            content: serde_json::to_value(value)?,
        })
    }

    pub fn from_value(content: serde_json::Value) -> Self {
        ResponseBody::Json { content }
    }

    /// Render the body as the string handed to the sink.
    pub fn render(&self) -> String {
        match self {
            ResponseBody::Text { content } => content.clone(),
            // Display on Value is the compact encoding and cannot fail.
            ResponseBody::Json { content } => content.to_string(),
        }
    }
}

/// Fully resolved fallback reply.
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultReply {
    pub status: u16,
    pub headers: Headers,
    pub body: String,
}

impl Default for DefaultReply {
    fn default() -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "text/plain".to_string());
        Self {
            status: 404,
            headers,
            body: "Not Found".to_string(),
        }
    }
}

impl DefaultReply {
    /// Resolve a partial override against the defaults.
    ///
    /// Override headers are merged over the default headers; names compare
    /// case-insensitively.
    pub fn from_override(overrides: DefaultReplyOverride) -> Self {
        let mut reply = Self::default();

        if let Some(status) = overrides.status {
            reply.status = status;
        }

        if let Some(headers) = overrides.headers {
            for (name, value) in headers {
                reply
                    .headers
                    .retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
                reply.headers.insert(name, value);
            }
        }

        if let Some(body) = overrides.body {
            reply.body = body;
        }

        reply
    }
}

/// Partial default reply supplied at construction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultReplyOverride {
    #[serde(default)]
    pub status: Option<u16>,

    #[serde(default)]
    pub headers: Option<Headers>,

    #[serde(default)]
    pub body: Option<String>,
}
