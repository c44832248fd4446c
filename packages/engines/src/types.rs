// ABOUTME: ML engine type definitions
// ABOUTME: Provider table, create request and the masked stored engine

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use mindgate_core::validation::require_non_blank;
use mindgate_core::{normalize_identifier, ValidationError, ValidationResult, MASKED_API_KEY};
use mindgate_storage::StoredResource;
use serde::{Deserialize, Serialize, Serializer};

/// Hosted model providers an engine can be registered for. Parsing is
/// case-insensitive and names the accepted values on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Provider {
    Openai,
    Anthropic,
    Llama,
    Gemini,
}

impl Provider {
    pub const ALL: [Provider; 4] = [
        Provider::Openai,
        Provider::Anthropic,
        Provider::Llama,
        Provider::Gemini,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Openai => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Llama => "llama",
            Provider::Gemini => "gemini",
        }
    }

    /// MindsDB handler registered for this provider
    pub fn handler(&self) -> &'static str {
        match self {
            Provider::Openai => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Llama => "llama_index",
            Provider::Gemini => "google_gemini",
        }
    }

    /// Name of the `USING` parameter carrying the API key
    pub fn api_key_param(&self) -> &'static str {
        match self {
            Provider::Openai => "openai_api_key",
            Provider::Anthropic => "anthropic_api_key",
            Provider::Llama | Provider::Gemini => "api_key",
        }
    }

    /// Reverse lookup used when listing engines
    pub fn from_handler(handler: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.handler().eq_ignore_ascii_case(handler.trim()))
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| {
                ValidationError::new(
                    "provider",
                    format!(
                        "unsupported provider '{}' (expected openai, anthropic, llama or gemini)",
                        s
                    ),
                )
            })
    }
}

impl TryFrom<String> for Provider {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Request body for registering an engine
#[derive(Clone, Deserialize)]
pub struct MlEngineCreate {
    pub name: String,
    pub provider: Provider,
    pub api_key: String,
    #[serde(default)]
    pub model_version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl MlEngineCreate {
    pub fn id(&self) -> String {
        normalize_identifier(&self.name)
    }

    pub fn validate(&self) -> ValidationResult {
        require_non_blank("name", &self.name)?;
        require_non_blank("api_key", &self.api_key)?;
        Ok(())
    }
}

impl fmt::Debug for MlEngineCreate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MlEngineCreate")
            .field("name", &self.name)
            .field("provider", &self.provider)
            .field("api_key", &MASKED_API_KEY)
            .field("model_version", &self.model_version)
            .field("description", &self.description)
            .finish()
    }
}

/// Registered engine. The API key is write-only and always serialized as
/// the placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlEngine {
    pub id: String,
    pub name: String,
    pub provider: Provider,
    #[serde(serialize_with = "serialize_masked", default = "masked_key")]
    pub api_key: String,
    #[serde(default)]
    pub model_version: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl MlEngine {
    /// Echo of a create request; the key itself is dropped here
    pub fn from_request(request: &MlEngineCreate, created_at: DateTime<Utc>) -> Self {
        Self {
            id: request.id(),
            name: request.name.clone(),
            provider: request.provider,
            api_key: masked_key(),
            model_version: request.model_version.clone(),
            description: request.description.clone(),
            created_at,
            updated_at: None,
        }
    }
}

impl StoredResource for MlEngine {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

fn masked_key() -> String {
    MASKED_API_KEY.to_string()
}

fn serialize_masked<S: Serializer>(_key: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(MASKED_API_KEY)
}
