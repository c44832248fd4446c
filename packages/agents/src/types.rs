// ABOUTME: Agent type definitions
// ABOUTME: Create request with field validation and the stored agent echoed back to clients

use chrono::{DateTime, Utc};
use mindgate_core::validation::{
    require_items_non_blank, require_length, require_non_blank, require_range,
};
use mindgate_core::{normalize_identifier, ValidationResult};
use mindgate_storage::StoredResource;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

/// Demographic and psychographic profile of a simulated customer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentCreate {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    /// Free text or a plain number; numbers are kept as their decimal text
    #[serde(default, deserialize_with = "text_or_number")]
    pub income_level: Option<String>,
    #[serde(default)]
    pub education_level: Option<String>,
    pub interests: Vec<String>,
    #[serde(default)]
    pub personality_traits: Vec<String>,
    pub purchase_behaviors: Vec<String>,
    pub purchase_frequency: String,
    pub communication_preferences: Vec<String>,
    pub location: String,
    #[serde(default)]
    pub social_media_usage: Option<Vec<String>>,
    pub brand_loyalty: i64,
    pub price_sensitivity: i64,
    pub tech_savviness: i64,
    pub ml_engine_id: String,
}

impl AgentCreate {
    pub fn id(&self) -> String {
        normalize_identifier(&self.name)
    }

    pub fn validate(&self) -> ValidationResult {
        require_length("name", &self.name, 2, 100)?;
        if let Some(age) = self.age {
            require_range("age", age, 18, 100)?;
        }
        require_items_non_blank("interests", &self.interests)?;
        require_items_non_blank("personality_traits", &self.personality_traits)?;
        require_items_non_blank("purchase_behaviors", &self.purchase_behaviors)?;
        require_length("location", &self.location, 2, usize::MAX)?;
        require_range("brand_loyalty", self.brand_loyalty, 1, 10)?;
        require_range("price_sensitivity", self.price_sensitivity, 1, 10)?;
        require_range("tech_savviness", self.tech_savviness, 1, 10)?;
        require_non_blank("ml_engine_id", &self.ml_engine_id)?;
        Ok(())
    }

    /// Attribute blob stored alongside the model so the profile can be
    /// rebuilt when listing
    pub fn attributes(&self, created_at: DateTime<Utc>) -> Value {
        json!({
            "name": self.name,
            "age": self.age,
            "gender": self.gender,
            "occupation": self.occupation,
            "income_level": self.income_level,
            "education_level": self.education_level,
            "interests": self.interests,
            "personality_traits": self.personality_traits,
            "purchase_behaviors": self.purchase_behaviors,
            "purchase_frequency": self.purchase_frequency,
            "communication_preferences": self.communication_preferences,
            "location": self.location,
            "social_media_usage": self.social_media_usage,
            "brand_loyalty": self.brand_loyalty,
            "price_sensitivity": self.price_sensitivity,
            "tech_savviness": self.tech_savviness,
            "created_at": created_at,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    #[serde(flatten)]
    pub profile: AgentCreate,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Agent {
    pub fn from_request(profile: AgentCreate, created_at: DateTime<Utc>) -> Self {
        Self {
            id: profile.id(),
            profile,
            created_at,
            updated_at: None,
        }
    }
}

impl StoredResource for Agent {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(serde_json::Number),
}

fn text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<TextOrNumber> = Option::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        TextOrNumber::Text(s) => s,
        TextOrNumber::Number(n) => n.to_string(),
    }))
}
