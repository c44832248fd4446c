// ABOUTME: Campaign type definitions
// ABOUTME: Create request, message type and the stored campaign

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use mindgate_core::validation::{require_lowercase, require_non_blank};
use mindgate_core::{campaign_table, normalize_identifier, ValidationError, ValidationResult};
use mindgate_storage::StoredResource;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    #[default]
    Informational,
    Promotional,
    Emotional,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Informational => "informational",
            MessageType::Promotional => "promotional",
            MessageType::Emotional => "emotional",
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "informational" => Ok(MessageType::Informational),
            "promotional" => Ok(MessageType::Promotional),
            "emotional" => Ok(MessageType::Emotional),
            other => Err(ValidationError::new(
                "message_type",
                format!("unknown message type '{}'", other),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignCreate {
    pub name: String,
    pub description: String,
    pub target_audience: String,
    pub budget: String,
    pub marketing_channel: String,
    pub message_type: MessageType,
    pub content: String,
}

impl CampaignCreate {
    pub fn id(&self) -> String {
        normalize_identifier(&self.name)
    }

    /// Platform table holding this campaign's row
    pub fn table(&self) -> String {
        campaign_table(&self.id())
    }

    pub fn validate(&self) -> ValidationResult {
        require_non_blank("name", &self.name)?;
        // MindsDB object names are case sensitive
        require_lowercase("name", &self.name)?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: String,
    #[serde(flatten)]
    pub details: CampaignCreate,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Campaign {
    pub fn from_request(details: CampaignCreate, created_at: DateTime<Utc>) -> Self {
        Self {
            id: details.id(),
            details,
            created_at,
            updated_at: None,
        }
    }
}

impl StoredResource for Campaign {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    pub(crate) fn sample_campaign(name: &str) -> CampaignCreate {
        CampaignCreate {
            name: name.to_string(),
            description: "Spring launch for the new blender".to_string(),
            target_audience: "home cooks".to_string(),
            budget: "$5,000".to_string(),
            marketing_channel: "email".to_string(),
            message_type: MessageType::Promotional,
            content: "Blend it like it's spring!".to_string(),
        }
    }

    #[test]
    fn test_uppercase_name_rejected() {
        let err = sample_campaign("Spring Sale").validate().unwrap_err();
        assert_eq!(err.field, "name");
        assert_eq!(err.message, "must be lowercase");
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(sample_campaign("   ").validate().is_err());
    }

    #[test]
    fn test_punctuated_lowercase_name_accepted() {
        let campaign = sample_campaign("mother's day \u{e9}dition");
        assert!(campaign.validate().is_ok());
        assert_eq!(campaign.table(), "campaign_mother's_day_\u{e9}dition");
    }

    #[test]
    fn test_table_name() {
        let campaign = sample_campaign("spring sale");
        assert!(campaign.validate().is_ok());
        assert_eq!(campaign.id(), "spring_sale");
        assert_eq!(campaign.table(), "campaign_spring_sale");
    }

    #[test]
    fn test_message_type_parsing() {
        assert_eq!("Emotional".parse::<MessageType>().unwrap(), MessageType::Emotional);
        assert!("viral".parse::<MessageType>().is_err());

        let body = json!({
            "name": "x", "description": "", "target_audience": "", "budget": "",
            "marketing_channel": "", "message_type": "viral", "content": ""
        });
        assert!(serde_json::from_value::<CampaignCreate>(body).is_err());
    }
}
