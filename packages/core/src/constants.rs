use std::path::{Path, PathBuf};

/// MindsDB project that holds every engine, agent model and campaign table
pub const DEFAULT_PROJECT: &str = "marketing_agents";

/// Placeholder returned wherever an engine API key would be exposed
pub const MASKED_API_KEY: &str = "*****";

/// Substituted into agent prompts for absent optional attributes
pub const NOT_SPECIFIED: &str = "Not specified";

/// Every campaign gets its own table named `campaign_<id>`
pub const CAMPAIGN_TABLE_PREFIX: &str = "campaign_";

/// Default root for the local fallback mirror
pub const DEFAULT_DATA_DIR: &str = "./data";

pub const AGENTS_DIR: &str = "agents";
pub const CAMPAIGNS_DIR: &str = "campaigns";
pub const ML_ENGINES_DIR: &str = "ml_engines";

/// Directory holding the fallback mirror for one resource type
pub fn fallback_dir(data_dir: impl AsRef<Path>, resource_dir: &str) -> PathBuf {
    data_dir.as_ref().join(resource_dir)
}

/// Table name for a campaign identifier
pub fn campaign_table(campaign_id: &str) -> String {
    format!("{}{}", CAMPAIGN_TABLE_PREFIX, campaign_id)
}
