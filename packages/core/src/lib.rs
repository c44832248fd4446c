// ABOUTME: Core types, traits, and utilities for Mindgate
// ABOUTME: Foundational package providing shared functionality across all Mindgate packages

pub mod constants;
pub mod error;
pub mod utils;
pub mod validation;

// Re-export constants
pub use constants::{
    campaign_table, fallback_dir, AGENTS_DIR, CAMPAIGNS_DIR, CAMPAIGN_TABLE_PREFIX,
    DEFAULT_DATA_DIR, DEFAULT_PROJECT, MASKED_API_KEY, ML_ENGINES_DIR, NOT_SPECIFIED,
};

// Re-export errors
pub use error::{ServiceError, ServiceResult};

// Re-export utilities
pub use utils::{
    escape_sql_string, normalize_identifier, parse_timestamp, sql_identifier, sql_json, sql_string,
};

// Re-export validation
pub use validation::{ValidationError, ValidationResult};
