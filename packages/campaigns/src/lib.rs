// ABOUTME: Marketing campaigns for Mindgate
// ABOUTME: Campaign schema and the service that keeps one MindsDB table per campaign

pub mod service;
pub mod types;

pub use service::CampaignService;
pub use types::{Campaign, CampaignCreate, MessageType};
