// ABOUTME: Simulated customer agents for campaign evaluation
// ABOUTME: Agent schema, roleplay prompt rendering and the MindsDB-backed agent service

pub mod prompt;
pub mod service;
pub mod types;

pub use prompt::render_prompt;
pub use service::AgentService;
pub use types::{Agent, AgentCreate};
