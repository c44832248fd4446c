// ABOUTME: ML engine registration on MindsDB
// ABOUTME: Provider-specific engine statements and masked engine listings

pub mod service;
pub mod types;

pub use service::EngineService;
pub use types::{MlEngine, MlEngineCreate, Provider};
