// ABOUTME: Shared handler state
// ABOUTME: Owns the three resource services, each holding the same gateway handle

use std::path::Path;
use std::sync::Arc;

use mindgate_agents::AgentService;
use mindgate_campaigns::CampaignService;
use mindgate_engines::EngineService;
use mindgate_mindsdb::SqlGateway;

#[derive(Clone)]
pub struct AppState {
    pub agents: Arc<AgentService>,
    pub campaigns: Arc<CampaignService>,
    pub engines: Arc<EngineService>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn SqlGateway>, data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            agents: Arc::new(AgentService::new(gateway.clone(), data_dir)),
            campaigns: Arc::new(CampaignService::new(gateway.clone(), data_dir)),
            engines: Arc::new(EngineService::new(gateway, data_dir)),
        }
    }
}
