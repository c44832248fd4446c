// ABOUTME: Agent service backed by MindsDB models
// ABOUTME: Creates one model per agent and rebuilds agents from model training options when listing

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use mindgate_core::{
    fallback_dir, parse_timestamp, sql_identifier, sql_json, sql_string, ServiceError,
    ServiceResult, AGENTS_DIR,
};
use mindgate_mindsdb::{Row, SqlGateway};
use mindgate_storage::{first_non_empty, FallbackStore, ListingStrategy};
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::prompt::render_prompt;
use crate::types::{Agent, AgentCreate};

pub struct AgentService {
    gateway: Arc<dyn SqlGateway>,
    fallback: FallbackStore<Agent>,
}

impl AgentService {
    pub fn new(gateway: Arc<dyn SqlGateway>, data_dir: impl AsRef<Path>) -> Self {
        Self {
            gateway,
            fallback: FallbackStore::new(fallback_dir(data_dir.as_ref(), AGENTS_DIR)),
        }
    }

    pub async fn create(&self, profile: AgentCreate) -> ServiceResult<Agent> {
        profile.validate()?;

        let created_at = Utc::now();
        let sql = render_create_agent(self.gateway.namespace(), &profile, created_at);
        self.gateway.query(&sql).await?;

        let agent = Agent::from_request(profile, created_at);
        info!(
            "Created agent '{}' on engine '{}'",
            agent.id, agent.profile.ml_engine_id
        );

        self.fallback.mirror(&agent).await;
        Ok(agent)
    }

    /// Agents known to the platform, or the local mirror. Never fails.
    pub async fn list(&self) -> Vec<Agent> {
        let platform = AgentRows {
            gateway: self.gateway.as_ref(),
        };
        let strategies: [&dyn ListingStrategy<Agent>; 2] = [&platform, &self.fallback];
        first_non_empty(&strategies).await
    }

    pub async fn get(&self, id: &str) -> ServiceResult<Agent> {
        self.list()
            .await
            .into_iter()
            .find(|agent| agent.id == id)
            .ok_or_else(|| ServiceError::not_found(format!("Agent '{}'", id)))
    }
}

/// `CREATE MODEL` statement for a validated profile
pub fn render_create_agent(
    namespace: &str,
    profile: &AgentCreate,
    created_at: chrono::DateTime<Utc>,
) -> String {
    format!(
        "CREATE MODEL {}.{} PREDICT response USING engine = {}, prompt_template = {}, agent_description = {}, agent_attributes = {};",
        namespace,
        sql_identifier(&profile.id()),
        sql_string(&profile.ml_engine_id),
        sql_string(&render_prompt(profile)),
        sql_string(profile.description.as_deref().unwrap_or_default()),
        sql_json(&profile.attributes(created_at)),
    )
}

struct AgentRows<'a> {
    gateway: &'a dyn SqlGateway,
}

#[async_trait]
impl<'a> ListingStrategy<Agent> for AgentRows<'a> {
    fn name(&self) -> &'static str {
        "platform models"
    }

    async fn extract(&self) -> Option<Vec<Agent>> {
        let sql = format!(
            "SELECT name, engine, training_options FROM {}.models;",
            self.gateway.namespace()
        );
        let result = match self.gateway.query(&sql).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Failed to list agent models: {}", e);
                return None;
            }
        };

        let Some(table) = result.into_table() else {
            warn!("Unrecognized response when listing agent models");
            return None;
        };

        let agents = table
            .rows()
            .filter_map(|row| match agent_from_row(&row) {
                Ok(agent) => Some(agent),
                Err(reason) => {
                    warn!(
                        "Skipping model '{}': {}",
                        row.text("name").unwrap_or_default(),
                        reason
                    );
                    None
                }
            })
            .collect();
        Some(agents)
    }
}

/// Rebuild an agent from a `models` row. Models not created by this
/// service carry no attribute blob and are rejected.
fn agent_from_row(row: &Row) -> Result<Agent, String> {
    let model_name = row.text("name").ok_or("missing model name")?;
    let options = row
        .json("training_options")
        .ok_or("missing training options")?;
    let using = options
        .get("using")
        .and_then(Value::as_object)
        .ok_or("training options carry no 'using' block")?;

    let mut fields: Map<String, Value> = match using.get("agent_attributes") {
        Some(Value::Object(map)) => map.clone(),
        Some(Value::String(raw)) => serde_json::from_str(raw)
            .map_err(|e| format!("agent attributes are not valid JSON: {}", e))?,
        _ => return Err("no agent attributes".to_string()),
    };

    let created_at = fields
        .get("created_at")
        .and_then(Value::as_str)
        .and_then(parse_timestamp)
        .unwrap_or_else(Utc::now);

    fields
        .entry("name")
        .or_insert_with(|| Value::String(model_name.clone()));
    fields.insert("id".to_string(), Value::String(model_name));
    fields.insert("created_at".to_string(), serde_json::json!(created_at));

    let engine = row
        .text("engine")
        .or_else(|| using.get("engine").and_then(Value::as_str).map(str::to_string));
    if let Some(engine) = engine {
        fields.insert("ml_engine_id".to_string(), Value::String(engine));
    }
    if let Some(description) = using.get("agent_description").filter(|d| d.is_string()) {
        fields.insert("description".to_string(), description.clone());
    }

    serde_json::from_value(Value::Object(fields)).map_err(|e| e.to_string())
}
