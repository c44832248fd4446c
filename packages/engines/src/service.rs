// ABOUTME: ML engine service
// ABOUTME: Registers provider credentials on the platform and lists engines with local fallback

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use mindgate_core::{
    fallback_dir, sql_identifier, sql_string, ServiceResult, MASKED_API_KEY, ML_ENGINES_DIR,
};
use mindgate_mindsdb::{Row, SqlGateway};
use mindgate_storage::{first_non_empty, FallbackStore, ListingStrategy};
use tracing::{info, warn};

use crate::types::{MlEngine, MlEngineCreate, Provider};

pub struct EngineService {
    gateway: Arc<dyn SqlGateway>,
    fallback: FallbackStore<MlEngine>,
}

impl EngineService {
    pub fn new(gateway: Arc<dyn SqlGateway>, data_dir: impl AsRef<Path>) -> Self {
        Self {
            gateway,
            fallback: FallbackStore::new(fallback_dir(data_dir.as_ref(), ML_ENGINES_DIR)),
        }
    }

    /// Register an engine. The returned engine never carries the real key.
    pub async fn create(&self, request: MlEngineCreate) -> ServiceResult<MlEngine> {
        request.validate()?;

        let sql = render_create_engine(&request);
        self.gateway.query(&sql).await?;

        let engine = MlEngine::from_request(&request, Utc::now());
        info!(
            "Created ML engine '{}' for provider {}",
            engine.id, engine.provider
        );

        self.fallback.mirror(&engine).await;
        Ok(engine)
    }

    /// Engines known to the platform, or the local mirror when the platform
    /// cannot answer. Never fails.
    pub async fn list(&self) -> Vec<MlEngine> {
        let platform = EngineRows {
            gateway: self.gateway.as_ref(),
            mirror: &self.fallback,
        };
        let strategies: [&dyn ListingStrategy<MlEngine>; 2] = [&platform, &self.fallback];
        first_non_empty(&strategies).await
    }
}

/// `CREATE ML_ENGINE` statement for a validated request
pub fn render_create_engine(request: &MlEngineCreate) -> String {
    let provider = request.provider;
    let mut params = vec![format!(
        "{} = {}",
        provider.api_key_param(),
        sql_string(&request.api_key)
    )];

    if let Some(version) = request
        .model_version
        .as_deref()
        .filter(|v| !v.trim().is_empty())
    {
        params.push(format!("model_name = {}", sql_string(version)));
    }

    format!(
        "CREATE ML_ENGINE {} FROM {} USING {};",
        sql_identifier(&request.id()),
        provider.handler(),
        params.join(", ")
    )
}

struct EngineRows<'a> {
    gateway: &'a dyn SqlGateway,
    mirror: &'a FallbackStore<MlEngine>,
}

impl EngineRows<'_> {
    /// `SHOW ML_ENGINES` carries no version, description or creation time;
    /// take them from the mirror when this service created the engine
    async fn enrich(&self, engines: &mut [MlEngine]) {
        let mirrored: HashMap<String, MlEngine> = match self.mirror.load_all().await {
            Ok(items) => items.into_iter().map(|e| (e.id.clone(), e)).collect(),
            Err(e) => {
                warn!("Could not read mirrored engines: {}", e);
                return;
            }
        };

        for engine in engines.iter_mut() {
            if let Some(known) = mirrored.get(&engine.id) {
                engine.name = known.name.clone();
                engine.model_version = known.model_version.clone();
                engine.description = known.description.clone();
                engine.created_at = known.created_at;
            }
        }
    }
}

#[async_trait]
impl<'a> ListingStrategy<MlEngine> for EngineRows<'a> {
    fn name(&self) -> &'static str {
        "platform engines"
    }

    async fn extract(&self) -> Option<Vec<MlEngine>> {
        let result = match self.gateway.query("SHOW ML_ENGINES;").await {
            Ok(result) => result,
            Err(e) => {
                warn!("Failed to list ML engines: {}", e);
                return None;
            }
        };

        let Some(table) = result.into_table() else {
            warn!("Unrecognized response when listing ML engines");
            return None;
        };

        let mut engines: Vec<MlEngine> =
            table.rows().filter_map(|row| engine_from_row(&row)).collect();
        self.enrich(&mut engines).await;
        Some(engines)
    }
}

fn engine_from_row(row: &Row) -> Option<MlEngine> {
    let name = row.text("name")?;
    let handler = row.text("handler").unwrap_or_default();
    let Some(provider) = Provider::from_handler(&handler) else {
        // Built-in engines such as lightwood are not ours
        return None;
    };

    Some(MlEngine {
        id: name.clone(),
        name,
        provider,
        api_key: MASKED_API_KEY.to_string(),
        model_version: None,
        description: None,
        created_at: Utc::now(),
        updated_at: None,
    })
}
