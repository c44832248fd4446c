// ABOUTME: Campaign service
// ABOUTME: Provisions a table per campaign and discovers campaigns by table-name prefix when listing

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mindgate_core::{
    fallback_dir, parse_timestamp, sql_identifier, sql_string, ServiceResult, CAMPAIGNS_DIR,
    CAMPAIGN_TABLE_PREFIX,
};
use mindgate_mindsdb::{Row, SqlGateway};
use mindgate_storage::{first_non_empty, FallbackStore, ListingStrategy};
use tracing::{debug, info, warn};

use crate::types::{Campaign, CampaignCreate, MessageType};

const COLUMNS: [(&str, &str); 9] = [
    ("id", "VARCHAR(255)"),
    ("name", "VARCHAR(255)"),
    ("description", "TEXT"),
    ("target_audience", "TEXT"),
    ("budget", "VARCHAR(255)"),
    ("marketing_channel", "VARCHAR(255)"),
    ("message_type", "VARCHAR(50)"),
    ("content", "TEXT"),
    ("created_at", "TIMESTAMP"),
];

pub struct CampaignService {
    gateway: Arc<dyn SqlGateway>,
    fallback: FallbackStore<Campaign>,
}

impl CampaignService {
    pub fn new(gateway: Arc<dyn SqlGateway>, data_dir: impl AsRef<Path>) -> Self {
        Self {
            gateway,
            fallback: FallbackStore::new(fallback_dir(data_dir.as_ref(), CAMPAIGNS_DIR)),
        }
    }

    /// Create the campaign table, then insert its single row. A table left
    /// empty by a failed insert is dropped so the name can be reused.
    pub async fn create(&self, details: CampaignCreate) -> ServiceResult<Campaign> {
        details.validate()?;

        let campaign = Campaign::from_request(details, Utc::now());
        let namespace = self.gateway.namespace();

        self.gateway
            .query(&render_create_table(namespace, &campaign.details))
            .await?;

        if let Err(e) = self
            .gateway
            .query(&render_insert(namespace, &campaign))
            .await
        {
            let table = campaign.details.table();
            warn!("Insert into {} failed, dropping the table: {}", table, e);
            let drop = render_drop_table(namespace, &table);
            if let Err(drop_err) = self.gateway.query(&drop).await {
                warn!("Failed to drop campaign table {}: {}", table, drop_err);
            }
            return Err(e.into());
        }

        info!(
            "Created campaign '{}' in table {}",
            campaign.id,
            campaign.details.table()
        );

        self.fallback.mirror(&campaign).await;
        Ok(campaign)
    }

    /// Campaigns found on the platform, or the local mirror. Never fails.
    pub async fn list(&self) -> Vec<Campaign> {
        let platform = CampaignTables {
            gateway: self.gateway.as_ref(),
        };
        let strategies: [&dyn ListingStrategy<Campaign>; 2] = [&platform, &self.fallback];
        first_non_empty(&strategies).await
    }
}

pub fn render_create_table(namespace: &str, details: &CampaignCreate) -> String {
    let columns: Vec<String> = COLUMNS
        .iter()
        .map(|(name, ty)| format!("{} {}", name, ty))
        .collect();
    format!(
        "CREATE TABLE {}.{} ({});",
        namespace,
        sql_identifier(&details.table()),
        columns.join(", ")
    )
}

pub fn render_insert(namespace: &str, campaign: &Campaign) -> String {
    let details = &campaign.details;
    let columns: Vec<&str> = COLUMNS.iter().map(|(name, _)| *name).collect();
    let values = [
        sql_string(&campaign.id),
        sql_string(&details.name),
        sql_string(&details.description),
        sql_string(&details.target_audience),
        sql_string(&details.budget),
        sql_string(&details.marketing_channel),
        sql_string(details.message_type.as_str()),
        sql_string(&details.content),
        sql_string(&campaign.created_at.to_rfc3339()),
    ];

    format!(
        "INSERT INTO {}.{} ({}) VALUES ({});",
        namespace,
        sql_identifier(&details.table()),
        columns.join(", "),
        values.join(", ")
    )
}

pub fn render_drop_table(namespace: &str, table: &str) -> String {
    format!("DROP TABLE {}.{};", namespace, sql_identifier(table))
}

struct CampaignTables<'a> {
    gateway: &'a dyn SqlGateway,
}

impl CampaignTables<'_> {
    async fn campaign_tables(&self) -> Option<Vec<String>> {
        let sql = format!("SHOW TABLES FROM {};", self.gateway.namespace());
        let result = match self.gateway.query(&sql).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Failed to list campaign tables: {}", e);
                return None;
            }
        };

        let Some(table) = result.into_table() else {
            warn!("Unrecognized response when listing campaign tables");
            return None;
        };

        Some(
            table
                .first_column_values()
                .into_iter()
                .filter(|name| name.starts_with(CAMPAIGN_TABLE_PREFIX))
                .collect(),
        )
    }

    async fn load(&self, table: &str) -> Option<Campaign> {
        let sql = format!(
            "SELECT * FROM {}.{} LIMIT 1;",
            self.gateway.namespace(),
            sql_identifier(table)
        );
        match self.gateway.query(&sql).await {
            Ok(result) => {
                let row = result.into_table().and_then(|t| t.rows().next());
                if row.is_none() {
                    debug!("Campaign table {} has no rows", table);
                }
                row.map(|row| campaign_from_row(table, &row, Utc::now()))
            }
            Err(e) => {
                warn!("Error reading campaign table {}: {}", table, e);
                None
            }
        }
    }
}

#[async_trait]
impl<'a> ListingStrategy<Campaign> for CampaignTables<'a> {
    fn name(&self) -> &'static str {
        "platform campaign tables"
    }

    async fn extract(&self) -> Option<Vec<Campaign>> {
        let tables = self.campaign_tables().await?;

        let mut campaigns = Vec::with_capacity(tables.len());
        for table in &tables {
            if let Some(campaign) = self.load(table).await {
                campaigns.push(campaign);
            }
        }
        Some(campaigns)
    }
}

/// Missing columns fall back to neutral defaults; the row never fails
fn campaign_from_row(table: &str, row: &Row, now: DateTime<Utc>) -> Campaign {
    let table_id = table
        .strip_prefix(CAMPAIGN_TABLE_PREFIX)
        .unwrap_or(table)
        .to_string();
    let id = row.text("id").unwrap_or(table_id);
    let text = |column: &str| row.text(column).unwrap_or_default();

    let message_type = match row.text("message_type") {
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("Campaign {}: {}, using informational", id, e);
            MessageType::Informational
        }),
        None => MessageType::default(),
    };

    let created_at = row
        .text("created_at")
        .and_then(|raw| parse_timestamp(&raw))
        .unwrap_or(now);

    Campaign {
        details: CampaignCreate {
            name: row.text("name").unwrap_or_else(|| id.clone()),
            description: text("description"),
            target_audience: text("target_audience"),
            budget: text("budget"),
            marketing_channel: text("marketing_channel"),
            message_type,
            content: text("content"),
        },
        id,
        created_at,
        updated_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::tests::sample_campaign;
    use mindgate_mindsdb::test_utils::RecordingGateway;
    use mindgate_mindsdb::{GatewayError, QueryResult, Table};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Map, Value};
    use tempfile::TempDir;

    fn table(columns: &[&str], data: Vec<Vec<Value>>) -> QueryResult {
        QueryResult::Table(Table::new(
            columns.iter().map(|c| c.to_string()).collect(),
            data,
        ))
    }

    #[test]
    fn test_render_statements() {
        let campaign = Campaign::from_request(sample_campaign("spring sale"), Utc::now());

        assert_eq!(
            render_create_table("marketing_agents", &campaign.details),
            "CREATE TABLE marketing_agents.`campaign_spring_sale` (id VARCHAR(255), name VARCHAR(255), description TEXT, target_audience TEXT, budget VARCHAR(255), marketing_channel VARCHAR(255), message_type VARCHAR(50), content TEXT, created_at TIMESTAMP);"
        );

        let insert = render_insert("marketing_agents", &campaign);
        assert!(insert.starts_with(
            "INSERT INTO marketing_agents.`campaign_spring_sale` (id, name, description, target_audience, budget, marketing_channel, message_type, content, created_at) VALUES ('spring_sale', 'spring sale', "
        ));
        assert!(insert.contains("'Blend it like it''s spring!'"));
        assert!(insert.contains("'promotional'"));
    }

    #[tokio::test]
    async fn test_create_issues_table_then_insert() {
        let temp_dir = TempDir::new().unwrap();
        let gateway = Arc::new(RecordingGateway::accepting());
        let service = CampaignService::new(gateway.clone(), temp_dir.path());

        let campaign = service.create(sample_campaign("spring sale")).await.unwrap();

        assert_eq!(campaign.id, "spring_sale");
        let statements = gateway.statements();
        assert_eq!(statements.len(), 2);
        assert!(statements[0].starts_with("CREATE TABLE"));
        assert!(statements[1].starts_with("INSERT INTO"));
        assert!(temp_dir
            .path()
            .join("campaigns/spring_sale.json")
            .exists());
    }

    #[tokio::test]
    async fn test_uppercase_name_makes_no_call() {
        let temp_dir = TempDir::new().unwrap();
        let gateway = Arc::new(RecordingGateway::accepting());
        let service = CampaignService::new(gateway.clone(), temp_dir.path());

        let err = service
            .create(sample_campaign("Spring Sale"))
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(gateway.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_table_creation_skips_insert() {
        let temp_dir = TempDir::new().unwrap();
        let gateway = Arc::new(RecordingGateway::failing("Table already exists"));
        let service = CampaignService::new(gateway.clone(), temp_dir.path());

        let err = service
            .create(sample_campaign("spring sale"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("already exists"));
        assert_eq!(gateway.call_count(), 1);
    }

    #[tokio::test]
    async fn test_failed_insert_drops_the_new_table() {
        let temp_dir = TempDir::new().unwrap();
        let gateway = Arc::new(RecordingGateway::with_responder(|sql| {
            if sql.starts_with("INSERT") {
                return Err(GatewayError::execution("insert rejected"));
            }
            Ok(QueryResult::Ok { affected_rows: None })
        }));
        let service = CampaignService::new(gateway.clone(), temp_dir.path());

        let err = service
            .create(sample_campaign("spring sale"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("insert rejected"));
        let statements = gateway.statements();
        assert_eq!(statements.len(), 3);
        assert!(statements[0].starts_with("CREATE TABLE marketing_agents.`campaign_spring_sale`"));
        assert!(statements[1].starts_with("INSERT INTO marketing_agents.`campaign_spring_sale`"));
        assert_eq!(statements[2], "DROP TABLE marketing_agents.`campaign_spring_sale`;");
        assert!(!temp_dir.path().join("campaigns").exists());
    }

    #[tokio::test]
    async fn test_failed_drop_still_reports_insert_error() {
        let temp_dir = TempDir::new().unwrap();
        let gateway = Arc::new(RecordingGateway::with_responder(|sql| {
            if sql.starts_with("CREATE") {
                return Ok(QueryResult::Ok { affected_rows: None });
            }
            Err(GatewayError::execution(format!("cannot run {}", &sql[..6])))
        }));
        let service = CampaignService::new(gateway.clone(), temp_dir.path());

        let err = service
            .create(sample_campaign("spring sale"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("cannot run INSERT"));
        assert_eq!(gateway.call_count(), 3);
    }

    #[tokio::test]
    async fn test_list_discovers_campaign_tables() {
        let temp_dir = TempDir::new().unwrap();
        let gateway = Arc::new(RecordingGateway::with_responder(|sql| {
            if sql.starts_with("SHOW TABLES") {
                return Ok(table(
                    &["Tables_in_marketing_agents"],
                    vec![
                        vec![json!("models")],
                        vec![json!("campaign_spring_sale")],
                        vec![json!("campaign_broken")],
                        vec![json!("campaign_sparse")],
                    ],
                ));
            }
            if sql.contains("campaign_broken") {
                return Err(GatewayError::execution("table is corrupt"));
            }
            if sql.contains("campaign_sparse") {
                return Ok(table(&["budget"], vec![vec![json!(1200)]]));
            }
            Ok(table(
                &["id", "name", "message_type", "created_at"],
                vec![vec![
                    json!("spring_sale"),
                    json!("spring sale"),
                    json!("emotional"),
                    json!("2025-03-01 09:30:00"),
                ]],
            ))
        }));
        let service = CampaignService::new(gateway.clone(), temp_dir.path());

        let campaigns = service.list().await;

        assert_eq!(campaigns.len(), 2);
        assert_eq!(campaigns[0].id, "spring_sale");
        assert_eq!(campaigns[0].details.message_type, MessageType::Emotional);
        assert_eq!(
            campaigns[0].created_at.to_rfc3339(),
            "2025-03-01T09:30:00+00:00"
        );

        let sparse = &campaigns[1];
        assert_eq!(sparse.id, "sparse");
        assert_eq!(sparse.details.name, "sparse");
        assert_eq!(sparse.details.budget, "1200");
        assert_eq!(sparse.details.content, "");
        assert_eq!(sparse.details.message_type, MessageType::Informational);

        assert_eq!(
            gateway.statements(),
            vec![
                "SHOW TABLES FROM marketing_agents;",
                "SELECT * FROM marketing_agents.`campaign_spring_sale` LIMIT 1;",
                "SELECT * FROM marketing_agents.`campaign_broken` LIMIT 1;",
                "SELECT * FROM marketing_agents.`campaign_sparse` LIMIT 1;",
            ]
        );
    }

    #[tokio::test]
    async fn test_list_uses_mirror_when_platform_is_down() {
        let temp_dir = TempDir::new().unwrap();
        CampaignService::new(Arc::new(RecordingGateway::accepting()), temp_dir.path())
            .create(sample_campaign("spring sale"))
            .await
            .unwrap();

        let failing = Arc::new(RecordingGateway::failing("connection refused"));
        let campaigns = CampaignService::new(failing, temp_dir.path()).list().await;

        assert_eq!(campaigns.len(), 1);
        assert_eq!(campaigns[0].details, sample_campaign("spring sale"));
    }

    #[test]
    fn test_unknown_message_type_defaults() {
        let mut map = Map::new();
        map.insert("message_type".to_string(), json!("viral"));
        let campaign = campaign_from_row("campaign_x", &Row::from(map), Utc::now());
        assert_eq!(campaign.details.message_type, MessageType::Informational);
        assert_eq!(campaign.id, "x");
    }
}
