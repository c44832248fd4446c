// ABOUTME: Seam between resource services and the external platform
// ABOUTME: Services depend on this trait so the client can be injected or replaced in tests

use async_trait::async_trait;

use crate::error::GatewayResult;
use crate::query::QueryResult;

#[async_trait]
pub trait SqlGateway: Send + Sync {
    /// MindsDB project every resource is created under
    fn namespace(&self) -> &str;

    /// Execute one SQL statement
    async fn query(&self, sql: &str) -> GatewayResult<QueryResult>;
}

/// First keyword pair of a statement, safe to log
///
/// Statements can carry API keys, so only the leading verb and object
/// type are ever written to logs.
pub fn statement_kind(sql: &str) -> String {
    sql.split_whitespace()
        .take(2)
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase()
}
