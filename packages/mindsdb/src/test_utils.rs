//! In-memory gateway that records statements, for service tests

use std::sync::Mutex;

use async_trait::async_trait;
use mindgate_core::DEFAULT_PROJECT;

use crate::error::{GatewayError, GatewayResult};
use crate::gateway::SqlGateway;
use crate::query::QueryResult;

type Responder = Box<dyn Fn(&str) -> GatewayResult<QueryResult> + Send + Sync>;

/// Records every statement and answers with a scripted responder
pub struct RecordingGateway {
    namespace: String,
    statements: Mutex<Vec<String>>,
    responder: Responder,
}

impl RecordingGateway {
    pub fn with_responder<F>(responder: F) -> Self
    where
        F: Fn(&str) -> GatewayResult<QueryResult> + Send + Sync + 'static,
    {
        Self {
            namespace: DEFAULT_PROJECT.to_string(),
            statements: Mutex::new(Vec::new()),
            responder: Box::new(responder),
        }
    }

    /// Accepts every statement
    pub fn accepting() -> Self {
        Self::with_responder(|_| Ok(QueryResult::Ok { affected_rows: None }))
    }

    /// Rejects every statement with the given message
    pub fn failing(message: &str) -> Self {
        let message = message.to_string();
        Self::with_responder(move |_| Err(GatewayError::execution(message.clone())))
    }

    pub fn statements(&self) -> Vec<String> {
        self.statements
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn call_count(&self) -> usize {
        self.statements().len()
    }
}

#[async_trait]
impl SqlGateway for RecordingGateway {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn query(&self, sql: &str) -> GatewayResult<QueryResult> {
        self.statements
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(sql.to_string());
        (self.responder)(sql)
    }
}
