// ABOUTME: MindsDB gateway for Mindgate
// ABOUTME: Connection management, SQL execution and tagged query results

pub mod client;
pub mod error;
pub mod gateway;
pub mod query;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use client::{Credentials, MindsDbClient, MindsDbConfig};
pub use error::{GatewayError, GatewayResult};
pub use gateway::{statement_kind, SqlGateway};
pub use query::{QueryResult, Row, Table};
