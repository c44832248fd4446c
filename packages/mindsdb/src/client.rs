// ABOUTME: HTTP client for the MindsDB SQL API
// ABOUTME: Handles connection strategies, namespace bootstrap and statement execution

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use mindgate_core::{sql_string, DEFAULT_PROJECT};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::error::{GatewayError, GatewayResult};
use crate::gateway::{statement_kind, SqlGateway};
use crate::query::QueryResult;

const CLOUD_HOST_MARKER: &str = "cloud.mindsdb.com";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 120;
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for a MindsDB instance
#[derive(Debug, Clone)]
pub struct MindsDbConfig {
    pub host: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub project: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl MindsDbConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            user: None,
            password: None,
            project: DEFAULT_PROJECT.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        }
    }

    pub fn with_credentials(
        mut self,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.user = Some(user.into());
        self.password = Some(password.into());
        self
    }

    pub fn with_project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    /// Cloud endpoints require credentials; local ones do not
    pub fn is_cloud(&self) -> bool {
        self.host.contains(CLOUD_HOST_MARKER)
    }

    /// Host with a scheme and without a trailing slash
    pub fn base_url(&self) -> String {
        let host = self.host.trim().trim_end_matches('/');
        if host.contains("://") {
            host.to_string()
        } else if self.is_cloud() {
            format!("https://{}", host)
        } else {
            format!("http://{}", host)
        }
    }

    /// Ordered list of credential strategies to try when connecting
    pub fn credential_strategies(&self) -> GatewayResult<Vec<Credentials>> {
        let configured = match (&self.user, &self.password) {
            (Some(user), Some(password)) => Some(Credentials::Default {
                user: user.clone(),
                password: password.clone(),
            }),
            _ => None,
        };

        if self.is_cloud() {
            return configured.map(|c| vec![c]).ok_or_else(|| {
                GatewayError::config("MindsDB cloud requires MINDSDB_USER and MINDSDB_PASSWORD")
            });
        }

        let mut strategies = vec![Credentials::None, Credentials::Empty];
        strategies.extend(configured);
        Ok(strategies)
    }
}

/// One way of authenticating against the platform
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// No login request at all
    None,
    /// Login with an empty user name and password
    Empty,
    /// Login with the configured user name and password
    Default { user: String, password: String },
}

impl Credentials {
    pub fn label(&self) -> &'static str {
        match self {
            Credentials::None => "none",
            Credentials::Empty => "empty",
            Credentials::Default { .. } => "default",
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Default { user, .. } => f
                .debug_struct("Default")
                .field("user", user)
                .field("password", &"<redacted>")
                .finish(),
            other => f.write_str(other.label()),
        }
    }
}

#[derive(Serialize)]
struct SqlQueryRequest<'a> {
    query: &'a str,
    context: SqlContext<'a>,
}

#[derive(Serialize)]
struct SqlContext<'a> {
    db: &'a str,
}

#[derive(Serialize)]
struct LocalLogin<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct CloudLogin<'a> {
    email: &'a str,
    password: &'a str,
}

/// Connected MindsDB client
#[derive(Clone)]
pub struct MindsDbClient {
    http: Client,
    base_url: String,
    project: String,
    cloud: bool,
}

impl MindsDbClient {
    /// Create HTTP client with cookie-backed sessions and timeout configuration
    fn create_http_client(config: &MindsDbConfig) -> GatewayResult<Client> {
        Client::builder()
            .cookie_store(true)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| GatewayError::Connection(format!("Failed to build HTTP client: {}", e)))
    }

    /// Connect using each credential strategy in turn, then make sure the
    /// project exists. Fails only when every strategy fails.
    pub async fn connect(config: MindsDbConfig) -> GatewayResult<Self> {
        let strategies = config.credential_strategies()?;
        let base_url = config.base_url();
        info!(
            "Connecting to MindsDB at {} ({} strategies)",
            base_url,
            strategies.len()
        );

        let mut last_error = None;
        for (attempt, credentials) in strategies.iter().enumerate() {
            // Fresh cookie jar per attempt so a failed login leaves nothing behind
            let client = Self {
                http: Self::create_http_client(&config)?,
                base_url: base_url.clone(),
                project: config.project.clone(),
                cloud: config.is_cloud(),
            };

            match client.try_connect(credentials).await {
                Ok(()) => {
                    info!(
                        "Connected to MindsDB using '{}' credentials",
                        credentials.label()
                    );
                    client.ensure_namespace().await;
                    return Ok(client);
                }
                Err(e) => {
                    warn!(
                        attempt = attempt + 1,
                        strategy = credentials.label(),
                        error = %e,
                        "MindsDB connection attempt failed"
                    );
                    last_error = Some(e);
                }
            }
        }

        let cause = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "no connection strategies available".to_string());
        error!("Could not connect to MindsDB at {}: {}", base_url, cause);
        Err(GatewayError::Connection(format!(
            "all {} attempts against {} failed, last error: {}",
            strategies.len(),
            base_url,
            cause
        )))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn try_connect(&self, credentials: &Credentials) -> GatewayResult<()> {
        match credentials {
            Credentials::None => {}
            Credentials::Empty => self.login("", "").await?,
            Credentials::Default { user, password } => self.login(user, password).await?,
        }
        self.probe().await
    }

    async fn login(&self, user: &str, password: &str) -> GatewayResult<()> {
        let request = if self.cloud {
            self.http
                .post(self.url("/cloud/login"))
                .json(&CloudLogin {
                    email: user,
                    password,
                })
        } else {
            self.http.post(self.url("/api/login")).json(&LocalLogin {
                username: user,
                password,
            })
        };

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(GatewayError::Authentication(format!(
                "login returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    async fn probe(&self) -> GatewayResult<()> {
        let response = self.http.get(self.url("/api/status")).send().await?;
        if !response.status().is_success() {
            return Err(GatewayError::Connection(format!(
                "status check returned {}",
                response.status()
            )));
        }
        Ok(())
    }

    /// Create the project when it is missing. Failures are logged and
    /// swallowed; callers find out on first real use.
    pub async fn ensure_namespace(&self) {
        if let Err(e) = self.try_ensure_namespace().await {
            warn!("Could not ensure MindsDB project '{}': {}", self.project, e);
        }
    }

    /// Create the project when it is missing, reporting any failure
    pub async fn try_ensure_namespace(&self) -> GatewayResult<()> {
        match self.namespace_exists().await? {
            Some(true) => {
                info!("MindsDB project '{}' already exists", self.project);
            }
            Some(false) => {
                let sql = format!("CREATE PROJECT {}", self.project);
                self.execute(&sql).await?;
                info!("Created MindsDB project '{}'", self.project);
            }
            None => {
                return Err(GatewayError::InvalidResponse(format!(
                    "could not confirm project '{}' exists",
                    self.project
                )));
            }
        }
        Ok(())
    }

    async fn namespace_exists(&self) -> GatewayResult<Option<bool>> {
        let sql = format!("SHOW DATABASES WHERE name = {}", sql_string(&self.project));
        let result = self.execute(&sql).await?;
        Ok(result.as_table().map(|table| !table.is_empty()))
    }

    async fn execute(&self, sql: &str) -> GatewayResult<QueryResult> {
        let kind = statement_kind(sql);
        debug!("Executing MindsDB statement: {}", kind);

        let response = self
            .http
            .post(self.url("/api/sql/query"))
            .json(&SqlQueryRequest {
                query: sql,
                context: SqlContext { db: &self.project },
            })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!("MindsDB request timed out ({})", kind);
                } else if e.is_connect() {
                    error!("Failed to connect to MindsDB: {}", e);
                }
                GatewayError::Http(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("MindsDB error for {}: {} - {}", kind, status, error_text);
            return Err(GatewayError::Execution(format!(
                "MindsDB returned {}: {}",
                status, error_text
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        QueryResult::from_value(body)
    }
}

#[async_trait]
impl SqlGateway for MindsDbClient {
    fn namespace(&self) -> &str {
        &self.project
    }

    async fn query(&self, sql: &str) -> GatewayResult<QueryResult> {
        self.execute(sql).await
    }
}
