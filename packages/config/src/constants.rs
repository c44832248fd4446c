// ABOUTME: Environment variable name constants
// ABOUTME: Centralized definitions of all environment variable names used across Mindgate

// Server Configuration
pub const PORT: &str = "PORT";
pub const MINDGATE_BIND_ADDR: &str = "MINDGATE_BIND_ADDR";

// CORS Configuration
pub const CORS_ORIGIN: &str = "CORS_ORIGIN";

// MindsDB Connection
pub const MINDSDB_HOST: &str = "MINDSDB_HOST";
pub const MINDSDB_USER: &str = "MINDSDB_USER";
pub const MINDSDB_PASSWORD: &str = "MINDSDB_PASSWORD";
pub const MINDSDB_PROJECT: &str = "MINDSDB_PROJECT";

// Local fallback mirror
pub const MINDGATE_DATA_DIR: &str = "MINDGATE_DATA_DIR";

// HTTP client timeouts against MindsDB
pub const MINDGATE_HTTP_TIMEOUT_SECS: &str = "MINDGATE_HTTP_TIMEOUT_SECS";
pub const MINDGATE_HTTP_CONNECT_TIMEOUT_SECS: &str = "MINDGATE_HTTP_CONNECT_TIMEOUT_SECS";

// Logging
pub const RUST_LOG: &str = "RUST_LOG";
