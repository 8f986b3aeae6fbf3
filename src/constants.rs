//! Application-wide constants and configuration values
//!
//! This module centralizes magic numbers, endpoint defaults and environment
//! variable names so they are defined in one place.

/// Default base URL of the Limitless TCG API
pub const DEFAULT_API_DOMAIN: &str = "https://play.limitlesstcg.com/api";

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 100;

/// Result size requested from the tournament listing. The API treats this as "no limit".
pub const UNBOUNDED_LIST_LIMIT: u64 = u64::MAX;

/// Header carrying the API credential (`X-Access-Key`; header names are case-insensitive)
pub const ACCESS_KEY_HEADER: &str = "x-access-key";

/// Default log file name
pub const LOG_FILE_NAME: &str = "limitless_standings.log";

/// Environment variable names
pub mod env_vars {
    /// API credential (required)
    pub const API_KEY: &str = "LIMITLESS_API_KEY";

    /// Override for the API base URL
    pub const API_DOMAIN: &str = "LIMITLESS_API_DOMAIN";

    /// Override for the HTTP timeout in seconds
    pub const HTTP_TIMEOUT: &str = "LIMITLESS_HTTP_TIMEOUT";

    /// Cap on simultaneous standings requests
    pub const MAX_CONCURRENCY: &str = "LIMITLESS_MAX_CONCURRENCY";

    /// Override for the log file path
    pub const LOG_FILE: &str = "LIMITLESS_LOG_FILE";
}
