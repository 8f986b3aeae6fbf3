use thiserror::Error;

/// Broad category of an [`AppError`], used when summarizing fan-out results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Transport,
    HttpStatus,
    Decode,
    Shape,
    Task,
    Io,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    // Specific HTTP status code errors
    #[error("API request not found (404): {url}")]
    ApiNotFound { url: String },

    #[error("API server error ({status}): {message} (URL: {url})")]
    ApiServerError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("API client error ({status}): {message} (URL: {url})")]
    ApiClientError {
        status: u16,
        message: String,
        url: String,
    },

    #[error("API rate limit exceeded (429): {message} (URL: {url})")]
    ApiRateLimit { message: String, url: String },

    #[error("API service unavailable ({status}): {message} (URL: {url})")]
    ApiServiceUnavailable {
        status: u16,
        message: String,
        url: String,
    },

    // Network-specific errors
    #[error("Network timeout while fetching data from: {url}")]
    NetworkTimeout { url: String },

    #[error("Connection failed to: {url} - {message}")]
    NetworkConnection { url: String, message: String },

    #[error("Request to {url} failed: {message}")]
    ApiRequest { url: String, message: String },

    // Data parsing and validation errors
    #[error("API returned malformed JSON: {message} (URL: {url})")]
    ApiMalformedJson { message: String, url: String },

    #[error("API returned unexpected data structure: {message} (URL: {url})")]
    ApiUnexpectedStructure { message: String, url: String },

    #[error("API returned empty or missing data: {message} (URL: {url})")]
    ApiNoData { message: String, url: String },

    #[error("Malformed tournament record: {0}")]
    ResourceShape(String),

    #[error("Standings task for tournament {id} did not complete: {message}")]
    TaskAborted { id: String, message: String },

    #[error("Standings for {failed} of {total} tournaments failed to load")]
    IncompleteResults { failed: usize, total: usize },

    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    /// Create a configuration error with context
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a log setup error with context
    pub fn log_setup_error(msg: impl Into<String>) -> Self {
        Self::LogSetup(msg.into())
    }

    /// Create an API not found error
    pub fn api_not_found(url: impl Into<String>) -> Self {
        Self::ApiNotFound { url: url.into() }
    }

    /// Create an API server error (5xx status codes)
    pub fn api_server_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiServerError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API client error (4xx status codes except 404 and 429)
    pub fn api_client_error(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiClientError {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API rate limit error
    pub fn api_rate_limit(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiRateLimit {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an API service unavailable error
    pub fn api_service_unavailable(
        status: u16,
        message: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self::ApiServiceUnavailable {
            status,
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a network timeout error
    pub fn network_timeout(url: impl Into<String>) -> Self {
        Self::NetworkTimeout { url: url.into() }
    }

    /// Create a network connection error
    pub fn network_connection(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkConnection {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a generic request failure (neither timeout nor connect)
    pub fn api_request(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ApiRequest {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create a malformed JSON error
    pub fn api_malformed_json(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiMalformedJson {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create an unexpected data structure error
    pub fn api_unexpected_structure(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiUnexpectedStructure {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a no data error
    pub fn api_no_data(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self::ApiNoData {
            message: message.into(),
            url: url.into(),
        }
    }

    /// Create a malformed resource record error
    pub fn resource_shape(msg: impl Into<String>) -> Self {
        Self::ResourceShape(msg.into())
    }

    /// Create an error for a fan-out task that panicked or was cancelled
    pub fn task_aborted(id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::TaskAborted {
            id: id.into(),
            message: message.into(),
        }
    }

    /// Maps an HTTP status code to the matching error variant.
    pub fn from_status(status_code: u16, reason: impl Into<String>, url: &str) -> Self {
        match status_code {
            404 => AppError::api_not_found(url),
            429 => AppError::api_rate_limit(reason, url),
            400..=499 => AppError::api_client_error(status_code, reason, url),
            502 | 503 => AppError::api_service_unavailable(status_code, reason, url),
            _ => AppError::api_server_error(status_code, reason, url),
        }
    }

    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Config(_) | AppError::LogSetup(_) | AppError::TomlDeserialize(_) => {
                ErrorKind::Config
            }
            AppError::HttpClient(_)
            | AppError::NetworkTimeout { .. }
            | AppError::NetworkConnection { .. }
            | AppError::ApiRequest { .. } => ErrorKind::Transport,
            AppError::ApiNotFound { .. }
            | AppError::ApiServerError { .. }
            | AppError::ApiClientError { .. }
            | AppError::ApiRateLimit { .. }
            | AppError::ApiServiceUnavailable { .. } => ErrorKind::HttpStatus,
            AppError::ApiMalformedJson { .. }
            | AppError::ApiUnexpectedStructure { .. }
            | AppError::ApiNoData { .. } => ErrorKind::Decode,
            AppError::ResourceShape(_) => ErrorKind::Shape,
            AppError::TaskAborted { .. } | AppError::IncompleteResults { .. } => ErrorKind::Task,
            AppError::Io(_) | AppError::Serialize(_) => ErrorKind::Io,
        }
    }

    /// HTTP status code carried by status errors
    pub fn status_code(&self) -> Option<u16> {
        match self {
            AppError::ApiNotFound { .. } => Some(404),
            AppError::ApiRateLimit { .. } => Some(429),
            AppError::ApiServerError { status, .. }
            | AppError::ApiClientError { status, .. }
            | AppError::ApiServiceUnavailable { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Check if the error happened below the HTTP layer (timeout, connect, request)
    pub fn is_transport(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_helper() {
        let error = AppError::config_error("LIMITLESS_API_KEY is not set");
        assert!(matches!(error, AppError::Config(_)));
        assert_eq!(error.kind(), ErrorKind::Config);
        assert_eq!(
            error.to_string(),
            "Configuration error: LIMITLESS_API_KEY is not set"
        );
    }

    #[test]
    fn test_api_server_error_helper() {
        let error =
            AppError::api_server_error(500, "Internal server error", "https://api.example.com");
        assert!(matches!(error, AppError::ApiServerError { .. }));
        assert_eq!(
            error.to_string(),
            "API server error (500): Internal server error (URL: https://api.example.com)"
        );
        assert_eq!(error.status_code(), Some(500));
    }

    #[test]
    fn test_network_timeout_helper() {
        let error = AppError::network_timeout("https://api.example.com");
        assert!(matches!(error, AppError::NetworkTimeout { .. }));
        assert!(error.is_transport());
        assert_eq!(error.status_code(), None);
        assert_eq!(
            error.to_string(),
            "Network timeout while fetching data from: https://api.example.com"
        );
    }

    #[test]
    fn test_from_status_mapping() {
        let url = "https://api.example.com/tournaments";
        assert!(matches!(
            AppError::from_status(404, "Not Found", url),
            AppError::ApiNotFound { .. }
        ));
        assert!(matches!(
            AppError::from_status(429, "Too Many Requests", url),
            AppError::ApiRateLimit { .. }
        ));
        assert!(matches!(
            AppError::from_status(401, "Unauthorized", url),
            AppError::ApiClientError { status: 401, .. }
        ));
        assert!(matches!(
            AppError::from_status(503, "Service Unavailable", url),
            AppError::ApiServiceUnavailable { status: 503, .. }
        ));
        assert!(matches!(
            AppError::from_status(500, "Internal Server Error", url),
            AppError::ApiServerError { status: 500, .. }
        ));
    }

    #[test]
    fn test_status_errors_share_kind() {
        let url = "https://api.example.com";
        for status in [400, 404, 429, 500, 502] {
            let error = AppError::from_status(status, "reason", url);
            assert_eq!(error.kind(), ErrorKind::HttpStatus, "status {status}");
            assert_eq!(error.status_code(), Some(status));
        }
    }

    #[test]
    fn test_decode_and_shape_kinds() {
        let url = "https://api.example.com";
        assert_eq!(
            AppError::api_malformed_json("Response is not valid JSON", url).kind(),
            ErrorKind::Decode
        );
        assert_eq!(
            AppError::api_unexpected_structure("expected array", url).kind(),
            ErrorKind::Decode
        );
        assert_eq!(
            AppError::api_no_data("Response body is empty", url).kind(),
            ErrorKind::Decode
        );
        assert_eq!(
            AppError::resource_shape("missing id").kind(),
            ErrorKind::Shape
        );
    }

    #[test]
    fn test_task_aborted_helper() {
        let error = AppError::task_aborted("T1", "task panicked");
        assert_eq!(error.kind(), ErrorKind::Task);
        assert_eq!(
            error.to_string(),
            "Standings task for tournament T1 did not complete: task panicked"
        );
    }
}
