use super::Config;
use crate::error::AppError;

/// Validates the configuration settings
///
/// # Validation Rules
/// - API domain cannot be empty and must look like a URL or domain name
/// - API key cannot be empty
/// - HTTP timeout must be at least one second
/// - Concurrency cap, when set, must be at least one
/// - If log file path is provided, it cannot be empty
pub fn validate_config(config: &Config) -> Result<(), AppError> {
    let api_domain = &config.api_domain;
    if api_domain.is_empty() {
        return Err(AppError::config_error("API domain cannot be empty"));
    }

    if !api_domain.starts_with("http://") && !api_domain.starts_with("https://") {
        // If it doesn't start with protocol, it should at least look like a domain
        if !api_domain.contains('.') && !api_domain.starts_with("localhost") {
            return Err(AppError::config_error(
                "API domain must be a valid URL or domain name",
            ));
        }
    }

    if config.api_key.trim().is_empty() {
        return Err(AppError::config_error("API key cannot be empty"));
    }

    if config.http_timeout_seconds == 0 {
        return Err(AppError::config_error(
            "HTTP timeout must be at least 1 second",
        ));
    }

    if config.max_concurrency == Some(0) {
        return Err(AppError::config_error(
            "Max concurrency must be at least 1 when set",
        ));
    }

    if let Some(log_path) = &config.log_file_path
        && log_path.is_empty()
    {
        return Err(AppError::config_error("Log file path cannot be empty"));
    }

    Ok(())
}
