//! Semantic validation of a parsed configuration.
//!
//! Serde guarantees shape; this module checks values make sense before
//! any subsystem is built from them.

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("request timeout must be greater than zero")]
    ZeroTimeout,

    #[error("tracing service_name must not be empty")]
    EmptyServiceName,

    #[error("tracing buffer_capacity must be greater than zero")]
    ZeroBufferCapacity,

    #[error("tracing flush_interval_ms must be greater than zero")]
    ZeroFlushInterval,
}

/// Check all semantic constraints, collecting every violation.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }
    if config.tracing.service_name.is_empty() {
        errors.push(ValidationError::EmptyServiceName);
    }
    if config.tracing.buffer_capacity == 0 {
        errors.push(ValidationError::ZeroBufferCapacity);
    }
    if config.tracing.flush_interval_ms == 0 {
        errors.push(ValidationError::ZeroFlushInterval);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn test_bad_values_are_collected() {
        let mut config = AppConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.tracing.buffer_capacity = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&ValidationError::ZeroBufferCapacity));
    }
}
