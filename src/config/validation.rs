//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Reject routes whose keys differ only by case
//! - Check mapping entry names follow the lookup name convention
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RouterConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashMap;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::RouterConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route #{index} has an empty key")]
    EmptyRouteKey { index: usize },

    #[error("route '{key}' has an empty destination")]
    EmptyDestination { key: String },

    #[error("routes '{first}' and '{second}' differ only by case")]
    DuplicateRouteKey { first: String, second: String },

    #[error("mapping prefix is empty")]
    EmptyMappingPrefix,

    #[error("mapping entry '{name}' does not start with '{prefix}_'")]
    MappingNameMismatch { name: String, prefix: String },

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),
}

/// Validate `config`, collecting every error.
pub fn validate_config(config: &RouterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut seen: HashMap<String, &str> = HashMap::new();

    for (index, route) in config.routes.iter().enumerate() {
        if route.key.is_empty() {
            errors.push(ValidationError::EmptyRouteKey { index });
            continue;
        }
        if route.destination.name().is_empty() {
            errors.push(ValidationError::EmptyDestination {
                key: route.key.clone(),
            });
        }
        if let Some(first) = seen.insert(route.key.to_lowercase(), &route.key) {
            errors.push(ValidationError::DuplicateRouteKey {
                first: first.to_string(),
                second: route.key.clone(),
            });
        }
    }

    let prefix = &config.mapping.prefix;
    if prefix.is_empty() {
        errors.push(ValidationError::EmptyMappingPrefix);
    } else {
        let expected = format!("{}_", prefix);
        for entry in &config.mapping.entries {
            if !entry.name.starts_with(&expected) {
                errors.push(ValidationError::MappingNameMismatch {
                    name: entry.name.clone(),
                    prefix: prefix.clone(),
                });
            }
        }
    }

    let observability = &config.observability;
    if observability.metrics_enabled && observability.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::MetricsAddress(observability.metrics_address.clone()));
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
    use crate::config::schema::{MappingEntryConfig, RouteConfig};
    use crate::routing::key::Destination;

    fn route(key: &str, dest: &str) -> RouteConfig {
        RouteConfig {
            key: key.into(),
            destination: Destination::new(dest),
        }
    }

    #[test]
    fn test_valid_config() {
        let mut config = RouterConfig::default();
        config.routes.push(route("profile", "ProfileScreen"));
        config.mapping.entries.push(MappingEntryConfig {
            name: "RouterMapping_settings".into(),
            destination: Destination::new("SettingsScreen"),
        });
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RouterConfig::default();
        config.routes.push(route("", "X"));
        config.routes.push(route("profile", ""));
        config.routes.push(route("Profile", "ProfileScreen"));
        config.mapping.entries.push(MappingEntryConfig {
            name: "Other_settings".into(),
            destination: Destination::new("SettingsScreen"),
        });
        config.observability.metrics_enabled = true;
        config.observability.metrics_address = "nowhere".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::EmptyRouteKey { index: 0 },
                ValidationError::EmptyDestination { key: "profile".into() },
                ValidationError::DuplicateRouteKey {
                    first: "profile".into(),
                    second: "Profile".into(),
                },
                ValidationError::MappingNameMismatch {
                    name: "Other_settings".into(),
                    prefix: "RouterMapping".into(),
                },
                ValidationError::MetricsAddress("nowhere".into()),
            ]
        );
    }

    #[test]
    fn test_empty_prefix() {
        let mut config = RouterConfig::default();
        config.mapping.prefix.clear();
        assert_eq!(
            validate_config(&config).unwrap_err(),
            vec![ValidationError::EmptyMappingPrefix]
        );
    }
}
