//! API configuration

use crate::logging::LogConfig;
use restdoc_validation::ValidatorConfig;
use serde::{Deserialize, Serialize};

/// Default request body limit (2 MiB)
pub const DEFAULT_BODY_LIMIT: usize = 2 * 1024 * 1024;

/// Configuration for the request validation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ApiConfig {
    /// Maximum request body size in bytes
    pub body_limit: usize,
    /// Validator behaviour
    pub validator: ValidatorConfig,
    /// Logging setup
    pub log: LogConfig,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            body_limit: DEFAULT_BODY_LIMIT,
            validator: ValidatorConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl ApiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the request body limit
    pub fn body_limit(mut self, limit: usize) -> Self {
        self.body_limit = limit;
        self
    }

    /// Set the validator configuration
    pub fn validator(mut self, validator: ValidatorConfig) -> Self {
        self.validator = validator;
        self
    }

    /// Set the logging configuration
    pub fn log(mut self, log: LogConfig) -> Self {
        self.log = log;
        self
    }
}
