//! Environment configuration for different deployment stages

use std::env;
use std::time::Duration;

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion};
use photo_storage::queue::QueueConfig;

/// Application environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses `LocalStack`)
    Development,
}

impl Environment {
    /// Creates an Environment from the `APP_ENV` environment variable
    ///
    /// # Panics
    ///
    /// Panics if `APP_ENV` contains an invalid value
    #[must_use]
    pub fn from_env() -> Self {
        let env = env::var("APP_ENV")
            .unwrap_or_else(|_| "development".to_string())
            .trim()
            .to_lowercase();

        match env.as_str() {
            "production" => Self::Production,
            "staging" => Self::Staging,
            "development" => Self::Development,
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Returns the photo record table name
    ///
    /// # Panics
    ///
    /// Panics if the `PHOTO_TABLE_NAME` environment variable is not set in production/staging
    #[must_use]
    pub fn photo_table_name(&self) -> String {
        match self {
            Self::Production | Self::Staging => env::var("PHOTO_TABLE_NAME")
                .expect("PHOTO_TABLE_NAME environment variable is not set"),
            Self::Development => {
                env::var("PHOTO_TABLE_NAME").unwrap_or_else(|_| "photography-photos".to_string())
            }
        }
    }

    /// Returns the photo events queue configuration
    ///
    /// # Panics
    ///
    /// Panics if the `PHOTO_EVENTS_QUEUE_URL` environment variable is not set in production/staging
    #[must_use]
    pub fn photo_events_queue_config(&self) -> QueueConfig {
        let queue_url = match self {
            Self::Production | Self::Staging => env::var("PHOTO_EVENTS_QUEUE_URL")
                .expect("PHOTO_EVENTS_QUEUE_URL environment variable is not set"),
            Self::Development => env::var("PHOTO_EVENTS_QUEUE_URL").unwrap_or_else(|_| {
                "http://localhost:4566/000000000000/photography-photo-events".to_string()
            }),
        };

        QueueConfig {
            queue_url,
            default_max_messages: 10,
            default_visibility_timeout: 60,
            default_wait_time_seconds: 20, // Long polling
        }
    }

    /// Whether logs should be emitted as JSON
    #[must_use]
    pub const fn json_logs(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }

    /// Returns the endpoint URL to use for AWS services
    #[must_use]
    pub const fn override_aws_endpoint_url(&self) -> Option<&str> {
        match self {
            Self::Production | Self::Staging => None,
            Self::Development => Some("http://localhost:4566"),
        }
    }

    /// AWS configuration with retry and timeout settings
    pub async fn aws_config(&self) -> aws_config::SdkConfig {
        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_initial_backoff(Duration::from_millis(50));

        // Must exceed the long-poll wait time
        let timeout_config = TimeoutConfig::builder()
            .operation_timeout(Duration::from_secs(30))
            .build();

        let mut config_builder = aws_config::load_defaults(BehaviorVersion::latest())
            .await
            .to_builder()
            .retry_config(retry_config)
            .timeout_config(timeout_config);

        if let Some(endpoint_url) = self.override_aws_endpoint_url() {
            config_builder = config_builder.endpoint_url(endpoint_url);
        }

        config_builder.build()
    }
}
