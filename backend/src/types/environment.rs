//! Environment configuration for different deployment stages

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use aws_config::{retry::RetryConfig, timeout::TimeoutConfig, BehaviorVersion};

/// Default request body limit: API Gateway's 10 MiB payload ceiling
const DEFAULT_MAX_UPLOAD_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Application environment configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    /// Production environment
    Production,
    /// Staging environment
    Staging,
    /// Development environment (uses `LocalStack`)
    Development {
        /// Static site directory, taking precedence over `WEB_ROOT`
        web_root_override: Option<PathBuf>,
        /// Request body limit, taking precedence over `MAX_UPLOAD_BODY_BYTES`
        body_limit_override: Option<usize>,
    },
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
            "development" => Self::development(),
            _ => panic!("Invalid environment: {env}"),
        }
    }

    /// Development environment without overrides
    #[must_use]
    pub const fn development() -> Self {
        Self::Development {
            web_root_override: None,
            body_limit_override: None,
        }
    }

    /// Returns the photo bucket name for the environment
    ///
    /// # Panics
    ///
    /// Panics if the `PHOTO_BUCKET_NAME` environment variable is not set in production/staging
    #[must_use]
    pub fn photo_bucket(&self) -> String {
        match self {
            Self::Production | Self::Staging => env::var("PHOTO_BUCKET_NAME")
                .expect("PHOTO_BUCKET_NAME environment variable is not set"),
            Self::Development { .. } => env::var("PHOTO_BUCKET_NAME")
                .unwrap_or_else(|_| "photography-photo-bucket".to_string()),
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
            Self::Development { .. } => {
                env::var("PHOTO_TABLE_NAME").unwrap_or_else(|_| "photography-photos".to_string())
            }
        }
    }

    /// Directory holding the static gallery site
    #[must_use]
    pub fn web_root(&self) -> PathBuf {
        if let Self::Development {
            web_root_override: Some(path),
            ..
        } = self
        {
            return path.clone();
        }
        env::var("WEB_ROOT").map_or_else(|_| PathBuf::from("web"), PathBuf::from)
    }

    /// Maximum accepted request body size in bytes
    #[must_use]
    pub fn max_upload_body_bytes(&self) -> usize {
        if let Self::Development {
            body_limit_override: Some(limit),
            ..
        } = self
        {
            return *limit;
        }
        env::var("MAX_UPLOAD_BODY_BYTES")
            .ok()
            .and_then(|val| val.parse().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD_BODY_BYTES)
    }

    /// Whether to show API docs
    #[must_use]
    pub const fn show_api_docs(&self) -> bool {
        matches!(self, Self::Development { .. } | Self::Staging)
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
            // Regular AWS endpoints for production and staging
            Self::Production | Self::Staging => None,
            // LocalStack endpoint for development
            Self::Development { .. } => Some("http://localhost:4566"),
        }
    }

    /// AWS configuration with retry and timeout settings
    pub async fn aws_config(&self) -> aws_config::SdkConfig {
        let retry_config = RetryConfig::standard()
            .with_max_attempts(3)
            .with_initial_backoff(Duration::from_millis(50));

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

    /// AWS S3 service configuration
    pub async fn s3_client_config(&self) -> aws_sdk_s3::Config {
        let aws_config = self.aws_config().await;
        let s3_config: aws_sdk_s3::Config = (&aws_config).into();
        let mut builder = s3_config.to_builder();

        // Override "force path style" to true for compatibility with LocalStack
        // https://github.com/awslabs/aws-sdk-rust/discussions/874
        if matches!(self, Self::Development { .. }) {
            builder.set_force_path_style(Some(true));
        }

        builder.build()
    }
}
