use std::sync::Arc;

use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_sqs::Client as SqsClient;
use datadog_tracing::axum::shutdown_signal;
use photo_storage::{photo_record::PhotoRecordStorage, queue::PhotoEventQueue};
use register_worker::{
    consumer::PhotoEventConsumer, health, registration::RegistrationHandler, types::Environment,
};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = Environment::from_env();

    if env.json_logs() {
        fmt()
            .json()
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    } else {
        fmt().with_env_filter(EnvFilter::from_default_env()).init();
    }

    info!("Starting Register Worker in {:?} environment", env);

    let aws_config = env.aws_config().await;

    let sqs_client = Arc::new(SqsClient::new(&aws_config));
    let queue = Arc::new(PhotoEventQueue::new(
        sqs_client,
        env.photo_events_queue_config(),
    ));

    info!("✅ Initialized photo events queue");

    let dynamodb_client = Arc::new(DynamoDbClient::new(&aws_config));
    let records = Arc::new(PhotoRecordStorage::new(
        dynamodb_client,
        env.photo_table_name(),
    ));

    info!("✅ Initialized photo record storage");

    // Single shutdown token for everything
    let shutdown_token = CancellationToken::new();
    let signal_token = shutdown_token.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("Shutting down Register Worker...");
        signal_token.cancel();
    });

    let consumer_handle = {
        let token = shutdown_token.clone();
        tokio::spawn(async move {
            PhotoEventConsumer::new(queue, RegistrationHandler::new(records), token)
                .start()
                .await;
        })
    };

    // Blocks until shutdown
    let server_result = health::start_health_server(shutdown_token.clone()).await;
    if let Err(e) = &server_result {
        error!("Health server error: {}", e);
        shutdown_token.cancel();
    }

    consumer_handle.await.ok();

    info!("✅ Register Worker shutdown complete");

    server_result
}
