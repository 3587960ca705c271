use std::sync::Arc;

use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_s3::Client as S3Client;
use backend::{
    photo_bucket::PhotoBucket,
    server,
    state::{SharedPhotoBucket, SharedPhotoRecords},
    types::Environment,
};
use photo_storage::photo_record::PhotoRecordStorage;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();

    // JSON for staging/production (Datadog), human readable for development
    if environment.json_logs() {
        fmt()
            .json()
            .with_env_filter(EnvFilter::from_default_env())
            .init();
    } else {
        fmt().with_env_filter(EnvFilter::from_default_env()).init();
    }

    let s3_client = Arc::new(S3Client::from_conf(environment.s3_client_config().await));
    let photo_bucket: SharedPhotoBucket =
        Arc::new(PhotoBucket::new(s3_client, environment.photo_bucket()));

    let dynamodb_client = Arc::new(DynamoDbClient::new(&environment.aws_config().await));
    let photo_records: SharedPhotoRecords = Arc::new(PhotoRecordStorage::new(
        dynamodb_client,
        environment.photo_table_name(),
    ));

    server::start(environment, photo_bucket, photo_records).await
}
