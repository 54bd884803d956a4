use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_config::ConfigLoader;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use aws_types::region::Region;
use chrono::Utc;
use std::time::Duration;

use crate::errors::AppError;
use crate::models::file::StoredObject;

pub async fn create_s3_client() -> S3Client {
    let aws_config = ConfigLoader::default()
        .region(std::env::var("AWS_REGION").ok().map(Region::new))
        .behavior_version(BehaviorVersion::latest())
        .load()
        .await;

    S3Client::new(&aws_config)
}

/// Blob-side gateway. Every failure is terminal for the request, no retries.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<(), AppError>;

    /// Empty vec, not an error, when nothing matches the prefix.
    async fn list(&self, prefix: &str) -> Result<Vec<StoredObject>, AppError>;

    /// Does not check that the key exists; a URL for a missing key fails at
    /// access time.
    async fn presign(&self, key: &str, ttl: Duration) -> Result<String, AppError>;

    /// Idempotent, deleting a missing key succeeds.
    async fn delete(&self, key: &str) -> Result<(), AppError>;

    fn public_url(&self, key: &str) -> String;
}

pub struct S3ObjectStore {
    client: S3Client,
    bucket: String,
    region: String,
}

impl S3ObjectStore {
    pub fn new(client: S3Client, bucket: String, region: String) -> Self {
        S3ObjectStore {
            client,
            bucket,
            region,
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<(), AppError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|err| AppError::store("Failed to upload object", DisplayErrorContext(&err)))?;
        Ok(())
    }

    async fn list(&self, prefix: &str) -> Result<Vec<StoredObject>, AppError> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix)
            .send()
            .await
            .map_err(|err| AppError::store("Failed to list files", DisplayErrorContext(&err)))?;

        let objects = output
            .contents()
            .iter()
            .map(|object| StoredObject {
                key: object.key().unwrap_or_default().to_string(),
                size: object.size().unwrap_or(0),
                last_modified: object
                    .last_modified()
                    .and_then(|ts| chrono::DateTime::from_timestamp(ts.secs(), ts.subsec_nanos())),
            })
            .collect();
        Ok(objects)
    }

    async fn presign(&self, key: &str, ttl: Duration) -> Result<String, AppError> {
        let config = PresigningConfig::expires_in(ttl).map_err(|err| {
            AppError::store("Failed to generate download URL", err)
        })?;
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(config)
            .await
            .map_err(|err| {
                AppError::store("Failed to generate download URL", DisplayErrorContext(&err))
            })?;
        Ok(request.uri().to_string())
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| AppError::store("Failed to delete object", DisplayErrorContext(&err)))?;
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        public_object_url(&self.bucket, &self.region, key)
    }
}

pub fn public_object_url(bucket: &str, region: &str, key: &str) -> String {
    format!("https://{}.s3.{}.amazonaws.com/{}", bucket, region, key)
}

/// Derives a store key as `{prefix}/{epoch_millis}-{filename}`. Two uploads of
/// the same filename within the same millisecond would collide.
pub fn object_key(prefix: &str, filename: &str) -> String {
    format!("{}/{}-{}", prefix, Utc::now().timestamp_millis(), filename)
}
