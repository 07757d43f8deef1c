//! S3 object store built on the official AWS SDK.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::types::{Delete, ObjectIdentifier};
use tracing::{debug, info};

use drive_core::config::storage::StorageConfig;
use drive_core::error::{AppError, ErrorKind};
use drive_core::result::AppResult;
use drive_core::traits::storage::ObjectStore;

/// Object store backed by S3 or an S3-compatible provider.
#[derive(Debug, Clone)]
pub struct S3ObjectStore {
    client: Client,
    bucket: String,
}

impl S3ObjectStore {
    /// Create a store from configuration. Credentials come from the
    /// standard AWS provider chain; a custom endpoint switches the client
    /// to path-style addressing for S3-compatible providers.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let base = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()))
            .load()
            .await;

        let client = if let Some(ref endpoint) = config.endpoint_url {
            let s3_config = aws_sdk_s3::config::Builder::from(&base)
                .endpoint_url(endpoint)
                .force_path_style(true)
                .build();
            Client::from_conf(s3_config)
        } else {
            Client::new(&base)
        };

        info!(
            bucket = %config.bucket,
            region = %config.region,
            endpoint = config.endpoint_url.as_deref().unwrap_or("aws"),
            "Initialized S3 object store"
        );

        Ok(Self {
            client,
            bucket: config.bucket.clone(),
        })
    }

    fn presigning_config(expires_in: Duration) -> AppResult<PresigningConfig> {
        PresigningConfig::builder()
            .expires_in(expires_in)
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Invalid presigning configuration", e)
            })
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn presign_upload(
        &self,
        key: &str,
        content_length: i64,
        expires_in: Duration,
    ) -> AppResult<String> {
        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_length(content_length)
            .presigned(Self::presigning_config(expires_in)?)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to presign upload", e)
            })?;

        debug!(key, content_length, "Presigned upload URL");
        Ok(request.uri().to_string())
    }

    async fn presign_download(
        &self,
        key: &str,
        download_name: &str,
        expires_in: Duration,
    ) -> AppResult<String> {
        // Quotes would break the header's quoted-string form.
        let safe_name = download_name.replace('"', "");
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .response_content_disposition(format!("attachment; filename=\"{safe_name}\""))
            .presigned(Self::presigning_config(expires_in)?)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to presign download", e)
            })?;

        debug!(key, "Presigned download URL");
        Ok(request.uri().to_string())
    }

    async fn delete_batch(&self, keys: &[String]) -> AppResult<()> {
        if keys.is_empty() {
            return Ok(());
        }

        let objects = keys
            .iter()
            .map(|key| {
                ObjectIdentifier::builder().key(key).build().map_err(|e| {
                    AppError::with_source(ErrorKind::Storage, "Invalid object key", e)
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        let delete = Delete::builder()
            .set_objects(Some(objects))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Invalid delete batch", e)
            })?;

        self.client
            .delete_objects()
            .bucket(&self.bucket)
            .delete(delete)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to delete objects", e)
            })?;

        info!(count = keys.len(), "Deleted object batch");
        Ok(())
    }
}
