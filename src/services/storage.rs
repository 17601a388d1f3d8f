use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    /// The provider rejected the request and said why.
    #[error("{0}")]
    Provider(String),

    /// The request failed without a provider message (transport, timeout, ...).
    #[error("storage request failed")]
    Unspecified,
}

impl StorageError {
    /// Provider message if there is one, otherwise the caller's fallback.
    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            StorageError::Provider(msg) => msg,
            StorageError::Unspecified => fallback,
        }
    }
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[async_trait]
pub trait StorageService: Send + Sync {
    /// Mints a time-limited GET URL for `key`.
    async fn generate_signed_url(&self, key: &str, expires_in_secs: u64) -> StorageResult<String>;
    async fn upload_file(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<()>;
    async fn delete_file(&self, key: &str) -> StorageResult<()>;
    async fn file_exists(&self, key: &str) -> StorageResult<bool>;
}

pub struct S3StorageService {
    client: Client,
    bucket: String,
}

impl S3StorageService {
    pub fn new(client: Client, bucket: String) -> Self {
        Self { client, bucket }
    }
}

fn provider_error<E>(operation: &str, key: &str, err: SdkError<E>) -> StorageError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    tracing::error!(
        "S3 {} failed: key={}, error={}",
        operation,
        key,
        DisplayErrorContext(&err)
    );

    match err.as_service_error().and_then(|e| e.message()) {
        Some(msg) => StorageError::Provider(msg.to_string()),
        None => StorageError::Unspecified,
    }
}

#[async_trait]
impl StorageService for S3StorageService {
    async fn generate_signed_url(&self, key: &str, expires_in_secs: u64) -> StorageResult<String> {
        let presigning = PresigningConfig::expires_in(Duration::from_secs(expires_in_secs))
            .map_err(|e| StorageError::Provider(e.to_string()))?;

        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| provider_error("presign get_object", key, e))?;

        Ok(request.uri().to_string())
    }

    async fn upload_file(&self, key: &str, data: Vec<u8>, content_type: &str) -> StorageResult<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(data))
            .send()
            .await
            .map_err(|e| provider_error("put_object", key, e))?;
        Ok(())
    }

    async fn delete_file(&self, key: &str) -> StorageResult<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| provider_error("delete_object", key, e))?;
        Ok(())
    }

    async fn file_exists(&self, key: &str) -> StorageResult<bool> {
        let res = self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await;

        match res {
            Ok(_) => Ok(true),
            Err(e) => {
                if e.as_service_error().is_some_and(|se| se.is_not_found()) {
                    Ok(false)
                } else {
                    Err(provider_error("head_object", key, e))
                }
            }
        }
    }
}
