//! # S3互換 Upload Storage 実装
//!
//! AWS S3, MinIO, Cloudflare R2 等のS3互換APIを使用する
//! Upload Storage実装。署名はローカルで行い、ストレージへの通信は発生しない。

// rust-s3 0.35はhttp 0.2のHeaderMapを受け取る（axumのhttp 1.xとは別型）
use http_s3::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

use super::{PresignedUpload, UploadStorage};
use crate::config::GatewayConfig;
use crate::error::GatewayError;

/// S3互換ストレージによるUpload Storage実装。
pub struct S3UploadStorage {
    bucket: s3::Bucket,
}

impl S3UploadStorage {
    /// S3互換バケットからUploadStorageを構築する。
    pub fn new(bucket: s3::Bucket) -> Self {
        Self { bucket }
    }

    /// S3互換バケットを初期化する。
    ///
    /// `endpoint` 指定時はカスタムエンドポイント + パススタイル、
    /// 未指定時はリージョン名からAWS標準エンドポイントを使用する。
    fn init_bucket(
        region: &str,
        endpoint: Option<&str>,
        access_key: &str,
        secret_key: &str,
        bucket_name: &str,
    ) -> anyhow::Result<s3::Bucket> {
        let s3_region = match endpoint {
            Some(endpoint) => s3::Region::Custom {
                region: region.to_string(),
                endpoint: endpoint.to_string(),
            },
            None => match region.parse::<s3::Region>()? {
                // 未知のリージョン名はCustomとして解釈され、到達不能なURLになる
                s3::Region::Custom { .. } => anyhow::bail!(
                    "unknown AWS region '{region}' (set S3_ENDPOINT for S3-compatible storage)"
                ),
                known => known,
            },
        };

        let credentials = s3::creds::Credentials::new(
            Some(access_key),
            Some(secret_key),
            None,
            None,
            None,
        )?;

        let mut bucket = s3::Bucket::new(bucket_name, s3_region, credentials)?;
        if endpoint.is_some() {
            bucket = bucket.with_path_style();
        }

        Ok(*bucket)
    }

    /// Gateway設定から構築する。
    pub fn from_config(config: &GatewayConfig) -> anyhow::Result<Self> {
        let (Some(access_key), Some(secret_key), Some(region), Some(bucket_name)) = (
            config.access_key.as_deref(),
            config.secret_key.as_deref(),
            config.region.as_deref(),
            config.bucket.as_deref(),
        ) else {
            anyhow::bail!(
                "S3設定が不足しています: {}",
                config.missing_storage_settings().join(", ")
            );
        };

        if let Some(endpoint) = &config.endpoint {
            tracing::info!(s3_endpoint = %endpoint, "カスタムS3エンドポイントを設定");
        }

        let bucket = Self::init_bucket(
            region,
            config.endpoint.as_deref(),
            access_key,
            secret_key,
            bucket_name,
        )?;

        Ok(Self::new(bucket))
    }
}

#[async_trait::async_trait]
impl UploadStorage for S3UploadStorage {
    async fn presign_upload(
        &self,
        object_key: &str,
        content_type: &str,
        expiry_secs: u32,
    ) -> Result<PresignedUpload, GatewayError> {
        let content_type = HeaderValue::from_str(content_type).map_err(|_| {
            GatewayError::Validation(format!("Invalid filetype: {content_type}"))
        })?;
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, content_type);

        let url = self
            .bucket
            .presign_put(object_key, expiry_secs, Some(headers), None)
            .await
            .map_err(|e| GatewayError::BackendUnavailable(format!("presign failed: {e}")))?;

        Ok(PresignedUpload {
            url,
            bucket: self.bucket.name(),
        })
    }
}
