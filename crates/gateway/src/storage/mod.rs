//! # Upload Storage
//!
//! 署名付きアップロードURLを発行するストレージの抽象インターフェース。
//! S3互換ストレージ実装は `s3` サブモジュールを参照。

#[cfg(feature = "vendor-aws")]
pub mod s3;

#[cfg(feature = "vendor-aws")]
pub use self::s3::S3UploadStorage;

use crate::config::GatewayConfig;
use crate::error::GatewayError;

/// 署名付きアップロードURLの発行結果。
pub struct PresignedUpload {
    /// クライアントがPUTに使用するURL
    pub url: String,
    /// 発行先バケット名
    pub bucket: String,
}

/// Upload Storageの抽象インターフェース。
///
/// 実装はプロセス起動時に一度だけ構築され、以後変更されない。
/// S3互換ストレージ（AWS S3, MinIO, Cloudflare R2等）を想定する。
#[async_trait::async_trait]
pub trait UploadStorage: Send + Sync {
    /// `object_key` へのPUT用署名付きURLを発行する。
    ///
    /// `content_type` は署名対象ヘッダに含まれ、クライアントは同じ
    /// `Content-Type` でアップロードする必要がある。
    /// バイト列の転送もオブジェクトの作成も行わない。
    async fn presign_upload(
        &self,
        object_key: &str,
        content_type: &str,
        expiry_secs: u32,
    ) -> Result<PresignedUpload, GatewayError>;
}

/// ストレージクライアントを構築できなかった場合の実装。
/// 全呼び出しを構築失敗の理由付きで `BackendUnavailable` として返す。
pub struct UnavailableStorage {
    reason: String,
}

impl UnavailableStorage {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait::async_trait]
impl UploadStorage for UnavailableStorage {
    async fn presign_upload(
        &self,
        _object_key: &str,
        _content_type: &str,
        _expiry_secs: u32,
    ) -> Result<PresignedUpload, GatewayError> {
        Err(GatewayError::BackendUnavailable(self.reason.clone()))
    }
}

/// 設定からUpload Storageを構築する。
///
/// 認証情報・リージョン・バケットのいずれかが欠けている場合、
/// またはクライアント構築に失敗した場合は `UnavailableStorage` を返す。
/// Gateway自体は起動を継続し、/confirm-upload は引き続き利用できる。
pub fn storage_from_config(config: &GatewayConfig) -> Box<dyn UploadStorage> {
    let missing = config.missing_storage_settings();
    if !missing.is_empty() {
        let reason = format!("S3 client is not configured: missing {}", missing.join(", "));
        tracing::warn!(missing = ?missing, "S3設定が不足しています。/get-upload-url は常にエラーを返します");
        return Box::new(UnavailableStorage::new(reason));
    }

    build_storage(config)
}

#[cfg(feature = "vendor-aws")]
fn build_storage(config: &GatewayConfig) -> Box<dyn UploadStorage> {
    match S3UploadStorage::from_config(config) {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            tracing::error!(error = %e, "S3クライアントの構築に失敗しました");
            Box::new(UnavailableStorage::new(format!(
                "S3 client could not be constructed: {e}"
            )))
        }
    }
}

#[cfg(not(feature = "vendor-aws"))]
fn build_storage(_config: &GatewayConfig) -> Box<dyn UploadStorage> {
    tracing::warn!("vendor-awsフィーチャーが無効です。/get-upload-url は常にエラーを返します");
    Box::new(UnavailableStorage::new(
        "no storage backend compiled in (enable the vendor-aws feature)",
    ))
}
