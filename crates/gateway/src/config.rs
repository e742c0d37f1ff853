//! # Gateway設定・共有状態
//!
//! 環境変数からの設定読み込みとGatewayの共有状態の定義。

use crate::storage::{self, UploadStorage};

/// 公開URLのデフォルトドメイン
pub const DEFAULT_PUBLIC_DOMAIN: &str = "s3.amazonaws.com";
/// デフォルトの待ち受けアドレス
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";
/// デフォルトのCORS許可オリジン（全オリジン許可）
pub const DEFAULT_CORS_ORIGIN: &str = "*";

/// 環境変数から読み込むGateway設定。
/// 空文字列の環境変数は未設定として扱う。
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// S3アクセスキー（S3_ACCESS_KEY）
    pub access_key: Option<String>,
    /// S3シークレットキー（S3_SECRET_KEY）
    pub secret_key: Option<String>,
    /// S3リージョン（S3_REGION）
    pub region: Option<String>,
    /// バケット名（S3_BUCKET）
    pub bucket: Option<String>,
    /// S3互換カスタムエンドポイント（S3_ENDPOINT）。MinIO, R2等
    pub endpoint: Option<String>,
    /// 公開URLのドメイン（S3_PUBLIC_DOMAIN）
    pub public_domain: String,
    /// CORS許可オリジン（CORS_ALLOWED_ORIGIN）
    pub cors_allowed_origin: String,
    /// 待ち受けアドレス（GATEWAY_ADDR）
    pub listen_addr: String,
}

impl GatewayConfig {
    /// プロセス環境変数から構築する。
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 任意の参照関数から構築する。テストでは環境変数を汚さずに設定を差し込む。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        Self {
            access_key: get("S3_ACCESS_KEY"),
            secret_key: get("S3_SECRET_KEY"),
            region: get("S3_REGION"),
            bucket: get("S3_BUCKET"),
            endpoint: get("S3_ENDPOINT"),
            public_domain: get("S3_PUBLIC_DOMAIN")
                .unwrap_or_else(|| DEFAULT_PUBLIC_DOMAIN.to_string()),
            cors_allowed_origin: get("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
            listen_addr: get("GATEWAY_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string()),
        }
    }

    /// /get-upload-url に必要で未設定の環境変数名。
    pub fn missing_storage_settings(&self) -> Vec<&'static str> {
        [
            ("S3_ACCESS_KEY", &self.access_key),
            ("S3_SECRET_KEY", &self.secret_key),
            ("S3_REGION", &self.region),
            ("S3_BUCKET", &self.bucket),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn is_storage_configured(&self) -> bool {
        self.missing_storage_settings().is_empty()
    }
}

/// Gatewayの共有状態。
/// 起動時に一度だけ構築し、`Arc` で全リクエストから参照する。
pub struct GatewayState {
    pub config: GatewayConfig,
    /// Upload Storage（S3互換等、トレイトで抽象化）
    pub storage: Box<dyn UploadStorage>,
}

impl GatewayState {
    /// 設定からストレージクライアントを含めて構築する。
    pub fn from_config(config: GatewayConfig) -> Self {
        let storage = storage::storage_from_config(&config);
        Self { config, storage }
    }
}
