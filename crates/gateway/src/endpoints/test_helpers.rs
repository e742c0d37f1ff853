//! # エンドポイントテスト用共通ヘルパー
//!
//! upload_url, confirm_upload, routerテストで共有するモックストレージと状態。

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::config::{GatewayConfig, GatewayState};
use crate::error::GatewayError;
use crate::storage::{PresignedUpload, UnavailableStorage, UploadStorage};

/// テスト用のモックUploadStorage。
/// S3への接続なしで署名付きURLのダミーを返し、呼び出し回数を記録する。
#[derive(Default)]
pub struct MockUploadStorage {
    pub calls: Arc<AtomicUsize>,
}

#[async_trait::async_trait]
impl UploadStorage for MockUploadStorage {
    async fn presign_upload(
        &self,
        object_key: &str,
        content_type: &str,
        expiry_secs: u32,
    ) -> Result<PresignedUpload, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(PresignedUpload {
            url: format!(
                "http://mock-storage/test-bucket/{object_key}?content-type={content_type}&expires={expiry_secs}"
            ),
            bucket: "test-bucket".to_string(),
        })
    }
}

/// テスト用設定（バケット "test-bucket"、デフォルトドメイン）
pub fn test_config() -> GatewayConfig {
    GatewayConfig::from_lookup(|name| match name {
        "S3_ACCESS_KEY" => Some("AKIAEXAMPLE".to_string()),
        "S3_SECRET_KEY" => Some("secret".to_string()),
        "S3_REGION" => Some("us-east-1".to_string()),
        "S3_BUCKET" => Some("test-bucket".to_string()),
        _ => None,
    })
}

/// モックストレージ付きのGatewayStateと、その呼び出しカウンタを返す。
pub fn test_state() -> (Arc<GatewayState>, Arc<AtomicUsize>) {
    let storage = MockUploadStorage::default();
    let calls = storage.calls.clone();
    let state = Arc::new(GatewayState {
        config: test_config(),
        storage: Box::new(storage),
    });
    (state, calls)
}

/// ストレージが構築できなかった状態のGatewayState。
pub fn unavailable_state(config: GatewayConfig) -> Arc<GatewayState> {
    Arc::new(GatewayState {
        config,
        storage: Box::new(UnavailableStorage::new("S3 client is not configured")),
    })
}

/// ルーターを127.0.0.1の空きポートで起動し、ベースURLを返す。
pub async fn start_gateway(state: Arc<GatewayState>) -> String {
    let app = crate::router::build_router(state).unwrap();

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://127.0.0.1:{port}")
}
