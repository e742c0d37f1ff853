//! # Presign Upload Gateway
//!
//! ブラウザからS3互換ストレージへ直接アップロードさせるためのGateway。
//! ファイル本体はGatewayを経由しない。
//!
//! ## API エンドポイント
//! - `POST /get-upload-url` — 署名付きアップロードURL発行
//! - `POST /confirm-upload` — キー形式検証 + 公開URL返却
//! - `OPTIONS` — CORSプリフライト
//!
//! ## 環境変数
//! - `S3_ACCESS_KEY` / `S3_SECRET_KEY` / `S3_REGION` / `S3_BUCKET`
//! - `S3_ENDPOINT` — S3互換ストレージのエンドポイント（任意）
//! - `S3_PUBLIC_DOMAIN` — 公開URLのドメイン（デフォルト: `s3.amazonaws.com`）
//! - `CORS_ALLOWED_ORIGIN` — CORS許可オリジン（デフォルト: `*`）
//! - `GATEWAY_ADDR` — 待ち受けアドレス（デフォルト: `0.0.0.0:3000`）

mod config;
mod endpoints;
mod error;
mod object_key;
mod router;
mod storage;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::{GatewayConfig, GatewayState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = GatewayConfig::from_env();
    let addr = config.listen_addr.clone();

    if config.is_storage_configured() {
        tracing::info!(
            bucket = config.bucket.as_deref().unwrap_or_default(),
            region = config.region.as_deref().unwrap_or_default(),
            "S3設定を読み込みました"
        );
    }

    // ストレージクライアントは起動時に一度だけ構築し、全リクエストで共有する
    let state = Arc::new(GatewayState::from_config(config));
    let app = router::build_router(state)?;

    tracing::info!("Gatewayを {} で起動します", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
