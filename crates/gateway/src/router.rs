//! # ルーター構築
//!
//! エンドポイントの登録と、全レスポンス共通のCORS・キャッシュ制御ヘッダ。

use std::sync::Arc;

use axum::http::{header, HeaderValue, Method};
use axum::response::Response;
use axum::routing::post;
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::GatewayState;
use crate::endpoints::{handle_confirm_upload, handle_upload_url};

/// 成功レスポンスのCache-Control。共有キャッシュには保存させない。
const SUCCESS_CACHE_CONTROL: &str = "private, no-cache";
/// エラーレスポンスのCache-Control。
const ERROR_CACHE_CONTROL: &str = "no-store";

/// Gatewayのルーターを構築する。
///
/// OPTIONSプリフライトはCORSレイヤーが空ボディで応答する。
/// 404/405等のフレームワーク由来のエラーにも `no-store` を付与する。
pub fn build_router(state: Arc<GatewayState>) -> anyhow::Result<Router> {
    let cors = cors_layer(&state.config.cors_allowed_origin)?;

    let app = Router::new()
        .route("/get-upload-url", post(handle_upload_url))
        .route("/confirm-upload", post(handle_confirm_upload))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            cache_control_for,
        ))
        .layer(cors)
        .with_state(state);

    Ok(app)
}

/// ステータスに応じたCache-Control。`GatewayError` が付与済みの値は上書きしない。
fn cache_control_for(response: &Response) -> Option<HeaderValue> {
    let value = if response.status().is_success() {
        SUCCESS_CACHE_CONTROL
    } else {
        ERROR_CACHE_CONTROL
    };
    Some(HeaderValue::from_static(value))
}

/// CORS設定。`*` の場合は全オリジン許可。
fn cors_layer(allowed_origin: &str) -> anyhow::Result<CorsLayer> {
    let allow_origin = if allowed_origin == "*" {
        AllowOrigin::any()
    } else {
        let origin: HeaderValue = allowed_origin.parse().map_err(|e| {
            anyhow::anyhow!("CORS_ALLOWED_ORIGINが不正です ({allowed_origin}): {e}")
        })?;
        AllowOrigin::exact(origin)
    };

    Ok(CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]))
}
