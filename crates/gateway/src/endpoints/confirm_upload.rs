//! # POST /confirm-upload
//!
//! アップロード完了通知の受付。キー形式を検証して公開URLを返す。

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use presign_types::{ConfirmUploadRequest, ConfirmUploadResponse};

use crate::config::GatewayState;
use crate::error::{GatewayError, INVALID_KEY_FORMAT, MISSING_KEY_PARAM};
use crate::object_key;

/// POST /confirm-upload — キー形式検証 + 公開URL返却。
///
/// ストレージには問い合わせないため、オブジェクトが実在するかは確認しない。
/// 発行していないキーでも形式が一致すれば受理する。
pub async fn handle_confirm_upload(
    State(state): State<Arc<GatewayState>>,
    payload: Result<Json<ConfirmUploadRequest>, JsonRejection>,
) -> Result<Json<ConfirmUploadResponse>, GatewayError> {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "リクエストボディを解釈できません");
            ConfirmUploadRequest::default()
        }
    };

    let Some(key) = body.key.filter(|k| !k.is_empty()) else {
        return Err(GatewayError::Validation(MISSING_KEY_PARAM.to_string()));
    };

    if !object_key::is_valid_object_key(&key) {
        tracing::debug!(key = %key, "キー形式が不正");
        return Err(GatewayError::MalformedKey(INVALID_KEY_FORMAT.to_string()));
    }

    let bucket = state
        .config
        .bucket
        .as_deref()
        .ok_or_else(|| GatewayError::Internal {
            context: "Failed to confirm upload",
            details: "S3_BUCKET is not configured".to_string(),
        })?;

    let image_url = object_key::public_object_url(bucket, &state.config.public_domain, &key);
    tracing::info!(key = %key, image_url = %image_url, "アップロード完了を受理");

    Ok(Json(ConfirmUploadResponse {
        success: true,
        message: "Upload confirmed successfully".to_string(),
        image_url,
    }))
}
