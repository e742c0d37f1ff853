//! # POST /get-upload-url
//!
//! Upload Storageへの署名付きアップロードURL発行。

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use presign_types::{UploadUrlRequest, UploadUrlResponse, PRESIGN_EXPIRY_SECS};

use crate::config::GatewayState;
use crate::error::{GatewayError, MISSING_UPLOAD_PARAMS};
use crate::object_key;

/// POST /get-upload-url — 署名付きURL発行。
///
/// ファイル名をサニタイズして一意なオブジェクトキーを生成し、
/// そのキーへのPUT用署名付きURL（有効期限3600秒）を返す。
/// ファイル本体は扱わず、オブジェクトもまだ作成されない。
pub async fn handle_upload_url(
    State(state): State<Arc<GatewayState>>,
    payload: Result<Json<UploadUrlRequest>, JsonRejection>,
) -> Result<Json<UploadUrlResponse>, GatewayError> {
    // JSONとして読めないボディはパラメータ欠落と同じ扱い
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => {
            tracing::debug!(error = %rejection, "リクエストボディを解釈できません");
            UploadUrlRequest::default()
        }
    };

    let (Some(filename), Some(filetype)) = (non_empty(body.filename), non_empty(body.filetype))
    else {
        tracing::debug!("filenameまたはfiletypeが未指定");
        return Err(GatewayError::Validation(MISSING_UPLOAD_PARAMS.to_string()));
    };

    let key = object_key::generate_object_key(&filename).map_err(|e| GatewayError::Internal {
        context: "Failed to generate upload URL",
        details: format!("system clock error: {e}"),
    })?;

    let upload = state
        .storage
        .presign_upload(&key, &filetype, PRESIGN_EXPIRY_SECS)
        .await
        .inspect_err(|e| {
            tracing::error!(key = %key, error = ?e, "署名付きURLの発行に失敗しました");
        })?;

    tracing::info!(
        key = %key,
        bucket = %upload.bucket,
        filetype = %filetype,
        "署名付きアップロードURLを発行"
    );

    Ok(Json(UploadUrlResponse {
        url: upload.url,
        key,
        bucket: upload.bucket,
    }))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
