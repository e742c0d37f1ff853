//! # Gateway エラー型
//!
//! 全エンドポイントで共通のエラー型。
//! ステータスコードとJSONエラーボディへの変換をここで一元化する。

use axum::http::{header, StatusCode};
use axum::Json;
use presign_types::ErrorResponse;

/// /get-upload-url のパラメータ欠落時メッセージ
pub const MISSING_UPLOAD_PARAMS: &str = "Missing required parameters: filename and filetype";
/// /confirm-upload のパラメータ欠落時メッセージ
pub const MISSING_KEY_PARAM: &str = "Missing required parameter: key";
/// オブジェクトキーの形式不正時メッセージ
pub const INVALID_KEY_FORMAT: &str = "Invalid key format";

/// Gatewayエラー型。
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// 必須パラメータの欠落・不正入力
    #[error("{0}")]
    Validation(String),
    /// オブジェクトキーが `uploads/<数字>-<識別子>-<名前>` 形式でない
    #[error("{0}")]
    MalformedKey(String),
    /// ストレージクライアント未構成、または署名付きURL生成失敗
    #[error("Failed to generate upload URL")]
    BackendUnavailable(String),
    /// 内部エラー（時刻取得失敗、設定欠落等）
    #[error("{context}")]
    Internal {
        context: &'static str,
        details: String,
    },
}

impl GatewayError {
    /// HTTPステータスコード。
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) | GatewayError::MalformedKey(_) => StatusCode::BAD_REQUEST,
            GatewayError::BackendUnavailable(_) | GatewayError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// クライアントへ返す診断情報。400系では返さない。
    fn details(&self) -> Option<String> {
        match self {
            GatewayError::BackendUnavailable(details) | GatewayError::Internal { details, .. } => {
                Some(details.clone())
            }
            GatewayError::Validation(_) | GatewayError::MalformedKey(_) => None,
        }
    }
}

impl axum::response::IntoResponse for GatewayError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
            details: self.details(),
        };
        // エラーレスポンスはキャッシュに保存させない
        (status, [(header::CACHE_CONTROL, "no-store")], Json(body)).into_response()
    }
}
