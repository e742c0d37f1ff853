//! # Presign Upload 共有型定義
//!
//! Gatewayの2つのエンドポイントが扱うリクエスト/レスポンスをRust構造体として提供する。
//!
//! ## フィールド名の規則
//! - ワイヤ上のフィールド名はブラウザ側ウィジェットに合わせる（`imageUrl` のみcamelCase）
//! - 必須パラメータも `Option` で受け、欠落をGateway側の400エラーとして扱う

use serde::{Deserialize, Serialize};

/// オブジェクトキーの固定プレフィックス。
pub const UPLOAD_KEY_PREFIX: &str = "uploads/";

/// 署名付きURLの有効期限（秒）。期限の強制はストレージ側が行う。
pub const PRESIGN_EXPIRY_SECS: u32 = 3600;

// ---------------------------------------------------------------------------
// POST /get-upload-url
// ---------------------------------------------------------------------------

/// /get-upload-url リクエスト。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadUrlRequest {
    /// クライアント上の元ファイル名（サニタイズ前）
    #[serde(default)]
    pub filename: Option<String>,
    /// コンテンツのMIMEタイプ
    #[serde(default)]
    pub filetype: Option<String>,
}

/// /get-upload-url レスポンス。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadUrlResponse {
    /// 署名付きアップロードURL（PUT）
    pub url: String,
    /// 発行したオブジェクトキー
    pub key: String,
    /// アップロード先バケット名
    pub bucket: String,
}

// ---------------------------------------------------------------------------
// POST /confirm-upload
// ---------------------------------------------------------------------------

/// /confirm-upload リクエスト。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfirmUploadRequest {
    /// /get-upload-url で発行されたオブジェクトキー
    #[serde(default)]
    pub key: Option<String>,
}

/// /confirm-upload レスポンス。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmUploadResponse {
    pub success: bool,
    pub message: String,
    /// 公開URL（`https://<bucket>.<domain>/<key>`）
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

// ---------------------------------------------------------------------------
// エラー
// ---------------------------------------------------------------------------

/// 全エンドポイント共通のエラーボディ。
/// 400系は `error` のみ、500系は `details` に診断情報を含める。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
