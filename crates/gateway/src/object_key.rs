//! # オブジェクトキー
//!
//! アップロード先オブジェクトキーの生成・形式検証と公開URLの組み立て。
//!
//! キー形式: `uploads/<UNIXミリ秒>-<UUID v4>-<サニタイズ済みファイル名>`

use std::sync::LazyLock;
use std::time::{SystemTime, SystemTimeError, UNIX_EPOCH};

use presign_types::UPLOAD_KEY_PREFIX;
use regex::Regex;

/// /confirm-upload が受け付けるキー形式。
/// 識別子部分はスラッシュと空白を含まない。UUIDであることまでは検証しない。
static OBJECT_KEY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^uploads/[0-9]+-[^/\s]+-.*$").expect("OBJECT_KEY_PATTERNは有効な正規表現")
});

/// `[A-Za-z0-9_.-]` 以外の文字を `_` に置換する。
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// タイムスタンプと識別子からオブジェクトキーを組み立てる。
pub fn build_object_key(timestamp_ms: u128, id: uuid::Uuid, filename: &str) -> String {
    format!(
        "{UPLOAD_KEY_PREFIX}{timestamp_ms}-{id}-{}",
        sanitize_filename(filename)
    )
}

/// 現在時刻とランダムUUIDで一意なオブジェクトキーを生成する。
pub fn generate_object_key(filename: &str) -> Result<String, SystemTimeError> {
    let timestamp_ms = SystemTime::now().duration_since(UNIX_EPOCH)?.as_millis();
    Ok(build_object_key(timestamp_ms, uuid::Uuid::new_v4(), filename))
}

/// キーが発行形式に一致するか。形状のみを見て、ストレージ上の存在は確認しない。
pub fn is_valid_object_key(key: &str) -> bool {
    OBJECT_KEY_PATTERN.is_match(key)
}

/// 公開URL `https://<bucket>.<domain>/<key>` を組み立てる。
pub fn public_object_url(bucket: &str, domain: &str, key: &str) -> String {
    format!("https://{bucket}.{domain}/{key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("my photo.png"), "my_photo.png");
        assert_eq!(sanitize_filename("file-name_123.jpg"), "file-name_123.jpg");
        assert_eq!(sanitize_filename("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_filename("写真.jpg"), "__.jpg");
        assert_eq!(sanitize_filename(""), "");
    }

    #[test]
    fn test_build_object_key() {
        let id = uuid::Uuid::nil();
        assert_eq!(
            build_object_key(1700000000000, id, "a b.png"),
            "uploads/1700000000000-00000000-0000-0000-0000-000000000000-a_b.png"
        );
    }

    #[test]
    fn test_generated_keys_are_unique_and_valid() {
        let a = generate_object_key("same.png").unwrap();
        let b = generate_object_key("same.png").unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("uploads/"));
        assert!(is_valid_object_key(&a));
        assert!(is_valid_object_key(&b));
    }

    #[test]
    fn test_generated_key_filename_segment_is_restricted() {
        let key = generate_object_key("résumé <final>?.pdf").unwrap();
        let filename = key.rsplit('-').next().unwrap();
        assert!(filename
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')));
        assert!(key.ends_with("-r_sum___final__.pdf"));
    }

    #[test]
    fn test_key_pattern_accepts_issued_shape() {
        assert!(is_valid_object_key("uploads/1700000000000-abc-photo.png"));
        // 識別子がUUIDである必要はない
        assert!(is_valid_object_key("uploads/1-x-"));
        assert!(is_valid_object_key(
            "uploads/1700000000000-0f0e-4c2a-photo-with-dashes.png"
        ));
    }

    #[test]
    fn test_key_pattern_rejects_malformed() {
        assert!(!is_valid_object_key(""));
        assert!(!is_valid_object_key("photo.png"));
        assert!(!is_valid_object_key("images/1700000000000-abc-photo.png"));
        assert!(!is_valid_object_key("uploads/abc-def-photo.png"));
        assert!(!is_valid_object_key("uploads/123-photo.png"));
        assert!(!is_valid_object_key("uploads/123-a b-photo.png"));
        assert!(!is_valid_object_key("uploads/123-a/b-photo.png"));
        assert!(!is_valid_object_key("/uploads/123-abc-photo.png"));
    }

    #[test]
    fn test_public_object_url() {
        assert_eq!(
            public_object_url("my-bucket", "s3.amazonaws.com", "uploads/1-abc-x.png"),
            "https://my-bucket.s3.amazonaws.com/uploads/1-abc-x.png"
        );
    }
}
