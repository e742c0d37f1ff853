//! # Gatewayエンドポイント

pub mod confirm_upload;
pub mod upload_url;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use confirm_upload::handle_confirm_upload;
pub use upload_url::handle_upload_url;
