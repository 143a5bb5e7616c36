mod client;
mod error;

pub use client::{ApiClient, MediaUpload};
pub use error::{ApiError, ApiResult};
