//! Custom extractors that turn rejections into [`AppError`](crate::errors::AppError)s.

pub mod id_path;
pub mod validated_json;

pub use id_path::IdPath;
pub use validated_json::ValidatedJson;
