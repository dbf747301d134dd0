//! Integer id path parameter extractor.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// Extractor for a single `i32` path parameter.
///
/// Rejects anything that is not a base-10 `i32` with a 400 before the
/// handler runs.
///
/// ```ignore
/// use axum::{Router, routing::get};
/// use axum_helpers::extractors::IdPath;
///
/// async fn get_product(IdPath(id): IdPath) -> String {
///     format!("Product ID: {}", id)
/// }
///
/// let app = Router::new().route("/products/{id}", get(get_product));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdPath(pub i32);

impl<S> FromRequestParts<S> for IdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        parse_id(&raw).map(IdPath).ok_or(AppError::InvalidId(raw))
    }
}

/// Optional `-` followed by ASCII digits only; no whitespace or `+`.
fn parse_id(raw: &str) -> Option<i32> {
    let digits = raw.strip_prefix('-').unwrap_or(raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new().route("/items/{id}", get(|IdPath(id): IdPath| async move { id.to_string() }))
    }

    async fn status_for(uri: &str) -> StatusCode {
        app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_id_path_accepts_integers() {
        assert_eq!(status_for("/items/42").await, StatusCode::OK);
        assert_eq!(status_for("/items/-1").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_id_path_rejects_non_integers() {
        assert_eq!(status_for("/items/abc").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_for("/items/1.5").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_for("/items/99999999999").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_id_path_rejects_sign_and_whitespace() {
        assert_eq!(status_for("/items/+5").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_for("/items/%205").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_for("/items/5%20").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_for("/items/-").await, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_parse_id_bounds() {
        assert_eq!(parse_id("2147483647"), Some(i32::MAX));
        assert_eq!(parse_id("-2147483648"), Some(i32::MIN));
        assert_eq!(parse_id("007"), Some(7));
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("2147483648"), None);
    }
}
