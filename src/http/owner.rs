use super::app_error::AppError;
use anyhow::anyhow;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

/// Header carrying the identity of the authenticated user.
///
/// Authentication happens in front of this service, which only trusts the header.
pub const OWNER_HEADER: &str = "x-user-id";

/// Identity owning the uploaded datasets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerId(pub String);

impl<S> FromRequestParts<S> for OwnerId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let owner = parts
            .headers
            .get(OWNER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| AppError::unauthorized(anyhow!("Missing {} header", OWNER_HEADER)))?;
        Ok(OwnerId(owner.to_string()))
    }
}
