//! Tenant (business) context for multi-tenant ledger access.
//!
//! The business id is set by the gateway after it has authenticated the
//! caller. Every ledger read and mutation is scoped by it.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use service_core::error::AppError;

pub const TENANT_HEADER: &str = "X-Business-ID";

/// Business the request acts for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    pub business_id: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let business_id = parts
            .headers
            .get(TENANT_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| {
                AppError::Unauthorized(anyhow::anyhow!(
                    "Missing {} header (required from gateway)",
                    TENANT_HEADER
                ))
            })?;

        tracing::Span::current().record("business_id", business_id);

        Ok(TenantContext {
            business_id: business_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{Request, StatusCode};

    async fn extract(request: Request<()>) -> Result<TenantContext, AppError> {
        let (mut parts, _) = request.into_parts();
        TenantContext::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_extracts_business_id() {
        let request = Request::builder()
            .header(TENANT_HEADER, " biz-1 ")
            .body(())
            .unwrap();
        let tenant = extract(request).await.unwrap();
        assert_eq!(tenant.business_id, "biz-1");
    }

    #[tokio::test]
    async fn test_missing_header_is_unauthorized() {
        let request = Request::builder().body(()).unwrap();
        let err = extract(request).await.unwrap_err();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);

        let blank = Request::builder()
            .header(TENANT_HEADER, "  ")
            .body(())
            .unwrap();
        assert!(extract(blank).await.is_err());
    }
}
