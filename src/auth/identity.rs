//! Identity resolution and role gating
//!
//! Resolution is silent: a missing or bad token yields no identity rather
//! than an error, so the decision to require authentication stays with the
//! per-route role gate.

use crate::{auth::token::TokenService, error::AppError};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

/// Authenticated caller, as decoded from a bearer token
#[derive(Debug, Clone)]
pub struct Identity {
    pub email: String,
    pub role: String,
    pub ref_id: Option<String>,
}

// 实现 FromRequestParts 以便在 handler 中直接提取 Identity
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .ok_or(AppError::Unauthorized)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
///
/// Absent header or any other scheme yields `None`.
pub fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.to_string())
}

/// Resolve the caller's identity from request headers
///
/// Never fails: no header, a malformed header, or an invalid/expired token
/// all resolve to `None` (anonymous).
pub fn resolve_identity(headers: &HeaderMap, tokens: &TokenService) -> Option<Identity> {
    let token = extract_bearer(headers)?;

    match tokens.verify(&token, chrono::Utc::now()) {
        Ok(claims) => Some(Identity {
            email: claims.sub,
            role: claims.role,
            ref_id: claims.ref_id,
        }),
        Err(_) => None,
    }
}

/// Per-route role requirement, enumerated at router setup
#[derive(Debug, Clone, Copy)]
pub struct RoleGate {
    allowed: &'static [&'static str],
}

impl RoleGate {
    /// Accept only the listed roles
    pub fn allow(allowed: &'static [&'static str]) -> Self {
        Self { allowed }
    }

    /// Accept any authenticated caller, regardless of role
    pub fn authenticated() -> Self {
        Self { allowed: &[] }
    }

    /// Gate decision: anonymous callers are rejected outright, callers with
    /// a role outside a non-empty allow-set are forbidden.
    pub fn check(&self, identity: Option<&Identity>) -> Result<(), AppError> {
        let identity = identity.ok_or(AppError::Unauthorized)?;

        if !self.allowed.is_empty() && !self.allowed.contains(&identity.role.as_str()) {
            tracing::debug!(
                role = %identity.role,
                required = ?self.allowed,
                "Role gate rejected caller"
            );
            return Err(AppError::Forbidden);
        }

        Ok(())
    }
}

/// 角色门卫中间件
/// 在路由组装时以 from_fn_with_state 挂到需要保护的子路由上
pub async fn role_gate_middleware(
    State(gate): State<RoleGate>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    gate.check(req.extensions().get::<Identity>())?;

    Ok(next.run(req).await)
}
