//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::{application::services::AuthContext, error::AppError, state::AppState};

/// Authenticates requests using Bearer tokens from the Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract token from `Authorization` header
/// 2. Validate token hash against the token store
/// 3. Check if token is revoked
/// 4. Update `last_used_at` timestamp
/// 5. Insert the resolved [`AuthContext`] into request extensions
///
/// # Errors
///
/// Returns `401 Unauthorized` if:
/// - Authorization header is missing
/// - Token format is invalid
/// - Token is not found or revoked
///
/// Adds `WWW-Authenticate: Bearer` header to 401 responses per RFC 6750.
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/api/vehicles", get(list_vehicles_handler))
///     .layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let ctx = st.auth_service.authenticate(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}

/// Extracts the [`AuthContext`] placed in request extensions by [`layer`].
///
/// Rejects with `401 Unauthorized` when the middleware did not run, which
/// only happens if a protected handler is mounted outside the guarded
/// router.
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthContext>().cloned().ok_or_else(|| {
            AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Authentication context is missing"}),
            )
        })
    }
}
