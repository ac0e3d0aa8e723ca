use std::sync::Arc;

use auth::AuthenticationGate;
use auth::GateError;
use auth::SecretKey;
use auth::TokenError;
use axum::extract::Request;
use axum::extract::State;
use axum::http;
use axum::middleware::Next;
use axum::response::Response;

use crate::inbound::http::handlers::ApiError;

/// Extension type to store the authenticated caller in request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub subject: String,
    pub email: String,
}

/// State of the authentication middleware: the gate and the secret tokens
/// must be signed with.
#[derive(Debug, Clone)]
pub struct AuthState {
    pub gate: Arc<AuthenticationGate>,
    pub secret: SecretKey,
}

impl AuthState {
    pub fn new(secret: SecretKey) -> Self {
        Self {
            gate: Arc::new(AuthenticationGate::default()),
            secret,
        }
    }
}

/// Middleware that validates bearer tokens and adds the caller to request extensions
pub async fn authenticate(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let identity = {
        let header = match req.headers().get(http::header::AUTHORIZATION) {
            Some(value) => Some(value.to_str().map_err(|_| {
                reject(GateError::InvalidCredential(TokenError::Malformed(
                    "authorization header is not visible ASCII".to_string(),
                )))
            })?),
            None => None,
        };

        state.gate.check(header, &state.secret).map_err(reject)?
    };

    tracing::debug!(subject = %identity.subject, "Request authenticated");

    req.extensions_mut().insert(AuthenticatedUser {
        subject: identity.subject,
        email: identity.email,
    });

    Ok(next.run(req).await)
}

fn reject(err: GateError) -> ApiError {
    match err.token_error() {
        Some(cause) => tracing::warn!(kind = cause.kind(), error = %cause, "Token verification failed"),
        None => tracing::debug!("Request without credential"),
    }
    ApiError::Unauthorized(err.to_string())
}
