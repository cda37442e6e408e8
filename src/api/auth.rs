//! Authentication Routes
//!
//! Account lifecycle endpoints. Token issuance and verification belong to
//! the backend; the gateway only relays and manages the `token` cookie.
//!
//! Routes:
//! - POST /api/auth/signup - Register an account
//! - POST /api/auth/login - Log in and receive the session cookie
//! - POST /api/auth/logout - Clear the session cookie
//! - POST /api/auth/verifyemail - Confirm an email verification token
//! - POST /api/auth/requestResetPassword - Send a password reset email
//! - POST /api/auth/resetPassword - Set a new password with a reset token
//! - GET /api/auth/me - Session probe

use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::api::proxy::{forward, proxy, relay, send};
use crate::error::Result;
use crate::middleware::{Caller, TOKEN_COOKIE_NAME};
use crate::services::validation::{parse_object, pick, require_fields_or};
use crate::services::BackendRequest;
use crate::AppState;

/// Lifetime of the session cookie set at login.
const SESSION_COOKIE_DAYS: i64 = 30;

const SERVER_ERROR: &str = "Internal Server Error";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/verifyemail", post(verify_email))
        .route("/requestResetPassword", post(request_reset_password))
        .route("/resetPassword", post(reset_password))
        .route("/me", get(current_session))
}

fn session_cookie(token: String, secure: bool) -> Cookie<'static> {
    Cookie::build((TOKEN_COOKIE_NAME, token))
        .path("/")
        .max_age(time::Duration::days(SESSION_COOKIE_DAYS))
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .build()
}

async fn signup(State(state): State<AppState>, caller: Caller, body: Bytes) -> Result<Response> {
    let data = parse_object(&body)?;

    let request = BackendRequest::post("/api/auth/register").json(data);
    proxy(&state, &caller, request, "Signup failed.").await
}

async fn login(
    State(state): State<AppState>,
    caller: Caller,
    jar: CookieJar,
    body: Bytes,
) -> Result<(CookieJar, Response)> {
    let data = parse_object(&body)?;
    require_fields_or(
        &data,
        &["identifier", "password"],
        "Identifier and password are required.",
    )?;

    let request = BackendRequest::post("/api/auth/login").json(data);
    let response = forward(&state, &caller, request, "Invalid credentials.").await?;

    let token = response
        .body
        .pointer("/data/token")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .map(String::from);

    let jar = match token {
        Some(token) => jar.add(session_cookie(token, state.secure_cookies)),
        None => {
            warn!("Login succeeded without a token in the response");
            jar
        }
    };

    Ok((jar, relay(response)))
}

async fn logout(
    State(state): State<AppState>,
    caller: Caller,
    jar: CookieJar,
) -> (CookieJar, Response) {
    if let Some(token) = caller.token() {
        let request = BackendRequest::post("/api/auth/logout").bearer(Some(token));
        // The cookie is cleared whatever the backend says.
        if send(&state, &caller, request, "Backend logout failed").await.is_ok() {
            debug!("Backend session closed");
        }
    }

    let jar = jar.remove(Cookie::build(TOKEN_COOKIE_NAME).path("/"));
    let body = Json(json!({
        "success": true,
        "message": "Logged out successfully",
    }));

    (jar, body.into_response())
}

async fn verify_email(State(state): State<AppState>, caller: Caller, body: Bytes) -> Result<Response> {
    let data = parse_object(&body)?;
    require_fields_or(&data, &["token"], "Token is required")?;

    let request = BackendRequest::post("/auth/verifyemail").json(pick(&data, &["token"]));
    proxy(&state, &caller, request, SERVER_ERROR).await
}

async fn request_reset_password(
    State(state): State<AppState>,
    caller: Caller,
    body: Bytes,
) -> Result<Response> {
    let data = parse_object(&body)?;

    let request =
        BackendRequest::post("/api/auth/request-reset-password").json(pick(&data, &["email"]));
    proxy(&state, &caller, request, SERVER_ERROR).await
}

async fn reset_password(
    State(state): State<AppState>,
    caller: Caller,
    body: Bytes,
) -> Result<Response> {
    let data = parse_object(&body)?;
    require_fields_or(&data, &["token"], "Missing token in request body.")?;

    let request = BackendRequest::post("/api/auth/reset-password")
        .json(pick(&data, &["token", "newPassword"]));
    proxy(&state, &caller, request, SERVER_ERROR).await
}

async fn current_session(State(state): State<AppState>, caller: Caller) -> Result<Response> {
    let token = caller.require_token("Unauthorized")?;

    let request = BackendRequest::get("/api/auth/me").bearer(Some(token));
    proxy(&state, &caller, request, "Failed to fetch session.").await
}
