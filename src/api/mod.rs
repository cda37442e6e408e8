//! API Routes for the alumni gateway
//!
//! This module combines all API routes into a single router.
//! Each resource module validates its input and forwards to the backend
//! through [`proxy`].

mod alumni;
mod auth;
mod contact;
mod events;
mod jobs;
pub mod proxy;
mod referrals;
pub mod status;
mod submissions;
mod users;

use axum::Router;

use crate::middleware::track_request;
use crate::AppState;

/// Build the complete router.
///
/// Route structure:
/// - /api/auth/* - Signup, login, logout, email verification, password reset
/// - /api/user/* - User profiles
/// - /api/jobs/* - Job postings
/// - /api/referrals/* - Referral postings
/// - /api/referralsubmissions/* - Applications to referrals
/// - /api/alumnidetails/* - Alumni career details
/// - /api/events - Event listing
/// - /api/contactus/* - Support requests
/// - /health, /metrics - Health checks (public)
pub fn routes() -> Router<AppState> {
    Router::new()
        // Health and status endpoints (public)
        .merge(status::routes())
        .nest("/api", api_routes())
        .layer(axum::middleware::from_fn(track_request))
}

/// Resource routes. Token requirements are enforced per handler because
/// each route answers a missing token with its own message.
fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::routes())
        .nest("/user", users::routes())
        .nest("/jobs", jobs::routes())
        .nest("/referrals", referrals::routes())
        .nest("/referralsubmissions", submissions::routes())
        .nest("/alumnidetails", alumni::routes())
        .nest("/events", events::routes())
        .nest("/contactus", contact::routes())
}
