//! Event Routes
//!
//! Routes:
//! - GET /api/events - Events, optionally filtered by month, year and type

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Response,
    routing::get,
    Router,
};

use crate::api::proxy::proxy;
use crate::error::Result;
use crate::middleware::Caller;
use crate::models::EventFilter;
use crate::services::BackendRequest;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(list_events))
}

async fn list_events(
    State(state): State<AppState>,
    caller: Caller,
    query: std::result::Result<Query<EventFilter>, QueryRejection>,
) -> Result<Response> {
    // Token first: a bad query from an anonymous caller is still a 401.
    let token = caller.require_token("Unauthorized. Please login to view events.")?;
    let Query(filter) = query?;
    filter.validate()?;

    let request = BackendRequest::get("/api/events/filter")
        .bearer(Some(token))
        .query(filter.params());
    proxy(&state, &caller, request, "Failed to fetch events.").await
}
