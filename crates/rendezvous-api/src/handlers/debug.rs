//! /debug/* handlers. Mounted only when debug routes are enabled.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;

use rendezvous_core::wire::ClientsResponse;

use super::{json_response, ApiState};
use crate::ApiError;

pub async fn handle_reset(State(state): State<ApiState>) -> StatusCode {
    tracing::info!("resetting list of online clients");
    state.signaling.reset();
    StatusCode::NO_CONTENT
}

pub async fn handle_clients(State(state): State<ApiState>) -> Result<Response, ApiError> {
    json_response(&ClientsResponse {
        clients: state.signaling.clients(),
    })
}
