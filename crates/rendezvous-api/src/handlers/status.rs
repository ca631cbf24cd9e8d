//! /signaling/status handler.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::response::Response;

use super::{json_response, ApiState};
use crate::ApiError;

pub async fn handle_status(
    State(state): State<ApiState>,
    ConnectInfo(caller): ConnectInfo<SocketAddr>,
) -> Result<Response, ApiError> {
    tracing::debug!(%caller, "status resolved");
    json_response(&state.signaling.status())
}
