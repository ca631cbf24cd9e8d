//! /signaling/clients/* handlers: registration, lookup, release.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, State};
use axum::response::Response;
use bytes::Bytes;

use rendezvous_core::wire::{FindRequest, LeaveRequest, LeaveResponse, ReadyRequest, ReadyResponse};

use super::{decode_body, json_response, ApiState};
use crate::ApiError;

// ── /signaling/clients/ready ──────────────────────────────────────────────────

pub async fn handle_ready(
    State(state): State<ApiState>,
    ConnectInfo(caller): ConnectInfo<SocketAddr>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let req: ReadyRequest = decode_body(&body)?;
    tracing::debug!(%caller, name = %req.display_name, "ready requested");

    state.signaling.ready(&req.display_name, caller)?;
    json_response(&ReadyResponse::accepted())
}

// ── /signaling/clients/find ───────────────────────────────────────────────────

pub async fn handle_find(
    State(state): State<ApiState>,
    ConnectInfo(caller): ConnectInfo<SocketAddr>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let req: FindRequest = decode_body(&body)?;
    tracing::debug!(%caller, peer = %req.peer_name, "find requested");

    let found = state.signaling.find(&req.peer_name, caller)?;
    json_response(&found)
}

// ── /signaling/clients/leave ──────────────────────────────────────────────────

pub async fn handle_leave(
    State(state): State<ApiState>,
    ConnectInfo(caller): ConnectInfo<SocketAddr>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let req: LeaveRequest = decode_body(&body)?;
    state.signaling.leave(&req.display_name, caller)?;
    json_response(&LeaveResponse::released())
}
