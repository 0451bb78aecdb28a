//! The beacon's only handler.
//!
//! Every method and every path gets the same answer: `200 OK`,
//! `Content-Type: text/plain`, an empty body. `Server-Name` is attached by
//! a response layer in `server.rs`.

use std::net::SocketAddr;

use axum::{
    extract::ConnectInfo,
    http::{header, Method, StatusCode, Uri},
    response::IntoResponse,
};

/// Name of the identifying response header.
pub const SERVER_NAME: &str = "server-name";

/// Log the request and answer with the fixed response.
pub async fn beacon(
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    method: Method,
    uri: Uri,
) -> impl IntoResponse {
    tracing::info!(method = %method, path = %uri.path(), peer = %peer, "Request received");
    (StatusCode::OK, [(header::CONTENT_TYPE, "text/plain")])
}
