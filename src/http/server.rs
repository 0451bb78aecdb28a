//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router around the single beacon handler
//! - Wire up middleware (request ID, tracing, `Server-Name`)
//! - Serve HTTP/1.1 and HTTP/2 over TLS on an already bound listener
//! - Stop when the shared `axum_server::Handle` says so

use std::net::SocketAddr;

use axum::{
    extract::Request,
    http::{header::InvalidHeaderValue, HeaderName, HeaderValue},
    Router,
};
use axum_server::{
    tls_rustls::{RustlsAcceptor, RustlsConfig},
    Handle,
};
use tower_http::{
    request_id::{MakeRequestUuid, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::config::schema::ResponseConfig;
use crate::http::response::{beacon, SERVER_NAME};
use crate::net::{ConnectionHook, Listener};

/// HTTPS server answering every request with the beacon response.
#[derive(Debug, Clone)]
pub struct BeaconServer {
    router: Router,
}

impl BeaconServer {
    /// Create a new server. Fails if the server name cannot be sent as a header.
    pub fn new(config: &ResponseConfig) -> Result<Self, InvalidHeaderValue> {
        let server_name = HeaderValue::from_str(&config.server_name)?;
        Ok(Self {
            router: Self::build_router(server_name),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(server_name: HeaderValue) -> Router {
        Router::new()
            .fallback(beacon)
            .layer(SetResponseHeaderLayer::overriding(
                HeaderName::from_static(SERVER_NAME),
                server_name,
            ))
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::debug_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The router, for driving the handler without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the accept/serve loop until `handle` shuts it down or it fails.
    pub async fn serve(
        self,
        listener: Listener,
        tls: RustlsConfig,
        handle: Handle,
    ) -> Result<(), std::io::Error> {
        let hook = ConnectionHook::new(listener.keep_alive());
        tracing::info!(address = %listener.local_addr(), "HTTPS server starting");

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum_server::from_tcp(listener.into_std())
            .acceptor(RustlsAcceptor::new(tls).acceptor(hook))
            .handle(handle)
            .serve(app)
            .await
    }
}
