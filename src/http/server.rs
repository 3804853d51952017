//! HTTP server setup and the request pipeline.
//!
//! # Responsibilities
//! - Create the axum Router with all handlers
//! - Wire up middleware (request ID, access log, body limit)
//! - POST /rpc: validate → count → forward → respond
//! - GET /health, /metrics, /prometheus
//! - Serve plain or TLS listeners with graceful shutdown

use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    extract::{DefaultBodyLimit, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer, ServiceBuilderExt};
use tracing::Span;

use crate::config::GatewayConfig;
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};
use crate::net::tls::load_tls_config;
use crate::observability::metrics::MethodCalls;
use crate::rpc::envelope::JsonRpcEnvelope;
use crate::rpc::errors;
use crate::upstream::forwarder::{BuildError, UpstreamForwarder};

/// Shared state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub forwarder: Arc<UpstreamForwarder>,
    pub calls: Arc<MethodCalls>,
    pub prometheus: Option<PrometheusHandle>,
}

/// HTTP server for the gateway.
pub struct GatewayServer {
    router: Router,
    config: GatewayConfig,
}

impl GatewayServer {
    /// Create a new server with the given configuration.
    ///
    /// `prometheus` is the scrape handle of the installed recorder; pass
    /// `None` when no recorder is installed and `GET /prometheus` responds
    /// with 404.
    pub fn new(
        config: GatewayConfig,
        prometheus: Option<PrometheusHandle>,
    ) -> Result<Self, BuildError> {
        let forwarder = UpstreamForwarder::new(&config.upstream, &config.circuit_breaker)?;

        let state = AppState {
            forwarder: Arc::new(forwarder),
            calls: Arc::new(MethodCalls::new()),
            prometheus,
        };

        let router = build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Run the server on the given listener until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> io::Result<()> {
        let Self { router, config } = self;
        let addr = listener.local_addr()?;

        match &config.listener.tls {
            Some(tls) => {
                tracing::info!(address = %addr, "HTTPS server starting");
                let tls_config =
                    load_tls_config(Path::new(&tls.cert_path), Path::new(&tls.key_path)).await?;

                let handle = axum_server::Handle::new();
                let drainer = handle.clone();
                tokio::spawn(async move {
                    let _ = shutdown.recv().await;
                    drainer.graceful_shutdown(Some(Duration::from_secs(10)));
                });

                axum_server::from_tcp_rustls(listener.into_std()?, tls_config)
                    .handle(handle)
                    .serve(router.into_make_service())
                    .await?;
            }
            None => {
                tracing::info!(address = %addr, "HTTP server starting");
                axum::serve(listener, router.into_make_service())
                    .with_graceful_shutdown(async move {
                        let _ = shutdown.recv().await;
                    })
                    .await?;
            }
        }

        tracing::info!("server stopped");
        Ok(())
    }
}

/// Build the axum router with all middleware layers.
fn build_router(config: &GatewayConfig, state: AppState) -> Router {
    let access_log = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            let request_id = request
                .headers()
                .get(X_REQUEST_ID)
                .and_then(|value| value.to_str().ok())
                .unwrap_or("-");
            tracing::info_span!(
                "request",
                method = %request.method(),
                path = %request.uri().path(),
                request_id = %request_id,
            )
        })
        .on_response(
            |response: &axum::http::Response<_>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis() as u64,
                    "request completed"
                );
            },
        );

    Router::new()
        .route("/rpc", post(rpc_handler))
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/prometheus", get(prometheus_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .set_x_request_id(MakeRequestUuid)
                .layer(access_log)
                .propagate_x_request_id()
                .layer(DefaultBodyLimit::disable())
                .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes)),
        )
}

/// The request pipeline: validate, count, forward, respond.
async fn rpc_handler(State(state): State<AppState>, body: Bytes) -> Response {
    if body.is_empty() {
        return invalid_request_response();
    }

    let Some(envelope) = JsonRpcEnvelope::parse(&body) else {
        return invalid_request_response();
    };

    // Accepted calls are counted before the forward is attempted, so the
    // counters move even when the upstream is down.
    for method in envelope.methods() {
        state.calls.increment(method);
    }

    match state.forwarder.forward(body).await {
        Ok(upstream_body) => (
            StatusCode::OK,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            upstream_body,
        )
            .into_response(),
        Err(_) => {
            (StatusCode::BAD_GATEWAY, Json(errors::upstream_unavailable(None))).into_response()
        }
    }
}

fn invalid_request_response() -> Response {
    (StatusCode::BAD_REQUEST, Json(errors::invalid_request(None))).into_response()
}

async fn health_handler() -> &'static str {
    "OK"
}

async fn metrics_handler(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "calls": state.calls.snapshot() }))
}

async fn prometheus_handler(State(state): State<AppState>) -> Response {
    match &state.prometheus {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
