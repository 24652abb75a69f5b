//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, panic recovery)
//! - Bind server to listener
//! - Record proxy outcomes (logs, metrics)

use std::any::Any;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderName, Request, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

use crate::config::{GatewayConfig, ServiceConfig};
use crate::error::GatewayError;
use crate::http::request::{MakeRequestUuidV4, QueryParams, X_REQUEST_ID};
use crate::http::response::{not_found, panic_response};
use crate::observability::metrics;
use crate::proxy::{forward, Fetcher, ProxyOutcome};
use crate::service::descriptor::{HEALTH_PATH, PROXY_PATH};
use crate::service::{HealthRecord, RootRecord};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ServiceConfig>,
    pub root: Arc<RootRecord>,
    pub fetcher: Fetcher,
}

impl AppState {
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        Ok(Self {
            service: Arc::new(config.service.clone()),
            root: Arc::new(RootRecord::new(&config.service)),
            fetcher: Fetcher::from_config(&config.upstream)?,
        })
    }
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: Arc<GatewayConfig>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let state = AppState::new(&config)?;
        let router = Self::build_router(state);
        Ok(Self {
            router,
            config: Arc::new(config),
        })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        let request_id = HeaderName::from_static(X_REQUEST_ID);

        Router::new()
            .route("/", get(root_handler))
            .route(HEALTH_PATH, get(health_handler))
            .route(PROXY_PATH, get(proxy_handler).head(proxy_head_handler))
            .fallback(fallback_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuidV4))
                    .layer(
                        TraceLayer::new_for_http()
                            .make_span_with(request_span)
                            .on_response(DefaultOnResponse::new().level(Level::INFO)),
                    )
                    .layer(PropagateRequestIdLayer::new(request_id))
                    .layer(CatchPanicLayer::custom(recover_panic)),
            )
    }

    /// The assembled router, for embedding or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until a shutdown message arrives, then drain.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), GatewayError> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

fn request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}

fn recover_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "handler panicked"
    };
    tracing::error!(detail, "Handler panicked");
    panic_response(detail)
}

async fn root_handler(State(state): State<AppState>) -> Json<RootRecord> {
    Json(RootRecord::clone(&state.root))
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthRecord> {
    Json(HealthRecord::now(&state.service))
}

/// `GET /api/proxy?url=<target>`.
async fn proxy_handler(State(state): State<AppState>, query: QueryParams) -> ProxyOutcome {
    let start_time = Instant::now();
    let target = query.get("url");

    let outcome = forward(&state.fetcher, target.as_deref()).await;
    metrics::record_proxy(&outcome, start_time);

    let target_url = target.as_deref().unwrap_or("");
    match &outcome {
        ProxyOutcome::FetchFailed(detail) | ProxyOutcome::ReadFailed(detail) => {
            tracing::warn!(
                outcome = outcome.label(),
                target_url,
                error = %detail,
                "Proxy request failed"
            );
        }
        ProxyOutcome::MissingParameter => {
            tracing::debug!(outcome = outcome.label(), "Proxy request without target");
        }
        ProxyOutcome::Relayed { status, body, .. } => {
            tracing::debug!(
                outcome = outcome.label(),
                target_url,
                status = status.as_u16(),
                bytes = body.len(),
                "Relayed upstream response"
            );
        }
    }

    outcome
}

/// HEAD would otherwise fall through to the GET handler and hit the origin.
async fn proxy_head_handler() -> impl IntoResponse {
    (StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "GET")])
}

async fn fallback_handler(uri: Uri) -> Response {
    not_found(uri.path())
}
