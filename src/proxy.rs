// HTTP gateway: application routes plus the /api rewrite proxy

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::rewrite::RewriteRule;
use crate::shell::{RootResponse, ShellMetadata};

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap, HeaderName, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use futures::StreamExt;
use reqwest::Client;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};

// Recomputed by the client for the new destination
const SKIP_REQUEST_HEADERS: [HeaderName; 3] =
    [header::HOST, header::CONTENT_LENGTH, header::CONNECTION];

// Hop-by-hop, hyper frames the forwarded body itself
const SKIP_RESPONSE_HEADERS: [HeaderName; 3] = [
    header::CONTENT_LENGTH,
    header::TRANSFER_ENCODING,
    header::CONNECTION,
];

#[derive(Clone)]
pub struct GatewayState {
    client: Client,
    /// `None` when API proxying is disabled
    rule: Option<Arc<RewriteRule>>,
    shell: ShellMetadata,
}

impl GatewayState {
    pub fn new(config: &GatewayConfig) -> Self {
        let rule = config
            .proxy
            .enabled
            .then(|| Arc::new(RewriteRule::new(config.proxy.backend_url.clone())));

        Self {
            client: Client::new(),
            rule,
            shell: ShellMetadata::default(),
        }
    }

    pub fn rule(&self) -> Option<&RewriteRule> {
        self.rule.as_deref()
    }
}

fn filter_headers(headers: &HeaderMap, skip: &[HeaderName]) -> HeaderMap {
    headers
        .iter()
        .filter(|(name, _)| !skip.contains(name))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

async fn root_handler(State(state): State<GatewayState>) -> impl IntoResponse {
    Json(RootResponse {
        status: "healthy",
        proxy_enabled: state.rule.is_some(),
        metadata: state.shell.clone(),
    })
}

async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        r#"{"status":"healthy"}"#,
    )
}

/// Routes every request the application does not own.
///
/// Paths matched by the rewrite rule are forwarded; everything else is a 404.
async fn fallback_handler(
    State(state): State<GatewayState>,
    req: Request,
) -> Result<Response, GatewayError> {
    let target_url = state
        .rule()
        .and_then(|rule| rule.rewrite(req.uri().path(), req.uri().query()))
        .ok_or(GatewayError::NotFound)?;

    proxy_request(&state.client, &target_url, req).await
}

/// Forward `req` to `target_url`, preserving method, headers and body,
/// and stream the upstream response back unchanged.
pub async fn proxy_request(
    client: &Client,
    target_url: &str,
    req: Request,
) -> Result<Response, GatewayError> {
    let method = req.method().clone();
    let headers = filter_headers(req.headers(), &SKIP_REQUEST_HEADERS);
    let body_bytes = axum::body::to_bytes(req.into_body(), usize::MAX).await?;

    let mut upstream_req = client.request(method.clone(), target_url).headers(headers);
    if !body_bytes.is_empty() {
        upstream_req = upstream_req.body(body_bytes);
    }

    debug!("[PROXY] Sending {} to upstream: {}", method, target_url);
    let upstream = upstream_req.send().await?;
    let status = upstream.status();
    debug!("[PROXY] Got response from upstream: {}", status);

    let response_headers = filter_headers(upstream.headers(), &SKIP_RESPONSE_HEADERS);

    let target = target_url.to_string();
    let stream = upstream.bytes_stream().map(move |chunk| {
        if let Err(e) = &chunk {
            warn!("[PROXY] Stream error from {}: {}", target, e);
        }
        chunk
    });

    let mut response = Response::new(Body::from_stream(stream));
    *response.status_mut() = status;
    *response.headers_mut() = response_headers;
    Ok(response)
}

pub fn build_router(config: &GatewayConfig) -> Router {
    router_with_state(GatewayState::new(config))
}

pub fn router_with_state(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(config: GatewayConfig) -> std::io::Result<()> {
    if config.proxy.enabled {
        info!(
            "API proxying enabled: /api/* -> {}/api/*",
            config.proxy.backend_url
        );
    } else {
        info!("API proxying disabled");
    }

    let app = build_router(&config);

    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr).await?;
    info!("Gateway running on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
