use axum::{
    http::{header, Method, StatusCode},
    routing::get,
    serve, Json, Router,
};
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

#[derive(Clone)]
pub struct HttpServerConfig {
    pub port: String,
}

/// One service's router bound to its own port.
pub struct HttpServer {
    pub name: String,
    pub router: Router,
    pub config: HttpServerConfig,
}

impl HttpServer {
    pub fn new(name: impl Into<String>, router: Router, config: HttpServerConfig) -> Self {
        Self {
            name: name.into(),
            router,
            config,
        }
    }

    /// The service routes plus `/health`, request tracing and CORS.
    pub fn app(self) -> Router {
        let trace_layer = TraceLayer::new_for_http()
            .make_span_with(|request: &axum::extract::Request<_>| {
                let uri = request.uri().to_string();
                let request_id = Uuid::new_v4();
                tracing::info_span!(
                    "http_request",
                    %request_id,
                    method = %request.method(),
                    uri
                )
            })
            .on_request(
                |request: &axum::extract::Request<_>, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        method = %request.method(),
                        uri = %request.uri(),
                        "request"
                    );
                },
            )
            .on_response(
                |response: &axum::response::Response, latency: Duration, span: &tracing::Span| {
                    tracing::info!(
                        parent: span,
                        status = %response.status(),
                        latency_ms = %latency.as_millis(),
                        "response"
                    );
                },
            );

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE]);

        self.router
            .route("/health", get(health))
            .layer(trace_layer)
            .layer(cors)
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let addr: SocketAddr = format!("0.0.0.0:{}", self.config.port).parse()?;
        let name = self.name.clone();
        let app = self.app();
        tracing::info!(service = %name, "starting server on {}", addr);
        let listener = tokio::net::TcpListener::bind(addr).await?;
        serve(listener, app.into_make_service()).await?;
        Ok(())
    }
}

async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}
