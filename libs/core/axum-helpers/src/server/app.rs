use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::{handle_panic, not_found};
use crate::http::{cors::cors_layer_from_env, security::security_headers};
use axum::{Router, middleware};
use core_config::server::ServerConfig;
use std::future::Future;
use std::io;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info, warn};
use utoipa::OpenApi;

/// Assemble the public router: documentation UIs, `routes`, the 404
/// fallback and cross-cutting middleware.
///
/// CORS comes from `CORS_ALLOWED_ORIGIN` (see
/// [`cors_layer_from_env`](crate::http::cors_layer_from_env)).
///
/// Documentation is served at:
/// - `/swagger-ui` (spec at `/api-docs/openapi.json`)
/// - `/redoc`
/// - `/rapidoc`
/// - `/scalar`
///
/// # Errors
/// Returns an error when `CORS_ALLOWED_ORIGIN` is set but empty or invalid.
pub async fn create_router<T>(routes: Router) -> io::Result<Router>
where
    T: OpenApi + 'static,
{
    Ok(create_router_with_cors::<T>(routes, cors_layer_from_env()?))
}

/// [`create_router`] with an explicit CORS layer.
///
/// Layers from innermost to outermost: panic catcher, request tracing,
/// security headers, CORS, compression. Routes are mounted at the root, so
/// domain routers choose their own prefixes.
pub fn create_router_with_cors<T>(routes: Router, cors: CorsLayer) -> Router
where
    T: OpenApi + 'static,
{
    use utoipa_rapidoc::RapiDoc;
    use utoipa_redoc::{Redoc, Servable as RedocServable};
    use utoipa_scalar::{Scalar, Servable as ScalarServable};
    use utoipa_swagger_ui::SwaggerUi;

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .merge(Redoc::with_url("/redoc", T::openapi()))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/rapidoc"))
        .merge(Scalar::with_url("/scalar", T::openapi()))
        .merge(routes)
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(middleware::from_fn(security_headers))
        .layer(cors)
        .layer(CompressionLayer::new())
}

/// Serve `router` until SIGINT/SIGTERM, then run `cleanup`.
///
/// In-flight requests are drained before `cleanup` starts; `cleanup` gets at
/// most `shutdown_timeout` before it is abandoned.
///
/// ```ignore
/// let cleanup = async move { close_postgres(db, "products").await };
/// create_production_app(router, &config.server, Duration::from_secs(30), cleanup).await?;
/// ```
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(server_config.address()).await?;

    let (coordinator, _rx) = ShutdownCoordinator::new();
    let signals = coordinator.clone();
    tokio::spawn(async move { signals.wait_for_signal().await });

    serve_with_coordinator(listener, router, coordinator, shutdown_timeout, cleanup).await
}

pub(crate) async fn serve_with_coordinator<F>(
    listener: TcpListener,
    router: Router,
    coordinator: ShutdownCoordinator,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    info!("Server starting on {}", listener.local_addr()?);

    let mut shutdown_rx = coordinator.subscribe();
    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move {
            if !coordinator.is_shutting_down() {
                let _ = shutdown_rx.recv().await;
            }
        })
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    info!("Starting cleanup tasks (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed successfully"),
        Err(_) => warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            shutdown_timeout
        ),
    }

    serve_result
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::routing::get;
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    #[derive(OpenApi)]
    #[openapi(info(title = "test"))]
    struct TestDoc;

    async fn boom() -> &'static str {
        panic!("handler exploded")
    }

    fn app() -> Router {
        let routes = Router::new()
            .route("/ok", get(|| async { "ok" }))
            .route("/boom", get(boom));
        create_router_with_cors::<TestDoc>(routes, CorsLayer::permissive())
    }

    async fn get_path(path: &str) -> axum::response::Response {
        app()
            .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_routes_are_mounted_at_root() {
        let response = get_path("/ok").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::X_FRAME_OPTIONS], "DENY");
    }

    #[tokio::test]
    async fn test_panic_becomes_plain_500() {
        let response = get_path("/boom").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"Something went wrong!");
    }

    #[tokio::test]
    async fn test_unknown_route_uses_fallback() {
        let response = get_path("/nope").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let response = get_path("/api-docs/openapi.json").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_shutdown_runs_cleanup() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let (coordinator, _rx) = ShutdownCoordinator::new();
        let cleaned = Arc::new(AtomicBool::new(false));
        let flag = cleaned.clone();

        let server = tokio::spawn(serve_with_coordinator(
            listener,
            Router::new(),
            coordinator.clone(),
            Duration::from_secs(5),
            async move { flag.store(true, Ordering::SeqCst) },
        ));

        coordinator.shutdown();
        server.await.unwrap().unwrap();
        assert!(cleaned.load(Ordering::SeqCst));
    }
}
