pub mod error;
pub mod handlers;

use std::future::Future;
use std::net::SocketAddr;

use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use handlers::ApiState;

/// Build the signaling router. `/debug/*` is only mounted when `debug_routes` is set.
pub fn router(state: ApiState, debug_routes: bool) -> Router {
    let signaling_routes = Router::new()
        .route(
            "/status",
            get(handlers::handle_status).fallback(handlers::handle_unsupported_method),
        )
        .route(
            "/clients/ready",
            post(handlers::handle_ready).fallback(handlers::handle_unsupported_method),
        )
        .route(
            "/clients/find",
            post(handlers::handle_find).fallback(handlers::handle_unsupported_method),
        )
        .route(
            "/clients/leave",
            post(handlers::handle_leave).fallback(handlers::handle_unsupported_method),
        );

    let mut app = Router::new().nest("/signaling", signaling_routes);

    if debug_routes {
        let debug = Router::new()
            .route(
                "/reset",
                post(handlers::handle_reset).fallback(handlers::handle_unsupported_method),
            )
            .route(
                "/clients",
                get(handlers::handle_clients).fallback(handlers::handle_unsupported_method),
            );
        app = app.nest("/debug", debug);
    }

    app.with_state(state).layer(TraceLayer::new_for_http())
}

/// Serve the signaling API on an already-bound listener until `shutdown` resolves.
pub async fn serve<F>(
    state: ApiState,
    listener: TcpListener,
    debug_routes: bool,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(state, debug_routes);
    let local = listener.local_addr()?;
    tracing::info!(addr = %local, debug_routes, "signaling API listening");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await?;
    Ok(())
}
