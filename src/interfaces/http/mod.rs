pub mod response;
pub mod routes;

use crate::state::AppState;
use std::future::Future;
use tokio::net::TcpListener;

pub use routes::router;

/// Serve the proxy on `listener` until `shutdown` resolves
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}
