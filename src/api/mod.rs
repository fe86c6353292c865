pub mod error;
pub mod handlers;

use std::sync::{Arc, Mutex, MutexGuard};

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::tracker::InvestmentTracker;

pub use error::{ApiError, ApiResult};

/// state shared by every request handler
pub struct AppState {
    tracker: Mutex<InvestmentTracker>,
}

impl AppState {
    pub fn new(tracker: InvestmentTracker) -> Arc<Self> {
        Arc::new(Self {
            tracker: Mutex::new(tracker),
        })
    }

    pub(crate) fn tracker(&self) -> ApiResult<MutexGuard<'_, InvestmentTracker>> {
        self.tracker.lock().map_err(|_| ApiError::Unavailable)
    }
}

/// run `f` against the locked tracker on the blocking pool.
///
/// The file store fsyncs on every mutation, so tracker calls stay off the
/// async workers.
pub(crate) async fn with_tracker<F, T>(state: Arc<AppState>, f: F) -> ApiResult<T>
where
    F: FnOnce(&mut InvestmentTracker) -> ApiResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut tracker = state.tracker()?;
        f(&mut *tracker)
    })
    .await
    .map_err(|_| ApiError::Unavailable)?
}

/// the tracker's http routes
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route(
            "/api/investments",
            get(handlers::list_investments)
                .post(handlers::create_investment)
                .delete(handlers::clear_investments),
        )
        .route(
            "/api/investments/:id",
            get(handlers::get_investment)
                .put(handlers::calculate_investment)
                .delete(handlers::delete_investment),
        )
        .route("/api/calculate", post(handlers::quote))
        .route("/api/export", get(handlers::export))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
