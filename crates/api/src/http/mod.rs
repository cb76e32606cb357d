//! HTTP surface.
//!
//! | Method | Path            | Action                                  |
//! |--------|-----------------|-----------------------------------------|
//! | GET    | `/health`       | liveness                                |
//! | GET    | `/api/stats`    | current snapshot, `null` before any run |
//! | GET    | `/api/report`   | windowed analysis, no side effects      |
//! | POST   | `/api/analysis` | full analysis                           |
//! | POST   | `/api/summary`  | full analysis plus daily report         |
//! | GET    | `/api/team`     | configured members                      |

mod error;
pub mod handlers;

use axum::routing::{get, post};
use axum::Router;
pub use error::{ApiError, ApiResult};

use crate::AppContext;

pub fn build_router(ctx: AppContext) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/stats", get(handlers::stats))
        .route("/api/report", get(handlers::report))
        .route("/api/analysis", post(handlers::run_analysis))
        .route("/api/summary", post(handlers::send_summary))
        .route("/api/team", get(handlers::team))
        .with_state(ctx)
}
