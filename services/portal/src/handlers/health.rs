use axum::{extract::State, http::StatusCode};

use advising_core::health::readiness;

use crate::state::AppState;

/// `GET /readyz`: ready only while the database answers a ping.
pub async fn readyz(State(state): State<AppState>) -> StatusCode {
    let db_up = match state.db.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "database ping failed");
            false
        }
    };
    readiness(db_up)
}
