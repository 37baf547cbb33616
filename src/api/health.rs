//! Liveness and readiness endpoints

use std::time::Instant;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use super::state::AppState;

#[derive(Serialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl HealthStatus {
    fn status_code(self) -> StatusCode {
        match self {
            Self::Healthy => StatusCode::OK,
            Self::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct Liveness {
    pub status: HealthStatus,
    pub version: &'static str,
}

/// Result of querying the team table
#[derive(Serialize, Debug)]
pub struct DatabaseProbe {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teams: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub elapsed_ms: u64,
}

#[derive(Serialize, Debug)]
pub struct Readiness {
    pub status: HealthStatus,
    pub version: &'static str,
    pub database: DatabaseProbe,
}

pub async fn health_check() -> Json<Liveness> {
    Json(Liveness {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// 200 when the team tables answer, 503 otherwise
pub async fn ready_check(State(state): State<AppState>) -> (StatusCode, Json<Readiness>) {
    let database = probe_database(&state).await;
    let status = database.status;

    (
        status.status_code(),
        Json(Readiness {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database,
        }),
    )
}

async fn probe_database(state: &AppState) -> DatabaseProbe {
    let started = Instant::now();
    let result = state.teams.get_teams().await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match result {
        Ok(teams) => DatabaseProbe {
            status: HealthStatus::Healthy,
            teams: Some(teams.len()),
            error: None,
            elapsed_ms,
        },
        Err(e) => DatabaseProbe {
            status: HealthStatus::Unhealthy,
            teams: None,
            error: Some(e.detail()),
            elapsed_ms,
        },
    }
}
