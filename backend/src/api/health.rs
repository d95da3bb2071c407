//! Liveness and readiness endpoints

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use super::AppState;
use crate::Filterable;
use crate::catalog::{Boardgame, Offer};

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Whether one list endpoint's table can be queried
#[derive(Serialize)]
pub struct EntityStatus {
    pub entity: &'static str,
    pub reachable: bool,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub ready: bool,
    pub entities: Vec<EntityStatus>,
}

async fn healthz() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Ready once every listed entity's table answers a query
async fn readyz(State(state): State<AppState>) -> Json<ReadyResponse> {
    let mut entities = Vec::new();
    for entity in [Boardgame::ENTITY, Offer::ENTITY] {
        let sql = format!("SELECT 1 FROM {entity} LIMIT 1");
        let reachable = sqlx::query(&sql).fetch_optional(&state.db).await.is_ok();
        if !reachable {
            tracing::warn!(entity, "Catalog table not reachable");
        }
        entities.push(EntityStatus { entity, reachable });
    }

    Json(ReadyResponse {
        ready: entities.iter().all(|e| e.reachable),
        entities,
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}
