//! Catalog list endpoints

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteRow;

use super::{AppState, ServiceError};
use crate::Filterable;
use crate::catalog::{Boardgame, Offer};
use crate::params::ListParams;

/// Compile the request's expressions against `T`'s schema and fetch the rows.
///
/// Nothing is sent to the database when compilation fails.
pub async fn list<T>(pool: &SqlitePool, params: &ListParams) -> Result<Vec<T>, ServiceError>
where
    T: Filterable + for<'r> sqlx::FromRow<'r, SqliteRow> + Send + Unpin,
{
    let schema = T::schema();
    let compiled = params.compile(schema)?;
    let rows = compiled.to_query(schema).fetch_all(pool).await?;
    Ok(rows)
}

/// List board games, e.g. `/boardgames?filterBy=price.lt.50&sortBy=name.asc`
async fn list_boardgames(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Boardgame>>, ServiceError> {
    list(&state.db, &params).await.map(Json)
}

/// List marketplace offers
async fn list_offers(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Offer>>, ServiceError> {
    list(&state.db, &params).await.map(Json)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/boardgames", get(list_boardgames))
        .route("/offers", get(list_offers))
}
