//! Catalog entities served by the list endpoints
//!
//! The schemas are derived from the struct definitions, so adding a column
//! here makes it filterable and sortable without any query code.

use serde::Serialize;
use sqlx::SqlitePool;

use crate::Filterable;

/// A board game in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, Filterable)]
#[filter(entity = "boardgames")]
pub struct Boardgame {
    pub id: i64,
    pub name: String,
    pub publisher: String,
    pub player_number: i64,
    pub price: f64,
    /// Tag names. Not a table column; declared so the schema carries a
    /// collection field, which can be neither filtered nor sorted
    #[sqlx(skip)]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// A marketplace offer for a catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, Filterable)]
#[filter(entity = "offers")]
pub struct Offer {
    pub uuid: String,
    #[filter(rename = "type")]
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub price: f64,
}

const CREATE_TABLES: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS boardgames (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        publisher TEXT NOT NULL,
        player_number INTEGER NOT NULL,
        price REAL NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS offers (
        uuid TEXT PRIMARY KEY,
        type TEXT NOT NULL,
        name TEXT NOT NULL,
        price REAL NOT NULL
    )",
];

const BOARDGAMES: &[(&str, &str, i64, f64)] = &[
    ("Catan", "Kosmos", 4, 39.99),
    ("Azul", "PlanBGames", 4, 29.5),
    ("Gloomhaven", "Cephalofair", 4, 140.0),
    ("Patchwork", "Lookout", 2, 19.0),
    ("Wingspan", "StonemaierGames", 5, 55.0),
];

const OFFERS: &[(&str, &str, &str, f64)] = &[
    ("6f1c2a0e-0001-4c1d-9a51-000000000001", "boardgame", "Catan", 25.0),
    ("6f1c2a0e-0002-4c1d-9a51-000000000002", "boardgame", "Azul", 18.0),
    ("6f1c2a0e-0003-4c1d-9a51-000000000003", "expansion", "Seafarers", 12.5),
];

/// Create the catalog tables.
pub async fn create_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for ddl in CREATE_TABLES {
        sqlx::query(*ddl).execute(pool).await?;
    }
    Ok(())
}

/// Create the catalog tables and fill them with demo rows.
pub async fn seed(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    create_tables(pool).await?;

    for (id, (name, publisher, player_number, price)) in (1_i64..).zip(BOARDGAMES) {
        sqlx::query(
            "INSERT OR IGNORE INTO boardgames (id, name, publisher, player_number, price)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(*name)
        .bind(*publisher)
        .bind(*player_number)
        .bind(*price)
        .execute(pool)
        .await?;
    }

    for (uuid, kind, name, price) in OFFERS {
        sqlx::query("INSERT OR IGNORE INTO offers (uuid, type, name, price) VALUES (?, ?, ?, ?)")
            .bind(*uuid)
            .bind(*kind)
            .bind(*name)
            .bind(*price)
            .execute(pool)
            .await?;
    }

    tracing::info!(
        boardgames = BOARDGAMES.len(),
        offers = OFFERS.len(),
        "Seeded demo catalog"
    );
    Ok(())
}
