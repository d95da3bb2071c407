//! SELECT builder over compiled predicates and orders

use sqlx::SqlitePool;
use sqlx::sqlite::SqliteRow;

use super::SqlValue;
use crate::filter::CompiledPredicate;
use crate::schema::EntitySchema;
use crate::sort::CompiledOrder;

/// A list query for one entity.
///
/// Builds `SELECT * FROM <entity> [WHERE ..] [ORDER BY ..]` with one bound
/// value per predicate, in predicate order.
#[derive(Debug, Clone)]
pub struct ListQuery<'s> {
    schema: &'s EntitySchema,
    where_clauses: Vec<String>,
    values: Vec<SqlValue>,
    order_clauses: Vec<String>,
}

impl<'s> ListQuery<'s> {
    /// Create a query over every row of the schema's entity.
    pub fn new(schema: &'s EntitySchema) -> Self {
        Self {
            schema,
            where_clauses: Vec::new(),
            values: Vec::new(),
            order_clauses: Vec::new(),
        }
    }

    /// Add a predicate. `None` leaves the query unfiltered.
    pub fn filter(mut self, predicate: Option<&CompiledPredicate>) -> Self {
        if let Some(predicate) = predicate {
            self.where_clauses.push(predicate.fragment().to_string());
            self.values.push(predicate.sql_value());
        }
        self
    }

    /// Add an ORDER BY fragment. `None` leaves the order unspecified.
    pub fn order(mut self, order: Option<&CompiledOrder>) -> Self {
        if let Some(order) = order {
            self.order_clauses.push(order.fragment().to_string());
        }
        self
    }

    /// Values to bind, in placeholder order
    pub fn values(&self) -> &[SqlValue] {
        &self.values
    }

    /// Build the SQL query string.
    pub fn build_sql(&self) -> String {
        let mut sql = format!("SELECT * FROM {}", self.schema.entity());

        if !self.where_clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.where_clauses.join(" AND "));
        }

        if !self.order_clauses.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_clauses.join(", "));
        }

        sql
    }

    /// Execute the query and decode every matching row.
    pub async fn fetch_all<T>(self, pool: &SqlitePool) -> Result<Vec<T>, sqlx::Error>
    where
        T: for<'r> sqlx::FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let sql = self.build_sql();
        tracing::debug!(sql = %sql, binds = self.values.len(), "Executing list query");

        let mut query = sqlx::query_as::<_, T>(&sql);
        for value in &self.values {
            query = match value {
                SqlValue::String(s) => query.bind(s.as_str()),
                SqlValue::Int(i) => query.bind(*i),
                SqlValue::Float(f) => query.bind(*f),
            };
        }

        query.fetch_all(pool).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, Boardgame};
    use crate::filter::compile_filter;
    use crate::schema::Filterable;
    use crate::schema::FieldType;
    use crate::sort::compile_sort;
    use pretty_assertions::assert_eq;

    fn schema() -> EntitySchema {
        EntitySchema::builder("offers")
            .field("name", FieldType::String)
            .field("price", FieldType::Float)
            .build()
    }

    #[test]
    fn test_unfiltered() {
        let schema = schema();
        let query = ListQuery::new(&schema).filter(None).order(None);
        assert_eq!(query.build_sql(), "SELECT * FROM offers");
        assert!(query.values().is_empty());
    }

    #[test]
    fn test_filter_and_order() {
        let schema = schema();
        let predicate = compile_filter(&schema, "price.le.10").unwrap();
        let order = compile_sort(&schema, "name.desc").unwrap();

        let query = ListQuery::new(&schema)
            .filter(predicate.as_ref())
            .order(order.as_ref());

        assert_eq!(
            query.build_sql(),
            "SELECT * FROM offers WHERE price <= ? ORDER BY name desc"
        );
        assert_eq!(query.values(), &[SqlValue::Float(10.0)]);
    }

    #[test]
    fn test_multiple_predicates() {
        let schema = schema();
        let by_name = compile_filter(&schema, "name.dice").unwrap();
        let by_price = compile_filter(&schema, "price.gt.2").unwrap();

        let query = ListQuery::new(&schema)
            .filter(by_name.as_ref())
            .filter(by_price.as_ref());

        assert_eq!(
            query.build_sql(),
            "SELECT * FROM offers WHERE name LIKE ? AND price > ?"
        );
        assert_eq!(
            query.values(),
            &[SqlValue::String("%dice%".into()), SqlValue::Float(2.0)]
        );
    }

    #[tokio::test]
    async fn test_values_are_bound_not_rendered() {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        catalog::seed(&pool).await.unwrap();

        let predicate = CompiledPredicate::new(
            "name LIKE ?".to_string(),
            "%' OR '1'='1%".to_string(),
            FieldType::String,
        );
        let query = ListQuery::new(Boardgame::schema()).filter(Some(&predicate));
        assert_eq!(
            query.build_sql(),
            "SELECT * FROM boardgames WHERE name LIKE ?"
        );

        let games: Vec<Boardgame> = query.fetch_all(&pool).await.unwrap();
        assert!(games.is_empty());
    }
}
