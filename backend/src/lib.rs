//! Filter/sort expression compiler for catalog list endpoints
//!
//! List endpoints take two compact query parameters:
//!
//! - `filterBy`: `field.value` (partial match on a string field) or
//!   `field.operator.value` (comparison on a numeric field), with operators
//!   `lt`, `le`, `gt`, `ge` and `eq`
//! - `sortBy`: `field.asc` or `field.desc`
//!
//! Both are compiled against an entity's [`EntitySchema`] into parameterized
//! fragments. Field names come from the schema, operators from a fixed table,
//! and values are only ever bound:
//!
//! ```rust,ignore
//! use catalog_filter::{Filterable, compile_filter, compile_sort};
//!
//! #[derive(Filterable)]
//! #[filter(entity = "boardgames")]
//! struct Boardgame {
//!     name: String,
//!     price: f64,
//! }
//!
//! let predicate = compile_filter(Boardgame::schema(), "price.lt.10")?.unwrap();
//! assert_eq!(predicate.fragment(), "price < ?");
//! assert_eq!(predicate.bound_value(), "10");
//!
//! let order = compile_sort(Boardgame::schema(), "name.desc")?.unwrap();
//! assert_eq!(order.fragment(), "name desc");
//! ```

// Lets `#[derive(Filterable)]` expand to `::catalog_filter::..` paths inside this crate too
extern crate self as catalog_filter;

pub mod api;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod filter;
pub mod operator;
pub mod params;
pub mod query;
pub mod schema;
pub mod sort;
pub mod validator;

pub use catalog_filter_macros::Filterable;
pub use error::{CompileError, CompileResult};
pub use filter::{CompiledPredicate, FilterExpression, compile_filter};
pub use operator::Operator;
pub use params::{CompiledList, ListParams};
pub use query::{ListQuery, SqlValue};
pub use schema::{EntitySchema, EntitySchemaBuilder, Field, FieldType, Filterable};
pub use sort::{CompiledOrder, SortDirection, compile_sort};
pub use validator::is_representable;

/// Support items for derive-generated code
#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::OnceCell;
}
