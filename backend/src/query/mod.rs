//! Query assembly for compiled list expressions
//!
//! Compiled fragments are combined into a single parameterized SELECT and
//! executed through sqlx. Values are only ever bound, never formatted into
//! the SQL text.

mod builder;
mod value;

pub use builder::ListQuery;
pub use value::SqlValue;
