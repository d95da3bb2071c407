/// A SQL value that can be bound to a query.
///
/// Used by compiled predicates to carry their bound value with the column's type.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    String(String),
    Int(i64),
    Float(f64),
}
