//! Compile errors for `filterBy` / `sortBy` expressions

use thiserror::Error;

use crate::schema::FieldType;

/// Result type for expression compilation
pub type CompileResult<T> = Result<T, CompileError>;

/// Why an expression was rejected.
///
/// Every variant is a deterministic validation failure: retrying with the same
/// input yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Wrong number of `.`-separated segments
    #[error("malformed {param} query parameter '{input}', expected {expected}")]
    MalformedExpression {
        param: &'static str,
        input: String,
        expected: &'static str,
    },

    /// A required segment is empty
    #[error("malformed {param} query parameter '{input}', segments can't be empty")]
    EmptyComponent { param: &'static str, input: String },

    /// Operator token outside the fixed table
    #[error("operator '{0}' not allowed, expected one of lt, le, gt, ge, eq")]
    UnknownOperator(String),

    /// Field is not declared on the entity
    #[error("no field named '{field}' on {entity}")]
    UnknownField { entity: String, field: String },

    /// Surface form does not fit the field's type class
    #[error("field '{field}' is a {field_type} field, {reason}")]
    TypeMismatch {
        field: String,
        field_type: FieldType,
        reason: &'static str,
    },

    /// Value does not parse as the field's type
    #[error("value '{value}' is not a valid {field_type} for field '{field}'")]
    InvalidValueType {
        field: String,
        field_type: FieldType,
        value: String,
    },

    /// Sort direction other than `asc` / `desc`
    #[error("sort direction '{0}' not allowed, expected asc or desc")]
    InvalidDirection(String),

    /// Field type cannot be ordered
    #[error("field '{field}' is not sortable")]
    NotSortable { field: String },
}

impl CompileError {
    /// Stable machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            CompileError::MalformedExpression { .. } => "malformed_expression",
            CompileError::EmptyComponent { .. } => "empty_component",
            CompileError::UnknownOperator(_) => "unknown_operator",
            CompileError::UnknownField { .. } => "unknown_field",
            CompileError::TypeMismatch { .. } => "type_mismatch",
            CompileError::InvalidValueType { .. } => "invalid_value_type",
            CompileError::InvalidDirection(_) => "invalid_direction",
            CompileError::NotSortable { .. } => "not_sortable",
        }
    }
}
