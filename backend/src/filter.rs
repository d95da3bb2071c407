//! `filterBy` expression compiler
//!
//! Two surface forms are accepted:
//! - `field.value` - partial match on a string field (`name LIKE ?`, `%value%`)
//! - `field.operator.value` - typed comparison on a numeric field (`price < ?`, `value`)
//!
//! The value is always returned separately for parameter binding and never
//! written into the fragment.

use crate::error::{CompileError, CompileResult};
use crate::operator::Operator;
use crate::query::SqlValue;
use crate::schema::{EntitySchema, Field, FieldType};
use crate::validator::is_representable;

/// Query-string parameter name, used in error messages
pub const FILTER_PARAM: &str = "filterBy";

/// A parsed, not yet schema-checked, filter expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterExpression<'a> {
    /// `field.value`
    Contains { field: &'a str, value: &'a str },
    /// `field.operator.value`
    Compare {
        field: &'a str,
        operator: Operator,
        value: &'a str,
    },
}

impl<'a> FilterExpression<'a> {
    /// Parse the raw parameter. An empty string means "no filter".
    pub fn parse(input: &'a str) -> CompileResult<Option<Self>> {
        if input.is_empty() {
            return Ok(None);
        }

        let segments: Vec<&str> = input.split('.').collect();
        let expr = match segments[..] {
            [field, value] => {
                if field.is_empty() || value.is_empty() {
                    return Err(empty_component(input));
                }
                FilterExpression::Contains { field, value }
            }
            [field, operator, value] => {
                if field.is_empty() || operator.is_empty() || value.is_empty() {
                    return Err(empty_component(input));
                }
                let operator = Operator::from_token(operator)
                    .ok_or_else(|| CompileError::UnknownOperator(operator.to_string()))?;
                FilterExpression::Compare {
                    field,
                    operator,
                    value,
                }
            }
            _ => {
                return Err(CompileError::MalformedExpression {
                    param: FILTER_PARAM,
                    input: input.to_string(),
                    expected: "field.value or field.operator.value",
                });
            }
        };

        Ok(Some(expr))
    }

    /// Field segment as written by the caller
    pub fn field(&self) -> &'a str {
        match self {
            FilterExpression::Contains { field, .. } | FilterExpression::Compare { field, .. } => {
                *field
            }
        }
    }

    /// Value segment as written by the caller
    pub fn value(&self) -> &'a str {
        match self {
            FilterExpression::Contains { value, .. } | FilterExpression::Compare { value, .. } => {
                *value
            }
        }
    }

    /// Check the expression against `schema` and emit the predicate.
    pub fn compile(&self, schema: &EntitySchema) -> CompileResult<CompiledPredicate> {
        let field = schema
            .resolve(self.field())
            .ok_or_else(|| CompileError::UnknownField {
                entity: schema.entity().to_string(),
                field: self.field().to_string(),
            })?;

        match *self {
            FilterExpression::Contains { value, .. } => {
                if field.field_type != FieldType::String {
                    return Err(CompileError::TypeMismatch {
                        field: field.name.clone(),
                        field_type: field.field_type,
                        reason: "partial match needs a string field, use field.operator.value",
                    });
                }
                check_value(field, value)?;

                Ok(CompiledPredicate::new(
                    format!("{} LIKE ?", field.name),
                    format!("%{value}%"),
                    field.field_type,
                ))
            }
            FilterExpression::Compare {
                operator, value, ..
            } => {
                if field.field_type == FieldType::String {
                    return Err(CompileError::TypeMismatch {
                        field: field.name.clone(),
                        field_type: field.field_type,
                        reason: "comparison operators are not supported, use field.value",
                    });
                }
                check_value(field, value)?;

                Ok(CompiledPredicate::new(
                    format!("{} {} ?", field.name, operator.symbol()),
                    value.to_string(),
                    field.field_type,
                ))
            }
        }
    }
}

fn empty_component(input: &str) -> CompileError {
    CompileError::EmptyComponent {
        param: FILTER_PARAM,
        input: input.to_string(),
    }
}

fn check_value(field: &Field, value: &str) -> CompileResult<()> {
    if is_representable(field.field_type, value) {
        Ok(())
    } else {
        Err(CompileError::InvalidValueType {
            field: field.name.clone(),
            field_type: field.field_type,
            value: value.to_string(),
        })
    }
}

/// A WHERE fragment with exactly one `?` placeholder and the value to bind to it.
///
/// Only the compiler produces these, so the fragment holds nothing but a
/// declared field name, a fixed operator and the placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPredicate {
    fragment: String,
    bound_value: String,
    field_type: FieldType,
}

impl CompiledPredicate {
    pub(crate) fn new(fragment: String, bound_value: String, field_type: FieldType) -> Self {
        Self {
            fragment,
            bound_value,
            field_type,
        }
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Value for the placeholder, `%`-wrapped for partial matches
    pub fn bound_value(&self) -> &str {
        &self.bound_value
    }

    /// Type of the filtered field, drives typed binding
    pub fn field_type(&self) -> FieldType {
        self.field_type
    }

    /// The bound value converted to the field's column type.
    ///
    /// Numeric values were validated during compilation, so the string
    /// fallback is only reached for string fields.
    pub fn sql_value(&self) -> SqlValue {
        let raw = self.bound_value.as_str();
        match self.field_type {
            FieldType::Integer => raw
                .parse()
                .map_or_else(|_| SqlValue::String(raw.to_string()), SqlValue::Int),
            FieldType::Float => raw
                .parse()
                .map_or_else(|_| SqlValue::String(raw.to_string()), SqlValue::Float),
            FieldType::String | FieldType::Other => SqlValue::String(raw.to_string()),
        }
    }
}

/// Compile a raw `filterBy` value against `schema`.
///
/// Returns `Ok(None)` for an empty expression.
pub fn compile_filter(
    schema: &EntitySchema,
    filter_by: &str,
) -> CompileResult<Option<CompiledPredicate>> {
    FilterExpression::parse(filter_by)?
        .map(|expr| expr.compile(schema))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    fn schema() -> EntitySchema {
        EntitySchema::builder("boardgames")
            .field("name", FieldType::String)
            .field("playerNumber", FieldType::Integer)
            .field("price", FieldType::Float)
            .field("tags", FieldType::Other)
            .build()
    }

    fn compile(input: &str) -> CompileResult<Option<CompiledPredicate>> {
        compile_filter(&schema(), input)
    }

    #[test]
    fn test_parse_forms() {
        assert_eq!(
            FilterExpression::parse("name.a").unwrap(),
            Some(FilterExpression::Contains {
                field: "name",
                value: "a"
            })
        );
        assert_eq!(
            FilterExpression::parse("price.ge.3").unwrap(),
            Some(FilterExpression::Compare {
                field: "price",
                operator: Operator::Ge,
                value: "3"
            })
        );
        assert_eq!(FilterExpression::parse("").unwrap(), None);
    }

    #[test]
    fn test_partial_match() {
        let predicate = compile("name.a").unwrap().unwrap();
        assert_eq!(predicate.fragment(), "name LIKE ?");
        assert_eq!(predicate.bound_value(), "%a%");
        assert_eq!(predicate.sql_value(), SqlValue::String("%a%".into()));
    }

    #[test]
    fn test_comparisons() {
        let cases = [
            ("price.lt.11", "price < ?", "11"),
            ("price.le.10", "price <= ?", "10"),
            ("playerNumber.gt.2", "playerNumber > ?", "2"),
            ("playerNumber.ge.2", "playerNumber >= ?", "2"),
            ("playerNumber.eq.4", "playerNumber == ?", "4"),
        ];
        for (input, fragment, value) in cases {
            let predicate = compile(input).unwrap().unwrap();
            assert_eq!(predicate.fragment(), fragment, "fragment for {input}");
            assert_eq!(predicate.bound_value(), value, "value for {input}");
        }
    }

    #[test]
    fn test_typed_values() {
        let predicate = compile("playerNumber.eq.4").unwrap().unwrap();
        assert_eq!(predicate.sql_value(), SqlValue::Int(4));

        let predicate = compile("price.lt.9.5");
        assert_matches!(predicate, Err(CompileError::MalformedExpression { .. }));

        let predicate = compile("price.lt.1e1").unwrap().unwrap();
        assert_eq!(predicate.sql_value(), SqlValue::Float(10.0));
    }

    #[test]
    fn test_field_uses_declared_spelling() {
        let predicate = compile("PLAYERNUMBER.lt.3").unwrap().unwrap();
        assert_eq!(predicate.fragment(), "playerNumber < ?");
    }

    #[test]
    fn test_segment_count() {
        assert_matches!(
            compile("name"),
            Err(CompileError::MalformedExpression { .. })
        );
        assert_matches!(
            compile("name.a.a.a"),
            Err(CompileError::MalformedExpression { .. })
        );
    }

    #[test]
    fn test_empty_segments() {
        for input in [".name", "name.", "name..a", ".lt.3", "price.lt.", "."] {
            assert_matches!(
                compile(input),
                Err(CompileError::EmptyComponent { .. }),
                "input {input}"
            );
        }
    }

    #[test]
    fn test_unknown_operator() {
        assert_eq!(
            compile("price.asd.10"),
            Err(CompileError::UnknownOperator("asd".into()))
        );
    }

    #[test]
    fn test_operator_checked_before_field() {
        assert_eq!(
            compile("missing.xx.10"),
            Err(CompileError::UnknownOperator("xx".into()))
        );
    }

    #[test]
    fn test_unknown_field() {
        assert_matches!(
            compile("test.a"),
            Err(CompileError::UnknownField { field, .. }) if field == "test"
        );
        assert_matches!(
            compile("test.lt.a"),
            Err(CompileError::UnknownField { .. })
        );
    }

    #[test]
    fn test_form_must_match_field_type() {
        assert_matches!(
            compile("name.eq.asd"),
            Err(CompileError::TypeMismatch { .. })
        );
        assert_matches!(compile("price.10"), Err(CompileError::TypeMismatch { .. }));
        assert_matches!(compile("tags.a"), Err(CompileError::TypeMismatch { .. }));
    }

    #[test]
    fn test_value_type() {
        assert_matches!(
            compile("price.lt.a"),
            Err(CompileError::InvalidValueType { .. })
        );
        assert_matches!(
            compile("playerNumber.lt.2x"),
            Err(CompileError::InvalidValueType { .. })
        );
        assert_matches!(
            compile("name.test_a"),
            Err(CompileError::InvalidValueType { .. })
        );
        assert_matches!(
            compile("tags.eq.1"),
            Err(CompileError::InvalidValueType { .. })
        );
    }

    #[test]
    fn test_value_never_in_fragment() {
        let predicate = compile("name.Catan").unwrap().unwrap();
        assert!(!predicate.fragment().contains("Catan"));
        assert_eq!(predicate.fragment().matches('?').count(), 1);
    }
}
