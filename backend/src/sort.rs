//! `sortBy` expression compiler (`field.direction`)

use std::fmt;

use crate::error::{CompileError, CompileResult};
use crate::schema::EntitySchema;

/// Query-string parameter name, used in error messages
pub const SORT_PARAM: &str = "sortBy";

/// Sort direction for ORDER BY fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order (A-Z, 1-9)
    Asc,
    /// Descending order (Z-A, 9-1)
    Desc,
}

impl SortDirection {
    /// Only the exact lowercase tokens are accepted
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A normalized ORDER BY fragment, e.g. `name asc`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledOrder {
    fragment: String,
}

impl CompiledOrder {
    pub fn fragment(&self) -> &str {
        &self.fragment
    }
}

/// Compile a raw `sortBy` value against `schema`.
///
/// Returns `Ok(None)` for an empty expression.
pub fn compile_sort(schema: &EntitySchema, sort_by: &str) -> CompileResult<Option<CompiledOrder>> {
    if sort_by.is_empty() {
        return Ok(None);
    }

    let segments: Vec<&str> = sort_by.split('.').collect();
    let [field, direction] = segments[..] else {
        return Err(CompileError::MalformedExpression {
            param: SORT_PARAM,
            input: sort_by.to_string(),
            expected: "field.direction",
        });
    };

    if field.is_empty() || direction.is_empty() {
        return Err(CompileError::EmptyComponent {
            param: SORT_PARAM,
            input: sort_by.to_string(),
        });
    }

    let direction = SortDirection::from_token(direction)
        .ok_or_else(|| CompileError::InvalidDirection(direction.to_string()))?;

    let field = schema
        .resolve(field)
        .ok_or_else(|| CompileError::UnknownField {
            entity: schema.entity().to_string(),
            field: field.to_string(),
        })?;

    if !field.field_type.is_scalar() {
        return Err(CompileError::NotSortable {
            field: field.name.clone(),
        });
    }

    Ok(Some(CompiledOrder {
        fragment: format!("{} {}", field.name, direction),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldType;
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

    fn fragment(input: &str) -> String {
        compile_sort(&schema(), input)
            .unwrap()
            .unwrap()
            .fragment()
            .to_string()
    }

    #[test]
    fn test_sorts() {
        assert_eq!(fragment("name.asc"), "name asc");
        assert_eq!(fragment("price.desc"), "price desc");
        assert_eq!(fragment("playernumber.desc"), "playerNumber desc");
    }

    #[test]
    fn test_no_sort() {
        assert_eq!(compile_sort(&schema(), "").unwrap(), None);
    }

    #[test]
    fn test_malformed() {
        for input in ["name", "name.asc.desc", "a.b.c.d"] {
            assert_matches!(
                compile_sort(&schema(), input),
                Err(CompileError::MalformedExpression { .. }),
                "input {input}"
            );
        }
    }

    #[test]
    fn test_empty_segments() {
        for input in [".asc", "name.", "."] {
            assert_matches!(
                compile_sort(&schema(), input),
                Err(CompileError::EmptyComponent { .. }),
                "input {input}"
            );
        }
    }

    #[test]
    fn test_direction() {
        assert_eq!(
            compile_sort(&schema(), "name.sideways"),
            Err(CompileError::InvalidDirection("sideways".into()))
        );
        assert_eq!(
            compile_sort(&schema(), "name.ASC"),
            Err(CompileError::InvalidDirection("ASC".into()))
        );
        // Direction is checked before the field exists
        assert_eq!(
            compile_sort(&schema(), "rating.up"),
            Err(CompileError::InvalidDirection("up".into()))
        );
    }

    #[test]
    fn test_unknown_field() {
        assert_matches!(
            compile_sort(&schema(), "rating.asc"),
            Err(CompileError::UnknownField { .. })
        );
    }

    #[test]
    fn test_not_sortable() {
        assert_eq!(
            compile_sort(&schema(), "tags.asc"),
            Err(CompileError::NotSortable {
                field: "tags".into()
            })
        );
    }
}
