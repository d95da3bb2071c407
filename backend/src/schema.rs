//! Entity schemas for filter and sort compilation
//!
//! An [`EntitySchema`] is the statically declared table of filterable fields
//! for one entity type. It is built once (usually by `#[derive(Filterable)]`)
//! and shared read-only by every request that compiles a `filterBy` or
//! `sortBy` expression against it.

use std::fmt;

/// Semantic type of a declared field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Text column
    String,
    /// Whole-number column
    Integer,
    /// Floating-point column (single or double precision)
    Float,
    /// Relations, collections and anything else that is not a plain scalar
    Other,
}

impl FieldType {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Other => "other",
        }
    }

    /// Scalar types are orderable and therefore sortable
    pub fn is_scalar(&self) -> bool {
        matches!(self, FieldType::String | FieldType::Integer | FieldType::Float)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// A single declared field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// Declared spelling, used verbatim in compiled fragments
    pub name: String,
    pub field_type: FieldType,
}

/// Ordered, case-insensitive mapping from field name to [`FieldType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySchema {
    entity: String,
    fields: Vec<Field>,
}

impl EntitySchema {
    /// Start declaring the schema for `entity` (normally its table name).
    pub fn builder(entity: impl Into<String>) -> EntitySchemaBuilder {
        EntitySchemaBuilder {
            entity: entity.into(),
            fields: Vec::new(),
        }
    }

    /// Entity (table) name this schema describes
    pub fn entity(&self) -> &str {
        &self.entity
    }

    /// Declared fields in declaration order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Look up a field by name, ignoring ASCII case.
    pub fn resolve(&self, name: &str) -> Option<&Field> {
        self.fields
            .iter()
            .find(|field| field.name.eq_ignore_ascii_case(name))
    }

    /// Semantic type of `name`, or `None` when the entity has no such field.
    pub fn field_type(&self, name: &str) -> Option<FieldType> {
        self.resolve(name).map(|field| field.field_type)
    }
}

/// Builder for [`EntitySchema`].
///
/// Redeclaring a name (in any case) replaces the earlier declaration in place,
/// so lookups stay unambiguous.
#[derive(Debug, Clone)]
pub struct EntitySchemaBuilder {
    entity: String,
    fields: Vec<Field>,
}

impl EntitySchemaBuilder {
    /// Declare a field.
    pub fn field(mut self, name: impl Into<String>, field_type: FieldType) -> Self {
        let name = name.into();
        match self
            .fields
            .iter_mut()
            .find(|existing| existing.name.eq_ignore_ascii_case(&name))
        {
            Some(existing) => {
                existing.name = name;
                existing.field_type = field_type;
            }
            None => self.fields.push(Field { name, field_type }),
        }
        self
    }

    pub fn build(self) -> EntitySchema {
        EntitySchema {
            entity: self.entity,
            fields: self.fields,
        }
    }
}

/// An entity type with a statically declared filter schema.
///
/// Implemented by `#[derive(Filterable)]` from `catalog-filter-macros`.
pub trait Filterable {
    /// Entity (table) name
    const ENTITY: &'static str;

    /// The schema, built on first use and shared afterwards
    fn schema() -> &'static EntitySchema;
}
