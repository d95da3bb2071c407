//! List endpoint parameters and the logging wrapper around the compilers

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::CompileResult;
use crate::filter::{CompiledPredicate, compile_filter};
use crate::query::ListQuery;
use crate::schema::EntitySchema;
use crate::sort::{CompiledOrder, compile_sort};

/// Raw `filterBy` / `sortBy` query-string values.
///
/// Missing parameters deserialize to empty strings, which compile to no-ops.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    #[serde(rename = "filterBy", default)]
    pub filter_by: String,
    #[serde(rename = "sortBy", default)]
    pub sort_by: String,
}

/// Both expressions of a list request, compiled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledList {
    pub predicate: Option<CompiledPredicate>,
    pub order: Option<CompiledOrder>,
}

impl ListParams {
    pub fn new(filter_by: impl Into<String>, sort_by: impl Into<String>) -> Self {
        Self {
            filter_by: filter_by.into(),
            sort_by: sort_by.into(),
        }
    }

    /// Compile both expressions against `schema`, logging the outcome.
    ///
    /// The filter is compiled first; a filter error is returned without
    /// looking at the sort.
    pub fn compile(&self, schema: &EntitySchema) -> CompileResult<CompiledList> {
        let entity = schema.entity();

        let predicate = compile_filter(schema, &self.filter_by).inspect_err(|e| {
            warn!(entity, filter_by = %self.filter_by, kind = e.kind(), error = %e, "Rejected filter");
        })?;
        if let Some(ref predicate) = predicate {
            debug!(entity, filter_by = %self.filter_by, fragment = %predicate.fragment(), "Filtering");
        }

        let order = compile_sort(schema, &self.sort_by).inspect_err(|e| {
            warn!(entity, sort_by = %self.sort_by, kind = e.kind(), error = %e, "Rejected sort");
        })?;
        if let Some(ref order) = order {
            debug!(entity, sort_by = %self.sort_by, fragment = %order.fragment(), "Sorting");
        }

        Ok(CompiledList { predicate, order })
    }
}

impl CompiledList {
    /// Turn the compiled expressions into an executable list query.
    pub fn to_query<'s>(&self, schema: &'s EntitySchema) -> ListQuery<'s> {
        ListQuery::new(schema)
            .filter(self.predicate.as_ref())
            .order(self.order.as_ref())
    }
}
