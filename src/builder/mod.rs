//! The generation pipeline: schema in, derived artifacts out.
//!
//! [`generate`] is a single-pass batch transformation. The [`Catalog`] is
//! built first since the other builders depend on resolved table ids; the
//! width, plan, dispatch and registry builders then run over the immutable
//! schema and catalog with no shared mutable state, so they execute as two
//! nested [`rayon::join`] pairs. Any builder fault aborts the whole run —
//! a partial artifact set is never produced.

mod catalog;
mod dispatch;
mod plan;
mod registry;
mod width;

pub use catalog::{Catalog, CatalogEntry};
pub use dispatch::{CodedDispatch, DispatchSet};
pub use plan::{DecodePlan, DecodeStep, PlanSet, ReadOp};
pub use registry::{Registry, RegistryEntry};
pub use width::{WidthFormula, WidthSet, WidthTerm};

use crate::{
    schema::{FieldDefinition, FieldKind, Schema, SchemeSet, TableDefinition},
    Error, Result,
};

/// Everything derived from one schema: the complete output of a successful
/// generation run.
///
/// Width and plan sets are ordered like the catalog (ascending by code), so
/// iteration over any artifact set is deterministic.
#[derive(Debug)]
pub struct Artifacts {
    /// Id assignments, table count and the "none" sentinel.
    pub catalog: Catalog,
    /// One width formula per table.
    pub widths: WidthSet,
    /// One decode plan per table.
    pub plans: PlanSet,
    /// One tag-to-table dispatch per referenced coded-index scheme.
    pub dispatch: DispatchSet,
    /// Accessor initialization order for visible tables.
    pub registry: Registry,
}

/// Derives the full artifact set for `schema`.
///
/// # Errors
/// Returns the first generation fault encountered:
/// [`Error::DuplicateCode`] for colliding table codes,
/// [`Error::UnresolvedReference`] for unknown `TableRef`/`RowRange` targets,
/// unknown `CodedRef` schemes, or scheme entries naming unknown tables, and
/// [`Error::UnsupportedKind`] for fixed-width fields outside 1/2/4 bytes.
pub fn generate(schema: &Schema, schemes: &SchemeSet) -> Result<Artifacts> {
    let catalog = Catalog::build(schema)?;

    let ((widths, plans), (dispatch, registry)) = rayon::join(
        || {
            rayon::join(
                || WidthSet::build(schema, &catalog, schemes),
                || PlanSet::build(schema, &catalog, schemes),
            )
        },
        || {
            rayon::join(
                || DispatchSet::build(schema, &catalog, schemes),
                || Registry::build(schema, &catalog),
            )
        },
    );

    Ok(Artifacts {
        widths: widths?,
        plans: plans?,
        dispatch: dispatch?,
        registry,
        catalog,
    })
}

/// Checks that a field's kind has a width/decode rule and that everything it
/// names resolves.
///
/// The width and plan builders both route through this so the two stay on
/// identical width semantics.
fn check_field(
    table: &TableDefinition,
    field: &FieldDefinition,
    schema: &Schema,
    schemes: &SchemeSet,
) -> Result<()> {
    match &field.kind {
        FieldKind::FixedInt { size, .. } => {
            if !matches!(size, 1 | 2 | 4) {
                return Err(Error::UnsupportedKind {
                    table: table.name.clone(),
                    field: field.name.clone(),
                    detail: format!("fixed width of {size} bytes"),
                });
            }
        }
        FieldKind::HeapIndex { .. } => {}
        FieldKind::TableRef { target } | FieldKind::RowRange { target } => {
            if schema.table(target).is_none() {
                return Err(Error::UnresolvedReference {
                    table: table.name.clone(),
                    field: field.name.clone(),
                    target: target.clone(),
                });
            }
        }
        FieldKind::CodedRef { scheme } => {
            if schemes.get(scheme).is_none() {
                return Err(Error::UnresolvedReference {
                    table: table.name.clone(),
                    field: field.name.clone(),
                    target: scheme.clone(),
                });
            }
        }
    }

    Ok(())
}
