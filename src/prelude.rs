//! Convenient re-exports of the types most consumers need.
//!
//! ```rust
//! use rowplan::prelude::*;
//! ```

pub use crate::{
    builder::{
        generate, Artifacts, Catalog, CatalogEntry, CodedDispatch, DecodePlan, DecodeStep,
        DispatchSet, PlanSet, ReadOp, Registry, RegistryEntry, WidthFormula, WidthSet, WidthTerm,
    },
    context::LayoutContext,
    decode::{FieldValue, Record},
    schema::{CodeScheme, FieldDefinition, FieldKind, Heap, Schema, SchemeSet, TableDefinition},
    Error, Result,
};
