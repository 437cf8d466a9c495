//! Per-table record width formulas.
//!
//! A formula is the sum of one term per field, in field order. The builder
//! emits the formula, not a number: evaluation happens once per decoding
//! session, when the concrete [`LayoutContext`] is known.

use super::check_field;
use crate::{
    context::LayoutContext,
    schema::{FieldKind, Heap, Schema, SchemeSet},
    Catalog, Error, Result,
};

/// The width contribution of a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WidthTerm {
    /// A constant width in bytes.
    Fixed(u8),
    /// The resolved width of offsets into the named heap.
    Heap(Heap),
    /// The resolved width of row indices into the named table. Also used
    /// for row-range fields, which store a single row index.
    Table(String),
    /// The resolved width of coded references using the named scheme.
    Coded(String),
}

/// The closed-form byte width of one record of a table, as a function of
/// the layout context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidthFormula {
    table: String,
    terms: Vec<WidthTerm>,
}

impl WidthFormula {
    fn build(schema: &Schema, schemes: &SchemeSet, name: &str) -> Result<Self> {
        let table = schema.table(name).ok_or_else(|| Error::UnresolvedReference {
            table: name.to_string(),
            field: String::new(),
            target: name.to_string(),
        })?;

        let mut terms = Vec::with_capacity(table.fields.len());
        for field in &table.fields {
            check_field(table, field, schema, schemes)?;
            terms.push(match &field.kind {
                FieldKind::FixedInt { size, .. } => WidthTerm::Fixed(*size),
                FieldKind::HeapIndex { heap } => WidthTerm::Heap(*heap),
                FieldKind::TableRef { target } | FieldKind::RowRange { target } => {
                    WidthTerm::Table(target.clone())
                }
                FieldKind::CodedRef { scheme } => WidthTerm::Coded(scheme.clone()),
            });
        }

        Ok(WidthFormula {
            table: table.name.clone(),
            terms,
        })
    }

    /// Name of the table this formula describes.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// The per-field terms, in field order.
    #[must_use]
    pub fn terms(&self) -> &[WidthTerm] {
        &self.terms
    }

    /// Evaluates the total record width under the given layout.
    #[must_use]
    pub fn eval(&self, ctx: &LayoutContext) -> u32 {
        self.terms
            .iter()
            .map(|term| {
                u32::from(match term {
                    WidthTerm::Fixed(size) => *size,
                    WidthTerm::Heap(heap) => ctx.heap_index_width(*heap),
                    WidthTerm::Table(target) => ctx.table_index_width(target),
                    WidthTerm::Coded(scheme) => ctx.coded_index_width(scheme),
                })
            })
            .sum()
    }
}

/// The width formulas of all tables, in catalog order, keyed by table name.
#[derive(Debug, Clone)]
pub struct WidthSet {
    formulas: Vec<WidthFormula>,
}

impl WidthSet {
    pub(super) fn build(schema: &Schema, catalog: &Catalog, schemes: &SchemeSet) -> Result<Self> {
        let formulas = catalog
            .entries()
            .iter()
            .map(|entry| WidthFormula::build(schema, schemes, &entry.name))
            .collect::<Result<Vec<_>>>()?;

        Ok(WidthSet { formulas })
    }

    /// Looks up a table's formula by name.
    #[must_use]
    pub fn get(&self, table: &str) -> Option<&WidthFormula> {
        self.formulas.iter().find(|f| f.table == table)
    }

    /// All formulas, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &WidthFormula> {
        self.formulas.iter()
    }
}
