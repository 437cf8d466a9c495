//! Per-table decode plans: the ordered read steps for one record.
//!
//! Steps mirror field order exactly, and each read consumes exactly the
//! width the matching [`super::WidthTerm`] resolves to — both builders route
//! their field checks through the same helper so the cursor can never
//! desynchronize between width evaluation and decoding.

use super::check_field;
use crate::{
    schema::{FieldKind, Heap, Schema, SchemeSet},
    Catalog, Error, Result,
};

/// The primitive read a decode step performs against the record cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOp {
    /// Fixed-width little-endian unsigned read of 1, 2 or 4 bytes.
    Fixed {
        /// Width in bytes.
        size: u8,
        /// Optional bit-flag type name, carried through for renderers.
        flag_type: Option<String>,
    },
    /// Heap-offset read for the named heap; width per layout context.
    Heap(Heap),
    /// Row-index read into the named table; width per layout context.
    TableIndex(String),
    /// Coded-index read for the named scheme; width per layout context.
    CodedIndex(String),
    /// Row-range start read: a single row index into the named table. The
    /// range end is inferred by the consumer, not decoded here.
    RowStart(String),
}

/// One decode step: which read to perform and which field it populates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeStep {
    /// Name of the output field this step populates.
    pub field: String,
    /// The read to perform.
    pub op: ReadOp,
}

/// The ordered decode steps for one table's records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodePlan {
    table: String,
    steps: Vec<DecodeStep>,
}

impl DecodePlan {
    fn build(schema: &Schema, schemes: &SchemeSet, name: &str) -> Result<Self> {
        let table = schema.table(name).ok_or_else(|| Error::UnresolvedReference {
            table: name.to_string(),
            field: String::new(),
            target: name.to_string(),
        })?;

        let mut steps = Vec::with_capacity(table.fields.len());
        for field in &table.fields {
            check_field(table, field, schema, schemes)?;
            let op = match &field.kind {
                FieldKind::FixedInt { size, flag_type } => ReadOp::Fixed {
                    size: *size,
                    flag_type: flag_type.clone(),
                },
                FieldKind::HeapIndex { heap } => ReadOp::Heap(*heap),
                FieldKind::TableRef { target } => ReadOp::TableIndex(target.clone()),
                FieldKind::CodedRef { scheme } => ReadOp::CodedIndex(scheme.clone()),
                FieldKind::RowRange { target } => ReadOp::RowStart(target.clone()),
            };
            steps.push(DecodeStep {
                field: field.name.clone(),
                op,
            });
        }

        Ok(DecodePlan {
            table: table.name.clone(),
            steps,
        })
    }

    /// Name of the table this plan decodes.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// The decode steps, in field order.
    #[must_use]
    pub fn steps(&self) -> &[DecodeStep] {
        &self.steps
    }
}

/// The decode plans of all tables, in catalog order, keyed by table name.
#[derive(Debug, Clone)]
pub struct PlanSet {
    plans: Vec<DecodePlan>,
}

impl PlanSet {
    pub(super) fn build(schema: &Schema, catalog: &Catalog, schemes: &SchemeSet) -> Result<Self> {
        let plans = catalog
            .entries()
            .iter()
            .map(|entry| DecodePlan::build(schema, schemes, &entry.name))
            .collect::<Result<Vec<_>>>()?;

        Ok(PlanSet { plans })
    }

    /// Looks up a table's plan by name.
    #[must_use]
    pub fn get(&self, table: &str) -> Option<&DecodePlan> {
        self.plans.iter().find(|p| p.table == table)
    }

    /// All plans, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &DecodePlan> {
        self.plans.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CodeScheme, TableDefinition};

    #[test]
    fn steps_mirror_field_order() {
        let schema = Schema::new(vec![
            TableDefinition::new("T", 0)
                .with_field(
                    "flags",
                    FieldKind::FixedInt {
                        size: 2,
                        flag_type: Some("TypeAttributes".into()),
                    },
                )
                .with_field("name", FieldKind::HeapIndex { heap: Heap::String })
                .with_field("parent", FieldKind::TableRef { target: "U".into() })
                .with_field("owner", FieldKind::CodedRef { scheme: "S".into() })
                .with_field("members", FieldKind::RowRange { target: "U".into() }),
            TableDefinition::new("U", 1),
        ]);
        let schemes = SchemeSet::new(vec![CodeScheme::new("S", vec!["T".into(), "U".into()])]);
        let catalog = Catalog::build(&schema).unwrap();
        let plans = PlanSet::build(&schema, &catalog, &schemes).unwrap();

        let plan = plans.get("T").unwrap();
        assert_eq!(plan.table(), "T");

        let fields: Vec<&str> = plan.steps().iter().map(|s| s.field.as_str()).collect();
        assert_eq!(fields, vec!["flags", "name", "parent", "owner", "members"]);

        assert_eq!(
            plan.steps()[0].op,
            ReadOp::Fixed {
                size: 2,
                flag_type: Some("TypeAttributes".to_string()),
            }
        );
        assert_eq!(plan.steps()[1].op, ReadOp::Heap(Heap::String));
        assert_eq!(plan.steps()[2].op, ReadOp::TableIndex("U".to_string()));
        assert_eq!(plan.steps()[3].op, ReadOp::CodedIndex("S".to_string()));
        assert_eq!(plan.steps()[4].op, ReadOp::RowStart("U".to_string()));
    }

    #[test]
    fn plan_set_in_catalog_order() {
        let schema = Schema::new(vec![
            TableDefinition::new("Later", 9),
            TableDefinition::new("Earlier", 2),
        ]);
        let schemes = SchemeSet::new(Vec::new());
        let catalog = Catalog::build(&schema).unwrap();
        let plans = PlanSet::build(&schema, &catalog, &schemes).unwrap();

        let names: Vec<&str> = plans.iter().map(DecodePlan::table).collect();
        assert_eq!(names, vec!["Earlier", "Later"]);
    }

    #[test]
    fn unresolved_row_range_is_fatal() {
        let schema = Schema::new(vec![TableDefinition::new("T", 0)
            .with_field("members", FieldKind::RowRange { target: "Gone".into() })]);
        let schemes = SchemeSet::new(Vec::new());
        let catalog = Catalog::build(&schema).unwrap();

        assert!(matches!(
            PlanSet::build(&schema, &catalog, &schemes),
            Err(Error::UnresolvedReference { target, .. }) if target == "Gone"
        ));
    }
}
