//! Runtime application of decode plans against record data.
//!
//! A [`crate::DecodePlan`] is applied to a sequential cursor: steps execute
//! strictly in field order, each consuming exactly the width its matching
//! width term resolves to under the same [`LayoutContext`]. Decoding a
//! record is all-or-nothing — on any cursor fault the half-built record is
//! dropped and the error surfaces to the caller. Records are independent of
//! each other and safe to decode concurrently from separate cursors.

use crate::{
    builder::{DecodePlan, DispatchSet, ReadOp},
    context::LayoutContext,
    io::{read_le_at, read_le_at_dyn},
    schema::Heap,
    Error, Result,
};

/// One decoded field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// A fixed-width unsigned integer, zero-extended to 32 bits. Fields
    /// with a flag reinterpretation still carry the raw integer here.
    UInt(u32),
    /// An offset into a shared heap.
    HeapOffset {
        /// The heap the offset points into.
        heap: Heap,
        /// The raw offset value.
        offset: u32,
    },
    /// A row index into another table.
    RowIndex {
        /// Name of the referenced table.
        table: String,
        /// The 1-based row index; 0 means a null reference.
        row: u32,
    },
    /// A decoded coded reference.
    Coded {
        /// Name of the scheme the value was encoded under.
        scheme: String,
        /// Catalog id of the resolved table, or the "none" sentinel when
        /// the tag named an internal-only table.
        table: u16,
        /// The 1-based row index; 0 means a null reference.
        row: u32,
    },
    /// The start of a row range in another table.
    RowStart {
        /// Name of the table the range lives in.
        table: String,
        /// The 1-based index of the range's first row.
        row: u32,
    },
}

/// One fully decoded record: field names paired with their values, in
/// field order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, FieldValue)>,
}

impl Record {
    /// All fields, in decode order.
    #[must_use]
    pub fn fields(&self) -> &[(String, FieldValue)] {
        &self.fields
    }

    /// Looks up a field's value by name.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }
}

impl DecodePlan {
    /// Decodes one record at `offset`, advancing `offset` by exactly the
    /// record's total width on success.
    ///
    /// `ctx` must be the same layout context the record's width was
    /// evaluated under, and `dispatch` must come from the same generation
    /// run as the plan.
    ///
    /// # Errors
    /// Returns [`Error::OutOfBounds`] if the cursor runs past the available
    /// bytes, and [`Error::InvalidCodedTag`] for a tag outside its scheme's
    /// tag space. No partially decoded record is ever returned.
    pub fn decode(
        &self,
        data: &[u8],
        offset: &mut usize,
        ctx: &LayoutContext,
        dispatch: &DispatchSet,
    ) -> Result<Record> {
        let mut fields = Vec::with_capacity(self.steps().len());

        for step in self.steps() {
            let value = match &step.op {
                ReadOp::Fixed { size, .. } => FieldValue::UInt(match size {
                    1 => u32::from(read_le_at::<u8>(data, offset)?),
                    2 => u32::from(read_le_at::<u16>(data, offset)?),
                    4 => read_le_at::<u32>(data, offset)?,
                    other => {
                        return Err(Error::UnsupportedKind {
                            table: self.table().to_string(),
                            field: step.field.clone(),
                            detail: format!("fixed width of {other} bytes"),
                        })
                    }
                }),
                ReadOp::Heap(heap) => FieldValue::HeapOffset {
                    heap: *heap,
                    offset: read_le_at_dyn(data, offset, ctx.heap_index_width(*heap) > 2)?,
                },
                ReadOp::TableIndex(target) => FieldValue::RowIndex {
                    table: target.clone(),
                    row: read_le_at_dyn(data, offset, ctx.table_index_width(target) > 2)?,
                },
                ReadOp::RowStart(target) => FieldValue::RowStart {
                    table: target.clone(),
                    row: read_le_at_dyn(data, offset, ctx.table_index_width(target) > 2)?,
                },
                ReadOp::CodedIndex(scheme) => {
                    let Some(coded) = dispatch.get(scheme) else {
                        return Err(Error::UnresolvedReference {
                            table: self.table().to_string(),
                            field: step.field.clone(),
                            target: scheme.clone(),
                        });
                    };

                    let raw =
                        read_le_at_dyn(data, offset, ctx.coded_index_width(scheme) > 2)?;
                    let tag_mask = (1u32 << coded.tag_bits()) - 1;
                    let tag = raw & tag_mask;
                    let row = raw >> coded.tag_bits();

                    if tag as usize >= coded.arity() {
                        return Err(Error::InvalidCodedTag {
                            scheme: scheme.clone(),
                            tag,
                        });
                    }

                    FieldValue::Coded {
                        scheme: scheme.clone(),
                        table: coded.lookup(tag),
                        row,
                    }
                }
            };

            fields.push((step.field.clone(), value));
        }

        Ok(Record { fields })
    }
}
