//! Runtime-resolved index widths for one concrete container instance.
//!
//! The container format picks 2-byte or 4-byte indices based on the actual
//! size of the data being decoded: heap offsets widen when a heap outgrows
//! the 16-bit range, table indices widen when the indexed table does, and a
//! coded index widens when its row bits plus tag bits no longer fit in 16.
//! A [`LayoutContext`] captures those decisions once per decoding session;
//! the same context must back both width evaluation and decode-plan
//! application, or the cursor desynchronizes.

use std::collections::HashMap;

use crate::schema::{Heap, SchemeSet};

/// The resolved set of index widths (heap, table, coded) for a specific
/// container instance.
#[derive(Debug, Clone)]
pub struct LayoutContext {
    rows: HashMap<String, u32>,
    large_string: bool,
    large_blob: bool,
    large_guid: bool,
    coded_widths: HashMap<String, u8>,
}

impl LayoutContext {
    /// Builds a context from per-table row counts, the three large-heap
    /// flags, and the scheme set the schema was generated against.
    ///
    /// Tables absent from `rows` count as empty. Coded widths are derived
    /// here once: tag bits plus the bits needed to index the largest
    /// participating table.
    #[must_use]
    pub fn new(
        rows: &[(&str, u32)],
        large_string: bool,
        large_blob: bool,
        large_guid: bool,
        schemes: &SchemeSet,
    ) -> Self {
        let mut ctx = LayoutContext {
            rows: rows.iter().map(|(n, c)| ((*n).to_string(), *c)).collect(),
            large_string,
            large_blob,
            large_guid,
            coded_widths: HashMap::new(),
        };

        for scheme in schemes.iter() {
            let row_bits = scheme
                .tables
                .iter()
                .map(|t| index_bits(ctx.row_count(t)))
                .max()
                .unwrap_or(1);

            let width = if row_bits + scheme.tag_bits > 16 { 4 } else { 2 };
            ctx.coded_widths.insert(scheme.name.clone(), width);
        }

        ctx
    }

    fn row_count(&self, table: &str) -> u32 {
        self.rows.get(table).copied().unwrap_or(0)
    }

    /// Width in bytes of offsets into the given heap.
    #[must_use]
    pub fn heap_index_width(&self, heap: Heap) -> u8 {
        let large = match heap {
            Heap::String => self.large_string,
            Heap::Blob => self.large_blob,
            Heap::Guid => self.large_guid,
        };
        if large {
            4
        } else {
            2
        }
    }

    /// Width in bytes of row indices into the named table.
    ///
    /// Indices widen to 4 bytes once the table holds more rows than fit in
    /// a `u16`. Unknown tables count as empty.
    #[must_use]
    pub fn table_index_width(&self, table: &str) -> u8 {
        if self.row_count(table) > u32::from(u16::MAX) {
            4
        } else {
            2
        }
    }

    /// Width in bytes of coded references using the named scheme.
    ///
    /// Schemes unknown to this context resolve to the narrow width; the
    /// builders reject unknown scheme names at generation time, so this
    /// only arises for contexts built against a different scheme set.
    #[must_use]
    pub fn coded_index_width(&self, scheme: &str) -> u8 {
        self.coded_widths.get(scheme).copied().unwrap_or(2)
    }
}

/// Number of bits required to represent any valid row index of a table
/// with `rows` rows.
fn index_bits(rows: u32) -> u8 {
    if rows == 0 {
        1
    } else {
        // Safe: 32 - leading_zeros is always <= 32
        #[allow(clippy::cast_possible_truncation)]
        let bits = (32 - rows.leading_zeros()) as u8;
        bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::CodeScheme;
    use strum::IntoEnumIterator;

    #[test]
    fn heap_widths() {
        let schemes = SchemeSet::new(Vec::new());

        let small = LayoutContext::new(&[], false, false, false, &schemes);
        for heap in Heap::iter() {
            assert_eq!(small.heap_index_width(heap), 2);
        }

        let large = LayoutContext::new(&[], true, true, true, &schemes);
        for heap in Heap::iter() {
            assert_eq!(large.heap_index_width(heap), 4);
        }

        let mixed = LayoutContext::new(&[], false, true, false, &schemes);
        assert_eq!(mixed.heap_index_width(Heap::String), 2);
        assert_eq!(mixed.heap_index_width(Heap::Blob), 4);
        assert_eq!(mixed.heap_index_width(Heap::Guid), 2);
    }

    #[test]
    fn table_widths() {
        let schemes = SchemeSet::new(Vec::new());
        let ctx = LayoutContext::new(
            &[("Small", 100), ("Edge", 65535), ("Big", 65536)],
            false,
            false,
            false,
            &schemes,
        );

        assert_eq!(ctx.table_index_width("Small"), 2);
        assert_eq!(ctx.table_index_width("Edge"), 2);
        assert_eq!(ctx.table_index_width("Big"), 4);
        assert_eq!(ctx.table_index_width("Absent"), 2);
    }

    #[test]
    fn coded_widths() {
        let schemes = SchemeSet::new(vec![CodeScheme::new(
            "AorB",
            vec!["A".into(), "B".into()],
        )]);

        // 1 tag bit + 15 row bits fits in 16
        let narrow = LayoutContext::new(&[("A", 0x7FFF), ("B", 1)], false, false, false, &schemes);
        assert_eq!(narrow.coded_index_width("AorB"), 2);

        // 1 tag bit + 16 row bits does not
        let wide = LayoutContext::new(&[("A", 0x8000), ("B", 1)], false, false, false, &schemes);
        assert_eq!(wide.coded_index_width("AorB"), 4);
    }

    #[test]
    fn index_bit_counts() {
        assert_eq!(index_bits(0), 1);
        assert_eq!(index_bits(1), 1);
        assert_eq!(index_bits(2), 2);
        assert_eq!(index_bits(0xFFFF), 16);
        assert_eq!(index_bits(0x10000), 17);
    }
}
