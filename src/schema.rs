//! The declarative schema model consumed by the builders.
//!
//! A [`Schema`] describes the physical layout of a table-based metadata
//! container: which tables exist, their on-disk codes, and the ordered
//! fields of each record. The schema is built once per generation run —
//! by explicit construction, a declarative file, or reflection over
//! annotated types; the builders never inspect the declaration mechanism —
//! and is consumed read-only.
//!
//! Field order within a table is load-bearing: it is the on-disk column
//! order and the decode-step order, and must not change once declared.

use strum::{EnumCount, EnumIter};

/// One of the three shared variable-length data pools that table records
/// reference by offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount)]
pub enum Heap {
    /// The string heap, holding null-terminated UTF-8 names.
    String,
    /// The blob heap, holding length-prefixed binary values.
    Blob,
    /// The GUID heap, holding 16-byte identifiers.
    Guid,
}

/// The kind of a record field, determining its width term and decode step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// A fixed-width unsigned integer of 1, 2 or 4 bytes.
    ///
    /// `flag_type` optionally names a bit-flag type the raw integer is
    /// reinterpreted as. The name is carried through to the decode plan for
    /// renderers; the decoded in-memory value stays the raw integer.
    FixedInt {
        /// Width in bytes; must be 1, 2 or 4.
        size: u8,
        /// Optional bit-flag type name for renderers.
        flag_type: Option<String>,
    },
    /// An offset into one of the shared heaps; 2 or 4 bytes per the layout.
    HeapIndex {
        /// The heap the offset points into.
        heap: Heap,
    },
    /// A row index into exactly one other table; 2 or 4 bytes per the layout.
    TableRef {
        /// Name of the referenced table.
        target: String,
    },
    /// A cross-table reference tagged with which of several candidate tables
    /// it targets, per a named scheme.
    CodedRef {
        /// Name of the code scheme, resolved through the [`SchemeSet`].
        scheme: String,
    },
    /// The start of a contiguous run of rows in another table. Stores a
    /// single row index; the run's end is inferred by the consuming library
    /// from the next row's own value and is out of scope here.
    RowRange {
        /// Name of the table the run lives in.
        target: String,
    },
}

/// A named field within a table record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDefinition {
    /// Field name, unique within its table.
    pub name: String,
    /// What the field stores and how wide it is.
    pub kind: FieldKind,
}

/// One declared table of the container format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDefinition {
    /// Unique table name.
    pub name: String,
    /// The table's on-disk identifier, unique across the schema.
    pub code: u8,
    /// Whether the table is exposed through the registry and coded-index
    /// dispatch. Internal-only tables exist for composition but are never
    /// externally addressable.
    pub visible: bool,
    /// Ordered fields; the order is the on-disk column order.
    pub fields: Vec<FieldDefinition>,
}

impl TableDefinition {
    /// Creates a visible table with no fields yet.
    #[must_use]
    pub fn new(name: impl Into<String>, code: u8) -> Self {
        TableDefinition {
            name: name.into(),
            code,
            visible: true,
            fields: Vec::new(),
        }
    }

    /// Marks the table internal-only.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Appends a field, preserving declaration order.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldDefinition {
            name: name.into(),
            kind,
        });
        self
    }
}

/// The full declarative description of a container format.
///
/// Insertion order of tables is irrelevant to semantics but fixed, so that
/// derived artifacts are deterministic across runs.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    tables: Vec<TableDefinition>,
}

impl Schema {
    /// Wraps a set of table definitions into a schema.
    #[must_use]
    pub fn new(tables: Vec<TableDefinition>) -> Self {
        Schema { tables }
    }

    /// All declared tables, in declaration order.
    #[must_use]
    pub fn tables(&self) -> &[TableDefinition] {
        &self.tables
    }

    /// Looks up a table by name.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&TableDefinition> {
        self.tables.iter().find(|t| t.name == name)
    }
}

/// A named coded-index scheme: the candidate tables a tagged reference can
/// point into, and the number of tag bits spent distinguishing them.
///
/// The position of a table within `tables` is its tag value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeScheme {
    /// Scheme name, unique within the [`SchemeSet`].
    pub name: String,
    /// Participating tables, in tag order.
    pub tables: Vec<String>,
    /// Number of low bits holding the tag.
    pub tag_bits: u8,
}

impl CodeScheme {
    /// Creates a scheme whose tag width is derived from its arity
    /// (`ceil(log2(tables.len()))`).
    #[must_use]
    pub fn new(name: impl Into<String>, tables: Vec<String>) -> Self {
        let tag_bits = tag_bits_for(tables.len());
        CodeScheme {
            name: name.into(),
            tables,
            tag_bits,
        }
    }

    /// Creates a scheme with an explicitly supplied tag width, for formats
    /// that reserve wider tag spaces than the arity requires.
    #[must_use]
    pub fn with_tag_bits(name: impl Into<String>, tables: Vec<String>, tag_bits: u8) -> Self {
        CodeScheme {
            name: name.into(),
            tables,
            tag_bits,
        }
    }
}

/// Name-indexed lookup over externally supplied [`CodeScheme`] definitions.
///
/// The builders treat schemes as opaque: they are resolved by name and never
/// redefined during generation.
#[derive(Debug, Clone, Default)]
pub struct SchemeSet {
    schemes: Vec<CodeScheme>,
}

impl SchemeSet {
    /// Wraps a set of scheme definitions.
    #[must_use]
    pub fn new(schemes: Vec<CodeScheme>) -> Self {
        SchemeSet { schemes }
    }

    /// Looks up a scheme by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&CodeScheme> {
        self.schemes.iter().find(|s| s.name == name)
    }

    /// All schemes, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &CodeScheme> {
        self.schemes.iter()
    }
}

/// Number of bits needed to distinguish `arity` tag values.
fn tag_bits_for(arity: usize) -> u8 {
    if arity < 2 {
        return 0;
    }

    // ceil(log2(arity)), avoiding the float detour
    #[allow(clippy::cast_possible_truncation)]
    let bits = (usize::BITS - (arity - 1).leading_zeros()) as u8;
    bits
}
