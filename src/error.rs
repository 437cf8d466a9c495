use thiserror::Error;

/// The generic Error type, covering both generation faults and decode-time
/// cursor faults.
///
/// Generation faults ([`Error::DuplicateCode`], [`Error::UnresolvedReference`],
/// [`Error::UnsupportedKind`]) indicate a schema-authoring error. They are
/// deterministic and terminal: [`crate::generate`] aborts and no artifact set
/// is produced. There is no recovery or retry path.
///
/// Cursor faults ([`Error::OutOfBounds`], [`Error::InvalidCodedTag`]) occur
/// while a decode plan executes against record data at runtime. They are
/// returned to the decoding caller as ordinary failures; the half-built
/// record is discarded and never exposed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Two tables in the schema share the same on-disk code.
    #[error("duplicate table code {code}: `{first}` and `{second}`")]
    DuplicateCode {
        /// The colliding code value
        code: u8,
        /// Name of the table that claimed the code first
        first: String,
        /// Name of the table that collided with it
        second: String,
    },

    /// A field (or a coded-index scheme entry) names a table or scheme that
    /// does not exist in the schema / scheme set.
    #[error("`{table}.{field}` references unknown `{target}`")]
    UnresolvedReference {
        /// Table (or scheme) the offending field belongs to
        table: String,
        /// Name of the offending field (or tag position within a scheme)
        field: String,
        /// The name that failed to resolve
        target: String,
    },

    /// A field's kind has no width or decode rule.
    #[error("`{table}.{field}` has an unsupported kind: {detail}")]
    UnsupportedKind {
        /// Table the offending field belongs to
        table: String,
        /// Name of the offending field
        field: String,
        /// What exactly was not supported
        detail: String,
    },

    /// A record read would have run past the available bytes.
    #[error("out of bounds read would have occurred")]
    OutOfBounds,

    /// A coded index carried a tag outside its scheme's tag space.
    #[error("invalid tag {tag} for coded index scheme `{scheme}`")]
    InvalidCodedTag {
        /// The scheme whose tag space was violated
        scheme: String,
        /// The offending tag value
        tag: u32,
    },
}
