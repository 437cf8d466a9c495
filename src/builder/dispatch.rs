//! Coded-index dispatch: resolving a coded reference's tag to a table id.
//!
//! Dispatch is restricted to visible tables. A scheme may list an
//! internal-only table to keep its tag space positional, but such tags — and
//! any tag outside the scheme's range — resolve to the "none" sentinel, a
//! valid empty result rather than a fault.

use crate::{
    schema::{FieldKind, Schema, SchemeSet},
    Catalog, Error, Result,
};

/// The runtime tag-to-table mapping of one coded-index scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodedDispatch {
    scheme: String,
    tag_bits: u8,
    targets: Vec<u16>,
    none_id: u16,
}

impl CodedDispatch {
    /// Name of the scheme this dispatch serves.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Number of low bits holding the tag in an encoded value.
    #[must_use]
    pub fn tag_bits(&self) -> u8 {
        self.tag_bits
    }

    /// Number of tag values the scheme defines.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.targets.len()
    }

    /// Resolves a tag to a catalog id.
    ///
    /// Total: tags naming internal-only tables and tags outside the scheme's
    /// range both resolve to the "none" sentinel. Callers must treat the
    /// sentinel as a valid, empty result.
    #[must_use]
    pub fn lookup(&self, tag: u32) -> u16 {
        usize::try_from(tag)
            .ok()
            .and_then(|tag| self.targets.get(tag).copied())
            .unwrap_or(self.none_id)
    }
}

/// The dispatch tables of every scheme the schema references, keyed by
/// scheme name.
#[derive(Debug, Clone)]
pub struct DispatchSet {
    dispatches: Vec<CodedDispatch>,
    none_id: u16,
}

impl DispatchSet {
    pub(super) fn build(schema: &Schema, catalog: &Catalog, schemes: &SchemeSet) -> Result<Self> {
        let referenced = |name: &str| {
            schema.tables().iter().any(|t| {
                t.fields
                    .iter()
                    .any(|f| matches!(&f.kind, FieldKind::CodedRef { scheme } if scheme == name))
            })
        };

        let mut dispatches = Vec::new();
        for scheme in schemes.iter().filter(|s| referenced(&s.name)) {
            let mut targets = Vec::with_capacity(scheme.tables.len());
            for (tag, target) in scheme.tables.iter().enumerate() {
                let Some(def) = schema.table(target) else {
                    return Err(Error::UnresolvedReference {
                        table: scheme.name.clone(),
                        field: format!("tag {tag}"),
                        target: target.clone(),
                    });
                };
                targets.push(if def.visible {
                    u16::from(def.code)
                } else {
                    catalog.none_id()
                });
            }

            dispatches.push(CodedDispatch {
                scheme: scheme.name.clone(),
                tag_bits: scheme.tag_bits,
                targets,
                none_id: catalog.none_id(),
            });
        }

        Ok(DispatchSet {
            dispatches,
            none_id: catalog.none_id(),
        })
    }

    /// Looks up a scheme's dispatch by name.
    #[must_use]
    pub fn get(&self, scheme: &str) -> Option<&CodedDispatch> {
        self.dispatches.iter().find(|d| d.scheme == scheme)
    }

    /// The "no table" sentinel lookups resolve to.
    #[must_use]
    pub fn none_id(&self) -> u16 {
        self.none_id
    }

    /// All dispatch tables, in scheme-set order.
    pub fn iter(&self) -> impl Iterator<Item = &CodedDispatch> {
        self.dispatches.iter()
    }
}
