//! Table id assignment: the canonical, id-ordered view of the schema.

use crate::{schema::Schema, Error, Result};

/// One table's id assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Table name.
    pub name: String,
    /// The table's numeric identifier (its on-disk code).
    pub code: u8,
}

/// The canonical, ascending-by-code list of tables with the derived table
/// count and "no table" sentinel.
///
/// The ascending ordering exists purely for deterministic, human-readable
/// output; it has no effect on decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    table_count: u16,
    none_id: u16,
}

impl Catalog {
    /// Validates code uniqueness and produces the ordered catalog.
    ///
    /// `table_count` is `max(code) + 1`; the "none" sentinel equals
    /// `table_count` and therefore never collides with a real id. An empty
    /// schema yields a count and sentinel of 0.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateCode`] naming both colliding tables if two
    /// tables share a code.
    pub fn build(schema: &Schema) -> Result<Self> {
        let mut seen: [Option<&str>; 256] = [None; 256];
        for table in schema.tables() {
            if let Some(first) = seen[usize::from(table.code)] {
                return Err(Error::DuplicateCode {
                    code: table.code,
                    first: first.to_string(),
                    second: table.name.clone(),
                });
            }
            seen[usize::from(table.code)] = Some(&table.name);
        }

        let mut entries: Vec<CatalogEntry> = schema
            .tables()
            .iter()
            .map(|t| CatalogEntry {
                name: t.name.clone(),
                code: t.code,
            })
            .collect();
        entries.sort_by_key(|e| e.code);

        let table_count = entries.last().map_or(0, |e| u16::from(e.code) + 1);

        Ok(Catalog {
            entries,
            table_count,
            none_id: table_count,
        })
    }

    /// All tables, ascending by code.
    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// `max(code) + 1` over the schema.
    #[must_use]
    pub fn table_count(&self) -> u16 {
        self.table_count
    }

    /// The sentinel id meaning "no table".
    #[must_use]
    pub fn none_id(&self) -> u16 {
        self.none_id
    }

    /// Looks up a table's id by name.
    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<u8> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.code)
    }
}
