//! Registry initialization order: one table accessor per visible table.

use crate::{schema::Schema, Catalog};

/// One registry slot: a visible table wired to its catalog id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    /// Table name.
    pub name: String,
    /// The table's catalog id.
    pub id: u8,
}

/// The accessor initialization order for all visible tables, ascending by
/// id, with O(1) lookup by id.
#[derive(Debug, Clone)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
    slots: Vec<Option<u16>>,
}

impl Registry {
    pub(super) fn build(schema: &Schema, catalog: &Catalog) -> Self {
        let mut entries = Vec::new();
        let mut slots = vec![None; usize::from(catalog.table_count())];

        for entry in catalog.entries() {
            let Some(def) = schema.table(&entry.name) else {
                continue;
            };
            if !def.visible {
                continue;
            }

            // entries stays ascending because catalog entries are
            #[allow(clippy::cast_possible_truncation)]
            let index = entries.len() as u16;
            slots[usize::from(entry.code)] = Some(index);
            entries.push(RegistryEntry {
                name: entry.name.clone(),
                id: entry.code,
            });
        }

        Registry { entries, slots }
    }

    /// All visible tables, ascending by id.
    #[must_use]
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Looks up a visible table by catalog id in O(1).
    ///
    /// The "none" sentinel, ids of internal-only tables, and unassigned ids
    /// all return `None`.
    #[must_use]
    pub fn get(&self, id: u16) -> Option<&RegistryEntry> {
        let slot = (*self.slots.get(usize::from(id))?)?;
        Some(&self.entries[usize::from(slot)])
    }

    /// Number of visible tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the schema had no visible tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TableDefinition;

    #[test]
    fn visible_only_ascending() {
        let schema = Schema::new(vec![
            TableDefinition::new("C", 6),
            TableDefinition::new("Hidden", 1).hidden(),
            TableDefinition::new("A", 0),
        ]);
        let catalog = Catalog::build(&schema).unwrap();
        let registry = Registry::build(&schema, &catalog);

        let ids: Vec<u8> = registry.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![0, 6]);
        assert_eq!(registry.len(), 2);

        assert_eq!(registry.get(0).unwrap().name, "A");
        assert_eq!(registry.get(6).unwrap().name, "C");
        // Hidden table id and the sentinel both miss
        assert!(registry.get(1).is_none());
        assert!(registry.get(catalog.none_id()).is_none());
        assert!(registry.get(500).is_none());
    }

    #[test]
    fn empty_registry() {
        let schema = Schema::new(vec![TableDefinition::new("H", 0).hidden()]);
        let catalog = Catalog::build(&schema).unwrap();
        let registry = Registry::build(&schema, &catalog);

        assert!(registry.is_empty());
        assert!(registry.get(0).is_none());
    }
}
