//! Per-conversion style table.
//!
//! A [`GlobalVarTable`] is created empty for one conversion and consumed into
//! the design's `globalVars` at the end of it. Lookups go through a hash of
//! the canonical JSON serialization, so interning cost does not grow with
//! the number of distinct styles.

use std::collections::HashMap;

use crate::types::{CanonicalStyle, GlobalVars, StyleId};

use super::SimplifyError;

#[derive(Debug, Default)]
pub struct GlobalVarTable {
    entries: Vec<(StyleId, CanonicalStyle)>,
    /// Fingerprint to slot in `entries`, one map per category.
    index: [HashMap<String, usize>; 5],
    counters: [usize; 5],
}

impl GlobalVarTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Canonical serialization used as the dedup key.
    pub fn fingerprint(style: &CanonicalStyle) -> Result<String, SimplifyError> {
        serde_json::to_string(style).map_err(|e| {
            SimplifyError::Integrity(format!(
                "failed to serialize {} style for fingerprinting: {e}",
                style.category()
            ))
        })
    }

    /// Return the id of an equal style interned earlier, or allocate the next
    /// id for the style's category.
    pub fn intern(&mut self, style: CanonicalStyle) -> Result<StyleId, SimplifyError> {
        let key = Self::fingerprint(&style)?;
        self.intern_keyed(key, style)
    }

    pub(crate) fn intern_keyed(
        &mut self,
        key: String,
        style: CanonicalStyle,
    ) -> Result<StyleId, SimplifyError> {
        let category = style.category();

        if let Some(&slot) = self.index[category.index()].get(key.as_str()) {
            let (id, existing) = &self.entries[slot];
            if *existing != style {
                return Err(SimplifyError::Integrity(format!(
                    "fingerprint collision on {id}: {existing:?} vs {style:?}"
                )));
            }
            return Ok(id.clone());
        }

        let counter = &mut self.counters[category.index()];
        let id = StyleId::new(category, *counter);
        *counter += 1;

        log::trace!("interned {id}");
        self.index[category.index()].insert(key, self.entries.len());
        self.entries.push((id.clone(), style));
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_global_vars(self) -> GlobalVars {
        GlobalVars::from_entries(self.entries)
    }
}
