//! Ordered tab strip
//!
//! The sequence order here IS the visual order; nothing else records it.
//! Operations return a new strip and leave the receiver untouched. A
//! no-op returns the same backing sequence, observable through
//! [`TabStrip::same_seq`], so callers can skip redundant re-renders.

use std::sync::Arc;

use crate::content::AddressTranslator;
use crate::registry;
use crate::tab::{Tab, TabKey};
use crate::Result;

/// The ordered collection of live tabs. Cheap to clone.
#[derive(Debug, Clone)]
pub struct TabStrip {
    tabs: Arc<[Tab]>,
}

impl TabStrip {
    pub fn new() -> Self {
        Self {
            tabs: Arc::from(Vec::new()),
        }
    }

    pub fn from_tabs(tabs: Vec<Tab>) -> Self {
        Self { tabs: tabs.into() }
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tab> {
        self.tabs.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Tab> {
        self.tabs.get(index)
    }

    pub fn by_key(&self, key: TabKey) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.key == key)
    }

    pub fn index_of(&self, key: TabKey) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.key == key)
    }

    pub fn keys(&self) -> Vec<TabKey> {
        self.tabs.iter().map(|tab| tab.key).collect()
    }

    /// Whether two strips share the same backing sequence.
    pub fn same_seq(&self, other: &TabStrip) -> bool {
        Arc::ptr_eq(&self.tabs, &other.tabs)
    }

    /// Build a record for `address` with the lowest key unused in this
    /// strip. The record is returned, not inserted.
    pub fn create_tab(
        &self,
        address: impl Into<String>,
        translator: &dyn AddressTranslator,
    ) -> Result<Tab> {
        let key = registry::allocate_key(&self.keys())?;
        Ok(Tab::new(key, address, translator))
    }

    /// Insert at `index`, clamped to the end of the strip.
    pub fn insert_at(&self, index: usize, tab: Tab) -> TabStrip {
        let mut tabs = self.tabs.to_vec();
        tabs.insert(index.min(tabs.len()), tab);
        Self::from_tabs(tabs)
    }

    pub fn append(&self, tab: Tab) -> TabStrip {
        self.insert_at(self.len(), tab)
    }

    /// Remove the tab with `key`. An absent key is a no-op: the same
    /// sequence comes back with `None` for the removed index.
    pub fn remove_by_key(&self, key: TabKey) -> (TabStrip, Option<usize>) {
        match self.index_of(key) {
            Some(index) => {
                let mut tabs = self.tabs.to_vec();
                tabs.remove(index);
                (Self::from_tabs(tabs), Some(index))
            }
            None => (self.clone(), None),
        }
    }

    /// Replace the record under `key` in place. Returns the same sequence
    /// when the key is absent or every comparable field is unchanged.
    pub fn replace_by_key(&self, key: TabKey, new_tab: Tab) -> TabStrip {
        let Some(index) = self.index_of(key) else {
            return self.clone();
        };

        if self.tabs[index].same_as(&new_tab) {
            return self.clone();
        }

        let mut tabs = self.tabs.to_vec();
        tabs[index] = new_tab;
        Self::from_tabs(tabs)
    }

    /// Move the tab with `key` by `delta` positions, clamped to the strip
    /// bounds. Returns `None` (no change) when the tab already sits at
    /// the boundary `delta` pushes past, when `delta` is zero, or when
    /// the key is absent.
    pub fn move_by(&self, key: TabKey, delta: isize) -> Option<TabStrip> {
        let index = self.index_of(key)?;
        let last = self.len() - 1;

        if delta == 0
            || (delta < 0 && index == 0)
            || (delta > 0 && index == last)
        {
            return None;
        }

        let target = (index as isize + delta).clamp(0, last as isize) as usize;
        let mut tabs = self.tabs.to_vec();
        let tab = tabs.remove(index);
        tabs.insert(target, tab);

        Some(Self::from_tabs(tabs))
    }
}

impl Default for TabStrip {
    fn default() -> Self {
        Self::new()
    }
}
