use crate::entry::{AppEntry, EntryState};
use dock_kernel::sync::{read_lock, write_lock};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Ordered set of tracked entries.
///
/// Lock order is collection first, then entry. Nothing may take the collection
/// lock while holding an entry lock.
#[derive(Debug, Default)]
pub struct Entries {
    items: RwLock<Vec<Arc<AppEntry>>>,
}

impl Entries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        read_lock(&self.items, "dock_entries").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Point-in-time copy of the entry handles.
    pub fn snapshot(&self) -> Vec<Arc<AppEntry>> {
        read_lock(&self.items, "dock_entries").clone()
    }

    pub fn get(&self, id: &str) -> Option<Arc<AppEntry>> {
        read_lock(&self.items, "dock_entries")
            .iter()
            .find(|entry| entry.id() == id)
            .cloned()
    }

    pub fn get_by_inner_id(&self, inner_id: &str) -> Option<Arc<AppEntry>> {
        self.find(|state| state.inner_id == inner_id)
    }

    pub fn get_by_window(&self, xid: u32) -> Option<Arc<AppEntry>> {
        self.find(|state| state.windows.contains_key(&xid))
    }

    pub fn filter_docked(&self) -> Vec<Arc<AppEntry>> {
        self.snapshot()
            .into_iter()
            .filter(|entry| entry.read().is_docked)
            .collect()
    }

    pub fn get_docked_by_desktop_file(&self, desktop_file: &Path) -> Option<Arc<AppEntry>> {
        self.find(|state| state.is_docked && state.desktop_file() == Some(desktop_file))
    }

    /// Inserts at `index`; a negative or out-of-range index appends.
    pub fn insert(&self, entry: Arc<AppEntry>, index: i32) {
        let mut items = write_lock(&self.items, "dock_entries");
        insert_at(&mut items, entry, index);
    }

    /// Finds or creates an entry and applies `update` to it before the collection
    /// lock is released, so no concurrent removal can slip in between.
    pub fn upsert_where<P, F, U>(
        &self,
        predicate: P,
        index: i32,
        make: F,
        update: U,
    ) -> (Arc<AppEntry>, bool)
    where
        P: Fn(&EntryState) -> bool,
        F: FnOnce() -> AppEntry,
        U: FnOnce(&mut EntryState, bool),
    {
        let mut items = write_lock(&self.items, "dock_entries");
        let position = items.iter().position(|entry| predicate(&*entry.read()));
        let (entry, created) = match position {
            Some(position) => (Arc::clone(&items[position]), false),
            None => {
                let entry = Arc::new(make());
                insert_at(&mut items, Arc::clone(&entry), index);
                (entry, true)
            }
        };
        let mut state = entry.write();
        update(&mut *state, created);
        drop(state);
        (entry, created)
    }

    /// Applies `update` to the entry with `id` while it is guaranteed to be tracked.
    pub fn update<U>(&self, id: &str, update: U) -> Option<Arc<AppEntry>>
    where
        U: FnOnce(&mut EntryState),
    {
        self.update_where(|entry, _| entry.id() == id, update)
    }

    /// Applies `update` to the first entry matching `predicate`, under the collection lock.
    pub fn update_where<P, U>(&self, predicate: P, update: U) -> Option<Arc<AppEntry>>
    where
        P: Fn(&AppEntry, &EntryState) -> bool,
        U: FnOnce(&mut EntryState),
    {
        let items = read_lock(&self.items, "dock_entries");
        let entry = Arc::clone(
            items
                .iter()
                .find(|entry| predicate(entry, &*entry.read()))?,
        );
        let mut state = entry.write();
        update(&mut *state);
        drop(state);
        Some(entry)
    }

    pub fn remove(&self, id: &str) -> Option<Arc<AppEntry>> {
        let mut items = write_lock(&self.items, "dock_entries");
        let position = items.iter().position(|entry| entry.id() == id)?;
        Some(items.remove(position))
    }

    /// Removes the entry only if `predicate` still holds under the collection lock.
    pub fn remove_if<P>(&self, id: &str, predicate: P) -> bool
    where
        P: FnOnce(&EntryState) -> bool,
    {
        let mut items = write_lock(&self.items, "dock_entries");
        let Some(position) = items.iter().position(|entry| entry.id() == id) else {
            return false;
        };
        if !predicate(&*items[position].read()) {
            return false;
        }
        items.remove(position);
        true
    }

    fn find<P>(&self, predicate: P) -> Option<Arc<AppEntry>>
    where
        P: Fn(&EntryState) -> bool,
    {
        self.snapshot()
            .into_iter()
            .find(|entry| predicate(&*entry.read()))
    }
}

fn insert_at(items: &mut Vec<Arc<AppEntry>>, entry: Arc<AppEntry>, index: i32) {
    match usize::try_from(index) {
        Ok(index) if index <= items.len() => items.insert(index, entry),
        _ => items.push(entry),
    }
}

#[cfg(test)]
#[path = "../tests/entries/entries_tests.rs"]
mod tests;
