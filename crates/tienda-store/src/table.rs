//! # Entity Table
//!
//! An ordered `id → row` map with its own identifier counter.
//!
//! ```text
//! insert ──► id 1, 2, 3          remove(2) ──► {1, 3}
//! insert ──► id 4                (2 is never handed out again)
//! ```
//!
//! Ids are never reused so a stale id held by a cart line or an order can
//! never resolve to a different entity.

use std::collections::{BTreeMap, HashMap};

/// Rows keyed by a monotonically assigned `u64`.
#[derive(Debug, Clone)]
pub struct Table<T> {
    rows: BTreeMap<u64, T>,
    next_id: u64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Table<T> {
    /// Creates an empty table whose first id is 1.
    pub fn new() -> Self {
        Table {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Inserts the row built for the next id and returns it.
    pub fn insert_with<F>(&mut self, build: F) -> &T
    where
        F: FnOnce(u64) -> T,
    {
        let id = self.next_id;
        self.next_id += 1;
        self.rows.entry(id).or_insert(build(id))
    }

    pub fn get(&self, id: u64) -> Option<&T> {
        self.rows.get(&id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut T> {
        self.rows.get_mut(&id)
    }

    /// Mutable handles to several distinct rows at once, aligned with `ids`.
    ///
    /// A missing id, or a repeat of an id already listed, yields `None` in
    /// its slot.
    pub fn get_disjoint_mut(&mut self, ids: &[u64]) -> Vec<Option<&mut T>> {
        let mut found: HashMap<u64, &mut T> = self
            .rows
            .iter_mut()
            .filter(|(id, _)| ids.contains(*id))
            .map(|(id, row)| (*id, row))
            .collect();
        ids.iter().map(|id| found.remove(id)).collect()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.rows.contains_key(&id)
    }

    /// Removes a row. The id stays retired.
    pub fn remove(&mut self, id: u64) -> Option<T> {
        self.rows.remove(&id)
    }

    /// Rows in ascending id order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
