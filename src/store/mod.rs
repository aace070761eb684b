//! In-memory record store.
//!
//! Holds the validated records the CRUD handlers operate on: an owned,
//! lock-guarded collection of rows, each row an ordered list of field values
//! in schema column order. Nothing here outlives the process.
//!
//! Row matching is positional: the HTTP layer resolves query-parameter names
//! to column indexes against its reference schema and hands this store plain
//! `(index, expected value)` pairs.

use std::sync::RwLock;

/// Lock-guarded collection of CSV rows.
#[derive(Debug, Default)]
pub struct RecordStore {
    rows: RwLock<Vec<Vec<String>>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends validated records in payload order.
    pub fn append(&self, records: Vec<Vec<String>>) {
        let mut rows = self.rows.write().unwrap_or_else(|e| e.into_inner());
        rows.extend(records);
    }

    /// Returns a copy of every stored row in insertion order.
    pub fn snapshot(&self) -> Vec<Vec<String>> {
        self.rows
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.rows.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.rows.write().unwrap_or_else(|e| e.into_inner()).clear();
    }

    /// Replaces every row matching all `keys` with `replacement`, returning
    /// the number of rows updated.
    pub fn update_matching(&self, keys: &[(usize, String)], replacement: &[String]) -> usize {
        let mut rows = self.rows.write().unwrap_or_else(|e| e.into_inner());
        let mut updated = 0;
        for row in rows.iter_mut() {
            if row_matches(row, keys) {
                *row = replacement.to_vec();
                updated += 1;
            }
        }
        updated
    }

    /// Removes every row matching all `keys`, returning the number removed.
    pub fn delete_matching(&self, keys: &[(usize, String)]) -> usize {
        let mut rows = self.rows.write().unwrap_or_else(|e| e.into_inner());
        let before = rows.len();
        rows.retain(|row| !row_matches(row, keys));
        before - rows.len()
    }
}

fn row_matches(row: &[String], keys: &[(usize, String)]) -> bool {
    keys.iter()
        .all(|(index, value)| row.get(*index).map(|field| field == value).unwrap_or(false))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fields: &[&str]) -> Vec<String> {
        fields.iter().map(|f| f.to_string()).collect()
    }

    fn seeded() -> RecordStore {
        let store = RecordStore::new();
        store.append(vec![
            row(&["Smith", "John", "30"]),
            row(&["Smith", "Jane", "28"]),
            row(&["Jones", "Mary", "45"]),
        ]);
        store
    }

    #[test]
    fn test_append_and_snapshot_preserve_order() {
        let store = seeded();
        let rows = store.snapshot();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0][0], "Smith");
        assert_eq!(rows[2][1], "Mary");
    }

    #[test]
    fn test_update_matching_replaces_whole_row() {
        let store = seeded();
        let updated = store.update_matching(
            &[(0, "Smith".to_string()), (1, "Jane".to_string())],
            &row(&["Smith", "Jane", "29"]),
        );
        assert_eq!(updated, 1);
        assert_eq!(store.snapshot()[1][2], "29");
    }

    #[test]
    fn test_update_requires_all_keys_to_match() {
        let store = seeded();
        let updated = store.update_matching(
            &[(0, "Smith".to_string()), (1, "Nobody".to_string())],
            &row(&["x", "y", "z"]),
        );
        assert_eq!(updated, 0);
    }

    #[test]
    fn test_delete_matching_removes_all_matches() {
        let store = seeded();
        let removed = store.delete_matching(&[(0, "Smith".to_string())]);
        assert_eq!(removed, 2);
        assert_eq!(store.len(), 1);
        assert_eq!(store.snapshot()[0][0], "Jones");
    }

    #[test]
    fn test_delete_with_no_match_is_noop() {
        let store = seeded();
        assert_eq!(store.delete_matching(&[(2, "99".to_string())]), 0);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_out_of_range_key_never_matches() {
        let store = seeded();
        assert_eq!(store.delete_matching(&[(9, "Smith".to_string())]), 0);
    }

    #[test]
    fn test_clear() {
        let store = seeded();
        store.clear();
        assert!(store.is_empty());
    }
}
