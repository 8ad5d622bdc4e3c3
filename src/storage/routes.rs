//! Route book: the list of saved route summaries.
//!
//! Stored as one JSON array under [`ROUTES_KEY`]. Insertion order is the
//! listing order, and a route is addressed by its position in that list.

use crate::model::RouteSummary;

use super::{KeyValueStore, Result, StorageError};

/// Key the saved route list lives under.
pub const ROUTES_KEY: &str = "sessions";

/// Append-only list of saved routes over a key-value store.
pub struct RouteBook<'a, S: KeyValueStore> {
    store: &'a S,
}

impl<'a, S: KeyValueStore> RouteBook<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// All saved routes, oldest first. An untouched store has none.
    pub fn list(&self) -> Result<Vec<RouteSummary>> {
        match self.store.get(ROUTES_KEY)? {
            Some(json) => serde_json::from_str(&json)
                .map_err(|e| StorageError::Corrupt(format!("saved routes: {e}"))),
            None => Ok(Vec::new()),
        }
    }

    /// Appends a route to the end of the list. Returns its position.
    pub fn append(&self, summary: RouteSummary) -> Result<usize> {
        let mut routes = self.list()?;
        routes.push(summary);
        let json = serde_json::to_string(&routes)?;
        self.store.set(ROUTES_KEY, &json)?;
        Ok(routes.len() - 1)
    }

    /// The route at `index` in the current listing.
    pub fn get(&self, index: usize) -> Result<RouteSummary> {
        self.list()?
            .into_iter()
            .nth(index)
            .ok_or(StorageError::RouteNotFound(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;
    use std::collections::HashMap;

    use jiff::{SignedDuration, Timestamp};

    use crate::model::{Coordinate, Event};
    use crate::session::{self, SessionError};
    use crate::storage::Storage;
    use crate::tracking::TrackingState;

    /// In-memory store standing in for the `SQLite` file.
    #[derive(Default)]
    struct MemoryStore(RefCell<HashMap<String, String>>);

    impl KeyValueStore for MemoryStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            Ok(self.0.borrow().get(key).cloned())
        }

        fn set(&self, key: &str, value: &str) -> Result<()> {
            self.0.borrow_mut().insert(key.into(), value.into());
            Ok(())
        }
    }

    fn sample_route(name: &str) -> RouteSummary {
        RouteSummary {
            name: name.into(),
            created_at: Timestamp::new(1_700_000_000, 0).unwrap(),
            elapsed: SignedDuration::from_secs(90),
            total_distance_km: 1.234_567,
            events: vec![Event::Location {
                timestamp: Timestamp::new(1_700_000_000, 0).unwrap(),
                coordinate: Coordinate::new(1.0, 2.0),
            }],
        }
    }

    #[test]
    fn empty_store_lists_nothing() {
        let store = MemoryStore::default();
        assert!(RouteBook::new(&store).list().unwrap().is_empty());
    }

    #[test]
    fn append_preserves_insertion_order() {
        let store = MemoryStore::default();
        let book = RouteBook::new(&store);

        assert_eq!(book.append(sample_route("Second")).unwrap(), 0);
        assert_eq!(book.append(sample_route("First")).unwrap(), 1);

        let names: Vec<String> = book.list().unwrap().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Second", "First"]);
    }

    #[test]
    fn get_by_position() {
        let store = MemoryStore::default();
        let book = RouteBook::new(&store);
        book.append(sample_route("A")).unwrap();
        book.append(sample_route("B")).unwrap();

        assert_eq!(book.get(1).unwrap(), sample_route("B"));
        assert!(matches!(book.get(2), Err(StorageError::RouteNotFound(2))));
    }

    #[test]
    fn stored_as_json_array_under_sessions_key() {
        let store = MemoryStore::default();
        RouteBook::new(&store).append(sample_route("A")).unwrap();

        let raw = store.get(ROUTES_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["name"], "A");
        assert_eq!(value[0]["totalDistanceKm"], 1.234_567);
        assert_eq!(value[0]["events"][0]["type"], "location");
    }

    #[test]
    fn corrupt_list_is_reported() {
        let store = MemoryStore::default();
        store.set(ROUTES_KEY, "{not json").unwrap();

        assert!(matches!(
            RouteBook::new(&store).list(),
            Err(StorageError::Corrupt(_))
        ));
    }

    #[test]
    fn blank_name_save_leaves_list_unchanged() {
        let store = MemoryStore::default();
        let book = RouteBook::new(&store);
        book.append(sample_route("Existing")).unwrap();
        let before = store.get(ROUTES_KEY).unwrap();

        let result = session::freeze(
            "",
            &TrackingState::default(),
            SignedDuration::ZERO,
            Timestamp::now(),
        )
        .map(|summary| book.append(summary));

        assert!(matches!(result, Err(SessionError::MissingName)));
        assert_eq!(store.get(ROUTES_KEY).unwrap(), before);
        assert_eq!(book.list().unwrap().len(), 1);
    }

    #[test]
    fn sqlite_store_backs_the_book() {
        let dir = tempfile::TempDir::new().unwrap();
        let storage = Storage::open(dir.path().join("store.sqlite")).unwrap();
        let book = RouteBook::new(&storage);

        book.append(sample_route("Lakeside")).unwrap();

        assert_eq!(book.get(0).unwrap().name, "Lakeside");
    }
}
