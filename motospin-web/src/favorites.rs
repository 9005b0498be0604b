//! Favorites consistency layer
//!
//! Membership identity is the case-sensitive (make, model) pair, never the
//! store id and never the year. The in-memory list is single-writer and only
//! mutates after the store call succeeds, so a store failure cannot leave the
//! two out of sync.

use chrono::Utc;
use motospin_common::{FavoriteRecord, MotorcycleRecord, Result};
use tracing::{debug, warn};

use crate::store::DocumentStore;

/// The authenticated user's favorites, mirrored from the document store.
///
/// Reloaded fresh from the store on every sign-in and cleared on sign-out;
/// never merged.
#[derive(Debug, Default)]
pub struct FavoritesState {
    favorites: Vec<FavoriteRecord>,
}

impl FavoritesState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> &[FavoriteRecord] {
        &self.favorites
    }

    /// In-memory (make, model) scan; the store is not consulted.
    pub fn is_favorite(&self, record: &MotorcycleRecord) -> bool {
        self.favorites.iter().any(|f| f.record.same_bike(record))
    }

    /// Replace the list wholesale (sign-in reload).
    pub fn replace(&mut self, favorites: Vec<FavoriteRecord>) {
        self.favorites = favorites;
    }

    /// Drop the list (sign-out). Nothing is persisted or merged.
    pub fn clear(&mut self) {
        self.favorites.clear();
    }

    /// Add or remove the favorite matching `record`'s (make, model) pair.
    ///
    /// Issues the store call first and mutates the list only on success;
    /// returns whether the record is a favorite afterwards. A store failure
    /// propagates with the list unchanged.
    pub async fn toggle(
        &mut self,
        store: &dyn DocumentStore,
        user_id: &str,
        record: &MotorcycleRecord,
    ) -> Result<bool> {
        let existing = self
            .favorites
            .iter()
            .position(|f| f.record.same_bike(record));

        match existing {
            Some(index) => {
                let id = self.favorites[index].id.clone();
                if let Err(e) = store.delete(&id).await {
                    warn!("Favorite delete failed, keeping in-memory state: {}", e);
                    return Err(e);
                }
                self.favorites.remove(index);
                debug!(make = %record.make, model = %record.model, "Favorite removed");
                Ok(false)
            }
            None => {
                let created_at = Utc::now();
                let id = match store.insert(record, user_id, created_at).await {
                    Ok(id) => id,
                    Err(e) => {
                        warn!("Favorite insert failed, keeping in-memory state: {}", e);
                        return Err(e);
                    }
                };
                self.favorites.push(FavoriteRecord {
                    id,
                    user_id: user_id.to_string(),
                    created_at,
                    record: record.clone(),
                });
                debug!(make = %record.make, model = %record.model, "Favorite added");
                Ok(true)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::DateTime;
    use motospin_common::Error;
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Store mock whose operations can be made to fail.
    #[derive(Default)]
    struct MockStore {
        fail_delete: AtomicBool,
        fail_insert: AtomicBool,
        inserts: AtomicUsize,
        deletes: AtomicUsize,
    }

    #[async_trait]
    impl DocumentStore for MockStore {
        async fn insert(
            &self,
            _record: &MotorcycleRecord,
            _user_id: &str,
            _created_at: DateTime<Utc>,
        ) -> Result<String> {
            if self.fail_insert.load(Ordering::SeqCst) {
                return Err(Error::Store("insert refused".into()));
            }
            let n = self.inserts.fetch_add(1, Ordering::SeqCst);
            Ok(format!("doc-{}", n))
        }

        async fn delete(&self, _id: &str) -> Result<()> {
            if self.fail_delete.load(Ordering::SeqCst) {
                return Err(Error::Store("delete refused".into()));
            }
            self.deletes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn query_by_user(&self, _user_id: &str) -> Result<Vec<FavoriteRecord>> {
            Ok(Vec::new())
        }
    }

    fn bike(make: &str, model: &str, year: i32) -> MotorcycleRecord {
        MotorcycleRecord::from_provider(&json!({"make": make, "model": model, "year": year}))
    }

    #[tokio::test]
    async fn toggle_twice_round_trips_membership() {
        let store = MockStore::default();
        let mut state = FavoritesState::new();
        let record = bike("Honda", "CB500", 1994);

        assert!(!state.is_favorite(&record));
        assert!(state.toggle(&store, "user-1", &record).await.unwrap());
        assert!(state.is_favorite(&record));
        assert!(!state.toggle(&store, "user-1", &record).await.unwrap());
        assert!(!state.is_favorite(&record));
        assert_eq!(store.inserts.load(Ordering::SeqCst), 1);
        assert_eq!(store.deletes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn records_differing_only_in_year_share_membership() {
        let store = MockStore::default();
        let mut state = FavoritesState::new();

        state
            .toggle(&store, "user-1", &bike("Honda", "CB500", 1994))
            .await
            .unwrap();
        assert!(state.is_favorite(&bike("Honda", "CB500", 2003)));

        // Toggling the other year removes the one favorite
        let still = state
            .toggle(&store, "user-1", &bike("Honda", "CB500", 2003))
            .await
            .unwrap();
        assert!(!still);
        assert!(state.list().is_empty());
    }

    #[tokio::test]
    async fn failed_delete_leaves_state_unchanged() {
        let store = MockStore::default();
        let mut state = FavoritesState::new();
        let record = bike("Ducati", "Monster", 2015);

        state.toggle(&store, "user-1", &record).await.unwrap();
        store.fail_delete.store(true, Ordering::SeqCst);

        let result = state.toggle(&store, "user-1", &record).await;
        assert!(matches!(result, Err(Error::Store(_))));
        assert!(state.is_favorite(&record));
        assert_eq!(state.list().len(), 1);
    }

    #[tokio::test]
    async fn failed_insert_leaves_state_unchanged() {
        let store = MockStore::default();
        store.fail_insert.store(true, Ordering::SeqCst);
        let mut state = FavoritesState::new();
        let record = bike("Ducati", "Monster", 2015);

        let result = state.toggle(&store, "user-1", &record).await;
        assert!(matches!(result, Err(Error::Store(_))));
        assert!(!state.is_favorite(&record));
        assert!(state.list().is_empty());
    }

    #[tokio::test]
    async fn replace_and_clear_manage_session_lifecycle() {
        let store = MockStore::default();
        let mut state = FavoritesState::new();
        state
            .toggle(&store, "user-1", &bike("Honda", "CB500", 1994))
            .await
            .unwrap();

        state.replace(vec![]);
        assert!(state.list().is_empty());

        state
            .toggle(&store, "user-1", &bike("Zero", "SR/F", 2022))
            .await
            .unwrap();
        state.clear();
        assert!(state.list().is_empty());
    }
}
