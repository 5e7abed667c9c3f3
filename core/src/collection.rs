//! Keyed entity collections with snapshot semantics.
//!
//! A [`KeyedCollection`] holds its contents as a [`Snapshot`]: a shared slice
//! of shared entities. Every mutation builds a new slice and installs it, so a
//! snapshot handed out earlier never changes underneath its holder. Entities
//! untouched by a mutation are carried over by reference, not copied.
//!
//! None of the operations fail. Updating or removing an id that is not present
//! leaves the collection (and its current snapshot) exactly as it was.

use crate::entity::{Approvable, Entity, Stateful};
use serde::{Serialize, Serializer};
use std::sync::Arc;

/// The contents of a collection at one instant
#[derive(Debug)]
pub struct Snapshot<T> {
    items: Arc<[Arc<T>]>,
}

impl<T> Snapshot<T> {
    fn from_vec(items: Vec<Arc<T>>) -> Self {
        Self {
            items: Arc::from(items),
        }
    }

    /// Number of entities in the snapshot
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the snapshot holds no entities
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate entities in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.items.iter()
    }

    /// Entities matching `predicate`, in insertion order
    pub fn filter<P>(&self, mut predicate: P) -> Vec<Arc<T>>
    where
        P: FnMut(&T) -> bool,
    {
        self.items
            .iter()
            .filter(|item| predicate(&***item))
            .cloned()
            .collect()
    }

    /// Returns true if both snapshots share the same underlying slice
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }
}

impl<T: Entity> Snapshot<T> {
    /// First entity with the given id
    #[must_use]
    pub fn get(&self, id: &T::Id) -> Option<Arc<T>> {
        self.items.iter().find(|item| item.id() == id).cloned()
    }

    /// Returns true if an entity with the given id is present
    #[must_use]
    pub fn contains(&self, id: &T::Id) -> bool {
        self.items.iter().any(|item| item.id() == id)
    }
}

impl<T: Stateful> Snapshot<T> {
    /// Entities whose status equals `status`, in insertion order
    #[must_use]
    pub fn by_status(&self, status: &T::Status) -> Vec<Arc<T>> {
        self.filter(|item| item.status() == status)
    }
}

impl<T: Approvable> Snapshot<T> {
    /// Entities waiting for a decision, in insertion order
    #[must_use]
    pub fn pending(&self) -> Vec<Arc<T>> {
        self.filter(T::is_pending)
    }
}

impl<T> Clone for Snapshot<T> {
    fn clone(&self) -> Self {
        Self {
            items: Arc::clone(&self.items),
        }
    }
}

impl<T> Default for Snapshot<T> {
    fn default() -> Self {
        Self::from_vec(Vec::new())
    }
}

impl<T: PartialEq> PartialEq for Snapshot<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items[..] == other.items[..]
    }
}

impl<T: Serialize> Serialize for Snapshot<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter().map(|item| &**item))
    }
}

/// An ordered, id-keyed collection of entities
///
/// Ids are expected to be unique. `add` does not check: supplying a fresh id
/// is the caller's job. When duplicates exist, lookups return the first
/// match while `update` and `remove` affect every match.
#[derive(Debug, Clone)]
pub struct KeyedCollection<T> {
    snapshot: Snapshot<T>,
}

impl<T: Entity> KeyedCollection<T> {
    /// Creates an empty collection
    #[must_use]
    pub fn new() -> Self {
        Self {
            snapshot: Snapshot::default(),
        }
    }

    /// Current snapshot
    ///
    /// Cheap to clone and unaffected by later mutations.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<T> {
        self.snapshot.clone()
    }

    /// Number of entities
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    /// Returns true if the collection is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    /// Iterate entities in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<T>> {
        self.snapshot.iter()
    }

    /// Returns true if an entity with the given id is present
    #[must_use]
    pub fn contains(&self, id: &T::Id) -> bool {
        self.snapshot.contains(id)
    }

    /// Entity with the given id, if present
    #[must_use]
    pub fn get_by_id(&self, id: &T::Id) -> Option<Arc<T>> {
        self.snapshot.get(id)
    }

    /// Append an entity
    pub fn add(&mut self, item: T) {
        let mut items: Vec<Arc<T>> = Vec::with_capacity(self.len() + 1);
        items.extend(self.snapshot.iter().cloned());
        items.push(Arc::new(item));
        self.snapshot = Snapshot::from_vec(items);
    }

    /// Shallow-merge `patch` onto the entity with the given id
    ///
    /// Returns false, leaving the collection untouched, if the id is absent.
    pub fn update(&mut self, id: &T::Id, patch: &T::Patch) -> bool {
        self.update_with(id, |item| item.apply(patch.clone()))
    }

    /// Replace the entity with the given id by a modified copy
    ///
    /// Entities with other ids keep their previous allocation. Returns false,
    /// leaving the collection untouched, if the id is absent.
    pub fn update_with<F>(&mut self, id: &T::Id, mut f: F) -> bool
    where
        F: FnMut(&mut T),
    {
        if !self.contains(id) {
            return false;
        }

        let items = self
            .snapshot
            .iter()
            .map(|item| {
                if item.id() == id {
                    let mut next = T::clone(item);
                    f(&mut next);
                    Arc::new(next)
                } else {
                    Arc::clone(item)
                }
            })
            .collect();
        self.snapshot = Snapshot::from_vec(items);
        true
    }

    /// Remove the entity with the given id
    ///
    /// Returns false, leaving the collection untouched, if the id is absent.
    pub fn remove(&mut self, id: &T::Id) -> bool {
        if !self.contains(id) {
            return false;
        }

        let items = self
            .snapshot
            .iter()
            .filter(|item| item.id() != id)
            .cloned()
            .collect();
        self.snapshot = Snapshot::from_vec(items);
        true
    }
}

impl<T: Entity> Default for KeyedCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> FromIterator<T> for KeyedCollection<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            snapshot: Snapshot::from_vec(iter.into_iter().map(Arc::new).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Item {
        id: u32,
        name: String,
        status: &'static str,
    }

    #[derive(Clone, Debug, Default, PartialEq)]
    struct ItemPatch {
        name: Option<String>,
        status: Option<&'static str>,
    }

    impl Entity for Item {
        type Id = u32;
        type Patch = ItemPatch;

        fn id(&self) -> &u32 {
            &self.id
        }

        fn apply(&mut self, patch: ItemPatch) {
            if let Some(name) = patch.name {
                self.name = name;
            }
            if let Some(status) = patch.status {
                self.status = status;
            }
        }
    }

    impl Stateful for Item {
        type Status = &'static str;

        fn status(&self) -> &&'static str {
            &self.status
        }

        fn set_status(&mut self, status: &'static str) {
            self.status = status;
        }
    }

    fn item(id: u32, name: &str, status: &'static str) -> Item {
        Item {
            id,
            name: name.to_string(),
            status,
        }
    }

    fn seeded() -> KeyedCollection<Item> {
        [
            item(1, "Foundation", "draft"),
            item(2, "Framing", "active"),
            item(3, "Roofing", "draft"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn add_then_get_returns_item() {
        let mut collection = KeyedCollection::new();
        collection.add(item(7, "Electrical", "draft"));

        assert_eq!(collection.len(), 1);
        assert_eq!(
            collection.get_by_id(&7).as_deref(),
            Some(&item(7, "Electrical", "draft"))
        );
    }

    #[test]
    fn update_merges_only_patched_fields() {
        let mut collection = seeded();
        let changed = collection.update(
            &2,
            &ItemPatch {
                status: Some("closed"),
                ..ItemPatch::default()
            },
        );

        assert!(changed);
        let updated = collection.get_by_id(&2).unwrap();
        assert_eq!(updated.name, "Framing");
        assert_eq!(updated.status, "closed");
    }

    #[test]
    fn update_reuses_untouched_entities() {
        let mut collection = seeded();
        let before = collection.snapshot();

        collection.update_with(&2, |item| item.name = "Steel framing".to_string());

        let after = collection.snapshot();
        let before: Vec<_> = before.iter().cloned().collect();
        let after: Vec<_> = after.iter().cloned().collect();
        assert!(Arc::ptr_eq(&before[0], &after[0]));
        assert!(!Arc::ptr_eq(&before[1], &after[1]));
        assert!(Arc::ptr_eq(&before[2], &after[2]));
    }

    #[test]
    fn update_absent_id_is_noop() {
        let mut collection = seeded();
        let before = collection.snapshot();

        let changed = collection.update(
            &99,
            &ItemPatch {
                name: Some("Ghost".to_string()),
                ..ItemPatch::default()
            },
        );

        assert!(!changed);
        assert!(before.ptr_eq(&collection.snapshot()));
        assert_eq!(before, collection.snapshot());
    }

    #[test]
    fn old_snapshot_is_unaffected_by_mutation() {
        let mut collection = seeded();
        let before = collection.snapshot();

        collection.remove(&1);
        collection.add(item(4, "Plumbing", "draft"));

        assert_eq!(before.len(), 3);
        assert!(before.contains(&1));
        assert!(!before.contains(&4));
    }

    #[test]
    fn remove_is_idempotent() {
        let mut collection = seeded();

        assert!(collection.remove(&3));
        assert!(collection.get_by_id(&3).is_none());
        assert_eq!(collection.len(), 2);

        assert!(!collection.remove(&3));
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn by_status_preserves_order() {
        let collection = seeded();
        let drafts: Vec<u32> = collection
            .snapshot()
            .by_status(&"draft")
            .iter()
            .map(|item| item.id)
            .collect();

        assert_eq!(drafts, vec![1, 3]);
    }

    #[test]
    fn duplicate_ids_resolve_to_first_match() {
        let mut collection = seeded();
        collection.add(item(1, "Duplicate", "active"));

        assert_eq!(collection.len(), 4);
        assert_eq!(collection.get_by_id(&1).unwrap().name, "Foundation");

        collection.remove(&1);
        assert_eq!(collection.len(), 2);
    }
}
