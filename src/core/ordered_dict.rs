//! An insertion-ordered id→record map.
//!
//! [`OrderedDict`] keeps a plain [`HashMap`] for O(1) lookup alongside an
//! explicit `order` sequence of identifiers. The order sequence is the only
//! source of iteration order and of previous/next neighbour relationships.
//!
//! Invariant: `order` contains exactly the key set of `dict`, with no
//! duplicates. Construction through the public API preserves it, and
//! deserialization rejects inputs that violate it.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::hash::Hash;

/// A record that carries its own identifier.
pub trait Identified {
    type Id: Copy + Eq + Hash + Debug;

    fn id(&self) -> Self::Id;
}

/// Order-preserving associative container keyed by a record's own identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedDict<T: Identified> {
    dict: HashMap<T::Id, T>,
    order: Vec<T::Id>,
}

impl<T: Identified> Default for OrderedDict<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Identified> OrderedDict<T> {
    pub fn new() -> Self {
        Self {
            dict: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, id: T::Id) -> bool {
        self.dict.contains_key(&id)
    }

    pub fn get(&self, id: T::Id) -> Option<&T> {
        self.dict.get(&id)
    }

    pub fn get_mut(&mut self, id: T::Id) -> Option<&mut T> {
        self.dict.get_mut(&id)
    }

    /// Inserts or replaces the record stored under `id`. A new id is appended
    /// to the order sequence.
    ///
    /// # Panics
    ///
    /// Panics if `value.id()` differs from `id`; storing a record under a
    /// foreign key is a programming error.
    pub fn set(&mut self, id: T::Id, value: T) {
        assert_eq!(
            value.id(),
            id,
            "record id must match the key it is stored under"
        );
        if !self.dict.contains_key(&id) {
            self.order.push(id);
        }
        self.dict.insert(id, value);
    }

    /// Appends `value` at the end of the order. No-op if its id already exists.
    pub fn append(&mut self, value: T) {
        let id = value.id();
        if !self.dict.contains_key(&id) {
            self.order.push(id);
            self.dict.insert(id, value);
        }
    }

    /// Removes the record with `id` from both the map and the order sequence.
    /// No-op if absent.
    pub fn remove(&mut self, id: T::Id) {
        if self.dict.remove(&id).is_some() {
            self.order.retain(|&x| x != id);
        }
    }

    /// The identifier immediately before `id` in order, or `None` if `id` is
    /// first or unknown.
    pub fn previous_id(&self, id: T::Id) -> Option<T::Id> {
        let idx = self.position(id)?;
        if idx > 0 {
            Some(self.order[idx - 1])
        } else {
            None
        }
    }

    /// The identifier immediately after `id` in order, or `None` if `id` is
    /// last or unknown.
    pub fn next_id(&self, id: T::Id) -> Option<T::Id> {
        let idx = self.position(id)?;
        self.order.get(idx + 1).copied()
    }

    /// Snapshot of the full order sequence.
    pub fn all_ids(&self) -> Vec<T::Id> {
        self.order.clone()
    }

    /// Iterates over records in order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.order.iter().map(|id| &self.dict[id])
    }

    fn position(&self, id: T::Id) -> Option<usize> {
        self.order.iter().position(|&x| x == id)
    }
}

#[derive(Serialize)]
#[serde(bound(serialize = "T: Serialize, T::Id: Serialize"))]
struct ReprRef<'a, T: Identified> {
    dict: &'a HashMap<T::Id, T>,
    order: &'a [T::Id],
}

#[derive(Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>, T::Id: Deserialize<'de>"))]
struct Repr<T: Identified> {
    dict: HashMap<T::Id, T>,
    order: Vec<T::Id>,
}

impl<T> Serialize for OrderedDict<T>
where
    T: Identified + Serialize,
    T::Id: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ReprRef {
            dict: &self.dict,
            order: &self.order,
        }
        .serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for OrderedDict<T>
where
    T: Identified + Deserialize<'de>,
    T::Id: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = Repr::<T>::deserialize(deserializer)?;
        if repr.order.len() != repr.dict.len() {
            return Err(D::Error::custom(
                "order and dict disagree on the number of entries",
            ));
        }
        let mut seen = HashSet::with_capacity(repr.order.len());
        for id in &repr.order {
            if !seen.insert(*id) {
                return Err(D::Error::custom("duplicate id in order"));
            }
            if !repr.dict.contains_key(id) {
                return Err(D::Error::custom("order references an id missing from dict"));
            }
        }
        Ok(Self {
            dict: repr.dict,
            order: repr.order,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::note::NoteItem;

    fn item(id: u64, text: &str) -> NoteItem {
        NoteItem {
            id,
            text: text.to_string(),
            is_placeholder: false,
        }
    }

    #[test]
    fn test_append_preserves_order() {
        let mut dict = OrderedDict::new();
        dict.append(item(3, "c"));
        dict.append(item(1, "a"));
        dict.append(item(2, "b"));
        assert_eq!(dict.all_ids(), vec![3, 1, 2]);
        assert_eq!(dict.len(), 3);
    }

    #[test]
    fn test_append_existing_id_is_noop() {
        let mut dict = OrderedDict::new();
        dict.append(item(1, "a"));
        dict.append(item(1, "other"));
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.get(1).unwrap().text, "a");
    }

    #[test]
    fn test_set_upserts() {
        let mut dict = OrderedDict::new();
        dict.set(1, item(1, "a"));
        dict.set(2, item(2, "b"));
        dict.set(1, item(1, "updated"));
        assert_eq!(dict.all_ids(), vec![1, 2]);
        assert_eq!(dict.get(1).unwrap().text, "updated");
    }

    #[test]
    #[should_panic(expected = "record id must match")]
    fn test_set_mismatched_id_panics() {
        let mut dict = OrderedDict::new();
        dict.set(1, item(2, "wrong"));
    }

    #[test]
    fn test_remove() {
        let mut dict = OrderedDict::new();
        dict.append(item(1, "a"));
        dict.append(item(2, "b"));
        dict.remove(1);
        assert_eq!(dict.all_ids(), vec![2]);
        assert!(dict.get(1).is_none());

        // Removing an unknown id is a no-op.
        dict.remove(42);
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn test_neighbour_queries() {
        let mut dict = OrderedDict::new();
        dict.append(item(10, "a"));
        dict.append(item(20, "b"));
        dict.append(item(30, "c"));

        assert_eq!(dict.previous_id(10), None);
        assert_eq!(dict.previous_id(20), Some(10));
        assert_eq!(dict.next_id(20), Some(30));
        assert_eq!(dict.next_id(30), None);
        assert_eq!(dict.previous_id(99), None);
        assert_eq!(dict.next_id(99), None);
    }

    #[test]
    fn test_iter_follows_order() {
        let mut dict = OrderedDict::new();
        dict.append(item(2, "b"));
        dict.append(item(1, "a"));
        let texts: Vec<&str> = dict.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["b", "a"]);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut dict = OrderedDict::new();
        dict.append(item(2, "b"));
        dict.append(item(1, "a"));

        let json = serde_json::to_string(&dict).unwrap();
        let back: OrderedDict<NoteItem> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, dict);
    }

    #[test]
    fn test_deserialize_rejects_order_key_mismatch() {
        let json = r#"{
            "dict": {"1": {"id": 1, "text": "a", "isPlaceholder": false}},
            "order": [1, 2]
        }"#;
        let result: Result<OrderedDict<NoteItem>, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_rejects_duplicate_order_entries() {
        let json = r#"{
            "dict": {
                "1": {"id": 1, "text": "a", "isPlaceholder": false},
                "2": {"id": 2, "text": "b", "isPlaceholder": false}
            },
            "order": [1, 1]
        }"#;
        let result: Result<OrderedDict<NoteItem>, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
