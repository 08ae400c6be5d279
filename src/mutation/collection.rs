use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{Invalid, MutationError};
use crate::model::ItemId;

pub trait Item: Clone + fmt::Debug + Serialize + DeserializeOwned {
    fn id(&self) -> ItemId;

    /// Identity that must stay unique across the list besides the id
    /// (e.g. the ingredient of a shopping-list entry).
    fn dedup_key(&self) -> Option<String> {
        None
    }

    fn field(&self, field: &str) -> Option<Value> {
        serde_json::to_value(self).ok()?.get(field).cloned()
    }

    /// Sets one serialized field by name. On error `self` is left untouched.
    fn set_field(&mut self, field: &str, value: &Value) -> Result<(), MutationError> {
        let err = |reason: String| MutationError::Field {
            field: field.to_string(),
            reason,
        };
        let mut v = serde_json::to_value(&*self).map_err(|e| err(e.to_string()))?;
        let Some(obj) = v.as_object_mut() else {
            return Err(err("item is not an object".to_string()));
        };
        if field == "id" {
            return Err(err("the id cannot change".to_string()));
        }
        if !obj.contains_key(field) {
            return Err(err("no such field".to_string()));
        }
        obj.insert(field.to_string(), value.clone());
        *self = serde_json::from_value(v).map_err(|e| err(e.to_string()))?;
        Ok(())
    }
}

pub trait Draft: Serialize + fmt::Debug {
    fn dedup_key(&self) -> Option<String> {
        None
    }

    fn validate(&self) -> Result<(), Invalid> {
        Ok(())
    }
}

/// Ordered items, unique by id.
#[derive(Clone, Debug, PartialEq)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Item> Collection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds from a server listing; a repeated id keeps its first occurrence.
    pub fn from_items(items: Vec<T>) -> Self {
        let mut out = Self::new();
        for item in items {
            let id = item.id();
            if !out.push(item) {
                tracing::warn!(%id, "dropping duplicate id from listing");
            }
        }
        out
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<&T> {
        self.items.iter().find(|i| i.id() == id)
    }

    pub fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|i| i.id() == id)
    }

    pub fn contains_dedup_key(&self, key: &str) -> bool {
        self.items
            .iter()
            .any(|i| i.dedup_key().as_deref() == Some(key))
    }

    pub(super) fn take(&mut self, id: ItemId) -> Option<(usize, T)> {
        let index = self.position(id)?;
        Some((index, self.items.remove(index)))
    }

    /// Puts a removed item back at `index`, clamped to the current length.
    pub(super) fn restore(&mut self, index: usize, item: T) {
        if self.replace(item.clone()) {
            return;
        }
        let index = index.min(self.items.len());
        self.items.insert(index, item);
    }

    /// Replaces the entry with the same id. Returns false if absent.
    pub(super) fn replace(&mut self, item: T) -> bool {
        let id = item.id();
        match self.items.iter_mut().find(|i| i.id() == id) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }

    /// Appends unless the id is already present.
    pub(super) fn push(&mut self, item: T) -> bool {
        if self.get(item.id()).is_some() {
            return false;
        }
        self.items.push(item);
        true
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
