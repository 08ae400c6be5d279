use serde::Serialize;
use serde_json::{Map, Value};

use crate::model::ItemId;

#[derive(Clone, Debug)]
pub enum Intent<D> {
    Add(D),
    Remove(ItemId),
    /// Sets every field of the patch in one remote call.
    Update { id: ItemId, patch: Patch },
    /// Removes the listed items.
    RemoveAll(Vec<ItemId>),
    /// Removes every listed item whose boolean `field` is true, through the
    /// resource's bulk endpoint when it has one.
    RemoveWhere { field: String },
}

impl<D> Intent<D> {
    pub fn update_field(id: ItemId, field: impl Into<String>, value: impl Into<Value>) -> Self {
        Intent::Update {
            id,
            patch: Patch::single(field, value),
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Intent::Add(_) => "add",
            Intent::Remove(_) => "remove",
            Intent::Update { .. } => "update",
            Intent::RemoveAll(_) | Intent::RemoveWhere { .. } => "remove",
        }
    }
}

/// Partial update body sent with PATCH.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Patch(Map<String, Value>);

impl Patch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new().with(field, value)
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}
