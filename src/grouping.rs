//! Grouping and filtering for list views. Pure functions, no I/O.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::ItemId;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum GroupKey {
    Category,
    Source,
}

impl GroupKey {
    /// Label used for items that carry no value for this key.
    pub fn fallback_label(self) -> &'static str {
        match self {
            GroupKey::Category => "Other",
            GroupKey::Source => "Manual",
        }
    }
}

pub trait Groupable {
    fn id(&self) -> ItemId;
    fn name(&self) -> &str;
    fn label(&self, key: GroupKey) -> Option<&str>;
}

#[derive(Debug, PartialEq, Serialize)]
pub struct Group<'a, T> {
    pub label: String,
    pub items: Vec<&'a T>,
}

/// Groups sorted by label, items within a group sorted by name then id.
pub fn group<T: Groupable>(items: &[T], key: GroupKey) -> Vec<Group<'_, T>> {
    let mut by_label: BTreeMap<String, Vec<&T>> = BTreeMap::new();
    for item in items {
        let label = item
            .label(key)
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(key.fallback_label());
        by_label.entry(label.to_string()).or_default().push(item);
    }

    by_label
        .into_iter()
        .map(|(label, mut items)| {
            items.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(&b.id())));
            Group { label, items }
        })
        .collect()
}

/// Case-insensitive substring match on the item name. An empty term keeps everything.
pub fn filter_by_name<'a, T: Groupable>(items: &'a [T], term: &str) -> Vec<&'a T> {
    let term = term.trim().to_lowercase();
    items
        .iter()
        .filter(|i| term.is_empty() || i.name().to_lowercase().contains(&term))
        .collect()
}

#[cfg(test)]
#[path = "tests/grouping_tests.rs"]
mod tests;
