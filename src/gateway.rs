//! Remote collection contract used by the mutation controller.

use std::fmt;

use crate::model::ItemId;
use crate::mutation::{Draft, Item, Patch};
use crate::remote::GatewayError;

pub trait Gateway {
    type Item: Item;
    type Draft: Draft;
    type Filter: Clone + Default + fmt::Debug;

    /// Human name of the collection, used in logs and notices.
    fn resource(&self) -> &'static str;

    fn list(&self, filter: &Self::Filter) -> Result<Vec<Self::Item>, GatewayError>;

    fn create(&self, draft: &Self::Draft) -> Result<Self::Item, GatewayError>;

    /// Returns the server's copy of the item when the endpoint sends one back.
    fn update(&self, id: ItemId, patch: &Patch) -> Result<Option<Self::Item>, GatewayError>;

    fn remove(&self, id: ItemId) -> Result<(), GatewayError>;

    /// Removes several items. Stops at the first failure.
    fn remove_all(&self, ids: &[ItemId]) -> Result<(), GatewayError> {
        for id in ids {
            self.remove(*id)?;
        }
        Ok(())
    }

    /// Removes every item whose boolean `field` is set. `ids` are the matches
    /// the caller holds; the default removes exactly those.
    fn remove_matching(&self, field: &str, ids: &[ItemId]) -> Result<(), GatewayError> {
        let _ = field;
        self.remove_all(ids)
    }

    fn supports_update(&self) -> bool {
        true
    }
}
