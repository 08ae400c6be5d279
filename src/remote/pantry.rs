//! Per-user inventory and shopping-list endpoints.

use crate::model::{InventoryItem, ItemId, Listing, PantryDraft, ShoppingListItem};
use crate::mutation::Patch;

use super::*;

impl RemoteClient {
    pub fn list_inventory(&self) -> Result<Vec<InventoryItem>, GatewayError> {
        let listing: Listing<InventoryItem> =
            self.fetch("/users/inventory/", &[], "list inventory")?;
        Ok(listing.into_items())
    }

    pub fn add_inventory_item(&self, draft: &PantryDraft) -> Result<InventoryItem, GatewayError> {
        self.send_json(self.post("/users/inventory/").json(draft), "add inventory item")
    }

    pub fn delete_inventory_item(&self, id: ItemId) -> Result<(), GatewayError> {
        self.send_empty(
            self.delete(&format!("/users/inventory/{}/", id)),
            "delete inventory item",
        )
    }

    pub fn list_shopping_list(
        &self,
        is_purchased: Option<bool>,
    ) -> Result<Vec<ShoppingListItem>, GatewayError> {
        let query = is_purchased
            .map(|p| vec![("is_purchased", p.to_string())])
            .unwrap_or_default();
        let listing: Listing<ShoppingListItem> =
            self.fetch("/users/shopping-list/", &query, "list shopping list")?;
        Ok(listing.into_items())
    }

    pub fn add_shopping_list_item(
        &self,
        draft: &PantryDraft,
    ) -> Result<ShoppingListItem, GatewayError> {
        self.send_json(
            self.post("/users/shopping-list/").json(draft),
            "add shopping list item",
        )
    }

    pub fn update_shopping_list_item(
        &self,
        id: ItemId,
        patch: &Patch,
    ) -> Result<ShoppingListItem, GatewayError> {
        self.send_json(
            self.patch(&format!("/users/shopping-list/{}/", id)).json(patch),
            "update shopping list item",
        )
    }

    pub fn delete_shopping_list_item(&self, id: ItemId) -> Result<(), GatewayError> {
        self.send_empty(
            self.delete(&format!("/users/shopping-list/{}/", id)),
            "delete shopping list item",
        )
    }

    /// Deletes every purchased entry in one call.
    pub fn clear_purchased(&self) -> Result<(), GatewayError> {
        self.send_empty(
            self.delete("/users/shopping-list/clear_purchased/"),
            "clear purchased",
        )
    }
}
