//! [`Gateway`] adaptors binding each collection to its endpoints.

use crate::gateway::Gateway;
use crate::model::{
    InventoryItem, ItemId, PantryDraft, Recipe, RecipeDraft, RecipeQuery, Review, ReviewDraft,
    ShoppingListItem,
};
use crate::mutation::Patch;

use super::*;

pub struct InventoryGateway {
    client: RemoteClient,
}

impl InventoryGateway {
    pub fn new(client: RemoteClient) -> Self {
        Self { client }
    }
}

impl Gateway for InventoryGateway {
    type Item = InventoryItem;
    type Draft = PantryDraft;
    type Filter = ();

    fn resource(&self) -> &'static str {
        "inventory"
    }

    fn list(&self, _filter: &()) -> Result<Vec<InventoryItem>, GatewayError> {
        self.client.list_inventory()
    }

    fn create(&self, draft: &PantryDraft) -> Result<InventoryItem, GatewayError> {
        self.client.add_inventory_item(draft)
    }

    fn update(&self, _id: ItemId, _patch: &Patch) -> Result<Option<InventoryItem>, GatewayError> {
        Err(GatewayError::Unsupported("update"))
    }

    fn remove(&self, id: ItemId) -> Result<(), GatewayError> {
        self.client.delete_inventory_item(id)
    }

    fn supports_update(&self) -> bool {
        false
    }
}

#[derive(Clone, Debug, Default)]
pub struct ShoppingFilter {
    pub is_purchased: Option<bool>,
}

pub struct ShoppingListGateway {
    client: RemoteClient,
}

impl ShoppingListGateway {
    pub fn new(client: RemoteClient) -> Self {
        Self { client }
    }
}

impl Gateway for ShoppingListGateway {
    type Item = ShoppingListItem;
    type Draft = PantryDraft;
    type Filter = ShoppingFilter;

    fn resource(&self) -> &'static str {
        "shopping list"
    }

    fn list(&self, filter: &ShoppingFilter) -> Result<Vec<ShoppingListItem>, GatewayError> {
        self.client.list_shopping_list(filter.is_purchased)
    }

    fn create(&self, draft: &PantryDraft) -> Result<ShoppingListItem, GatewayError> {
        self.client.add_shopping_list_item(draft)
    }

    fn update(
        &self,
        id: ItemId,
        patch: &Patch,
    ) -> Result<Option<ShoppingListItem>, GatewayError> {
        self.client.update_shopping_list_item(id, patch).map(Some)
    }

    fn remove(&self, id: ItemId) -> Result<(), GatewayError> {
        self.client.delete_shopping_list_item(id)
    }

    /// Purchased entries go through the bulk endpoint in one call.
    fn remove_matching(&self, field: &str, ids: &[ItemId]) -> Result<(), GatewayError> {
        match field {
            "is_purchased" => self.client.clear_purchased(),
            _ => self.remove_all(ids),
        }
    }
}

/// Which recipes a recipe collection shows.
#[derive(Clone, Debug, Default)]
pub struct RecipeScope {
    pub query: RecipeQuery,
    pub favorites_only: bool,
}

pub struct RecipesGateway {
    client: RemoteClient,
}

impl RecipesGateway {
    pub fn new(client: RemoteClient) -> Self {
        Self { client }
    }
}

impl Gateway for RecipesGateway {
    type Item = Recipe;
    type Draft = RecipeDraft;
    type Filter = RecipeScope;

    fn resource(&self) -> &'static str {
        "recipes"
    }

    fn list(&self, scope: &RecipeScope) -> Result<Vec<Recipe>, GatewayError> {
        if scope.favorites_only {
            return self.client.list_favorite_recipes();
        }
        Ok(self.client.list_recipes(&scope.query)?.results)
    }

    fn create(&self, draft: &RecipeDraft) -> Result<Recipe, GatewayError> {
        self.client.create_recipe(draft)
    }

    /// A patch touching only `is_favorited` goes to the favorite endpoint.
    fn update(&self, id: ItemId, patch: &Patch) -> Result<Option<Recipe>, GatewayError> {
        if patch.get("is_favorited").is_some() && patch.len() > 1 {
            return Err(GatewayError::Unsupported("favoriting together with other changes"));
        }
        if let Some(fav) = patch.get("is_favorited").and_then(|v| v.as_bool()) {
            if fav {
                self.client.favorite_recipe(id)?;
            } else {
                self.client.unfavorite_recipe(id)?;
            }
            return Ok(None);
        }
        self.client.update_recipe(id, patch).map(Some)
    }

    fn remove(&self, id: ItemId) -> Result<(), GatewayError> {
        self.client.delete_recipe(id)
    }
}

pub struct ReviewsGateway {
    client: RemoteClient,
    recipe_id: ItemId,
}

impl ReviewsGateway {
    pub fn new(client: RemoteClient, recipe_id: ItemId) -> Self {
        Self { client, recipe_id }
    }
}

impl Gateway for ReviewsGateway {
    type Item = Review;
    type Draft = ReviewDraft;
    type Filter = ();

    fn resource(&self) -> &'static str {
        "reviews"
    }

    fn list(&self, _filter: &()) -> Result<Vec<Review>, GatewayError> {
        self.client.list_reviews(self.recipe_id)
    }

    fn create(&self, draft: &ReviewDraft) -> Result<Review, GatewayError> {
        self.client.create_review(self.recipe_id, draft)
    }

    fn update(&self, id: ItemId, patch: &Patch) -> Result<Option<Review>, GatewayError> {
        self.client
            .update_review(self.recipe_id, id, patch)
            .map(Some)
    }

    fn remove(&self, id: ItemId) -> Result<(), GatewayError> {
        self.client.delete_review(self.recipe_id, id)
    }
}
