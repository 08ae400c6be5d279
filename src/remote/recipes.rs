use crate::model::{Detail, ItemId, Listing, Page, Recipe, RecipeDraft, RecipeQuery};
use crate::mutation::Patch;

use super::*;

impl RemoteClient {
    /// One page of recipes. Servers without pagination yield a single page.
    pub fn list_recipes(&self, query: &RecipeQuery) -> Result<Page<Recipe>, GatewayError> {
        let listing: Listing<Recipe> =
            self.fetch("/recipes/recipes/", &query.to_params(), "list recipes")?;
        Ok(match listing {
            Listing::Paged(page) => page,
            Listing::Plain(results) => Page {
                count: results.len() as u64,
                next: None,
                previous: None,
                results,
            },
        })
    }

    pub fn list_favorite_recipes(&self) -> Result<Vec<Recipe>, GatewayError> {
        let listing: Listing<Recipe> =
            self.fetch("/recipes/recipes/favorites/", &[], "list favorite recipes")?;
        Ok(listing.into_items())
    }

    pub fn get_recipe(&self, id: ItemId) -> Result<Recipe, GatewayError> {
        self.fetch(&format!("/recipes/recipes/{}/", id), &[], "get recipe")
    }

    pub fn create_recipe(&self, draft: &RecipeDraft) -> Result<Recipe, GatewayError> {
        self.send_json(self.post("/recipes/recipes/").json(draft), "create recipe")
    }

    pub fn update_recipe(&self, id: ItemId, patch: &Patch) -> Result<Recipe, GatewayError> {
        self.send_json(
            self.patch(&format!("/recipes/recipes/{}/", id)).json(patch),
            "update recipe",
        )
    }

    pub fn delete_recipe(&self, id: ItemId) -> Result<(), GatewayError> {
        self.send_empty(
            self.delete(&format!("/recipes/recipes/{}/", id)),
            "delete recipe",
        )
    }

    pub fn favorite_recipe(&self, id: ItemId) -> Result<(), GatewayError> {
        self.send_empty(
            self.post(&format!("/recipes/recipes/{}/favorite/", id)),
            "favorite recipe",
        )
    }

    pub fn unfavorite_recipe(&self, id: ItemId) -> Result<(), GatewayError> {
        self.send_empty(
            self.delete(&format!("/recipes/recipes/{}/favorite/", id)),
            "unfavorite recipe",
        )
    }

    /// Adds every ingredient of a recipe to the shopping list. Returns the server's summary.
    pub fn add_recipe_to_shopping_list(&self, id: ItemId) -> Result<Detail, GatewayError> {
        self.send_json(
            self.post(&format!("/recipes/recipes/{}/add_to_shopping_list/", id)),
            "add recipe to shopping list",
        )
    }
}
