use crate::model::{ItemId, Listing, Review, ReviewDraft};
use crate::mutation::Patch;

use super::*;

fn reviews_path(recipe_id: ItemId) -> String {
    format!("/recipes/recipes/{}/reviews/", recipe_id)
}

impl RemoteClient {
    pub fn list_reviews(&self, recipe_id: ItemId) -> Result<Vec<Review>, GatewayError> {
        let listing: Listing<Review> = self.fetch(&reviews_path(recipe_id), &[], "list reviews")?;
        Ok(listing.into_items())
    }

    pub fn create_review(
        &self,
        recipe_id: ItemId,
        draft: &ReviewDraft,
    ) -> Result<Review, GatewayError> {
        self.send_json(self.post(&reviews_path(recipe_id)).json(draft), "add review")
    }

    pub fn update_review(
        &self,
        recipe_id: ItemId,
        review_id: ItemId,
        patch: &Patch,
    ) -> Result<Review, GatewayError> {
        self.send_json(
            self.patch(&format!("{}{}/", reviews_path(recipe_id), review_id))
                .json(patch),
            "update review",
        )
    }

    pub fn delete_review(&self, recipe_id: ItemId, review_id: ItemId) -> Result<(), GatewayError> {
        self.send_empty(
            self.delete(&format!("{}{}/", reviews_path(recipe_id), review_id)),
            "delete review",
        )
    }
}
