//! Read-only catalogs.

use crate::model::{DietaryTag, Ingredient, Listing};

use super::*;

impl RemoteClient {
    pub fn list_ingredients(&self) -> Result<Vec<Ingredient>, GatewayError> {
        let listing: Listing<Ingredient> =
            self.fetch("/recipes/ingredients/", &[], "list ingredients")?;
        Ok(listing.into_items())
    }

    pub fn list_dietary_tags(&self) -> Result<Vec<DietaryTag>, GatewayError> {
        let listing: Listing<DietaryTag> =
            self.fetch("/recipes/dietary-tags/", &[], "list dietary tags")?;
        Ok(listing.into_items())
    }
}
