//! Resource models as the API serves them, plus the drafts sent on create.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::ItemId;
use crate::grouping::{GroupKey, Groupable};
use crate::mutation::{Draft, Invalid, Item};

fn is_empty_vec<T>(v: &[T]) -> bool {
    v.is_empty()
}

/// Decimal fields arrive as strings ("2.00") or bare numbers depending on the serializer.
fn de_quantity<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<serde_json::Value>::deserialize(d)?;
    Ok(match v {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cooking_time_minutes: Option<u32>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub cuisine_type: Option<String>,
    #[serde(default)]
    pub author_username: Option<String>,
    #[serde(default)]
    pub is_favorited: bool,
    #[serde(default)]
    pub dietary_tags: Vec<String>,
    #[serde(default)]
    pub recipe_ingredients: Vec<RecipeIngredient>,
    #[serde(default)]
    pub steps: Vec<RecipeStep>,
    #[serde(default)]
    pub main_image: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub ingredient_id: ItemId,
    pub ingredient_name: String,
    #[serde(default, deserialize_with = "de_quantity")]
    pub quantity: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecipeStep {
    pub step_number: u32,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ItemId,
    pub rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub author_username: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: ItemId,
    pub ingredient: ItemId,
    pub ingredient_name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "de_quantity")]
    pub quantity: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub id: ItemId,
    pub ingredient: ItemId,
    pub ingredient_name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "de_quantity")]
    pub quantity: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub is_purchased: bool,
    /// Title of the recipe the entry was added from, if any.
    #[serde(default)]
    pub source_recipe: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub category_display: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DietaryTag {
    pub id: ItemId,
    pub name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Profile {
    pub id: ItemId,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub nickname: Option<String>,
    /// Dietary tag names.
    #[serde(default)]
    pub dietary_preferences: Vec<String>,
    /// Ingredient names.
    #[serde(default)]
    pub disliked_ingredients: Vec<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Profile fields to change. `None` keeps the current value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileUpdate {
    pub email: Option<String>,
    pub nickname: Option<String>,
    pub dietary_preferences: Option<Vec<String>>,
    pub disliked_ingredients: Option<Vec<String>>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn validate(&self) -> Result<(), Invalid> {
        if let Some(email) = &self.email
            && !email.trim().is_empty()
            && !email.contains('@')
        {
            return Err(Invalid::new("email", "enter a valid email address"));
        }
        Ok(())
    }

    /// The full form body for `PUT /users/profile/`: `current` with these changes on top.
    pub fn merged_into(&self, current: &Profile) -> serde_json::Value {
        let pick = |change: &Option<Vec<String>>, now: &[String]| {
            change.clone().unwrap_or_else(|| now.to_vec())
        };
        serde_json::json!({
            "email": self.email.as_deref().map(str::trim).unwrap_or(&current.email),
            "nickname": self
                .nickname
                .as_deref()
                .or(current.nickname.as_deref())
                .unwrap_or_default(),
            "dietary_preferences": pick(&self.dietary_preferences, &current.dietary_preferences),
            "disliked_ingredients": pick(&self.disliked_ingredients, &current.disliked_ingredients),
        })
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Detail {
    pub detail: String,
}

/// List endpoints answer either with a paginated envelope or a bare array.
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum Listing<T> {
    Paged(Page<T>),
    Plain(Vec<T>),
}

impl<T> Listing<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Paged(p) => p.results,
            Listing::Plain(v) => v,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

pub const RECIPE_PAGE_SIZE: u64 = 10;

impl<T> Page<T> {
    pub fn total_pages(&self, page_size: u64) -> u64 {
        if page_size == 0 {
            return 1;
        }
        self.count.div_ceil(page_size).max(1)
    }
}

/// Recipe search filters. Empty fields are left off the query string.
#[derive(Clone, Debug, Default)]
pub struct RecipeQuery {
    pub search: Option<String>,
    pub max_cooking_minutes: Option<u32>,
    pub difficulty: Option<String>,
    pub cuisine: Option<String>,
    pub dietary_tags: Vec<String>,
    pub available_ingredients: Vec<ItemId>,
    pub page: Option<u32>,
}

fn non_empty(s: &Option<String>) -> Option<&str> {
    s.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl RecipeQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();

        if let Some(s) = non_empty(&self.search) {
            out.push(("search", s.to_string()));
        }
        if let Some(m) = self.max_cooking_minutes {
            out.push(("cooking_time_minutes__lte", m.to_string()));
        }
        if let Some(d) = non_empty(&self.difficulty) {
            out.push(("difficulty", d.to_string()));
        }
        if let Some(c) = non_empty(&self.cuisine) {
            out.push(("cuisine_type__icontains", c.to_string()));
        }
        if !self.dietary_tags.is_empty() {
            out.push(("dietary_tags__name__in", self.dietary_tags.join(",")));
        }
        if !self.available_ingredients.is_empty() {
            let ids = self
                .available_ingredients
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>();
            out.push(("available_ingredients", ids.join(",")));
        }
        out.push(("page", self.page.unwrap_or(1).to_string()));
        out
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct PantryDraft {
    pub ingredient: ItemId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl PantryDraft {
    pub fn new(ingredient: ItemId) -> Self {
        Self {
            ingredient,
            quantity: None,
            unit: None,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ReviewDraft {
    pub rating: u8,
    pub comment: String,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct RecipeDraft {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooking_time_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine_type: Option<String>,
    #[serde(skip_serializing_if = "is_empty_vec")]
    pub dietary_tags: Vec<ItemId>,
    #[serde(skip_serializing_if = "is_empty_vec")]
    pub ingredients: Vec<RecipeIngredientDraft>,
    #[serde(skip_serializing_if = "is_empty_vec")]
    pub steps: Vec<RecipeStepDraft>,
}

#[derive(Clone, Debug, Serialize)]
pub struct RecipeIngredientDraft {
    pub ingredient: ItemId,
    pub quantity: String,
    pub unit: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct RecipeStepDraft {
    pub step_number: u32,
    pub description: String,
}

impl Item for Recipe {
    fn id(&self) -> ItemId {
        self.id
    }
}

impl Item for Review {
    fn id(&self) -> ItemId {
        self.id
    }
}

impl Item for InventoryItem {
    fn id(&self) -> ItemId {
        self.id
    }

    fn dedup_key(&self) -> Option<String> {
        Some(self.ingredient.to_string())
    }
}

impl Item for ShoppingListItem {
    fn id(&self) -> ItemId {
        self.id
    }

    fn dedup_key(&self) -> Option<String> {
        Some(self.ingredient.to_string())
    }
}

impl Draft for PantryDraft {
    fn dedup_key(&self) -> Option<String> {
        Some(self.ingredient.to_string())
    }

    fn validate(&self) -> Result<(), Invalid> {
        if let Some(q) = &self.quantity
            && q.trim().parse::<f64>().map(|v| v <= 0.0).unwrap_or(true)
        {
            return Err(Invalid::new("quantity", "must be a positive number"));
        }
        if self.unit.is_some() && self.quantity.is_none() {
            return Err(Invalid::new("quantity", "required when a unit is given"));
        }
        Ok(())
    }
}

impl Draft for ReviewDraft {
    fn validate(&self) -> Result<(), Invalid> {
        if !(1..=5).contains(&self.rating) {
            return Err(Invalid::new("rating", "must be between 1 and 5"));
        }
        Ok(())
    }
}

impl Draft for RecipeDraft {
    fn validate(&self) -> Result<(), Invalid> {
        if self.title.trim().is_empty() {
            return Err(Invalid::new("title", "this field is required"));
        }
        if self.cooking_time_minutes == Some(0) {
            return Err(Invalid::new(
                "cooking_time_minutes",
                "must be greater than zero",
            ));
        }
        for (i, step) in self.steps.iter().enumerate() {
            if step.description.trim().is_empty() {
                return Err(Invalid::new(
                    "steps",
                    format!("step {} has no description", i + 1),
                ));
            }
        }
        Ok(())
    }
}

impl Groupable for Ingredient {
    fn id(&self) -> ItemId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn label(&self, key: GroupKey) -> Option<&str> {
        match key {
            GroupKey::Category => self.category_display.as_deref(),
            GroupKey::Source => None,
        }
    }
}

impl Groupable for InventoryItem {
    fn id(&self) -> ItemId {
        self.id
    }

    fn name(&self) -> &str {
        &self.ingredient_name
    }

    fn label(&self, key: GroupKey) -> Option<&str> {
        match key {
            GroupKey::Category => self.category.as_deref(),
            GroupKey::Source => None,
        }
    }
}

impl Groupable for ShoppingListItem {
    fn id(&self) -> ItemId {
        self.id
    }

    fn name(&self) -> &str {
        &self.ingredient_name
    }

    fn label(&self, key: GroupKey) -> Option<&str> {
        match key {
            GroupKey::Category => self.category.as_deref(),
            GroupKey::Source => self.source_recipe.as_deref(),
        }
    }
}

impl Groupable for Recipe {
    fn id(&self) -> ItemId {
        self.id
    }

    fn name(&self) -> &str {
        &self.title
    }

    fn label(&self, key: GroupKey) -> Option<&str> {
        match key {
            GroupKey::Category => self.cuisine_type.as_deref(),
            GroupKey::Source => self.author_username.as_deref(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/model/resources_tests.rs"]
mod tests;
