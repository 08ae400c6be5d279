mod pantry;
mod recipes;

pub(crate) use self::pantry::{InventoryCommands, ShoppingCommands};
pub(crate) use self::recipes::{RecipeCommands, ReviewCommands};
