use clap::Subcommand;

use crate::{InventoryCommands, RecipeCommands, ReviewCommands, ShoppingCommands};

pub(crate) mod catalog;
pub(crate) mod identity;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Initialize a profile directory (.larder)
    Init(identity::InitArgs),

    /// Log in and store the session tokens
    Login(identity::LoginArgs),

    /// Log out (clear stored tokens)
    Logout,

    /// Create an account
    Register(identity::RegisterArgs),

    /// Show the logged-in profile
    Whoami(identity::WhoamiArgs),

    /// Update the logged-in profile
    Profile(identity::ProfileArgs),

    /// Browse and manage recipes
    Recipes {
        #[command(subcommand)]
        command: RecipeCommands,
    },

    /// Reviews of a recipe
    Reviews {
        #[command(subcommand)]
        command: ReviewCommands,
    },

    /// What is in the pantry
    Inventory {
        #[command(subcommand)]
        command: InventoryCommands,
    },

    /// The shopping list
    Shopping {
        #[command(subcommand)]
        command: ShoppingCommands,
    },

    /// Browse the ingredient catalog
    Ingredients(catalog::IngredientsArgs),

    /// List dietary tags
    Tags(catalog::TagsArgs),
}
