use clap::Subcommand;

use larder::grouping::GroupKey;
use larder::model::ItemId;

#[derive(Subcommand)]
pub(crate) enum RecipeCommands {
    /// Search recipes
    List {
        /// Free-text search over titles and descriptions
        #[arg(long)]
        search: Option<String>,
        /// Maximum cooking time in minutes
        #[arg(long)]
        max_minutes: Option<u32>,
        /// easy|medium|hard
        #[arg(long)]
        difficulty: Option<String>,
        #[arg(long)]
        cuisine: Option<String>,
        /// Dietary tag name (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Ingredient you have on hand, by id or name (repeatable)
        #[arg(long = "with")]
        available: Vec<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, value_enum)]
        group: Option<GroupKey>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// List favorite recipes
    Favorites {
        #[arg(long, value_enum)]
        group: Option<GroupKey>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one recipe with ingredients and steps
    Show {
        id: ItemId,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Create a recipe
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        minutes: Option<u32>,
        #[arg(long)]
        difficulty: Option<String>,
        #[arg(long)]
        cuisine: Option<String>,
        /// Dietary tag, by id or name (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// INGREDIENT:QUANTITY:UNIT, ingredient by id or name (repeatable)
        #[arg(long = "ingredient")]
        ingredients: Vec<String>,
        /// Step description, in order (repeatable)
        #[arg(long = "step")]
        steps: Vec<String>,
    },

    /// Change fields of a recipe you authored
    Edit {
        id: ItemId,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        minutes: Option<u32>,
        /// easy|medium|hard
        #[arg(long)]
        difficulty: Option<String>,
        #[arg(long)]
        cuisine: Option<String>,
    },

    /// Delete recipes you authored
    Delete {
        #[arg(required = true)]
        ids: Vec<ItemId>,
    },

    /// Mark recipes as favorite
    Favorite {
        #[arg(required = true)]
        ids: Vec<ItemId>,
    },

    /// Remove recipes from favorites
    Unfavorite {
        #[arg(required = true)]
        ids: Vec<ItemId>,
    },

    /// Add a recipe's ingredients to the shopping list
    AddToList { id: ItemId },
}

#[derive(Subcommand)]
pub(crate) enum ReviewCommands {
    /// List reviews of a recipe
    List {
        recipe: ItemId,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Review a recipe
    Add {
        recipe: ItemId,
        /// 1 to 5
        #[arg(long)]
        rating: u8,
        #[arg(long, default_value = "")]
        comment: String,
    },

    /// Change a review
    Edit {
        recipe: ItemId,
        review: ItemId,
        #[arg(long)]
        rating: Option<u8>,
        #[arg(long)]
        comment: Option<String>,
    },

    /// Delete a review
    Delete { recipe: ItemId, review: ItemId },
}
