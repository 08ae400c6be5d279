use clap::Subcommand;

use larder::grouping::GroupKey;
use larder::model::ItemId;

#[derive(Subcommand)]
pub(crate) enum InventoryCommands {
    /// List what is in the pantry
    List {
        #[arg(long, value_enum)]
        group: Option<GroupKey>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Add an ingredient, by id or name
    Add {
        ingredient: String,
        #[arg(long)]
        quantity: Option<String>,
        #[arg(long)]
        unit: Option<String>,
    },

    /// Remove pantry entries
    Remove {
        #[arg(required = true)]
        ids: Vec<ItemId>,
    },
}

#[derive(Subcommand)]
pub(crate) enum ShoppingCommands {
    /// Show the shopping list
    List {
        /// Only purchased entries
        #[arg(long, conflicts_with = "pending")]
        purchased: bool,
        /// Only entries still to buy
        #[arg(long)]
        pending: bool,
        #[arg(long, value_enum)]
        group: Option<GroupKey>,
        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Add an ingredient, by id or name
    Add {
        ingredient: String,
        #[arg(long)]
        quantity: Option<String>,
        #[arg(long)]
        unit: Option<String>,
    },

    /// Flip the purchased mark of entries
    Toggle {
        #[arg(required = true)]
        ids: Vec<ItemId>,
    },

    /// Remove entries
    Remove {
        #[arg(required = true)]
        ids: Vec<ItemId>,
    },

    /// Remove every purchased entry
    ClearPurchased,
}
