use clap::Args;

use larder::grouping::GroupKey;

#[derive(Args)]
pub(crate) struct IngredientsArgs {
    /// Case-insensitive name filter
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Group the listing (only `category` applies to ingredients)
    #[arg(long, value_enum)]
    pub(crate) group: Option<GroupKey>,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct TagsArgs {
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}
