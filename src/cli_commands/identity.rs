use clap::Args;

#[derive(Args)]
pub(crate) struct InitArgs {
    /// API base URL
    #[arg(long, default_value = larder::model::DEFAULT_BASE_URL)]
    pub(crate) url: String,
    /// Overwrite an existing profile
    #[arg(long)]
    pub(crate) force: bool,
}

#[derive(Args)]
pub(crate) struct LoginArgs {
    #[arg(long)]
    pub(crate) username: String,
    #[arg(long, env = "LARDER_PASSWORD", hide_env_values = true)]
    pub(crate) password: String,
}

#[derive(Args)]
pub(crate) struct RegisterArgs {
    #[arg(long)]
    pub(crate) username: String,
    #[arg(long)]
    pub(crate) email: String,
    #[arg(long, env = "LARDER_PASSWORD", hide_env_values = true)]
    pub(crate) password: String,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct WhoamiArgs {
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args)]
pub(crate) struct ProfileArgs {
    #[arg(long)]
    pub(crate) email: Option<String>,
    #[arg(long)]
    pub(crate) nickname: Option<String>,
    /// Dietary tag names, comma separated (an empty value clears them)
    #[arg(long, value_delimiter = ',', num_args = 0..)]
    pub(crate) dietary_preferences: Option<Vec<String>>,
    /// Ingredient names, comma separated (an empty value clears them)
    #[arg(long, value_delimiter = ',', num_args = 0..)]
    pub(crate) disliked_ingredients: Option<Vec<String>>,
    /// Emit JSON
    #[arg(long)]
    pub(crate) json: bool,
}
