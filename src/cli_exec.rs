use std::path::Path;

use anyhow::{Context, Result};

use larder::remote::GatewayError;

use crate::{
    App, Commands, InventoryCommands, RecipeCommands, ReviewCommands, ShoppingCommands,
    gateway_error,
};

mod catalog;
mod dispatch;
mod identity;
mod pantry;
mod profile;
mod recipes;
mod render;

pub(super) fn handle_command(home: &Path, command: Commands) -> Result<()> {
    dispatch::handle_command(home, command)
}
