use super::catalog::{handle_ingredients_command, handle_tags_command};
use super::identity::{
    handle_init_command, handle_login_command, handle_logout_command, handle_profile_command,
    handle_register_command, handle_whoami_command,
};
use super::pantry::{handle_inventory_command, handle_shopping_command};
use super::profile::{with_app, with_session};
use super::recipes::{handle_recipes_command, handle_reviews_command};
use super::*;

pub(super) fn handle_command(home: &Path, command: Commands) -> Result<()> {
    match command {
        Commands::Init(args) => handle_init_command(home, args.url, args.force)?,
        Commands::Login(args) => {
            with_app(home, |app| handle_login_command(app, &args.username, &args.password))?
        }
        Commands::Logout => with_app(home, handle_logout_command)?,
        Commands::Register(args) => with_app(home, |app| {
            handle_register_command(app, args.username, args.email, args.password, args.json)
        })?,
        Commands::Whoami(args) => with_session(home, |app| handle_whoami_command(app, args.json))?,
        Commands::Profile(args) => with_session(home, |app| handle_profile_command(app, args))?,
        Commands::Recipes { command } => {
            with_session(home, |app| handle_recipes_command(app, command))?
        }
        Commands::Reviews { command } => {
            with_session(home, |app| handle_reviews_command(app, command))?
        }
        Commands::Inventory { command } => {
            with_session(home, |app| handle_inventory_command(app, command))?
        }
        Commands::Shopping { command } => {
            with_session(home, |app| handle_shopping_command(app, command))?
        }
        Commands::Ingredients(args) => with_session(home, |app| {
            handle_ingredients_command(app, args.search, args.group, args.json)
        })?,
        Commands::Tags(args) => with_session(home, |app| handle_tags_command(app, args.json))?,
    }

    Ok(())
}
