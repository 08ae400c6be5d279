mod cli_commands;
mod cli_exec;
mod cli_runtime;
mod cli_subcommands;

pub(crate) use cli_commands::Commands;
pub(crate) use cli_runtime::{App, gateway_error};
pub(crate) use cli_subcommands::{
    InventoryCommands, RecipeCommands, ReviewCommands, ShoppingCommands,
};

fn main() {
    larder::telemetry::init();
    if let Err(err) = cli_runtime::run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
