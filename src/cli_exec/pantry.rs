use larder::gateway::Gateway;
use larder::model::PantryDraft;
use larder::mutation::{Intent, MutationController};
use larder::remote::{InventoryGateway, ShoppingFilter, ShoppingListGateway};

use super::catalog::resolve_ingredient;
use super::render::{finish, inventory_line, print_listing, shopping_line};
use super::*;

pub(super) fn handle_inventory_command(app: &App, command: InventoryCommands) -> Result<()> {
    let mut inventory = mount(app, InventoryGateway::new(app.client.clone()), ())?;
    match command {
        InventoryCommands::List { group, json } => {
            print_listing(
                inventory.items(),
                group,
                json,
                "Your pantry is empty",
                inventory_line,
            )?;
        }
        InventoryCommands::Add {
            ingredient,
            quantity,
            unit,
        } => {
            let draft = pantry_draft(app, &ingredient, quantity, unit)?;
            let outcome = inventory.apply(Intent::Add(draft));
            show_after(inventory.items(), inventory_line);
            finish(app, vec![outcome])?;
        }
        InventoryCommands::Remove { ids } => {
            let outcomes = inventory.apply_all(ids.into_iter().map(Intent::Remove).collect());
            show_after(inventory.items(), inventory_line);
            finish(app, outcomes)?;
        }
    }

    Ok(())
}

pub(super) fn handle_shopping_command(app: &App, command: ShoppingCommands) -> Result<()> {
    match command {
        ShoppingCommands::List {
            purchased,
            pending,
            group,
            json,
        } => {
            let is_purchased = match (purchased, pending) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let list = mount(
                app,
                ShoppingListGateway::new(app.client.clone()),
                ShoppingFilter { is_purchased },
            )?;
            print_listing(
                list.items(),
                group,
                json,
                "Your shopping list is empty",
                shopping_line,
            )?;
        }
        ShoppingCommands::Add {
            ingredient,
            quantity,
            unit,
        } => {
            let mut list = mount_shopping(app)?;
            let draft = pantry_draft(app, &ingredient, quantity, unit)?;
            let outcome = list.apply(Intent::Add(draft));
            show_after(list.items(), shopping_line);
            finish(app, vec![outcome])?;
        }
        ShoppingCommands::Toggle { ids } => {
            let mut list = mount_shopping(app)?;
            let mut outcomes = Vec::new();
            let mut intents = Vec::new();
            for id in ids {
                match list.toggle_intent(id, "is_purchased") {
                    Ok(intent) => intents.push(intent),
                    Err(err) => outcomes.push(Err(err)),
                }
            }
            outcomes.extend(list.apply_all(intents));
            show_after(list.items(), shopping_line);
            finish(app, outcomes)?;
        }
        ShoppingCommands::Remove { ids } => {
            let mut list = mount_shopping(app)?;
            let outcomes = list.apply_all(ids.into_iter().map(Intent::Remove).collect());
            show_after(list.items(), shopping_line);
            finish(app, outcomes)?;
        }
        ShoppingCommands::ClearPurchased => {
            let mut list = mount_shopping(app)?;
            if !list.items().iter().any(|i| i.is_purchased) {
                println!("Nothing purchased to clear");
                return Ok(());
            }
            let outcome = list.apply(Intent::RemoveWhere {
                field: "is_purchased".to_string(),
            });
            show_after(list.items(), shopping_line);
            finish(app, vec![outcome])?;
        }
    }

    Ok(())
}

fn mount<G: Gateway>(app: &App, gateway: G, filter: G::Filter) -> Result<MutationController<G>> {
    MutationController::mount(gateway, filter, app.notifier()).map_err(gateway_error)
}

fn mount_shopping(app: &App) -> Result<MutationController<ShoppingListGateway>> {
    mount(
        app,
        ShoppingListGateway::new(app.client.clone()),
        ShoppingFilter::default(),
    )
}

fn pantry_draft(
    app: &App,
    ingredient: &str,
    quantity: Option<String>,
    unit: Option<String>,
) -> Result<PantryDraft> {
    Ok(PantryDraft {
        quantity,
        unit,
        ..PantryDraft::new(resolve_ingredient(app, ingredient)?)
    })
}

/// Current local state after the mutations settled.
fn show_after<T>(items: &[T], line: impl Fn(&T) -> String) {
    for item in items {
        println!("{}", line(item));
    }
}
