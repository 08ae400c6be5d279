use larder::grouping::{GroupKey, Groupable, group};
use larder::model::{Ingredient, InventoryItem, Recipe, Review, ShoppingListItem};
use larder::mutation::{MutationError, Reconciliation};
use serde::Serialize;

use super::*;

pub(super) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("serialize json output")?
    );
    Ok(())
}

/// Prints a listing, grouped under `## label` headings when a key is given.
pub(super) fn print_listing<T, F>(
    items: &[T],
    key: Option<GroupKey>,
    json: bool,
    empty: &str,
    line: F,
) -> Result<()>
where
    T: Groupable + Serialize,
    F: Fn(&T) -> String,
{
    match (key, json) {
        (Some(key), true) => print_json(&group(items, key)),
        (None, true) => print_json(items),
        _ if items.is_empty() => {
            println!("{}", empty);
            Ok(())
        }
        (Some(key), false) => {
            for g in group(items, key) {
                println!("## {} ({})", g.label, g.items.len());
                for item in g.items {
                    println!("  {}", line(item));
                }
            }
            Ok(())
        }
        (None, false) => {
            for item in items {
                println!("{}", line(item));
            }
            Ok(())
        }
    }
}

fn amount(quantity: &Option<String>, unit: &Option<String>) -> String {
    match (quantity.as_deref(), unit.as_deref().filter(|u| !u.is_empty())) {
        (Some(q), Some(u)) => format!(" {} {}", q, u),
        (Some(q), None) => format!(" {}", q),
        _ => String::new(),
    }
}

pub(super) fn inventory_line(item: &InventoryItem) -> String {
    format!(
        "#{} {}{}",
        item.id,
        item.ingredient_name,
        amount(&item.quantity, &item.unit)
    )
}

pub(super) fn shopping_line(item: &ShoppingListItem) -> String {
    let mark = if item.is_purchased { "x" } else { " " };
    format!(
        "[{}] #{} {}{}",
        mark,
        item.id,
        item.ingredient_name,
        amount(&item.quantity, &item.unit)
    )
}

pub(super) fn recipe_line(recipe: &Recipe) -> String {
    let mut out = format!("#{} {}", recipe.id, recipe.title);
    let mut facts = Vec::new();
    if let Some(m) = recipe.cooking_time_minutes {
        facts.push(format!("{} min", m));
    }
    if let Some(d) = recipe.difficulty.as_deref() {
        facts.push(d.to_string());
    }
    if let Some(c) = recipe.cuisine_type.as_deref() {
        facts.push(c.to_string());
    }
    if !facts.is_empty() {
        out.push_str(&format!(" ({})", facts.join(", ")));
    }
    if recipe.is_favorited {
        out.push_str(" *");
    }
    out
}

pub(super) fn ingredient_line(ingredient: &Ingredient) -> String {
    format!("#{} {}", ingredient.id, ingredient.name)
}

pub(super) fn review_line(review: &Review) -> String {
    let author = review.author_username.as_deref().unwrap_or("anonymous");
    if review.comment.is_empty() {
        format!("#{} {}/5 by {}", review.id, review.rating, author)
    } else {
        format!(
            "#{} {}/5 by {}: {}",
            review.id, review.rating, author, review.comment
        )
    }
}

pub(super) fn print_recipe(recipe: &Recipe) {
    println!("{}", recipe_line(recipe));
    if let Some(author) = recipe.author_username.as_deref() {
        println!("by {}", author);
    }
    if !recipe.dietary_tags.is_empty() {
        println!("tags: {}", recipe.dietary_tags.join(", "));
    }
    if !recipe.description.is_empty() {
        println!();
        println!("{}", recipe.description);
    }
    if !recipe.recipe_ingredients.is_empty() {
        println!();
        println!("Ingredients:");
        for ri in &recipe.recipe_ingredients {
            let notes = ri
                .notes
                .as_deref()
                .filter(|n| !n.is_empty())
                .map(|n| format!(" ({})", n))
                .unwrap_or_default();
            println!(
                "  - {}{}{}",
                ri.ingredient_name,
                amount(&ri.quantity, &ri.unit),
                notes
            );
        }
    }
    if !recipe.steps.is_empty() {
        println!();
        println!("Steps:");
        for step in &recipe.steps {
            println!("  {}. {}", step.step_number, step.description);
        }
    }
}

/// Reports the outcome of a batch of intents: rejections inline, then the
/// notices raised while reconciling. Fails if anything did not commit.
pub(super) fn finish(app: &App, outcomes: Vec<Result<Reconciliation, MutationError>>) -> Result<()> {
    let total = outcomes.len();
    let mut failed = 0;
    let mut auth_lost = false;
    for outcome in &outcomes {
        match outcome {
            Ok(r) if r.is_committed() => {}
            Ok(r) => {
                failed += 1;
                if let Some(GatewayError::Auth { .. }) = r.error() {
                    auth_lost = true;
                }
                if let Some(err) = r.error() {
                    for (field, msgs) in err.field_errors() {
                        eprintln!("  {}: {}", field, msgs.join(" "));
                    }
                }
            }
            Err(MutationError::Invalid(invalid)) => {
                failed += 1;
                eprintln!("  {}: {}", invalid.field, invalid.message);
            }
            Err(err) => {
                failed += 1;
                eprintln!("rejected: {}", err);
            }
        }
    }
    app.report_notices();

    if auth_lost {
        anyhow::bail!("session expired or revoked; log in again (run `larder login ...`)");
    }
    if failed > 0 {
        anyhow::bail!("{} of {} change(s) did not go through", failed, total);
    }
    Ok(())
}
