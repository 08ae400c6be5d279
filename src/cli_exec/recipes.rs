use larder::model::{
    ItemId, Recipe, RecipeDraft, RecipeIngredientDraft, RecipeQuery, RecipeStepDraft,
    ReviewDraft, RECIPE_PAGE_SIZE,
};
use larder::mutation::{Intent, MutationController, Patch};
use larder::remote::{RecipeScope, RecipesGateway, ReviewsGateway};

use super::catalog::{resolve_ingredient, resolve_ingredients, resolve_tags};
use super::render::{
    finish, print_json, print_listing, print_recipe, recipe_line, review_line,
};
use super::*;

pub(super) fn handle_recipes_command(app: &App, command: RecipeCommands) -> Result<()> {
    match command {
        RecipeCommands::List {
            search,
            max_minutes,
            difficulty,
            cuisine,
            tags,
            available,
            page,
            group,
            json,
        } => {
            let query = RecipeQuery {
                search,
                max_cooking_minutes: max_minutes,
                difficulty,
                cuisine,
                dietary_tags: tags,
                available_ingredients: resolve_ingredients(app, &available)?,
                page: Some(page.max(1)),
            };
            let listing = app.client.list_recipes(&query).map_err(gateway_error)?;
            let pages = listing.total_pages(RECIPE_PAGE_SIZE);
            print_listing(&listing.results, group, json, "No recipes found", recipe_line)?;
            if !json {
                println!(
                    "page {} of {} ({} recipes)",
                    page.max(1),
                    pages,
                    listing.count
                );
            }
        }
        RecipeCommands::Favorites { group, json } => {
            let favorites = app.client.list_favorite_recipes().map_err(gateway_error)?;
            print_listing(&favorites, group, json, "No favorite recipes", recipe_line)?;
        }
        RecipeCommands::Show { id, json } => {
            let recipe = app.client.get_recipe(id).map_err(gateway_error)?;
            if json {
                print_json(&recipe)?;
            } else {
                print_recipe(&recipe);
            }
        }
        RecipeCommands::Create {
            title,
            description,
            minutes,
            difficulty,
            cuisine,
            tags,
            ingredients,
            steps,
        } => {
            let draft = RecipeDraft {
                title,
                description,
                cooking_time_minutes: minutes,
                difficulty,
                cuisine_type: cuisine,
                dietary_tags: resolve_tags(app, &tags)?,
                ingredients: ingredients
                    .iter()
                    .map(|spec| parse_ingredient_spec(app, spec))
                    .collect::<Result<Vec<_>>>()?,
                steps: steps
                    .into_iter()
                    .enumerate()
                    .map(|(i, description)| RecipeStepDraft {
                        step_number: i as u32 + 1,
                        description,
                    })
                    .collect(),
            };
            let mut recipes = MutationController::with_items(
                RecipesGateway::new(app.client.clone()),
                RecipeScope::default(),
                Vec::new(),
                app.notifier(),
            );
            let outcome = recipes.apply(Intent::Add(draft));
            finish(app, vec![outcome])?;
        }
        RecipeCommands::Edit {
            id,
            title,
            description,
            minutes,
            difficulty,
            cuisine,
        } => {
            let mut patch = Patch::new();
            if let Some(title) = title {
                if title.trim().is_empty() {
                    anyhow::bail!("title: this field is required");
                }
                patch = patch.with("title", title.trim());
            }
            if let Some(description) = description {
                patch = patch.with("description", description);
            }
            if let Some(minutes) = minutes {
                if minutes == 0 {
                    anyhow::bail!("cooking_time_minutes: must be greater than zero");
                }
                patch = patch.with("cooking_time_minutes", minutes);
            }
            if let Some(difficulty) = difficulty {
                patch = patch.with("difficulty", difficulty);
            }
            if let Some(cuisine) = cuisine {
                patch = patch.with("cuisine_type", cuisine);
            }
            if patch.is_empty() {
                anyhow::bail!(
                    "nothing to change (pass --title, --description, --minutes, --difficulty or --cuisine)"
                );
            }
            let mut recipes = mount_recipes(app, &[id])?;
            let outcome = recipes.apply(Intent::Update { id, patch });
            if let Some(recipe) = recipes.collection().get(id) {
                println!("{}", recipe_line(recipe));
            }
            finish(app, vec![outcome])?;
        }
        RecipeCommands::Delete { ids } => {
            let mut recipes = mount_recipes(app, &ids)?;
            let outcomes = recipes.apply_all(ids.into_iter().map(Intent::Remove).collect());
            finish(app, outcomes)?;
        }
        RecipeCommands::Favorite { ids } => set_favorite(app, ids, true)?,
        RecipeCommands::Unfavorite { ids } => set_favorite(app, ids, false)?,
        RecipeCommands::AddToList { id } => {
            let detail = app
                .client
                .add_recipe_to_shopping_list(id)
                .map_err(gateway_error)?;
            println!("{}", detail.detail);
        }
    }

    Ok(())
}

pub(super) fn handle_reviews_command(app: &App, command: ReviewCommands) -> Result<()> {
    match command {
        ReviewCommands::List { recipe, json } => {
            let reviews = mount_reviews(app, recipe)?;
            if json {
                print_json(reviews.items())?;
            } else if reviews.items().is_empty() {
                println!("No reviews yet");
            } else {
                for review in reviews.items() {
                    println!("{}", review_line(review));
                }
            }
        }
        ReviewCommands::Add {
            recipe,
            rating,
            comment,
        } => {
            let mut reviews = mount_reviews(app, recipe)?;
            let outcome = reviews.apply(Intent::Add(ReviewDraft { rating, comment }));
            finish(app, vec![outcome])?;
        }
        ReviewCommands::Edit {
            recipe,
            review,
            rating,
            comment,
        } => {
            let mut patch = Patch::new();
            if let Some(rating) = rating {
                if !(1..=5).contains(&rating) {
                    anyhow::bail!("rating: must be between 1 and 5");
                }
                patch = patch.with("rating", rating);
            }
            if let Some(comment) = comment {
                patch = patch.with("comment", comment);
            }
            if patch.is_empty() {
                anyhow::bail!("nothing to change (pass --rating and/or --comment)");
            }
            let mut reviews = mount_reviews(app, recipe)?;
            let outcome = reviews.apply(Intent::Update { id: review, patch });
            finish(app, vec![outcome])?;
        }
        ReviewCommands::Delete { recipe, review } => {
            let mut reviews = mount_reviews(app, recipe)?;
            let outcome = reviews.apply(Intent::Remove(review));
            finish(app, vec![outcome])?;
        }
    }

    Ok(())
}

/// Controller over exactly the recipes named on the command line.
fn mount_recipes(app: &App, ids: &[ItemId]) -> Result<MutationController<RecipesGateway>> {
    let items = ids
        .iter()
        .map(|id| app.client.get_recipe(*id).map_err(gateway_error))
        .collect::<Result<Vec<Recipe>>>()?;
    Ok(MutationController::with_items(
        RecipesGateway::new(app.client.clone()),
        RecipeScope::default(),
        items,
        app.notifier(),
    ))
}

fn mount_reviews(app: &App, recipe: ItemId) -> Result<MutationController<ReviewsGateway>> {
    MutationController::mount(
        ReviewsGateway::new(app.client.clone(), recipe),
        (),
        app.notifier(),
    )
    .map_err(gateway_error)
}

fn set_favorite(app: &App, ids: Vec<ItemId>, favorite: bool) -> Result<()> {
    let mut recipes = mount_recipes(app, &ids)?;
    let intents = ids
        .into_iter()
        .filter(|id| {
            let already = recipes
                .collection()
                .get(*id)
                .is_some_and(|r| r.is_favorited == favorite);
            if already {
                let state = if favorite { "a favorite" } else { "not a favorite" };
                println!("#{} is already {}", id, state);
            }
            !already
        })
        .map(|id| Intent::update_field(id, "is_favorited", favorite))
        .collect::<Vec<_>>();
    if intents.is_empty() {
        return Ok(());
    }
    let outcomes = recipes.apply_all(intents);
    finish(app, outcomes)
}

/// `INGREDIENT:QUANTITY:UNIT`; quantity defaults to 1 and unit to empty.
fn parse_ingredient_spec(app: &App, spec: &str) -> Result<RecipeIngredientDraft> {
    let mut parts = spec.splitn(3, ':');
    let reference = parts.next().map(str::trim).unwrap_or_default();
    if reference.is_empty() {
        anyhow::bail!("invalid --ingredient `{}` (expected INGREDIENT:QUANTITY:UNIT)", spec);
    }
    let quantity = parts
        .next()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .unwrap_or("1");
    let unit = parts.next().map(str::trim).unwrap_or_default();
    Ok(RecipeIngredientDraft {
        ingredient: resolve_ingredient(app, reference)?,
        quantity: quantity.to_string(),
        unit: unit.to_string(),
    })
}
