use larder::grouping::{GroupKey, filter_by_name};
use larder::model::{DietaryTag, Ingredient, ItemId};

use super::render::{ingredient_line, print_json, print_listing};
use super::*;

pub(super) fn handle_ingredients_command(
    app: &App,
    search: Option<String>,
    group: Option<GroupKey>,
    json: bool,
) -> Result<()> {
    let all = app.client.list_ingredients().map_err(gateway_error)?;
    let shown = filter_by_name(&all, search.as_deref().unwrap_or(""))
        .into_iter()
        .cloned()
        .collect::<Vec<_>>();
    print_listing(
        &shown,
        group,
        json,
        "No ingredients match",
        ingredient_line,
    )
}

pub(super) fn handle_tags_command(app: &App, json: bool) -> Result<()> {
    let tags = app.client.list_dietary_tags().map_err(gateway_error)?;
    if json {
        return print_json(&tags);
    }
    if tags.is_empty() {
        println!("No dietary tags");
    }
    for tag in &tags {
        println!("#{} {}", tag.id, tag.name);
    }
    Ok(())
}

/// Resolves ingredient references given as ids or names. The catalog is only
/// fetched when some reference is not a plain id.
pub(super) fn resolve_ingredients(app: &App, refs: &[String]) -> Result<Vec<ItemId>> {
    let mut catalog: Option<Vec<Ingredient>> = None;
    let mut out = Vec::with_capacity(refs.len());
    for r in refs {
        if let Ok(id) = r.parse::<ItemId>() {
            out.push(id);
            continue;
        }
        if catalog.is_none() {
            catalog = Some(app.client.list_ingredients().map_err(gateway_error)?);
        }
        let entries = catalog.as_deref().unwrap_or_default();
        out.push(pick_by_name(entries, r, "ingredient", |i| i.id, |i| i.name.as_str())?);
    }
    Ok(out)
}

pub(super) fn resolve_ingredient(app: &App, reference: &str) -> Result<ItemId> {
    let ids = resolve_ingredients(app, &[reference.to_string()])?;
    ids.into_iter()
        .next()
        .with_context(|| format!("unknown ingredient `{}`", reference))
}

pub(super) fn resolve_tags(app: &App, refs: &[String]) -> Result<Vec<ItemId>> {
    if refs.iter().all(|r| r.parse::<ItemId>().is_ok()) {
        return refs
            .iter()
            .map(|r| r.parse::<ItemId>().context("parse tag id"))
            .collect();
    }
    let tags = app.client.list_dietary_tags().map_err(gateway_error)?;
    refs.iter()
        .map(|r| match r.parse::<ItemId>() {
            Ok(id) => Ok(id),
            Err(_) => pick_by_name::<DietaryTag>(
                &tags,
                r,
                "dietary tag",
                |t| t.id,
                |t| t.name.as_str(),
            ),
        })
        .collect()
}

/// Exact (case-insensitive) name match first, then a unique substring match.
fn pick_by_name<T>(
    entries: &[T],
    name: &str,
    what: &str,
    id: impl Fn(&T) -> ItemId,
    label: impl Fn(&T) -> &str,
) -> Result<ItemId> {
    let needle = name.trim().to_lowercase();
    if let Some(hit) = entries.iter().find(|e| label(e).to_lowercase() == needle) {
        return Ok(id(hit));
    }
    let partial = entries
        .iter()
        .filter(|e| label(e).to_lowercase().contains(&needle))
        .collect::<Vec<_>>();
    match partial.as_slice() {
        [one] => Ok(id(one)),
        [] => anyhow::bail!("unknown {} `{}`", what, name),
        many => {
            let names = many.iter().map(|e| label(e)).collect::<Vec<_>>();
            anyhow::bail!(
                "{} `{}` is ambiguous: {}",
                what,
                name,
                names.join(", ")
            )
        }
    }
}
