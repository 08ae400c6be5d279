use larder::model::{ClientConfig, Profile, ProfileUpdate, Registration};
use larder::store::LocalStore;

use super::render::print_json;
use super::*;
use crate::cli_commands::identity::ProfileArgs;

pub(super) fn handle_init_command(home: &Path, url: String, force: bool) -> Result<()> {
    let config = ClientConfig::new(url);
    LocalStore::init(home, &config, force)?;
    println!(
        "Initialized larder profile at {} ({})",
        home.display(),
        config.base_url
    );
    Ok(())
}

pub(super) fn handle_login_command(app: &App, username: &str, password: &str) -> Result<()> {
    let tokens = app
        .client
        .login(username, password)
        .map_err(gateway_error)?;
    app.session
        .login(&tokens)
        .context("store session tokens in state.json")?;
    println!("Logged in as {}", username);
    Ok(())
}

pub(super) fn handle_logout_command(app: &App) -> Result<()> {
    app.session.purge().context("clear session tokens")?;
    println!("Logged out");
    Ok(())
}

pub(super) fn handle_register_command(
    app: &App,
    username: String,
    email: String,
    password: String,
    json: bool,
) -> Result<()> {
    let profile = app
        .client
        .register(&Registration {
            username,
            email,
            password,
        })
        .map_err(gateway_error)?;
    if json {
        print_json(&profile)?;
    } else {
        println!("Registered {} (#{})", profile.username, profile.id);
        println!("Run `larder login --username {}` to start a session", profile.username);
    }
    Ok(())
}

pub(super) fn handle_whoami_command(app: &App, json: bool) -> Result<()> {
    let profile = app.client.profile().map_err(gateway_error)?;
    if json {
        print_json(&profile)?;
    } else {
        print_profile(&profile);
        println!("api: {}", app.client.base_url());
        println!("profile: {}", app.store.root().display());
    }
    Ok(())
}

pub(super) fn handle_profile_command(app: &App, args: ProfileArgs) -> Result<()> {
    let names = |v: Option<Vec<String>>| {
        v.map(|v| {
            v.into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
        })
    };
    let update = ProfileUpdate {
        email: args.email,
        nickname: args.nickname,
        dietary_preferences: names(args.dietary_preferences),
        disliked_ingredients: names(args.disliked_ingredients),
    };
    if update.is_empty() {
        anyhow::bail!(
            "nothing to change (pass --email, --nickname, --dietary-preferences or --disliked-ingredients)"
        );
    }
    if let Err(invalid) = update.validate() {
        anyhow::bail!("{}: {}", invalid.field, invalid.message);
    }

    let current = app.client.profile().map_err(gateway_error)?;
    let profile = app
        .client
        .update_profile(&update.merged_into(&current))
        .map_err(gateway_error)?;
    if args.json {
        print_json(&profile)?;
    } else {
        println!("Profile updated");
        print_profile(&profile);
    }
    Ok(())
}

fn print_profile(profile: &Profile) {
    println!("user: {}", profile.username);
    println!("user_id: {}", profile.id);
    if !profile.email.is_empty() {
        println!("email: {}", profile.email);
    }
    if let Some(nickname) = profile.nickname.as_deref().filter(|n| !n.is_empty()) {
        println!("nickname: {}", nickname);
    }
    if !profile.dietary_preferences.is_empty() {
        println!("diet: {}", profile.dietary_preferences.join(", "));
    }
    if !profile.disliked_ingredients.is_empty() {
        println!("dislikes: {}", profile.disliked_ingredients.join(", "));
    }
}
