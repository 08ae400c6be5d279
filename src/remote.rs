use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::model::ClientConfig;
use crate::session::AuthSession;

mod error;
pub use self::error::GatewayError;

mod http_client;

mod catalog;
mod identity;
mod pantry;
mod recipes;
mod resources;
mod reviews;
pub use self::resources::{
    InventoryGateway, RecipeScope, RecipesGateway, ReviewsGateway, ShoppingFilter,
    ShoppingListGateway,
};

/// HTTP client for the recipe API. Cheap to clone; clones share the session.
#[derive(Clone)]
pub struct RemoteClient {
    base_url: String,
    read_attempts: u32,
    session: Arc<AuthSession>,
    client: reqwest::blocking::Client,
}

impl RemoteClient {
    pub fn new(config: &ClientConfig, session: Arc<AuthSession>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("larder")
            .timeout(Duration::from_secs(config.timeout_secs.max(1)))
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            read_attempts: config.read_attempts.max(1),
            session,
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<AuthSession> {
        &self.session
    }
}
