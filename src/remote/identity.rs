//! Account endpoints: login, registration and profile.

use crate::model::{Credentials, Profile, Registration, TokenPair};

use super::*;

impl RemoteClient {
    /// Exchanges credentials for a token pair. Storing it is up to the caller
    /// (see [`AuthSession::login`](crate::session::AuthSession::login)).
    pub fn login(&self, username: &str, password: &str) -> Result<TokenPair, GatewayError> {
        let rb = self.client.post(self.url("/users/login/")).json(&Credentials {
            username: username.to_string(),
            password: password.to_string(),
        });
        self.send_json(rb, "login")
    }

    pub fn register(&self, registration: &Registration) -> Result<Profile, GatewayError> {
        let rb = self
            .client
            .post(self.url("/users/register/"))
            .json(registration);
        self.send_json(rb, "register")
    }

    pub fn profile(&self) -> Result<Profile, GatewayError> {
        self.fetch("/users/profile/", &[], "get profile")
    }

    pub fn update_profile(&self, changes: &serde_json::Value) -> Result<Profile, GatewayError> {
        self.send_json(self.put("/users/profile/").json(changes), "update profile")
    }
}
