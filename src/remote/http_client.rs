use reqwest::blocking::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::*;

/// Retries `f` while it fails without a response. Server answers are final.
pub(super) fn with_retries<T>(
    label: &str,
    attempts: u32,
    mut f: impl FnMut() -> Result<T, GatewayError>,
) -> Result<T, GatewayError> {
    let mut last: Option<GatewayError> = None;
    for i in 0..attempts.max(1) {
        match f() {
            Ok(v) => return Ok(v),
            Err(err) if err.is_network() => {
                tracing::debug!(label, attempt = i + 1, error = %err, "request failed");
                last = Some(err);
                if i + 1 < attempts {
                    std::thread::sleep(std::time::Duration::from_millis(200 * (1 << i.min(4))));
                }
            }
            Err(err) => return Err(err),
        }
    }
    Err(last.unwrap_or_else(|| GatewayError::network(label, "no attempts made")))
}

impl RemoteClient {
    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub(super) fn auth(&self, rb: RequestBuilder) -> RequestBuilder {
        match self.session.authorization() {
            Some(value) => rb.header(reqwest::header::AUTHORIZATION, value),
            None => rb,
        }
    }

    pub(super) fn get(&self, path: &str) -> RequestBuilder {
        self.auth(self.client.get(self.url(path)))
    }

    pub(super) fn post(&self, path: &str) -> RequestBuilder {
        self.auth(self.client.post(self.url(path)))
    }

    pub(super) fn put(&self, path: &str) -> RequestBuilder {
        self.auth(self.client.put(self.url(path)))
    }

    pub(super) fn patch(&self, path: &str) -> RequestBuilder {
        self.auth(self.client.patch(self.url(path)))
    }

    pub(super) fn delete(&self, path: &str) -> RequestBuilder {
        self.auth(self.client.delete(self.url(path)))
    }

    /// Sends and classifies the status. A 401 purges the stored session.
    pub(super) fn ensure_ok(&self, rb: RequestBuilder, label: &str) -> Result<Response, GatewayError> {
        tracing::debug!(label, "request");
        let resp = rb.send().map_err(|e| GatewayError::network(label, e))?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let text = resp.text().unwrap_or_default();
        let body = serde_json::from_str::<serde_json::Value>(&text)
            .unwrap_or(serde_json::Value::String(text));
        let err = GatewayError::classify(status.as_u16(), body);
        if matches!(err, GatewayError::Auth { .. }) {
            tracing::warn!(label, "token rejected; clearing session");
            if let Err(purge_err) = self.session.purge() {
                tracing::warn!(error = %format!("{:#}", purge_err), "purge session");
            }
        }
        tracing::debug!(label, status = status.as_u16(), "request failed");
        Err(err)
    }

    pub(super) fn send_json<T: DeserializeOwned>(
        &self,
        rb: RequestBuilder,
        label: &str,
    ) -> Result<T, GatewayError> {
        self.ensure_ok(rb, label)?
            .json::<T>()
            .map_err(|e| GatewayError::decode(label, e))
    }

    pub(super) fn send_empty(&self, rb: RequestBuilder, label: &str) -> Result<(), GatewayError> {
        let _ = self.ensure_ok(rb, label)?;
        Ok(())
    }

    /// GET with retries on network failure.
    pub(super) fn fetch<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        label: &str,
    ) -> Result<T, GatewayError> {
        with_retries(label, self.read_attempts, || {
            self.send_json(self.get(path).query(query), label)
        })
    }
}
