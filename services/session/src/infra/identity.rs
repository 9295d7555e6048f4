use std::time::Duration;

use anyhow::{Context as _, anyhow};
use serde::Serialize;
use tracing::debug;

use crate::domain::repository::IdentityProvider;
use crate::domain::types::Identity;
use crate::error::SessionServiceError;

const SIGN_OUT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct SignOutRequest<'a> {
    uid: &'a str,
}

/// Ends provider-side sessions over HTTP. Without a configured endpoint sign-out is local only.
#[derive(Clone)]
pub struct HttpIdentityProvider {
    client: reqwest::Client,
    sign_out_url: Option<String>,
}

impl HttpIdentityProvider {
    pub fn new(sign_out_url: Option<String>) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(SIGN_OUT_TIMEOUT)
            .build()
            .context("build identity provider client")?;
        Ok(Self {
            client,
            sign_out_url,
        })
    }
}

impl IdentityProvider for HttpIdentityProvider {
    async fn sign_out(&self, identity: &Identity) -> Result<(), SessionServiceError> {
        let Some(url) = self.sign_out_url.as_deref() else {
            debug!(identity_id = %identity.id, "no sign-out endpoint configured");
            return Ok(());
        };
        let resp = self
            .client
            .post(url)
            .json(&SignOutRequest { uid: &identity.id })
            .send()
            .await
            .context("send sign-out request")
            .map_err(SessionServiceError::SignOutFailed)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SessionServiceError::SignOutFailed(anyhow!(
                "identity provider returned {status}"
            )));
        }
        Ok(())
    }
}
