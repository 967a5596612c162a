use super::HeroId;
use crate::error::{ReadError, Result};
use crate::utils::error::compact_error;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

const METADATA_HTTP_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, Deserialize)]
struct HeroMetadata {
    name: String,
}

/// Display names for heroes, served as token metadata over plain HTTP (`GET {base}/{id}`).
#[derive(Debug, Clone)]
pub struct HeroMetadataClient {
    base_url: String,
    client: Client,
}

impl HeroMetadataClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = match Client::builder()
            .timeout(Duration::from_millis(METADATA_HTTP_TIMEOUT_MS))
            .build()
        {
            Ok(client) => client,
            Err(err) => {
                tracing::warn!(
                    "[META] Failed to construct metadata HTTP client with timeout: {err}. Falling back to default client."
                );
                Client::new()
            }
        };
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    pub fn token_url(&self, hero: HeroId) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), hero)
    }

    pub async fn display_name(&self, hero: HeroId) -> Result<String> {
        let metadata_err = |reason: String| ReadError::Metadata { hero, reason };
        let resp = self
            .client
            .get(self.token_url(hero))
            .send()
            .await
            .map_err(|err| metadata_err(compact_error(&err)))?
            .error_for_status()
            .map_err(|err| metadata_err(compact_error(&err)))?;
        let metadata = resp
            .json::<HeroMetadata>()
            .await
            .map_err(|err| metadata_err(compact_error(&err)))?;
        Ok(metadata.name)
    }
}
