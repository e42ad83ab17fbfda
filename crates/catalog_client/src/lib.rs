use anyhow::{anyhow, Context};
use async_trait::async_trait;
use futures::future::try_join_all;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    domain::Item,
    error::CatalogError,
    protocol::{ItemRecord, PageListing},
};
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2/pokemon";

/// Read-only access to the remote creature catalog.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Fetches `page_size` entries starting at `offset`, each resolved to its full record.
    /// Fails as a whole if the listing or any detail request fails.
    async fn fetch_page(&self, page_size: u32, offset: u64) -> Result<Vec<Item>, CatalogError>;

    /// Resolves a single entry by name or numeric id.
    async fn fetch_by_key(&self, key: &str) -> Result<Item, CatalogError>;
}

pub struct HttpCatalogClient {
    http: Client,
    base_url: Url,
}

impl HttpCatalogClient {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("invalid catalog url '{base_url}'"))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("catalog url '{base_url}' cannot carry a path"));
        }
        Ok(Self {
            http: Client::new(),
            base_url,
        })
    }

    pub async fn fetch_listing(
        &self,
        page_size: u32,
        offset: u64,
    ) -> Result<PageListing, CatalogError> {
        let response = self
            .http
            .get(self.base_url.clone())
            .query(&[("limit", u64::from(page_size)), ("offset", offset)])
            .send()
            .await
            .map_err(network)?;
        decode(ensure_success(response)?).await
    }

    pub async fn fetch_detail(&self, url: &str) -> Result<Item, CatalogError> {
        let url = Url::parse(url)
            .map_err(|e| CatalogError::InvalidPayload(format!("bad detail url '{url}': {e}")))?;
        let response = self.http.get(url).send().await.map_err(network)?;
        let record: ItemRecord = decode(ensure_success(response)?).await?;
        Ok(record.into())
    }

    fn item_url(&self, key: &str) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base urls, so segments are always available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(key);
        }
        url
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn fetch_page(&self, page_size: u32, offset: u64) -> Result<Vec<Item>, CatalogError> {
        let listing = self.fetch_listing(page_size, offset).await?;
        debug!(
            page_size,
            offset,
            entries = listing.results.len(),
            "catalog: listing fetched"
        );

        let items = try_join_all(
            listing
                .results
                .iter()
                .map(|entry| self.fetch_detail(&entry.url)),
        )
        .await?;
        info!(page_size, offset, items = items.len(), "catalog: page loaded");
        Ok(items)
    }

    async fn fetch_by_key(&self, key: &str) -> Result<Item, CatalogError> {
        let response = self
            .http
            .get(self.item_url(key))
            .send()
            .await
            .map_err(network)?;

        if response.status() == StatusCode::NOT_FOUND {
            info!(key, "catalog: lookup not found");
            return Err(CatalogError::NotFound {
                key: key.to_string(),
            });
        }

        let record: ItemRecord = decode(ensure_success(response)?).await?;
        debug!(key, id = record.id, "catalog: lookup resolved");
        Ok(record.into())
    }
}

fn ensure_success(response: Response) -> Result<Response, CatalogError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(CatalogError::RequestFailed {
            status: status.as_u16(),
        })
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, CatalogError> {
    response.json::<T>().await.map_err(|err| {
        if err.is_decode() {
            CatalogError::InvalidPayload(err.to_string())
        } else {
            network(err)
        }
    })
}

fn network(err: reqwest::Error) -> CatalogError {
    CatalogError::NetworkError(err.to_string())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
