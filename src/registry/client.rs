use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Url};

use super::types::{PackageMetadata, RawMetadata};
use crate::error::FetchError;
use crate::http::{HttpClient, RequestError};

pub const DEFAULT_API_URL: &str = "https://api.npms.io/v2/package";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FetchMetadata: Send + Sync {
    /// Fetches metadata for one package with a single request.
    async fn fetch(&self, package: &str) -> Result<PackageMetadata, FetchError>;
    fn api_url(&self) -> &str;
}

/// Metadata fetcher backed by the npms.io package endpoint.
pub struct Npms {
    http: HttpClient,
    api_url: Url,
}

impl Npms {
    pub fn new(client: Client, api_url: Option<String>) -> Result<Self> {
        let raw = api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = Url::parse(&raw).with_context(|| format!("Invalid API URL {}", raw))?;
        if api_url.cannot_be_a_base() {
            bail!("Invalid API URL {}: cannot contain path segments", raw);
        }
        Ok(Self {
            http: HttpClient::new(client),
            api_url,
        })
    }

    /// `<api_url>/<package>`, with the package name encoded as one path segment.
    pub fn package_url(&self, package: &str) -> Result<Url, FetchError> {
        if package.trim().is_empty() {
            return Err(FetchError::InvalidName {
                package: package.to_string(),
            });
        }

        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::Network {
                package: package.to_string(),
                cause: format!("API URL {} cannot contain path segments", self.api_url),
            })?
            .pop_if_empty()
            .push(package);
        Ok(url)
    }
}

#[async_trait]
impl FetchMetadata for Npms {
    #[tracing::instrument(skip(self))]
    async fn fetch(&self, package: &str) -> Result<PackageMetadata, FetchError> {
        let url = self.package_url(package)?;

        debug!("Fetching metadata for {} from {}...", package, url);

        let raw: RawMetadata = self.http.get_json(url.as_str()).await.map_err(|e| match e {
            RequestError::Network(cause) => FetchError::Network {
                package: package.to_string(),
                cause,
            },
            RequestError::Decode(cause) => FetchError::Decode {
                package: package.to_string(),
                cause,
            },
        })?;

        let meta = PackageMetadata::from(&raw);
        debug!("{}: {:?}", package, meta);
        Ok(meta)
    }

    fn api_url(&self) -> &str {
        self.api_url.as_str()
    }
}
