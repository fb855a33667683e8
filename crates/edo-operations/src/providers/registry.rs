use std::path::Path;
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde_json::Value;
use url::Url;

use crate::Result;
use crate::error::OperationError;
use crate::traits::Registry;

const INFO_TIMEOUT: Duration = Duration::from_secs(5);
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(120);

/// Registry client over blocking reqwest. Proxy settings come from the
/// standard `HTTP(S)_PROXY` variables.
pub struct NpmRegistry {
    client: Client,
}

impl NpmRegistry {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("edo-tools/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(OperationError::HttpClient)?;
        Ok(Self { client })
    }

    fn get(&self, url: &Url, timeout: Duration) -> Result<Response> {
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url.clone())
            .timeout(timeout)
            .send()
            .map_err(|source| OperationError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(OperationError::RegistryStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

/// `{registry}/{package}/latest`, with the scope separator escaped.
pub(crate) fn latest_url(registry: &str, package: &str) -> Result<Url> {
    let mut url = Url::parse(registry).map_err(|source| OperationError::InvalidRegistryUrl {
        url: registry.to_string(),
        source,
    })?;
    url.path_segments_mut()
        .map_err(|()| OperationError::InvalidRegistryUrl {
            url: registry.to_string(),
            source: url::ParseError::RelativeUrlWithCannotBeABaseBase,
        })?
        .pop_if_empty()
        .push(package)
        .push("latest");
    Ok(url)
}

impl Registry for NpmRegistry {
    fn package_info(&self, registry: &str, package: &str) -> Result<Value> {
        let url = latest_url(registry, package)?;
        self.get(&url, INFO_TIMEOUT)?
            .json()
            .map_err(|source| OperationError::Http {
                url: url.to_string(),
                source,
            })
    }

    fn download_tarball(&self, tarball_url: &str, dest: &Path) -> Result<()> {
        let url = Url::parse(tarball_url).map_err(|source| OperationError::InvalidRegistryUrl {
            url: tarball_url.to_string(),
            source,
        })?;
        let response = self.get(&url, DOWNLOAD_TIMEOUT)?;
        edo_template::extract_tgz(response, dest)?;
        tracing::debug!(dest = %dest.display(), "tarball extracted");
        Ok(())
    }
}
