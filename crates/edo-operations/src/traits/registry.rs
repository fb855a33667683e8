use std::path::Path;

use serde_json::Value;

use crate::Result;

/// Read access to an npm-compatible registry.
pub trait Registry: Send + Sync {
    /// Fetches `{registry}/{package}/latest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the registry answers with a
    /// non-success status.
    fn package_info(&self, registry: &str, package: &str) -> Result<Value>;

    /// Downloads a `.tgz` and unpacks it into `dest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the download or extraction fails.
    fn download_tarball(&self, tarball_url: &str, dest: &Path) -> Result<()>;
}
