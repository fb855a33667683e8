use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::sort::sort_package_json;
use crate::{ManifestError, PACKAGE_JSON, Result};

/// A `package.json` document. Key order is preserved as read.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageJson {
    path: PathBuf,
    fields: Map<String, Value>,
}

impl PackageJson {
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or is
    /// not a JSON object.
    pub fn read(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value = serde_json::from_str(&content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let Value::Object(fields) = value else {
            return Err(ManifestError::NotAnObject {
                path: path.to_path_buf(),
            });
        };

        Ok(Self {
            path: path.to_path_buf(),
            fields,
        })
    }

    /// Reads `package.json` inside `dir`.
    ///
    /// # Errors
    ///
    /// See [`PackageJson::read`].
    pub fn read_dir(dir: &Path) -> Result<Self> {
        Self::read(&dir.join(PACKAGE_JSON))
    }

    #[must_use]
    pub fn from_fields(path: impl Into<PathBuf>, fields: Map<String, Value>) -> Self {
        Self {
            path: path.into(),
            fields,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory containing the manifest.
    #[must_use]
    pub fn dir(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    #[must_use]
    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    /// Package name with any `@scope/` prefix removed.
    #[must_use]
    pub fn unscoped_name(&self) -> Option<&str> {
        self.name()
            .map(|name| name.rsplit_once('/').map_or(name, |(_, bare)| bare))
    }

    #[must_use]
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }

    #[must_use]
    pub fn bool_field(&self, key: &str) -> Option<bool> {
        self.fields.get(key).and_then(Value::as_bool)
    }

    /// Whether the package declares `"type": "module"`.
    #[must_use]
    pub fn is_module(&self) -> bool {
        self.str_field("type") == Some("module")
    }

    #[must_use]
    pub fn publish_registry(&self) -> Option<&str> {
        self.fields
            .get("publishConfig")
            .and_then(|config| config.get("registry"))
            .and_then(Value::as_str)
    }

    #[must_use]
    pub fn bugs_url(&self) -> Option<&str> {
        match self.fields.get("bugs") {
            Some(Value::String(url)) => Some(url.as_str()),
            Some(bugs) => bugs.get("url").and_then(Value::as_str),
            None => None,
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: Value) {
        self.fields.insert(key.into(), value);
    }

    /// Writes the manifest in canonical key order with a 2-space indent and a
    /// trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write(&self) -> Result<()> {
        let sorted = sort_package_json(self.fields.clone());
        let mut content = serde_json::to_string_pretty(&Value::Object(sorted)).map_err(
            |source| ManifestError::Serialize {
                path: self.path.clone(),
                source,
            },
        )?;
        content.push('\n');

        std::fs::write(&self.path, content).map_err(|source| ManifestError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::info!(path = %self.path.display(), "sorted package.json written");
        Ok(())
    }
}

/// Walks up from `start` to the first directory containing `package.json`.
#[must_use]
pub fn find_nearest_package_json(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PACKAGE_JSON))
        .find(|candidate| candidate.is_file())
}
