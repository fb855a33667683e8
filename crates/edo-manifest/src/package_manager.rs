use std::fmt;
use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    Pnpm,
    Lerna,
}

impl PackageManager {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
            Self::Pnpm => "pnpm",
            Self::Lerna => "lerna",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Checked in order; a later match overrides an earlier one.
const MARKERS: [(&str, PackageManager); 4] = [
    ("yarn.lock", PackageManager::Yarn),
    ("package-lock.json", PackageManager::Npm),
    ("lerna.json", PackageManager::Lerna),
    ("pnpm-workspace.yaml", PackageManager::Pnpm),
];

/// Guesses the package manager from lock and workspace files in `root`,
/// falling back to npm.
#[must_use]
pub fn detect_package_manager(root: &Path) -> PackageManager {
    MARKERS
        .iter()
        .rev()
        .find(|(file, _)| root.join(file).is_file())
        .map_or_else(PackageManager::default, |(_, manager)| *manager)
}
