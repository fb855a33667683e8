use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use serde::Deserialize;

use crate::{ManifestError, PACKAGE_JSON, PackageJson, PackageManager, Result};

const PNPM_WORKSPACE: &str = "pnpm-workspace.yaml";
const LERNA_JSON: &str = "lerna.json";
const DEFAULT_LERNA_PACKAGES: &str = "packages/*";

#[derive(Debug, Clone, PartialEq)]
pub struct WorkspacePackage {
    /// Directory relative to the workspace root; empty for the root package.
    pub relative_dir: PathBuf,
    pub manifest: PackageJson,
}

impl WorkspacePackage {
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.relative_dir.as_os_str().is_empty()
    }
}

#[derive(Debug, Default, Deserialize)]
struct PnpmWorkspace {
    #[serde(default)]
    packages: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LernaConfig {
    packages: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WorkspacesField {
    List(Vec<String>),
    Object {
        #[serde(default)]
        packages: Vec<String>,
    },
}

/// Lists the root package followed by the member packages declared for
/// `manager`, sorted by directory.
///
/// # Errors
///
/// Returns an error if a manifest or workspace file cannot be read or parsed,
/// or a workspace pattern is invalid.
pub fn discover_workspace_packages(
    root: &Path,
    manager: PackageManager,
) -> Result<Vec<WorkspacePackage>> {
    let root_manifest_path = root.join(PACKAGE_JSON);
    let root_manifest = if root_manifest_path.is_file() {
        Some(PackageJson::read(&root_manifest_path)?)
    } else {
        None
    };

    let patterns = member_patterns(root, manager, root_manifest.as_ref())?;
    tracing::debug!(%manager, ?patterns, "workspace patterns");
    let member_dirs = expand_patterns(root, &patterns)?;

    let mut packages = Vec::with_capacity(member_dirs.len() + 1);
    if let Some(manifest) = root_manifest {
        packages.push(WorkspacePackage {
            relative_dir: PathBuf::new(),
            manifest,
        });
    }
    for relative_dir in member_dirs {
        let manifest = PackageJson::read(&root.join(&relative_dir).join(PACKAGE_JSON))?;
        packages.push(WorkspacePackage {
            relative_dir,
            manifest,
        });
    }

    Ok(packages)
}

fn member_patterns(
    root: &Path,
    manager: PackageManager,
    root_manifest: Option<&PackageJson>,
) -> Result<Vec<String>> {
    match manager {
        PackageManager::Pnpm => {
            let path = root.join(PNPM_WORKSPACE);
            if !path.is_file() {
                return Ok(Vec::new());
            }
            let content = read(&path)?;
            let workspace: Option<PnpmWorkspace> = serde_yml::from_str(&content)
                .map_err(|source| ManifestError::ParseYaml { path, source })?;
            Ok(workspace.unwrap_or_default().packages)
        }
        PackageManager::Lerna => {
            let path = root.join(LERNA_JSON);
            let config: LernaConfig = if path.is_file() {
                let content = read(&path)?;
                serde_json::from_str(&content)
                    .map_err(|source| ManifestError::Parse { path, source })?
            } else {
                LernaConfig::default()
            };
            Ok(config
                .packages
                .unwrap_or_else(|| vec![DEFAULT_LERNA_PACKAGES.to_string()]))
        }
        PackageManager::Npm | PackageManager::Yarn => {
            let Some(workspaces) = root_manifest.and_then(|m| m.fields().get("workspaces")) else {
                return Ok(Vec::new());
            };
            let field = serde_json::from_value(workspaces.clone()).map_err(|source| {
                ManifestError::Parse {
                    path: root.join(PACKAGE_JSON),
                    source,
                }
            })?;
            Ok(match field {
                WorkspacesField::List(patterns) | WorkspacesField::Object { packages: patterns } => {
                    patterns
                }
            })
        }
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn compile(pattern: &str) -> Result<GlobMatcher> {
    let trimmed = pattern.trim_start_matches("./").trim_end_matches('/');
    GlobBuilder::new(trimmed)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|source| ManifestError::GlobPattern {
            pattern: pattern.to_string(),
            source,
        })
}

fn expand_patterns(root: &Path, patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut includes = Vec::new();
    let mut excludes = Vec::new();
    for pattern in patterns {
        match pattern.strip_prefix('!') {
            Some(negated) => excludes.push(compile(negated)?),
            None => includes.push(compile(pattern)?),
        }
    }
    if includes.is_empty() {
        return Ok(Vec::new());
    }

    let mut dirs = Vec::new();
    collect_matching_dirs(root, root, &includes, &excludes, &mut dirs)?;
    dirs.sort();
    dirs.dedup();
    Ok(dirs)
}

fn collect_matching_dirs(
    base: &Path,
    current: &Path,
    includes: &[GlobMatcher],
    excludes: &[GlobMatcher],
    results: &mut Vec<PathBuf>,
) -> Result<()> {
    for entry in std::fs::read_dir(current)? {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name();
        if name == "node_modules" || name.to_string_lossy().starts_with('.') {
            continue;
        }

        let Ok(relative) = path.strip_prefix(base) else {
            continue;
        };
        if excludes.iter().any(|ex| ex.is_match(relative)) {
            continue;
        }
        if includes.iter().any(|inc| inc.is_match(relative)) && path.join(PACKAGE_JSON).is_file()
        {
            results.push(relative.to_path_buf());
        }

        collect_matching_dirs(base, &path, includes, excludes, results)?;
    }

    Ok(())
}
