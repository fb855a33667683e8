use std::path::{Path, PathBuf};

use edo_config::{BuildConfig, LibraryConfig, LibraryFormat};
use edo_manifest::{PACKAGE_JSON, PackageJson};

use crate::Result;
use crate::error::OperationError;
use crate::traits::{BundleFormat, BundleJob, BundleOutput, Bundler};

#[derive(Debug, PartialEq, Eq)]
pub struct BuildOutcome {
    pub jobs: Vec<BundleJob>,
}

pub struct BuildOperation<B> {
    bundler: B,
}

impl<B> BuildOperation<B>
where
    B: Bundler,
{
    pub fn new(bundler: B) -> Self {
        Self { bundler }
    }

    /// Plans one bundle job per library format and app entry, prepares the
    /// output directories and runs the bundler.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be turned into jobs, an
    /// output directory cannot be prepared or the bundler fails.
    pub fn execute(&self, project_root: &Path, config: &BuildConfig) -> Result<BuildOutcome> {
        let manifest_path = project_root.join(PACKAGE_JSON);
        let manifest = if manifest_path.is_file() {
            Some(PackageJson::read(&manifest_path)?)
        } else {
            None
        };

        let jobs = plan_jobs(project_root, config, manifest.as_ref())?;

        let mut out_dirs: Vec<PathBuf> = Vec::new();
        for job in &jobs {
            let dir = match &job.output {
                BundleOutput::File(file) => file.parent(),
                BundleOutput::Dir(dir) => Some(dir.as_path()),
            };
            match dir {
                Some(dir) if !out_dirs.iter().any(|known| known == dir) => {
                    out_dirs.push(dir.to_path_buf());
                }
                _ => {}
            }
        }
        for dir in &out_dirs {
            prepare_out_dir(dir, project_root, config.empty_out_dir)?;
        }

        tracing::info!(jobs = jobs.len(), watch = config.watch, "bundling");
        self.bundler.bundle(project_root, &jobs, config.watch)?;
        Ok(BuildOutcome { jobs })
    }
}

fn plan_jobs(
    project_root: &Path,
    config: &BuildConfig,
    manifest: Option<&PackageJson>,
) -> Result<Vec<BundleJob>> {
    if config.lib.is_empty() && config.entry.is_empty() {
        return Err(OperationError::NoBuildEntry);
    }
    if config.lib.len() > 1 && config.lib.iter().any(|lib| lib.out_dir.is_none()) {
        return Err(OperationError::LibraryOutDirRequired);
    }

    let is_module = manifest.is_some_and(PackageJson::is_module);
    let package_name = manifest.and_then(PackageJson::unscoped_name);

    let mut jobs = Vec::new();
    for lib in &config.lib {
        let out_dir = project_root.join(lib.out_dir.as_ref().unwrap_or(&config.out_dir));
        for &format in &lib.formats {
            jobs.push(library_job(lib, format, &out_dir, package_name, is_module, config)?);
        }
    }

    let app_out_dir = project_root.join(&config.out_dir);
    for entry in &config.entry {
        jobs.push(BundleJob {
            entry: entry.clone(),
            output: BundleOutput::Dir(app_out_dir.clone()),
            format: None,
            global_name: None,
            sourcemap: config.sourcemap,
            minify: config.minify,
            platform: config.platform.clone(),
            assets_dir: Some(config.assets_dir.clone()),
        });
    }
    Ok(jobs)
}

fn library_job(
    lib: &LibraryConfig,
    format: LibraryFormat,
    out_dir: &Path,
    package_name: Option<&str>,
    is_module: bool,
    config: &BuildConfig,
) -> Result<BundleJob> {
    let bundle_format = match format {
        LibraryFormat::Esm => BundleFormat::Esm,
        LibraryFormat::Cjs => BundleFormat::Cjs,
        LibraryFormat::Iife => BundleFormat::Iife,
        LibraryFormat::Umd => {
            return Err(OperationError::UnsupportedFormat {
                format: format.to_string(),
            });
        }
    };
    if format == LibraryFormat::Iife && lib.name.is_none() {
        return Err(OperationError::IifeRequiresName {
            entry: lib.entry.clone(),
        });
    }

    let base = lib
        .file_name
        .as_deref()
        .or(lib.name.as_deref())
        .or(package_name)
        .ok_or_else(|| OperationError::MissingLibraryName {
            entry: lib.entry.clone(),
        })?;

    Ok(BundleJob {
        entry: lib.entry.clone(),
        output: BundleOutput::File(out_dir.join(library_file_name(base, format, is_module))),
        format: Some(bundle_format),
        global_name: (format == LibraryFormat::Iife)
            .then(|| lib.name.clone())
            .flatten(),
        sourcemap: config.sourcemap,
        minify: config.minify,
        platform: config.platform.clone(),
        assets_dir: None,
    })
}

/// `{name}.{ext}` for esm and cjs, `{name}.{format}.{ext}` otherwise. The
/// extension avoids clashing with the package's own module type.
fn library_file_name(name: &str, format: LibraryFormat, is_module: bool) -> String {
    let ext = match (is_module, format) {
        (true, LibraryFormat::Cjs) => "cjs",
        (false, LibraryFormat::Esm) => "mjs",
        _ => "js",
    };
    match format {
        LibraryFormat::Esm | LibraryFormat::Cjs => format!("{name}.{ext}"),
        LibraryFormat::Iife | LibraryFormat::Umd => format!("{name}.{format}.{ext}"),
    }
}

fn prepare_out_dir(dir: &Path, project_root: &Path, empty_out_dir: Option<bool>) -> Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)?;
        return Ok(());
    }
    if empty_out_dir == Some(false) {
        return Ok(());
    }
    if empty_out_dir.is_none() && !dir.starts_with(project_root) {
        tracing::warn!(
            dir = %dir.display(),
            "out_dir is outside the project root and will not be emptied; set build.empty_out_dir to override"
        );
        return Ok(());
    }

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_name() == ".git" {
            continue;
        }
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            std::fs::remove_dir_all(&path)?;
        } else {
            std::fs::remove_file(&path)?;
        }
    }
    tracing::debug!(dir = %dir.display(), "out_dir emptied");
    Ok(())
}
