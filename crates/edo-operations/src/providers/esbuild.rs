use std::path::{Path, PathBuf};
use std::process::{Child, Command};

use edo_config::Sourcemap;

use crate::Result;
use crate::error::OperationError;
use crate::traits::{BundleJob, BundleOutput, Bundler};

const LOCAL_BIN: &str = "node_modules/.bin";
const ESBUILD: &str = "esbuild";

/// Runs the `esbuild` executable, one process per job.
#[derive(Default)]
pub struct EsbuildBundler {
    executable: Option<PathBuf>,
}

impl EsbuildBundler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `executable` instead of looking esbuild up.
    #[must_use]
    pub fn with_executable(executable: PathBuf) -> Self {
        Self {
            executable: Some(executable),
        }
    }

    fn locate(&self, project_root: &Path) -> Result<PathBuf> {
        if let Some(executable) = &self.executable {
            return Ok(executable.clone());
        }

        let local = project_root.join(LOCAL_BIN);
        let candidates = if cfg!(windows) {
            vec![local.join("esbuild.cmd"), local.join("esbuild.exe")]
        } else {
            vec![local.join(ESBUILD)]
        };
        if let Some(found) = candidates.into_iter().find(|path| path.is_file()) {
            return Ok(found);
        }

        which::which(ESBUILD).map_err(|_| OperationError::BundlerNotFound)
    }

    fn spawn(&self, program: &Path, project_root: &Path, job: &BundleJob, watch: bool) -> Result<Child> {
        let args = esbuild_args(job, watch);
        tracing::debug!(program = %program.display(), ?args, "starting bundler");
        Command::new(program)
            .args(&args)
            .current_dir(project_root)
            .spawn()
            .map_err(|source| OperationError::BundlerSpawn {
                program: program.to_path_buf(),
                source,
            })
    }
}

fn wait(job: &BundleJob, child: &mut Child) -> Result<()> {
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(OperationError::BundleFailed {
            entry: job.entry.clone(),
            code: status.code(),
        })
    }
}

impl Bundler for EsbuildBundler {
    fn bundle(&self, project_root: &Path, jobs: &[BundleJob], watch: bool) -> Result<()> {
        let program = self.locate(project_root)?;

        if watch {
            let mut children = Vec::with_capacity(jobs.len());
            for job in jobs {
                children.push((job, self.spawn(&program, project_root, job, true)?));
            }
            let mut first_error = None;
            for (job, mut child) in children {
                if let Err(err) = wait(job, &mut child) {
                    tracing::error!(entry = %job.entry, "watch process failed");
                    first_error.get_or_insert(err);
                }
            }
            return first_error.map_or(Ok(()), Err);
        }

        for job in jobs {
            let mut child = self.spawn(&program, project_root, job, false)?;
            wait(job, &mut child)?;
            tracing::info!(entry = %job.entry, "bundled");
        }
        Ok(())
    }
}

pub(crate) fn esbuild_args(job: &BundleJob, watch: bool) -> Vec<String> {
    let mut args = vec![job.entry.clone(), "--bundle".to_string()];
    match &job.output {
        BundleOutput::File(path) => args.push(format!("--outfile={}", path.display())),
        BundleOutput::Dir(path) => args.push(format!("--outdir={}", path.display())),
    }
    if let Some(format) = job.format {
        args.push(format!("--format={format}"));
    }
    if let Some(name) = &job.global_name {
        args.push(format!("--global-name={name}"));
    }
    match job.sourcemap {
        Sourcemap::Disabled => {}
        Sourcemap::External => args.push("--sourcemap".to_string()),
        Sourcemap::Inline => args.push("--sourcemap=inline".to_string()),
    }
    if job.minify {
        args.push("--minify".to_string());
    }
    if let Some(platform) = &job.platform {
        args.push(format!("--platform={platform}"));
    }
    if let Some(assets_dir) = &job.assets_dir {
        let prefix = assets_dir.to_string_lossy().replace('\\', "/");
        args.push(format!("--asset-names={prefix}/[name]-[hash]"));
    }
    if watch {
        args.push("--watch".to_string());
    }
    args
}
