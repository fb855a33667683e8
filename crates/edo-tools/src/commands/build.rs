use edo_config::ResolvedConfig;
use edo_operations::operations::BuildOperation;
use edo_operations::providers::EsbuildBundler;
use edo_operations::traits::BundleOutput;

use super::BuildArgs;
use crate::error::Result;

pub(super) fn run(args: BuildArgs, config: &ResolvedConfig) -> Result<()> {
    let mut build = config.build.clone();
    build.watch |= args.watch;

    let operation = BuildOperation::new(EsbuildBundler::new());
    let outcome = operation.execute(&config.root, &build)?;

    for job in &outcome.jobs {
        let output = match &job.output {
            BundleOutput::File(path) | BundleOutput::Dir(path) => path,
        };
        let shown = output.strip_prefix(&config.root).unwrap_or(output);
        println!("  {} -> {}", job.entry, shown.display());
    }
    println!("Built {} bundle(s)", outcome.jobs.len());
    Ok(())
}
