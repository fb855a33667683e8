use edo_config::ResolvedConfig;
use edo_operations::operations::{PkgInput, PkgOperation, PkgOutcome};
use edo_operations::providers::Git2Provider;

use crate::environment::is_interactive;
use crate::error::Result;
use crate::interaction::{NonInteractiveProvider, TerminalInteractionProvider};

pub(super) fn run(config: &ResolvedConfig) -> Result<()> {
    let input = PkgInput {
        package_manager: config.package_manager,
        remote: config.commit.remote.clone(),
    };

    let outcome = if is_interactive() {
        PkgOperation::new(Git2Provider::new(), TerminalInteractionProvider)
            .execute(&config.root, &input)?
    } else {
        PkgOperation::new(Git2Provider::new(), NonInteractiveProvider)
            .execute(&config.root, &input)?
    };

    match outcome {
        PkgOutcome::Updated {
            package_manager,
            manifests,
        } => {
            println!("Package manager: {package_manager}");
            for manifest in &manifests {
                let shown = manifest.strip_prefix(&config.root).unwrap_or(manifest);
                println!("  updated {}", shown.display());
            }
        }
        PkgOutcome::Cancelled => println!("Cancelled, remaining packages left unchanged"),
    }
    Ok(())
}
