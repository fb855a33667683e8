use std::path::Path;

use edo_config::ResolvedConfig;
use edo_manifest::{PackageJson, detect_package_manager};
use edo_operations::operations::{InitInput, InitOperation, InitOutcome, resolve_registry};
use edo_operations::providers::NpmRegistry;
use serde_json::Value;

use super::InitArgs;
use crate::environment::is_interactive;
use crate::error::Result;
use crate::interaction::{NonInteractiveProvider, TerminalInteractionProvider};

pub(super) fn run(args: InitArgs, config: &ResolvedConfig) -> Result<()> {
    let registry_url = resolve_registry(config.registry.as_deref(), &config.root, |key| {
        std::env::var(key).ok()
    });
    let input = build_input(args, config, registry_url);
    let registry = NpmRegistry::new()?;

    let outcome = if is_interactive() {
        InitOperation::new(registry, TerminalInteractionProvider).execute(&config.root, &input)?
    } else {
        InitOperation::new(registry, NonInteractiveProvider).execute(&config.root, &input)?
    };

    match outcome {
        InitOutcome::Created { target_dir, files } => {
            println!();
            println!(
                "Created {} file(s) in {}",
                files.len(),
                target_dir.display()
            );
            print_usage(&config.root, &target_dir);
        }
        InitOutcome::Aborted => println!("No boilerplate selected, nothing created"),
    }
    Ok(())
}

fn build_input(args: InitArgs, config: &ResolvedConfig, registry: String) -> InitInput {
    let defaults = &config.init;
    InitInput {
        dir: args.dir,
        force: args.force || defaults.force,
        kind: args.kind.or_else(|| defaults.kind.clone()),
        template: args.template.or_else(|| defaults.template.clone()),
        package: args.package.or_else(|| defaults.package.clone()),
        silent: args.silent || defaults.silent,
        registry,
        config_name: config.config_name.clone(),
        cache_dir: config.cache_dir.clone(),
    }
}

fn print_usage(root: &Path, target_dir: &Path) {
    let package_manager = detect_package_manager(target_dir);

    println!();
    println!("Next steps:");
    if let Ok(relative) = target_dir.strip_prefix(root) {
        if !relative.as_os_str().is_empty() {
            println!("  cd {}", relative.display());
        }
    } else {
        println!("  cd {}", target_dir.display());
    }
    println!("  {package_manager} install");

    let Ok(manifest) = PackageJson::read_dir(target_dir) else {
        return;
    };
    if let Some(scripts) = manifest.fields().get("scripts").and_then(Value::as_object) {
        for name in scripts.keys() {
            println!("  {package_manager} run {name}");
        }
    }
}
