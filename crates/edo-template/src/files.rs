use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::names::map_file_name;
use crate::substitute::{Variables, substitute};
use crate::{Result, TemplateError};

pub const BOILERPLATE_DIR: &str = "boilerplate";

const BINARY_SNIFF_LEN: usize = 8000;

/// Copies every file under `<template_dir>/boilerplate` into `target_dir`.
///
/// File names go through [`map_file_name`] and placeholder substitution; text
/// contents are substituted, binary files are copied as is, and symlinks are
/// recreated. Returns the written paths relative to `target_dir`.
///
/// # Errors
///
/// Returns an error if the boilerplate directory is missing or a file cannot
/// be read or written.
pub fn render_boilerplate(
    template_dir: &Path,
    target_dir: &Path,
    vars: &Variables,
) -> Result<Vec<PathBuf>> {
    let source_root = template_dir.join(BOILERPLATE_DIR);
    if !source_root.is_dir() {
        return Err(TemplateError::MissingBoilerplate {
            path: template_dir.to_path_buf(),
        });
    }

    let mut written = Vec::new();
    for entry in WalkDir::new(&source_root)
        .follow_links(false)
        .sort_by_file_name()
        .min_depth(1)
    {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(&source_root) else {
            continue;
        };
        let relative_target = target_path(relative, vars);
        let to = target_dir.join(&relative_target);
        if let Some(parent) = to.parent() {
            std::fs::create_dir_all(parent).map_err(|source| TemplateError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        if entry.path_is_symlink() {
            copy_symlink(entry.path(), &to)?;
            tracing::info!(path = %to.display(), "link created");
        } else if entry.file_type().is_file() {
            render_file(entry.path(), &to, vars)?;
            tracing::info!(path = %to.display(), "file created");
        } else {
            tracing::warn!(path = %entry.path().display(), "ignoring unsupported file type");
            continue;
        }
        written.push(relative_target);
    }

    Ok(written)
}

/// Only the final component is renamed; directories keep their names.
fn target_path(relative: &Path, vars: &Variables) -> PathBuf {
    let file_name = relative
        .file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or_default();
    let mapped = substitute(map_file_name(&file_name), vars);
    match relative.parent() {
        Some(parent) => parent.join(mapped),
        None => PathBuf::from(mapped),
    }
}

fn render_file(from: &Path, to: &Path, vars: &Variables) -> Result<()> {
    let bytes = std::fs::read(from).map_err(|source| TemplateError::Read {
        path: from.to_path_buf(),
        source,
    })?;
    let content = match text_content(&bytes) {
        Some(text) => substitute(text, vars).into_bytes(),
        None => bytes,
    };
    std::fs::write(to, content).map_err(|source| TemplateError::Write {
        path: to.to_path_buf(),
        source,
    })
}

/// Treats content as text when it is valid UTF-8 without NUL bytes in the
/// leading block, the same heuristic git uses.
fn text_content(bytes: &[u8]) -> Option<&str> {
    let head = &bytes[..bytes.len().min(BINARY_SNIFF_LEN)];
    if head.contains(&0) {
        return None;
    }
    std::str::from_utf8(bytes).ok()
}

#[cfg(unix)]
fn copy_symlink(from: &Path, to: &Path) -> Result<()> {
    let link_target = std::fs::read_link(from).map_err(|source| TemplateError::Read {
        path: from.to_path_buf(),
        source,
    })?;
    if to.symlink_metadata().is_ok() {
        std::fs::remove_file(to).map_err(|source| TemplateError::Write {
            path: to.to_path_buf(),
            source,
        })?;
    }
    std::os::unix::fs::symlink(&link_target, to).map_err(|source| TemplateError::Write {
        path: to.to_path_buf(),
        source,
    })
}

#[cfg(not(unix))]
fn copy_symlink(from: &Path, to: &Path) -> Result<()> {
    std::fs::copy(from, to)
        .map(|_| ())
        .map_err(|source| TemplateError::Write {
            path: to.to_path_buf(),
            source,
        })
}
