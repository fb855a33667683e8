use std::collections::HashMap;
use std::path::{Path, PathBuf};

use git2::Status;

use crate::{FileStatus, Result, StatusCode};

use super::Repository;

impl Repository {
    /// Returns `None` when HEAD is detached. An unborn branch reports the
    /// branch HEAD points at.
    ///
    /// # Errors
    ///
    /// Returns an error if HEAD cannot be read.
    pub fn current_branch(&self) -> Result<Option<String>> {
        match self.inner.head() {
            Ok(head) if head.is_branch() => Ok(head.shorthand().map(String::from)),
            Ok(_) => Ok(None),
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => {
                let head = self.inner.find_reference("HEAD")?;
                Ok(head
                    .symbolic_target()
                    .and_then(|target| target.strip_prefix("refs/heads/"))
                    .map(String::from))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Computes the status of each path, keeping the order of `paths`.
    ///
    /// # Errors
    ///
    /// Returns an error if the git status operation fails.
    pub fn file_statuses(&self, paths: &[PathBuf]) -> Result<Vec<FileStatus>> {
        let statuses = self.inner.statuses(Some(
            git2::StatusOptions::new()
                .include_untracked(true)
                .recurse_untracked_dirs(true)
                .include_ignored(true),
        ))?;

        let flags: HashMap<PathBuf, Status> = statuses
            .iter()
            .filter_map(|entry| entry.path().map(|p| (PathBuf::from(p), entry.status())))
            .collect();

        paths
            .iter()
            .map(|path| {
                let relative = self.to_relative_path(path);
                let status = match flags.get(&relative) {
                    Some(flags) => classify(*flags, || self.workdir_matches_head(&relative))?,
                    None => self.unreported_status(&relative)?,
                };
                Ok(FileStatus::new(status, relative))
            })
            .collect()
    }

    // Status lists skip clean tracked files and report ignored directories
    // once rather than per file.
    fn unreported_status(&self, path: &Path) -> Result<StatusCode> {
        if self.inner.index()?.get_path(path, 0).is_some() {
            return Ok(StatusCode::Unmodified);
        }
        if self.root().join(path).symlink_metadata().is_err() {
            return Ok(StatusCode::Absent);
        }
        if self.inner.is_path_ignored(path)? {
            Ok(StatusCode::Ignored)
        } else {
            Ok(StatusCode::Unmodified)
        }
    }

    // Diffing applies the repository's content filters (autocrlf and
    // attributes) to the working-tree side.
    fn workdir_matches_head(&self, path: &Path) -> Result<bool> {
        if self.head_blob_id(path)?.is_none() {
            return Ok(false);
        }
        let Some(tree) = self.head_tree()? else {
            return Ok(false);
        };
        let mut options = git2::DiffOptions::new();
        options.pathspec(path).disable_pathspec_match(true);
        let diff = self
            .inner
            .diff_tree_to_workdir(Some(&tree), Some(&mut options))?;
        Ok(diff.deltas().len() == 0)
    }
}

/// Maps git2 status flags onto a [`StatusCode`].
///
/// `workdir_matches_head` is only consulted for the states that cannot be
/// told apart from the flags alone; its error is returned unchanged.
pub(crate) fn classify<E>(
    flags: Status,
    workdir_matches_head: impl FnOnce() -> std::result::Result<bool, E>,
) -> std::result::Result<StatusCode, E> {
    if flags.is_empty() {
        return Ok(StatusCode::Unmodified);
    }
    if flags.contains(Status::IGNORED) {
        return Ok(StatusCode::Ignored);
    }
    if flags.contains(Status::CONFLICTED) {
        return Ok(StatusCode::WorktreeModified);
    }

    let index_new = flags.contains(Status::INDEX_NEW);
    let index_deleted = flags.contains(Status::INDEX_DELETED);
    let index_modified = flags
        .intersects(Status::INDEX_MODIFIED | Status::INDEX_RENAMED | Status::INDEX_TYPECHANGE);
    let wt_new = flags.contains(Status::WT_NEW);
    let wt_deleted = flags.contains(Status::WT_DELETED);
    let wt_modified =
        flags.intersects(Status::WT_MODIFIED | Status::WT_RENAMED | Status::WT_TYPECHANGE);

    if index_deleted {
        if wt_new {
            return Ok(if workdir_matches_head()? {
                StatusCode::WorktreeUndeleted
            } else {
                StatusCode::WorktreeUndeleteModified
            });
        }
        return Ok(StatusCode::Deleted);
    }

    if index_new {
        if wt_deleted {
            return Ok(StatusCode::WorktreeAbsent);
        }
        if wt_modified {
            return Ok(StatusCode::WorktreeAdded);
        }
        return Ok(StatusCode::Added);
    }

    if wt_new {
        return Ok(StatusCode::WorktreeAdded);
    }
    if wt_deleted {
        return Ok(StatusCode::WorktreeDeleted);
    }
    if wt_modified {
        if index_modified && workdir_matches_head()? {
            return Ok(StatusCode::WorktreeUnmodified);
        }
        return Ok(StatusCode::WorktreeModified);
    }
    if index_modified {
        return Ok(StatusCode::Modified);
    }

    Ok(StatusCode::Unmodified)
}

#[cfg(test)]
mod tests {
    use super::super::tests::{commit_files, setup_test_repo};
    use super::*;
    use std::convert::Infallible;
    use std::fs;

    fn status_of(repo: &Repository, path: &str) -> anyhow::Result<StatusCode> {
        let statuses = repo.file_statuses(&[PathBuf::from(path)])?;
        Ok(statuses[0].status)
    }

    #[test]
    fn current_branch_on_main() -> anyhow::Result<()> {
        let (_dir, repo) = setup_test_repo()?;
        let branch = repo.current_branch()?.unwrap_or_default();
        assert!(branch == "main" || branch == "master");
        Ok(())
    }

    #[test]
    fn current_branch_is_none_when_detached() -> anyhow::Result<()> {
        let (_dir, repo) = setup_test_repo()?;
        let head = repo.inner.head()?.peel_to_commit()?.id();
        repo.inner.set_head_detached(head)?;

        assert_eq!(repo.current_branch()?, None);
        Ok(())
    }

    #[test]
    fn current_branch_on_unborn_repository() -> anyhow::Result<()> {
        let dir = tempfile::TempDir::new()?;
        let raw = git2::Repository::init(dir.path())?;
        raw.set_head("refs/heads/trunk")?;

        let repo = Repository::open(dir.path())?;

        assert_eq!(repo.current_branch()?.as_deref(), Some("trunk"));
        Ok(())
    }

    #[test]
    fn fixture_tree_statuses() -> anyhow::Result<()> {
        let (dir, repo) = setup_test_repo()?;
        commit_files(&repo, &[("a.txt", "a"), ("c.txt", "c")])?;
        fs::write(dir.path().join("a.txt"), "changed")?;
        fs::write(dir.path().join("b.txt"), "new")?;

        let paths = repo.list_paths()?;
        let statuses = repo.file_statuses(&paths)?;

        assert_eq!(
            statuses,
            vec![
                FileStatus::new(StatusCode::WorktreeModified, "a.txt"),
                FileStatus::new(StatusCode::WorktreeAdded, "b.txt"),
                FileStatus::new(StatusCode::Unmodified, "c.txt"),
            ]
        );
        Ok(())
    }

    #[test]
    fn staged_changes_are_not_worktree_changes() -> anyhow::Result<()> {
        let (dir, repo) = setup_test_repo()?;
        commit_files(&repo, &[("a.txt", "a"), ("gone.txt", "x")])?;
        fs::write(dir.path().join("a.txt"), "changed")?;
        fs::write(dir.path().join("b.txt"), "new")?;
        fs::remove_file(dir.path().join("gone.txt"))?;
        repo.stage_files(&[
            Path::new("a.txt"),
            Path::new("b.txt"),
            Path::new("gone.txt"),
        ])?;

        assert_eq!(status_of(&repo, "a.txt")?, StatusCode::Modified);
        assert_eq!(status_of(&repo, "b.txt")?, StatusCode::Added);
        assert_eq!(status_of(&repo, "gone.txt")?, StatusCode::Deleted);
        Ok(())
    }

    #[test]
    fn worktree_deletion_is_actionable() -> anyhow::Result<()> {
        let (dir, repo) = setup_test_repo()?;
        commit_files(&repo, &[("a.txt", "a")])?;
        fs::remove_file(dir.path().join("a.txt"))?;

        assert_eq!(status_of(&repo, "a.txt")?, StatusCode::WorktreeDeleted);
        Ok(())
    }

    #[test]
    fn staged_then_reverted_is_worktree_unmodified() -> anyhow::Result<()> {
        let (dir, repo) = setup_test_repo()?;
        commit_files(&repo, &[("a.txt", "a")])?;
        fs::write(dir.path().join("a.txt"), "changed")?;
        repo.stage_files(&[Path::new("a.txt")])?;
        fs::write(dir.path().join("a.txt"), "a")?;

        assert_eq!(status_of(&repo, "a.txt")?, StatusCode::WorktreeUnmodified);
        Ok(())
    }

    #[test]
    fn line_ending_filters_apply_when_comparing_with_head() -> anyhow::Result<()> {
        let (dir, _) = setup_test_repo()?;
        git2::Repository::open(dir.path())?
            .config()?
            .set_str("core.autocrlf", "true")?;
        let repo = Repository::open(dir.path())?;
        commit_files(&repo, &[("a.txt", "one\ntwo\n")])?;
        fs::write(dir.path().join("a.txt"), "changed\n")?;
        repo.stage_files(&[Path::new("a.txt")])?;
        fs::write(dir.path().join("a.txt"), "one\r\ntwo\r\n")?;

        assert_eq!(status_of(&repo, "a.txt")?, StatusCode::WorktreeUnmodified);
        Ok(())
    }

    #[test]
    fn ignored_and_absent_paths() -> anyhow::Result<()> {
        let (dir, repo) = setup_test_repo()?;
        commit_files(&repo, &[(".gitignore", "*.log\n")])?;
        fs::write(dir.path().join("debug.log"), "log")?;

        assert_eq!(status_of(&repo, "debug.log")?, StatusCode::Ignored);
        assert_eq!(status_of(&repo, "missing.txt")?, StatusCode::Absent);
        Ok(())
    }

    type Classified = std::result::Result<StatusCode, Infallible>;

    fn never() -> std::result::Result<bool, Infallible> {
        panic!("content comparison not expected")
    }

    fn content(matches: bool) -> impl FnOnce() -> std::result::Result<bool, Infallible> {
        move || Ok(matches)
    }

    #[test]
    fn classify_flag_combinations() {
        let cases = [
            (Status::CURRENT, StatusCode::Unmodified),
            (Status::WT_NEW, StatusCode::WorktreeAdded),
            (Status::INDEX_NEW, StatusCode::Added),
            (Status::INDEX_NEW | Status::WT_MODIFIED, StatusCode::WorktreeAdded),
            (Status::INDEX_NEW | Status::WT_DELETED, StatusCode::WorktreeAbsent),
            (Status::WT_MODIFIED, StatusCode::WorktreeModified),
            (Status::INDEX_MODIFIED, StatusCode::Modified),
            (Status::INDEX_MODIFIED | Status::WT_DELETED, StatusCode::WorktreeDeleted),
            (Status::INDEX_DELETED, StatusCode::Deleted),
            (Status::CONFLICTED | Status::INDEX_MODIFIED, StatusCode::WorktreeModified),
        ];

        for (flags, expected) in cases {
            assert_eq!(classify(flags, never), Classified::Ok(expected), "{flags:?}");
        }
    }

    #[test]
    fn classify_consults_content_for_ambiguous_states() {
        let modified_twice = Status::INDEX_MODIFIED | Status::WT_MODIFIED;
        let undeleted = Status::INDEX_DELETED | Status::WT_NEW;

        assert_eq!(
            classify(modified_twice, content(true)),
            Classified::Ok(StatusCode::WorktreeUnmodified)
        );
        assert_eq!(
            classify(modified_twice, content(false)),
            Classified::Ok(StatusCode::WorktreeModified)
        );
        assert_eq!(
            classify(undeleted, content(true)),
            Classified::Ok(StatusCode::WorktreeUndeleted)
        );
        assert_eq!(
            classify(undeleted, content(false)),
            Classified::Ok(StatusCode::WorktreeUndeleteModified)
        );
    }

    #[test]
    fn classify_returns_content_comparison_errors() {
        let result = classify(Status::INDEX_MODIFIED | Status::WT_MODIFIED, || {
            Err::<bool, &str>("hash failed")
        });

        assert_eq!(result, Err("hash failed"));
    }
}
