use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::Result;

use super::Repository;

impl Repository {
    /// Lists every path known to HEAD, the index, or the working tree
    /// (untracked, not ignored), sorted and de-duplicated.
    ///
    /// # Errors
    ///
    /// Returns an error if HEAD, the index or the status list cannot be read.
    pub fn list_paths(&self) -> Result<Vec<PathBuf>> {
        let mut paths = BTreeSet::new();

        if let Some(tree) = self.head_tree()? {
            tree.walk(git2::TreeWalkMode::PreOrder, |dir, entry| {
                if entry.kind() == Some(git2::ObjectType::Blob) {
                    if let Some(name) = entry.name() {
                        paths.insert(format!("{dir}{name}"));
                    }
                }
                git2::TreeWalkResult::Ok
            })?;
        }

        for entry in self.inner.index()?.iter() {
            paths.insert(String::from_utf8_lossy(&entry.path).into_owned());
        }

        let statuses = self.inner.statuses(Some(
            git2::StatusOptions::new()
                .include_untracked(true)
                .recurse_untracked_dirs(true)
                .include_ignored(false),
        ))?;
        for entry in statuses.iter() {
            if entry.status().contains(git2::Status::WT_NEW) {
                if let Some(path) = entry.path() {
                    paths.insert(path.to_string());
                }
            }
        }

        Ok(paths.into_iter().map(PathBuf::from).collect())
    }

    pub(crate) fn head_tree(&self) -> Result<Option<git2::Tree<'_>>> {
        match self.inner.head() {
            Ok(head) => Ok(Some(head.peel_to_tree()?)),
            Err(e) if matches!(
                e.code(),
                git2::ErrorCode::UnbornBranch | git2::ErrorCode::NotFound
            ) =>
            {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) fn head_blob_id(&self, path: &Path) -> Result<Option<git2::Oid>> {
        let Some(tree) = self.head_tree()? else {
            return Ok(None);
        };
        match tree.get_path(path) {
            Ok(entry) => Ok(Some(entry.id())),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{commit_files, setup_test_repo};
    use std::fs;
    use std::path::{Path, PathBuf};

    #[test]
    fn empty_repository_lists_nothing() -> anyhow::Result<()> {
        let (_dir, repo) = setup_test_repo()?;

        assert!(repo.list_paths()?.is_empty());

        Ok(())
    }

    #[test]
    fn lists_committed_and_untracked_paths_sorted() -> anyhow::Result<()> {
        let (dir, repo) = setup_test_repo()?;
        commit_files(&repo, &[("src/lib.rs", "x"), ("b.txt", "b")])?;
        fs::write(dir.path().join("a.txt"), "a")?;

        let paths = repo.list_paths()?;

        assert_eq!(
            paths,
            vec![
                PathBuf::from("a.txt"),
                PathBuf::from("b.txt"),
                PathBuf::from("src/lib.rs")
            ]
        );
        Ok(())
    }

    #[test]
    fn lists_untracked_files_inside_new_directories() -> anyhow::Result<()> {
        let (dir, repo) = setup_test_repo()?;
        fs::create_dir_all(dir.path().join("new/dir"))?;
        fs::write(dir.path().join("new/dir/file.txt"), "content")?;

        let paths = repo.list_paths()?;

        assert_eq!(paths, vec![PathBuf::from("new/dir/file.txt")]);
        Ok(())
    }

    #[test]
    fn ignored_files_are_not_listed() -> anyhow::Result<()> {
        let (dir, repo) = setup_test_repo()?;
        commit_files(&repo, &[(".gitignore", "target/\n")])?;
        fs::create_dir_all(dir.path().join("target"))?;
        fs::write(dir.path().join("target/out.bin"), "bin")?;

        let paths = repo.list_paths()?;

        assert_eq!(paths, vec![PathBuf::from(".gitignore")]);
        Ok(())
    }

    #[test]
    fn staged_deletion_still_listed_from_head() -> anyhow::Result<()> {
        let (dir, repo) = setup_test_repo()?;
        commit_files(&repo, &[("gone.txt", "bye")])?;
        fs::remove_file(dir.path().join("gone.txt"))?;
        repo.stage_files(&[Path::new("gone.txt")])?;

        let paths = repo.list_paths()?;

        assert_eq!(paths, vec![PathBuf::from("gone.txt")]);
        Ok(())
    }
}
