mod commit;
mod paths;
mod remote;
mod staging;
mod status;

use std::path::{Path, PathBuf};

use crate::{GitError, Result};

pub struct Repository {
    pub(crate) inner: git2::Repository,
    root: PathBuf,
}

impl Repository {
    /// # Errors
    ///
    /// Returns [`GitError::NotARepository`] if the path is not inside a git repository
    /// and [`GitError::BareRepository`] if the repository has no working directory.
    pub fn open(path: &Path) -> Result<Self> {
        let inner = git2::Repository::discover(path).map_err(|_| GitError::NotARepository {
            path: path.to_path_buf(),
        })?;

        let Some(workdir) = inner.workdir() else {
            return Err(GitError::BareRepository {
                path: path.to_path_buf(),
            });
        };

        // dunce drops the \\?\ prefix on Windows
        let root = dunce::simplified(workdir).to_path_buf();

        Ok(Self { inner, root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub(crate) fn to_relative_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            dunce::simplified(path)
                .strip_prefix(&self.root)
                .map_or_else(|_| path.to_path_buf(), Path::to_path_buf)
        } else {
            path.to_path_buf()
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    pub(crate) fn setup_test_repo() -> anyhow::Result<(TempDir, Repository)> {
        let dir = TempDir::new()?;
        let repo = git2::Repository::init(dir.path())?;

        let mut config = repo.config()?;
        config.set_str("user.name", "Test")?;
        config.set_str("user.email", "test@example.com")?;

        let sig = git2::Signature::now("Test", "test@example.com")?;
        let tree_id = repo.index()?.write_tree()?;
        let tree = repo.find_tree(tree_id)?;
        repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])?;

        let repository = Repository::open(dir.path())?;
        Ok((dir, repository))
    }

    /// Writes the given files, stages them and commits on top of HEAD.
    pub(crate) fn commit_files(repo: &Repository, files: &[(&str, &str)]) -> anyhow::Result<()> {
        let mut index = repo.inner.index()?;
        for (name, content) in files {
            let path = repo.root().join(name);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, content)?;
            index.add_path(Path::new(name))?;
        }
        index.write()?;

        let sig = git2::Signature::now("Test", "test@example.com")?;
        let tree = repo.inner.find_tree(index.write_tree()?)?;
        let parent = repo.inner.head()?.peel_to_commit()?;
        repo.inner
            .commit(Some("HEAD"), &sig, &sig, "Add files", &tree, &[&parent])?;
        Ok(())
    }

    #[test]
    fn open_repository() -> anyhow::Result<()> {
        let (dir, repo) = setup_test_repo()?;
        let expected = dir.path().canonicalize()?;
        let actual = repo.root().canonicalize()?;
        assert_eq!(actual, expected);
        Ok(())
    }

    #[test]
    fn open_from_subdirectory_finds_root() -> anyhow::Result<()> {
        let (dir, _repo) = setup_test_repo()?;
        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested)?;

        let repo = Repository::open(&nested)?;

        assert_eq!(repo.root().canonicalize()?, dir.path().canonicalize()?);
        Ok(())
    }

    #[test]
    fn open_nonexistent_repository() {
        let dir = TempDir::new().expect("failed to create temp dir");
        let result = Repository::open(dir.path());
        assert!(matches!(result, Err(GitError::NotARepository { .. })));
    }

    #[test]
    fn open_bare_repository_fails() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        git2::Repository::init_bare(dir.path())?;

        let result = Repository::open(dir.path());

        assert!(matches!(result, Err(GitError::BareRepository { .. })));
        Ok(())
    }
}
