use crate::{CommitInfo, GitError, Result};

use super::Repository;

impl Repository {
    /// Whether the index differs from HEAD. On an unborn branch any index
    /// entry counts as staged.
    ///
    /// # Errors
    ///
    /// Returns an error if the index or HEAD tree cannot be read.
    pub fn has_staged_changes(&self) -> Result<bool> {
        let head_tree = self.head_tree()?;
        let diff = self
            .inner
            .diff_tree_to_index(head_tree.as_ref(), None, None)?;
        Ok(diff.deltas().len() > 0)
    }

    /// Commits the current index on top of HEAD.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::MissingSignature`] without a configured identity,
    /// [`GitError::NothingToCommit`] if the index matches HEAD, or an error if
    /// the commit cannot be written.
    pub fn commit(&self, message: &str) -> Result<CommitInfo> {
        let sig = self.inner.signature().map_err(GitError::MissingSignature)?;
        let mut index = self.inner.index()?;
        let tree = self.inner.find_tree(index.write_tree()?)?;

        let parent = self.inner.head().ok().and_then(|h| h.peel_to_commit().ok());
        if parent.as_ref().is_some_and(|p| p.tree_id() == tree.id()) {
            return Err(GitError::NothingToCommit);
        }
        let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

        let oid = self
            .inner
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)?;
        tracing::info!(sha = %oid, "created commit");

        Ok(CommitInfo {
            sha: oid.to_string(),
            message: message.to_string(),
        })
    }
}
