use std::path::Path;

use crate::Result;

use super::Repository;

impl Repository {
    /// Adds each path's working-tree content to the index. Paths missing from
    /// the working tree are removed from the index instead. A symlink is
    /// staged as a link even when its target does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if staging any of the files fails.
    pub fn stage_files(&self, paths: &[&Path]) -> Result<()> {
        if paths.is_empty() {
            return Ok(());
        }

        let mut index = self.inner.index()?;

        for path in paths {
            let relative_path = self.to_relative_path(path);

            // symlink_metadata so dangling symlinks count as present
            if self.root().join(&relative_path).symlink_metadata().is_ok() {
                index.add_path(&relative_path)?;
            } else {
                index.remove_path(&relative_path)?;
            }
            tracing::debug!(path = %relative_path.display(), "staged");
        }

        index.write()?;
        Ok(())
    }
}
