use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;

use crate::{Result, TemplateError};

/// Unpacks a gzip-compressed tarball into `dest`.
///
/// Entries that would land outside `dest` are skipped.
///
/// # Errors
///
/// Returns [`TemplateError::Archive`] if the stream is not a valid archive or
/// an entry cannot be written.
pub fn extract_tgz(reader: impl Read, dest: &Path) -> Result<()> {
    let archive_error = |source| TemplateError::Archive {
        path: dest.to_path_buf(),
        source,
    };

    std::fs::create_dir_all(dest).map_err(archive_error)?;
    let mut archive = tar::Archive::new(GzDecoder::new(reader));

    for entry in archive.entries().map_err(archive_error)? {
        let mut entry = entry.map_err(archive_error)?;
        let path = entry.path().map_err(archive_error)?.into_owned();
        if !entry.unpack_in(dest).map_err(archive_error)? {
            tracing::warn!(path = %path.display(), "skipping archive entry outside target");
        }
    }

    tracing::debug!(dest = %dest.display(), "archive extracted");
    Ok(())
}
