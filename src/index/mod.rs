use std::fs::{self, File};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use tar::Archive;

use crate::error::Error;

/// Extract a gzipped tar genome index into a single flat directory.
///
/// Only regular-file entries are extracted. Each one is written to
/// `target_dir/<basename>`, dropping whatever directory prefix it had in the
/// archive, so nested layouts such as `out/sub/SA` land as `target_dir/SA`.
/// Later entries overwrite earlier ones with the same basename. Every gzip
/// member is decoded, so bgzip or concatenated archives extract in full.
///
/// # Returns
/// The extracted paths, in archive order.
pub fn extract_index(archive_path: &Path, target_dir: &Path) -> Result<Vec<PathBuf>, Error> {
    log::info!(
        "Extracting index {} into {}...",
        archive_path.display(),
        target_dir.display()
    );

    let file = File::open(archive_path).map_err(|e| Error::io(e, archive_path))?;
    let mut archive = Archive::new(MultiGzDecoder::new(file));

    fs::create_dir_all(target_dir).map_err(|e| Error::io(e, target_dir))?;

    let entries = archive
        .entries()
        .map_err(|e| Error::archive(archive_path, e.to_string()))?;

    let mut extracted = Vec::new();
    for entry in entries {
        let mut entry = entry.map_err(|e| Error::archive(archive_path, e.to_string()))?;

        let entry_path = entry
            .path()
            .map_err(|e| Error::archive(archive_path, e.to_string()))?
            .into_owned();

        if !entry.header().entry_type().is_file() {
            log::debug!("Skipping non-file entry {}", entry_path.display());
            continue;
        }

        let Some(name) = entry_path.file_name() else {
            log::debug!("Skipping entry without a file name: {}", entry_path.display());
            continue;
        };

        let dest = target_dir.join(name);
        entry.unpack(&dest).map_err(|e| Error::io(e, &dest))?;
        log::debug!("{} -> {}", entry_path.display(), dest.display());
        extracted.push(dest);
    }

    log::info!(
        "Extracted {} index files into {}",
        extracted.len(),
        target_dir.display()
    );

    Ok(extracted)
}
