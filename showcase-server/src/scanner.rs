//! Single-directory media listing.
//!
//! Entries come back in the order the OS yields them. Nothing is sorted, so
//! "first file" (the category cover) is whatever the filesystem lists first.

use std::path::Path;

use log::{debug, warn};
use tokio::io::ErrorKind;

use crate::{error::CatalogError, types::{MediaKind, ScannedFile}};

/// Lists the files in `dir` whose extension belongs to `kind`.
///
/// A missing directory, or a path that is not a directory, is an empty
/// listing. Subdirectories are skipped. A failing stat on a kept entry fails
/// the whole listing.
pub async fn list_files(dir: &Path, kind: MediaKind) -> Result<Vec<ScannedFile>, CatalogError> {
    match tokio::fs::metadata(dir).await {
        Ok(metadata) if metadata.is_dir() => {},
        Ok(_) => {
            debug!("{} is not a directory, treating as empty", dir.display());
            return Ok(Vec::new())
        },
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!("{} does not exist, treating as empty", dir.display());
            return Ok(Vec::new())
        },
        Err(err) => return Err(CatalogError::io("inspect", dir, err)),
    }

    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(CatalogError::io("list", dir, err)),
    };

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(|err| CatalogError::io("list", dir, err))? {
        let name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(raw) => {
                warn!("skipping non UTF-8 file name {:?} in {}", raw, dir.display());
                continue
            }
        };
        if !kind.accepts(&name) {
            continue
        }

        let path = entry.path();
        let metadata = tokio::fs::metadata(&path).await.map_err(|err| CatalogError::io("stat", &path, err))?;
        if metadata.is_dir() {
            continue
        }

        files.push(ScannedFile {
            name,
            size_bytes: metadata.len(),
        });
    }

    Ok(files)
}
