//! Resolve a file-system path into blobs

use std::path::{Path, PathBuf};
use std::sync::Arc;

use walkdir::{DirEntry, WalkDir};

use crate::error::Result;
use crate::types::Blob;

use super::dispatcher::{ExtensionGuesser, MimeTypeGuesser};

/// Yields one [`Blob`] per regular file under a path.
///
/// A file yields itself; a directory yields its non-hidden files in sorted
/// order; a path that does not exist yields nothing. Every blob carries the
/// MIME type guessed for it.
pub struct FileSystemBlobLoader {
    path: PathBuf,
    guesser: Arc<dyn MimeTypeGuesser>,
}

impl FileSystemBlobLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guesser: Arc::new(ExtensionGuesser),
        }
    }

    pub fn with_guesser(mut self, guesser: Arc<dyn MimeTypeGuesser>) -> Self {
        self.guesser = guesser;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn yield_blobs(&self) -> Result<Vec<Blob>> {
        if self.path.is_file() {
            return Ok(vec![self.blob_for(&self.path)]);
        }
        if !self.path.is_dir() {
            tracing::debug!(path = %self.path.display(), "Nothing to load at path");
            return Ok(Vec::new());
        }

        let mut blobs = Vec::new();
        let walker = WalkDir::new(&self.path)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "Skipping unreadable entry");
                    continue;
                }
            };
            if entry.file_type().is_file() {
                blobs.push(self.blob_for(entry.path()));
            }
        }

        tracing::debug!(path = %self.path.display(), blobs = blobs.len(), "Resolved directory blobs");
        Ok(blobs)
    }

    fn blob_for(&self, path: &Path) -> Blob {
        let blob = Blob::from_path(path);
        match self.guesser.guess(path) {
            Some(mimetype) => blob.with_mimetype(mimetype),
            None => blob,
        }
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MimeType;
    use std::fs;

    #[test]
    fn test_single_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.csv");
        fs::write(&path, "a,b\n").unwrap();

        let blobs = FileSystemBlobLoader::new(&path).yield_blobs().unwrap();
        assert_eq!(blobs.len(), 1);
        assert_eq!(blobs[0].path(), path.as_path());
        assert_eq!(blobs[0].mimetype(), Some(&MimeType::new("text/csv")));
    }

    #[test]
    fn test_directory_sorted_without_hidden() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.md"), "a").unwrap();
        fs::write(dir.path().join(".secret"), "s").unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        fs::write(dir.path().join(".git").join("HEAD"), "ref").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("c.txt"), "c").unwrap();

        let blobs = FileSystemBlobLoader::new(dir.path()).yield_blobs().unwrap();
        let names: Vec<_> = blobs
            .iter()
            .map(|b| b.path().strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            names,
            vec![
                PathBuf::from("a.md"),
                PathBuf::from("b.txt"),
                PathBuf::from("nested").join("c.txt"),
            ]
        );
    }

    #[test]
    fn test_missing_path_yields_nothing() {
        let blobs = FileSystemBlobLoader::new("/no/such/path/at/all.txt")
            .yield_blobs()
            .unwrap();
        assert!(blobs.is_empty());
    }

    #[test]
    fn test_unknown_extension_has_no_mimetype() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.zzunknown");
        fs::write(&path, "?").unwrap();

        let blobs = FileSystemBlobLoader::new(&path).yield_blobs().unwrap();
        assert!(blobs[0].mimetype().is_none());
    }
}
