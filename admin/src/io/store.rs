//! Project document storage: one text file per slug.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::{debug, warn};

use super::paths::PortfolioPaths;
use crate::core::slug::is_slug;
use crate::error::{ProjectError, Result};

/// A document read during a directory scan.
#[derive(Debug, Clone)]
pub struct StoredDocument {
    pub slug: String,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct DocumentStore {
    paths: PortfolioPaths,
}

impl DocumentStore {
    pub fn new(paths: PortfolioPaths) -> Self {
        Self { paths }
    }

    pub fn path(&self, slug: &str) -> PathBuf {
        self.paths.document_path(slug)
    }

    /// Names that are not slugs never exist.
    pub fn exists(&self, slug: &str) -> bool {
        is_slug(slug) && self.path(slug).is_file()
    }

    /// Read the document for `slug`; `NotFound` if there is none.
    pub fn read(&self, slug: &str) -> Result<String> {
        if !is_slug(slug) {
            return Err(ProjectError::NotFound(slug.to_string()));
        }
        match fs::read_to_string(self.path(slug)) {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(ProjectError::NotFound(slug.to_string()))
            }
            Err(err) => Err(ProjectError::io("reading project document")(err)),
        }
    }

    pub fn write(&self, slug: &str, text: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.paths.documents_dir)
            .map_err(ProjectError::io("creating documents directory"))?;
        let path = self.path(slug);
        fs::write(&path, text).map_err(ProjectError::io("writing project document"))?;
        debug!(slug, bytes = text.len(), "document written");
        Ok(path)
    }

    /// Remove the document for `slug`; `NotFound` if there is none.
    pub fn remove(&self, slug: &str) -> Result<()> {
        if !is_slug(slug) {
            return Err(ProjectError::NotFound(slug.to_string()));
        }
        match fs::remove_file(self.path(slug)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(ProjectError::NotFound(slug.to_string()))
            }
            Err(err) => Err(ProjectError::io("removing project document")(err)),
        }
    }

    /// Read every document with the configured extension.
    ///
    /// Files that cannot be read are logged and skipped. A missing documents
    /// directory yields an empty scan.
    pub fn scan(&self) -> Result<Vec<StoredDocument>> {
        let entries = match fs::read_dir(&self.paths.documents_dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(ProjectError::io("listing project documents")(err)),
        };

        let mut documents = Vec::new();
        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(err) => {
                    warn!(error = %err, "skipping unreadable directory entry");
                    continue;
                }
            };
            let matches_ext = path
                .extension()
                .is_some_and(|ext| ext == self.paths.document_extension.as_str());
            if !matches_ext || !path.is_file() {
                continue;
            }
            let Some(slug) = path.file_stem().and_then(|stem| stem.to_str()) else {
                warn!(path = %path.display(), "skipping document with non-utf8 name");
                continue;
            };
            match fs::read_to_string(&path) {
                Ok(text) => documents.push(StoredDocument {
                    slug: slug.to_string(),
                    text,
                }),
                Err(err) => warn!(slug, error = %err, "skipping unreadable document"),
            }
        }
        documents.sort_by(|a, b| a.slug.cmp(&b.slug));
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::config::AdminConfig;

    fn store(root: &std::path::Path) -> DocumentStore {
        DocumentStore::new(PortfolioPaths::new(root, &AdminConfig::default()))
    }

    #[test]
    fn read_missing_is_not_found() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = store(temp.path()).read("ghost").expect_err("missing");
        assert!(matches!(err, ProjectError::NotFound(slug) if slug == "ghost"));
    }

    #[test]
    fn write_creates_directory_and_reads_back() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = store(temp.path());
        let path = store.write("alpha", "---\n---\n").expect("write");
        assert!(path.ends_with("_projects/alpha.md"));
        assert_eq!(store.read("alpha").expect("read"), "---\n---\n");
        assert!(store.exists("alpha"));
    }

    #[test]
    fn scan_ignores_other_extensions() {
        let temp = tempfile::tempdir().expect("tempdir");
        let store = store(temp.path());
        store.write("beta", "b").expect("write");
        store.write("alpha", "a").expect("write");
        fs::write(temp.path().join("_projects/notes.txt"), "x").expect("write txt");

        let slugs: Vec<String> = store
            .scan()
            .expect("scan")
            .into_iter()
            .map(|doc| doc.slug)
            .collect();
        assert_eq!(slugs, vec!["alpha", "beta"]);
    }

    #[test]
    fn names_outside_the_documents_directory_are_not_found() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(temp.path().join("outside.md"), "x").expect("write outside");
        let store = store(temp.path());
        store.write("alpha", "a").expect("write");

        assert!(!store.exists("../outside"));
        let err = store.read("../outside").expect_err("escaped read");
        assert!(matches!(err, ProjectError::NotFound(_)));
        let err = store.remove("../outside").expect_err("escaped remove");
        assert!(matches!(err, ProjectError::NotFound(_)));
        assert!(temp.path().join("outside.md").is_file());
    }

    #[test]
    fn scan_without_directory_is_empty() {
        let temp = tempfile::tempdir().expect("tempdir");
        assert!(store(temp.path()).scan().expect("scan").is_empty());
    }
}
