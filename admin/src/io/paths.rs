//! Canonical on-disk locations for a portfolio project root.

use std::path::{Path, PathBuf};

use super::config::{AdminConfig, CONFIG_FILE_NAME};

/// Asset directory layout, relative to the root. Fixed because rendered
/// documents reference it by URL.
pub const ASSETS_DIR: &str = "assets/images/projects";

/// All canonical paths for a project root.
#[derive(Debug, Clone)]
pub struct PortfolioPaths {
    pub root: PathBuf,
    pub documents_dir: PathBuf,
    pub assets_dir: PathBuf,
    pub document_extension: String,
}

impl PortfolioPaths {
    pub fn new(root: impl Into<PathBuf>, config: &AdminConfig) -> Self {
        let root = root.into();
        Self {
            documents_dir: root.join(&config.documents_dir),
            assets_dir: root.join(ASSETS_DIR),
            document_extension: config.document_extension.trim().to_string(),
            root,
        }
    }

    /// Default config location for `root`.
    pub fn config_path(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE_NAME)
    }

    pub fn document_path(&self, slug: &str) -> PathBuf {
        self.documents_dir
            .join(format!("{slug}.{}", self.document_extension))
    }

    pub fn asset_dir(&self, slug: &str) -> PathBuf {
        self.assets_dir.join(slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_matches_site_conventions() {
        let paths = PortfolioPaths::new("/site", &AdminConfig::default());
        assert_eq!(
            paths.document_path("sensor-mesh"),
            PathBuf::from("/site/_projects/sensor-mesh.md")
        );
        assert_eq!(
            paths.asset_dir("sensor-mesh"),
            PathBuf::from("/site/assets/images/projects/sensor-mesh")
        );
    }
}
