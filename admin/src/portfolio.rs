//! Explicit context shared by every portfolio operation.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use crate::io::assets::AssetLayout;
use crate::io::config::{AdminConfig, load_config};
use crate::io::git::PublishReport;
use crate::io::paths::PortfolioPaths;
use crate::io::store::DocumentStore;

/// A static-site project root together with its configuration.
#[derive(Debug, Clone)]
pub struct Portfolio {
    config: AdminConfig,
    paths: PortfolioPaths,
    documents: DocumentStore,
    assets: AssetLayout,
}

impl Portfolio {
    pub fn new(root: impl Into<PathBuf>, config: AdminConfig) -> Self {
        let paths = PortfolioPaths::new(root, &config);
        Self {
            documents: DocumentStore::new(paths.clone()),
            assets: AssetLayout::new(paths.clone()),
            paths,
            config,
        }
    }

    /// Open `root`, reading config from `config_path` or the root's default file.
    pub fn open(root: &Path, config_path: Option<&Path>) -> Result<Self> {
        let config_path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PortfolioPaths::config_path(root));
        let config = load_config(&config_path)?;
        debug!(root = %root.display(), config = %config_path.display(), "portfolio opened");
        Ok(Self::new(root, config))
    }

    pub fn root(&self) -> &Path {
        &self.paths.root
    }

    pub fn config(&self) -> &AdminConfig {
        &self.config
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    pub fn assets(&self) -> &AssetLayout {
        &self.assets
    }
}

/// Result of a mutating operation plus the version-control status that
/// followed it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Published<T> {
    #[serde(flatten)]
    pub outcome: T,
    pub git: PublishReport,
}
