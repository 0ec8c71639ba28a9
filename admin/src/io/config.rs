//! Admin configuration read from `<root>/.portfolio-admin.toml`.

use std::fs;
use std::path::{Component, Path};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".portfolio-admin.toml";

/// Admin configuration (TOML).
///
/// Every field is optional in the file; missing fields take the layout the
/// site generator expects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AdminConfig {
    /// Directory (relative to the project root) holding project documents.
    pub documents_dir: String,

    /// File extension of project documents, without the dot.
    pub document_extension: String,

    pub git: GitConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GitConfig {
    /// Commit after every create/update/delete.
    pub enabled: bool,

    /// Push after a successful commit.
    pub push: bool,

    /// Remote to push to; `git push` picks the upstream when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            push: true,
            remote: None,
        }
    }
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            documents_dir: "_projects".to_string(),
            document_extension: "md".to_string(),
            git: GitConfig::default(),
        }
    }
}

impl AdminConfig {
    pub fn validate(&self) -> Result<()> {
        let dir = Path::new(&self.documents_dir);
        if self.documents_dir.trim().is_empty() {
            return Err(anyhow!("documents_dir must not be empty"));
        }
        if !dir
            .components()
            .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
        {
            return Err(anyhow!(
                "documents_dir must be a relative path inside the project root"
            ));
        }
        let ext = self.document_extension.trim();
        if ext.is_empty() || ext.contains(['.', '/', '\\']) {
            return Err(anyhow!(
                "document_extension must be a bare extension such as \"md\""
            ));
        }
        if let Some(remote) = &self.git.remote {
            if remote.trim().is_empty() {
                return Err(anyhow!("git.remote must not be empty when set"));
            }
        }
        Ok(())
    }
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `AdminConfig::default()`.
pub fn load_config(path: &Path) -> Result<AdminConfig> {
    if !path.exists() {
        let cfg = AdminConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: AdminConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()?;
    Ok(cfg)
}
