//! Git adapter for publishing portfolio changes.
//!
//! Publishing runs after the files are already written and never fails the
//! operation that triggered it: the outcome is reported as a [`PublishReport`]
//! next to the main result.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::config::GitConfig;

/// Auxiliary status of the version-control step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishReport {
    pub success: bool,
    pub message: String,
}

impl PublishReport {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Records a finished change in version control.
pub trait Publisher {
    fn publish(&self, message: &str) -> PublishReport;
}

/// Publisher used when version control is turned off.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPublish;

impl Publisher for NoPublish {
    fn publish(&self, _message: &str) -> PublishReport {
        PublishReport::ok("Version control disabled")
    }
}

/// Wrapper for executing git commands in a working directory.
#[derive(Debug, Clone)]
pub struct Git {
    workdir: PathBuf,
}

impl Git {
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    /// Stage all changes (respects .gitignore).
    pub fn add_all(&self) -> Result<()> {
        self.run_checked(&["add", "-A"])?;
        Ok(())
    }

    /// True if there is anything staged for commit.
    pub fn has_staged_changes(&self) -> Result<bool> {
        let out = self.run(&["diff", "--cached", "--name-only"])?;
        Ok(!String::from_utf8_lossy(&out.stdout).trim().is_empty())
    }

    /// Commit staged changes with a message.
    ///
    /// If there is nothing to commit, this returns Ok(false) and does nothing.
    #[instrument(skip_all)]
    pub fn commit_staged(&self, message: &str) -> Result<bool> {
        if !self.has_staged_changes()? {
            debug!("no staged changes, skipping commit");
            return Ok(false);
        }
        debug!("committing staged changes");
        let args = ["commit", "-m", message];
        let output = self.run(&args)?;
        if output.status.success() {
            return Ok(true);
        }
        if mentions_nothing_to_commit(&output) {
            debug!("git reported nothing to commit");
            return Ok(false);
        }
        Err(failure(&args, &output))
    }

    /// Push the current branch, to `remote` when given.
    #[instrument(skip_all, fields(remote))]
    pub fn push(&self, remote: Option<&str>) -> Result<()> {
        match remote {
            Some(remote) => self.run_checked(&["push", remote, "HEAD"])?,
            None => self.run_checked(&["push"])?,
        };
        Ok(())
    }

    fn run_checked(&self, args: &[&str]) -> Result<Output> {
        let output = self.run(args)?;
        if !output.status.success() {
            return Err(failure(args, &output));
        }
        Ok(output)
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        Command::new("git")
            .args(args)
            .current_dir(&self.workdir)
            .output()
            .with_context(|| format!("spawn git {}", args.first().unwrap_or(&"")))
    }
}

fn failure(args: &[&str], output: &Output) -> anyhow::Error {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow!(
        "git {} failed: {}",
        args.first().unwrap_or(&""),
        stderr.trim()
    )
}

fn mentions_nothing_to_commit(output: &Output) -> bool {
    [&output.stdout, &output.stderr]
        .iter()
        .any(|stream| String::from_utf8_lossy(stream).contains("nothing to commit"))
}

/// Stage, commit and (optionally) push everything under the project root.
#[derive(Debug, Clone)]
pub struct GitPublisher {
    git: Git,
    push: bool,
    remote: Option<String>,
}

/// What a successful publish did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PublishStep {
    NothingToCommit,
    Committed,
    CommittedAndPushed,
}

impl GitPublisher {
    pub fn new(workdir: impl Into<PathBuf>, config: &GitConfig) -> Self {
        Self {
            git: Git::new(workdir),
            push: config.push,
            remote: config.remote.clone(),
        }
    }

    fn try_publish(&self, message: &str) -> Result<PublishStep> {
        self.git.add_all()?;
        if !self.git.commit_staged(message)? {
            return Ok(PublishStep::NothingToCommit);
        }
        if !self.push {
            return Ok(PublishStep::Committed);
        }
        self.git.push(self.remote.as_deref())?;
        Ok(PublishStep::CommittedAndPushed)
    }
}

impl Publisher for GitPublisher {
    #[instrument(skip(self))]
    fn publish(&self, message: &str) -> PublishReport {
        match self.try_publish(message) {
            Ok(PublishStep::NothingToCommit) => PublishReport::ok("No changes to commit"),
            Ok(PublishStep::Committed) => {
                info!("changes committed");
                PublishReport::ok("Changes committed")
            }
            Ok(PublishStep::CommittedAndPushed) => {
                info!("changes committed and pushed");
                PublishReport::ok("Changes committed and pushed")
            }
            Err(err) => {
                warn!(error = %format!("{err:#}"), "publishing failed");
                PublishReport::failed(format!("Git error: {err:#}"))
            }
        }
    }
}

/// Build the publisher selected by configuration.
pub fn publisher_for(workdir: &Path, config: &GitConfig) -> Box<dyn Publisher> {
    if config.enabled {
        Box::new(GitPublisher::new(workdir, config))
    } else {
        Box::new(NoPublish)
    }
}
