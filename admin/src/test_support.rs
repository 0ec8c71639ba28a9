//! Test-only helpers: sample records, temp portfolios and a recording
//! publisher.

use std::cell::RefCell;
use std::path::Path;

use tempfile::TempDir;

use crate::core::record::{ProjectRecord, Visual};
use crate::io::config::{AdminConfig, GitConfig};
use crate::io::git::{PublishReport, Publisher};
use crate::portfolio::Portfolio;

/// A complete, valid record with `visual_count` visuals (hero included).
pub fn record(title: &str, date: &str, visual_count: usize) -> ProjectRecord {
    ProjectRecord {
        title: title.to_string(),
        description: format!("{title} description"),
        category: "Systems".to_string(),
        date: date.to_string(),
        tools: vec!["Rust".to_string(), "SQLite".to_string()],
        overview: format!("{title} overview.\n\nSecond paragraph."),
        takeaways: vec!["Keep it simple".to_string(), "Measure".to_string()],
        visuals: (0..visual_count)
            .map(|i| Visual::new(format!("Role {i}"), format!("Caption {i}")))
            .collect(),
    }
}

/// Distinct fake image bytes per position.
pub fn image(position: usize) -> Vec<u8> {
    format!("\u{89}PNG fake image {position}").into_bytes()
}

pub fn images(count: usize) -> Vec<Vec<u8>> {
    (0..count).map(image).collect()
}

/// Portfolio rooted in a fresh temporary directory with git disabled.
pub struct TempPortfolio {
    dir: TempDir,
    portfolio: Portfolio,
}

impl TempPortfolio {
    pub fn new() -> std::io::Result<Self> {
        let dir = tempfile::tempdir()?;
        let config = AdminConfig {
            git: GitConfig {
                enabled: false,
                ..GitConfig::default()
            },
            ..AdminConfig::default()
        };
        let portfolio = Portfolio::new(dir.path(), config);
        Ok(Self { dir, portfolio })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }
}

/// Publisher that records commit messages and returns a fixed report.
#[derive(Debug)]
pub struct RecordingPublisher {
    report: PublishReport,
    messages: RefCell<Vec<String>>,
}

impl RecordingPublisher {
    pub fn succeeding() -> Self {
        Self::returning(PublishReport::ok("Changes committed and pushed"))
    }

    pub fn returning(report: PublishReport) -> Self {
        Self {
            report,
            messages: RefCell::new(Vec::new()),
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

impl Publisher for RecordingPublisher {
    fn publish(&self, message: &str) -> PublishReport {
        self.messages.borrow_mut().push(message.to_string());
        self.report.clone()
    }
}
