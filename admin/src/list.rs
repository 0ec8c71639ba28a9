//! List stored projects, newest first.

use tracing::{debug, warn};

use crate::core::listing::{sort_newest_first, summarize};
use crate::core::record::ProjectSummary;
use crate::error::Result;
use crate::portfolio::Portfolio;

/// Summaries of every readable project document, sorted by date descending.
///
/// Documents with unusable front matter are skipped individually.
pub fn list_projects(portfolio: &Portfolio) -> Result<Vec<ProjectSummary>> {
    let mut summaries = Vec::new();
    for doc in portfolio.documents().scan()? {
        match summarize(&doc.slug, &doc.text) {
            Some(summary) => summaries.push(summary),
            None => warn!(slug = %doc.slug, "skipping document with malformed front matter"),
        }
    }
    sort_newest_first(&mut summaries);
    debug!(count = summaries.len(), "projects listed");
    Ok(summaries)
}
