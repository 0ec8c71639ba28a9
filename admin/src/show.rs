//! Load one project with its visuals reconciled against disk.

use tracing::{debug, instrument};

use crate::core::document::parse;
use crate::core::reconcile::reconcile_visuals;
use crate::core::record::LoadedProject;
use crate::error::Result;
use crate::portfolio::Portfolio;

#[instrument(skip(portfolio))]
pub fn load_project(portfolio: &Portfolio, slug: &str) -> Result<LoadedProject> {
    let text = portfolio.documents().read(slug)?;
    let mut record = parse(&text)?;
    let inventory = portfolio.assets().inventory(slug)?;
    record.visuals = reconcile_visuals(&record.title, &record.visuals, &inventory);
    debug!(visuals = record.visuals.len(), "project loaded");
    Ok(LoadedProject {
        slug: slug.to_string(),
        existing_images: inventory.filenames(),
        record,
    })
}
