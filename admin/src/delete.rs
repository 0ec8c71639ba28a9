//! Delete a project's document and asset directory.

use serde::Serialize;
use tracing::{info, instrument};

use crate::error::{ProjectError, Result};
use crate::io::git::Publisher;
use crate::portfolio::{Portfolio, Published};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteOutcome {
    pub slug: String,
    pub deleted: bool,
}

#[instrument(skip(portfolio, publisher))]
pub fn delete_project(
    portfolio: &Portfolio,
    publisher: &dyn Publisher,
    slug: &str,
) -> Result<Published<DeleteOutcome>> {
    let documents = portfolio.documents();
    if !documents.exists(slug) {
        return Err(ProjectError::NotFound(slug.to_string()));
    }
    documents.remove(slug)?;
    portfolio.assets().remove(slug)?;
    info!("project deleted");

    let git = publisher.publish(&format!("Delete project: {slug}"));
    Ok(Published {
        outcome: DeleteOutcome {
            slug: slug.to_string(),
            deleted: true,
        },
        git,
    })
}
