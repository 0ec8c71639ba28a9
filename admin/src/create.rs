//! Create a new project: document plus positional images.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, instrument};

use crate::core::document::render;
use crate::core::layout::page_url;
use crate::core::record::ProjectRecord;
use crate::core::slug::slugify;
use crate::core::validate::validate_record;
use crate::error::{ProjectError, Result, ValidationIssue};
use crate::io::git::Publisher;
use crate::portfolio::{Portfolio, Published};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateOutcome {
    pub slug: String,
    pub document: PathBuf,
    pub images: Vec<PathBuf>,
    pub url: String,
}

/// Validate, write and publish a new project.
///
/// `images[0]` becomes the hero; `images[i]` is stored as `visual-<i>.png`.
/// Nothing is written when validation fails or the slug is already taken.
#[instrument(skip_all, fields(title = %record.title))]
pub fn create_project(
    portfolio: &Portfolio,
    publisher: &dyn Publisher,
    record: ProjectRecord,
    images: &[Vec<u8>],
) -> Result<Published<CreateOutcome>> {
    let record = record.normalized();
    let mut issues = validate_record(&record);
    if !record.visuals.is_empty() && images.len() != record.visuals.len() {
        issues.push(ValidationIssue::ImageCountMismatch {
            images: images.len(),
            visuals: record.visuals.len(),
        });
    }
    if !issues.is_empty() {
        return Err(ProjectError::Validation(issues));
    }

    let slug = slugify(&record.title);
    let documents = portfolio.documents();
    if documents.exists(&slug) {
        return Err(ProjectError::Conflict(slug));
    }

    let text = render(&record, &slug)?;
    let assets = portfolio.assets();
    assets.create(&slug)?;
    let mut placed = Vec::with_capacity(images.len());
    for (position, bytes) in images.iter().enumerate() {
        placed.push(assets.place_file(&slug, position, bytes)?);
    }

    let document = documents.write(&slug, &text)?;
    info!(slug, images = placed.len(), "project created");

    let git = publisher.publish(&format!("Add project: {}", record.title));
    Ok(Published {
        outcome: CreateOutcome {
            url: page_url(&slug),
            slug,
            document,
            images: placed,
        },
        git,
    })
}
