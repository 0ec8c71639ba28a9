//! Update (and possibly rename) an existing project.

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::core::document::render;
use crate::core::record::ProjectRecord;
use crate::core::slug::slugify;
use crate::core::validate::validate_record;
use crate::error::{ProjectError, Result};
use crate::io::assets::Upload;
use crate::io::git::Publisher;
use crate::portfolio::{Portfolio, Published};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateOutcome {
    pub slug: String,
    pub old_slug: String,
    pub slug_changed: bool,
    pub images: Vec<PathBuf>,
}

/// Replace the project at `old_slug` with `record`.
///
/// The new slug follows the new title. For each visual position a fresh
/// upload wins; otherwise the image already stored at that position is
/// carried over. Files are rewritten before publishing and are not rolled
/// back if a later step fails.
#[instrument(skip(portfolio, publisher, record, uploads))]
pub fn update_project(
    portfolio: &Portfolio,
    publisher: &dyn Publisher,
    old_slug: &str,
    record: ProjectRecord,
    uploads: &[Upload],
) -> Result<Published<UpdateOutcome>> {
    let record = record.normalized();
    let issues = validate_record(&record);
    if !issues.is_empty() {
        return Err(ProjectError::Validation(issues));
    }

    let documents = portfolio.documents();
    if !documents.exists(old_slug) {
        return Err(ProjectError::NotFound(old_slug.to_string()));
    }
    let slug = slugify(&record.title);
    let slug_changed = slug != old_slug;
    if slug_changed && documents.exists(&slug) {
        return Err(ProjectError::Conflict(slug));
    }

    let text = render(&record, &slug)?;
    let assets = portfolio.assets();
    assets.create(&slug)?;
    let mut images = Vec::new();
    for position in 0..record.visuals.len() {
        let upload = uploads.iter().find(|upload| upload.position == position);
        let stored = match upload {
            Some(upload) => Some(assets.place_file(&slug, position, &upload.bytes)?),
            None => assets.copy_existing(old_slug, &slug, position)?,
        };
        images.extend(stored);
    }
    for upload in uploads {
        if upload.position >= record.visuals.len() {
            debug!(position = upload.position, "ignoring upload without a visual");
        }
    }

    documents.write(&slug, &text)?;
    if slug_changed {
        documents.remove(old_slug)?;
        assets.remove(old_slug)?;
    }
    info!(slug, slug_changed, images = images.len(), "project updated");

    let git = publisher.publish(&format!("Update project: {}", record.title));
    Ok(Published {
        outcome: UpdateOutcome {
            slug,
            old_slug: old_slug.to_string(),
            slug_changed,
            images,
        },
        git,
    })
}
