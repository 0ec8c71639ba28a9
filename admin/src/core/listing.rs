//! Lightweight front matter scrape for project listings.

use std::cmp::Ordering;

use crate::core::document::{category_of, date_of, split_front_matter, title_of};
use crate::core::record::ProjectSummary;

/// Summarize a stored document, or `None` if its front matter is unusable.
///
/// A missing title falls back to the slug; missing date or category are empty.
pub fn summarize(slug: &str, text: &str) -> Option<ProjectSummary> {
    let (front_matter, _) = split_front_matter(text).ok()?;
    let title = title_of(front_matter);
    Some(ProjectSummary {
        slug: slug.to_string(),
        title: if title.is_empty() {
            slug.to_string()
        } else {
            title
        },
        date: date_of(front_matter),
        category: category_of(front_matter),
    })
}

/// Newest first. ISO dates compare correctly as text; ties order by slug.
pub fn sort_newest_first(summaries: &mut [ProjectSummary]) {
    summaries.sort_by(|a, b| match b.date.cmp(&a.date) {
        Ordering::Equal => a.slug.cmp(&b.slug),
        other => other,
    });
}
