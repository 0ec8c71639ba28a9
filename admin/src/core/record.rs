//! Project record types shared by the document mapper and the flows.

use serde::{Deserialize, Serialize};

/// A captioned image belonging to a project.
///
/// `filename` is derived from the visual's position when writing and is only
/// populated on records read back from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Visual {
    pub filename: String,
    pub role: String,
    pub caption: String,
}

impl Visual {
    pub fn new(role: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            filename: String::new(),
            role: role.into(),
            caption: caption.into(),
        }
    }
}

/// Structured content of one portfolio project.
///
/// Position 0 in `visuals` is the hero image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectRecord {
    pub title: String,
    pub description: String,
    pub category: String,
    /// ISO calendar date (`YYYY-MM-DD`), kept as text so unparsed documents
    /// can still be represented.
    pub date: String,
    pub tools: Vec<String>,
    pub overview: String,
    pub takeaways: Vec<String>,
    pub visuals: Vec<Visual>,
}

impl ProjectRecord {
    /// Clean up raw form input.
    ///
    /// Scalars are trimmed, blank tools and takeaways are dropped, and visuals
    /// lacking either a role or a caption are discarded.
    pub fn normalized(mut self) -> Self {
        for field in [
            &mut self.title,
            &mut self.description,
            &mut self.category,
            &mut self.date,
            &mut self.overview,
        ] {
            *field = field.trim().to_string();
        }
        self.tools = trimmed_non_empty(self.tools);
        self.takeaways = trimmed_non_empty(self.takeaways);
        self.visuals = self
            .visuals
            .into_iter()
            .map(|visual| Visual {
                filename: visual.filename.trim().to_string(),
                role: visual.role.trim().to_string(),
                caption: visual.caption.trim().to_string(),
            })
            .filter(|visual| !visual.role.is_empty() && !visual.caption.is_empty())
            .collect();
        self
    }
}

fn trimmed_non_empty(items: Vec<String>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

/// A project read back from disk, with visuals reconciled against its assets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadedProject {
    pub slug: String,
    #[serde(flatten)]
    pub record: ProjectRecord,
    /// Image filenames present on disk: hero first, then positional ascending.
    pub existing_images: Vec<String>,
}

/// Listing entry extracted from a document's front matter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub category: String,
}
