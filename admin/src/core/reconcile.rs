//! Merge document-declared visuals with the image files actually on disk.
//!
//! Disk wins: the result holds one visual per existing file, in positional
//! order. Document captions are layered on where the filename still matches.
//! Entries whose file is gone are dropped and orphan files get placeholders.

use crate::core::layout::{HERO_FILENAME, filename_for_position};
use crate::core::record::Visual;

pub const HERO_ROLE: &str = "Result";
pub const HERO_FALLBACK_CAPTION: &str = "Hero image";
pub const PLACEHOLDER_ROLE: &str = "Result";
pub const PLACEHOLDER_CAPTION: &str = "Image description";

/// Image files present in one project's asset directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetInventory {
    pub hero: bool,
    /// Positions (>= 1) of `visual-<i>.png` files, ascending.
    pub positional: Vec<usize>,
}

impl AssetInventory {
    /// Filenames on disk: hero first, then positional ascending.
    pub fn filenames(&self) -> Vec<String> {
        let hero = self.hero.then(|| HERO_FILENAME.to_string());
        hero.into_iter()
            .chain(self.positional.iter().map(|&pos| filename_for_position(pos)))
            .collect()
    }
}

pub fn reconcile_visuals(title: &str, declared: &[Visual], disk: &AssetInventory) -> Vec<Visual> {
    let mut visuals = Vec::with_capacity(disk.positional.len() + 1);
    if disk.hero {
        let caption = if title.is_empty() {
            HERO_FALLBACK_CAPTION
        } else {
            title
        };
        visuals.push(Visual {
            filename: HERO_FILENAME.to_string(),
            role: HERO_ROLE.to_string(),
            caption: caption.to_string(),
        });
    }
    for &position in &disk.positional {
        let filename = filename_for_position(position);
        let visual = declared
            .iter()
            .find(|visual| visual.filename == filename)
            .cloned()
            .unwrap_or_else(|| Visual {
                filename,
                role: PLACEHOLDER_ROLE.to_string(),
                caption: PLACEHOLDER_CAPTION.to_string(),
            });
        visuals.push(visual);
    }
    visuals
}
