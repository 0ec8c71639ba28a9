//! Asset layout manager: places project images by visual position.
//!
//! Each project owns `<assets>/<slug>/`, holding `hero.png` (position 0) and
//! `visual-<i>.png` for positions 1..N.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument, warn};

use super::paths::PortfolioPaths;
use crate::core::layout::{filename_for_position, position_of};
use crate::core::reconcile::AssetInventory;
use crate::core::slug::is_slug;
use crate::error::{ProjectError, Result};

/// Image bytes uploaded for a specific visual position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub position: usize,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(position: usize, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            position,
            bytes: bytes.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AssetLayout {
    paths: PortfolioPaths,
}

impl AssetLayout {
    pub fn new(paths: PortfolioPaths) -> Self {
        Self { paths }
    }

    pub fn dir(&self, slug: &str) -> PathBuf {
        self.paths.asset_dir(slug)
    }

    pub fn file_path(&self, slug: &str, position: usize) -> PathBuf {
        self.dir(slug).join(filename_for_position(position))
    }

    /// Ensure the asset directory for `slug` exists, parents included.
    pub fn create(&self, slug: &str) -> Result<PathBuf> {
        let dir = self.dir(slug);
        fs::create_dir_all(&dir).map_err(ProjectError::io("creating asset directory"))?;
        Ok(dir)
    }

    /// Write `bytes` as the image for `position`, replacing any previous file.
    pub fn place_file(&self, slug: &str, position: usize, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.file_path(slug, position);
        fs::write(&path, bytes).map_err(ProjectError::io("writing image"))?;
        debug!(slug, position, bytes = bytes.len(), "image placed");
        Ok(path)
    }

    /// Delete the whole asset directory. Absent directories are not an error.
    #[instrument(skip(self))]
    pub fn remove(&self, slug: &str) -> Result<()> {
        if !is_slug(slug) {
            return Err(ProjectError::NotFound(slug.to_string()));
        }
        match fs::remove_dir_all(self.dir(slug)) {
            Ok(()) => {
                debug!("asset directory removed");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(ProjectError::io("removing asset directory")(err)),
        }
    }

    /// Carry the image at `position` over from `old_slug` to `new_slug`.
    ///
    /// Returns the destination when an image is present there afterwards, or
    /// `None` if the source project never had one at this position.
    pub fn copy_existing(
        &self,
        old_slug: &str,
        new_slug: &str,
        position: usize,
    ) -> Result<Option<PathBuf>> {
        let source = self.file_path(old_slug, position);
        let dest = self.file_path(new_slug, position);
        if !source.is_file() {
            debug!(old_slug, position, "no existing image to carry over");
            return Ok(None);
        }
        if same_file(&source, &dest) {
            return Ok(Some(dest));
        }
        fs::copy(&source, &dest).map_err(ProjectError::io("copying image"))?;
        debug!(old_slug, new_slug, position, "image carried over");
        Ok(Some(dest))
    }

    /// Which canonical image files exist for `slug`.
    pub fn inventory(&self, slug: &str) -> Result<AssetInventory> {
        let dir = self.dir(slug);
        let entries = match fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(AssetInventory::default()),
            Err(err) => return Err(ProjectError::io("listing asset directory")(err)),
        };

        let mut inventory = AssetInventory::default();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(slug, error = %err, "skipping unreadable asset entry");
                    continue;
                }
            };
            if !entry.path().is_file() {
                continue;
            }
            let name = entry.file_name();
            match name.to_str().and_then(position_of) {
                Some(0) => inventory.hero = true,
                Some(position) => inventory.positional.push(position),
                None => {}
            }
        }
        inventory.positional.sort_unstable();
        Ok(inventory)
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::config::AdminConfig;

    fn layout(root: &Path) -> AssetLayout {
        AssetLayout::new(PortfolioPaths::new(root, &AdminConfig::default()))
    }

    #[test]
    fn create_is_idempotent() {
        let temp = tempfile::tempdir().expect("tempdir");
        let assets = layout(temp.path());
        let first = assets.create("alpha").expect("create");
        let second = assets.create("alpha").expect("create again");
        assert_eq!(first, second);
        assert!(first.ends_with("assets/images/projects/alpha"));
    }

    #[test]
    fn place_file_uses_positional_names() {
        let temp = tempfile::tempdir().expect("tempdir");
        let assets = layout(temp.path());
        assets.create("alpha").expect("create");
        let hero = assets.place_file("alpha", 0, b"hero").expect("hero");
        let second = assets.place_file("alpha", 2, b"two").expect("visual");
        assert!(hero.ends_with("alpha/hero.png"));
        assert!(second.ends_with("alpha/visual-2.png"));
        assert_eq!(fs::read(second).expect("read"), b"two");
    }

    #[test]
    fn remove_tolerates_missing_directory() {
        let temp = tempfile::tempdir().expect("tempdir");
        let assets = layout(temp.path());
        assets.create("alpha").expect("create");
        assets.remove("alpha").expect("remove");
        assets.remove("alpha").expect("remove again");
        assert!(!assets.dir("alpha").exists());
    }

    #[test]
    fn remove_refuses_names_that_are_not_slugs() {
        let temp = tempfile::tempdir().expect("tempdir");
        let assets = layout(temp.path());
        assets.create("alpha").expect("create");
        let err = assets.remove("alpha/..").expect_err("not a slug");
        assert!(matches!(err, ProjectError::NotFound(_)));
        assert!(assets.dir("alpha").is_dir());
    }

    #[test]
    fn copy_existing_moves_bytes_between_projects() {
        let temp = tempfile::tempdir().expect("tempdir");
        let assets = layout(temp.path());
        assets.create("old").expect("create old");
        assets.create("new").expect("create new");
        assets.place_file("old", 1, b"one").expect("place");

        let copied = assets.copy_existing("old", "new", 1).expect("copy");
        assert_eq!(copied, Some(assets.file_path("new", 1)));
        assert_eq!(fs::read(assets.file_path("new", 1)).expect("read"), b"one");
        assert_eq!(assets.copy_existing("old", "new", 2).expect("copy"), None);
    }

    #[test]
    fn copy_onto_itself_is_skipped() {
        let temp = tempfile::tempdir().expect("tempdir");
        let assets = layout(temp.path());
        assets.create("same").expect("create");
        assets.place_file("same", 0, b"hero").expect("place");
        let copied = assets.copy_existing("same", "same", 0).expect("copy");
        assert_eq!(copied, Some(assets.file_path("same", 0)));
        assert_eq!(fs::read(assets.file_path("same", 0)).expect("read"), b"hero");
    }

    #[test]
    fn inventory_orders_positions_numerically() {
        let temp = tempfile::tempdir().expect("tempdir");
        let assets = layout(temp.path());
        assets.create("alpha").expect("create");
        for position in [10, 0, 2] {
            assets.place_file("alpha", position, b"x").expect("place");
        }
        fs::write(assets.dir("alpha").join("notes.txt"), "x").expect("write");

        let inventory = assets.inventory("alpha").expect("inventory");
        assert!(inventory.hero);
        assert_eq!(inventory.positional, vec![2, 10]);
        assert_eq!(
            assets.inventory("missing").expect("inventory"),
            AssetInventory::default()
        );
    }
}
