//! Positional asset naming and the site URLs derived from it.

/// Reserved filename of the hero visual (position 0).
pub const HERO_FILENAME: &str = "hero.png";

/// Site-absolute prefix under which project asset directories are served.
pub const ASSETS_URL_PREFIX: &str = "/assets/images/projects";

/// Filename for the visual at `position`.
pub fn filename_for_position(position: usize) -> String {
    if position == 0 {
        HERO_FILENAME.to_string()
    } else {
        format!("visual-{position}.png")
    }
}

/// Inverse of [`filename_for_position`]; `None` for non-canonical names.
pub fn position_of(filename: &str) -> Option<usize> {
    if filename == HERO_FILENAME {
        return Some(0);
    }
    let index = filename.strip_prefix("visual-")?.strip_suffix(".png")?;
    let position: usize = index.parse().ok()?;
    (position >= 1 && filename_for_position(position) == filename).then_some(position)
}

pub fn asset_url(slug: &str, filename: &str) -> String {
    format!("{ASSETS_URL_PREFIX}/{slug}/{filename}")
}

pub fn hero_url(slug: &str) -> String {
    asset_url(slug, HERO_FILENAME)
}

/// Public page URL of a project on the generated site.
pub fn page_url(slug: &str) -> String {
    format!("/projects/{slug}/")
}
