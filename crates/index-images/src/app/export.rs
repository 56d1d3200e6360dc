//! Writing the image list.

use std::path::Path;

use anyhow::Result;
use tracing::debug;

use crate::infra::fs;

/// Render images one per line. A final newline is always written, so an empty list renders as
/// a single empty line.
pub fn render_image_list<S: AsRef<str>>(images: &[S]) -> String {
    let mut rendered = images
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join("\n");
    rendered.push('\n');
    rendered
}

/// Append the rendered image list to `path`. Prior content is kept.
pub fn append_image_list<S: AsRef<str>>(path: &Path, images: &[S]) -> Result<()> {
    let rendered = render_image_list(images);
    fs::append_text(path, &rendered)?;
    debug!(images = images.len(), path = %path.display(), "appended image list");
    Ok(())
}
