//! Copying content images into the public output directory.

use std::path::Path;

use storyshelf_core::util::files::{ensure_dir, exists, find_all_files, FindOptions};
use storyshelf_core::{Error, Result};

/// Image extensions that are copied, compared case-insensitively.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "svg", "webp"];

/// Copy top-level images from `content_dir` into `public_dir`.
///
/// `public_dir` is created if needed. A missing `content_dir` is not an
/// error; nothing is copied. Returns the copied filenames, sorted.
pub async fn copy_images(content_dir: &Path, public_dir: &Path) -> Result<Vec<String>> {
    ensure_dir(public_dir).await?;

    if !exists(content_dir).await {
        log::info!(
            "No images to copy from {} (missing directory)",
            content_dir.display()
        );
        return Ok(Vec::new());
    }

    let images = find_all_files(
        content_dir,
        FindOptions::with_extensions(IMAGE_EXTENSIONS).with_max_depth(1),
    )
    .await?;

    if images.is_empty() {
        log::info!("No images to copy from {}", content_dir.display());
        return Ok(Vec::new());
    }

    let mut copied = Vec::with_capacity(images.len());
    for image in images {
        let Some(name) = image.path.file_name() else {
            continue;
        };
        let dest = public_dir.join(name);
        tokio::fs::copy(&image.path, &dest)
            .await
            .map_err(|e| Error::io_with_path(e, &image.path))?;
        let name = name.to_string_lossy().into_owned();
        log::debug!("Copied image: {name}");
        copied.push(name);
    }

    log::info!("Copied {} image(s) to {}", copied.len(), public_dir.display());
    Ok(copied)
}
