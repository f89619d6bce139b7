//! Background image probing with the `image` crate.
//!
//! Only the header is read; pixels are never decoded. A file that cannot be
//! probed is logged and left for the background layer to replace with its
//! placeholder.

use std::path::Path;

use compass_overlay_render::BackgroundImage;

/// Read the pixel size of the image at `path`.
pub fn probe_background(path: impl AsRef<Path>) -> Option<BackgroundImage> {
    let path = path.as_ref();
    match ::image::image_dimensions(path) {
        Ok((width, height)) => {
            log::debug!("background {} is {width}x{height}", path.display());
            Some(BackgroundImage::new(
                path.to_string_lossy().into_owned(),
                width,
                height,
            ))
        }
        Err(err) => {
            log::warn!("cannot read background {}: {err}", path.display());
            None
        }
    }
}

/// Probe `bg.source`, resolved against `base` when relative, and take the
/// size from the file. The source string is kept as configured.
///
/// Returns `None` when the file cannot be read, so the background layer
/// falls back to its placeholder even if the config carried a size.
pub fn resolve_background(bg: &BackgroundImage, base: &Path) -> Option<BackgroundImage> {
    let path = Path::new(&bg.source);
    let path = if path.is_relative() {
        base.join(path)
    } else {
        path.to_path_buf()
    };
    let found = probe_background(&path)?;
    if bg.is_valid() && (bg.width, bg.height) != (found.width, found.height) {
        log::debug!(
            "background {} is {}x{}, config said {}x{}",
            bg.source,
            found.width,
            found.height,
            bg.width,
            bg.height
        );
    }
    Some(BackgroundImage::new(bg.source.clone(), found.width, found.height))
}
