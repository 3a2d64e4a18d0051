//! Writing finished renders to disk.

use anyhow::{bail, Context, Result};
use ember_renderer::ImageBuffer;
use image::{ColorType, ImageFormat};
use std::path::Path;

/// Save a render, picking PNG, PPM or BMP from the file extension.
pub fn save(image: &ImageBuffer, path: &Path) -> Result<()> {
    let format = ImageFormat::from_path(path)
        .with_context(|| format!("Cannot tell the image format of {}", path.display()))?;

    if !matches!(format, ImageFormat::Png | ImageFormat::Pnm | ImageFormat::Bmp) {
        bail!(
            "Unsupported output format {:?} for {}; use .png, .ppm or .bmp",
            format,
            path.display()
        );
    }

    image::save_buffer_with_format(
        path,
        &image.to_rgb8(),
        image.width,
        image.height,
        ColorType::Rgb8,
        format,
    )
    .with_context(|| format!("Failed to write {}", path.display()))?;

    log::info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}
