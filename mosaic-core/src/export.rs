//! PNG serialization of render targets.
//!
//! The exact current pixel contents are encoded; no resizing or
//! recompression. Callers are responsible for having finished rendering
//! into the target first.

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, RgbImage};

use crate::Result;

/// Encode a render target as PNG bytes.
pub fn to_png_bytes(image: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

/// Encode a render target and write it to `path`.
pub fn write_png(image: &RgbImage, path: impl AsRef<Path>) -> Result<()> {
    image.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
