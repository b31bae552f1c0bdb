//! Conversion between image files and color grids.

use crate::error::{Result, SomColorError};
use crate::som::{Color, GridBuffer};
use image::{ImageBuffer, Rgb, RgbImage};
use log::debug;
use std::path::Path;

/// Decodes an image file into a square color grid.
///
/// Any alpha channel is dropped. Fails if the image is not square.
pub fn load_square_image(path: &Path) -> Result<GridBuffer<Color>> {
    let img = image::open(path)?.to_rgb8();
    debug!(
        "Loaded {} ({}x{})",
        path.display(),
        img.width(),
        img.height()
    );
    image_to_grid(&img)
}

/// Converts an RGB image to a row-major color grid.
pub fn image_to_grid(img: &RgbImage) -> Result<GridBuffer<Color>> {
    let (width, height) = img.dimensions();
    if width != height || width == 0 {
        return Err(SomColorError::NonSquareImage { width, height });
    }
    let cells: Vec<Color> = img.pixels().map(|p| Color(p.0)).collect();
    GridBuffer::from_vec(cells)
}

/// Renders a color grid as an RGB image.
///
/// Cell `(x, y)` becomes the pixel at row `x`, column `y`.
pub fn grid_to_image(grid: &GridBuffer<Color>) -> RgbImage {
    let stride = grid.stride() as u32;
    ImageBuffer::from_fn(stride, stride, |col, row| {
        Rgb(grid.get(row as usize, col as usize).0)
    })
}

/// Encodes a color grid to `path`; the format follows the file extension.
pub fn save_grid(grid: &GridBuffer<Color>, path: &Path) -> Result<()> {
    grid_to_image(grid).save(path)?;
    debug!("Saved {}x{} image to {}", grid.stride(), grid.stride(), path.display());
    Ok(())
}
