//! Text and still-image output of a grid.

use anyhow::{Context, Result};
use image::{GrayImage, ImageFormat, Luma};
use lifegrid_core::Topology;
use lifegrid_world::{CellShape, Grid};
use std::path::Path;
use tracing::info;

const ALIVE: char = '#';
const DEAD: char = '.';

const INK: Luma<u8> = Luma([0]);
const PAPER: Luma<u8> = Luma([255]);

/// One line per row, `#` for live cells and `.` for dead ones
pub fn to_text(grid: &Grid) -> String {
    let mut out = String::with_capacity(grid.cells().len() + grid.rows() as usize);
    for row in grid.row_slices() {
        out.extend(row.iter().map(|cell| if cell.is_alive() { ALIVE } else { DEAD }));
        out.push('\n');
    }
    out
}

/// Draw live cells black on white, each one filled with the outline its
/// topology gives it in a `scale`-pixel cell box.
pub fn rasterize(grid: &Grid, topology: Topology, scale: u32) -> GrayImage {
    let scale = scale.max(1);
    let width = grid.cols() as u32 * scale;
    let height = grid.rows() as u32 * scale;
    let mut image = GrayImage::from_pixel(width, height, PAPER);

    for (pos, cell) in grid.iter() {
        if cell.is_alive() {
            let polygon = CellShape::resolve(topology, pos).polygon(pos, scale as f32, true);
            fill_polygon(&mut image, &polygon);
        }
    }
    image
}

/// Paint every pixel whose center falls inside `polygon`
fn fill_polygon(image: &mut GrayImage, polygon: &[(f32, f32)]) {
    let (width, height) = (image.width() as f32, image.height() as f32);
    let (min_x, min_y, max_x, max_y) = polygon.iter().fold(
        (f32::INFINITY, f32::INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        |(x0, y0, x1, y1), &(x, y)| (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
    );

    let x_range = min_x.floor().clamp(0.0, width) as u32..max_x.ceil().clamp(0.0, width) as u32;
    let y_range = min_y.floor().clamp(0.0, height) as u32..max_y.ceil().clamp(0.0, height) as u32;
    for y in y_range {
        for x in x_range.clone() {
            if contains_point(polygon, x as f32 + 0.5, y as f32 + 0.5) {
                image.put_pixel(x, y, INK);
            }
        }
    }
}

/// Even-odd ray cast
fn contains_point(polygon: &[(f32, f32)], x: f32, y: f32) -> bool {
    let mut inside = false;
    for (&(xi, yi), &(xj, yj)) in polygon.iter().zip(polygon.iter().cycle().skip(1)) {
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
    }
    inside
}

/// Write the current generation to `path` as a PNG
pub fn save_capture(grid: &Grid, topology: Topology, path: &Path, scale: u32) -> Result<()> {
    let image = rasterize(grid, topology, scale);
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("failed to write capture to {:?}", path))?;
    info!(
        width = image.width(),
        height = image.height(),
        live_cells = grid.live_count(),
        "Capture written to {:?}",
        path
    );
    Ok(())
}
