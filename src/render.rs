//! Display conversion for the illumination field: cosine-smoothed tile
//! corners, bilinear rasterization helpers and a PPM exporter.

use std::fs::File;
use std::io::{self, Write};

use rayon::prelude::*;

use crate::color::{MAX_BRIGHTNESS, Rgb};
use crate::world::WorldGrid;

/// Linear display color, 0.0-1.0 per channel.
pub type DisplayColor = [f32; 3];

/// Corner colors for one tile in top-left, top-right, bottom-left,
/// bottom-right order.
pub type TileCorners = [DisplayColor; 4];

/// Obstacles draw as flat red.
pub const OBSTACLE_COLOR: DisplayColor = [1.0, 0.0, 0.0];
/// The hovered tile draws as flat green (obstacles win over the cursor).
pub const CURSOR_COLOR: DisplayColor = [0.0, 1.0, 0.0];

/// Convert a float value (0.0-1.0) to a byte (0-255)
#[inline]
pub fn to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0) as u8
}

/// Maps a 0-15 light color into display space.
pub fn display_color(color: Rgb) -> DisplayColor {
    [
        color.r as f32 / MAX_BRIGHTNESS as f32,
        color.g as f32 / MAX_BRIGHTNESS as f32,
        color.b as f32 / MAX_BRIGHTNESS as f32,
    ]
}

/// Cosine interpolation, Paul Bourke's formulation. Softer tile seams than a
/// straight lerp for one extra cos per blend.
pub fn cosine_blend(a: DisplayColor, b: DisplayColor, t: f32) -> DisplayColor {
    let t2 = (1.0 - (t * std::f32::consts::PI).cos()) / 2.0;
    [
        a[0] * (1.0 - t2) + b[0] * t2,
        a[1] * (1.0 - t2) + b[1] * t2,
        a[2] * (1.0 - t2) + b[2] * t2,
    ]
}

/// Bilinear blend across a tile's corners at fractional position `(u, v)`.
pub fn corner_blend(corners: &TileCorners, u: f32, v: f32) -> DisplayColor {
    let top = lerp(corners[0], corners[1], u);
    let bottom = lerp(corners[2], corners[3], u);
    lerp(top, bottom, v)
}

#[inline]
fn lerp(a: DisplayColor, b: DisplayColor, t: f32) -> DisplayColor {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

/// Smoothed corner colors for one tile. Interior tiles blend their 3x3
/// neighborhood through two cosine stages per corner; tiles on the outer
/// ring draw flat since they lack a full neighborhood.
pub fn tile_corners(grid: &WorldGrid, x: i32, y: i32) -> TileCorners {
    let size = grid.size() as i32;
    if x < 1 || y < 1 || x + 1 >= size || y + 1 >= size {
        return [display_color(grid.illumination_at((x, y))); 4];
    }

    let sample = |dx: i32, dy: i32| display_color(grid.illumination_at((x + dx, y + dy)));
    let center = sample(0, 0);
    let top = sample(0, -1);
    let bottom = sample(0, 1);
    let left = sample(-1, 0);
    let right = sample(1, 0);
    let top_left = sample(-1, -1);
    let top_right = sample(1, -1);
    let bottom_left = sample(-1, 1);
    let bottom_right = sample(1, 1);

    let west = cosine_blend(left, center, 0.5);
    let east = cosine_blend(center, right, 0.5);
    [
        cosine_blend(cosine_blend(top_left, top, 0.5), west, 0.5),
        cosine_blend(cosine_blend(top, top_right, 0.5), east, 0.5),
        cosine_blend(west, cosine_blend(bottom_left, bottom, 0.5), 0.5),
        cosine_blend(east, cosine_blend(bottom, bottom_right, 0.5), 0.5),
    ]
}

/// Smoothed corners for every tile, row-major. Rows run in parallel; the
/// pass only reads the grid.
pub fn smoothed_corners(grid: &WorldGrid) -> Vec<TileCorners> {
    let size = grid.size();
    let mut corners = vec![[[0.0; 3]; 4]; size * size];
    if size == 0 {
        return corners;
    }
    corners.par_chunks_mut(size).enumerate().for_each(|(y, row)| {
        for (x, tile) in row.iter_mut().enumerate() {
            *tile = tile_corners(grid, x as i32, y as i32);
        }
    });
    corners
}

/// Saves the smoothed field as a plain-text PPM, obstacles as flat red like
/// the interactive view. `scale` is pixels per tile edge.
pub fn save_ppm(grid: &WorldGrid, filename: &str, scale: usize) -> io::Result<()> {
    let size = grid.size();
    let img_size = size * scale;
    let corners = smoothed_corners(grid);

    let mut file = File::create(filename)?;
    writeln!(file, "P3")?;
    writeln!(file, "{} {}", img_size, img_size)?;
    writeln!(file, "255")?;

    for img_y in 0..img_size {
        for img_x in 0..img_size {
            let x = img_x / scale;
            let y = img_y / scale;
            let [r, g, b] = if grid.is_obstacle((x as i32, y as i32)) {
                OBSTACLE_COLOR
            } else {
                let u = (img_x % scale) as f32 / scale as f32;
                let v = (img_y % scale) as f32 / scale as f32;
                corner_blend(&corners[y * size + x], u, v)
            };
            write!(file, "{} {} {} ", to_byte(r), to_byte(g), to_byte(b))?;
        }
        writeln!(file)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_byte_clamps() {
        assert_eq!(to_byte(0.0), 0);
        assert_eq!(to_byte(1.0), 255);
        assert_eq!(to_byte(2.0), 255);
        assert_eq!(to_byte(-1.0), 0);
    }

    #[test]
    fn test_cosine_blend_midpoint() {
        // t = 0.5 degenerates to the plain average
        let mid = cosine_blend([1.0, 0.0, 0.5], [0.0, 1.0, 0.5], 0.5);
        assert!((mid[0] - 0.5).abs() < 1e-6);
        assert!((mid[1] - 0.5).abs() < 1e-6);
        assert!((mid[2] - 0.5).abs() < 1e-6);

        let start = cosine_blend([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], 0.0);
        assert!((start[0] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_corner_blend_hits_corners() {
        let corners = [
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 1.0],
            [1.0, 1.0, 1.0],
        ];
        assert_eq!(corner_blend(&corners, 0.0, 0.0), corners[0]);
        assert_eq!(corner_blend(&corners, 1.0, 0.0), corners[1]);
        assert_eq!(corner_blend(&corners, 0.0, 1.0), corners[2]);
        assert_eq!(corner_blend(&corners, 1.0, 1.0), corners[3]);
    }

    #[test]
    fn test_border_tiles_draw_flat() {
        let mut grid = WorldGrid::new(4);
        grid.merge_illumination((0, 0), Rgb::new(15, 0, 0));
        let corners = tile_corners(&grid, 0, 0);
        assert_eq!(corners[0], [1.0, 0.0, 0.0]);
        assert_eq!(corners[0], corners[1]);
        assert_eq!(corners[0], corners[2]);
        assert_eq!(corners[0], corners[3]);
    }
}
