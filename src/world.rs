//! World state: obstacle occupancy and the accumulated illumination field.
//!
//! Both layers are flat row-major vectors indexed by `y * size + x`. The
//! illumination layer stores packed color tokens (see [`crate::color`]);
//! obstacles are a plain bool per tile.

use crate::color::Rgb;

/// A tile coordinate. Signed so that propagation offsets and mouse picks can
/// go negative before the bounds check rejects them.
pub type TilePos = (i32, i32);

/// Square tile grid holding obstacles and illumination.
pub struct WorldGrid {
    size: usize,
    obstacles: Vec<bool>,
    illumination: Vec<u16>,
}

impl WorldGrid {
    pub fn new(size: usize) -> Self {
        WorldGrid {
            size,
            obstacles: vec![false; size * size],
            illumination: vec![0; size * size],
        }
    }

    /// Tiles per side.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn in_bounds(&self, pos: TilePos) -> bool {
        pos.0 >= 0 && pos.1 >= 0 && (pos.0 as usize) < self.size && (pos.1 as usize) < self.size
    }

    #[inline]
    fn index(&self, pos: TilePos) -> Option<usize> {
        if self.in_bounds(pos) {
            Some(pos.1 as usize * self.size + pos.0 as usize)
        } else {
            None
        }
    }

    /// Whether the tile blocks light seeding. Out-of-bounds reads as open.
    pub fn is_obstacle(&self, pos: TilePos) -> bool {
        self.index(pos).is_some_and(|i| self.obstacles[i])
    }

    pub fn set_obstacle(&mut self, pos: TilePos, blocked: bool) {
        if let Some(i) = self.index(pos) {
            self.obstacles[i] = blocked;
        }
    }

    /// Packed illumination token at a tile. Out-of-bounds tiles read as dark.
    pub fn token_at(&self, pos: TilePos) -> u16 {
        self.index(pos).map_or(0, |i| self.illumination[i])
    }

    pub fn illumination_at(&self, pos: TilePos) -> Rgb {
        Rgb::unpack(self.token_at(pos))
    }

    /// Merges a contribution into a tile, keeping the brighter value per
    /// channel. Out-of-bounds writes are dropped.
    pub fn merge_illumination(&mut self, pos: TilePos, color: Rgb) {
        if let Some(i) = self.index(pos) {
            let current = Rgb::unpack(self.illumination[i]);
            self.illumination[i] = current.channel_max(color).pack();
        }
    }

    /// Overwrites a tile's illumination outright. Only the propagation origin
    /// write uses this; everything else merges.
    pub fn set_illumination(&mut self, pos: TilePos, color: Rgb) {
        if let Some(i) = self.index(pos) {
            self.illumination[i] = color.pack();
        }
    }

    /// Darkens every tile in the square `[center - radius, center + radius)`,
    /// clipped to the grid. The upper edge is exclusive.
    pub fn clear_square(&mut self, center: TilePos, radius: i32) {
        let lo_x = (center.0 - radius).max(0);
        let hi_x = (center.0 + radius).min(self.size as i32);
        let lo_y = (center.1 - radius).max(0);
        let hi_y = (center.1 + radius).min(self.size as i32);
        for y in lo_y..hi_y {
            for x in lo_x..hi_x {
                self.illumination[y as usize * self.size + x as usize] = 0;
            }
        }
    }

    /// Returns the grid to its initial state: no obstacles, no light.
    pub fn reset(&mut self) {
        self.obstacles.fill(false);
        self.illumination.fill(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let grid = WorldGrid::new(8);
        assert!(grid.in_bounds((0, 0)));
        assert!(grid.in_bounds((7, 7)));
        assert!(!grid.in_bounds((8, 0)));
        assert!(!grid.in_bounds((0, -1)));

        // Out-of-bounds reads are total
        assert!(!grid.is_obstacle((-3, 2)));
        assert_eq!(grid.illumination_at((100, 100)), Rgb::black());
    }

    #[test]
    fn test_merge_keeps_brighter_channels() {
        let mut grid = WorldGrid::new(4);
        grid.merge_illumination((1, 1), Rgb::new(10, 2, 0));
        grid.merge_illumination((1, 1), Rgb::new(3, 9, 1));
        assert_eq!(grid.illumination_at((1, 1)), Rgb::new(10, 9, 1));

        // A dimmer merge changes nothing
        grid.merge_illumination((1, 1), Rgb::new(1, 1, 1));
        assert_eq!(grid.illumination_at((1, 1)), Rgb::new(10, 9, 1));
    }

    #[test]
    fn test_set_overwrites() {
        let mut grid = WorldGrid::new(4);
        grid.merge_illumination((2, 2), Rgb::new(15, 15, 15));
        grid.set_illumination((2, 2), Rgb::new(1, 0, 0));
        assert_eq!(grid.illumination_at((2, 2)), Rgb::new(1, 0, 0));
    }

    #[test]
    fn test_clear_square_bounds() {
        let mut grid = WorldGrid::new(10);
        for y in 0..10 {
            for x in 0..10 {
                grid.merge_illumination((x, y), Rgb::new(5, 5, 5));
            }
        }
        grid.clear_square((5, 5), 2);

        // Low edge inclusive, high edge exclusive
        assert_eq!(grid.illumination_at((3, 3)), Rgb::black());
        assert_eq!(grid.illumination_at((6, 6)), Rgb::black());
        assert_eq!(grid.illumination_at((7, 7)), Rgb::new(5, 5, 5));
        assert_eq!(grid.illumination_at((2, 5)), Rgb::new(5, 5, 5));
    }

    #[test]
    fn test_clear_square_clips_at_edges() {
        let mut grid = WorldGrid::new(6);
        grid.merge_illumination((0, 0), Rgb::new(7, 7, 7));
        // Center near the corner; the window extends past the grid on two sides
        grid.clear_square((1, 1), 4);
        assert_eq!(grid.illumination_at((0, 0)), Rgb::black());
    }

    #[test]
    fn test_reset() {
        let mut grid = WorldGrid::new(5);
        grid.set_obstacle((2, 2), true);
        grid.merge_illumination((1, 1), Rgb::new(15, 0, 0));
        grid.reset();
        assert!(!grid.is_obstacle((2, 2)));
        assert_eq!(grid.illumination_at((1, 1)), Rgb::black());
    }
}
