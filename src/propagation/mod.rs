//! Propagation engine: recomputes a single light's falloff footprint and
//! merges it into the illumination field.
//!
//! A recompute runs four quadrant sweeps around the light, one per axis-sign
//! pair. Each sweep seeds a scratch window with the light's own color, blends
//! every cell against its already-processed column and row neighbors, applies
//! radial falloff, and channel-max merges the result into the world. Other
//! lights are never consulted beyond the fast-path check below, so footprints
//! are independent and recompute order does not matter away from source tiles.

mod quadrant;

use crate::color::Rgb;
use crate::lights::LightRegistry;
use crate::world::{TilePos, WorldGrid};

/// Axis sign pairs for the four quadrant sweeps, in the order they run.
const QUADRANT_SIGNS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Recompute engine. Owns the scratch window so repeated recomputes reuse
/// one allocation.
pub struct Propagator {
    scratch: Vec<u16>,
}

impl Propagator {
    pub fn new() -> Self {
        Propagator {
            scratch: vec![0; quadrant::SCRATCH_SIDE * quadrant::SCRATCH_SIDE],
        }
    }

    /// Recomputes the light registered at `pos`. Coordinates without a
    /// registered light (stale queue entries) are ignored.
    ///
    /// Fast path: when all four axis neighbors hold lights of exactly the
    /// same color, the interior of a uniform cluster is already saturated and
    /// only the light's own tile is merged. An absent neighbor counts as
    /// black; diagonal neighbors are not consulted.
    pub fn recompute(&mut self, grid: &mut WorldGrid, lights: &LightRegistry, pos: TilePos) {
        let Some(own) = lights.get(pos) else {
            return;
        };

        let (x, y) = pos;
        let uniform = [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)]
            .into_iter()
            .all(|neighbor| lights.get(neighbor).unwrap_or(Rgb::black()) == own);
        if uniform {
            grid.merge_illumination(pos, own);
            return;
        }

        for &(sign_x, sign_y) in &QUADRANT_SIGNS {
            self.scratch.fill(0);
            quadrant::sweep(grid, &mut self.scratch, pos, own, sign_x, sign_y);
        }
    }
}

impl Default for Propagator {
    fn default() -> Self {
        Self::new()
    }
}
