//! One quadrant pass of a light's falloff sweep.
//!
//! The sweep walks quadrant-local offsets `(dx, dy)` outward from the light,
//! column-major. Every visited cell sees its column neighbor `(dx-1, dy)` and
//! row neighbor `(dx, dy-1)` already processed, which is what lets obstacle
//! gaps in the scratch window pull down everything in their diffusion wake.

use crate::color::{MAX_BRIGHTNESS, Rgb};
use crate::world::{TilePos, WorldGrid};

/// Scratch window side. Quadrant-local offsets stay below the light's peak
/// channel, which never exceeds this.
pub(super) const SCRATCH_SIDE: usize = MAX_BRIGHTNESS as usize;

/// Runs one quadrant sweep: seed, diffuse, fade, merge.
///
/// `scratch` must be `SCRATCH_SIDE * SCRATCH_SIDE` packed tokens, zeroed by
/// the caller. Out-of-bounds cells are skipped entirely, leaving their
/// scratch slots dark for later neighbors to sample.
pub(super) fn sweep(
    grid: &mut WorldGrid,
    scratch: &mut [u16],
    origin: TilePos,
    own: Rgb,
    sign_x: i32,
    sign_y: i32,
) {
    let reach = own.peak() as i32;
    for dx in 0..reach {
        for dy in 0..reach {
            let tile = (origin.0 + sign_x * dx, origin.1 + sign_y * dy);
            if !grid.in_bounds(tile) {
                continue;
            }

            // Obstacles keep their scratch slot dark instead of seeding.
            if !grid.is_obstacle(tile) {
                scratch[scratch_index(dx, dy)] = own.pack();
            }

            if dx == 0 && dy == 0 {
                // The light's own tile is written outright, not merged.
                grid.set_illumination(tile, own);
            } else {
                let sampled = Rgb::unpack(scratch[scratch_index(dx, dy)]);
                let col_dx = if dx == 0 { dx } else { dx - 1 };
                let row_dy = if dy == 0 { dy } else { dy - 1 };
                let col = Rgb::unpack(scratch[scratch_index(col_dx, dy)]);
                let row = Rgb::unpack(scratch[scratch_index(dx, row_dy)]);
                let rx = col.ratio(own);
                let ry = row.ratio(own);
                let wx = dx as f32;
                let wy = dy as f32;
                let blended = Rgb::new(
                    diffuse(sampled.r, wx, wy, rx.0, ry.0),
                    diffuse(sampled.g, wx, wy, rx.1, ry.1),
                    diffuse(sampled.b, wx, wy, rx.2, ry.2),
                );
                scratch[scratch_index(dx, dy)] = blended.pack();
            }

            let carried = Rgb::unpack(scratch[scratch_index(dx, dy)]);
            let factor = 1.0 - distance(dx, dy) / reach as f32;
            let faded = Rgb::new(
                fade(carried.r, factor),
                fade(carried.g, factor),
                fade(carried.b, factor),
            );
            grid.merge_illumination(tile, faded);
        }
    }
}

// ============================================================================
// Per-channel helpers
// ============================================================================

#[inline]
fn scratch_index(dx: i32, dy: i32) -> usize {
    dy as usize * SCRATCH_SIDE + dx as usize
}

/// Distance-weighted blend of the column and row brightness ratios, floored.
/// `wx + wy` is never zero here; the origin takes the direct-write branch.
#[inline]
fn diffuse(channel: u8, wx: f32, wy: f32, rx: f32, ry: f32) -> u8 {
    (channel as f32 * ((wx * rx + wy * ry) / (wx + wy))).floor() as u8
}

/// Radial falloff, rounded to nearest. The factor goes negative on the far
/// diagonal where distance exceeds `reach`; the saturating cast turns those
/// contributions into zero.
#[inline]
fn fade(channel: u8, factor: f32) -> u8 {
    (channel as f32 * factor).round() as u8
}

/// Euclidean distance from the quadrant origin.
#[inline]
fn distance(dx: i32, dy: i32) -> f32 {
    ((dx * dx + dy * dy) as f32).sqrt()
}
