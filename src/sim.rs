//! Simulation aggregate: world, lights, pending queue and the propagator,
//! behind the edit operations the playground drives.
//!
//! Edits validate, update authoritative state and enqueue invalidated lights;
//! nothing is relit until [`Simulation::drain`] runs. All methods take `&mut
//! self`, so a simulation is single-threaded by construction.

use std::time::Instant;

use log::debug;

use crate::color::{MAX_BRIGHTNESS, Rgb};
use crate::lights::LightRegistry;
use crate::propagation::Propagator;
use crate::queue::{LightQueue, SEARCH_RADIUS};
use crate::world::{TilePos, WorldGrid};

pub struct Simulation {
    grid: WorldGrid,
    lights: LightRegistry,
    queue: LightQueue,
    propagator: Propagator,
}

impl Simulation {
    pub fn new(world_size: usize) -> Self {
        Simulation {
            grid: WorldGrid::new(world_size),
            lights: LightRegistry::new(),
            queue: LightQueue::new(),
            propagator: Propagator::new(),
        }
    }

    // ========================================================================
    // Read access
    // ========================================================================

    pub fn grid(&self) -> &WorldGrid {
        &self.grid
    }

    pub fn illumination_at(&self, pos: TilePos) -> Rgb {
        self.grid.illumination_at(pos)
    }

    pub fn is_obstacle(&self, pos: TilePos) -> bool {
        self.grid.is_obstacle(pos)
    }

    pub fn has_light(&self, pos: TilePos) -> bool {
        self.lights.contains(pos)
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Lights waiting for the next drain.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    // ========================================================================
    // Edit operations
    // ========================================================================

    /// Registers a light and queues it for computation. No-op when the tile
    /// is out of bounds, blocked by an obstacle, or already holds a light.
    pub fn place_light(&mut self, pos: TilePos, color: Rgb) {
        if !self.grid.in_bounds(pos) || self.grid.is_obstacle(pos) || self.lights.contains(pos) {
            return;
        }
        self.lights.insert(pos, color);
        self.queue.push(pos);
    }

    /// Removes a light: darkens the square its falloff could have reached,
    /// then queues every remaining light near the hole so the next drain
    /// repaints it. No-op when no light is registered at `pos`. A pending
    /// queue entry for the removed light is left in place; the drain skips
    /// coordinates that no longer hold a light.
    pub fn remove_light(&mut self, pos: TilePos) {
        let Some(color) = self.lights.remove(pos) else {
            return;
        };
        self.grid.clear_square(pos, color.peak() as i32);
        self.mark_region(pos);
    }

    /// Blocks a tile. An existing light on the tile is evicted first, and
    /// the surrounding illumination is rebuilt from scratch: cleared out to
    /// the maximum possible falloff, then every nearby light requeued.
    pub fn place_obstacle(&mut self, pos: TilePos) {
        if !self.grid.in_bounds(pos) || self.grid.is_obstacle(pos) {
            return;
        }
        self.grid.set_obstacle(pos, true);
        self.lights.remove(pos);
        self.grid.clear_square(pos, MAX_BRIGHTNESS as i32);
        self.mark_region(pos);
    }

    /// Unblocks a tile and requeues nearby lights; their next recompute can
    /// now seed through it. Illumination is not cleared, the channel-max
    /// merge only ever brightens.
    pub fn remove_obstacle(&mut self, pos: TilePos) {
        if !self.grid.in_bounds(pos) || !self.grid.is_obstacle(pos) {
            return;
        }
        self.grid.set_obstacle(pos, false);
        self.mark_region(pos);
    }

    /// Clears everything: obstacles, lights, illumination and any pending
    /// queue entries.
    pub fn reset(&mut self) {
        self.grid.reset();
        self.lights.clear();
        self.queue.clear();
    }

    fn mark_region(&mut self, center: TilePos) {
        self.queue
            .mark_region(&self.lights, self.grid.size(), center, SEARCH_RADIUS);
    }

    // ========================================================================
    // Drain
    // ========================================================================

    /// Recomputes the lights queued at the moment the call starts and returns
    /// how many were recomputed. Exactly `pending()` entries are popped, so a
    /// recompute enqueueing further work never extends the current pass.
    /// Stale entries whose light is gone are popped and skipped.
    pub fn drain(&mut self) -> usize {
        let batch = self.queue.len();
        if batch == 0 {
            return 0;
        }

        let started = Instant::now();
        let mut recomputed = 0;
        for _ in 0..batch {
            let Some(pos) = self.queue.pop() else {
                break;
            };
            if self.lights.contains(pos) {
                self.propagator.recompute(&mut self.grid, &self.lights, pos);
                recomputed += 1;
            }
        }

        debug!(
            "lighting pass: {recomputed} of {batch} queued lights in {:.3}ms",
            started.elapsed().as_secs_f64() * 1000.0
        );
        recomputed
    }
}
