//! Pending-recompute queue.
//!
//! Edits never relight the world directly; they enqueue light coordinates
//! here and the next drain recomputes them in arrival order. A companion set
//! suppresses duplicates so a light invalidated by several edits in one frame
//! is only recomputed once.

use std::collections::{HashSet, VecDeque};

use crate::color::MAX_BRIGHTNESS;
use crate::lights::LightRegistry;
use crate::world::TilePos;

/// Half-size of the region-invalidation window: twice the maximum brightness,
/// so any light whose falloff disk can touch the edited tile gets rescanned.
pub const SEARCH_RADIUS: i32 = 2 * MAX_BRIGHTNESS as i32;

#[derive(Default)]
pub struct LightQueue {
    pending: VecDeque<TilePos>,
    queued: HashSet<TilePos>,
}

impl LightQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a light coordinate unless it is already pending. Returns
    /// whether the coordinate was actually added.
    pub fn push(&mut self, pos: TilePos) -> bool {
        if self.queued.insert(pos) {
            self.pending.push_back(pos);
            true
        } else {
            false
        }
    }

    pub fn pop(&mut self) -> Option<TilePos> {
        let pos = self.pending.pop_front()?;
        self.queued.remove(&pos);
        Some(pos)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.queued.clear();
    }

    /// Scans the square window `[center - radius, center + radius)`, clipped
    /// to the world, and enqueues every registered light inside it. Columns
    /// are scanned in x-major order, matching the relight order players see.
    pub fn mark_region(
        &mut self,
        lights: &LightRegistry,
        world_size: usize,
        center: TilePos,
        radius: i32,
    ) {
        let lo_x = (center.0 - radius).max(0);
        let hi_x = (center.0 + radius).min(world_size as i32);
        let lo_y = (center.1 - radius).max(0);
        let hi_y = (center.1 + radius).min(world_size as i32);
        for x in lo_x..hi_x {
            for y in lo_y..hi_y {
                if lights.contains((x, y)) {
                    self.push((x, y));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgb;

    #[test]
    fn test_fifo_order() {
        let mut queue = LightQueue::new();
        queue.push((1, 1));
        queue.push((2, 2));
        queue.push((3, 3));
        assert_eq!(queue.pop(), Some((1, 1)));
        assert_eq!(queue.pop(), Some((2, 2)));
        assert_eq!(queue.pop(), Some((3, 3)));
        assert_eq!(queue.pop(), None);
    }

    #[test]
    fn test_duplicate_suppression() {
        let mut queue = LightQueue::new();
        assert!(queue.push((5, 5)));
        assert!(!queue.push((5, 5)));
        assert_eq!(queue.len(), 1);

        // Once popped, the coordinate may queue again
        assert_eq!(queue.pop(), Some((5, 5)));
        assert!(queue.push((5, 5)));
    }

    #[test]
    fn test_mark_region_window() {
        let mut lights = LightRegistry::new();
        lights.insert((0, 0), Rgb::new(15, 0, 0));
        lights.insert((29, 29), Rgb::new(0, 15, 0));
        lights.insert((30, 30), Rgb::new(0, 0, 15));
        lights.insert((40, 5), Rgb::new(7, 7, 7));

        let mut queue = LightQueue::new();
        queue.mark_region(&lights, 64, (0, 0), SEARCH_RADIUS);

        // Window is [-30, 30) clipped to [0, 30): the tile at 30 is outside
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop(), Some((0, 0)));
        assert_eq!(queue.pop(), Some((29, 29)));
    }

    #[test]
    fn test_mark_region_skips_already_pending() {
        let mut lights = LightRegistry::new();
        lights.insert((2, 2), Rgb::new(15, 15, 15));

        let mut queue = LightQueue::new();
        queue.push((2, 2));
        queue.mark_region(&lights, 16, (2, 2), SEARCH_RADIUS);
        assert_eq!(queue.len(), 1);
    }
}
