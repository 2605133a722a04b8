//! Registry of active light sources.
//!
//! The registry is the authority on which tiles hold lights and what color
//! they are. The propagation engine only reads it; all mutation goes through
//! the simulation's edit operations so the light/obstacle exclusivity rule
//! stays enforced in one place.

use std::collections::HashMap;

use crate::color::Rgb;
use crate::world::TilePos;

#[derive(Default)]
pub struct LightRegistry {
    lights: HashMap<TilePos, Rgb>,
}

impl LightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pos: TilePos) -> Option<Rgb> {
        self.lights.get(&pos).copied()
    }

    pub fn contains(&self, pos: TilePos) -> bool {
        self.lights.contains_key(&pos)
    }

    pub fn insert(&mut self, pos: TilePos, color: Rgb) {
        self.lights.insert(pos, color);
    }

    pub fn remove(&mut self, pos: TilePos) -> Option<Rgb> {
        self.lights.remove(&pos)
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn clear(&mut self) {
        self.lights.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_remove() {
        let mut lights = LightRegistry::new();
        lights.insert((3, 4), Rgb::new(15, 0, 7));
        assert!(lights.contains((3, 4)));
        assert_eq!(lights.get((3, 4)), Some(Rgb::new(15, 0, 7)));

        assert_eq!(lights.remove((3, 4)), Some(Rgb::new(15, 0, 7)));
        assert!(!lights.contains((3, 4)));
        assert_eq!(lights.remove((3, 4)), None);
    }

    #[test]
    fn test_clear() {
        let mut lights = LightRegistry::new();
        lights.insert((0, 0), Rgb::new(1, 2, 3));
        lights.insert((5, 5), Rgb::new(4, 5, 6));
        assert_eq!(lights.len(), 2);
        lights.clear();
        assert!(lights.is_empty());
    }
}
