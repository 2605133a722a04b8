//! Interactive lighting playground - paint obstacles and colored lights with
//! the mouse and watch the field relight incrementally

use log::info;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use thiserror::Error;

use crate::color::{MAX_BRIGHTNESS, Rgb};
use crate::render::{
    CURSOR_COLOR, DisplayColor, OBSTACLE_COLOR, TileCorners, corner_blend, display_color,
    smoothed_corners, to_byte,
};
use crate::sim::Simulation;
use crate::world::TilePos;

/// Backdrop behind the world when panned out of view.
const BACKGROUND: u32 = 0x0082_8282;

/// Errors surfaced by the playground window.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("failed to create window: {0}")]
    Create(minifb::Error),
    #[error("failed to present frame: {0}")]
    Present(minifb::Error),
}

/// Configuration for the interactive playground
#[derive(Clone)]
pub struct ViewerConfig {
    /// World size (tiles per side)
    pub world_size: usize,
    /// Pixels per tile edge
    pub tile_size: usize,
    /// Window dimensions in pixels; Space + drag pans to the rest of the world
    pub window_size: (usize, usize),
    /// Initial selector color
    pub selector: Rgb,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            world_size: 128,
            tile_size: 12,
            window_size: (960, 640),
            selector: Rgb::new(15, 15, 15), // full white
        }
    }
}

/// Paint color for newly placed lights, adjusted channel-wise from the
/// keyboard and clamped to the 4-bit range.
pub struct Selector {
    r: u8,
    g: u8,
    b: u8,
}

impl Selector {
    pub fn new(initial: Rgb) -> Self {
        Selector {
            r: initial.r,
            g: initial.g,
            b: initial.b,
        }
    }

    pub fn color(&self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }

    pub fn adjust_all(&mut self, delta: i32) {
        self.adjust_red(delta);
        self.adjust_green(delta);
        self.adjust_blue(delta);
    }

    pub fn adjust_red(&mut self, delta: i32) {
        self.r = nudge(self.r, delta);
    }

    pub fn adjust_green(&mut self, delta: i32) {
        self.g = nudge(self.g, delta);
    }

    pub fn adjust_blue(&mut self, delta: i32) {
        self.b = nudge(self.b, delta);
    }
}

#[inline]
fn nudge(value: u8, delta: i32) -> u8 {
    (value as i32 + delta).clamp(0, MAX_BRIGHTNESS as i32) as u8
}

/// Playground window around a [`Simulation`].
pub struct InteractiveViewer {
    config: ViewerConfig,
    sim: Simulation,
    selector: Selector,
    window: Window,
    buffer: Vec<u32>,
    offset: (f32, f32),
    last_mouse: Option<(f32, f32)>,
    hover: Option<TilePos>,
}

impl InteractiveViewer {
    /// Create a new playground window with the given configuration
    pub fn new(config: ViewerConfig) -> Result<Self, ViewerError> {
        let (window_w, window_h) = config.window_size;
        let window = Window::new(
            "Lighting Playground (ESC to exit)",
            window_w,
            window_h,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )
        .map_err(ViewerError::Create)?;

        let sim = Simulation::new(config.world_size);
        let selector = Selector::new(config.selector);
        let buffer = vec![0u32; window_w * window_h];

        Ok(Self {
            config,
            sim,
            selector,
            window,
            buffer,
            offset: (0.0, 0.0),
            last_mouse: None,
            hover: None,
        })
    }

    /// Run the playground loop: edits, drain, draw.
    pub fn run(&mut self) -> Result<(), ViewerError> {
        // Limit to ~60fps
        self.window.set_target_fps(60);

        println!("=== Lighting Playground ===");
        println!("Controls:");
        println!("  Click            - Place obstacle");
        println!("  Shift+Click      - Remove obstacle");
        println!("  Ctrl+Click       - Place light (selector color)");
        println!("  Ctrl+Shift+Click - Remove light");
        println!("  Up/Down          - Selector brightness, all channels");
        println!("  R/G/B + Up/Down  - Selector, single channel");
        println!("  Space + Drag     - Pan");
        println!("  C                - Clear world");
        println!("  ESC              - Exit");
        println!();
        info!(
            "playground: {0}x{0} tiles, {1}px tiles",
            self.config.world_size, self.config.tile_size
        );

        while self.window.is_open() && !self.window.is_key_down(Key::Escape) {
            self.handle_keys();
            self.handle_mouse();
            self.sim.drain();
            self.render_frame();

            let (window_w, window_h) = self.config.window_size;
            self.window
                .update_with_buffer(&self.buffer, window_w, window_h)
                .map_err(ViewerError::Present)?;
        }

        Ok(())
    }

    fn handle_keys(&mut self) {
        if self.window.is_key_pressed(Key::C, KeyRepeat::No) {
            self.sim.reset();
            println!("World cleared");
        }

        let up = self.window.is_key_pressed(Key::Up, KeyRepeat::No);
        let down = self.window.is_key_pressed(Key::Down, KeyRepeat::No);
        for (pressed, delta) in [(up, 1), (down, -1)] {
            if !pressed {
                continue;
            }
            let red = self.window.is_key_down(Key::R);
            let green = self.window.is_key_down(Key::G);
            let blue = self.window.is_key_down(Key::B);
            if !red && !green && !blue {
                self.selector.adjust_all(delta);
            } else {
                if red {
                    self.selector.adjust_red(delta);
                }
                if green {
                    self.selector.adjust_green(delta);
                }
                if blue {
                    self.selector.adjust_blue(delta);
                }
            }
            let color = self.selector.color();
            println!("Selector: ({}, {}, {})", color.r, color.g, color.b);
        }
    }

    fn handle_mouse(&mut self) {
        let Some((mouse_x, mouse_y)) = self.window.get_mouse_pos(MouseMode::Discard) else {
            self.last_mouse = None;
            self.hover = None;
            return;
        };

        if self.window.is_key_down(Key::Space) {
            if let Some((last_x, last_y)) = self.last_mouse {
                self.offset.0 += mouse_x - last_x;
                self.offset.1 += mouse_y - last_y;
            }
        }
        self.last_mouse = Some((mouse_x, mouse_y));

        let tile = self.tile_under((mouse_x, mouse_y));
        self.hover = Some(tile).filter(|&pos| self.sim.grid().in_bounds(pos));

        if self.window.get_mouse_down(MouseButton::Left) {
            let Some(pos) = self.hover else {
                return;
            };
            // Held edits repeat every frame; the operations no-op on
            // duplicates, so dragging paints.
            let ctrl = self.window.is_key_down(Key::LeftCtrl);
            let shift = self.window.is_key_down(Key::LeftShift);
            match (ctrl, shift) {
                (true, true) => self.sim.remove_light(pos),
                (true, false) => self.sim.place_light(pos, self.selector.color()),
                (false, true) => self.sim.remove_obstacle(pos),
                (false, false) => self.sim.place_obstacle(pos),
            }
        }
    }

    /// Tile under a window-space point, given the current pan offset.
    fn tile_under(&self, (mouse_x, mouse_y): (f32, f32)) -> TilePos {
        let tile = self.config.tile_size as f32;
        let x = ((mouse_x - self.offset.0) / tile).floor() as i32;
        let y = ((mouse_y - self.offset.1) / tile).floor() as i32;
        (x, y)
    }

    fn render_frame(&mut self) {
        let (window_w, window_h) = self.config.window_size;
        let tile = self.config.tile_size;
        let size = self.config.world_size as i32;

        self.buffer.fill(BACKGROUND);

        let corners = smoothed_corners(self.sim.grid());

        // Tile range intersecting the window under the current pan
        let first_x = ((-self.offset.0 / tile as f32).floor() as i32).max(0);
        let first_y = ((-self.offset.1 / tile as f32).floor() as i32).max(0);
        let last_x = (((window_w as f32 - self.offset.0) / tile as f32).ceil() as i32).min(size);
        let last_y = (((window_h as f32 - self.offset.1) / tile as f32).ceil() as i32).min(size);

        for y in first_y..last_y {
            for x in first_x..last_x {
                // Cursor highlight first so obstacles stay visible under it
                let mut quad = corners[y as usize * size as usize + x as usize];
                if self.hover == Some((x, y)) {
                    quad = [CURSOR_COLOR; 4];
                }
                if self.sim.is_obstacle((x, y)) {
                    quad = [OBSTACLE_COLOR; 4];
                }
                self.blit_tile(x, y, &quad);
            }
        }

        self.draw_swatch();
    }

    /// Rasterizes one tile as a bilinear gradient across its corner colors.
    fn blit_tile(&mut self, x: i32, y: i32, corners: &TileCorners) {
        let (window_w, window_h) = self.config.window_size;
        let tile = self.config.tile_size;
        let base_x = (self.offset.0 + (x * tile as i32) as f32).floor() as i32;
        let base_y = (self.offset.1 + (y * tile as i32) as f32).floor() as i32;

        for sub_y in 0..tile {
            let py = base_y + sub_y as i32;
            if py < 0 || py >= window_h as i32 {
                continue;
            }
            let v = sub_y as f32 / tile as f32;
            for sub_x in 0..tile {
                let px = base_x + sub_x as i32;
                if px < 0 || px >= window_w as i32 {
                    continue;
                }
                let u = sub_x as f32 / tile as f32;
                let blended = corner_blend(corners, u, v);
                self.buffer[py as usize * window_w + px as usize] = pack_pixel(blended);
            }
        }
    }

    /// Selector swatch in the top-left corner.
    fn draw_swatch(&mut self) {
        let (window_w, window_h) = self.config.window_size;
        let pixel = pack_pixel(display_color(self.selector.color()));
        for py in 4..52usize.min(window_h) {
            for px in 4..52usize.min(window_w) {
                self.buffer[py * window_w + px] = pixel;
            }
        }
    }
}

/// Convert a display color to minifb's 0RGB pixel format
#[inline]
fn pack_pixel(color: DisplayColor) -> u32 {
    ((to_byte(color[0]) as u32) << 16) | ((to_byte(color[1]) as u32) << 8) | to_byte(color[2]) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_clamps() {
        let mut selector = Selector::new(Rgb::new(15, 15, 15));
        selector.adjust_all(1);
        assert_eq!(selector.color(), Rgb::new(15, 15, 15));

        selector.adjust_all(-1);
        assert_eq!(selector.color(), Rgb::new(14, 14, 14));

        let mut selector = Selector::new(Rgb::new(0, 7, 0));
        selector.adjust_red(-1);
        selector.adjust_green(1);
        assert_eq!(selector.color(), Rgb::new(0, 8, 0));
    }

    #[test]
    fn test_pack_pixel_layout() {
        assert_eq!(pack_pixel([1.0, 0.0, 0.0]), 0x00FF_0000);
        assert_eq!(pack_pixel([0.0, 1.0, 0.0]), 0x0000_FF00);
        assert_eq!(pack_pixel([0.0, 0.0, 1.0]), 0x0000_00FF);
    }
}
