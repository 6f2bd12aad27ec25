//! Drawing surface abstraction
//!
//! The simulation never touches the canvas directly. Entities paint through
//! the `Surface` trait; the browser build implements it for the 2D canvas
//! context, tests use `RecordingSurface`.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod recording;
pub mod scoreboard;

pub use recording::{DrawCall, RecordingSurface};
pub use scoreboard::paint_scoreboard;

use crate::sim::World;

/// Minimal fill-only 2D drawing capability
pub trait Surface {
    /// Push the current style state
    fn save(&mut self);
    /// Pop back to the last saved style state
    fn restore(&mut self);
    fn set_fill_style(&mut self, colour: &str);
    fn set_font(&mut self, font: &str);
    fn clear(&mut self, width: f32, height: f32);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32);
    fn fill_text(&mut self, text: &str, x: f32, y: f32);
}

/// Clear the play surface and draw every active entity in list order
pub fn paint_world(world: &World, surface: &mut dyn Surface) {
    let size = world.bounds();
    surface.clear(size.x, size.y);
    surface.save();
    surface.set_fill_style(&world.settings().background_colour);
    surface.fill_rect(0.0, 0.0, size.x, size.y);
    surface.restore();
    for entity in world.entities() {
        entity.draw(surface);
    }
}
