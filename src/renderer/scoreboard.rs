//! Score board painting
//!
//! A separate strip above the play surface showing score and balls left.

use super::Surface;
use crate::consts::{SCOREBOARD_HEIGHT, SCOREBOARD_WIDTH};
use crate::sim::World;

const FONT: &str = "bold 28px sans-serif";
const TEXT_BASELINE: f32 = 40.0;
const TEXT_INSET: f32 = 20.0;

/// Paint the score board for the current world
pub fn paint_scoreboard(world: &World, surface: &mut dyn Surface) {
    let settings = world.settings();

    surface.clear(SCOREBOARD_WIDTH, SCOREBOARD_HEIGHT);
    surface.save();
    surface.set_fill_style(&settings.background_colour);
    surface.fill_rect(0.0, 0.0, SCOREBOARD_WIDTH, SCOREBOARD_HEIGHT);

    surface.set_fill_style(&settings.text_colour);
    surface.set_font(FONT);
    surface.fill_text(&format!("Score: {}", world.score), TEXT_INSET, TEXT_BASELINE);
    surface.fill_text(
        &format!("Balls: {}", world.balls_remaining),
        SCOREBOARD_WIDTH * 0.75,
        TEXT_BASELINE,
    );
    if world.is_over() {
        surface.fill_text("Game over", SCOREBOARD_WIDTH * 0.4, TEXT_BASELINE);
    }
    surface.restore();
}
