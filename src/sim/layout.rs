//! Brick layout generation
//!
//! Rows are stacked from the top edge, one per configured colour. The top row
//! is worth the most: row `r` of `n` scores `n - r` points.

use glam::Vec2;

use super::entity::{Brick, EntityId};
use crate::consts::{BRICK_ROW_SPACING, BRICK_SPACING};
use crate::settings::BrickLayout;

/// Build one full brick set spanning `row_width`.
///
/// `next_id` is called once per brick, in row-major order.
pub fn generate_bricks(
    layout: &BrickLayout,
    row_width: f32,
    mut next_id: impl FnMut() -> EntityId,
) -> Vec<Brick> {
    let rows = layout.colours.len() as u32;
    let per_row = layout.bricks_per_row.max(1);
    let brick_width = row_width / per_row as f32 / BRICK_SPACING;
    let mut bricks = Vec::with_capacity((rows * per_row) as usize);

    for (row, colour) in layout.colours.iter().enumerate() {
        let y = row as f32 * layout.row_height * BRICK_ROW_SPACING + BRICK_ROW_SPACING;
        let points = rows - row as u32;
        for i in 0..per_row {
            let x = i as f32 * brick_width * BRICK_SPACING + BRICK_SPACING;
            bricks.push(Brick::new(
                next_id(),
                Vec2::new(x, y),
                brick_width,
                layout.row_height,
                colour.clone(),
                points,
            ));
        }
    }

    log::debug!(
        "Generated {} bricks ({} rows x {})",
        bricks.len(),
        rows,
        per_row
    );
    bricks
}
