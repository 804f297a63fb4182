use serde::{Deserialize, Serialize};

use crate::*;

/// Resolves a pointer position to the card under it.
pub trait HitTest {
    fn hit(&self, point: (f32, f32)) -> Option<Coord2>;
}

/// Flat table layout: cards on a regular grid centred in the viewport, row 0
/// at the bottom, looked at through an orthographic camera.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    pub board_size: Coord2,
    pub viewport: (f32, f32),
    /// Distance between neighbouring card centres.
    pub tile: (f32, f32),
    pub card_half_extents: (f32, f32),
}

impl GridLayout {
    pub fn new(board_size: Coord2, viewport: (f32, f32)) -> Self {
        Self {
            board_size,
            viewport,
            tile: (145.5, 212.0),
            card_half_extents: (65.0, 97.0),
        }
    }

    /// World-space position of the bottom-left card centre.
    fn origin(&self) -> (f32, f32) {
        let (rows, cols) = self.board_size;
        let (width, height) = self.viewport;
        let (tile_w, tile_h) = self.tile;
        (
            width / 2.0 - tile_w * f32::from(cols.saturating_sub(1)) / 2.0,
            height / 2.0 - tile_h * f32::from(rows.saturating_sub(1)) / 2.0,
        )
    }

    pub fn card_center(&self, (row, col): Coord2) -> (f32, f32) {
        let (x0, y0) = self.origin();
        (
            x0 + self.tile.0 * f32::from(col),
            y0 + self.tile.1 * f32::from(row),
        )
    }

    /// Hit test in world space (origin bottom-left).
    pub fn hit_world(&self, (x, y): (f32, f32)) -> Option<Coord2> {
        let (x0, y0) = self.origin();
        let col = nearest_slot(x - x0, self.tile.0, self.board_size.1)?;
        let row = nearest_slot(y - y0, self.tile.1, self.board_size.0)?;

        let (cx, cy) = self.card_center((row, col));
        let (hx, hy) = self.card_half_extents;
        ((-hx..=hx).contains(&(x - cx)) && (-hy..=hy).contains(&(y - cy))).then_some((row, col))
    }
}

impl HitTest for GridLayout {
    /// `point` is a window cursor position, origin top-left.
    fn hit(&self, (x, y): (f32, f32)) -> Option<Coord2> {
        self.hit_world((x, self.viewport.1 - y))
    }
}

/// Index of the grid slot whose centre is closest to `offset`.
fn nearest_slot(offset: f32, spacing: f32, count: Coord) -> Option<Coord> {
    if !offset.is_finite() || spacing <= 0.0 {
        return None;
    }
    let slot = offset / spacing + 0.5;
    if slot < 0.0 || slot >= f32::from(count) {
        return None;
    }
    Some(slot as Coord)
}
