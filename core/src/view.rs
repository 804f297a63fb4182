use serde::{Deserialize, Serialize};

use crate::*;

/// Hermite ease used for the flip rotation and the face colour blend.
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Everything a renderer needs to draw one card this frame.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CardView {
    pub coords: Coord2,
    pub kind: CardType,
    pub phase: CardPhase,
    pub progress: f32,
    /// Eased progress, 0 shows the back colour and 1 the face colour.
    pub blend: f32,
    pub shows_face: bool,
    /// Rotation around the vertical axis.
    pub rotation_degrees: f32,
    pub face_color: Color,
    /// Colour to draw this frame, the face once it shows and the back before.
    pub color: Color,
}

impl CardView {
    pub fn new(coords: Coord2, card: &Card, timing: FlipTiming, palette: &Palette) -> Self {
        let blend = smoothstep(card.progress());
        let face_color = palette.face(card.kind());
        Self {
            coords,
            kind: card.kind(),
            phase: card.phase(),
            progress: card.progress(),
            blend,
            shows_face: card.shows_face(),
            rotation_degrees: blend * timing.max_angle,
            face_color,
            color: if card.shows_face() {
                face_color
            } else {
                CARD_BACK_COLOR
            },
        }
    }
}

/// Views of every card still on the table; locked cards are left out.
pub fn card_views<'a>(
    board: &'a Board,
    timing: FlipTiming,
    palette: &'a Palette,
) -> impl Iterator<Item = CardView> + 'a {
    board
        .iter()
        .filter(|(_, card)| !card.is_locked())
        .map(move |(coords, card)| CardView::new(coords, card, timing, palette))
}
