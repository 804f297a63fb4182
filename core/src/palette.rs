use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Linear RGB.
pub type Color = [f32; 3];

/// Colour of every card back.
pub const CARD_BACK_COLOR: Color = [0.976_470_6, 0.478_431_37, 0.0];

/// Keeps palette draws apart from the shuffle draws of the same seed.
const PALETTE_STREAM: u64 = 0xC0_10_55;

/// Face colour of each card type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    faces: Vec<Color>,
}

impl Palette {
    pub fn from_colors(faces: Vec<Color>) -> Self {
        Self { faces }
    }

    /// One uniformly random colour per pair, reproducible from `seed`.
    pub fn random(pair_count: CellCount, seed: u64) -> Self {
        use rand::prelude::*;

        let mut rng = SmallRng::seed_from_u64(seed ^ PALETTE_STREAM);
        let faces = (0..pair_count)
            .map(|_| [rng.random(), rng.random(), rng.random()])
            .collect();
        Self { faces }
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Face colour of `kind`, the back colour for types without one.
    pub fn face(&self, kind: CardType) -> Color {
        self.faces
            .get(usize::from(kind))
            .copied()
            .unwrap_or(CARD_BACK_COLOR)
    }
}
