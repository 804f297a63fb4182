#![no_std]

extern crate alloc;

use alloc::vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use card::*;
pub use error::*;
pub use generator::*;
pub use layout::*;
pub use palette::*;
pub use selection::*;
pub use session::*;
pub use types::*;
pub use view::*;

mod board;
mod card;
mod error;
mod generator;
mod layout;
mod palette;
mod selection;
mod session;
mod types;
mod view;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub size: Coord2,
}

impl BoardConfig {
    pub const fn new_unchecked(size: Coord2) -> Self {
        Self { size }
    }

    /// Checks that the board has cells and that they can all be paired.
    pub fn new(size: Coord2) -> Result<Self> {
        let config = Self::new_unchecked(size);
        if config.total_cards() == 0 {
            Err(GameError::EmptyBoard)
        } else if config.total_cards() % 2 != 0 {
            Err(GameError::OddCardCount)
        } else {
            Ok(config)
        }
    }

    pub const fn rows(&self) -> Coord {
        self.size.0
    }

    pub const fn cols(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cards(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn pair_count(&self) -> CellCount {
        self.total_cards() / 2
    }
}

impl Default for BoardConfig {
    /// A 52 card table.
    fn default() -> Self {
        Self::new_unchecked((4, 13))
    }
}

/// Card types for every cell, each type present on exactly two cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    kinds: Array2<CardType>,
}

impl Deal {
    pub(crate) fn from_kind_grid_unchecked(kinds: Array2<CardType>) -> Self {
        Self { kinds }
    }

    /// Builds a deal from row-major `kinds`, checking the shape and that type
    /// ids `0..pairs` each appear exactly twice.
    pub fn from_kinds(size: Coord2, kinds: &[CardType]) -> Result<Self> {
        let config = BoardConfig::new(size)?;
        if kinds.len() != usize::from(config.total_cards()) {
            return Err(GameError::InvalidBoardShape);
        }

        check_pair_balance(kinds.iter().copied(), config.pair_count())?;

        let kinds = Array2::from_shape_vec(size.to_nd_index(), kinds.to_vec())
            .map_err(|_| GameError::InvalidBoardShape)?;
        Ok(Self::from_kind_grid_unchecked(kinds))
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.kinds.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn board_config(&self) -> BoardConfig {
        BoardConfig::new_unchecked(self.size())
    }

    pub fn kind_at(&self, coords: Coord2) -> CardType {
        self.kinds[coords.to_nd_index()]
    }

    /// Where the partner of the card at `coords` lies.
    pub fn partner_of(&self, coords: Coord2) -> Option<Coord2> {
        let kind = self.kind_at(coords);
        iter_coords(self.size()).find(|&other| other != coords && self.kind_at(other) == kind)
    }

    pub(crate) fn kinds(&self) -> &Array2<CardType> {
        &self.kinds
    }
}

/// Checks that type ids `0..pair_count` each appear exactly twice in `kinds`.
pub(crate) fn check_pair_balance(
    kinds: impl IntoIterator<Item = CardType>,
    pair_count: CellCount,
) -> Result<()> {
    let mut counts = vec![0u8; usize::from(pair_count)];
    for kind in kinds {
        let count = counts
            .get_mut(usize::from(kind))
            .ok_or(GameError::UnbalancedDeal)?;
        *count += 1;
        if *count > 2 {
            return Err(GameError::UnbalancedDeal);
        }
    }
    if counts.iter().all(|&count| count == 2) {
        Ok(())
    } else {
        Err(GameError::UnbalancedDeal)
    }
}
