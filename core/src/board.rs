use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Grid of cards with their per-card animation state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cards: Array2<Card>,
}

impl Board {
    pub fn new(deal: Deal) -> Self {
        Self {
            cards: deal.kinds().map(|&kind| Card::new(kind)),
        }
    }

    /// Shuffled board of `size`, reproducible from `seed`.
    pub fn initialize(size: Coord2, seed: u64) -> Result<Self> {
        let config = BoardConfig::new(size)?;
        Ok(Self::new(RandomDealer::new(seed).deal(config)?))
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.cards.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn board_config(&self) -> BoardConfig {
        BoardConfig::new_unchecked(self.size())
    }

    pub fn total_cards(&self) -> CellCount {
        self.cards.len() as CellCount
    }

    pub fn pair_count(&self) -> CellCount {
        self.total_cards() / 2
    }

    pub fn locked_count(&self) -> CellCount {
        self.cards.iter().filter(|card| card.is_locked()).count() as CellCount
    }

    pub fn remaining_pairs(&self) -> CellCount {
        self.pair_count() - self.locked_count() / 2
    }

    pub fn is_cleared(&self) -> bool {
        self.cards.iter().all(Card::is_locked)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    /// # Panics
    ///
    /// Panics when `coords` lies outside the board.
    pub fn card_at(&self, coords: Coord2) -> &Card {
        &self.cards[coords.to_nd_index()]
    }

    pub fn get(&self, coords: Coord2) -> Option<&Card> {
        self.cards.get(coords.to_nd_index())
    }

    pub(crate) fn card_at_mut(&mut self, coords: Coord2) -> &mut Card {
        &mut self.cards[coords.to_nd_index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Coord2, &Card)> + '_ {
        self.cards
            .indexed_iter()
            .map(|((row, col), card)| ((row as Coord, col as Coord), card))
    }

    /// Assigns the types of `deal` and turns every card face down again.
    pub fn reset(&mut self, deal: Deal) -> Result<()> {
        if deal.size() != self.size() {
            return Err(GameError::InvalidBoardShape);
        }
        for (card, &kind) in self.cards.iter_mut().zip(deal.kinds().iter()) {
            card.redeal(kind);
        }
        Ok(())
    }

    /// Advances the flip of the card at `coords`, see [`Card::advance_flip`].
    pub fn advance_flip(
        &mut self,
        coords: Coord2,
        direction: FlipDirection,
        delta_time: f32,
        timing: FlipTiming,
    ) -> bool {
        self.card_at_mut(coords)
            .advance_flip(direction, delta_time, timing)
    }
}

impl Index<Coord2> for Board {
    type Output = Card;

    fn index(&self, coords: Coord2) -> &Self::Output {
        self.card_at(coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, kinds: &[CardType]) -> Board {
        Board::new(Deal::from_kinds(size, kinds).unwrap())
    }

    #[test]
    fn new_board_is_face_down() {
        let board = board((2, 2), &[0, 0, 1, 1]);

        assert_eq!(board.size(), (2, 2));
        assert_eq!(board.pair_count(), 2);
        for (_, card) in board.iter() {
            assert_eq!(card.phase(), CardPhase::FaceDown);
            assert_eq!(card.progress(), 0.0);
            assert!(!card.is_locked());
        }
        assert_eq!(board[(1, 0)].kind(), 1);
    }

    #[test]
    fn initialize_requires_an_even_board() {
        assert_eq!(Board::initialize((3, 5), 1), Err(GameError::OddCardCount));

        let board = Board::initialize((4, 13), 1).unwrap();
        assert_eq!(board.total_cards(), 52);
        assert_eq!(board.remaining_pairs(), 26);
    }

    #[test]
    fn out_of_range_coords_are_rejected() {
        let board = board((2, 2), &[0, 0, 1, 1]);

        assert_eq!(board.validate_coords((2, 0)), Err(GameError::InvalidCoords));
        assert_eq!(board.validate_coords((1, 1)), Ok((1, 1)));
        assert!(board.get((0, 2)).is_none());
    }

    #[test]
    #[should_panic]
    fn card_at_fails_fast_out_of_range() {
        let board = board((2, 2), &[0, 0, 1, 1]);
        let _ = board.card_at((5, 5));
    }

    #[test]
    fn reset_redeals_and_clears_phases() {
        let mut board = board((2, 2), &[0, 0, 1, 1]);
        board.card_at_mut((0, 0)).lock();
        board.card_at_mut((0, 1)).lock();
        board.card_at_mut((1, 0)).set_phase(CardPhase::Flipping);
        board.advance_flip((1, 0), FlipDirection::Forward, 0.3, FlipTiming::default());

        board
            .reset(Deal::from_kinds((2, 2), &[1, 0, 0, 1]).unwrap())
            .unwrap();

        assert_eq!(board.locked_count(), 0);
        assert_eq!(board.card_at((0, 0)).kind(), 1);
        assert!(board.iter().all(|(_, card)| card.is_selectable() && card.progress() == 0.0));
    }

    #[test]
    fn reset_rejects_other_shapes() {
        let mut board = board((2, 2), &[0, 0, 1, 1]);
        let deal = Deal::from_kinds((1, 2), &[0, 0]).unwrap();

        assert_eq!(board.reset(deal), Err(GameError::InvalidBoardShape));
    }

    #[test]
    fn lock_counts_drive_clear_state() {
        let mut board = board((1, 2), &[0, 0]);
        assert_eq!(board.remaining_pairs(), 1);

        board.card_at_mut((0, 0)).lock();
        board.card_at_mut((0, 1)).lock();

        assert_eq!(board.remaining_pairs(), 0);
        assert!(board.is_cleared());
    }
}
