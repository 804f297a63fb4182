use serde::{Deserialize, Serialize};

use crate::*;

/// Progress of the pair currently being played.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Nothing chosen yet, any face-down card can be picked.
    Idle,
    /// First card chosen, it flips and then waits face up for its partner.
    OneChosen { first: Coord2 },
    /// Both cards chosen, no other input is accepted until they resolve.
    Judging { first: Coord2, second: Coord2 },
}

impl Default for Selection {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rejection {
    Judging,
    Locked,
    AlreadyPending,
    NotFaceDown,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The pointer did not land on any card.
    Missed,
    Rejected(Rejection),
    FirstChosen,
    PairCommitted,
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        use SelectOutcome::*;
        match self {
            Missed => false,
            Rejected(_) => false,
            FirstChosen => true,
            PairCommitted => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    NoChange,
    Animating,
    Matched { first: Coord2, second: Coord2 },
    Mismatched { first: Coord2, second: Coord2 },
    Reverted { first: Coord2, second: Coord2 },
    /// The last pair was matched.
    Cleared { first: Coord2, second: Coord2 },
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

impl Selection {
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub const fn is_judging(&self) -> bool {
        matches!(self, Self::Judging { .. })
    }

    /// First card of the current pair.
    pub const fn pending(&self) -> Option<Coord2> {
        match *self {
            Self::Idle => None,
            Self::OneChosen { first } | Self::Judging { first, .. } => Some(first),
        }
    }

    pub const fn pair(&self) -> Option<(Coord2, Coord2)> {
        match *self {
            Self::Judging { first, second } => Some((first, second)),
            _ => None,
        }
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::Idle;
    }

    /// Picks the card at `coords`. Rejected picks leave everything untouched.
    pub fn select(&mut self, board: &mut Board, coords: Coord2) -> Result<SelectOutcome> {
        use SelectOutcome::*;

        let coords = board.validate_coords(coords)?;
        if let Some(rejection) = self.rejection(board, coords) {
            log::trace!("Rejected {:?}: {:?}", coords, rejection);
            return Ok(Rejected(rejection));
        }

        let (next, outcome) = match *self {
            Self::Idle => (Self::OneChosen { first: coords }, FirstChosen),
            Self::OneChosen { first } => (
                Self::Judging {
                    first,
                    second: coords,
                },
                PairCommitted,
            ),
            Self::Judging { .. } => return Ok(Rejected(Rejection::Judging)),
        };

        board.card_at_mut(coords).set_phase(CardPhase::Flipping);
        *self = next;
        Ok(outcome)
    }

    fn rejection(&self, board: &Board, coords: Coord2) -> Option<Rejection> {
        let card = board.card_at(coords);
        match *self {
            Self::Judging { .. } => Some(Rejection::Judging),
            _ if card.is_locked() => Some(Rejection::Locked),
            Self::OneChosen { first } if first == coords => Some(Rejection::AlreadyPending),
            _ if card.phase() != CardPhase::FaceDown => Some(Rejection::NotFaceDown),
            _ => None,
        }
    }

    /// Moves every animating card by `delta_time` seconds and judges the pair
    /// once both of its cards have settled.
    pub fn advance(
        &mut self,
        board: &mut Board,
        delta_time: f32,
        timing: FlipTiming,
    ) -> TickOutcome {
        use CardPhase::*;

        let mut animated = false;
        for coords in iter_coords(board.size()) {
            let card = board.card_at(coords);
            if card.is_locked() {
                continue;
            }
            let (direction, settled) = match card.phase() {
                Flipping => (FlipDirection::Forward, FaceUp),
                Reversing => (FlipDirection::Reverse, FaceDown),
                FaceDown | FaceUp => continue,
            };

            animated = true;
            if board.advance_flip(coords, direction, delta_time, timing) {
                board.card_at_mut(coords).set_phase(settled);
                log::trace!("{:?} settled {:?}", coords, settled);
            }
        }

        match self.judge(board) {
            TickOutcome::NoChange if animated => TickOutcome::Animating,
            outcome => outcome,
        }
    }

    fn judge(&mut self, board: &mut Board) -> TickOutcome {
        use CardPhase::*;

        let Self::Judging { first, second } = *self else {
            return TickOutcome::NoChange;
        };

        let (a, b) = (*board.card_at(first), *board.card_at(second));
        match (a.phase(), b.phase()) {
            (FaceUp, FaceUp) if a.matches(&b) => {
                board.card_at_mut(first).lock();
                board.card_at_mut(second).lock();
                self.clear();
                if board.is_cleared() {
                    TickOutcome::Cleared { first, second }
                } else {
                    TickOutcome::Matched { first, second }
                }
            }
            (FaceUp, FaceUp) => {
                board.card_at_mut(first).set_phase(Reversing);
                board.card_at_mut(second).set_phase(Reversing);
                TickOutcome::Mismatched { first, second }
            }
            (FaceDown, FaceDown) => {
                self.clear();
                TickOutcome::Reverted { first, second }
            }
            _ => TickOutcome::NoChange,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIMING: FlipTiming = FlipTiming::new_unchecked(180.0, 180.0);

    fn board() -> Board {
        Board::new(Deal::from_kinds((2, 2), &[0, 0, 1, 1]).unwrap())
    }

    fn settle(selection: &mut Selection, board: &mut Board) -> TickOutcome {
        let mut last = TickOutcome::NoChange;
        for _ in 0..100 {
            match selection.advance(board, 0.1, TIMING) {
                TickOutcome::NoChange => return last,
                outcome => last = outcome,
            }
        }
        last
    }

    #[test]
    fn first_pick_becomes_pending() {
        let mut board = board();
        let mut selection = Selection::default();

        assert_eq!(selection.select(&mut board, (0, 0)), Ok(SelectOutcome::FirstChosen));
        assert_eq!(selection.pending(), Some((0, 0)));
        assert!(!selection.is_judging());
        assert_eq!(board[(0, 0)].phase(), CardPhase::Flipping);
    }

    #[test]
    fn repeated_first_pick_is_a_no_op() {
        let mut board = board();
        let mut selection = Selection::default();
        selection.select(&mut board, (0, 0)).unwrap();
        let before = (selection, board.clone());

        let outcome = selection.select(&mut board, (0, 0)).unwrap();

        assert_eq!(outcome, SelectOutcome::Rejected(Rejection::AlreadyPending));
        assert_eq!((selection, board), before);
    }

    #[test]
    fn repeated_first_pick_after_it_settled_is_a_no_op() {
        let mut board = board();
        let mut selection = Selection::default();
        selection.select(&mut board, (0, 0)).unwrap();
        selection.advance(&mut board, 5.0, TIMING);

        assert_eq!(board[(0, 0)].phase(), CardPhase::FaceUp);
        assert_eq!(
            selection.select(&mut board, (0, 0)),
            Ok(SelectOutcome::Rejected(Rejection::AlreadyPending))
        );
        assert_eq!(selection.pending(), Some((0, 0)));
    }

    #[test]
    fn lone_pending_card_waits_face_up() {
        let mut board = board();
        let mut selection = Selection::default();
        selection.select(&mut board, (0, 0)).unwrap();

        assert_eq!(settle(&mut selection, &mut board), TickOutcome::Animating);
        assert_eq!(board[(0, 0)].phase(), CardPhase::FaceUp);
        assert_eq!(selection, Selection::OneChosen { first: (0, 0) });
        assert_eq!(selection.advance(&mut board, 1.0, TIMING), TickOutcome::NoChange);
    }

    #[test]
    fn third_pick_is_ignored_while_judging() {
        let mut board = board();
        let mut selection = Selection::default();
        selection.select(&mut board, (0, 0)).unwrap();
        assert_eq!(selection.select(&mut board, (1, 1)), Ok(SelectOutcome::PairCommitted));
        let before = (selection, board.clone());

        let outcome = selection.select(&mut board, (1, 0)).unwrap();

        assert_eq!(outcome, SelectOutcome::Rejected(Rejection::Judging));
        assert_eq!((selection, board), before);
    }

    #[test]
    fn mismatch_flips_back_and_returns_to_idle() {
        let mut board = board();
        let mut selection = Selection::default();
        selection.select(&mut board, (0, 0)).unwrap();
        selection.select(&mut board, (1, 1)).unwrap();
        assert!(selection.is_judging());

        let mut outcomes = alloc::vec::Vec::new();
        for _ in 0..40 {
            match selection.advance(&mut board, 0.1, TIMING) {
                TickOutcome::Animating | TickOutcome::NoChange => {}
                outcome => outcomes.push(outcome),
            }
        }

        assert_eq!(
            outcomes,
            [
                TickOutcome::Mismatched { first: (0, 0), second: (1, 1) },
                TickOutcome::Reverted { first: (0, 0), second: (1, 1) },
            ]
        );
        assert_eq!(selection, Selection::Idle);
        for coords in [(0, 0), (1, 1)] {
            assert_eq!(board[coords].phase(), CardPhase::FaceDown);
            assert_eq!(board[coords].progress(), 0.0);
            assert!(!board[coords].is_locked());
        }
    }

    #[test]
    fn match_locks_both_cards() {
        let mut board = board();
        let mut selection = Selection::default();
        selection.select(&mut board, (0, 0)).unwrap();
        selection.select(&mut board, (0, 1)).unwrap();

        assert_eq!(
            settle(&mut selection, &mut board),
            TickOutcome::Matched { first: (0, 0), second: (0, 1) }
        );
        assert!(selection.is_idle());
        assert!(board[(0, 0)].is_locked() && board[(0, 1)].is_locked());
        assert_eq!(
            selection.select(&mut board, (0, 0)),
            Ok(SelectOutcome::Rejected(Rejection::Locked))
        );
        assert!(selection.is_idle());
    }

    #[test]
    fn last_match_clears_the_board() {
        let mut board = Board::new(Deal::from_kinds((1, 2), &[0, 0]).unwrap());
        let mut selection = Selection::default();
        selection.select(&mut board, (0, 1)).unwrap();
        selection.select(&mut board, (0, 0)).unwrap();

        assert_eq!(
            selection.advance(&mut board, 10.0, TIMING),
            TickOutcome::Cleared { first: (0, 1), second: (0, 0) }
        );
        assert!(board.is_cleared());
    }

    #[test]
    fn judgment_waits_for_the_slower_card() {
        let mut board = board();
        let mut selection = Selection::default();
        selection.select(&mut board, (0, 0)).unwrap();
        selection.advance(&mut board, 0.5, TIMING);
        selection.select(&mut board, (0, 1)).unwrap();

        assert_eq!(selection.advance(&mut board, 0.5, TIMING), TickOutcome::Animating);
        assert_eq!(board[(0, 0)].phase(), CardPhase::FaceUp);
        assert_eq!(board[(0, 1)].phase(), CardPhase::Flipping);
        assert_eq!(
            selection.advance(&mut board, 0.5, TIMING),
            TickOutcome::Matched { first: (0, 0), second: (0, 1) }
        );
    }

    #[test]
    fn out_of_range_pick_is_an_error() {
        let mut board = board();
        let mut selection = Selection::default();

        assert_eq!(selection.select(&mut board, (0, 2)), Err(GameError::InvalidCoords));
        assert!(selection.is_idle());
    }
}
