use core::num::Saturating;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionState {
    Ready,
    Active,
    Cleared,
}

impl SessionState {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Cleared)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Ready
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    attempts: Saturating<u32>,
    matches: Saturating<u32>,
    mismatches: Saturating<u32>,
    resets: Saturating<u32>,
}

impl SessionStats {
    /// Pairs committed for judgment.
    pub fn attempts(&self) -> u32 {
        self.attempts.0
    }

    pub fn matches(&self) -> u32 {
        self.matches.0
    }

    pub fn mismatches(&self) -> u32 {
        self.mismatches.0
    }

    pub fn resets(&self) -> u32 {
        self.resets.0
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub board: BoardConfig,
    pub timing: FlipTiming,
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            timing: FlipTiming::default(),
            seed: 0,
        }
    }
}

/// Seed of the deal used for `round`, so every restart gets a fresh layout
/// while the whole session stays reproducible from one seed.
pub const fn round_seed(seed: u64, round: u64) -> u64 {
    seed.wrapping_add(round.wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

/// One game: the board, the pair being played and the bookkeeping around it.
///
/// Deserialization goes through [`Session::validate`], so a restored session
/// upholds the same invariants as one built with [`Session::new`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SessionParts")]
pub struct Session {
    config: SessionConfig,
    board: Board,
    palette: Palette,
    selection: Selection,
    round: u64,
    state: SessionState,
    stats: SessionStats,
}

#[derive(Deserialize)]
struct SessionParts {
    config: SessionConfig,
    board: Board,
    palette: Palette,
    selection: Selection,
    round: u64,
    state: SessionState,
    stats: SessionStats,
}

impl TryFrom<SessionParts> for Session {
    type Error = GameError;

    fn try_from(parts: SessionParts) -> Result<Self> {
        let session = Self {
            config: parts.config,
            board: parts.board,
            palette: parts.palette,
            selection: parts.selection,
            round: parts.round,
            state: parts.state,
            stats: parts.stats,
        };
        session.validate()?;
        Ok(session)
    }
}

impl Session {
    /// Fails when the configured board cannot be paired up.
    pub fn new(config: SessionConfig) -> Result<Self> {
        let board = BoardConfig::new(config.board.size)?;
        let config = SessionConfig { board, ..config };
        let seed = round_seed(config.seed, 0);
        let deal = RandomDealer::new(seed).deal(board)?;
        let palette = Palette::random(board.pair_count(), seed);
        Ok(Self::from_parts(config, Board::new(deal), palette))
    }

    /// Session over a fixed deal, for replays and tests.
    pub fn with_deal(deal: Deal, timing: FlipTiming) -> Self {
        let config = SessionConfig {
            board: deal.board_config(),
            timing,
            seed: 0,
        };
        let palette = Palette::random(config.board.pair_count(), 0);
        Self::from_parts(config, Board::new(deal), palette)
    }

    fn from_parts(config: SessionConfig, board: Board, palette: Palette) -> Self {
        Self {
            config,
            board,
            palette,
            selection: Selection::default(),
            round: 0,
            state: SessionState::default(),
            stats: SessionStats::default(),
        }
    }

    /// Checks that the board matches the config, is pair-balanced and has a
    /// colour per pair, and that the selection points at distinct cards on it.
    pub fn validate(&self) -> Result<()> {
        let config = BoardConfig::new(self.config.board.size)?;
        if self.board.size() != config.size
            || self.palette.len() != usize::from(config.pair_count())
        {
            return Err(GameError::InvalidBoardShape);
        }
        check_pair_balance(
            self.board.iter().map(|(_, card)| card.kind()),
            config.pair_count(),
        )?;

        match self.selection {
            Selection::Idle => {}
            Selection::OneChosen { first } => {
                self.board.validate_coords(first)?;
            }
            Selection::Judging { first, second } => {
                self.board.validate_coords(first)?;
                self.board.validate_coords(second)?;
                if first == second {
                    return Err(GameError::InvalidCoords);
                }
            }
        }
        Ok(())
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn timing(&self) -> FlipTiming {
        self.config.timing
    }

    pub fn seed(&self) -> u64 {
        self.config.seed
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn select(&mut self, coords: Coord2) -> Result<SelectOutcome> {
        let outcome = self.selection.select(&mut self.board, coords)?;
        match outcome {
            SelectOutcome::FirstChosen => {
                log::debug!("first card: {:?}", coords);
                if self.state.is_ready() {
                    self.state = SessionState::Active;
                }
            }
            SelectOutcome::PairCommitted => {
                log::debug!("pair committed: {:?}", self.selection.pair());
                self.stats.attempts += 1;
            }
            SelectOutcome::Missed | SelectOutcome::Rejected(_) => {}
        }
        Ok(outcome)
    }

    /// Selects whatever card `hit_test` finds under `point`.
    pub fn select_hit(
        &mut self,
        hit_test: &impl HitTest,
        point: (f32, f32),
    ) -> Result<SelectOutcome> {
        match hit_test.hit(point) {
            Some(coords) => self.select(coords),
            None => Ok(SelectOutcome::Missed),
        }
    }

    pub fn advance(&mut self, delta_time: f32) -> TickOutcome {
        let outcome = self
            .selection
            .advance(&mut self.board, delta_time, self.config.timing);
        match outcome {
            TickOutcome::Matched { first, second } => {
                log::debug!("matched {:?} and {:?}", first, second);
                self.stats.matches += 1;
            }
            TickOutcome::Cleared { first, second } => {
                log::debug!("matched {:?} and {:?}, board cleared", first, second);
                self.stats.matches += 1;
                self.state = SessionState::Cleared;
            }
            TickOutcome::Mismatched { first, second } => {
                log::debug!("mismatch {:?} and {:?}, flipping back", first, second);
                self.stats.mismatches += 1;
            }
            TickOutcome::Reverted { first, second } => {
                log::trace!("{:?} and {:?} face down again", first, second);
            }
            TickOutcome::NoChange | TickOutcome::Animating => {}
        }
        outcome
    }

    /// Drops any pair in flight and starts over with a new deal and palette.
    pub fn reset(&mut self) -> Result<()> {
        let round = self.round.wrapping_add(1);
        let seed = round_seed(self.config.seed, round);
        let deal = RandomDealer::new(seed).deal(self.config.board)?;
        self.restart_with(deal)?;
        self.palette = Palette::random(self.config.board.pair_count(), seed);
        self.round = round;
        Ok(())
    }

    /// Starts over with `deal`, which must have the same shape as the board.
    pub fn restart_with(&mut self, deal: Deal) -> Result<()> {
        self.board.reset(deal)?;
        if !self.selection.is_idle() {
            log::debug!("discarding in-flight selection {:?}", self.selection);
        }
        self.selection.clear();
        self.state = SessionState::Ready;
        self.stats.resets += 1;
        Ok(())
    }

    pub fn card_views(&self) -> impl Iterator<Item = CardView> + '_ {
        card_views(&self.board, self.config.timing, &self.palette)
    }
}
