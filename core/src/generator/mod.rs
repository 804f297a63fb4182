use crate::*;
pub use random::*;

mod random;

/// Strategy that assigns card types to the cells of a board.
pub trait Dealer {
    /// Fails for configs that cannot be paired up.
    fn deal(self, config: BoardConfig) -> Result<Deal>;
}
