use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board has no cells")]
    EmptyBoard,
    #[error("Board needs an even number of cards")]
    OddCardCount,
    #[error("Every card type must appear exactly twice")]
    UnbalancedDeal,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
}

pub type Result<T> = core::result::Result<T, GameError>;
