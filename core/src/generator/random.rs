use alloc::vec::Vec;
use ndarray::Array2;

use super::*;

/// Uniformly random deal, reproducible from its seed.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomDealer {
    seed: u64,
}

impl RandomDealer {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl Dealer for RandomDealer {
    fn deal(self, config: BoardConfig) -> Result<Deal> {
        use rand::prelude::*;

        // configs built with new_unchecked or deserialized skip validation
        if let Err(err) = BoardConfig::new(config.size) {
            log::warn!(
                "Cannot deal a {}x{} board: {}",
                config.size.0,
                config.size.1,
                err
            );
            return Err(err);
        }

        let total_cards = usize::from(config.total_cards());
        let mut kinds: Vec<CardType> = (0..total_cards).map(|i| (i / 2) as CardType).collect();

        // Fisher-Yates over cell indices
        let mut rng = SmallRng::seed_from_u64(self.seed);
        for i in (1..total_cards).rev() {
            let j = rng.random_range(0..=i);
            kinds.swap(i, j);
        }

        let kinds = Array2::from_shape_vec(config.size.to_nd_index(), kinds)
            .map_err(|_| GameError::InvalidBoardShape)?;
        log::debug!(
            "Dealt {} pairs on a {}x{} board (seed {})",
            config.pair_count(),
            config.size.0,
            config.size.1,
            self.seed
        );
        Ok(Deal::from_kind_grid_unchecked(kinds))
    }
}
