#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure movement system that plans one step for a ciliate or an amoeba.
//!
//! Planners never mutate the board. They read a [`BoardState`] snapshot,
//! draw from a caller-supplied random number generator and return a plan the
//! caller turns into a [`Command`] for the world.

mod amoeba;
mod ciliate;

use std::{collections::BTreeSet, num::NonZeroU32};

use hex_microbes_core::{BoardState, CiliateBody, CiliateMotion, Command, HexCoord, OrganismId};
use rand::{
    distributions::{Distribution, WeightedError, WeightedIndex},
    Rng,
};
use thiserror::Error;

pub use amoeba::{accepts_growth, AmoebaPlan, FIRST_REMOVAL_RADIUS};
pub use ciliate::{propose, CiliatePlan};

/// Relative odds of each ciliate motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MotionWeights {
    /// Weight of stepping toward the head.
    pub forward: u32,
    /// Weight of stepping toward the tail.
    pub backward: u32,
    /// Weight of rotating the head by +60 degrees.
    pub rotate_positive: u32,
    /// Weight of rotating the head by -60 degrees.
    pub rotate_negative: u32,
}

impl MotionWeights {
    fn pairs(self) -> [(CiliateMotion, u32); 4] {
        [
            (CiliateMotion::Forward, self.forward),
            (CiliateMotion::Backward, self.backward),
            (CiliateMotion::RotatePositive, self.rotate_positive),
            (CiliateMotion::RotateNegative, self.rotate_negative),
        ]
    }
}

impl Default for MotionWeights {
    fn default() -> Self {
        Self {
            forward: 6,
            backward: 2,
            rotate_positive: 1,
            rotate_negative: 1,
        }
    }
}

/// Errors raised while planning a move.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum MovementError {
    /// Every amoeba attempt hit a dead end or an illegal cell.
    #[error("amoeba {organism:?} found no legal move in {attempts} attempts")]
    NoLegalMove {
        /// Amoeba that stays in place.
        organism: OrganismId,
        /// Number of attempts spent.
        attempts: u32,
    },
    /// The ciliate motion weights cannot form a distribution.
    #[error("invalid ciliate motion weights: {0}")]
    InvalidWeights(#[from] WeightedError),
}

/// Pure system that proposes organism moves.
#[derive(Clone, Debug)]
pub struct Movement {
    motions: [CiliateMotion; 4],
    weights: WeightedIndex<u32>,
    amoeba_attempts: NonZeroU32,
}

impl Movement {
    /// Creates a planner with the provided motion odds and amoeba retry bound.
    pub fn new(weights: MotionWeights, amoeba_attempts: NonZeroU32) -> Result<Self, MovementError> {
        let pairs = weights.pairs();
        let index = WeightedIndex::new(pairs.iter().map(|(_, weight)| *weight))?;
        Ok(Self {
            motions: pairs.map(|(motion, _)| motion),
            weights: index,
            amoeba_attempts,
        })
    }

    /// Upper bound on amoeba attempts per move.
    #[must_use]
    pub const fn amoeba_attempts(&self) -> NonZeroU32 {
        self.amoeba_attempts
    }

    /// Draws a motion according to the configured weights.
    pub fn draw_motion<R>(&self, rng: &mut R) -> CiliateMotion
    where
        R: Rng + ?Sized,
    {
        self.motions[self.weights.sample(rng)]
    }

    /// Draws a motion for the ciliate and checks the cells it would occupy.
    pub fn plan_ciliate<R>(
        &self,
        organism: OrganismId,
        body: &CiliateBody,
        board: &BoardState<'_>,
        rng: &mut R,
    ) -> CiliatePlan
    where
        R: Rng + ?Sized,
    {
        let motion = self.draw_motion(rng);
        ciliate::plan(organism, body, motion, board)
    }

    /// Searches for a single-cell reshaping of the amoeba.
    pub fn plan_amoeba<R>(
        &self,
        organism: OrganismId,
        body: &BTreeSet<HexCoord>,
        board: &BoardState<'_>,
        rng: &mut R,
    ) -> Result<AmoebaPlan, MovementError>
    where
        R: Rng + ?Sized,
    {
        amoeba::plan(organism, body, board, self.amoeba_attempts.get(), rng)
    }
}

impl CiliatePlan {
    /// Command that applies the plan, if the motion was legal.
    #[must_use]
    pub fn command(&self) -> Option<Command> {
        self.destination().map(|body| Command::MoveCiliate {
            organism: self.organism(),
            motion: self.motion(),
            cells: body.cells(),
        })
    }
}

impl AmoebaPlan {
    /// Command that applies the plan.
    #[must_use]
    pub fn command(&self) -> Command {
        Command::ReshapeAmoeba {
            organism: self.organism(),
            add: self.add(),
            remove: self.remove(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn attempts(value: u32) -> NonZeroU32 {
        NonZeroU32::new(value).expect("non-zero")
    }

    #[test]
    fn all_zero_weights_are_rejected() {
        let weights = MotionWeights {
            forward: 0,
            backward: 0,
            rotate_positive: 0,
            rotate_negative: 0,
        };
        assert_eq!(
            Movement::new(weights, attempts(8)).err(),
            Some(MovementError::InvalidWeights(WeightedError::AllWeightsZero))
        );
    }

    #[test]
    fn single_weight_always_draws_that_motion() {
        let weights = MotionWeights {
            forward: 0,
            backward: 3,
            rotate_positive: 0,
            rotate_negative: 0,
        };
        let movement = Movement::new(weights, attempts(8)).expect("valid weights");
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..50 {
            assert_eq!(movement.draw_motion(&mut rng), CiliateMotion::Backward);
        }
    }

    #[test]
    fn default_weights_favour_forward_motion() {
        let movement = Movement::new(MotionWeights::default(), attempts(8)).expect("valid weights");
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut counts = [0u32; 4];
        for _ in 0..10_000 {
            let motion = movement.draw_motion(&mut rng);
            let slot = CiliateMotion::ALL
                .iter()
                .position(|candidate| *candidate == motion)
                .expect("known motion");
            counts[slot] += 1;
        }
        assert!(counts[0] > 5_500 && counts[0] < 6_500, "{counts:?}");
        assert!(counts[1] > 1_700 && counts[1] < 2_300, "{counts:?}");
        assert!(counts[2] > 800 && counts[2] < 1_200, "{counts:?}");
        assert!(counts[3] > 800 && counts[3] < 1_200, "{counts:?}");
    }
}
