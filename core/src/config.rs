//! Simulation parameters and their fail-fast validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{HexCoord, OrganismKind};

/// Smallest supported board diagonal.
pub const MIN_HEX_DIAG: u32 = 4;
/// Largest supported board diagonal.
pub const MAX_HEX_DIAG: u32 = 1024;
/// Largest supported tick count; frame indices are exported with three digits.
pub const MAX_TICKS: u32 = 999;
/// Number of ciliates seeded near the board corners.
pub const CILIATE_COUNT: usize = 4;
/// Number of amoeba moves attempted in each tick before the ciliates move.
pub const AMOEBA_MOVES_PER_TICK: usize = 3;

const DEFAULT_SEED: u64 = 0x5eed_0f_a40e_ba11;

/// Parameters that shape a simulation run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Number of hexes along the board diagonal.
    pub hex_diag: u32,
    /// Pixel width of a rendered hex; only forwarded to frame consumers.
    pub hex_pixel_width: u32,
    /// Number of rings grown around the amoeba's centre cell.
    pub amoeba_radius: u32,
    /// Distance of each ciliate's mid cell from its board corner.
    pub ciliate_offset: u32,
    /// Number of ticks to simulate after the initial layout.
    pub ticks: u32,
    /// Seed for the run's random number generator.
    pub seed: u64,
    /// Upper bound on add/remove draws for a single amoeba move.
    pub amoeba_max_attempts: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            hex_diag: 60,
            hex_pixel_width: 19,
            amoeba_radius: 5,
            ciliate_offset: 5,
            ticks: 250,
            seed: DEFAULT_SEED,
            amoeba_max_attempts: 256,
        }
    }
}

impl SimulationConfig {
    /// Checks every scalar bound, stopping at the first violation.
    ///
    /// Placement of the seeded organisms is checked separately once their
    /// layout has been derived.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_HEX_DIAG..=MAX_HEX_DIAG).contains(&self.hex_diag) {
            return Err(ConfigError::HexDiagOutOfRange {
                value: self.hex_diag,
            });
        }
        if self.hex_pixel_width == 0 {
            return Err(ConfigError::ZeroPixelWidth);
        }
        if self.amoeba_radius == 0 {
            return Err(ConfigError::ZeroAmoebaRadius);
        }
        if !(1..=self.hex_diag).contains(&self.ciliate_offset) {
            return Err(ConfigError::CiliateOffsetOutOfRange {
                value: self.ciliate_offset,
                hex_diag: self.hex_diag,
            });
        }
        if self.ticks > MAX_TICKS {
            return Err(ConfigError::TooManyTicks { value: self.ticks });
        }
        if self.amoeba_max_attempts == 0 {
            return Err(ConfigError::ZeroAmoebaAttempts);
        }
        Ok(())
    }
}

/// Reasons a configuration is refused before any simulation state exists.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Board diagonal outside the supported range.
    #[error("hex_diag must be within {}..={}, got {value}", MIN_HEX_DIAG, MAX_HEX_DIAG)]
    HexDiagOutOfRange {
        /// Rejected diagonal.
        value: u32,
    },
    /// Rendered hex width of zero pixels.
    #[error("hex_pixel_width must be greater than zero")]
    ZeroPixelWidth,
    /// Amoeba without any ring around its centre.
    #[error("amoeba_radius must be at least 1")]
    ZeroAmoebaRadius,
    /// Ciliates seeded on a corner or beyond the far edge.
    #[error("ciliate_offset must be within 1..={hex_diag}, got {value}")]
    CiliateOffsetOutOfRange {
        /// Rejected offset.
        value: u32,
        /// Board diagonal bounding the offset.
        hex_diag: u32,
    },
    /// Tick count beyond the exportable frame range.
    #[error("ticks must be at most {}, got {value}", MAX_TICKS)]
    TooManyTicks {
        /// Rejected tick count.
        value: u32,
    },
    /// Amoeba moves that could never be attempted.
    #[error("amoeba_max_attempts must be at least 1")]
    ZeroAmoebaAttempts,
    /// A seeded organism does not fit on the board.
    #[error("cannot seed {kind:?} #{index}: {reason}")]
    Placement {
        /// Variant of the organism being seeded.
        kind: OrganismKind,
        /// Position of the organism in spawn order.
        index: usize,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
}

/// Reasons the world refuses to place or move an organism.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// The cell is part of the out-of-bounds fence.
    #[error("cell {0:?} lies in the fence")]
    Fenced(HexCoord),
    /// The cell lies beyond the playable board.
    #[error("cell {0:?} lies off the board")]
    OffBoard(HexCoord),
    /// The cell is held by another organism.
    #[error("cell {0:?} is already occupied")]
    Occupied(HexCoord),
    /// The ciliate cells are not a straight run of three adjacent cells.
    #[error("ciliate cells are not a straight line")]
    MalformedCiliate,
    /// The amoeba body lists the same cell twice or is empty.
    #[error("amoeba body is empty or repeats a cell")]
    MalformedAmoeba,
    /// The amoeba cell to add is already part of its body.
    #[error("cell {0:?} already belongs to the amoeba")]
    AlreadyInBody(HexCoord),
    /// The amoeba cell to remove is not part of its body.
    #[error("cell {0:?} does not belong to the amoeba")]
    NotInBody(HexCoord),
    /// The command targets an organism of the wrong variant or no organism at all.
    #[error("no matching organism")]
    UnknownOrganism,
}
