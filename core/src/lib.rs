#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the hexagonal microbe simulation.
//!
//! This crate defines the hex-grid primitives and the message surface that
//! connects the authoritative world with the pure systems. Systems read an
//! immutable [`BoardState`] snapshot, plan a move, and hand it to the world as
//! a [`Command`]. The world validates and applies the command atomically and
//! reports what happened through [`Event`] values. Exported [`Frame`] values
//! are the only data handed to renderers.

mod board;
mod config;
mod hex;
mod organism;

use serde::{Deserialize, Serialize};

pub use board::{hy_max, hy_min, BoardState, Fence, HexBoard};
pub use config::{
    ConfigError, PlacementError, SimulationConfig, AMOEBA_MOVES_PER_TICK, CILIATE_COUNT,
    MAX_HEX_DIAG, MAX_TICKS, MIN_HEX_DIAG,
};
pub use hex::{ring, HexCoord, HexDirection};
pub use organism::{CiliateBody, CiliateMotion, OrganismColor, OrganismId, OrganismKind};

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Places a new ciliate on the board.
    SpawnCiliate {
        /// Appearance of the ciliate.
        color: OrganismColor,
        /// Cells in `[head, mid, tail]` order.
        cells: [HexCoord; 3],
    },
    /// Places a new amoeba on the board.
    SpawnAmoeba {
        /// Appearance of the amoeba.
        color: OrganismColor,
        /// Cells forming the amoeba's body.
        body: Vec<HexCoord>,
    },
    /// Replaces a ciliate's body with a translated or rotated copy.
    MoveCiliate {
        /// Ciliate being moved.
        organism: OrganismId,
        /// Motion that produced the new cells.
        motion: CiliateMotion,
        /// New cells in `[head, mid, tail]` order.
        cells: [HexCoord; 3],
    },
    /// Grows an amoeba by one cell while retracting another.
    ReshapeAmoeba {
        /// Amoeba being reshaped.
        organism: OrganismId,
        /// Cell joining the body.
        add: HexCoord,
        /// Cell leaving the body.
        remove: HexCoord,
    },
    /// Closes the current tick and opens the next one.
    Tick,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that an organism was placed on the board.
    OrganismSpawned {
        /// Identifier assigned to the organism.
        organism: OrganismId,
        /// Variant of the organism.
        kind: OrganismKind,
    },
    /// Reports that a spawn request was refused.
    SpawnRejected {
        /// Variant of the refused organism.
        kind: OrganismKind,
        /// Specific reason the spawn failed.
        reason: PlacementError,
    },
    /// Confirms that a ciliate moved.
    CiliateMoved {
        /// Ciliate that moved.
        organism: OrganismId,
        /// Motion that was applied.
        motion: CiliateMotion,
        /// Cells held before the move.
        from: [HexCoord; 3],
        /// Cells held after the move.
        to: [HexCoord; 3],
    },
    /// Confirms that an amoeba swapped one cell for another.
    AmoebaReshaped {
        /// Amoeba that changed shape.
        organism: OrganismId,
        /// Cell that joined the body.
        added: HexCoord,
        /// Cell that left the body.
        removed: HexCoord,
    },
    /// Reports that a move command was refused and the organism kept its cells.
    MoveRejected {
        /// Organism targeted by the command.
        organism: OrganismId,
        /// Specific reason the move failed.
        reason: PlacementError,
    },
    /// Indicates that the tick counter advanced.
    TickAdvanced {
        /// Index of the tick that just opened.
        tick: u32,
    },
}

/// Renderer-facing picture of the board at a tick boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame {
    /// Tick the frame was captured at; zero is the initial layout.
    pub tick: u32,
    /// Number of hexes along the board diagonal.
    pub hex_diag: u32,
    /// Pixel width of a rendered hex.
    pub hex_pixel_width: u32,
    /// Organisms in spawn order.
    pub organisms: Vec<OrganismFrame>,
}

/// Renderer-facing picture of a single organism.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganismFrame {
    /// Variant of the organism.
    pub kind: OrganismKind,
    /// Fill color of every cell.
    pub color: OrganismColor,
    /// Occupied cells; `[head, mid, tail]` for ciliates, coordinate order for amoebas.
    pub cells: Vec<HexCoord>,
}
