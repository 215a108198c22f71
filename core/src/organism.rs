//! Organism identities, appearance, and body shapes.

use serde::{Deserialize, Serialize};

use crate::{HexCoord, HexDirection};

/// Index-stable handle assigned to an organism when it spawns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrganismId(u32);

impl OrganismId {
    /// Creates a new organism identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Visual appearance applied to an organism, serialised as `[red, green, blue]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct OrganismColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl OrganismColor {
    /// Creates a new organism color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

impl From<[u8; 3]> for OrganismColor {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::from_rgb(red, green, blue)
    }
}

impl From<OrganismColor> for [u8; 3] {
    fn from(color: OrganismColor) -> Self {
        [color.red, color.green, color.blue]
    }
}

/// The two organism variants living on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrganismKind {
    /// Rigid three-cell swimmer.
    Ciliate,
    /// Shape-shifting multi-cell crawler.
    Amoeba,
}

/// Rigid body of a ciliate: head, mid, and tail on one straight axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CiliateBody {
    cells: [HexCoord; 3],
    orientation: HexDirection,
}

impl CiliateBody {
    /// Builds a body from its cells in `[head, mid, tail]` order.
    ///
    /// Returns `None` unless the head and tail sit on opposite sides of mid.
    #[must_use]
    pub fn from_cells(cells: [HexCoord; 3]) -> Option<Self> {
        let [head, mid, tail] = cells;
        let orientation = mid.direction_to(head)?;
        (mid.step(orientation.opposite()) == tail).then_some(Self { cells, orientation })
    }

    /// Builds a body centred on `mid` with the head pointing toward `orientation`.
    #[must_use]
    pub const fn centred_on(mid: HexCoord, orientation: HexDirection) -> Self {
        Self {
            cells: [
                mid.step(orientation),
                mid,
                mid.step(orientation.opposite()),
            ],
            orientation,
        }
    }

    /// Cells in `[head, mid, tail]` order.
    #[must_use]
    pub const fn cells(&self) -> [HexCoord; 3] {
        self.cells
    }

    /// Leading cell.
    #[must_use]
    pub const fn head(&self) -> HexCoord {
        self.cells[0]
    }

    /// Pivot cell.
    #[must_use]
    pub const fn mid(&self) -> HexCoord {
        self.cells[1]
    }

    /// Trailing cell.
    #[must_use]
    pub const fn tail(&self) -> HexCoord {
        self.cells[2]
    }

    /// Direction from mid toward the head.
    #[must_use]
    pub const fn orientation(&self) -> HexDirection {
        self.orientation
    }

    /// Reports whether any of the body's cells equals `cell`.
    #[must_use]
    pub fn contains(&self, cell: HexCoord) -> bool {
        self.cells.contains(&cell)
    }
}

/// Discrete motions available to a ciliate each tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CiliateMotion {
    /// Translate one step in the head direction.
    Forward,
    /// Translate one step away from the head direction.
    Backward,
    /// Swing head and tail one slot counter-clockwise about mid.
    RotatePositive,
    /// Swing head and tail one slot clockwise about mid.
    RotateNegative,
}

impl CiliateMotion {
    /// Every motion in draw order.
    pub const ALL: [CiliateMotion; 4] = [
        CiliateMotion::Forward,
        CiliateMotion::Backward,
        CiliateMotion::RotatePositive,
        CiliateMotion::RotateNegative,
    ];
}
