//! Board geometry, the out-of-bounds fence, and per-move occupancy snapshots.

use std::collections::{BTreeMap, BTreeSet};

use crate::{HexCoord, OrganismId, MAX_HEX_DIAG};

/// Largest playable `hy` in the column `hx` of a board with the provided diagonal.
#[must_use]
pub const fn hy_max(hex_diag: i32, hx: i32) -> i32 {
    (hex_diag - hx).div_euclid(2)
}

/// Smallest playable `hy` in the column `hx`.
#[must_use]
pub const fn hy_min(hx: i32) -> i32 {
    -hx.div_euclid(2)
}

/// One-cell-thick border of illegal positions surrounding the playable board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fence {
    cells: BTreeSet<HexCoord>,
}

impl Fence {
    /// Builds the fence for a board with the provided diagonal.
    ///
    /// Side columns sit at `hx = -1` and `hx = hex_diag + 1` and include the
    /// corners; every playable column gains one cell above `hy_max` and one
    /// below `hy_min`. Diagonals beyond [`MAX_HEX_DIAG`] are clamped.
    #[must_use]
    pub fn around(hex_diag: u32) -> Self {
        let diag = hex_diag.min(MAX_HEX_DIAG) as i32;
        let sides = (-1..=hy_max(diag, 0) + 1)
            .flat_map(|hy| [HexCoord::new(-1, hy), HexCoord::new(diag + 1, -hy)]);
        let caps = (0..=diag).flat_map(|hx| {
            [
                HexCoord::new(hx, hy_max(diag, hx) + 1),
                HexCoord::new(hx, hy_min(hx) - 1),
            ]
        });
        Self {
            cells: sides.chain(caps).collect(),
        }
    }

    /// Reports whether the cell belongs to the fence.
    #[must_use]
    pub fn contains(&self, cell: HexCoord) -> bool {
        self.cells.contains(&cell)
    }

    /// Number of fence cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the fence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates the fence cells in coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = HexCoord> + '_ {
        self.cells.iter().copied()
    }

    /// Neighbours of `cell` in slot order, with fenced cells reported as absent.
    #[must_use]
    pub fn neighbors(&self, cell: HexCoord) -> [Option<HexCoord>; 6] {
        cell.adjacent()
            .map(|neighbour| (!self.contains(neighbour)).then_some(neighbour))
    }
}

/// Immutable geometry of the playable board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HexBoard {
    hex_diag: u32,
    fence: Fence,
}

impl HexBoard {
    /// Creates the geometry for a board with the provided diagonal.
    ///
    /// Diagonals beyond [`MAX_HEX_DIAG`] are clamped.
    #[must_use]
    pub fn new(hex_diag: u32) -> Self {
        let hex_diag = hex_diag.min(MAX_HEX_DIAG);
        Self {
            hex_diag,
            fence: Fence::around(hex_diag),
        }
    }

    /// Number of hexes along the board diagonal.
    #[must_use]
    pub const fn hex_diag(&self) -> u32 {
        self.hex_diag
    }

    /// Border of illegal positions.
    #[must_use]
    pub const fn fence(&self) -> &Fence {
        &self.fence
    }

    /// Cell at the middle of the board's long axis.
    #[must_use]
    pub const fn midpoint(&self) -> HexCoord {
        HexCoord::new(self.diag() / 2, 0)
    }

    /// Reports whether the cell lies on the playable board.
    #[must_use]
    pub fn contains(&self, cell: HexCoord) -> bool {
        let diag = self.diag();
        (0..=diag).contains(&cell.hx())
            && (hy_min(cell.hx())..=hy_max(diag, cell.hx())).contains(&cell.hy())
    }

    /// Neighbours of `cell` with fenced cells reported as absent.
    #[must_use]
    pub fn neighbors(&self, cell: HexCoord) -> [Option<HexCoord>; 6] {
        self.fence.neighbors(cell)
    }

    const fn diag(&self) -> i32 {
        self.hex_diag as i32
    }
}

/// Snapshot of every occupied cell, rebuilt after each committed move.
///
/// The snapshot owns its occupancy index; only the immutable board geometry is
/// shared. Validation for an organism ignores the cells that organism already
/// holds.
#[derive(Clone, Debug)]
pub struct BoardState<'a> {
    board: &'a HexBoard,
    occupancy: BTreeMap<HexCoord, OrganismId>,
}

impl<'a> BoardState<'a> {
    /// Builds a snapshot from each organism's occupied cells.
    pub fn from_organisms<I, C>(board: &'a HexBoard, organisms: I) -> Self
    where
        I: IntoIterator<Item = (OrganismId, C)>,
        C: IntoIterator<Item = HexCoord>,
    {
        let occupancy = organisms
            .into_iter()
            .flat_map(|(organism, cells)| cells.into_iter().map(move |cell| (cell, organism)))
            .collect();
        Self { board, occupancy }
    }

    /// Board geometry backing the snapshot.
    #[must_use]
    pub const fn board(&self) -> &'a HexBoard {
        self.board
    }

    /// Number of hexes along the board diagonal.
    #[must_use]
    pub const fn hex_diag(&self) -> u32 {
        self.board.hex_diag()
    }

    /// Border of illegal positions.
    #[must_use]
    pub const fn fence(&self) -> &'a Fence {
        self.board.fence()
    }

    /// Neighbours of `cell` with fenced cells reported as absent.
    #[must_use]
    pub fn neighbors(&self, cell: HexCoord) -> [Option<HexCoord>; 6] {
        self.board.neighbors(cell)
    }

    /// Organism holding the cell, if any.
    #[must_use]
    pub fn occupant(&self, cell: HexCoord) -> Option<OrganismId> {
        self.occupancy.get(&cell).copied()
    }

    /// Reports whether `organism` may hold the cell after its next move.
    #[must_use]
    pub fn is_vacant_for(&self, cell: HexCoord, organism: OrganismId) -> bool {
        !self.board.fence().contains(cell)
            && self
                .occupant(cell)
                .map_or(true, |occupant| occupant == organism)
    }

    /// Number of occupied cells across all organisms.
    #[must_use]
    pub fn occupied_len(&self) -> usize {
        self.occupancy.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected_fence_len(hex_diag: u32) -> usize {
        let rows = hex_diag as usize / 2 + 3;
        2 * rows + 2 * (hex_diag as usize + 1)
    }

    #[test]
    fn small_fence_matches_hand_count() {
        let fence = Fence::around(2);
        let expected: BTreeSet<HexCoord> = [
            (-1, -1),
            (-1, 0),
            (-1, 1),
            (-1, 2),
            (3, 1),
            (3, 0),
            (3, -1),
            (3, -2),
            (0, 2),
            (0, -1),
            (1, 1),
            (1, -1),
            (2, 1),
            (2, -2),
        ]
        .into_iter()
        .map(HexCoord::from)
        .collect();

        assert_eq!(fence.len(), 14);
        assert_eq!(fence.iter().collect::<BTreeSet<_>>(), expected);
    }

    #[test]
    fn fence_size_follows_closed_form() {
        for hex_diag in [2, 3, 10, 11, 60] {
            assert_eq!(
                Fence::around(hex_diag).len(),
                expected_fence_len(hex_diag),
                "fence size mismatch for hex_diag {hex_diag}"
            );
        }
    }

    #[test]
    fn fence_encloses_every_playable_cell() {
        let board = HexBoard::new(10);
        assert!(board.fence().contains(HexCoord::new(-1, 0)));
        for hx in 0..=10 {
            for hy in hy_min(hx)..=hy_max(10, hx) {
                let cell = HexCoord::new(hx, hy);
                assert!(board.contains(cell));
                assert!(!board.fence().contains(cell));
                for neighbour in cell.adjacent() {
                    assert!(
                        board.contains(neighbour) || board.fence().contains(neighbour),
                        "{neighbour:?} escapes the fence around {cell:?}"
                    );
                }
            }
        }
    }

    #[test]
    fn fenced_neighbours_are_absent() {
        let board = HexBoard::new(10);
        let neighbours = board.neighbors(HexCoord::new(0, 0));
        assert_eq!(neighbours[0], None);
        assert_eq!(neighbours[1], None);
        assert_eq!(neighbours[3], Some(HexCoord::new(1, 0)));
        assert_eq!(neighbours[4], Some(HexCoord::new(0, 1)));
    }

    #[test]
    fn board_state_ignores_own_cells() {
        let board = HexBoard::new(10);
        let first = OrganismId::new(0);
        let second = OrganismId::new(1);
        let state = BoardState::from_organisms(
            &board,
            [
                (first, vec![HexCoord::new(2, 0), HexCoord::new(3, 0)]),
                (second, vec![HexCoord::new(5, 0)]),
            ],
        );

        assert_eq!(state.occupied_len(), 3);
        assert!(state.is_vacant_for(HexCoord::new(2, 0), first));
        assert!(!state.is_vacant_for(HexCoord::new(2, 0), second));
        assert!(state.is_vacant_for(HexCoord::new(4, 0), second));
        assert!(!state.is_vacant_for(HexCoord::new(-1, 0), first));
        assert_eq!(state.occupant(HexCoord::new(5, 0)), Some(second));
    }
}
