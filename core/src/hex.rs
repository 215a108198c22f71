//! Axial hexagonal coordinates, the six neighbour directions, and rings.

use serde::{Deserialize, Serialize};

/// Location of a single hexagonal cell expressed in axial coordinates.
///
/// Coordinates serialise as an `[hx, hy]` pair so exported frames stay compact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct HexCoord {
    hx: i32,
    hy: i32,
}

impl HexCoord {
    /// Creates a new axial coordinate.
    #[must_use]
    pub const fn new(hx: i32, hy: i32) -> Self {
        Self { hx, hy }
    }

    /// Column-like axial component.
    #[must_use]
    pub const fn hx(&self) -> i32 {
        self.hx
    }

    /// Row-like axial component.
    #[must_use]
    pub const fn hy(&self) -> i32 {
        self.hy
    }

    /// Translates the coordinate by the provided axial delta.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.hx + dx, self.hy + dy)
    }

    /// Cell reached by a single step in the provided direction.
    #[must_use]
    pub const fn step(self, direction: HexDirection) -> Self {
        let (dx, dy) = direction.offset();
        self.offset(dx, dy)
    }

    /// All six adjacent cells in [`HexDirection::ALL`] order, with no board clipping.
    #[must_use]
    pub fn adjacent(self) -> [HexCoord; 6] {
        HexDirection::ALL.map(|direction| self.step(direction))
    }

    /// Number of single steps separating two cells.
    #[must_use]
    pub fn distance(self, other: HexCoord) -> u32 {
        let dx = other.hx - self.hx;
        let dy = other.hy - self.hy;
        (dx.unsigned_abs() + dy.unsigned_abs() + (dx + dy).unsigned_abs()) / 2
    }

    /// Direction of `other` when it is adjacent to `self`.
    #[must_use]
    pub fn direction_to(self, other: HexCoord) -> Option<HexDirection> {
        let delta = (other.hx - self.hx, other.hy - self.hy);
        HexDirection::ALL
            .into_iter()
            .find(|direction| direction.offset() == delta)
    }
}

impl From<(i32, i32)> for HexCoord {
    fn from((hx, hy): (i32, i32)) -> Self {
        Self::new(hx, hy)
    }
}

impl From<HexCoord> for (i32, i32) {
    fn from(coord: HexCoord) -> Self {
        (coord.hx, coord.hy)
    }
}

/// The six neighbour directions, numbered clockwise starting at up-left.
///
/// The slot numbering is load-bearing: the morphology tests compare raw slot
/// indices to detect cyclic adjacency.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HexDirection {
    /// Slot 0, axial delta `(-1, 0)`.
    UpLeft,
    /// Slot 1, axial delta `(0, -1)`.
    Up,
    /// Slot 2, axial delta `(1, -1)`.
    UpRight,
    /// Slot 3, axial delta `(1, 0)`.
    LowRight,
    /// Slot 4, axial delta `(0, 1)`.
    Down,
    /// Slot 5, axial delta `(-1, 1)`.
    LowLeft,
}

impl HexDirection {
    /// Every direction in slot order.
    pub const ALL: [HexDirection; 6] = [
        HexDirection::UpLeft,
        HexDirection::Up,
        HexDirection::UpRight,
        HexDirection::LowRight,
        HexDirection::Down,
        HexDirection::LowLeft,
    ];

    /// Slot index in `0..6`.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            HexDirection::UpLeft => 0,
            HexDirection::Up => 1,
            HexDirection::UpRight => 2,
            HexDirection::LowRight => 3,
            HexDirection::Down => 4,
            HexDirection::LowLeft => 5,
        }
    }

    /// Direction occupying the provided slot, wrapping modulo six.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 6]
    }

    /// Axial delta applied by a single step.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            HexDirection::UpLeft => (-1, 0),
            HexDirection::Up => (0, -1),
            HexDirection::UpRight => (1, -1),
            HexDirection::LowRight => (1, 0),
            HexDirection::Down => (0, 1),
            HexDirection::LowLeft => (-1, 1),
        }
    }

    /// Direction pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        Self::from_index(self.index() + 3)
    }

    /// Next slot in clockwise order.
    #[must_use]
    pub const fn clockwise(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Previous slot in clockwise order.
    #[must_use]
    pub const fn counter_clockwise(self) -> Self {
        Self::from_index(self.index() + 5)
    }
}

/// Cells at exactly `radius` steps from `center`.
///
/// The ring is walked as a spiral of six edges: for each running index in
/// `0..radius` the six rotations of the offset `(radius, -index)` are emitted
/// in turn. A radius of zero yields an empty ring.
#[must_use]
pub fn ring(center: HexCoord, radius: u32) -> Vec<HexCoord> {
    let Ok(r) = i32::try_from(radius) else {
        return Vec::new();
    };

    let mut cells = Vec::with_capacity(6 * radius as usize);
    for index in 0..r {
        let hy = -index;
        let spokes = [
            (r, hy),
            (r + hy, -r),
            (hy, -r - hy),
            (-r, -hy),
            (-r - hy, r),
            (-hy, r + hy),
        ];
        cells.extend(spokes.into_iter().map(|(dx, dy)| center.offset(dx, dy)));
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_ring_matches_adjacent_cells() {
        let center = HexCoord::new(3, -2);
        let mut ring_cells = ring(center, 1);
        let mut adjacent = center.adjacent().to_vec();
        ring_cells.sort();
        adjacent.sort();
        assert_eq!(ring_cells, adjacent);
    }

    #[test]
    fn ring_of_radius_zero_is_empty() {
        assert!(ring(HexCoord::new(0, 0), 0).is_empty());
    }

    #[test]
    fn second_ring_follows_spiral_order() {
        let cells = ring(HexCoord::new(0, 0), 2);
        let expected: Vec<HexCoord> = [
            (2, 0),
            (2, -2),
            (0, -2),
            (-2, 0),
            (-2, 2),
            (0, 2),
            (2, -1),
            (1, -2),
            (-1, -1),
            (-2, 1),
            (-1, 2),
            (1, 1),
        ]
        .into_iter()
        .map(HexCoord::from)
        .collect();
        assert_eq!(cells, expected);
    }

    #[test]
    fn direction_round_trips_through_offsets() {
        let origin = HexCoord::new(7, 4);
        for direction in HexDirection::ALL {
            let neighbour = origin.step(direction);
            assert_eq!(origin.direction_to(neighbour), Some(direction));
            assert_eq!(origin.distance(neighbour), 1);
        }
        assert_eq!(origin.direction_to(origin), None);
        assert_eq!(origin.direction_to(origin.offset(2, 0)), None);
    }

    #[test]
    fn rotation_helpers_wrap_around() {
        assert_eq!(HexDirection::UpLeft.counter_clockwise(), HexDirection::LowLeft);
        assert_eq!(HexDirection::LowLeft.clockwise(), HexDirection::UpLeft);
        assert_eq!(HexDirection::Up.opposite(), HexDirection::Down);
        assert_eq!(HexDirection::from_index(8), HexDirection::UpRight);
    }
}
