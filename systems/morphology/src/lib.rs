#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure morphology system that classifies the boundary cells of an amoeba.
//!
//! Every perimeter cell is labelled from two counts: how many of its
//! neighbours are themselves perimeter cells and how many are interior body
//! cells. Where equal counts admit two shapes, the tie is broken by the
//! arrangement of the neighbour slots around the cell.

use std::collections::{BTreeMap, BTreeSet};

use hex_microbes_core::HexCoord;

const ALL_SLOTS: u8 = 0b11_1111;

/// Role a perimeter cell plays in the amoeba's outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PerimeterClass {
    /// Tip of a one-cell-wide appendage.
    Fingertip,
    /// Thin link joining a fingertip to the main mass.
    Neck,
    /// Cell where an appendage joins the main mass.
    Base,
    /// Any other perimeter cell.
    Plain,
}

/// Set of neighbour slots around a cell, numbered as in [`hex_microbes_core::HexDirection`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct SlotSet(u8);

impl SlotSet {
    /// Collects the slots whose neighbour satisfies `predicate`.
    pub fn matching<F>(cell: HexCoord, predicate: F) -> Self
    where
        F: Fn(HexCoord) -> bool,
    {
        let bits = cell
            .adjacent()
            .into_iter()
            .enumerate()
            .filter(|(_, neighbour)| predicate(*neighbour))
            .fold(0u8, |bits, (slot, _)| bits | (1u8 << slot));
        Self(bits)
    }

    /// Number of slots in the set.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Reports whether the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Slots missing from the set.
    #[must_use]
    pub const fn complement(self) -> Self {
        Self(!self.0 & ALL_SLOTS)
    }

    /// Reports whether the slot belongs to the set.
    #[must_use]
    pub const fn contains(self, slot: usize) -> bool {
        slot < 6 && self.0 & (1u8 << slot) != 0
    }

    /// Slot indices in ascending order.
    pub fn indices(self) -> impl Iterator<Item = usize> {
        (0..6).filter(move |slot| self.contains(*slot))
    }

    /// Cyclic distance between the two slots of a pair; `None` unless the set has exactly two.
    #[must_use]
    pub fn pair_spacing(self) -> Option<usize> {
        let mut slots = self.indices();
        match (slots.next(), slots.next(), slots.next()) {
            (Some(first), Some(second), None) => {
                let diff = second - first;
                Some(diff.min(6 - diff))
            }
            _ => None,
        }
    }

    /// Two occupied slots side by side: a bump on a flat wall.
    #[must_use]
    pub fn is_wart(self) -> bool {
        self.pair_spacing() == Some(1)
    }

    /// Three occupied slots in consecutive cyclic positions: the crux of a `Y`.
    #[must_use]
    pub fn is_crux_of_y(self) -> bool {
        self.len() == 3 && (0..6).any(|start| (0..3).all(|step| self.contains((start + step) % 6)))
    }

    /// Two empty slots two apart: a stem meeting a wall of three.
    #[must_use]
    pub fn is_three_to_one(self) -> bool {
        self.complement().pair_spacing() == Some(2)
    }

    /// Two empty slots directly opposite: the waist of a dog bone.
    #[must_use]
    pub fn is_dog_bone(self) -> bool {
        self.complement().pair_spacing() == Some(3)
    }
}

/// Body cells with at least one neighbour outside the body.
#[must_use]
pub fn perimeter(body: &BTreeSet<HexCoord>) -> BTreeSet<HexCoord> {
    body.iter()
        .copied()
        .filter(|cell| cell.adjacent().iter().any(|neighbour| !body.contains(neighbour)))
        .collect()
}

/// Classification of an amoeba's perimeter, recomputed from the body on demand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Morphology {
    classes: BTreeMap<HexCoord, PerimeterClass>,
}

impl Morphology {
    /// Classifies every perimeter cell of `body`.
    #[must_use]
    pub fn classify(body: &BTreeSet<HexCoord>) -> Self {
        let outline = perimeter(body);
        let classes = outline
            .iter()
            .map(|&cell| (cell, classify_cell(cell, body, &outline)))
            .collect();
        Self { classes }
    }

    /// Perimeter cells in coordinate order.
    pub fn perimeter(&self) -> impl Iterator<Item = HexCoord> + '_ {
        self.classes.keys().copied()
    }

    /// Number of perimeter cells.
    #[must_use]
    pub fn perimeter_len(&self) -> usize {
        self.classes.len()
    }

    /// Reports whether the cell lies on the perimeter.
    #[must_use]
    pub fn is_perimeter(&self, cell: HexCoord) -> bool {
        self.classes.contains_key(&cell)
    }

    /// Class of a perimeter cell; `None` for interior or foreign cells.
    #[must_use]
    pub fn class_of(&self, cell: HexCoord) -> Option<PerimeterClass> {
        self.classes.get(&cell).copied()
    }

    /// Perimeter cells carrying the provided class.
    #[must_use]
    pub fn cells_of(&self, class: PerimeterClass) -> BTreeSet<HexCoord> {
        self.classes
            .iter()
            .filter(|(_, found)| **found == class)
            .map(|(cell, _)| *cell)
            .collect()
    }

    /// Perimeter without its necks and bases; fingertips are kept.
    #[must_use]
    pub fn reduced_perimeter(&self) -> BTreeSet<HexCoord> {
        self.classes
            .iter()
            .filter(|(_, class)| !matches!(class, PerimeterClass::Neck | PerimeterClass::Base))
            .map(|(cell, _)| *cell)
            .collect()
    }
}

fn classify_cell(
    cell: HexCoord,
    body: &BTreeSet<HexCoord>,
    outline: &BTreeSet<HexCoord>,
) -> PerimeterClass {
    let mut perimeter_count = 0;
    let mut interior_count = 0;
    for neighbour in cell.adjacent() {
        if outline.contains(&neighbour) {
            perimeter_count += 1;
        } else if body.contains(&neighbour) {
            interior_count += 1;
        }
    }

    let slots = SlotSet::matching(cell, |neighbour| body.contains(&neighbour));
    match (perimeter_count, interior_count) {
        (1, 0) => PerimeterClass::Fingertip,
        (2, 0) if !slots.is_wart() => PerimeterClass::Neck,
        (3, 0) if !slots.is_crux_of_y() => PerimeterClass::Base,
        (3, 1) if slots.is_three_to_one() => PerimeterClass::Base,
        (4, 0) if slots.is_dog_bone() => PerimeterClass::Neck,
        (4, 0) if slots.is_three_to_one() => PerimeterClass::Base,
        _ => PerimeterClass::Plain,
    }
}
