use std::collections::BTreeSet;

use hex_microbes_core::{ring, BoardState, HexCoord, OrganismId};
use hex_microbes_system_morphology::{Morphology, PerimeterClass, SlotSet};
use rand::{seq::SliceRandom, Rng};
use tracing::trace;

use crate::MovementError;

/// Innermost ring searched for a cell to retract.
pub const FIRST_REMOVAL_RADIUS: u32 = 2;

/// Single-cell reshaping chosen for an amoeba.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AmoebaPlan {
    organism: OrganismId,
    add: HexCoord,
    remove: HexCoord,
    attempts: u32,
}

impl AmoebaPlan {
    /// Amoeba the plan belongs to.
    #[must_use]
    pub const fn organism(&self) -> OrganismId {
        self.organism
    }

    /// Cell joining the body.
    #[must_use]
    pub const fn add(&self) -> HexCoord {
        self.add
    }

    /// Cell leaving the body.
    #[must_use]
    pub const fn remove(&self) -> HexCoord {
        self.remove
    }

    /// Attempts spent, counting the successful one.
    #[must_use]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }
}

/// Reports whether growing into `candidate` keeps the outline free of new necks and bridges.
///
/// `perimeter` holds the perimeter of the body before growth.
#[must_use]
pub fn accepts_growth(candidate: HexCoord, perimeter: &BTreeSet<HexCoord>) -> bool {
    let slots = SlotSet::matching(candidate, |neighbour| perimeter.contains(&neighbour));
    match slots.len() {
        2 => slots.is_wart(),
        3 => slots.is_crux_of_y(),
        4 => !slots.is_dog_bone() && !slots.is_three_to_one(),
        _ => true,
    }
}

pub(crate) fn plan<R>(
    organism: OrganismId,
    body: &BTreeSet<HexCoord>,
    board: &BoardState<'_>,
    max_attempts: u32,
    rng: &mut R,
) -> Result<AmoebaPlan, MovementError>
where
    R: Rng + ?Sized,
{
    let morphology = Morphology::classify(body);
    let outline: Vec<HexCoord> = morphology.perimeter().collect();
    let outline_set: BTreeSet<HexCoord> = outline.iter().copied().collect();
    let reduced = morphology.reduced_perimeter();

    for attempt in 1..=max_attempts {
        let Some(&site) = outline.choose(rng) else {
            break;
        };

        let Some(add) = select_growth(site, body, &outline_set, board, rng) else {
            trace!(organism = organism.get(), attempt, "no growth around site");
            continue;
        };

        let Some(remove) = select_retraction(add, &reduced, &morphology, rng) else {
            trace!(organism = organism.get(), attempt, "no retractable cell");
            continue;
        };

        if !board.is_vacant_for(add, organism) {
            trace!(organism = organism.get(), attempt, "growth cell taken");
            continue;
        }

        return Ok(AmoebaPlan {
            organism,
            add,
            remove,
            attempts: attempt,
        });
    }

    Err(MovementError::NoLegalMove {
        organism,
        attempts: max_attempts,
    })
}

fn select_growth<R>(
    site: HexCoord,
    body: &BTreeSet<HexCoord>,
    outline: &BTreeSet<HexCoord>,
    board: &BoardState<'_>,
    rng: &mut R,
) -> Option<HexCoord>
where
    R: Rng + ?Sized,
{
    let candidates: Vec<HexCoord> = board
        .neighbors(site)
        .into_iter()
        .flatten()
        .filter(|cell| !body.contains(cell))
        .filter(|cell| accepts_growth(*cell, outline))
        .collect();
    candidates.choose(rng).copied()
}

/// Picks a reduced-perimeter cell from the outer half of the rings that surround `add`.
///
/// Rings are scanned outward from [`FIRST_REMOVAL_RADIUS`]. Collection starts
/// at the first ring that meets the reduced perimeter and stops at the next
/// ring that misses it.
fn select_retraction<R>(
    add: HexCoord,
    reduced: &BTreeSet<HexCoord>,
    morphology: &Morphology,
    rng: &mut R,
) -> Option<HexCoord>
where
    R: Rng + ?Sized,
{
    let farthest = reduced.iter().map(|cell| add.distance(*cell)).max()?;

    let mut rings: Vec<Vec<HexCoord>> = Vec::new();
    for radius in FIRST_REMOVAL_RADIUS..=farthest {
        let hits: Vec<HexCoord> = ring(add, radius)
            .into_iter()
            .filter(|cell| reduced.contains(cell))
            .collect();
        if !hits.is_empty() {
            rings.push(hits);
        } else if !rings.is_empty() {
            break;
        }
    }

    let last = rings.len().checked_sub(1)?;
    let first_outer = (last + 1) / 2;
    let chosen = &rings[rng.gen_range(first_outer..=last)];

    let settled: Vec<HexCoord> = chosen
        .iter()
        .copied()
        .filter(|cell| morphology.class_of(*cell) != Some(PerimeterClass::Fingertip))
        .collect();
    let pool = if settled.is_empty() { chosen } else { &settled };
    pool.choose(rng).copied()
}
