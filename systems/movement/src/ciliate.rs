use hex_microbes_core::{BoardState, CiliateBody, CiliateMotion, OrganismId};
use tracing::trace;

/// Outcome of a single ciliate draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CiliatePlan {
    organism: OrganismId,
    motion: CiliateMotion,
    destination: Option<CiliateBody>,
}

impl CiliatePlan {
    /// Ciliate the plan belongs to.
    #[must_use]
    pub const fn organism(&self) -> OrganismId {
        self.organism
    }

    /// Motion that was drawn.
    #[must_use]
    pub const fn motion(&self) -> CiliateMotion {
        self.motion
    }

    /// Body after the motion; `None` when the motion was illegal and the ciliate holds still.
    #[must_use]
    pub const fn destination(&self) -> Option<CiliateBody> {
        self.destination
    }
}

/// Body the ciliate would occupy after `motion`, ignoring the board.
///
/// Translations move all three cells one step along the body axis. Rotations
/// pivot about mid, swinging the head one slot and keeping the tail opposite.
#[must_use]
pub fn propose(body: &CiliateBody, motion: CiliateMotion) -> CiliateBody {
    let orientation = body.orientation();
    match motion {
        CiliateMotion::Forward => CiliateBody::centred_on(body.mid().step(orientation), orientation),
        CiliateMotion::Backward => {
            CiliateBody::centred_on(body.mid().step(orientation.opposite()), orientation)
        }
        CiliateMotion::RotatePositive => {
            CiliateBody::centred_on(body.mid(), orientation.counter_clockwise())
        }
        CiliateMotion::RotateNegative => CiliateBody::centred_on(body.mid(), orientation.clockwise()),
    }
}

pub(crate) fn plan(
    organism: OrganismId,
    body: &CiliateBody,
    motion: CiliateMotion,
    board: &BoardState<'_>,
) -> CiliatePlan {
    let candidate = propose(body, motion);
    let legal = candidate
        .cells()
        .iter()
        .all(|cell| board.is_vacant_for(*cell, organism));
    if !legal {
        trace!(organism = organism.get(), ?motion, "ciliate motion blocked");
    }
    CiliatePlan {
        organism,
        motion,
        destination: legal.then_some(candidate),
    }
}
