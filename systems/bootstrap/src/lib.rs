#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that lays out the organisms of a fresh run.
//!
//! Four ciliates are seeded near the board corners and a single amoeba is
//! grown around the board midpoint. The whole layout is checked against the
//! board before any world exists, so a bad configuration fails fast.

use std::collections::BTreeSet;

use hex_microbes_core::{
    ring, CiliateBody, Command, ConfigError, Event, HexBoard, HexCoord, HexDirection,
    OrganismColor, OrganismKind, PlacementError, SimulationConfig, CILIATE_COUNT,
};
use hex_microbes_world::{self as world, World};
use tracing::info;

/// Colors of the seeded ciliates in spawn order.
pub const CILIATE_COLORS: [OrganismColor; CILIATE_COUNT] = [
    OrganismColor::from_rgb(0, 0, 0),
    OrganismColor::from_rgb(255, 0, 0),
    OrganismColor::from_rgb(0, 255, 0),
    OrganismColor::from_rgb(0, 0, 255),
];

/// Color of the seeded amoeba.
pub const AMOEBA_COLOR: OrganismColor = OrganismColor::from_rgb(25, 255, 255);

/// Derives the opening layout of a run.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Builds the spawn commands for the configured layout.
    ///
    /// Ciliates come first in corner order, followed by the amoeba.
    pub fn layout(&self, config: &SimulationConfig) -> Result<Vec<Command>, ConfigError> {
        config.validate()?;
        let board = HexBoard::new(config.hex_diag);
        let mut claimed = Claims::new(&board);

        let mut commands = Vec::with_capacity(CILIATE_COUNT + 1);
        for (index, (body, color)) in ciliate_bodies(config)?
            .into_iter()
            .zip(CILIATE_COLORS)
            .enumerate()
        {
            claimed.claim(OrganismKind::Ciliate, index, body.cells())?;
            commands.push(Command::SpawnCiliate {
                color,
                cells: body.cells(),
            });
        }

        let center = board.midpoint();
        let mut body = vec![center];
        claimed.claim(OrganismKind::Amoeba, CILIATE_COUNT, [center])?;
        for radius in 1..=config.amoeba_radius {
            let layer = ring(center, radius);
            claimed.claim(OrganismKind::Amoeba, CILIATE_COUNT, layer.iter().copied())?;
            body.extend(layer);
        }
        commands.push(Command::SpawnAmoeba {
            color: AMOEBA_COLOR,
            body,
        });

        Ok(commands)
    }

    /// Creates a world populated with the configured layout.
    pub fn seed_world(&self, config: &SimulationConfig) -> Result<World, ConfigError> {
        let commands = self.layout(config)?;
        let organisms = commands.len();
        let mut world = World::new(config.hex_diag, config.hex_pixel_width);
        let mut events = Vec::new();
        for (index, command) in commands.into_iter().enumerate() {
            events.clear();
            world::apply(&mut world, command, &mut events);
            for event in &events {
                if let Event::SpawnRejected { kind, reason } = event {
                    return Err(ConfigError::Placement {
                        kind: *kind,
                        index,
                        reason: *reason,
                    });
                }
            }
        }

        info!(
            hex_diag = config.hex_diag,
            organisms,
            amoeba_radius = config.amoeba_radius,
            "world seeded"
        );
        Ok(world)
    }
}

/// Ciliate bodies in corner order: left, upper right, lower left, right.
fn ciliate_bodies(config: &SimulationConfig) -> Result<[CiliateBody; CILIATE_COUNT], ConfigError> {
    let diag = i32::try_from(config.hex_diag).map_err(|_| ConfigError::HexDiagOutOfRange {
        value: config.hex_diag,
    })?;
    let offset =
        i32::try_from(config.ciliate_offset).map_err(|_| ConfigError::CiliateOffsetOutOfRange {
            value: config.ciliate_offset,
            hex_diag: config.hex_diag,
        })?;
    let far = diag - offset;

    Ok([
        CiliateBody::centred_on(HexCoord::new(offset, 0), HexDirection::UpLeft),
        CiliateBody::centred_on(
            HexCoord::new(far, -(diag + 1 - 2 * offset).div_euclid(2)),
            HexDirection::LowLeft,
        ),
        CiliateBody::centred_on(
            HexCoord::new(offset, (diag - 2 * offset).div_euclid(2)),
            HexDirection::LowLeft,
        ),
        CiliateBody::centred_on(HexCoord::new(far, 0), HexDirection::UpLeft),
    ])
}

struct Claims<'a> {
    board: &'a HexBoard,
    taken: BTreeSet<HexCoord>,
}

impl<'a> Claims<'a> {
    fn new(board: &'a HexBoard) -> Self {
        Self {
            board,
            taken: BTreeSet::new(),
        }
    }

    fn claim<I>(&mut self, kind: OrganismKind, index: usize, cells: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = HexCoord>,
    {
        for cell in cells {
            let reason = if self.board.fence().contains(cell) {
                Some(PlacementError::Fenced(cell))
            } else if !self.board.contains(cell) {
                Some(PlacementError::OffBoard(cell))
            } else if !self.taken.insert(cell) {
                Some(PlacementError::Occupied(cell))
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(ConfigError::Placement {
                    kind,
                    index,
                    reason,
                });
            }
        }
        Ok(())
    }
}
