#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative organism arena for the hexagonal microbe simulation.

use std::collections::BTreeSet;

use hex_microbes_core::{
    BoardState, CiliateBody, Command, Event, HexBoard, HexCoord, OrganismColor, OrganismId,
    OrganismKind, PlacementError,
};
use tracing::{debug, warn};

/// Represents the authoritative simulation state.
///
/// Organisms live in an index-addressed arena; an [`OrganismId`] is the
/// organism's position in spawn order and never changes.
#[derive(Debug)]
pub struct World {
    board: HexBoard,
    hex_pixel_width: u32,
    organisms: Vec<Organism>,
    tick: u32,
}

impl World {
    /// Creates an empty world on a board with the provided diagonal.
    #[must_use]
    pub fn new(hex_diag: u32, hex_pixel_width: u32) -> Self {
        Self {
            board: HexBoard::new(hex_diag),
            hex_pixel_width,
            organisms: Vec::new(),
            tick: 0,
        }
    }

    fn organism(&self, organism: OrganismId) -> Option<&Organism> {
        let index = usize::try_from(organism.get()).ok()?;
        self.organisms.get(index)
    }

    fn organism_mut(&mut self, organism: OrganismId) -> Option<&mut Organism> {
        let index = usize::try_from(organism.get()).ok()?;
        self.organisms.get_mut(index)
    }

    fn next_id(&self) -> OrganismId {
        OrganismId::new(u32::try_from(self.organisms.len()).unwrap_or(u32::MAX))
    }

    fn check_cell(
        &self,
        state: &BoardState<'_>,
        cell: HexCoord,
        owner: Option<OrganismId>,
    ) -> Result<(), PlacementError> {
        if self.board.fence().contains(cell) {
            return Err(PlacementError::Fenced(cell));
        }
        if !self.board.contains(cell) {
            return Err(PlacementError::OffBoard(cell));
        }
        match state.occupant(cell) {
            Some(occupant) if Some(occupant) != owner => Err(PlacementError::Occupied(cell)),
            _ => Ok(()),
        }
    }

    fn spawn(&mut self, color: OrganismColor, shape: Shape) -> Result<OrganismId, PlacementError> {
        let state = query::board_state(self);
        for cell in shape.cells() {
            self.check_cell(&state, cell, None)?;
        }

        let id = self.next_id();
        self.organisms.push(Organism { id, color, shape });
        Ok(id)
    }

    fn move_ciliate(
        &mut self,
        organism: OrganismId,
        cells: [HexCoord; 3],
    ) -> Result<[HexCoord; 3], PlacementError> {
        let Some(Shape::Ciliate(current)) = self.organism(organism).map(|found| &found.shape)
        else {
            return Err(PlacementError::UnknownOrganism);
        };
        let from = current.cells();
        let body = CiliateBody::from_cells(cells).ok_or(PlacementError::MalformedCiliate)?;

        let state = query::board_state(self);
        for cell in body.cells() {
            self.check_cell(&state, cell, Some(organism))?;
        }

        if let Some(target) = self.organism_mut(organism) {
            target.shape = Shape::Ciliate(body);
        }
        Ok(from)
    }

    fn reshape_amoeba(
        &mut self,
        organism: OrganismId,
        add: HexCoord,
        remove: HexCoord,
    ) -> Result<(), PlacementError> {
        let Some(Shape::Amoeba(body)) = self.organism(organism).map(|found| &found.shape) else {
            return Err(PlacementError::UnknownOrganism);
        };
        if body.contains(&add) {
            return Err(PlacementError::AlreadyInBody(add));
        }
        if !body.contains(&remove) {
            return Err(PlacementError::NotInBody(remove));
        }

        let state = query::board_state(self);
        self.check_cell(&state, add, Some(organism))?;

        let reshaped: BTreeSet<HexCoord> = body
            .iter()
            .copied()
            .filter(|cell| *cell != remove)
            .chain([add])
            .collect();
        if let Some(target) = self.organism_mut(organism) {
            target.shape = Shape::Amoeba(reshaped);
        }
        Ok(())
    }
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Every command is atomic: it is either applied in full or refused with a
/// rejection event, leaving the world untouched.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::SpawnCiliate { color, cells } => {
            let kind = OrganismKind::Ciliate;
            let result = CiliateBody::from_cells(cells)
                .ok_or(PlacementError::MalformedCiliate)
                .and_then(|body| world.spawn(color, Shape::Ciliate(body)));
            push_spawn_outcome(kind, result, out_events);
        }
        Command::SpawnAmoeba { color, body } => {
            let kind = OrganismKind::Amoeba;
            let cells: BTreeSet<HexCoord> = body.iter().copied().collect();
            let result = if cells.is_empty() || cells.len() != body.len() {
                Err(PlacementError::MalformedAmoeba)
            } else {
                world.spawn(color, Shape::Amoeba(cells))
            };
            push_spawn_outcome(kind, result, out_events);
        }
        Command::MoveCiliate {
            organism,
            motion,
            cells,
        } => match world.move_ciliate(organism, cells) {
            Ok(from) => {
                debug!(organism = organism.get(), ?motion, "ciliate moved");
                out_events.push(Event::CiliateMoved {
                    organism,
                    motion,
                    from,
                    to: cells,
                });
            }
            Err(reason) => push_move_rejection(organism, reason, out_events),
        },
        Command::ReshapeAmoeba {
            organism,
            add,
            remove,
        } => match world.reshape_amoeba(organism, add, remove) {
            Ok(()) => {
                debug!(organism = organism.get(), ?add, ?remove, "amoeba reshaped");
                out_events.push(Event::AmoebaReshaped {
                    organism,
                    added: add,
                    removed: remove,
                });
            }
            Err(reason) => push_move_rejection(organism, reason, out_events),
        },
        Command::Tick => {
            world.tick = world.tick.saturating_add(1);
            out_events.push(Event::TickAdvanced { tick: world.tick });
        }
    }
}

fn push_spawn_outcome(
    kind: OrganismKind,
    result: Result<OrganismId, PlacementError>,
    out_events: &mut Vec<Event>,
) {
    match result {
        Ok(organism) => {
            debug!(organism = organism.get(), ?kind, "organism spawned");
            out_events.push(Event::OrganismSpawned { organism, kind });
        }
        Err(reason) => {
            warn!(?kind, %reason, "spawn rejected");
            out_events.push(Event::SpawnRejected { kind, reason });
        }
    }
}

fn push_move_rejection(organism: OrganismId, reason: PlacementError, out_events: &mut Vec<Event>) {
    warn!(organism = organism.get(), %reason, "move rejected");
    out_events.push(Event::MoveRejected { organism, reason });
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::collections::BTreeSet;

    use hex_microbes_core::{
        BoardState, CiliateBody, Frame, HexBoard, HexCoord, OrganismFrame, OrganismId,
    };

    use super::{Shape, World};

    /// Provides read-only access to the board geometry.
    #[must_use]
    pub fn board(world: &World) -> &HexBoard {
        &world.board
    }

    /// Index of the most recently opened tick; zero before the first tick.
    #[must_use]
    pub fn tick(world: &World) -> u32 {
        world.tick
    }

    /// Builds a fresh occupancy snapshot covering every organism.
    #[must_use]
    pub fn board_state(world: &World) -> BoardState<'_> {
        BoardState::from_organisms(
            &world.board,
            world
                .organisms
                .iter()
                .map(|organism| (organism.id, organism.shape.cells())),
        )
    }

    /// Identifiers of every ciliate in spawn order.
    #[must_use]
    pub fn ciliate_ids(world: &World) -> Vec<OrganismId> {
        world
            .organisms
            .iter()
            .filter(|organism| matches!(organism.shape, Shape::Ciliate(_)))
            .map(|organism| organism.id)
            .collect()
    }

    /// Identifiers of every amoeba in spawn order.
    #[must_use]
    pub fn amoeba_ids(world: &World) -> Vec<OrganismId> {
        world
            .organisms
            .iter()
            .filter(|organism| matches!(organism.shape, Shape::Amoeba(_)))
            .map(|organism| organism.id)
            .collect()
    }

    /// Current body of the ciliate, if the identifier names one.
    #[must_use]
    pub fn ciliate(world: &World, organism: OrganismId) -> Option<CiliateBody> {
        match world.organism(organism)?.shape {
            Shape::Ciliate(body) => Some(body),
            Shape::Amoeba(_) => None,
        }
    }

    /// Current body of the amoeba, if the identifier names one.
    #[must_use]
    pub fn amoeba(world: &World, organism: OrganismId) -> Option<&BTreeSet<HexCoord>> {
        match &world.organism(organism)?.shape {
            Shape::Amoeba(body) => Some(body),
            Shape::Ciliate(_) => None,
        }
    }

    /// Captures the renderer-facing picture of every organism.
    #[must_use]
    pub fn frame(world: &World) -> Frame {
        Frame {
            tick: world.tick,
            hex_diag: world.board.hex_diag(),
            hex_pixel_width: world.hex_pixel_width,
            organisms: world
                .organisms
                .iter()
                .map(|organism| OrganismFrame {
                    kind: organism.shape.kind(),
                    color: organism.color,
                    cells: organism.shape.cells(),
                })
                .collect(),
        }
    }
}

#[derive(Clone, Debug)]
struct Organism {
    id: OrganismId,
    color: OrganismColor,
    shape: Shape,
}

#[derive(Clone, Debug)]
enum Shape {
    Ciliate(CiliateBody),
    Amoeba(BTreeSet<HexCoord>),
}

impl Shape {
    fn kind(&self) -> OrganismKind {
        match self {
            Shape::Ciliate(_) => OrganismKind::Ciliate,
            Shape::Amoeba(_) => OrganismKind::Amoeba,
        }
    }

    fn cells(&self) -> Vec<HexCoord> {
        match self {
            Shape::Ciliate(body) => body.cells().to_vec(),
            Shape::Amoeba(body) => body.iter().copied().collect(),
        }
    }
}
