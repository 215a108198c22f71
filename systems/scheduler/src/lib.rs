#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Step scheduler that advances the simulation one tick at a time.
//!
//! Each tick every amoeba takes [`AMOEBA_MOVES_PER_TICK`] moves, then every
//! ciliate takes one. A fresh [`hex_microbes_core::BoardState`] is read from
//! the world before each individual move, so later organisms see the result
//! of earlier ones.

use hex_microbes_core::{Command, Event, Frame, OrganismId, AMOEBA_MOVES_PER_TICK};
use hex_microbes_system_movement::Movement;
use hex_microbes_world::{self as world, query, World};
use rand::Rng;
use tracing::{info, warn};

/// Counts of what happened during a single tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Index of the tick that was simulated.
    pub tick: u32,
    /// Amoeba moves committed.
    pub amoeba_moves: u32,
    /// Amoeba moves abandoned after exhausting their attempts.
    pub amoeba_stalls: u32,
    /// Ciliate moves committed.
    pub ciliate_moves: u32,
    /// Ciliates that drew an illegal motion and kept their cells.
    pub ciliate_holds: u32,
}

/// Totals accumulated over a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of ticks simulated.
    pub ticks: u32,
    /// Amoeba moves committed.
    pub amoeba_moves: u32,
    /// Amoeba moves abandoned after exhausting their attempts.
    pub amoeba_stalls: u32,
    /// Ciliate moves committed.
    pub ciliate_moves: u32,
    /// Ciliates that kept their cells.
    pub ciliate_holds: u32,
}

impl RunSummary {
    fn absorb(&mut self, report: &TickReport) {
        self.ticks += 1;
        self.amoeba_moves += report.amoeba_moves;
        self.amoeba_stalls += report.amoeba_stalls;
        self.ciliate_moves += report.ciliate_moves;
        self.ciliate_holds += report.ciliate_holds;
    }
}

/// Drives the movement system against the world.
#[derive(Debug)]
pub struct Scheduler {
    movement: Movement,
}

impl Scheduler {
    /// Creates a scheduler around the provided movement planner.
    #[must_use]
    pub fn new(movement: Movement) -> Self {
        Self { movement }
    }

    /// Simulates one tick, appending every world event to `out_events`.
    pub fn step<R>(&self, world: &mut World, rng: &mut R, out_events: &mut Vec<Event>) -> TickReport
    where
        R: Rng + ?Sized,
    {
        world::apply(world, Command::Tick, out_events);
        let mut report = TickReport {
            tick: query::tick(world),
            ..TickReport::default()
        };

        for amoeba in query::amoeba_ids(world) {
            for _ in 0..AMOEBA_MOVES_PER_TICK {
                if self.advance_amoeba(world, amoeba, rng, out_events) {
                    report.amoeba_moves += 1;
                } else {
                    report.amoeba_stalls += 1;
                }
            }
        }

        for ciliate in query::ciliate_ids(world) {
            if self.advance_ciliate(world, ciliate, rng, out_events) {
                report.ciliate_moves += 1;
            } else {
                report.ciliate_holds += 1;
            }
        }

        info!(
            tick = report.tick,
            amoeba_moves = report.amoeba_moves,
            amoeba_stalls = report.amoeba_stalls,
            ciliate_moves = report.ciliate_moves,
            ciliate_holds = report.ciliate_holds,
            "tick complete"
        );
        report
    }

    /// Simulates `ticks` ticks, handing the opening frame and each following frame to `on_frame`.
    ///
    /// Stops at the first error returned by `on_frame`.
    pub fn run<R, F, E>(
        &self,
        world: &mut World,
        ticks: u32,
        rng: &mut R,
        mut on_frame: F,
    ) -> Result<RunSummary, E>
    where
        R: Rng + ?Sized,
        F: FnMut(&Frame) -> Result<(), E>,
    {
        let mut summary = RunSummary::default();
        let mut events = Vec::new();
        on_frame(&query::frame(world))?;
        for _ in 0..ticks {
            events.clear();
            let report = self.step(world, rng, &mut events);
            summary.absorb(&report);
            on_frame(&query::frame(world))?;
        }
        Ok(summary)
    }

    fn advance_amoeba<R>(
        &self,
        world: &mut World,
        amoeba: OrganismId,
        rng: &mut R,
        out_events: &mut Vec<Event>,
    ) -> bool
    where
        R: Rng + ?Sized,
    {
        let planned = {
            let Some(body) = query::amoeba(world, amoeba) else {
                return false;
            };
            let state = query::board_state(world);
            self.movement.plan_amoeba(amoeba, body, &state, rng)
        };

        match planned {
            Ok(plan) => {
                world::apply(world, plan.command(), out_events);
                matches!(out_events.last(), Some(Event::AmoebaReshaped { .. }))
            }
            Err(error) => {
                warn!(organism = amoeba.get(), %error, "amoeba stalled");
                false
            }
        }
    }

    fn advance_ciliate<R>(
        &self,
        world: &mut World,
        ciliate: OrganismId,
        rng: &mut R,
        out_events: &mut Vec<Event>,
    ) -> bool
    where
        R: Rng + ?Sized,
    {
        let plan = {
            let Some(body) = query::ciliate(world, ciliate) else {
                return false;
            };
            let state = query::board_state(world);
            self.movement.plan_ciliate(ciliate, &body, &state, rng)
        };

        match plan.command() {
            Some(command) => {
                world::apply(world, command, out_events);
                matches!(out_events.last(), Some(Event::CiliateMoved { .. }))
            }
            None => false,
        }
    }
}
