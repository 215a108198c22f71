use std::{collections::BTreeSet, convert::Infallible, num::NonZeroU32};

use hex_microbes_core::{
    CiliateBody, Command, Frame, HexBoard, HexCoord, OrganismColor, OrganismKind,
    SimulationConfig,
};
use hex_microbes_system_bootstrap::Bootstrap;
use hex_microbes_system_movement::{MotionWeights, Movement};
use hex_microbes_system_scheduler::{RunSummary, Scheduler};
use hex_microbes_world::{self as world, query, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn small_config(seed: u64, ticks: u32) -> SimulationConfig {
    SimulationConfig {
        hex_diag: 30,
        amoeba_radius: 3,
        ciliate_offset: 3,
        ticks,
        seed,
        ..SimulationConfig::default()
    }
}

fn scheduler(config: &SimulationConfig) -> Scheduler {
    let attempts = NonZeroU32::new(config.amoeba_max_attempts).expect("validated attempts");
    Scheduler::new(Movement::new(MotionWeights::default(), attempts).expect("default weights"))
}

fn record(config: &SimulationConfig) -> (Vec<Frame>, RunSummary) {
    let mut world = Bootstrap.seed_world(config).expect("layout fits");
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let mut frames = Vec::new();
    let summary = scheduler(config)
        .run(&mut world, config.ticks, &mut rng, |frame| {
            frames.push(frame.clone());
            Ok::<(), Infallible>(())
        })
        .expect("infallible sink");
    (frames, summary)
}

#[test]
fn same_seed_replays_identical_frames() {
    let config = small_config(0xdead_beef, 40);
    let (first, first_summary) = record(&config);
    let (second, second_summary) = record(&config);

    assert_eq!(first.len(), 41);
    assert_eq!(first, second);
    assert_eq!(first_summary, second_summary);
    assert_eq!(first_summary.ticks, 40);
}

#[test]
fn different_seeds_diverge() {
    let (first, _) = record(&small_config(1, 40));
    let (second, _) = record(&small_config(2, 40));
    assert_eq!(first[0], second[0]);
    assert_ne!(first.last(), second.last());
}

#[test]
fn long_run_preserves_board_invariants() {
    let config = small_config(77, 150);
    let board = HexBoard::new(config.hex_diag);
    let (frames, summary) = record(&config);
    let amoeba_size = frames[0]
        .organisms
        .iter()
        .find(|organism| organism.kind == OrganismKind::Amoeba)
        .map(|organism| organism.cells.len())
        .expect("amoeba seeded");

    for (index, frame) in frames.iter().enumerate() {
        assert_eq!(frame.tick as usize, index);
        assert_eq!(frame.organisms.len(), 5);

        let mut seen = BTreeSet::new();
        for organism in &frame.organisms {
            for cell in &organism.cells {
                assert!(board.contains(*cell), "cell {cell:?} left the board");
                assert!(!board.fence().contains(*cell), "cell {cell:?} in the fence");
                assert!(seen.insert(*cell), "cell {cell:?} shared at tick {}", frame.tick);
            }
            match organism.kind {
                OrganismKind::Ciliate => {
                    let cells: [HexCoord; 3] =
                        organism.cells.clone().try_into().expect("three cells");
                    assert!(CiliateBody::from_cells(cells).is_some());
                }
                OrganismKind::Amoeba => assert_eq!(organism.cells.len(), amoeba_size),
            }
        }
    }

    assert_eq!(summary.ticks, 150);
    assert_eq!(summary.amoeba_moves + summary.amoeba_stalls, 150 * 3);
    assert_eq!(summary.ciliate_moves + summary.ciliate_holds, 150 * 4);
    assert!(summary.amoeba_moves > 0);
    assert!(summary.ciliate_moves > 0);
}

#[test]
fn single_cell_amoeba_stalls_without_ending_the_tick() {
    let mut world = World::new(20, 19);
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SpawnAmoeba {
            color: OrganismColor::from_rgb(25, 255, 255),
            body: vec![HexCoord::new(10, 0)],
        },
        &mut events,
    );
    world::apply(
        &mut world,
        Command::SpawnCiliate {
            color: OrganismColor::from_rgb(0, 0, 0),
            cells: [HexCoord::new(4, 0), HexCoord::new(5, 0), HexCoord::new(6, 0)],
        },
        &mut events,
    );

    let movement = Movement::new(
        MotionWeights::default(),
        NonZeroU32::new(4).expect("non-zero"),
    )
    .expect("default weights");
    let scheduler = Scheduler::new(movement);
    let mut rng = ChaCha8Rng::seed_from_u64(12);
    let mut tick_events = Vec::new();
    let report = scheduler.step(&mut world, &mut rng, &mut tick_events);

    assert_eq!(report.tick, 1);
    assert_eq!(report.amoeba_moves, 0);
    assert_eq!(report.amoeba_stalls, 3);
    assert_eq!(report.ciliate_moves + report.ciliate_holds, 1);
    assert_eq!(query::tick(&world), 1);
    assert_eq!(
        query::amoeba(&world, query::amoeba_ids(&world)[0]).map(|body| body.len()),
        Some(1)
    );
}
