use hex_microbes_core::{
    ConfigError, HexCoord, OrganismKind, PlacementError, SimulationConfig,
};
use hex_microbes_system_bootstrap::{Bootstrap, AMOEBA_COLOR, CILIATE_COLORS};
use hex_microbes_world::query;

#[test]
fn default_config_seeds_four_ciliates_and_an_amoeba() {
    let config = SimulationConfig::default();
    let world = Bootstrap.seed_world(&config).expect("default layout fits");
    let frame = query::frame(&world);

    assert_eq!(frame.tick, 0);
    assert_eq!(frame.hex_diag, config.hex_diag);
    assert_eq!(frame.hex_pixel_width, config.hex_pixel_width);

    let kinds: Vec<OrganismKind> = frame.organisms.iter().map(|organism| organism.kind).collect();
    assert_eq!(
        kinds,
        vec![
            OrganismKind::Ciliate,
            OrganismKind::Ciliate,
            OrganismKind::Ciliate,
            OrganismKind::Ciliate,
            OrganismKind::Amoeba,
        ]
    );
    for (organism, color) in frame.organisms.iter().zip(CILIATE_COLORS) {
        assert_eq!(organism.color, color);
        assert_eq!(organism.cells.len(), 3);
    }

    let amoeba = &frame.organisms[4];
    let radius = config.amoeba_radius as usize;
    assert_eq!(amoeba.color, AMOEBA_COLOR);
    assert_eq!(amoeba.cells.len(), 1 + 3 * radius * (radius + 1));
    assert!(amoeba.cells.contains(&HexCoord::new(30, 0)));
}

#[test]
fn overlapping_ciliates_fail_before_the_world_exists() {
    let config = SimulationConfig {
        hex_diag: 8,
        ciliate_offset: 5,
        amoeba_radius: 1,
        ..SimulationConfig::default()
    };
    assert_eq!(
        Bootstrap.layout(&config).err(),
        Some(ConfigError::Placement {
            kind: OrganismKind::Ciliate,
            index: 1,
            reason: PlacementError::Occupied(HexCoord::new(4, 0)),
        })
    );
}

#[test]
fn oversized_amoeba_runs_into_the_fence() {
    let config = SimulationConfig {
        amoeba_radius: 40,
        ..SimulationConfig::default()
    };
    let error = Bootstrap.seed_world(&config).err();
    assert!(
        matches!(
            error,
            Some(ConfigError::Placement {
                kind: OrganismKind::Amoeba,
                index: 4,
                reason: PlacementError::Fenced(_),
            })
        ),
        "unexpected outcome: {error:?}"
    );
}

#[test]
fn scalar_bounds_are_checked_first() {
    let config = SimulationConfig {
        hex_diag: 2,
        ..SimulationConfig::default()
    };
    assert_eq!(
        Bootstrap.layout(&config).err(),
        Some(ConfigError::HexDiagOutOfRange { value: 2 })
    );
}
