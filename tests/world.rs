use geosim::config::SimulationConfig;
use geosim::render::{recolor, rasterize};
use geosim::{BiomeType, GenError, GeoEngine, LodLevel, VisualizationMode, WorldData};

fn world(seed: f64, cols: usize, rows: usize, lod: LodLevel) -> WorldData {
    GeoEngine::new(SimulationConfig::with_seed(seed))
        .unwrap()
        .generate_world(cols, rows, lod)
        .unwrap()
}

fn in_unit(v: f32) -> bool {
    (0.0..=1.0).contains(&v)
}

#[test]
fn same_seed_same_world() {
    let a = world(42.0, 48, 24, LodLevel::Continents);
    let b = world(42.0, 48, 24, LodLevel::Continents);
    assert_eq!(a, b);
    assert_eq!(serde_json::to_string(&a).unwrap(), serde_json::to_string(&b).unwrap());
}

#[test]
fn different_seed_different_world() {
    let a = world(1.0, 32, 16, LodLevel::Continents);
    let b = world(2.0, 32, 16, LodLevel::Continents);
    assert_ne!(a.cells, b.cells);
}

#[test]
fn repeated_generation_reuses_the_planet() {
    let engine = GeoEngine::new(SimulationConfig::default()).unwrap();
    let first = engine.generate_world(20, 10, LodLevel::Regions).unwrap();
    let _ = engine.generate_world(64, 32, LodLevel::WholePlanet).unwrap();
    let again = engine.generate_world(20, 10, LodLevel::Regions).unwrap();
    assert_eq!(first, again);
}

#[test]
fn lod_changes_the_sampled_area() {
    let engine = GeoEngine::new(SimulationConfig::default()).unwrap();
    let coarse = engine.generate_world(24, 12, LodLevel::WholePlanet).unwrap();
    let fine = engine.generate_world(24, 12, LodLevel::Local).unwrap();
    assert_ne!(coarse.cells, fine.cells);
}

#[test]
fn cells_respect_their_ranges() {
    let w = world(7.0, 64, 32, LodLevel::Continents);
    let wl = SimulationConfig::default().world.ocean_coverage;
    assert_eq!(w.cells.len(), 64 * 32);

    for (i, c) in w.cells.iter().enumerate() {
        assert_eq!((c.x, c.y), (i % 64, i / 64));
        assert!(in_unit(c.elevation));
        assert!(in_unit(c.tectonic_stress));
        assert!(in_unit(c.volcanic_activity));
        assert!(in_unit(c.radiation_level));
        assert!(in_unit(c.slope));
        assert!(in_unit(c.precipitation));
        assert!(in_unit(c.moisture));
        assert!(in_unit(c.wind_exposure));
        assert!(in_unit(c.water_table_depth));
        assert!(in_unit(c.river_flow));
        assert!(in_unit(c.vegetation_density));
        assert!(c.temperature.is_finite());
        assert!((-11000.0..=8848.5).contains(&c.elevation_meters));
        assert!(c.moisture >= c.precipitation);
        assert_eq!(c.color, c.biome.color());

        if c.elevation < wl {
            assert_eq!(c.vegetation_density, 0.0);
            assert!(c.elevation_meters <= 0.0);
        } else {
            assert!(c.elevation_meters >= 0.0);
        }
    }
}

#[test]
fn flow_peaks_at_exactly_one() {
    let w = world(99.0, 48, 32, LodLevel::Countries);
    let max = w.cells.iter().map(|c| c.river_flow).fold(0.0f32, f32::max);
    assert!(max == 1.0 || w.cells.iter().all(|c| c.river_flow == 0.0));
    assert_eq!(w.hydrology.flow.data.len(), w.cells.len());
}

#[test]
fn cell_lookup_is_row_major() {
    let w = world(3.0, 10, 6, LodLevel::Countries);
    assert_eq!(w.cell(7, 4), &w.cells[4 * 10 + 7]);
    assert_eq!((w.cell(7, 4).x, w.cell(7, 4).y), (7, 4));
}

#[test]
fn stats_add_up() {
    let w = world(5.0, 40, 20, LodLevel::Continents);
    let stats = w.stats();
    assert_eq!(stats.biome_counts.values().sum::<usize>(), 800);
    assert!(in_unit(stats.land_fraction));
    assert_eq!(stats.lake_cells, w.cells.iter().filter(|c| c.is_lake).count());
    if let Some((x, y)) = stats.max_flow_cell {
        assert_eq!(w.cell(x, y).river_flow, 1.0);
    }
}

#[test]
fn recolor_is_idempotent_and_reversible() {
    let w = world(11.0, 24, 12, LodLevel::Continents);
    for mode in VisualizationMode::ALL {
        let once = recolor(&w.cells, mode);
        let twice = recolor(&once, mode);
        assert_eq!(once, twice);
        for (a, b) in once.iter().zip(&w.cells) {
            assert_eq!(a.with_color(b.color), *b);
        }
        assert_eq!(recolor(&once, VisualizationMode::Biome), w.cells);
    }
}

#[test]
fn rasterize_emits_rgba_per_cell() {
    let w = world(12.0, 9, 5, LodLevel::Countries);
    let rgba = rasterize(&w);
    assert_eq!(rgba.len(), 9 * 5 * 4);
    let c = w.cell(8, 4).color.0;
    assert_eq!(&rgba[(4 * 9 + 8) * 4..], &[c[0], c[1], c[2], 255]);
}

#[test]
fn bad_configs_are_rejected() {
    let mut cfg = SimulationConfig::default();
    cfg.geo.plate_count = 0;
    assert_eq!(GeoEngine::new(cfg).unwrap_err(), GenError::ZeroPlates);

    let cfg = SimulationConfig::with_seed(f64::NAN);
    assert!(matches!(GeoEngine::new(cfg).unwrap_err(), GenError::NonFiniteSeed(_)));

    let mut cfg = SimulationConfig::default();
    cfg.geo.lacunarity = 1e20;
    assert!(matches!(
        GeoEngine::new(cfg).unwrap_err(),
        GenError::InvalidParameter { name: "lacunarity", .. }
    ));

    let mut cfg = SimulationConfig::default();
    cfg.geo.persistence = 1e15;
    assert!(matches!(
        GeoEngine::new(cfg).unwrap_err(),
        GenError::InvalidParameter { name: "persistence", .. }
    ));

    let engine = GeoEngine::new(SimulationConfig::default()).unwrap();
    assert_eq!(
        engine.generate_world(5, 0, LodLevel::Countries).unwrap_err(),
        GenError::InvalidGrid { cols: 5, rows: 0 }
    );
}

#[test]
fn extreme_octave_settings_stay_in_range() {
    let mut cfg = SimulationConfig::with_seed(13.0);
    cfg.geo.persistence = 1.0;
    cfg.geo.lacunarity = 8.0;
    cfg.geo.continental_scale = 0.001;
    let w = GeoEngine::new(cfg).unwrap().generate_world(64, 32, LodLevel::Local).unwrap();
    for c in &w.cells {
        assert!(in_unit(c.elevation));
        assert!(in_unit(c.tectonic_stress));
        assert!(c.temperature.is_finite());
    }
}

#[test]
fn single_plate_planet_has_no_stress() {
    let mut cfg = SimulationConfig::default();
    cfg.geo.plate_count = 1;
    let w = GeoEngine::new(cfg).unwrap().generate_world(16, 8, LodLevel::Continents).unwrap();
    assert!(w.cells.iter().all(|c| c.tectonic_stress == 0.0));
}

#[test]
fn config_json_round_trip_replays_the_planet() {
    let cfg = SimulationConfig::with_seed(2024.0);
    let json = serde_json::to_string(&cfg).unwrap();
    assert!(json.contains("\"oceanCoverage\""));
    let back: SimulationConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, cfg);

    let a = GeoEngine::new(cfg).unwrap().generate_world(16, 8, LodLevel::Countries).unwrap();
    let b = GeoEngine::new(back).unwrap().generate_world(16, 8, LodLevel::Countries).unwrap();
    assert_eq!(a, b);
}

#[test]
fn world_json_uses_external_names() {
    let w = world(8.0, 4, 2, LodLevel::Countries);
    let v: serde_json::Value = serde_json::to_value(&w.cells[0]).unwrap();
    for key in ["elevationMeters", "riverFlow", "isLake", "soilType", "mineralDeposits", "biome", "color"] {
        assert!(v.get(key).is_some(), "missing {key}");
    }
    let biome: BiomeType = serde_json::from_value(v["biome"].clone()).unwrap();
    assert_eq!(biome, w.cells[0].biome);
    assert!(v["color"].as_str().unwrap().starts_with('#'));
}
