use std::time::Instant;

use log::{debug, info};
use rayon::prelude::*;

use crate::biome::{classify_biome, classify_soil};
use crate::climate::{ClimateSimulator, ocean_proximity};
use crate::config::SimulationConfig;
use crate::elevation::{GeologyBuffers, Tectonics, build_geology};
use crate::error::GenError;
use crate::grid::{Grid, neighbors4};
use crate::hydrology::{HydrologyResult, simulate_hydrology};
use crate::lod::LodLevel;
use crate::minerals;
use crate::noise::NoiseBank;
use crate::plates::PlateField;
use crate::plates::seed::scatter_plates;
use crate::render::{self, VisualizationMode};
use crate::rng::{Rng, seed_bits};
use crate::world::{TerrainCell, WorldData};

const ABYSS_M: f32 = -11000.0;
const SUMMIT_M: f32 = 8848.0;

pub struct Timing {
    pub name: &'static str,
    pub ms: f64,
}

/// A planet: plate seeds and noise fields fixed at construction.
///
/// Repeated `generate_world` calls cut different grid sizes / LODs out of the
/// same planet. Changing the config means building a new engine.
#[derive(Clone, Debug)]
pub struct GeoEngine {
    config: SimulationConfig,
    noise: NoiseBank,
    climate: ClimateSimulator,
    plates: PlateField,
}

impl GeoEngine {
    /// Validate `config`, then draw noise fields, climate fields and plate
    /// seeds from one RNG stream seeded by `world.seed`.
    pub fn new(config: SimulationConfig) -> Result<Self, GenError> {
        config.validate()?;

        let mut rng = Rng::new(seed_bits(config.world.seed));
        let noise = NoiseBank::draw(&mut rng);
        let climate = ClimateSimulator::new(&config.climate, &mut rng);

        let scale = config.geo.continental_scale;
        let seeds = scatter_plates(&mut rng, config.geo.plate_count, scale * 3.0, config.world.ocean_coverage);
        let plates = PlateField::new(seeds, noise.warp, noise.tectonic, scale);

        debug!(
            "engine seed={} plates={} ({} continental)",
            config.world.seed,
            plates.plates().len(),
            plates.plates().iter().filter(|p| p.is_continental).count()
        );

        Ok(Self { config, noise, climate, plates })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn plates(&self) -> &PlateField {
        &self.plates
    }

    /// Same as [`render::recolor`]; needs no engine state.
    pub fn recolor(cells: &[TerrainCell], mode: VisualizationMode) -> Vec<TerrainCell> {
        render::recolor(cells, mode)
    }

    pub fn generate_world(&self, cols: usize, rows: usize, lod: LodLevel) -> Result<WorldData, GenError> {
        self.generate_world_timed(cols, rows, lod).map(|(world, _)| world)
    }

    /// Run the four passes (geology, hydrology, ocean proximity, assembly) in
    /// order. Each pass reads only the finished output of earlier passes.
    pub fn generate_world_timed(
        &self,
        cols: usize,
        rows: usize,
        lod: LodLevel,
    ) -> Result<(WorldData, Vec<Timing>), GenError> {
        if cols == 0 || rows == 0 {
            return Err(GenError::InvalidGrid { cols, rows });
        }

        let lod_cfg = lod.config();
        let km = lod_cfg.km_per_cell;
        let water_level = self.config.water_level();
        let mut timings = Vec::new();
        let total_start = Instant::now();

        // 1. Geology
        let t = Instant::now();
        let tectonics = Tectonics { noise: &self.noise, plates: &self.plates, geo: &self.config.geo };
        let geology = build_geology(&tectonics, cols, rows, km, lod_cfg.octaves);
        push_timing(&mut timings, "elevation", t);

        // 2. Hydrology over a first precipitation estimate
        let t = Instant::now();
        let mut moisture = Grid::new(cols, rows);
        moisture.data.par_chunks_mut(cols).enumerate().for_each(|(y, row)| {
            for (x, out) in row.iter_mut().enumerate() {
                let e = geology.elevation.data[y * cols + x];
                *out = self.climate.precipitation(e, 0.5, true, x as f32 * km, y as f32 * km);
            }
        });
        let hydrology = simulate_hydrology(&geology.elevation, &moisture, water_level);
        push_timing(&mut timings, "hydrology", t);

        // 3. Ocean proximity
        let t = Instant::now();
        let ocean = ocean_proximity(&geology.elevation, water_level);
        push_timing(&mut timings, "ocean_proximity", t);

        // 4. Cell assembly
        let t = Instant::now();
        let ctx = Assembly { engine: self, geology: &geology, hydrology: &hydrology, ocean: &ocean, km, water_level };
        let cells: Vec<TerrainCell> = (0..cols * rows).into_par_iter().map(|i| ctx.cell(i)).collect();
        push_timing(&mut timings, "assembly", t);

        let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
        timings.push(Timing { name: "TOTAL", ms: total_ms });
        info!("generated {cols}x{rows} world at LOD {} ({}) in {total_ms:.1} ms", lod.index(), lod_cfg.name);

        Ok((WorldData { cols, rows, cells, hydrology }, timings))
    }
}

fn push_timing(timings: &mut Vec<Timing>, name: &'static str, start: Instant) {
    let ms = start.elapsed().as_secs_f64() * 1000.0;
    debug!("pass {name}: {ms:.2} ms");
    timings.push(Timing { name, ms });
}

/// Read-only inputs of the final pass.
struct Assembly<'a> {
    engine: &'a GeoEngine,
    geology: &'a GeologyBuffers,
    hydrology: &'a HydrologyResult,
    ocean: &'a Grid<f32>,
    km: f32,
    water_level: f32,
}

impl Assembly<'_> {
    fn cell(&self, idx: usize) -> TerrainCell {
        let elev = &self.geology.elevation;
        let (cols, rows) = (elev.w, elev.h);
        let (x, y) = (idx % cols, idx / cols);
        let (wx, wy) = (x as f32 * self.km, y as f32 * self.km);
        let climate = &self.engine.climate;

        let elevation = elev.data[idx];
        let stress = self.geology.stress.data[idx];
        let volcanic = self.geology.volcanic.data[idx];
        let radiation = self.geology.radiation.data[idx];
        let ocean = self.ocean.data[idx];
        let flow = self.hydrology.flow.data[idx];

        let slope = slope_at(elev, idx);
        let (gx, gy) = gradient_at(elev, idx);
        let windward = climate.is_windward(gx, gy);

        let temperature = climate.temperature(y as f32 / rows as f32, elevation, ocean, wx, wy);
        let precipitation = climate.precipitation(elevation, ocean, windward, wx, wy);
        let wind_exposure = climate.wind_exposure(elevation, slope, wx, wy);
        let moisture = (precipitation + flow * 0.3).min(1.0);

        let vegetation_density = if elevation >= self.water_level {
            vegetation(moisture, temperature, precipitation, radiation, volcanic, slope)
        } else {
            0.0
        };

        let biome = classify_biome(temperature, precipitation, elevation, volcanic, radiation, self.water_level);
        let soil_type = classify_soil(elevation, moisture, temperature, volcanic, radiation);
        let mineral_v = self.engine.noise.mineral.sample01(wx / 150.0, wy / 150.0);

        TerrainCell {
            x,
            y,
            elevation,
            elevation_meters: elevation_meters(elevation, self.water_level),
            tectonic_stress: stress,
            volcanic_activity: volcanic,
            slope,
            temperature,
            moisture,
            precipitation,
            wind_exposure,
            water_table_depth: self.hydrology.water_table.data[idx],
            river_flow: flow,
            is_lake: self.hydrology.is_lake.data[idx],
            vegetation_density,
            soil_type,
            mineral_deposits: minerals::deposits(mineral_v, elevation, stress, volcanic),
            radiation_level: radiation,
            biome,
            color: biome.color(),
        }
    }
}

/// Steepest 4-neighbour step, scaled ×10 and capped at 1.
pub fn slope_at(elev: &Grid<f32>, idx: usize) -> f32 {
    let e = elev.data[idx];
    let max_diff = neighbors4(idx, elev.w, elev.h)
        .map(|ni| (e - elev.data[ni]).abs())
        .fold(0.0f32, f32::max);
    (max_diff * 10.0).min(1.0)
}

/// Central difference (right − left, down − up); edge cells stand in for
/// their missing neighbours.
pub fn gradient_at(elev: &Grid<f32>, idx: usize) -> (f32, f32) {
    let (w, h) = (elev.w, elev.h);
    let (x, y) = (idx % w, idx / w);
    let e = elev.data[idx];
    let left = if x > 0 { elev.data[idx - 1] } else { e };
    let right = if x + 1 < w { elev.data[idx + 1] } else { e };
    let up = if y > 0 { elev.data[idx - w] } else { e };
    let down = if y + 1 < h { elev.data[idx + w] } else { e };
    (right - left, down - up)
}

/// Nonlinear map: water level → 0 m, 0 → -11000 m, 1 → 8848 m.
pub fn elevation_meters(elevation: f32, water_level: f32) -> f32 {
    if elevation < water_level {
        ABYSS_M * (1.0 - elevation / water_level)
    } else {
        (elevation - water_level) / (1.0 - water_level) * SUMMIT_M
    }
}

fn vegetation(moisture: f32, temperature: f32, precipitation: f32, radiation: f32, volcanic: f32, slope: f32) -> f32 {
    let mut v = moisture * 0.5;
    if temperature > 0.0 && temperature < 35.0 {
        v += 0.3;
    }
    if precipitation > 0.3 {
        v += 0.2;
    }
    (v - radiation * 0.5 - volcanic * 0.5 - slope * 0.3).clamp(0.0, 1.0)
}
