use rayon::prelude::*;

use crate::config::GeoConfig;
use crate::grid::Grid;
use crate::noise::NoiseBank;
use crate::plates::{PlateField, PlateSample};

/// Shape noise amplitude around the plate baseline.
const SHAPE_AMPLITUDE: f32 = 0.12;
/// Continental plates start dropping toward the shelf above this proximity.
const SHELF_START: f32 = 0.6;
const SHELF_DROP: f32 = 0.15;
/// Ridges only form where stress reaches this.
const RIDGE_MIN_STRESS: f32 = 0.15;
const RIDGE_HEIGHT: f32 = 0.45;
const DETAIL_WEIGHT: f32 = 0.06;

/// Per-coordinate geology before climate and hydrology.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeoSample {
    pub elevation: f32,
    pub stress: f32,
    pub volcanic: f32,
    pub radiation: f32,
}

/// Output of the elevation pass: four dense buffers indexed like the cell grid.
#[derive(Clone, Debug)]
pub struct GeologyBuffers {
    pub elevation: Grid<f32>,
    pub stress: Grid<f32>,
    pub volcanic: Grid<f32>,
    pub radiation: Grid<f32>,
}

/// Plate baseline + shape noise + ridges + detail, volcanism and radiation.
pub struct Tectonics<'a> {
    pub noise: &'a NoiseBank,
    pub plates: &'a PlateField,
    pub geo: &'a GeoConfig,
}

impl Tectonics<'_> {
    /// One plate lookup, then every term derived from it.
    pub fn sample_at(&self, wx: f32, wy: f32, octaves: u32) -> GeoSample {
        let plate = self.plates.sample(wx, wy);
        self.compose(&plate, wx, wy, octaves)
    }

    /// Build the geology for (wx, wy) from an already-resolved plate sample.
    pub fn compose(&self, plate: &PlateSample, wx: f32, wy: f32, octaves: u32) -> GeoSample {
        let base = self.base_elevation(plate, wx, wy, octaves);
        let stress = tectonic_stress(plate.boundary_proximity, self.geo.tectonic_intensity);
        let ridges = self.ridge_height(wx, wy, stress, octaves);
        let detail = self.detail(wx, wy, octaves);

        GeoSample {
            elevation: (base + ridges + detail).clamp(0.0, 1.0),
            stress,
            volcanic: self.volcanic_activity(wx, wy, stress),
            radiation: self.radiation(wx, wy),
        }
    }

    /// Plate baseline with continental shape noise and shelf drop-off, clamped.
    pub fn base_elevation(&self, plate: &PlateSample, wx: f32, wy: f32, octaves: u32) -> f32 {
        let seed = self.plates.plate(plate);
        let g = self.geo;
        let mut elev = seed.base_elevation
            + self.noise.continental.fbm(
                wx,
                wy,
                g.continental_scale,
                octaves.min(3),
                g.persistence,
                g.lacunarity,
            ) * SHAPE_AMPLITUDE;

        if seed.is_continental && plate.boundary_proximity > SHELF_START {
            let t = (plate.boundary_proximity - SHELF_START) / (1.0 - SHELF_START);
            elev -= t * SHELF_DROP;
        }
        elev.clamp(0.0, 1.0)
    }

    /// Zero below `RIDGE_MIN_STRESS`.
    pub fn ridge_height(&self, wx: f32, wy: f32, stress: f32, octaves: u32) -> f32 {
        if stress < RIDGE_MIN_STRESS {
            return 0.0;
        }
        let ridge = self.noise.mountain.fbm01(
            wx,
            wy,
            self.geo.continental_scale * 0.3,
            octaves.min(5),
            0.45,
            2.2,
        );
        ridge * stress * RIDGE_HEIGHT
    }

    fn detail(&self, wx: f32, wy: f32, octaves: u32) -> f32 {
        let g = self.geo;
        self.noise
            .detail
            .fbm01(wx, wy, g.continental_scale * 0.15, octaves, g.persistence, g.lacunarity)
            * DETAIL_WEIGHT
    }

    /// Boundary stress plus cubed hotspot noise.
    pub fn volcanic_activity(&self, wx: f32, wy: f32, stress: f32) -> f32 {
        let hotspot = self.noise.volcanic.sample01(wx / 200.0, wy / 200.0).powi(3);
        (stress * 0.6 + hotspot * self.geo.volcanic_density).clamp(0.0, 1.0)
    }

    /// Independent field, thresholded above 0.7 and squared.
    pub fn radiation(&self, wx: f32, wy: f32) -> f32 {
        let r = self.noise.radiation.sample01(wx / 400.0, wy / 400.0);
        ((r - 0.7).max(0.0) / 0.3).powi(2).min(1.0)
    }
}

/// `boundary_proximity² × intensity`, clamped to [0, 1].
#[inline]
pub fn tectonic_stress(boundary_proximity: f32, intensity: f32) -> f32 {
    (boundary_proximity.max(0.0).powi(2) * intensity).clamp(0.0, 1.0)
}

/// Pass 1: geology for every cell. Rows run in parallel; each cell is a pure
/// function of its world coordinate.
pub fn build_geology(
    tectonics: &Tectonics<'_>,
    cols: usize,
    rows: usize,
    km_per_cell: f32,
    octaves: u32,
) -> GeologyBuffers {
    let mut samples = vec![GeoSample::default(); cols * rows];

    samples.par_chunks_mut(cols).enumerate().for_each(|(y, row)| {
        let wy = y as f32 * km_per_cell;
        for (x, out) in row.iter_mut().enumerate() {
            let wx = x as f32 * km_per_cell;
            *out = tectonics.sample_at(wx, wy, octaves);
        }
    });

    let channel = |f: fn(&GeoSample) -> f32| Grid::from_vec(cols, rows, samples.iter().map(f).collect());
    GeologyBuffers {
        elevation: channel(|s| s.elevation),
        stress: channel(|s| s.stress),
        volcanic: channel(|s| s.volcanic),
        radiation: channel(|s| s.radiation),
    }
}
