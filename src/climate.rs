use std::collections::VecDeque;

use rayon::prelude::*;

use crate::config::ClimateConfig;
use crate::grid::{Grid, neighbors8};
use crate::noise::NoiseField;
use crate::rng::Rng;

/// Elevation treated as sea level for the lapse rate.
const LAPSE_SEA_LEVEL: f32 = 0.35;
const MAX_ELEVATION_M: f32 = 8848.0;
/// °C per 1000 m.
const LAPSE_RATE: f32 = 6.5;
/// Ocean proximity reaches zero this many hops from water.
pub const MAX_OCEAN_DISTANCE: u32 = 20;

/// Temperature, precipitation and wind as pure functions of local inputs.
#[derive(Clone, Debug)]
pub struct ClimateSimulator {
    config: ClimateConfig,
    wind_noise: NoiseField,
    moisture_noise: NoiseField,
    temp_noise: NoiseField,
    /// Prevailing wind unit vector (x east, y south).
    wind_dir: (f32, f32),
}

impl ClimateSimulator {
    /// Draws wind, moisture and temperature-variation fields, in that order.
    pub fn new(config: &ClimateConfig, rng: &mut Rng) -> Self {
        let wind_noise = NoiseField::draw(rng);
        let moisture_noise = NoiseField::draw(rng);
        let temp_noise = NoiseField::draw(rng);
        let theta = config.prevailing_wind_dir.to_radians();
        Self {
            config: config.clone(),
            wind_noise,
            moisture_noise,
            temp_noise,
            wind_dir: (theta.sin(), -theta.cos()),
        }
    }

    /// Temperature in °C.
    ///
    /// `normalized_y` is 0 at the north pole, 1 at the south pole.
    pub fn temperature(&self, normalized_y: f32, elevation: f32, ocean_proximity: f32, wx: f32, wy: f32) -> f32 {
        let c = &self.config;
        let latitude_factor = 1.0 - 2.0 * (normalized_y - 0.5).abs();
        let base = c.global_mean_temp + c.latitude_gradient * (latitude_factor - 0.5);

        let above_sea = (elevation - LAPSE_SEA_LEVEL).max(0.0) / (1.0 - LAPSE_SEA_LEVEL);
        let lapse = -LAPSE_RATE * (above_sea * MAX_ELEVATION_M / 1000.0);

        let ocean = ocean_proximity * c.ocean_warmth_factor * 3.0;
        let jitter = self.temp_noise.sample(wx / 500.0, wy / 500.0) * 3.0;

        base + lapse + ocean + jitter
    }

    /// Normalised precipitation in [0, 1].
    pub fn precipitation(&self, elevation: f32, ocean_proximity: f32, windward: bool, wx: f32, wy: f32) -> f32 {
        let base = self.moisture_noise.sample01(wx / 300.0, wy / 300.0);
        let ocean = ocean_proximity * 0.4;

        // Windward slopes lift moisture out; leeward slopes sit in a rain shadow.
        let orographic = if windward {
            (elevation * 0.5).min(0.3)
        } else {
            -(elevation * 0.4).min(0.3)
        };
        let altitude = if elevation > 0.7 { -(elevation - 0.7) * 1.5 } else { 0.0 };

        ((base + ocean + orographic + altitude) * self.config.precipitation_multiplier).clamp(0.0, 1.0)
    }

    /// Exposure in [0, 1]; higher ground and steeper slopes catch more wind.
    pub fn wind_exposure(&self, elevation: f32, slope: f32, wx: f32, wy: f32) -> f32 {
        let base = self.wind_noise.sample01(wx / 400.0, wy / 400.0);
        (base * self.config.wind_strength * 0.5 + elevation * 0.4 + slope * 0.3).clamp(0.0, 1.0)
    }

    /// True when the elevation gradient faces into the prevailing wind.
    pub fn is_windward(&self, grad_x: f32, grad_y: f32) -> bool {
        grad_x * self.wind_dir.0 + grad_y * self.wind_dir.1 > 0.0
    }
}

/// Normalised closeness to water: 1 on water, falling linearly to 0 at
/// `MAX_OCEAN_DISTANCE` 8-connected hops, 0 beyond.
///
/// Multi-source BFS from every cell below `water_level`; expansion stops at the
/// hop cap so the pass terminates on any grid.
pub fn ocean_proximity(elevation: &Grid<f32>, water_level: f32) -> Grid<f32> {
    let (w, h) = (elevation.w, elevation.h);
    let n = w * h;
    let mut dist = vec![u32::MAX; n];
    let mut queue = VecDeque::new();

    for (i, &e) in elevation.data.iter().enumerate() {
        if e < water_level {
            dist[i] = 0;
            queue.push_back(i);
        }
    }

    while let Some(i) = queue.pop_front() {
        let d = dist[i];
        if d >= MAX_OCEAN_DISTANCE {
            continue;
        }
        for ni in neighbors8(i, w, h) {
            if dist[ni] == u32::MAX {
                dist[ni] = d + 1;
                queue.push_back(ni);
            }
        }
    }

    let mut prox = Grid::new(w, h);
    prox.data.par_iter_mut().zip(dist.par_iter()).for_each(|(p, &d)| {
        *p = if d == u32::MAX {
            0.0
        } else {
            (1.0 - d as f32 / MAX_OCEAN_DISTANCE as f32).max(0.0)
        };
    });
    prox
}
