//! Simulation configuration. Serialises field-for-field to the camelCase JSON
//! shape used by config snapshots, so a saved config replays the same planet.

use serde::{Deserialize, Serialize};

use crate::error::GenError;

pub const MAX_PERSISTENCE: f32 = 1.0;
pub const MIN_LACUNARITY: f32 = 1.0;
pub const MAX_LACUNARITY: f32 = 8.0;

/// Planetary baseline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldConfig {
    /// Deterministic seed for every noise field and plate.
    pub seed: f64,
    /// Planet radius in km.
    pub planet_radius: f32,
    /// Axial tilt in degrees.
    pub axial_tilt: f32,
    /// Solar luminosity multiplier (1.0 = Earth-like).
    pub solar_luminosity: f32,
    /// Atmospheric density multiplier (1.0 = Earth-like).
    pub atmospheric_density: f32,
    /// Ocean coverage ratio in [0, 1). Doubles as the normalised water level.
    pub ocean_coverage: f32,
}

/// Geology knobs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoConfig {
    /// World-space size (km) of continental features.
    pub continental_scale: f32,
    pub plate_count: usize,
    /// Higher = taller boundary mountains.
    pub tectonic_intensity: f32,
    /// Hotspot density in [0, 1].
    pub volcanic_density: f32,
    pub erosion_iterations: u32,
    pub octaves: u32,
    pub persistence: f32,
    pub lacunarity: f32,
}

/// Climate knobs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClimateConfig {
    /// Global mean temperature in °C.
    pub global_mean_temp: f32,
    /// Equator-to-pole temperature spread in °C.
    pub latitude_gradient: f32,
    /// Prevailing wind direction in degrees (0 = north).
    pub prevailing_wind_dir: f32,
    pub wind_strength: f32,
    pub precipitation_multiplier: f32,
    pub ocean_warmth_factor: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub world: WorldConfig,
    pub geo: GeoConfig,
    pub climate: ClimateConfig,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: 42.0,
            planet_radius: 6371.0,
            axial_tilt: 23.5,
            solar_luminosity: 1.0,
            atmospheric_density: 1.0,
            ocean_coverage: 0.45,
        }
    }
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            continental_scale: 500.0,
            plate_count: 8,
            tectonic_intensity: 1.3,
            volcanic_density: 0.25,
            erosion_iterations: 50,
            octaves: 6,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            global_mean_temp: 15.0,
            latitude_gradient: 50.0,
            prevailing_wind_dir: 270.0,
            wind_strength: 1.0,
            precipitation_multiplier: 1.0,
            ocean_warmth_factor: 0.5,
        }
    }
}

impl SimulationConfig {
    /// Default config with a different seed.
    pub fn with_seed(seed: f64) -> Self {
        let mut config = Self::default();
        config.world.seed = seed;
        config
    }

    /// Normalised elevation below which a cell is water.
    pub fn water_level(&self) -> f32 {
        self.world.ocean_coverage
    }

    /// Reject configurations that would produce a garbage or empty world.
    pub fn validate(&self) -> Result<(), GenError> {
        if !self.world.seed.is_finite() {
            return Err(GenError::NonFiniteSeed(self.world.seed));
        }
        if self.geo.plate_count == 0 {
            return Err(GenError::ZeroPlates);
        }
        let oc = self.world.ocean_coverage;
        if !oc.is_finite() || !(0.0..1.0).contains(&oc) {
            return Err(GenError::InvalidParameter { name: "oceanCoverage", value: oc as f64 });
        }
        let scale = self.geo.continental_scale;
        if !scale.is_finite() || scale <= 0.0 {
            return Err(GenError::InvalidParameter { name: "continentalScale", value: scale as f64 });
        }
        let finite: [(&'static str, f32); 9] = [
            ("tectonicIntensity", self.geo.tectonic_intensity),
            ("volcanicDensity", self.geo.volcanic_density),
            ("persistence", self.geo.persistence),
            ("lacunarity", self.geo.lacunarity),
            ("globalMeanTemp", self.climate.global_mean_temp),
            ("latitudeGradient", self.climate.latitude_gradient),
            ("prevailingWindDir", self.climate.prevailing_wind_dir),
            ("windStrength", self.climate.wind_strength),
            ("precipitationMultiplier", self.climate.precipitation_multiplier),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(GenError::InvalidParameter { name, value: value as f64 });
            }
        }
        if !self.climate.ocean_warmth_factor.is_finite() {
            return Err(GenError::InvalidParameter {
                name: "oceanWarmthFactor",
                value: self.climate.ocean_warmth_factor as f64,
            });
        }
        // Octave amplitudes must not grow and frequencies stay inside the
        // noise lattice's integer range.
        let p = self.geo.persistence;
        if !(p > 0.0 && p <= MAX_PERSISTENCE) {
            return Err(GenError::InvalidParameter { name: "persistence", value: p as f64 });
        }
        let l = self.geo.lacunarity;
        if !(MIN_LACUNARITY..=MAX_LACUNARITY).contains(&l) {
            return Err(GenError::InvalidParameter { name: "lacunarity", value: l as f64 });
        }
        Ok(())
    }
}
