use std::fmt;
use std::str::FromStr;

use rayon::prelude::*;
use serde::{Deserialize, Serialize, Serializer};

use crate::world::{TerrainCell, WorldData};

/// Opaque sRGB colour. Serialises as `"#rrggbb"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub [u8; 3]);

impl Color {
    pub const fn from_hex(hex: u32) -> Self {
        Color([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8])
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0[0], self.0[1], self.0[2])
    }

    pub fn rgba(self) -> [u8; 4] {
        [self.0[0], self.0[1], self.0[2], 255]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

#[inline]
fn lerp_color(a: u32, b: u32, t: f32) -> Color {
    let (a, b) = (Color::from_hex(a).0, Color::from_hex(b).0);
    let t = t.clamp(0.0, 1.0);
    let ch = |i: usize| (a[i] as f32 + (b[i] as f32 - a[i] as f32) * t).round() as u8;
    Color([ch(0), ch(1), ch(2)])
}

const NO_SIGNAL: Color = Color::from_hex(0x1b2631);
const MINERAL_MARK: Color = Color::from_hex(0xffb300);

/// Hypsometric tint: ocean blue → green → brown → snow.
pub fn elevation_color(elevation: f32) -> Color {
    if elevation < 0.35 {
        lerp_color(0x0a1628, 0x2e86c1, elevation / 0.35)
    } else if elevation < 0.45 {
        lerp_color(0x2d7d46, 0x7db46c, (elevation - 0.35) / 0.1)
    } else if elevation < 0.65 {
        lerp_color(0x7db46c, 0x8b7d6b, (elevation - 0.45) / 0.2)
    } else if elevation < 0.8 {
        lerp_color(0x8b7d6b, 0xb8a89a, (elevation - 0.65) / 0.15)
    } else {
        lerp_color(0xb8a89a, 0xf0eee8, (elevation - 0.8) / 0.2)
    }
}

/// -30 °C .. +40 °C mapped blue → red.
pub fn temperature_color(temperature: f32) -> Color {
    let t = ((temperature + 30.0) / 70.0).clamp(0.0, 1.0);
    if t < 0.25 {
        lerp_color(0x1a237e, 0x0288d1, t / 0.25)
    } else if t < 0.5 {
        lerp_color(0x0288d1, 0x4caf50, (t - 0.25) / 0.25)
    } else if t < 0.75 {
        lerp_color(0x4caf50, 0xff9800, (t - 0.5) / 0.25)
    } else {
        lerp_color(0xff9800, 0xb71c1c, (t - 0.75) / 0.25)
    }
}

pub fn moisture_color(moisture: f32) -> Color {
    lerp_color(0xf5deb3, 0x1565c0, moisture)
}

pub fn wind_color(exposure: f32) -> Color {
    lerp_color(0xe8eaf6, 0x283593, exposure)
}

pub fn hazard_color(level: f32) -> Color {
    if level < 0.1 { NO_SIGNAL } else { lerp_color(0x2e7d32, 0xff6f00, level) }
}

pub fn vegetation_color(density: f32) -> Color {
    lerp_color(0x5d4037, 0x1b5e20, density)
}

pub fn river_color(flow: f32, is_lake: bool) -> Color {
    if is_lake {
        Color::from_hex(0x1565c0)
    } else if flow > 0.5 {
        Color::from_hex(0x1976d2)
    } else if flow > 0.2 {
        Color::from_hex(0x42a5f5)
    } else if flow > 0.05 {
        Color::from_hex(0x90caf9)
    } else {
        NO_SIGNAL
    }
}

/// Which cell property drives the display colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VisualizationMode {
    #[default]
    Biome,
    Elevation,
    Temperature,
    Moisture,
    Wind,
    Radiation,
    Tectonic,
    Volcanic,
    Soil,
    Minerals,
    Vegetation,
    Rivers,
}

impl VisualizationMode {
    pub const ALL: [VisualizationMode; 12] = [
        VisualizationMode::Biome,
        VisualizationMode::Elevation,
        VisualizationMode::Temperature,
        VisualizationMode::Moisture,
        VisualizationMode::Wind,
        VisualizationMode::Radiation,
        VisualizationMode::Tectonic,
        VisualizationMode::Volcanic,
        VisualizationMode::Soil,
        VisualizationMode::Minerals,
        VisualizationMode::Vegetation,
        VisualizationMode::Rivers,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VisualizationMode::Biome => "BIOME",
            VisualizationMode::Elevation => "ELEVATION",
            VisualizationMode::Temperature => "TEMPERATURE",
            VisualizationMode::Moisture => "MOISTURE",
            VisualizationMode::Wind => "WIND",
            VisualizationMode::Radiation => "RADIATION",
            VisualizationMode::Tectonic => "TECTONIC",
            VisualizationMode::Volcanic => "VOLCANIC",
            VisualizationMode::Soil => "SOIL",
            VisualizationMode::Minerals => "MINERALS",
            VisualizationMode::Vegetation => "VEGETATION",
            VisualizationMode::Rivers => "RIVERS",
        }
    }

    /// Display colour of `cell` under this mode. Reads physical fields only,
    /// never the cell's current colour.
    pub fn color_of(self, cell: &TerrainCell) -> Color {
        match self {
            VisualizationMode::Biome => cell.biome.color(),
            VisualizationMode::Elevation => elevation_color(cell.elevation),
            VisualizationMode::Temperature => temperature_color(cell.temperature),
            VisualizationMode::Moisture => moisture_color(cell.moisture),
            VisualizationMode::Wind => wind_color(cell.wind_exposure),
            VisualizationMode::Radiation => hazard_color(cell.radiation_level),
            VisualizationMode::Tectonic => moisture_color(cell.tectonic_stress),
            VisualizationMode::Volcanic => hazard_color(cell.volcanic_activity),
            VisualizationMode::Soil => cell.soil_type.color(),
            VisualizationMode::Minerals => {
                if cell.mineral_deposits.is_empty() { NO_SIGNAL } else { MINERAL_MARK }
            }
            VisualizationMode::Vegetation => vegetation_color(cell.vegetation_density),
            VisualizationMode::Rivers => river_color(cell.river_flow, cell.is_lake),
        }
    }
}

impl fmt::Display for VisualizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisualizationMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown visualization mode: {s}"))
    }
}

/// Copy of `cells` with only `color` re-derived for `mode`.
/// Idempotent; the input is left untouched.
pub fn recolor(cells: &[TerrainCell], mode: VisualizationMode) -> Vec<TerrainCell> {
    cells
        .par_iter()
        .map(|cell| cell.with_color(mode.color_of(cell)))
        .collect()
}

/// RGBA8 buffer of each cell's current colour, row-major.
pub fn rasterize(world: &WorldData) -> Vec<u8> {
    let w = world.cols;
    let mut rgba = vec![0u8; world.cells.len() * 4];

    rgba.par_chunks_mut(w * 4).enumerate().for_each(|(y, row)| {
        for x in 0..w {
            let color = world.cells[y * w + x].color.rgba();
            row[x * 4..x * 4 + 4].copy_from_slice(&color);
        }
    });

    rgba
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        assert_eq!(Color::from_hex(0x0b6623).to_hex(), "#0b6623");
        assert_eq!(serde_json::to_string(&Color::from_hex(0xffb300)).unwrap(), "\"#ffb300\"");
    }

    #[test]
    fn lerp_hits_endpoints() {
        assert_eq!(lerp_color(0x000000, 0xffffff, 0.0), Color([0, 0, 0]));
        assert_eq!(lerp_color(0x000000, 0xffffff, 1.0), Color([255, 255, 255]));
        assert_eq!(lerp_color(0x000000, 0xffffff, 7.0), Color([255, 255, 255]));
    }

    #[test]
    fn mode_names_parse() {
        for m in VisualizationMode::ALL {
            assert_eq!(m.as_str().parse::<VisualizationMode>(), Ok(m));
        }
        assert_eq!("rivers".parse::<VisualizationMode>(), Ok(VisualizationMode::Rivers));
        assert!("SEASONS".parse::<VisualizationMode>().is_err());
    }

    #[test]
    fn river_bands() {
        assert_eq!(river_color(0.0, true), Color::from_hex(0x1565c0));
        assert_eq!(river_color(0.6, false), Color::from_hex(0x1976d2));
        assert_eq!(river_color(0.01, false), NO_SIGNAL);
    }
}
