use serde::{Deserialize, Serialize};

/// Level of detail: trades world-space cell size and noise octaves for cost.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LodLevel {
    WholePlanet = 0,
    Continents = 1,
    #[default]
    Countries = 2,
    Regions = 3,
    Area = 4,
    Local = 5,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LodConfig {
    pub name: &'static str,
    /// Approximate real-world km per cell.
    pub km_per_cell: f32,
    /// Noise octaves at this scale.
    pub octaves: u32,
    /// Display hint for rasterisers.
    pub pixels_per_cell: u32,
}

impl LodLevel {
    pub const ALL: [LodLevel; 6] = [
        LodLevel::WholePlanet,
        LodLevel::Continents,
        LodLevel::Countries,
        LodLevel::Regions,
        LodLevel::Area,
        LodLevel::Local,
    ];

    pub fn from_index(i: u8) -> Option<Self> {
        Self::ALL.get(i as usize).copied()
    }

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn config(self) -> LodConfig {
        let (name, km_per_cell, octaves, pixels_per_cell) = match self {
            LodLevel::WholePlanet => ("Whole planet", 100.0, 2, 3),
            LodLevel::Continents => ("Continents", 25.0, 3, 4),
            LodLevel::Countries => ("Countries", 8.0, 4, 5),
            LodLevel::Regions => ("Regions", 2.0, 5, 7),
            LodLevel::Area => ("Area", 0.5, 6, 10),
            LodLevel::Local => ("Local", 0.12, 7, 12),
        };
        LodConfig { name, km_per_cell, octaves, pixels_per_cell }
    }
}
