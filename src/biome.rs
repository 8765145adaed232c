//! Biome and soil classification.
//!
//! Both classifiers are ordered decision trees: the first matching rule wins and
//! the final branch catches everything, so every input maps to a tag.

use serde::{Deserialize, Serialize};

use crate::render::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BiomeType {
    // Aquatic
    AbyssalOcean,
    DeepOcean,
    Ocean,
    CoastalShelf,
    CoralReef,
    // Transitional
    TidalFlat,
    Beach,
    Mangrove,
    SaltMarsh,
    RiverDelta,
    // Tropical
    TropicalRainforest,
    TropicalSavanna,
    SubtropicalDesert,
    // Temperate
    TemperateDeciduousForest,
    TemperateGrassland,
    Mediterranean,
    // Cold
    BorealForest,
    Tundra,
    IceSheet,
    // Altitude
    AlpineMeadow,
    AlpineBare,
    // Hazard
    VolcanicWasteland,
    IrradiatedZone,
    SaltFlat,
    ToxicSwamp,
    AshDesert,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SoilType {
    Bedrock,
    Rocky,
    Sandy,
    Clay,
    Loam,
    Silt,
    Peat,
    Ash,
    Irradiated,
}

/// Gameplay-facing biome descriptors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BiomeMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub resource_potential: f32,
    pub habitability: f32,
    pub threat_level: f32,
}

impl BiomeType {
    pub const ALL: [BiomeType; 26] = [
        BiomeType::AbyssalOcean,
        BiomeType::DeepOcean,
        BiomeType::Ocean,
        BiomeType::CoastalShelf,
        BiomeType::CoralReef,
        BiomeType::TidalFlat,
        BiomeType::Beach,
        BiomeType::Mangrove,
        BiomeType::SaltMarsh,
        BiomeType::RiverDelta,
        BiomeType::TropicalRainforest,
        BiomeType::TropicalSavanna,
        BiomeType::SubtropicalDesert,
        BiomeType::TemperateDeciduousForest,
        BiomeType::TemperateGrassland,
        BiomeType::Mediterranean,
        BiomeType::BorealForest,
        BiomeType::Tundra,
        BiomeType::IceSheet,
        BiomeType::AlpineMeadow,
        BiomeType::AlpineBare,
        BiomeType::VolcanicWasteland,
        BiomeType::IrradiatedZone,
        BiomeType::SaltFlat,
        BiomeType::ToxicSwamp,
        BiomeType::AshDesert,
    ];

    /// Canonical palette colour.
    pub const fn color(self) -> Color {
        Color::from_hex(match self {
            BiomeType::AbyssalOcean => 0x0a1628,
            BiomeType::DeepOcean => 0x0f2847,
            BiomeType::Ocean => 0x1a5276,
            BiomeType::CoastalShelf => 0x2e86c1,
            BiomeType::CoralReef => 0x48c9b0,
            BiomeType::TidalFlat => 0x7fb3d3,
            BiomeType::Beach => 0xf0d9b5,
            BiomeType::Mangrove => 0x1e7845,
            BiomeType::SaltMarsh => 0x8fbc8f,
            BiomeType::RiverDelta => 0x5dade2,
            BiomeType::TropicalRainforest => 0x0b6623,
            BiomeType::TropicalSavanna => 0xc4a747,
            BiomeType::SubtropicalDesert => 0xe8c872,
            BiomeType::TemperateDeciduousForest => 0x2d7d46,
            BiomeType::TemperateGrassland => 0x7db46c,
            BiomeType::Mediterranean => 0xb8a94a,
            BiomeType::BorealForest => 0x3b5e2f,
            BiomeType::Tundra => 0x8b9f8e,
            BiomeType::IceSheet => 0xdce6f0,
            BiomeType::AlpineMeadow => 0x7b8f6a,
            BiomeType::AlpineBare => 0x9e9e9e,
            BiomeType::VolcanicWasteland => 0x4a2c2a,
            BiomeType::IrradiatedZone => 0x5e3f71,
            BiomeType::SaltFlat => 0xd4c8a8,
            BiomeType::ToxicSwamp => 0x4a6741,
            BiomeType::AshDesert => 0x8b7d6b,
        })
    }

    pub fn is_aquatic(self) -> bool {
        matches!(
            self,
            BiomeType::AbyssalOcean
                | BiomeType::DeepOcean
                | BiomeType::Ocean
                | BiomeType::CoastalShelf
                | BiomeType::CoralReef
                | BiomeType::TidalFlat
        )
    }

    pub fn meta(self) -> BiomeMeta {
        let (name, description, resource_potential, habitability, threat_level) = match self {
            BiomeType::AbyssalOcean => ("Abyssal Ocean", "Crushing depths, no light", 0.1, 0.0, 0.9),
            BiomeType::DeepOcean => ("Deep Ocean", "Open deep water", 0.2, 0.0, 0.7),
            BiomeType::Ocean => ("Ocean", "Open water", 0.3, 0.0, 0.5),
            BiomeType::CoastalShelf => ("Coastal Shelf", "Shallow productive waters", 0.6, 0.1, 0.3),
            BiomeType::CoralReef => ("Coral Reef", "Biodiversity hotspot", 0.5, 0.1, 0.2),
            BiomeType::TidalFlat => ("Tidal Flat", "Periodic flooding, rich nutrients", 0.4, 0.3, 0.3),
            BiomeType::Beach => ("Beach", "Sandy or rocky shore", 0.2, 0.5, 0.2),
            BiomeType::Mangrove => ("Mangrove", "Dense coastal swamp forest", 0.5, 0.3, 0.4),
            BiomeType::SaltMarsh => ("Salt Marsh", "Brackish wetland", 0.3, 0.3, 0.3),
            BiomeType::RiverDelta => ("River Delta", "Fertile floodplain where rivers meet sea", 0.8, 0.8, 0.2),
            BiomeType::TropicalRainforest => ("Tropical Rainforest", "Dense, hot, wet jungle", 0.7, 0.5, 0.5),
            BiomeType::TropicalSavanna => ("Tropical Savanna", "Warm grassland with scattered trees", 0.5, 0.7, 0.4),
            BiomeType::SubtropicalDesert => ("Subtropical Desert", "Arid, extreme temperatures", 0.2, 0.2, 0.6),
            BiomeType::TemperateDeciduousForest => ("Temperate Forest", "Seasonal broadleaf forest", 0.7, 0.8, 0.2),
            BiomeType::TemperateGrassland => ("Temperate Grassland", "Prairie or steppe", 0.5, 0.8, 0.2),
            BiomeType::Mediterranean => ("Mediterranean", "Warm dry summers, mild wet winters", 0.6, 0.9, 0.1),
            BiomeType::BorealForest => ("Boreal Forest", "Cold coniferous taiga", 0.5, 0.5, 0.4),
            BiomeType::Tundra => ("Tundra", "Frozen, sparse vegetation", 0.2, 0.2, 0.6),
            BiomeType::IceSheet => ("Ice Sheet", "Permanent ice and snow", 0.0, 0.0, 0.9),
            BiomeType::AlpineMeadow => ("Alpine Meadow", "High altitude grassland above treeline", 0.3, 0.3, 0.5),
            BiomeType::AlpineBare => ("Alpine Bare", "High altitude rock and scree", 0.3, 0.1, 0.7),
            BiomeType::VolcanicWasteland => ("Volcanic Wasteland", "Active volcanic terrain, lava flows", 0.4, 0.0, 1.0),
            BiomeType::IrradiatedZone => ("Irradiated Zone", "Lethal radiation from an old-world event", 0.6, 0.0, 1.0),
            BiomeType::SaltFlat => ("Salt Flat", "Dried lake bed, mineral-rich", 0.4, 0.1, 0.5),
            BiomeType::ToxicSwamp => ("Toxic Swamp", "Chemically contaminated wetland", 0.3, 0.1, 0.8),
            BiomeType::AshDesert => ("Ash Desert", "Post-eruption ash wasteland", 0.2, 0.1, 0.7),
        };
        BiomeMeta { name, description, resource_potential, habitability, threat_level }
    }

    pub fn name(self) -> &'static str {
        self.meta().name
    }
}

impl SoilType {
    pub const ALL: [SoilType; 9] = [
        SoilType::Bedrock,
        SoilType::Rocky,
        SoilType::Sandy,
        SoilType::Clay,
        SoilType::Loam,
        SoilType::Silt,
        SoilType::Peat,
        SoilType::Ash,
        SoilType::Irradiated,
    ];

    pub const fn color(self) -> Color {
        Color::from_hex(match self {
            SoilType::Bedrock => 0x5f5f5f,
            SoilType::Rocky => 0x8d8478,
            SoilType::Sandy => 0xe2c98f,
            SoilType::Clay => 0xb5651d,
            SoilType::Loam => 0x6b4e2e,
            SoilType::Silt => 0xa89f80,
            SoilType::Peat => 0x3e2f23,
            SoilType::Ash => 0x4d4646,
            SoilType::Irradiated => 0x7cb342,
        })
    }
}

/// Temperature (°C) × precipitation [0, 1] → biome, with hazard, aquatic,
/// coastal and altitude rules taking precedence over the Whittaker grid.
pub fn classify_biome(
    temperature: f32,
    precipitation: f32,
    elevation: f32,
    volcanic_activity: f32,
    radiation_level: f32,
    water_level: f32,
) -> BiomeType {
    if radiation_level > 0.7 {
        return BiomeType::IrradiatedZone;
    }
    if volcanic_activity > 0.7 {
        return BiomeType::VolcanicWasteland;
    }

    if elevation < water_level {
        let depth = water_level - elevation;
        return if depth > 0.35 {
            BiomeType::AbyssalOcean
        } else if depth > 0.25 {
            BiomeType::DeepOcean
        } else if depth > 0.10 {
            BiomeType::Ocean
        } else if depth > 0.05 {
            if temperature > 22.0 && precipitation > 0.5 {
                BiomeType::CoralReef
            } else {
                BiomeType::CoastalShelf
            }
        } else {
            BiomeType::TidalFlat
        };
    }

    if elevation - water_level < 0.02 {
        return if precipitation > 0.6 && temperature > 20.0 {
            BiomeType::Mangrove
        } else if precipitation > 0.7 {
            BiomeType::SaltMarsh
        } else {
            BiomeType::Beach
        };
    }

    if elevation > 0.85 {
        return BiomeType::IceSheet;
    }
    if elevation > 0.75 {
        return BiomeType::AlpineBare;
    }
    if elevation > 0.65 {
        return BiomeType::AlpineMeadow;
    }

    if volcanic_activity > 0.4 && precipitation < 0.2 {
        return BiomeType::AshDesert;
    }
    if precipitation < 0.08 && temperature > 10.0 {
        return BiomeType::SaltFlat;
    }

    whittaker(temperature, precipitation)
}

fn whittaker(temperature: f32, precipitation: f32) -> BiomeType {
    if temperature > 20.0 {
        if precipitation > 0.65 {
            BiomeType::TropicalRainforest
        } else if precipitation > 0.3 {
            BiomeType::TropicalSavanna
        } else {
            BiomeType::SubtropicalDesert
        }
    } else if temperature > 10.0 {
        if precipitation > 0.6 {
            BiomeType::TemperateDeciduousForest
        } else if precipitation > 0.3 {
            BiomeType::Mediterranean
        } else {
            BiomeType::TemperateGrassland
        }
    } else if temperature > 0.0 {
        if precipitation > 0.4 { BiomeType::BorealForest } else { BiomeType::Tundra }
    } else if precipitation > 0.3 {
        BiomeType::IceSheet
    } else {
        BiomeType::Tundra
    }
}

pub fn classify_soil(
    elevation: f32,
    moisture: f32,
    temperature: f32,
    volcanic_activity: f32,
    radiation_level: f32,
) -> SoilType {
    if radiation_level > 0.7 {
        SoilType::Irradiated
    } else if volcanic_activity > 0.5 {
        SoilType::Ash
    } else if elevation > 0.75 {
        SoilType::Bedrock
    } else if elevation > 0.6 {
        SoilType::Rocky
    } else if moisture > 0.8 && temperature > 10.0 {
        SoilType::Peat
    } else if moisture > 0.6 {
        SoilType::Silt
    } else if moisture > 0.4 {
        SoilType::Loam
    } else if temperature > 25.0 && moisture < 0.2 {
        SoilType::Sandy
    } else if moisture > 0.3 {
        SoilType::Clay
    } else {
        SoilType::Sandy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hot_wet_lowland_is_rainforest() {
        assert_eq!(classify_biome(25.0, 0.8, 0.5, 0.0, 0.0, 0.45), BiomeType::TropicalRainforest);
    }

    #[test]
    fn radiation_overrides_everything() {
        for &(t, p, e, v) in &[(25.0, 0.8, 0.5, 0.0), (-40.0, 0.0, 0.0, 1.0), (10.0, 0.5, 0.99, 0.9)] {
            assert_eq!(classify_biome(t, p, e, v, 0.71, 0.45), BiomeType::IrradiatedZone);
        }
    }

    #[test]
    fn high_peaks_are_ice() {
        for t in [-20.0, 5.0, 35.0] {
            assert_eq!(classify_biome(t, 0.5, 0.9, 0.0, 0.0, 0.45), BiomeType::IceSheet);
        }
    }

    #[test]
    fn depth_ladder() {
        let wl = 0.45;
        assert_eq!(classify_biome(10.0, 0.5, 0.05, 0.0, 0.0, wl), BiomeType::AbyssalOcean);
        assert_eq!(classify_biome(10.0, 0.5, 0.15, 0.0, 0.0, wl), BiomeType::DeepOcean);
        assert_eq!(classify_biome(10.0, 0.5, 0.30, 0.0, 0.0, wl), BiomeType::Ocean);
        assert_eq!(classify_biome(10.0, 0.5, 0.38, 0.0, 0.0, wl), BiomeType::CoastalShelf);
        assert_eq!(classify_biome(25.0, 0.6, 0.38, 0.0, 0.0, wl), BiomeType::CoralReef);
        assert_eq!(classify_biome(10.0, 0.5, 0.43, 0.0, 0.0, wl), BiomeType::TidalFlat);
    }

    #[test]
    fn water_cells_get_aquatic_biomes() {
        let aquatic: Vec<BiomeType> = BiomeType::ALL.into_iter().filter(|b| b.is_aquatic()).collect();
        assert_eq!(
            aquatic,
            [
                BiomeType::AbyssalOcean,
                BiomeType::DeepOcean,
                BiomeType::Ocean,
                BiomeType::CoastalShelf,
                BiomeType::CoralReef,
                BiomeType::TidalFlat,
            ]
        );

        for e in [0.0, 0.12, 0.3, 0.38, 0.44] {
            for (t, p) in [(25.0, 0.9), (5.0, 0.1), (-20.0, 0.5)] {
                assert!(classify_biome(t, p, e, 0.0, 0.0, 0.45).is_aquatic());
            }
        }
        for e in [0.46, 0.55, 0.7, 0.9] {
            assert!(!classify_biome(15.0, 0.5, e, 0.0, 0.0, 0.45).is_aquatic());
        }
    }

    #[test]
    fn coastal_band() {
        assert_eq!(classify_biome(25.0, 0.7, 0.46, 0.0, 0.0, 0.45), BiomeType::Mangrove);
        assert_eq!(classify_biome(5.0, 0.8, 0.46, 0.0, 0.0, 0.45), BiomeType::SaltMarsh);
        assert_eq!(classify_biome(5.0, 0.2, 0.46, 0.0, 0.0, 0.45), BiomeType::Beach);
    }

    #[test]
    fn classifiers_are_total() {
        // Sweep well past every threshold, including NaN.
        let temps = [-60.0, -1.0, 0.0, 5.0, 10.5, 20.5, 30.0, 60.0, f32::NAN];
        let vals = [-0.5, 0.0, 0.05, 0.1, 0.3, 0.45, 0.5, 0.66, 0.76, 0.9, 1.0, 2.0, f32::NAN];
        for &t in &temps {
            for &p in &vals {
                for &e in &vals {
                    for &v in &[0.0, 0.45, 0.8] {
                        for &r in &[0.0, 0.8] {
                            let b = classify_biome(t, p, e, v, r, 0.45);
                            assert!(BiomeType::ALL.contains(&b));
                            let s = classify_soil(e, p, t, v, r);
                            assert!(SoilType::ALL.contains(&s));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn soil_rules_in_order() {
        assert_eq!(classify_soil(0.5, 0.5, 10.0, 0.0, 0.9), SoilType::Irradiated);
        assert_eq!(classify_soil(0.5, 0.5, 10.0, 0.6, 0.0), SoilType::Ash);
        assert_eq!(classify_soil(0.8, 0.5, 10.0, 0.0, 0.0), SoilType::Bedrock);
        assert_eq!(classify_soil(0.7, 0.5, 10.0, 0.0, 0.0), SoilType::Rocky);
        assert_eq!(classify_soil(0.5, 0.9, 15.0, 0.0, 0.0), SoilType::Peat);
        assert_eq!(classify_soil(0.5, 0.9, 5.0, 0.0, 0.0), SoilType::Silt);
        assert_eq!(classify_soil(0.5, 0.5, 5.0, 0.0, 0.0), SoilType::Loam);
        assert_eq!(classify_soil(0.5, 0.1, 30.0, 0.0, 0.0), SoilType::Sandy);
        assert_eq!(classify_soil(0.5, 0.35, 5.0, 0.0, 0.0), SoilType::Clay);
    }

    #[test]
    fn every_biome_has_metadata() {
        for b in BiomeType::ALL {
            let m = b.meta();
            assert!(!m.name.is_empty());
            assert!((0.0..=1.0).contains(&m.habitability));
        }
        assert_eq!(serde_json::to_string(&BiomeType::TropicalRainforest).unwrap(), "\"TROPICAL_RAINFOREST\"");
    }
}
