use std::collections::BTreeMap;

use serde::Serialize;

use crate::biome::{BiomeType, SoilType};
use crate::hydrology::HydrologyResult;
use crate::minerals::MineralType;
use crate::render::Color;

/// Everything known about one grid cell. Built once during assembly; the only
/// later change is a recoloured copy via [`TerrainCell::with_color`].
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TerrainCell {
    pub x: usize,
    pub y: usize,

    /// Normalised elevation in [0, 1].
    pub elevation: f32,
    /// Elevation in meters, -11000 ..= 8848, 0 at the water level.
    pub elevation_meters: f32,
    pub tectonic_stress: f32,
    pub volcanic_activity: f32,
    pub slope: f32,

    /// °C
    pub temperature: f32,
    pub moisture: f32,
    pub precipitation: f32,
    pub wind_exposure: f32,

    pub water_table_depth: f32,
    pub river_flow: f32,
    pub is_lake: bool,

    pub vegetation_density: f32,
    pub soil_type: SoilType,
    pub mineral_deposits: Vec<MineralType>,
    pub radiation_level: f32,

    pub biome: BiomeType,
    pub color: Color,
}

impl TerrainCell {
    pub fn with_color(&self, color: Color) -> TerrainCell {
        TerrainCell { color, ..self.clone() }
    }
}

/// A generated world: `cols × rows` cells in row-major order.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WorldData {
    pub cols: usize,
    pub rows: usize,
    pub cells: Vec<TerrainCell>,
    pub hydrology: HydrologyResult,
}

/// Summary numbers for logs and tooling.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldStats {
    pub land_fraction: f32,
    pub lake_cells: usize,
    pub mean_temperature: f32,
    /// (x, y) of the cell carrying the most flow, if any flow exists.
    pub max_flow_cell: Option<(usize, usize)>,
    pub biome_counts: BTreeMap<BiomeType, usize>,
}

impl WorldData {
    /// Cell at (x, y). Panics outside the grid.
    pub fn cell(&self, x: usize, y: usize) -> &TerrainCell {
        assert!(x < self.cols && y < self.rows, "({x}, {y}) outside {}x{}", self.cols, self.rows);
        &self.cells[y * self.cols + x]
    }

    pub fn stats(&self) -> WorldStats {
        let n = self.cells.len().max(1) as f32;
        let land = self.cells.iter().filter(|c| c.elevation_meters >= 0.0).count();
        let mean_temperature = self.cells.iter().map(|c| c.temperature).sum::<f32>() / n;

        let mut biome_counts = BTreeMap::new();
        for c in &self.cells {
            *biome_counts.entry(c.biome).or_insert(0) += 1;
        }

        let max_flow_cell = self
            .cells
            .iter()
            .filter(|c| c.river_flow > 0.0)
            .max_by(|a, b| a.river_flow.total_cmp(&b.river_flow))
            .map(|c| (c.x, c.y));

        WorldStats {
            land_fraction: land as f32 / n,
            lake_cells: self.cells.iter().filter(|c| c.is_lake).count(),
            mean_temperature,
            max_flow_cell,
            biome_counts,
        }
    }
}
