use std::cmp::Ordering;

use rayon::prelude::*;
use serde::Serialize;

use crate::grid::{Grid, neighbors8};

/// Share of local moisture that enters the flow network as rainfall.
const RAIN_FRACTION: f32 = 0.01;
/// Neighbours within this elevation step join the same lake.
const LAKE_TOLERANCE: f32 = 0.01;

/// Hydrology buffers, indexed like the cell grid. Read-only once built.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HydrologyResult {
    /// Accumulated flow in [0, 1]; the maximum is exactly 1 unless all zero.
    pub flow: Grid<f32>,
    pub is_lake: Grid<bool>,
    /// Water-table depth in [0, 1]; 0 = surface water.
    pub water_table: Grid<f32>,
}

/// Argsort indices by elevation, highest first.
/// Ties break on index so the order is total and reproducible.
fn argsort_descending(elev: &Grid<f32>) -> Vec<u32> {
    let n = elev.data.len();
    let mut indices: Vec<u32> = (0..n as u32).collect();
    indices.par_sort_unstable_by(|&a, &b| {
        elev.data[b as usize]
            .partial_cmp(&elev.data[a as usize])
            .unwrap_or(Ordering::Equal)
            .then(a.cmp(&b))
    });
    indices
}

/// Strictly lowest 8-neighbour of `i`, if any is lower than `i` itself.
#[inline]
fn lowest_neighbor(elev: &Grid<f32>, i: usize) -> Option<usize> {
    let mut lowest = elev.data[i];
    let mut best = None;
    for ni in neighbors8(i, elev.w, elev.h) {
        if elev.data[ni] < lowest {
            lowest = elev.data[ni];
            best = Some(ni);
        }
    }
    best
}

/// Single-pass D8 accumulation: traverse highest-to-lowest, each land cell adds
/// its rainfall and pushes its running total to its lowest neighbour. A cell's
/// total is final before its downhill neighbour is visited.
///
/// Returns raw (unnormalised) flow and the depression mask.
fn flow_accumulation(elev: &Grid<f32>, moisture: &Grid<f32>, water_level: f32) -> (Vec<f32>, Vec<bool>) {
    let n = elev.data.len();
    let mut flow = vec![0.0f32; n];
    let mut depression = vec![false; n];

    for idx in argsort_descending(elev) {
        let i = idx as usize;
        if elev.data[i] < water_level {
            continue;
        }
        flow[i] += moisture.data[i] * RAIN_FRACTION;
        match lowest_neighbor(elev, i) {
            Some(ni) => flow[ni] += flow[i],
            None => depression[i] = true,
        }
    }

    (flow, depression)
}

/// Scale so the maximum is exactly 1. All-zero input stays all zero.
fn normalize_max(flow: &mut [f32]) {
    let max = flow.iter().copied().fold(0.0f32, f32::max);
    if max > 0.0 {
        flow.par_iter_mut().for_each(|v| *v /= max);
    }
}

/// Grow lakes from every land depression into 8-connected neighbours within
/// `LAKE_TOLERANCE` of the cell they are reached from. One visited set covers
/// all fills, so flat basins merge and every cell is expanded at most once.
fn grow_lakes(elev: &Grid<f32>, depression: &[bool], water_level: f32) -> Vec<bool> {
    let (w, h) = (elev.w, elev.h);
    let mut lake = depression.to_vec();
    let mut visited = vec![false; w * h];
    let mut stack = Vec::new();

    for start in 0..w * h {
        if !depression[start] || visited[start] || elev.data[start] < water_level {
            continue;
        }
        visited[start] = true;
        stack.push(start);
        while let Some(i) = stack.pop() {
            for ni in neighbors8(i, w, h) {
                if visited[ni] {
                    continue;
                }
                if (elev.data[ni] - elev.data[i]).abs() < LAKE_TOLERANCE {
                    lake[ni] = true;
                    visited[ni] = true;
                    stack.push(ni);
                }
            }
        }
    }

    lake
}

/// Flow accumulation, lake detection and water table over a whole grid.
///
/// `moisture` is a per-cell precipitation estimate in [0, 1]; cells below
/// `water_level` collect flow but never pass it on.
pub fn simulate_hydrology(elevation: &Grid<f32>, moisture: &Grid<f32>, water_level: f32) -> HydrologyResult {
    let (w, h) = (elevation.w, elevation.h);
    debug_assert_eq!(moisture.data.len(), w * h);

    let (mut flow, depression) = flow_accumulation(elevation, moisture, water_level);
    normalize_max(&mut flow);

    let mut water_table = vec![0.0f32; w * h];
    water_table.par_iter_mut().enumerate().for_each(|(i, out)| {
        // Higher ground and drier soil push the water table down; rivers pull it up.
        let d = elevation.data[i] * 0.6 - moisture.data[i] * 0.3 - flow[i] * 0.3 + 0.2;
        *out = d.clamp(0.0, 1.0);
    });

    let is_lake = grow_lakes(elevation, &depression, water_level);

    HydrologyResult {
        flow: Grid::from_vec(w, h, flow),
        is_lake: Grid::from_vec(w, h, is_lake),
        water_table: Grid::from_vec(w, h, water_table),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(w: usize, h: usize, v: f32) -> Grid<f32> {
        Grid::from_vec(w, h, vec![v; w * h])
    }

    #[test]
    fn ramp_accumulates_downhill() {
        // 1-row ramp falling to the east: flow grows monotonically.
        let w = 10;
        let elev = Grid::from_vec(w, 1, (0..w).map(|x| 0.9 - x as f32 * 0.05).collect());
        let hydro = simulate_hydrology(&elev, &uniform(w, 1, 0.5), 0.1);
        for x in 1..w {
            assert!(hydro.flow.get(x, 0) > hydro.flow.get(x - 1, 0));
        }
        assert_eq!(hydro.flow.get(w - 1, 0), 1.0);
        // Only the outlet has no lower neighbour.
        assert!(hydro.is_lake.get(w - 1, 0));
        assert!(!hydro.is_lake.get(0, 0));
    }

    #[test]
    fn all_water_grid_has_no_flow() {
        let hydro = simulate_hydrology(&uniform(6, 6, 0.05), &uniform(6, 6, 1.0), 0.45);
        assert!(hydro.flow.data.iter().all(|&f| f == 0.0));
        assert!(hydro.is_lake.data.iter().all(|&l| !l));
    }

    #[test]
    fn flat_grid_terminates_as_one_lake() {
        let hydro = simulate_hydrology(&uniform(12, 9, 0.5), &uniform(12, 9, 0.5), 0.1);
        assert!(hydro.is_lake.data.iter().all(|&l| l));
        assert!(hydro.flow.data.iter().all(|&f| f == 1.0));
    }

    #[test]
    fn water_table_is_clamped() {
        let elev = Grid::from_vec(3, 1, vec![0.0, 0.5, 1.0]);
        let hydro = simulate_hydrology(&elev, &uniform(3, 1, 1.0), 0.0);
        assert!(hydro.water_table.data.iter().all(|v| (0.0..=1.0).contains(v)));
        assert_eq!(hydro.water_table.get(0, 0), 0.0);
    }

    #[test]
    fn argsort_breaks_ties_by_index() {
        let elev = Grid::from_vec(4, 1, vec![0.5, 0.7, 0.5, 0.7]);
        assert_eq!(argsort_descending(&elev), vec![1, 3, 0, 2]);
    }
}
