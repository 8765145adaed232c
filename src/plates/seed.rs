use crate::rng::Rng;

/// Continental plates sit in this base-elevation band.
pub const CONTINENTAL_BAND: (f32, f32) = (0.45, 0.60);
/// Oceanic plates sit in this base-elevation band.
pub const OCEANIC_BAND: (f32, f32) = (0.10, 0.25);

/// One Worley seed point in plate space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlateSeed {
    pub x: f32,
    pub y: f32,
    pub is_continental: bool,
    pub base_elevation: f32,
}

/// Scatter `count` plates uniformly over `[-spread, spread]²`.
///
/// Each plate draws, in order: continental flag (continental with
/// probability `1 - ocean_coverage`), x, y, base elevation.
pub fn scatter_plates(rng: &mut Rng, count: usize, spread: f32, ocean_coverage: f32) -> Vec<PlateSeed> {
    (0..count)
        .map(|_| {
            let is_continental = rng.next_f32() >= ocean_coverage;
            let x = rng.range_f32(-spread, spread);
            let y = rng.range_f32(-spread, spread);
            let (lo, hi) = if is_continental { CONTINENTAL_BAND } else { OCEANIC_BAND };
            let base_elevation = rng.range_f32(lo, hi);
            PlateSeed { x, y, is_continental, base_elevation }
        })
        .collect()
}
