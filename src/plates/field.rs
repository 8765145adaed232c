use crate::noise::NoiseField;

use super::seed::PlateSeed;

/// Result of one plate-field query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlateSample {
    /// Index of the nearest plate.
    pub plate: usize,
    /// Distance to the nearest plate seed (warped space).
    pub d1: f32,
    /// Distance to the second-nearest plate seed; infinite with one plate.
    pub d2: f32,
    /// 1.0 exactly on a boundary, decaying to 0 deep inside a plate.
    pub boundary_proximity: f32,
}

/// Worley diagram over plate seeds, queried through a noise domain warp.
#[derive(Clone, Debug)]
pub struct PlateField {
    plates: Vec<PlateSeed>,
    warp_x: NoiseField,
    warp_y: NoiseField,
    warp_scale: f32,
    warp_amount: f32,
}

impl PlateField {
    /// `continental_scale` sets both the warp wavelength (0.8x) and its
    /// displacement (0.4x).
    pub fn new(plates: Vec<PlateSeed>, warp_x: NoiseField, warp_y: NoiseField, continental_scale: f32) -> Self {
        debug_assert!(!plates.is_empty());
        Self {
            plates,
            warp_x,
            warp_y,
            warp_scale: continental_scale * 0.8,
            warp_amount: continental_scale * 0.4,
        }
    }

    pub fn plates(&self) -> &[PlateSeed] {
        &self.plates
    }

    #[inline]
    pub fn plate(&self, sample: &PlateSample) -> &PlateSeed {
        &self.plates[sample.plate]
    }

    /// Displace a world coordinate into warped plate space.
    #[inline]
    pub fn warp(&self, wx: f32, wy: f32) -> (f32, f32) {
        let u = wx / self.warp_scale;
        let v = wy / self.warp_scale;
        (
            wx + self.warp_x.sample(u, v) * self.warp_amount,
            wy + self.warp_y.sample(u, v) * self.warp_amount,
        )
    }

    /// Nearest / second-nearest plate lookup. O(plate count).
    pub fn sample(&self, wx: f32, wy: f32) -> PlateSample {
        let (px, py) = self.warp(wx, wy);

        let mut d1 = f32::INFINITY;
        let mut d2 = f32::INFINITY;
        let mut nearest = 0;
        for (i, p) in self.plates.iter().enumerate() {
            let dx = px - p.x;
            let dy = py - p.y;
            let d = (dx * dx + dy * dy).sqrt();
            if d < d1 {
                d2 = d1;
                d1 = d;
                nearest = i;
            } else if d < d2 {
                d2 = d;
            }
        }

        PlateSample {
            plate: nearest,
            d1,
            d2,
            boundary_proximity: boundary_proximity(d1, d2),
        }
    }
}

/// `max(0, 1 - (d2 - d1) / (d2 * 0.5))`, or 0 when d2 is zero or infinite.
#[inline]
pub fn boundary_proximity(d1: f32, d2: f32) -> f32 {
    if d2 > 0.0 && d2.is_finite() {
        (1.0 - (d2 - d1) / (d2 * 0.5)).clamp(0.0, 1.0)
    } else {
        0.0
    }
}
