use crate::rng::{Rng, hash2};

#[inline]
fn smootherstep(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// 2D gradient noise (Perlin-style) over 16 lattice gradients.
/// Output is clamped to [-1, 1]; non-finite input samples as 0.
#[inline]
pub fn gradient_noise(x: f32, y: f32, seed: u32) -> f32 {
    let (x0, y0) = (x.floor(), y.floor());
    let fx = x - x0;
    let fy = y - y0;
    if !(fx.is_finite() && fy.is_finite()) {
        return 0.0;
    }
    // Far coordinates saturate the lattice index; neighbours wrap.
    let ix = x0 as i32;
    let iy = y0 as i32;
    let (ix1, iy1) = (ix.wrapping_add(1), iy.wrapping_add(1));
    let sx = smootherstep(fx);
    let sy = smootherstep(fy);

    #[inline]
    fn grad(hash: u32, dx: f32, dy: f32) -> f32 {
        // 16 evenly-spaced unit gradients (every 22.5°).
        match hash & 15 {
            0  =>  dx,
            1  =>  0.924 * dx + 0.383 * dy,
            2  =>  0.707 * (dx + dy),
            3  =>  0.383 * dx + 0.924 * dy,
            4  =>  dy,
            5  => -0.383 * dx + 0.924 * dy,
            6  =>  0.707 * (-dx + dy),
            7  => -0.924 * dx + 0.383 * dy,
            8  => -dx,
            9  => -0.924 * dx - 0.383 * dy,
            10 =>  0.707 * (-dx - dy),
            11 => -0.383 * dx - 0.924 * dy,
            12 => -dy,
            13 =>  0.383 * dx - 0.924 * dy,
            14 =>  0.707 * (dx - dy),
            _  =>  0.924 * dx - 0.383 * dy,
        }
    }

    let v00 = grad(hash2(ix, iy, seed), fx, fy);
    let v10 = grad(hash2(ix1, iy, seed), fx - 1.0, fy);
    let v01 = grad(hash2(ix, iy1, seed), fx, fy - 1.0);
    let v11 = grad(hash2(ix1, iy1, seed), fx - 1.0, fy - 1.0);

    let a = lerp(v00, v10, sx);
    let b = lerp(v01, v11, sx);
    // Raw range is ~[-0.7, 0.7]
    (lerp(a, b, sy) * 1.414).clamp(-1.0, 1.0)
}

/// One independent noise field. Stateless once drawn: a pure function of (x, y).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NoiseField {
    seed: u32,
}

impl NoiseField {
    pub fn from_seed(seed: u32) -> Self {
        Self { seed }
    }

    /// Draw the next field from a shared construction stream.
    pub fn draw(rng: &mut Rng) -> Self {
        Self::from_seed(rng.next_u32())
    }

    /// Signed sample in [-1, 1].
    #[inline]
    pub fn sample(&self, x: f32, y: f32) -> f32 {
        gradient_noise(x, y, self.seed)
    }

    /// Sample remapped to [0, 1].
    #[inline]
    pub fn sample01(&self, x: f32, y: f32) -> f32 {
        (self.sample(x, y) + 1.0) * 0.5
    }

    /// Fractal sum over `octaves` layers of this field, normalised by the
    /// amplitude total so the result stays in [-1, 1].
    pub fn fbm(
        &self,
        x: f32,
        y: f32,
        scale: f32,
        octaves: u32,
        persistence: f32,
        lacunarity: f32,
    ) -> f32 {
        let mut sum = 0.0;
        let mut amp = 1.0;
        let mut freq = 1.0;
        let mut norm = 0.0;
        for _ in 0..octaves {
            sum += self.sample(x * freq / scale, y * freq / scale) * amp;
            norm += amp;
            amp *= persistence;
            freq *= lacunarity;
        }
        if norm > 0.0 { (sum / norm).clamp(-1.0, 1.0) } else { 0.0 }
    }

    /// `fbm` remapped to [0, 1].
    pub fn fbm01(
        &self,
        x: f32,
        y: f32,
        scale: f32,
        octaves: u32,
        persistence: f32,
        lacunarity: f32,
    ) -> f32 {
        (self.fbm(x, y, scale, octaves, persistence, lacunarity) + 1.0) * 0.5
    }
}

/// The geology noise fields, drawn once per engine in a fixed order.
///
/// Reordering the draws in [`NoiseBank::draw`] changes every downstream field
/// (and the plate seeds drawn after it), so the order is frozen.
#[derive(Clone, Debug)]
pub struct NoiseBank {
    pub continental: NoiseField,
    pub mountain: NoiseField,
    pub detail: NoiseField,
    pub tectonic: NoiseField,
    pub volcanic: NoiseField,
    pub radiation: NoiseField,
    pub mineral: NoiseField,
    pub warp: NoiseField,
}

impl NoiseBank {
    pub fn draw(rng: &mut Rng) -> Self {
        let continental = NoiseField::draw(rng);
        let mountain = NoiseField::draw(rng);
        let detail = NoiseField::draw(rng);
        let tectonic = NoiseField::draw(rng);
        let volcanic = NoiseField::draw(rng);
        let radiation = NoiseField::draw(rng);
        let mineral = NoiseField::draw(rng);
        let warp = NoiseField::draw(rng);
        Self {
            continental,
            mountain,
            detail,
            tectonic,
            volcanic,
            radiation,
            mineral,
            warp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_is_bounded() {
        let field = NoiseField::from_seed(1234);
        for i in 0..2000 {
            let x = i as f32 * 0.173 - 50.0;
            let y = i as f32 * 0.291 + 11.0;
            let v = field.sample(x, y);
            assert!((-1.0..=1.0).contains(&v), "sample {v} out of range");
            let f = field.fbm01(x, y, 3.0, 5, 0.5, 2.0);
            assert!((0.0..=1.0).contains(&f));
        }
    }

    #[test]
    fn noise_is_zero_on_lattice_points() {
        let field = NoiseField::from_seed(99);
        assert_eq!(field.sample(3.0, -7.0), 0.0);
    }

    #[test]
    fn far_and_non_finite_coordinates_stay_bounded() {
        let field = NoiseField::from_seed(17);
        for &(x, y) in &[(1e20, -1e20), (3.0e9, 2.5), (-2.2e9, 7.25), (f32::MAX, f32::MAX)] {
            let v = field.sample(x, y);
            assert!((-1.0..=1.0).contains(&v), "sample {v} at ({x}, {y})");
        }
        assert_eq!(field.sample(f32::INFINITY, 0.0), 0.0);
        assert_eq!(field.sample(0.5, f32::NAN), 0.0);

        let f = field.fbm(1234.5, -987.0, 0.001, 7, 1.0, 8.0);
        assert!((-1.0..=1.0).contains(&f));
    }

    #[test]
    fn zero_octaves_is_flat() {
        let field = NoiseField::from_seed(5);
        assert_eq!(field.fbm(1.3, 2.7, 10.0, 0, 0.5, 2.0), 0.0);
    }

    #[test]
    fn bank_draw_order_is_stable() {
        let a = NoiseBank::draw(&mut Rng::new(42));
        let mut rng = Rng::new(42);
        let continental = NoiseField::draw(&mut rng);
        let mountain = NoiseField::draw(&mut rng);
        assert_eq!(a.continental, continental);
        assert_eq!(a.mountain, mountain);
        assert_ne!(a.continental, a.mountain);
    }
}
