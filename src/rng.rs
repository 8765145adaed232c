//! Deterministic RNG based on splitmix64/32. No stateful RNG in inner loops.

#[inline]
pub fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E3779B97F4A7C15);
    let mut z = x;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}

#[inline]
pub fn splitmix32(mut x: u32) -> u32 {
    x = x.wrapping_add(0x9E3779B9);
    let mut z = x;
    z = (z ^ (z >> 16)).wrapping_mul(0x7FEB352D);
    z = (z ^ (z >> 15)).wrapping_mul(0x846CA68B);
    z ^ (z >> 16)
}

/// Lattice hash used by the gradient noise. Pure function of (ix, iy, seed).
#[inline]
pub fn hash2(ix: i32, iy: i32, seed: u32) -> u32 {
    let x = ix as u32;
    let y = iy as u32;
    let mut h = seed ^ 0x9E3779B9;
    h = splitmix32(h ^ x.wrapping_mul(0x85EBCA6B));
    h = splitmix32(h ^ y.wrapping_mul(0xC2B2AE35));
    h
}

/// Map a JSON-number seed onto the 64-bit RNG state.
/// Integral seeds keep their integer value so `42` and `42.0` agree;
/// fractional seeds fall back to their bit pattern.
pub fn seed_bits(seed: f64) -> u64 {
    if seed.fract() == 0.0 && seed.abs() < 9.0e18 {
        seed as i64 as u64
    } else {
        seed.to_bits()
    }
}

/// Sequential RNG for engine construction (noise field seeds, plate seeds).
/// Every draw shifts all later draws, so call order is part of the output.
#[derive(Clone, Debug)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u64(&mut self) -> u64 {
        self.state = splitmix64(self.state);
        self.state
    }

    pub fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    /// Uniform in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        (self.next_u32() >> 8) as f32 / 16777216.0
    }

    pub fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.next_f32() * (hi - lo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_stream() {
        let mut a = Rng::new(7);
        let mut b = Rng::new(7);
        for _ in 0..32 {
            assert_eq!(a.next_u64(), b.next_u64());
        }
    }

    #[test]
    fn next_f32_stays_in_unit_interval() {
        let mut rng = Rng::new(0xDEAD_BEEF);
        for _ in 0..10_000 {
            let v = rng.next_f32();
            assert!((0.0..1.0).contains(&v));
        }
    }

    #[test]
    fn integral_seeds_match_their_integer() {
        assert_eq!(seed_bits(42.0), 42);
        assert_eq!(seed_bits(-1.0), u64::MAX);
        assert_eq!(seed_bits(0.5), 0.5f64.to_bits());
    }
}
