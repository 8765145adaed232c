use serde::Serialize;

/// Row-major flat grid. No per-cell objects, f32 friendly.
/// Bounded on all four edges (no wrapping).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Grid<T> {
    pub data: Vec<T>,
    pub w: usize,
    pub h: usize,
}

impl<T: Copy + Default> Grid<T> {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            data: vec![T::default(); w * h],
            w,
            h,
        }
    }
}

impl<T: Copy> Grid<T> {
    pub fn from_vec(w: usize, h: usize, data: Vec<T>) -> Self {
        assert_eq!(data.len(), w * h, "grid data does not match {w}x{h}");
        Self { data, w, h }
    }

    #[inline]
    pub fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.w && y < self.h);
        y * self.w + x
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> T {
        self.data[self.idx(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, v: T) {
        let i = self.idx(x, y);
        self.data[i] = v;
    }
}

pub const OFFSETS4: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

pub const OFFSETS8: [(i32, i32); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

/// Offset (x, y) by (dx, dy); None if it leaves the grid.
#[inline]
pub fn offset_xy(x: usize, y: usize, dx: i32, dy: i32, w: usize, h: usize) -> Option<(usize, usize)> {
    let nx = x as i64 + dx as i64;
    let ny = y as i64 + dy as i64;
    if nx < 0 || ny < 0 || nx >= w as i64 || ny >= h as i64 {
        return None;
    }
    Some((nx as usize, ny as usize))
}

/// 4-connected neighbour indices of flat index `i`.
pub fn neighbors4(i: usize, w: usize, h: usize) -> impl Iterator<Item = usize> {
    let (x, y) = (i % w, i / w);
    OFFSETS4
        .into_iter()
        .filter_map(move |(dx, dy)| offset_xy(x, y, dx, dy, w, h).map(|(nx, ny)| ny * w + nx))
}

/// 8-connected neighbour indices of flat index `i`, in `OFFSETS8` order.
pub fn neighbors8(i: usize, w: usize, h: usize) -> impl Iterator<Item = usize> {
    let (x, y) = (i % w, i / w);
    OFFSETS8
        .into_iter()
        .filter_map(move |(dx, dy)| offset_xy(x, y, dx, dy, w, h).map(|(nx, ny)| ny * w + nx))
}
