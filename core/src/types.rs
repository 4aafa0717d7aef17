use ndarray::Array2;

/// Single coordinate axis, used for board width, height, and positions.
pub type Coord = u8;

/// Cell-count scale: totals, mine counts, and row-major cell indices.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Saturating `a * b` without leaving the count scale.
pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Row-major linear index of `coords` on a board of `size`: `y * width + x`.
pub const fn index_of(size: Coord2, coords: Coord2) -> CellCount {
    coords.1 as CellCount * size.0 as CellCount + coords.0 as CellCount
}

/// Inverse of [`index_of`]. `index` must lie below `mult(size.0, size.1)`
/// and `size` must describe a non-empty board.
pub const fn coords_of(size: Coord2, index: CellCount) -> Coord2 {
    let width = size.0 as CellCount;
    ((index % width) as Coord, (index / width) as Coord)
}

pub trait ToGridIndex {
    type Output;
    fn grid_index(self) -> Self::Output;
}

impl ToGridIndex for Coord2 {
    type Output = [usize; 2];

    fn grid_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter {
        let dim = self.dim();
        let bounds = (dim.0.try_into().unwrap(), dim.1.try_into().unwrap());
        NeighborIter::new(center, bounds)
    }
}

const DISPLACEMENTS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it stays in bounds.
fn apply_delta(coords: Coord2, delta: (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    let (max_x, max_y) = bounds;

    let next_x = x.checked_add_signed(dx)?;
    if next_x >= max_x {
        return None;
    }

    let next_y = y.checked_add_signed(dy)?;
    if next_y >= max_y {
        return None;
    }

    Some((next_x, next_y))
}

/// Yields the in-bounds neighbors of a cell, always walking the eight
/// displacements in the same order: the row above left-to-right, the two
/// horizontal neighbors, then the row below left-to-right.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    cursor: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            cursor: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = DISPLACEMENTS.get(usize::from(self.cursor)) {
            self.cursor += 1;
            if let Some(next) = apply_delta(self.center, delta, self.bounds) {
                return Some(next);
            }
        }
        None
    }
}
