use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::ops::Index;

pub use cell::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use snapshot::*;
pub use types::*;

mod cell;
mod engine;
mod error;
mod generator;
mod snapshot;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mine_rate: f64,
}

impl GameConfig {
    /// Per-cell mine probability used when no explicit rate is given.
    pub const DEFAULT_MINE_RATE: f64 = 0.2;

    pub const fn new_unchecked(size: Coord2, mine_rate: f64) -> Self {
        Self { size, mine_rate }
    }

    pub fn new(size: Coord2, mine_rate: f64) -> Result<Self> {
        let (size_x, size_y) = size;
        if size_x == 0 || size_y == 0 {
            return Err(GameError::InvalidSize);
        }
        if !(0.0..=1.0).contains(&mine_rate) {
            return Err(GameError::InvalidMineRate);
        }
        Ok(Self::new_unchecked(size, mine_rate))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }
}

/// Fixed mine layout plus the adjacency counts derived from it. Cell states
/// live in the engine grid; this type never changes after construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Minefield {
    mines: Array2<bool>,
    counts: Array2<u8>,
    mine_count: CellCount,
}

impl Minefield {
    pub fn from_mine_mask(mines: Array2<bool>) -> Self {
        let mine_count = mines
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap();

        // The counting pass covers mine cells as well; their count is stored
        // but never shown.
        let mut counts: Array2<u8> = Array2::default(mines.raw_dim());
        let dim = mines.dim();
        let (x_end, y_end): Coord2 = (dim.0.try_into().unwrap(), dim.1.try_into().unwrap());
        for x in 0..x_end {
            for y in 0..y_end {
                let coords = (x, y);
                counts[coords.grid_index()] = mines
                    .iter_neighbors(coords)
                    .filter(|&pos| mines[pos.grid_index()])
                    .count()
                    .try_into()
                    .unwrap();
            }
        }

        Self {
            mines,
            counts,
            mine_count,
        }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mines: Array2<bool> = Array2::default(size.grid_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mines[coords.grid_index()] = true;
        }

        Ok(Self::from_mine_mask(mines))
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.mines.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        self.mines.len().try_into().unwrap()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.counts[coords.grid_index()]
    }

    pub fn index_of(&self, coords: Coord2) -> CellCount {
        index_of(self.size(), coords)
    }

    pub fn coords_of(&self, index: CellCount) -> Coord2 {
        coords_of(self.size(), index)
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.mines.iter_neighbors(coords)
    }
}

impl Index<Coord2> for Minefield {
    type Output = bool;

    fn index(&self, (x, y): Coord2) -> &Self::Output {
        &self.mines[(x as usize, y as usize)]
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
            Won => true,
        }
    }
}
