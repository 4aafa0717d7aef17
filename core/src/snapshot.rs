use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Owned copy of everything a renderer needs. Taking one never locks or
/// aliases the engine, and later moves cannot change it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    cells: Array2<Cell>,
    state: GameState,
    mine_count: CellCount,
    mines_left: isize,
    revealed_count: CellCount,
}

impl Snapshot {
    pub(crate) fn new(
        cells: Array2<Cell>,
        state: GameState,
        mine_count: CellCount,
        mines_left: isize,
        revealed_count: CellCount,
    ) -> Self {
        Self {
            cells,
            state,
            mine_count,
            mines_left,
            revealed_count,
        }
    }

    pub fn size(&self) -> Coord2 {
        let (x, y) = self.cells.dim();
        (x as Coord, y as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let size = self.size();
        mult(size.0, size.1)
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn mines_left(&self) -> isize {
        self.mines_left
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.grid_index()]
    }

    pub fn cell(&self, index: CellCount) -> Cell {
        self.cell_at(self.coords_of(index))
    }

    pub fn index_of(&self, coords: Coord2) -> CellCount {
        index_of(self.size(), coords)
    }

    pub fn coords_of(&self, index: CellCount) -> Coord2 {
        coords_of(self.size(), index)
    }

    /// Cells in row-major order, the order cell indexes count in.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, Cell)> + '_ {
        let size = self.size();
        (0..self.total_cells()).map(move |index| {
            let coords = coords_of(size, index);
            (coords, self.cells[coords.grid_index()])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(size: Coord2, mines: &[Coord2]) -> Game {
        Game::with_minefield(Minefield::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn reflects_the_game_it_was_taken_from() {
        let mut engine = game((2, 2), &[(0, 0)]);
        engine.reveal((1, 0)).unwrap();

        let snapshot = engine.snapshot();

        assert_eq!(snapshot.size(), (2, 2));
        assert_eq!(snapshot.state(), GameState::InProgress);
        assert_eq!(snapshot.mine_count(), 1);
        assert_eq!(snapshot.mines_left(), 1);
        assert_eq!(snapshot.revealed_count(), 1);
        assert_eq!(snapshot.cell_at((1, 0)), Cell::Revealed(1));
        assert_eq!(snapshot.cell_at((0, 0)), Cell::Hidden);
    }

    #[test]
    fn later_moves_do_not_leak_into_the_snapshot() {
        let mut engine = game((2, 2), &[(0, 0)]);
        engine.reveal((1, 0)).unwrap();

        let snapshot = engine.snapshot();
        let saved = snapshot.clone();

        engine.toggle_flag((0, 0)).unwrap();
        engine.reveal((0, 1)).unwrap();
        engine.reveal((1, 1)).unwrap();

        assert_eq!(engine.state(), GameState::Won);
        assert_eq!(snapshot, saved);
        assert_eq!(snapshot.state(), GameState::InProgress);
        assert_eq!(snapshot.cell_at((0, 0)), Cell::Hidden);
        assert_eq!(snapshot.cell_at((0, 1)), Cell::Hidden);
    }

    #[test]
    fn iter_cells_walks_row_major() {
        let mut engine = game((2, 2), &[(0, 0)]);
        engine.reveal((1, 1)).unwrap();

        let snapshot = engine.snapshot();
        let coords: Vec<_> = snapshot.iter_cells().map(|(coords, _)| coords).collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (0, 1), (1, 1)]);

        for (index, (coords, cell)) in snapshot.iter_cells().enumerate() {
            assert_eq!(snapshot.cell(index as CellCount), cell);
            assert_eq!(snapshot.cell_at(coords), cell);
            assert_eq!(snapshot.index_of(coords), index as CellCount);
            assert_eq!(snapshot.coords_of(index as CellCount), coords);
        }
    }

    #[test]
    fn snapshots_serialize_round_trip() {
        let mut engine = game((5, 1), &[(2, 0)]);
        engine.reveal((0, 0)).unwrap();
        engine.toggle_flag((2, 0)).unwrap();

        let snapshot = engine.snapshot();
        let saved = serde_json::to_string(&snapshot).unwrap();
        let restored: Snapshot = serde_json::from_str(&saved).unwrap();

        assert_eq!(restored, snapshot);
    }
}
