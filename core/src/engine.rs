use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress (first reveal that neither wins nor loses)
/// - NotStarted -> Won | Lost (the first reveal can already end the game)
/// - InProgress -> Won | Lost
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameState {
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// Mine placement lifecycle. A fresh board has no mines; the layout is drawn
/// on the first reveal so that reveal can never hit a mine. The transition
/// happens exactly once per game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
enum Seeding {
    Unseeded { seed: u64 },
    Seeded(Minefield),
}

/// Represents a game from creation to win or loss. Operations mutate the
/// engine in place; renderers consume immutable [`Snapshot`] values instead
/// of aliasing the live grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    config: GameConfig,
    seeding: Seeding,
    grid: Array2<Cell>,
    revealed_count: CellCount,
    flagged_count: CellCount,
    state: GameState,
}

impl Game {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            seeding: Seeding::Unseeded { seed },
            grid: Array2::default(config.size.grid_index()),
            revealed_count: 0,
            flagged_count: 0,
            state: Default::default(),
        }
    }

    /// Builds an already-seeded engine around a fixed mine layout.
    pub fn with_minefield(minefield: Minefield) -> Self {
        let size = minefield.size();
        let total = minefield.total_cells();
        let mine_rate = if total == 0 {
            0.0
        } else {
            f64::from(minefield.mine_count()) / f64::from(total)
        };
        Self {
            config: GameConfig::new_unchecked(size, mine_rate),
            seeding: Seeding::Seeded(minefield),
            grid: Array2::default(size.grid_index()),
            revealed_count: 0,
            flagged_count: 0,
            state: Default::default(),
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn is_seeded(&self) -> bool {
        matches!(self.seeding, Seeding::Seeded(_))
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.grid[coords.grid_index()]
    }

    /// Number of mines on the board; 0 while the minefield is unseeded
    /// because no cell holds a mine yet.
    pub fn mine_count(&self) -> CellCount {
        match &self.seeding {
            Seeding::Seeded(minefield) => minefield.mine_count(),
            Seeding::Unseeded { .. } => 0,
        }
    }

    /// How many mines have not been flagged yet.
    pub fn mines_left(&self) -> isize {
        (self.mine_count() as isize) - (self.flagged_count as isize)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Draws the mine layout now, keeping `safe` and its neighbors clear.
    /// The first reveal does this implicitly; calling it twice is an error.
    pub fn place_mines(&mut self, safe: Coord2) -> Result<()> {
        let safe = self.validate_coords(safe)?;
        match &self.seeding {
            Seeding::Seeded(_) => Err(GameError::AlreadySeeded),
            Seeding::Unseeded { seed } => {
                let minefield =
                    BernoulliMinefieldGenerator::new(*seed, safe).generate(self.config);
                self.seeding = Seeding::Seeded(minefield);
                Ok(())
            }
        }
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        self.check_not_finished()?;
        self.ensure_seeded(coords);
        Ok(self.reveal_cell(coords))
    }

    pub fn reveal_index(&mut self, index: CellCount) -> Result<RevealOutcome> {
        let coords = self.coords_at(index)?;
        self.reveal(coords)
    }

    /// Forces the cell to `Flagged` whatever its current state, matching the
    /// right-click behavior this engine reproduces: no unflagging, and even
    /// revealed cells can be flagged back under cover. A re-hidden cell
    /// leaves the revealed count and becomes revealable again. Never seeds
    /// the minefield.
    pub fn flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use MarkOutcome::*;

        let coords = self.validate_coords(coords)?;
        self.check_not_finished()?;

        Ok(match self.grid[coords.grid_index()] {
            Cell::Flagged => NoChange,
            prev => {
                if prev.is_revealed() {
                    self.revealed_count -= 1;
                }
                self.grid[coords.grid_index()] = Cell::Flagged;
                self.flagged_count += 1;
                Changed
            }
        })
    }

    pub fn flag_index(&mut self, index: CellCount) -> Result<MarkOutcome> {
        let coords = self.coords_at(index)?;
        self.flag(coords)
    }

    /// The conventional flag gesture: hidden cells toggle between `Hidden`
    /// and `Flagged`, revealed cells are left alone.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        use MarkOutcome::*;

        let coords = self.validate_coords(coords)?;
        self.check_not_finished()?;

        Ok(match self.grid[coords.grid_index()] {
            Cell::Hidden => {
                self.grid[coords.grid_index()] = Cell::Flagged;
                self.flagged_count += 1;
                Changed
            }
            Cell::Flagged => {
                self.grid[coords.grid_index()] = Cell::Hidden;
                self.flagged_count -= 1;
                Changed
            }
            Cell::Revealed(_) | Cell::Exploded => NoChange,
        })
    }

    /// Discards the board and the mine layout, returning to a fresh
    /// unseeded game with the same config.
    pub fn reset(&mut self, seed: u64) {
        log::debug!("reset with seed {}", seed);
        self.seeding = Seeding::Unseeded { seed };
        self.grid = Array2::default(self.config.size.grid_index());
        self.revealed_count = 0;
        self.flagged_count = 0;
        self.state = GameState::NotStarted;
    }

    /// Copies the rendering-relevant state into an owned value that later
    /// engine mutations cannot touch.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::new(
            self.grid.clone(),
            self.state,
            self.mine_count(),
            self.mines_left(),
            self.revealed_count,
        )
    }

    fn ensure_seeded(&mut self, start: Coord2) {
        if let Seeding::Unseeded { seed } = self.seeding {
            log::debug!("first reveal at {:?} seeds the minefield", start);
            let minefield = BernoulliMinefieldGenerator::new(seed, start).generate(self.config);
            self.seeding = Seeding::Seeded(minefield);
        }
    }

    fn reveal_cell(&mut self, coords: Coord2) -> RevealOutcome {
        use RevealOutcome::*;

        let Seeding::Seeded(minefield) = &self.seeding else {
            // reveal() seeds before calling in
            return NoChange;
        };

        let cell = self.grid[coords.grid_index()];
        if cell.is_revealed() {
            return NoChange;
        }

        if minefield.contains_mine(coords) {
            if cell == Cell::Flagged {
                self.flagged_count -= 1;
            }
            self.grid[coords.grid_index()] = Cell::Exploded;
            log::debug!("mine hit at {:?}", coords);
            self.end_game(false);
            return HitMine;
        }

        let safe_cells = minefield.safe_cell_count();

        // Work-list form of the reveal cascade. Neighbors enter the queue in
        // the fixed displacement order; mines never enter it at all. A
        // numbered cell still spreads into neighbors whose own count is zero.
        let mut visited = BTreeSet::new();
        let mut to_visit = VecDeque::from([coords]);

        while let Some(visit_coords) = to_visit.pop_front() {
            if !visited.insert(visit_coords) {
                continue;
            }

            let prev = self.grid[visit_coords.grid_index()];
            if prev.is_revealed() {
                continue;
            }

            let count = minefield.adjacent_mine_count(visit_coords);
            if prev == Cell::Flagged {
                // the cascade reveals flagged cells too; only mines block it
                self.flagged_count -= 1;
            }
            self.grid[visit_coords.grid_index()] = Cell::Revealed(count);
            self.revealed_count += 1;
            log::trace!("revealed {:?}, adjacent mines: {}", visit_coords, count);

            for neighbor in minefield.iter_neighbors(visit_coords) {
                if minefield.contains_mine(neighbor) {
                    continue;
                }
                if self.grid[neighbor.grid_index()].is_revealed() || visited.contains(&neighbor) {
                    continue;
                }
                if count == 0 || minefield.adjacent_mine_count(neighbor) == 0 {
                    to_visit.push_back(neighbor);
                }
            }
        }

        if self.revealed_count == safe_cells {
            self.end_game(true);
            Won
        } else {
            self.mark_started();
            Revealed
        }
    }

    fn mark_started(&mut self) {
        if matches!(self.state, GameState::NotStarted) {
            self.state = GameState::InProgress;
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won { GameState::Won } else { GameState::Lost };
        log::debug!("game ended: {:?}", self.state);
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (x_end, y_end) = self.config.size;
        if coords.0 < x_end && coords.1 < y_end {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    fn coords_at(&self, index: CellCount) -> Result<Coord2> {
        if index < self.config.total_cells() {
            Ok(coords_of(self.config.size, index))
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
