use ndarray::Array2;

use super::*;

/// Generation strategy that rolls an independent Bernoulli trial per cell and
/// then clears the starting cell and its neighbors, so the first reveal never
/// hits a mine. The mine count is a consequence of the rate, not a target.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BernoulliMinefieldGenerator {
    seed: u64,
    start: Coord2,
}

impl BernoulliMinefieldGenerator {
    pub fn new(seed: u64, start: Coord2) -> Self {
        Self { seed, start }
    }
}

impl MinefieldGenerator for BernoulliMinefieldGenerator {
    fn generate(self, config: GameConfig) -> Minefield {
        use rand::prelude::*;

        let mut mines: Array2<bool> = Array2::default(config.size.grid_index());

        // Trials are drawn in row-major index order, so a given seed always
        // produces the same layout.
        let mut rng = SmallRng::seed_from_u64(self.seed);
        for index in 0..config.total_cells() {
            let coords = coords_of(config.size, index);
            mines[coords.grid_index()] = rng.random_bool(config.mine_rate);
        }

        mines[self.start.grid_index()] = false;
        for coords in mines.iter_neighbors(self.start) {
            mines[coords.grid_index()] = false;
        }

        let minefield = Minefield::from_mine_mask(mines);
        log::debug!(
            "generated minefield: {} mines in {} cells (rate {})",
            minefield.mine_count(),
            minefield.total_cells(),
            config.mine_rate
        );
        if minefield.mine_count() == 0 {
            log::warn!("minefield has no mines, the next reveal wins outright");
        }
        minefield
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(size: Coord2, mine_rate: f64) -> GameConfig {
        GameConfig::new(size, mine_rate).unwrap()
    }

    #[test]
    fn start_cell_and_neighbors_are_never_mined() {
        for seed in 0..64 {
            let minefield = BernoulliMinefieldGenerator::new(seed, (2, 2))
                .generate(config((5, 5), 0.95));

            for x in 1..=3 {
                for y in 1..=3 {
                    assert!(
                        !minefield.contains_mine((x, y)),
                        "seed {} mined the protected zone at {:?}",
                        seed,
                        (x, y)
                    );
                }
            }
        }
    }

    #[test]
    fn start_zone_clipping_holds_in_a_corner() {
        for seed in 0..64 {
            let minefield = BernoulliMinefieldGenerator::new(seed, (0, 0))
                .generate(config((4, 4), 1.0));

            assert!(!minefield.contains_mine((0, 0)));
            assert!(!minefield.contains_mine((1, 0)));
            assert!(!minefield.contains_mine((0, 1)));
            assert!(!minefield.contains_mine((1, 1)));
            // everything outside the protected zone keeps its mine
            assert_eq!(minefield.mine_count(), 12);
        }
    }

    #[test]
    fn equal_seeds_produce_equal_minefields() {
        let first = BernoulliMinefieldGenerator::new(42, (3, 3)).generate(config((9, 9), 0.2));
        let second = BernoulliMinefieldGenerator::new(42, (3, 3)).generate(config((9, 9), 0.2));
        let other_seed = BernoulliMinefieldGenerator::new(43, (3, 3)).generate(config((9, 9), 0.2));

        assert_eq!(first, second);
        assert_ne!(first, other_seed);
    }

    #[test]
    fn zero_rate_places_no_mines() {
        let minefield = BernoulliMinefieldGenerator::new(7, (0, 0)).generate(config((8, 8), 0.0));

        assert_eq!(minefield.mine_count(), 0);
        assert_eq!(minefield.safe_cell_count(), 64);
    }

    #[test]
    fn counts_are_consistent_with_the_generated_layout() {
        let minefield = BernoulliMinefieldGenerator::new(1234, (4, 4))
            .generate(config((9, 9), 0.3));

        for x in 0..9 {
            for y in 0..9 {
                let coords = (x, y);
                let expected: u8 = minefield
                    .iter_neighbors(coords)
                    .filter(|&pos| minefield.contains_mine(pos))
                    .count()
                    .try_into()
                    .unwrap();
                assert_eq!(minefield.adjacent_mine_count(coords), expected);
            }
        }
    }
}
