use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical player-visible state stored by the gameplay engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Hidden,
    Revealed(u8),
    Flagged,
    /// The mine cell whose reveal ended the game.
    Exploded,
}

impl Cell {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_) | Self::Exploded)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::Hidden
    }
}

/// Renders the glyph shown inside a cell: a bomb for the exploded mine, the
/// adjacent-mine count when it is non-zero, a flag marker, and nothing at all
/// for hidden or open-and-empty cells.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Exploded => write!(f, "💣"),
            Cell::Revealed(count) if *count > 0 => write!(f, "{count}"),
            Cell::Revealed(_) => write!(f, " "),
            Cell::Flagged => write!(f, "🚩"),
            Cell::Hidden => write!(f, " "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cell_is_hidden() {
        assert_eq!(Cell::default(), Cell::Hidden);
    }

    #[test]
    fn only_open_cells_count_as_revealed() {
        assert!(Cell::Revealed(0).is_revealed());
        assert!(Cell::Revealed(8).is_revealed());
        assert!(Cell::Exploded.is_revealed());
        assert!(!Cell::Hidden.is_revealed());
        assert!(!Cell::Flagged.is_revealed());
    }

    #[test]
    fn glyphs_follow_the_display_contract() {
        assert_eq!(Cell::Exploded.to_string(), "💣");
        assert_eq!(Cell::Flagged.to_string(), "🚩");
        assert_eq!(Cell::Revealed(3).to_string(), "3");
        assert_eq!(Cell::Revealed(0).to_string(), " ");
        assert_eq!(Cell::Hidden.to_string(), " ");
    }
}
