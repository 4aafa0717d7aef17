use std::fmt::Write;

use boomgrid_core::{Cell, Snapshot};

/// Terminal glyphs. Hidden cells need a mark of their own here; zero-count
/// revealed cells stay blank so openings read as clearings.
fn glyph(cell: Cell) -> char {
    match cell {
        Cell::Hidden => '·',
        Cell::Flagged => 'F',
        Cell::Exploded => 'X',
        Cell::Revealed(0) => ' ',
        Cell::Revealed(count) => char::from_digit(u32::from(count), 10).unwrap_or('?'),
    }
}

/// Draws the whole board with a mine/flag header and axis labels. Labels
/// repeat mod 10 so wide boards keep one column per cell.
pub fn draw(snapshot: &Snapshot) -> String {
    let (width, height) = snapshot.size();
    let mut out = String::new();

    let _ = writeln!(
        out,
        "💣 {}  🚩 {}",
        snapshot.mine_count(),
        snapshot.mines_left()
    );

    let _ = write!(out, "   ");
    for x in 0..width {
        let _ = write!(out, "{} ", x % 10);
    }
    let _ = writeln!(out);

    for y in 0..height {
        let _ = write!(out, "{:>2} ", y);
        for x in 0..width {
            let _ = write!(out, "{} ", glyph(snapshot.cell_at((x, y))));
        }
        let _ = writeln!(out);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use boomgrid_core::{Game, Minefield};

    fn game(size: (u8, u8), mines: &[(u8, u8)]) -> Game {
        Game::with_minefield(Minefield::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn draws_the_full_board() {
        let mut engine = game((2, 2), &[(0, 0)]);
        engine.reveal((1, 0)).unwrap();
        engine.toggle_flag((0, 0)).unwrap();

        let out = draw(&engine.snapshot());

        assert_eq!(out, "💣 1  🚩 0\n   0 1 \n 0 F 1 \n 1 · · \n");
    }

    #[test]
    fn zero_openings_and_exploded_mines_render_distinctly() {
        let mut engine = game((5, 1), &[(2, 0)]);
        engine.reveal((0, 0)).unwrap();
        engine.reveal((2, 0)).unwrap();

        let out = draw(&engine.snapshot());

        assert!(out.contains(" 0   1 X · ·"), "unexpected render:\n{out}");
    }

    #[test]
    fn column_labels_wrap_past_ten() {
        let engine = game((12, 1), &[]);

        let out = draw(&engine.snapshot());

        assert!(out.contains("   0 1 2 3 4 5 6 7 8 9 0 1 "));
    }
}
