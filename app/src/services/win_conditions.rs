use crate::core::{Board, Cell, Role};

/// Coordinates of the eight winning lines
///
/// Checked in this order: rows top to bottom, columns left to right, then the
/// main diagonal and the anti-diagonal.
pub const WINNING_LINES: [[(usize, usize); 3]; 8] = [
    // Rows
    [(0, 0), (0, 1), (0, 2)],
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    // Columns
    [(0, 0), (1, 0), (2, 0)],
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    // Diagonals
    [(0, 0), (1, 1), (2, 2)],
    [(0, 2), (1, 1), (2, 0)],
];

/// Role occupying a line, if all three cells hold that same role
fn line_owner(board: &Board, line: &[(usize, usize); 3]) -> Option<Role> {
    let [a, b, c] = (*line).map(|(row, col)| board.rows()[row][col]);
    match a {
        Some(role) if b == Some(role) && c == Some(role) => Some(role),
        _ => None,
    }
}

/// Determine the winner of the board
///
/// # Arguments
///
/// * `board` - The board to inspect
///
/// # Returns
///
/// The role of the first uniform, non-empty line, or None
pub fn determine_winner(board: &Board) -> Option<Role> {
    WINNING_LINES
        .iter()
        .find_map(|line| line_owner(board, line))
}

/// Cells forming the first completed line, if any
pub fn winning_line(board: &Board) -> Option<[Cell; 3]> {
    WINNING_LINES
        .iter()
        .find(|line| line_owner(board, line).is_some())
        .and_then(|line| {
            let [(r0, c0), (r1, c1), (r2, c2)] = *line;
            Some([
                Cell::new(r0, c0).ok()?,
                Cell::new(r1, c1).ok()?,
                Cell::new(r2, c2).ok()?,
            ])
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: Option<Role> = Some(Role::X);
    const O: Option<Role> = Some(Role::O);
    const E: Option<Role> = None;

    #[test]
    fn test_no_winner_empty_board() {
        assert_eq!(determine_winner(&Board::new()), None);
    }

    #[test]
    fn test_every_line_wins() {
        for line in WINNING_LINES {
            let mut rows = [[E; 3]; 3];
            for (row, col) in line {
                rows[row][col] = O;
            }
            let board = Board::from_rows(rows);

            assert_eq!(determine_winner(&board), Some(Role::O), "line {:?}", line);
        }
    }

    #[test]
    fn test_mixed_line_is_not_a_win() {
        let board = Board::from_rows([[X, X, O], [E, E, E], [E, E, E]]);
        assert_eq!(determine_winner(&board), None);
    }

    #[test]
    fn test_column_win() {
        let board = Board::from_rows([[O, X, X], [O, E, E], [O, X, X]]);
        assert_eq!(determine_winner(&board), Some(Role::O));
    }

    #[test]
    fn test_two_lines_report_the_row_first() {
        // Last mark at (0,0) completes both the top row and the left column
        let board = Board::from_rows([[X, X, X], [X, O, O], [X, O, O]]);

        assert_eq!(determine_winner(&board), Some(Role::X));
        let line = winning_line(&board).unwrap();
        assert_eq!(line[2], Cell::new(0, 2).unwrap());
    }

    #[test]
    fn test_draw() {
        let board = Board::from_rows([[X, O, X], [X, O, O], [O, X, X]]);

        assert!(board.is_full());
        assert_eq!(determine_winner(&board), None);
    }

    #[test]
    fn test_full_board_with_winner() {
        let board = Board::from_rows([[X, X, X], [O, O, X], [X, O, O]]);

        assert!(board.is_full());
        assert_eq!(determine_winner(&board), Some(Role::X));
    }

    #[test]
    fn test_winning_line_cells() {
        let board = Board::from_rows([[E, E, X], [E, X, E], [X, O, O]]);

        let line = winning_line(&board).unwrap();
        assert_eq!(line[0], Cell::new(0, 2).unwrap());
        assert_eq!(line[1], Cell::new(1, 1).unwrap());
        assert_eq!(line[2], Cell::new(2, 0).unwrap());

        assert!(winning_line(&Board::new()).is_none());
    }

    #[test]
    fn test_winner_iff_uniform_line_on_every_board() {
        // All 3^9 fillings, compared against a brute-force line scan
        let marks = [E, X, O];
        for code in 0..3usize.pow(9) {
            let mut rows = [[E; 3]; 3];
            let mut rest = code;
            for cell in Cell::all() {
                rows[cell.row()][cell.col()] = marks[rest % 3];
                rest /= 3;
            }
            let board = Board::from_rows(rows);

            let has_uniform_line = WINNING_LINES.iter().any(|line| {
                let first = rows[line[0].0][line[0].1];
                first.is_some() && line.iter().all(|&(r, c)| rows[r][c] == first)
            });

            assert_eq!(
                determine_winner(&board).is_some(),
                has_uniform_line,
                "board {:?}",
                rows
            );
        }
    }
}
