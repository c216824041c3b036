use std::fmt::Write;

use sweeper_core::{BestTimes, Board, Cell, CellState, Session, SessionState, format_time};

fn cell_glyph(cell: &Cell) -> char {
    match (cell.state, cell.is_mine) {
        (CellState::Hidden, _) => '#',
        (CellState::Flagged, _) => 'F',
        (CellState::Revealed, true) => '*',
        (CellState::Revealed, false) if cell.adjacent_mines == 0 => '.',
        (CellState::Revealed, false) => char::from(b'0' + cell.adjacent_mines),
    }
}

/// Mine counter in the classic three digit style.
pub fn format_for_counter(num: isize) -> String {
    match num {
        ..-99 => "-99".to_string(),
        -99..0 => format!("-{:02}", -num),
        0..1000 => format!("{:03}", num),
        1000.. => "999".to_string(),
    }
}

/// Grid with column indices on top and row indices on the left.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    out.push_str("    ");
    for col in 0..board.cols() {
        let _ = write!(out, "{:>3}", col);
    }
    out.push('\n');

    for row in 0..board.rows() {
        let _ = write!(out, "{:>3} ", row);
        for cell in board.row(row) {
            let _ = write!(out, "{:>3}", cell_glyph(cell));
        }
        out.push('\n');
    }

    out
}

pub fn render_session<B: BestTimes>(session: &Session<B>) -> String {
    let best = session
        .best_time()
        .map_or_else(|| "--:--".to_string(), format_time);

    let mut out = format!(
        "Time: {}  Best: {}  Mines: {}\n",
        format_time(session.elapsed_secs()),
        best,
        format_for_counter(session.board().mines_left()),
    );
    out.push_str(&render_board(session.board()));

    match session.state() {
        SessionState::Idle => out.push_str("Make a move to start.\n"),
        SessionState::Playing => {}
        SessionState::Won => {
            let _ = writeln!(
                out,
                "You won in {}!",
                format_time(session.elapsed_secs())
            );
        }
        SessionState::Lost => out.push_str("Game over, you hit a mine.\n"),
    }

    out
}
