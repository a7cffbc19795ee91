use std::fmt;

use serde::Serialize;

/// Width and height of the board.
pub const GRID_SIZE: usize = 5;

/// Row that receives the starting word.
pub const MIDDLE_ROW: usize = 2;

#[derive(Debug, Clone, Copy, Serialize, Hash, Eq, PartialEq)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn in_bounds(&self) -> bool {
        self.row < GRID_SIZE && self.col < GRID_SIZE
    }

    /// Orthogonal neighbours that lie on the board.
    pub fn neighbours(&self) -> impl Iterator<Item = Position> + '_ {
        const DIRECTIONS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

        DIRECTIONS.into_iter().filter_map(move |(dr, dc)| {
            let row = self.row.checked_add_signed(dr)?;
            let col = self.col.checked_add_signed(dc)?;
            let pos = Position { row, col };
            pos.in_bounds().then_some(pos)
        })
    }
}

/// The fixed 5x5 board. Cells are written once and never cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    cells: [[Option<char>; GRID_SIZE]; GRID_SIZE],
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a grid with `word` laid across the middle row.
    pub fn with_middle_word(word: &str) -> Self {
        let mut grid = Self::new();
        for (col, letter) in word.chars().take(GRID_SIZE).enumerate() {
            grid.cells[MIDDLE_ROW][col] = Some(upper(letter));
        }
        grid
    }

    /// Letter at `pos`, or `None` if the cell is empty or off the board.
    pub fn get(&self, pos: Position) -> Option<char> {
        if !pos.in_bounds() {
            return None;
        }
        self.cells[pos.row][pos.col]
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.get(pos).is_some()
    }

    /// Write a letter into an empty cell. Returns false without touching the
    /// grid if the cell is off the board or already filled.
    pub(crate) fn set(&mut self, pos: Position, letter: char) -> bool {
        if !pos.in_bounds() || self.cells[pos.row][pos.col].is_some() {
            return false;
        }
        self.cells[pos.row][pos.col] = Some(upper(letter));
        true
    }

    pub fn has_occupied_neighbour(&self, pos: Position) -> bool {
        pos.neighbours().any(|n| self.is_occupied(n))
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().flatten().filter(|cell| cell.is_some()).count()
    }

    fn row(&self, row: usize) -> [Option<char>; GRID_SIZE] {
        self.cells[row]
    }

    fn column(&self, col: usize) -> [Option<char>; GRID_SIZE] {
        std::array::from_fn(|row| self.cells[row][col])
    }

    /// Every maximal run of two or more letters, rows first (left to right)
    /// then columns (top to bottom).
    pub fn runs(&self) -> Vec<String> {
        let rows = (0..GRID_SIZE).map(|r| self.row(r));
        let cols = (0..GRID_SIZE).map(|c| self.column(c));

        rows.chain(cols)
            .flat_map(|line| split_runs(&line))
            .collect()
    }

    /// Rows rendered with '.' for empty cells, one string per row.
    pub fn render_rows(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.unwrap_or('.').to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }
}

/// Upper-case form of `letter`, or the letter itself when its upper case
/// is not a single character (e.g. 'ß').
pub fn upper(letter: char) -> char {
    let mut chars = letter.to_uppercase();
    match (chars.next(), chars.next()) {
        (Some(u), None) => u,
        _ => letter,
    }
}

fn split_runs(line: &[Option<char>]) -> Vec<String> {
    line.split(Option::is_none)
        .filter(|run| run.len() >= 2)
        .map(|run| run.iter().flatten().collect())
        .collect()
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.render_rows() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
