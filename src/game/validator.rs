use crate::{
    error::PlacementError,
    game::grid::{Grid, Position},
};

pub struct PlacementValidator;

impl PlacementValidator {
    /// Check that `letter` may go at `pos`.
    ///
    /// A placement is legal when the cell is on the board, empty, and shares
    /// an edge with at least one filled cell. Diagonal contact does not count.
    pub fn check(grid: &Grid, pos: Position, letter: char) -> Result<(), PlacementError> {
        let Position { row, col } = pos;

        if !pos.in_bounds() {
            return Err(PlacementError::OutOfBounds { row, col });
        }

        if grid.is_occupied(pos) {
            return Err(PlacementError::Occupied { row, col });
        }

        if !grid.has_occupied_neighbour(pos) {
            return Err(PlacementError::NotAdjacent { row, col });
        }

        if !letter.is_alphabetic() {
            return Err(PlacementError::NotALetter(letter));
        }

        Ok(())
    }
}
