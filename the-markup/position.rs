use std::ops::{
  Add,
  AddAssign,
};

/// A point in the document: 0-indexed row and byte column, as the parser
/// reports them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
  pub row: usize,
  pub col: usize,
}

impl AddAssign for Position {
  fn add_assign(&mut self, rhs: Self) {
    self.row += rhs.row;
    self.col += rhs.col;
  }
}

impl Add for Position {
  type Output = Position;

  fn add(mut self, rhs: Self) -> Self::Output {
    self += rhs;
    self
  }
}

impl Position {
  pub const fn new(row: usize, col: usize) -> Self {
    Self { row, col }
  }

  pub const fn zero() -> Self {
    Self::new(0, 0)
  }

  /// Column zero of `row`.
  pub const fn line_start(row: usize) -> Self {
    Self::new(row, 0)
  }

  pub const fn is_zero(self) -> bool {
    self.row == 0 && self.col == 0
  }
}

impl From<(usize, usize)> for Position {
  fn from(tuple: (usize, usize)) -> Self {
    Position {
      row: tuple.0,
      col: tuple.1,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn positions_order_by_row_then_col() {
    assert!(Position::new(0, 9) < Position::new(1, 0));
    assert!(Position::new(2, 1) < Position::new(2, 3));
    assert_eq!(Position::from((3, 4)), Position::new(3, 4));
  }

  #[test]
  fn add_positions() {
    let pos = Position::new(1, 2) + Position::new(0, 3);
    assert_eq!(pos, Position::new(1, 5));
    assert!(Position::zero().is_zero());
    assert_eq!(Position::line_start(4), Position::new(4, 0));
  }
}
