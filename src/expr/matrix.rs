
//! Matrix literals, which enforce consistency in the dimensions of
//! their entries.

use super::{Expr, ArityError};

use serde::Serialize;

/// A non-empty grid of expressions, stored row by row. Every row has
/// the same number of entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Matrix {
  body: Vec<Vec<Expr>>,
}

impl Matrix {
  pub fn new(body: Vec<Vec<Expr>>) -> Result<Matrix, ArityError> {
    let columns = body.first().map_or(0, Vec::len);
    if columns == 0 {
      return Err(ArityError::EmptyMatrix);
    }
    if let Some(row) = body.iter().find(|row| row.len() != columns) {
      return Err(ArityError::RaggedMatrix { expected: columns, actual: row.len() });
    }
    Ok(Matrix { body })
  }

  /// Builds a `rows × columns` matrix from entries in row-major order.
  pub fn from_entries(rows: usize, columns: usize, entries: Vec<Expr>) -> Result<Matrix, ArityError> {
    if rows == 0 || columns == 0 {
      return Err(ArityError::EmptyMatrix);
    }
    if entries.len() != rows * columns {
      return Err(ArityError::WrongCount {
        name: String::from("matrix"),
        expected: rows * columns,
        actual: entries.len(),
      });
    }
    let mut entries = entries.into_iter();
    let body = (0..rows).map(|_| entries.by_ref().take(columns).collect()).collect();
    Matrix::new(body)
  }

  pub fn rows(&self) -> usize {
    self.body.len()
  }

  pub fn columns(&self) -> usize {
    self.body[0].len()
  }

  pub fn row(&self, index: usize) -> Option<&[Expr]> {
    self.body.get(index).map(Vec::as_slice)
  }

  pub fn iter_rows(&self) -> impl Iterator<Item = &[Expr]> {
    self.body.iter().map(Vec::as_slice)
  }

  pub fn entries(&self) -> impl Iterator<Item = &Expr> {
    self.body.iter().flatten()
  }

  pub fn map_entries<F>(self, mut f: F) -> Matrix
  where F: FnMut(Expr) -> Expr {
    let body = self.body.into_iter()
      .map(|row| row.into_iter().map(&mut f).collect())
      .collect();
    Matrix { body }
  }
}
