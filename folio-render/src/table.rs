//! Structured tables.
//!
//! A table is a header sequence plus rows of cells. Row lengths are not
//! checked against the header by default: a short row renders fewer cells,
//! a long row renders cells without a header.
use serde::{Deserialize, Serialize};

use crate::{
  error::{RenderError, RenderResult},
  output::{Element, Rendered},
};

/// Headers and rows of a table, generic over the cell type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableData<C> {
  pub headers: Vec<C>,
  #[serde(default)]
  pub rows:    Vec<Vec<C>>,
}

impl<C> TableData<C> {
  #[must_use]
  pub const fn new(headers: Vec<C>, rows: Vec<Vec<C>>) -> Self {
    Self { headers, rows }
  }

  /// Convert every cell, keeping the shape.
  pub fn map<D>(self, mut f: impl FnMut(C) -> D) -> TableData<D> {
    TableData {
      headers: self.headers.into_iter().map(&mut f).collect(),
      rows:    self
        .rows
        .into_iter()
        .map(|row| row.into_iter().map(&mut f).collect())
        .collect(),
    }
  }

  /// Convert every cell by reference, stopping at the first error.
  ///
  /// # Errors
  ///
  /// Returns the first error produced by `f`.
  pub fn try_map_ref<D, E>(
    &self,
    mut f: impl FnMut(&C) -> Result<D, E>,
  ) -> Result<TableData<D>, E> {
    let headers = self
      .headers
      .iter()
      .map(&mut f)
      .collect::<Result<Vec<D>, E>>()?;
    let rows = self
      .rows
      .iter()
      .map(|row| row.iter().map(&mut f).collect::<Result<Vec<D>, E>>())
      .collect::<Result<Vec<_>, E>>()?;
    Ok(TableData { headers, rows })
  }

  /// Index and length of the first row whose length differs from the header.
  #[must_use]
  pub fn first_ragged_row(&self) -> Option<(usize, usize)> {
    self
      .rows
      .iter()
      .enumerate()
      .find(|(_, row)| row.len() != self.headers.len())
      .map(|(index, row)| (index, row.len()))
  }
}

impl<C> Default for TableData<C> {
  fn default() -> Self {
    Self {
      headers: Vec::new(),
      rows:    Vec::new(),
    }
  }
}

/// Whether ragged tables are accepted.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TableMode {
  /// Render rows as given.
  #[default]
  Lenient,
  /// Reject any row whose length differs from the header.
  Strict,
}

/// Check a table against `mode`.
///
/// # Errors
///
/// In [`TableMode::Strict`], returns [`RenderError::RaggedTable`] for the first
/// row whose cell count differs from the header count.
pub fn check_shape<C>(data: &TableData<C>, mode: TableMode) -> RenderResult<()> {
  if mode == TableMode::Lenient {
    return Ok(());
  }
  match data.first_ragged_row() {
    Some((row, found)) => {
      Err(RenderError::RaggedTable {
        row,
        expected: data.headers.len(),
        found,
      })
    },
    None => Ok(()),
  }
}

/// Build a `<table>` element from rendered cells.
///
/// One header row with a `th` per header, then one `tr` per row with a `td`
/// per cell of that row. Order is preserved exactly.
#[must_use]
pub fn materialize(data: TableData<Rendered>) -> Element {
  let header_row = Element::new("tr").children(
    data
      .headers
      .into_iter()
      .map(|cell| Rendered::from(Element::new("th").child(cell))),
  );

  let body_rows = data.rows.into_iter().map(|row| {
    Rendered::from(Element::new("tr").children(
      row
        .into_iter()
        .map(|cell| Rendered::from(Element::new("td").child(cell))),
    ))
  });

  Element::new("table")
    .child(Element::new("thead").child(header_row))
    .child(Element::new("tbody").children(body_rows))
}
