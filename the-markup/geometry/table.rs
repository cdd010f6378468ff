use tracing::warn;

use crate::{
  geometry::GeometryError,
  tree::NodeView,
};

pub const HEADER: &str = "pipe_table_header";
pub const DELIMITER_ROW: &str = "pipe_table_delimiter_row";
pub const ROW: &str = "pipe_table_row";
pub const PIPE: &str = "|";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
  Left,
  Right,
  Center,
  Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableColumn {
  /// Display columns between the pipes around the delimiter cell.
  pub width:     usize,
  pub alignment: Alignment,
}

#[derive(Debug, Clone)]
pub struct ParsedTable<'t> {
  pub head:      NodeView<'t>,
  pub delimiter: NodeView<'t>,
  pub rows:      Vec<NodeView<'t>>,
  pub columns:   Vec<TableColumn>,
}

impl<'t> ParsedTable<'t> {
  /// The header followed by every body row.
  pub fn content_rows(&self) -> impl Iterator<Item = NodeView<'t>> + '_ {
    std::iter::once(self.head).chain(self.rows.iter().copied())
  }

  /// Last row of the table, the header when there is no body.
  pub fn last_row(&self) -> NodeView<'t> {
    self.rows.last().copied().unwrap_or(self.head)
  }
}

pub fn parse(node: NodeView<'_>) -> Result<ParsedTable<'_>, GeometryError> {
  let row = node.start_row();
  let mut head = None;
  let mut delimiter = None;
  let mut rows = Vec::new();
  for child in node.children() {
    match child.kind() {
      HEADER => head = Some(child),
      DELIMITER_ROW => delimiter = Some(child),
      ROW => rows.push(child),
      kind => warn!(kind, row = child.start_row(), "unexpected node inside pipe table"),
    }
  }
  let head = head.ok_or(GeometryError::MissingHeader { row })?;
  let delimiter = delimiter.ok_or(GeometryError::MissingDelimiter { row })?;

  let columns = columns(delimiter);
  if columns.is_empty() {
    return Err(GeometryError::NoColumns { row });
  }

  Ok(ParsedTable {
    head,
    delimiter,
    rows,
    columns,
  })
}

fn columns(delimiter: NodeView<'_>) -> Vec<TableColumn> {
  let tree = delimiter.tree();
  let row = delimiter.start_row();
  let line_len = tree.line(row).map_or(0, |line| line.len_bytes());
  let children: Vec<_> = delimiter.children().collect();

  children
    .iter()
    .enumerate()
    .filter(|(_, child)| child.kind() == "pipe_table_delimiter_cell")
    .map(|(idx, cell)| {
      // Tables may omit their outer pipes.
      let start = children[..idx]
        .iter()
        .rev()
        .find(|node| node.kind() == PIPE)
        .map_or(delimiter.start_col(), |pipe| pipe.end_col());
      let end = children[idx + 1..]
        .iter()
        .find(|node| node.kind() == PIPE)
        .map_or(line_len, |pipe| pipe.start_col());
      TableColumn {
        width:     tree.cols_width(row, start, end),
        alignment: alignment(*cell),
      }
    })
    .collect()
}

fn alignment(cell: NodeView<'_>) -> Alignment {
  let left = cell.child("pipe_table_align_left").is_some();
  let right = cell.child("pipe_table_align_right").is_some();
  match (left, right) {
    (true, true) => Alignment::Center,
    (true, false) => Alignment::Left,
    (false, true) => Alignment::Right,
    (false, false) => Alignment::Default,
  }
}
