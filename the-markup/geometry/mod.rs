//! Structural facts recovered from raw code-block and table nodes.
//!
//! Extraction never panics on odd trees: a shape the renderers cannot use is
//! reported as a [`GeometryError`] and the node is left undecorated.

pub mod code_block;
pub mod table;

use thiserror::Error;

pub use code_block::ParsedCodeBlock;
pub use table::{
  Alignment,
  ParsedTable,
  TableColumn,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
  #[error("code block at row {row} has no content rows")]
  SingleLineCodeBlock { row: usize },
  #[error("table at row {row} has no header row")]
  MissingHeader { row: usize },
  #[error("table at row {row} has no delimiter row")]
  MissingDelimiter { row: usize },
  #[error("table at row {row} has no columns")]
  NoColumns { row: usize },
}
