use the_core::grapheme::{
  leading_spaces,
  line_width,
};

use crate::{
  context::RenderContext,
  geometry::GeometryError,
  tree::NodeView,
};

pub const DELIMITER: &str = "fenced_code_block_delimiter";

#[derive(Debug, Clone)]
pub struct ParsedCodeBlock<'t> {
  /// Column the block (and its opening fence) starts at.
  pub col:                usize,
  pub start_row:          usize,
  /// First row after the block.
  pub end_row:            usize,
  /// Indentation the parser folded into the fence.
  pub leading_spaces:     usize,
  /// Widest line plus the configured padding.
  pub longest_line:       usize,
  /// Window column the block's background ends at.
  pub width:              usize,
  pub code_info:          Option<NodeView<'t>>,
  pub language:           Option<NodeView<'t>>,
  pub code_info_hidden:   bool,
  pub start_delim_hidden: bool,
  pub end_delim_hidden:   bool,
}

impl ParsedCodeBlock<'_> {
  pub fn rows(&self) -> std::ops::Range<usize> {
    self.start_row..self.end_row
  }
}

pub fn parse<'t>(
  cx: &mut RenderContext<'t>,
  node: NodeView<'t>,
) -> Result<ParsedCodeBlock<'t>, GeometryError> {
  let code = &cx.config().code;
  let start_row = node.start_row();
  let end_row = node.last_row() + 1;
  if end_row - start_row <= 1 {
    return Err(GeometryError::SingleLineCodeBlock { row: start_row });
  }

  let tree = cx.tree();
  let widest = (start_row..end_row)
    .filter_map(|row| tree.line(row))
    .map(line_width)
    .max()
    .unwrap_or(0);
  let longest_line = code.left_pad + widest + code.right_pad;

  let code_info = node.child("info_string");
  let language = code_info.and_then(|info| info.child("language"));
  // An unterminated block has no closing fence to hide.
  let start_delim = node.child_at_row(DELIMITER, start_row);
  let end_delim = node.child_at_row(DELIMITER, end_row - 1);
  let start_delim_hidden = start_delim.is_some_and(|delim| cx.hidden(Some(delim)));
  let end_delim_hidden = end_delim.is_some_and(|delim| cx.hidden(Some(delim)));

  Ok(ParsedCodeBlock {
    col: node.start_col(),
    start_row,
    end_row,
    leading_spaces: leading_spaces(&node.text()),
    longest_line,
    width: longest_line.max(code.min_width),
    code_info,
    language,
    code_info_hidden: cx.hidden(code_info),
    start_delim_hidden,
    end_delim_hidden,
  })
}
