//! Read-only view over a parsed markdown document.
//!
//! The parser itself lives with the host. Whatever grammar adapter the host
//! uses fills a [`SyntaxTree`] through a [`TreeBuilder`]: node kinds are the
//! tree-sitter markdown names (`atx_heading`, `list_marker_minus`,
//! `pipe_table_cell`, ...) and positions are `(row, byte column)` pairs, end
//! exclusive. Renderers only ever see [`NodeView`] handles, which borrow the
//! tree and cannot change it.

use std::{
  borrow::Cow,
  fmt,
};

use ropey::{
  Rope,
  RopeSlice,
};
use the_core::grapheme::str_width;
use thiserror::Error;

use crate::position::Position;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TreeError {
  #[error("node `{kind}` ends at {end:?} before it starts at {start:?}")]
  InvertedRange {
    kind:  &'static str,
    start: Position,
    end:   Position,
  },
  #[error("node `{kind}` at {pos:?} lies outside the document")]
  OutOfBounds { kind: &'static str, pos: Position },
  #[error("close without a matching open")]
  UnbalancedClose,
  #[error("node `{kind}` was never closed")]
  Unclosed { kind: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
  fn idx(self) -> usize {
    self.0 as usize
  }
}

/// Stable identity of a node within one pass: where it starts and what it
/// is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
  pub row:  usize,
  pub col:  usize,
  pub kind: &'static str,
}

#[derive(Debug, Clone)]
struct NodeData {
  kind:     &'static str,
  start:    Position,
  end:      Position,
  parent:   Option<NodeId>,
  children: Vec<NodeId>,
}

/// The immutable document plus its node arena.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
  text:  Rope,
  nodes: Vec<NodeData>,
  roots: Vec<NodeId>,
}

impl SyntaxTree {
  pub fn text(&self) -> &Rope {
    &self.text
  }

  /// Number of buffer lines. A trailing line ending does not open another
  /// line.
  pub fn line_count(&self) -> usize {
    let lines = self.text.len_lines();
    let ends_with_newline = self
      .text
      .len_chars()
      .checked_sub(1)
      .is_some_and(|idx| self.text.char(idx) == '\n');
    if ends_with_newline { lines - 1 } else { lines }
  }

  /// The text of `row` without its line ending.
  pub fn line(&self, row: usize) -> Option<RopeSlice<'_>> {
    if row >= self.line_count() {
      return None;
    }
    let line = self.text.line(row);
    let mut len = line.len_chars();
    while len > 0 && matches!(line.char(len - 1), '\n' | '\r') {
      len -= 1;
    }
    Some(line.slice(..len))
  }

  pub fn line_text(&self, row: usize) -> Option<Cow<'_, str>> {
    self.line(row).map(Cow::from)
  }

  /// Display width of the byte columns `start..end` on `row`, clamped to the
  /// line.
  pub fn cols_width(&self, row: usize, start: usize, end: usize) -> usize {
    let Some(line) = self.line(row) else {
      return 0;
    };
    let len = line.len_bytes();
    let (start, end) = (start.min(len), end.min(len));
    if start >= end {
      return 0;
    }
    str_width(&Cow::from(line.byte_slice(start..end)))
  }

  pub fn node(&self, id: NodeId) -> NodeView<'_> {
    NodeView { tree: self, id }
  }

  pub fn roots(&self) -> impl Iterator<Item = NodeView<'_>> + '_ {
    self.roots.iter().map(move |&id| self.node(id))
  }

  /// Every node in document order (pre-order).
  pub fn preorder(&self) -> Preorder<'_> {
    let mut stack: Vec<NodeId> = self.roots.clone();
    stack.reverse();
    Preorder { tree: self, stack }
  }

  fn data(&self, id: NodeId) -> &NodeData {
    &self.nodes[id.idx()]
  }

  fn byte_of(&self, pos: Position) -> usize {
    if pos.row >= self.text.len_lines() {
      return self.text.len_bytes();
    }
    let line_start = self.text.line_to_byte(pos.row);
    let line_len = self.text.line(pos.row).len_bytes();
    line_start + pos.col.min(line_len)
  }
}

pub struct Preorder<'t> {
  tree:  &'t SyntaxTree,
  stack: Vec<NodeId>,
}

impl<'t> Iterator for Preorder<'t> {
  type Item = NodeView<'t>;

  fn next(&mut self) -> Option<Self::Item> {
    let id = self.stack.pop()?;
    self
      .stack
      .extend(self.tree.data(id).children.iter().rev().copied());
    Some(self.tree.node(id))
  }
}

/// Which physical line relative to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjacent {
  Above,
  First,
  Below,
}

/// A borrowed handle to one node.
#[derive(Clone, Copy)]
pub struct NodeView<'t> {
  tree: &'t SyntaxTree,
  id:   NodeId,
}

impl fmt::Debug for NodeView<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("NodeView")
      .field("kind", &self.kind())
      .field("start", &self.start())
      .field("end", &self.end())
      .finish()
  }
}

impl PartialEq for NodeView<'_> {
  fn eq(&self, other: &Self) -> bool {
    std::ptr::eq(self.tree, other.tree) && self.id == other.id
  }
}

impl Eq for NodeView<'_> {}

impl<'t> NodeView<'t> {
  pub fn id(&self) -> NodeId {
    self.id
  }

  pub fn tree(&self) -> &'t SyntaxTree {
    self.tree
  }

  pub fn kind(&self) -> &'static str {
    self.data().kind
  }

  pub fn start(&self) -> Position {
    self.data().start
  }

  pub fn end(&self) -> Position {
    self.data().end
  }

  pub fn start_row(&self) -> usize {
    self.start().row
  }

  pub fn start_col(&self) -> usize {
    self.start().col
  }

  pub fn end_row(&self) -> usize {
    self.end().row
  }

  pub fn end_col(&self) -> usize {
    self.end().col
  }

  /// Last row holding any of the node's text. Block nodes usually end at
  /// column zero of the following line.
  pub fn last_row(&self) -> usize {
    let (start, end) = (self.start(), self.end());
    if end.col == 0 && end.row > start.row {
      end.row - 1
    } else {
      end.row
    }
  }

  pub fn key(&self) -> NodeKey {
    NodeKey {
      row:  self.start_row(),
      col:  self.start_col(),
      kind: self.kind(),
    }
  }

  pub fn slice(&self) -> RopeSlice<'t> {
    let start = self.tree.byte_of(self.start());
    let end = self.tree.byte_of(self.end()).max(start);
    self.tree.text.byte_slice(start..end)
  }

  pub fn text(&self) -> Cow<'t, str> {
    Cow::from(self.slice())
  }

  /// Display width of the node's first line.
  pub fn width(&self) -> usize {
    str_width(&self.text())
  }

  pub fn parent(&self) -> Option<NodeView<'t>> {
    self.data().parent.map(|id| self.tree.node(id))
  }

  pub fn children(&self) -> impl Iterator<Item = NodeView<'t>> + 't {
    let tree = self.tree;
    tree
      .data(self.id)
      .children
      .iter()
      .map(move |&id| tree.node(id))
  }

  pub fn child(&self, kind: &str) -> Option<NodeView<'t>> {
    self.children().find(|child| child.kind() == kind)
  }

  pub fn child_at_row(&self, kind: &str, row: usize) -> Option<NodeView<'t>> {
    self
      .children()
      .find(|child| child.kind() == kind && child.start_row() == row)
  }

  /// First node of `kind` sharing this node's parent.
  pub fn sibling(&self, kind: &str) -> Option<NodeView<'t>> {
    let id = self.id;
    self
      .parent()?
      .children()
      .find(|node| node.id != id && node.kind() == kind)
  }

  pub fn ancestors(&self) -> impl Iterator<Item = NodeView<'t>> + 't {
    std::iter::successors(self.parent(), |node| node.parent())
  }

  /// How many `kind` ancestors enclose this node before the nearest
  /// `section`.
  pub fn level_in_section(&self, kind: &str) -> usize {
    self
      .ancestors()
      .take_while(|node| node.kind() != "section")
      .filter(|node| node.kind() == kind)
      .count()
  }

  /// Text of a physical line next to the node, without its line ending.
  pub fn line(&self, adjacent: Adjacent) -> Option<Cow<'t, str>> {
    let row = match adjacent {
      Adjacent::Above => self.start_row().checked_sub(1)?,
      Adjacent::First => self.start_row(),
      Adjacent::Below => self.last_row() + 1,
    };
    self.tree.line_text(row)
  }

  fn data(&self) -> &'t NodeData {
    self.tree.data(self.id)
  }
}

/// Fills a [`SyntaxTree`] node by node.
///
/// Errors are deferred: the first one is kept and reported by
/// [`TreeBuilder::build`], so call chains stay flat.
#[derive(Debug)]
pub struct TreeBuilder {
  text:  Rope,
  nodes: Vec<NodeData>,
  roots: Vec<NodeId>,
  stack: Vec<NodeId>,
  error: Option<TreeError>,
}

impl TreeBuilder {
  pub fn new(text: &str) -> Self {
    Self {
      text:  Rope::from(text),
      nodes: Vec::new(),
      roots: Vec::new(),
      stack: Vec::new(),
      error: None,
    }
  }

  /// Adds a node and makes it the parent of the nodes that follow until
  /// [`TreeBuilder::close`].
  pub fn open(
    &mut self,
    kind: &'static str,
    start: impl Into<Position>,
    end: impl Into<Position>,
  ) -> &mut Self {
    if let Some(id) = self.push(kind, start.into(), end.into()) {
      self.stack.push(id);
    }
    self
  }

  pub fn leaf(
    &mut self,
    kind: &'static str,
    start: impl Into<Position>,
    end: impl Into<Position>,
  ) -> &mut Self {
    self.push(kind, start.into(), end.into());
    self
  }

  pub fn close(&mut self) -> &mut Self {
    if self.stack.pop().is_none() {
      self.fail(TreeError::UnbalancedClose);
    }
    self
  }

  pub fn build(self) -> Result<SyntaxTree, TreeError> {
    if let Some(err) = self.error {
      return Err(err);
    }
    if let Some(&open) = self.stack.last() {
      return Err(TreeError::Unclosed {
        kind: self.nodes[open.idx()].kind,
      });
    }
    Ok(SyntaxTree {
      text:  self.text,
      nodes: self.nodes,
      roots: self.roots,
    })
  }

  fn push(&mut self, kind: &'static str, start: Position, end: Position) -> Option<NodeId> {
    if self.error.is_some() {
      return None;
    }
    if end < start {
      self.fail(TreeError::InvertedRange { kind, start, end });
      return None;
    }
    if end.row >= self.text.len_lines() {
      self.fail(TreeError::OutOfBounds { kind, pos: end });
      return None;
    }
    let id = NodeId(self.nodes.len() as u32);
    let parent = self.stack.last().copied();
    self.nodes.push(NodeData {
      kind,
      start,
      end,
      parent,
      children: Vec::new(),
    });
    match parent {
      Some(parent) => self.nodes[parent.idx()].children.push(id),
      None => self.roots.push(id),
    }
    Some(id)
  }

  fn fail(&mut self, err: TreeError) {
    self.error.get_or_insert(err);
  }
}
