//! Per-pass render state shared by every renderer.

use std::{
  collections::{
    BTreeMap,
    HashMap,
  },
  ops::Range,
};

use crate::{
  config::Config,
  icons::{
    IconProvider,
    NoIcons,
  },
  tree::{
    NodeKey,
    NodeView,
    SyntaxTree,
  },
};

/// Facts decided by other rendering passes of the host.
///
/// `concealed` is how many display columns of a node the host already hides
/// (collapsed link targets, concealed emphasis markers, ...). `link_width` is
/// how many columns of virtual text the host inserts inside the node (link
/// icons and the like).
pub trait ConcealSource {
  fn concealed(&self, node: NodeView<'_>) -> usize;
  fn link_width(&self, node: NodeView<'_>) -> usize;
}

#[derive(Debug, Default)]
pub struct NoConceal;

impl ConcealSource for NoConceal {
  fn concealed(&self, _node: NodeView<'_>) -> usize {
    0
  }

  fn link_width(&self, _node: NodeView<'_>) -> usize {
    0
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ConcealedRange {
  cols:        Range<usize>,
  replacement: usize,
}

/// Conceal decisions recorded per row.
///
/// Only ranges that lie entirely on a node's first row, within its columns,
/// count towards that node.
#[derive(Debug, Default, Clone)]
pub struct ConcealMap {
  concealed: BTreeMap<usize, Vec<ConcealedRange>>,
  inserted:  BTreeMap<usize, Vec<(usize, usize)>>,
}

impl ConcealMap {
  pub fn new() -> Self {
    Self::default()
  }

  /// Hides byte columns `cols` of `row`, showing `replacement` columns of
  /// substitute text in their place.
  pub fn conceal(&mut self, row: usize, cols: Range<usize>, replacement: usize) -> &mut Self {
    self
      .concealed
      .entry(row)
      .or_default()
      .push(ConcealedRange { cols, replacement });
    self
  }

  /// Records `width` columns of virtual text inserted at `col` of `row`.
  pub fn insert(&mut self, row: usize, col: usize, width: usize) -> &mut Self {
    self.inserted.entry(row).or_default().push((col, width));
    self
  }

  fn node_cols(node: NodeView<'_>) -> Range<usize> {
    let end = if node.end_row() == node.start_row() {
      node.end_col()
    } else {
      usize::MAX
    };
    node.start_col()..end
  }
}

impl ConcealSource for ConcealMap {
  fn concealed(&self, node: NodeView<'_>) -> usize {
    let cols = Self::node_cols(node);
    let row = node.start_row();
    let Some(ranges) = self.concealed.get(&row) else {
      return 0;
    };
    ranges
      .iter()
      .filter(|range| range.cols.start >= cols.start && range.cols.end <= cols.end)
      .map(|range| {
        node
          .tree()
          .cols_width(row, range.cols.start, range.cols.end)
          .saturating_sub(range.replacement)
      })
      .sum()
  }

  fn link_width(&self, node: NodeView<'_>) -> usize {
    let cols = Self::node_cols(node);
    self
      .inserted
      .get(&node.start_row())
      .map(|inserts| {
        inserts
          .iter()
          .filter(|(col, _)| cols.contains(col))
          .map(|(_, width)| width)
          .sum()
      })
      .unwrap_or(0)
  }
}

/// What the host can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostCapabilities {
  /// Virtual text inserted between buffer characters.
  pub inline_virtual_text: bool,
}

impl Default for HostCapabilities {
  fn default() -> Self {
    Self {
      inline_virtual_text: true,
    }
  }
}

/// Everything the host supplies for one pass besides the tree and config.
#[derive(Clone, Copy)]
pub struct Host<'a> {
  pub viewport_width: usize,
  pub capabilities:   HostCapabilities,
  pub conceal:        &'a dyn ConcealSource,
  pub icons:          &'a dyn IconProvider,
}

impl Host<'static> {
  pub fn new(viewport_width: usize) -> Self {
    Self {
      viewport_width,
      capabilities: HostCapabilities::default(),
      conceal: &NoConceal,
      icons: &NoIcons,
    }
  }
}

impl<'a> Host<'a> {
  pub fn with_conceal<'b>(self, conceal: &'b dyn ConcealSource) -> Host<'b>
  where
    'a: 'b,
  {
    Host {
      viewport_width: self.viewport_width,
      capabilities: self.capabilities,
      conceal,
      icons: self.icons,
    }
  }

  pub fn with_icons<'b>(self, icons: &'b dyn IconProvider) -> Host<'b>
  where
    'a: 'b,
  {
    Host {
      viewport_width: self.viewport_width,
      capabilities: self.capabilities,
      conceal: self.conceal,
      icons,
    }
  }

  pub fn with_capabilities(mut self, capabilities: HostCapabilities) -> Self {
    self.capabilities = capabilities;
    self
  }
}

/// Created at the start of a pass and dropped at its end.
pub struct RenderContext<'a> {
  tree:       &'a SyntaxTree,
  config:     &'a Config,
  host:       Host<'a>,
  concealed:  HashMap<NodeKey, usize>,
  link_width: HashMap<NodeKey, usize>,
}

impl<'a> RenderContext<'a> {
  pub fn new(tree: &'a SyntaxTree, config: &'a Config, host: Host<'a>) -> Self {
    Self {
      tree,
      config,
      host,
      concealed: HashMap::new(),
      link_width: HashMap::new(),
    }
  }

  pub fn tree(&self) -> &'a SyntaxTree {
    self.tree
  }

  pub fn config(&self) -> &'a Config {
    self.config
  }

  pub fn icons(&self) -> &'a dyn IconProvider {
    self.host.icons
  }

  pub fn capabilities(&self) -> HostCapabilities {
    self.host.capabilities
  }

  pub fn viewport_width(&self) -> usize {
    self.host.viewport_width
  }

  /// Width decorations stretch to: the viewport, capped by `max-width`.
  pub fn width(&self) -> usize {
    match self.config.max_width {
      Some(max) => self.host.viewport_width.min(max),
      None => self.host.viewport_width,
    }
  }

  pub fn concealed(&mut self, node: NodeView<'_>) -> usize {
    let source = self.host.conceal;
    *self
      .concealed
      .entry(node.key())
      .or_insert_with(|| source.concealed(node))
  }

  pub fn link_width(&mut self, node: NodeView<'_>) -> usize {
    let source = self.host.conceal;
    *self
      .link_width
      .entry(node.key())
      .or_insert_with(|| source.link_width(node))
  }

  /// Missing nodes count as hidden, as do nodes whose every column is
  /// concealed.
  pub fn hidden(&mut self, node: Option<NodeView<'_>>) -> bool {
    match node {
      None => true,
      Some(node) => self.concealed(node) == node.width(),
    }
  }
}

#[cfg(test)]
mod tests {
  use std::cell::Cell;

  use super::*;
  use crate::tree::TreeBuilder;

  fn link_tree() -> SyntaxTree {
    let mut builder = TreeBuilder::new("| [a](http://x) | b |\n");
    builder
      .open("pipe_table_row", (0, 0), (0, 21))
      .leaf("|", (0, 0), (0, 1))
      .leaf("pipe_table_cell", (0, 2), (0, 15))
      .leaf("|", (0, 16), (0, 17))
      .leaf("pipe_table_cell", (0, 18), (0, 19))
      .leaf("|", (0, 20), (0, 21))
      .close();
    builder.build().unwrap()
  }

  fn cell(tree: &SyntaxTree, col: usize) -> NodeView<'_> {
    tree
      .preorder()
      .find(|node| node.kind() == "pipe_table_cell" && node.start_col() == col)
      .unwrap()
  }

  #[test]
  fn conceal_map_sums_ranges_inside_node() {
    let tree = link_tree();
    let mut map = ConcealMap::new();
    // `[` and `](http://x)` hidden, a link icon inserted before the text.
    map
      .conceal(0, 2..3, 0)
      .conceal(0, 4..15, 0)
      .insert(0, 2, 2)
      .conceal(0, 18..19, 1);
    let link = cell(&tree, 2);
    assert_eq!(map.concealed(link), 12);
    assert_eq!(map.link_width(link), 2);
    assert_eq!(map.concealed(cell(&tree, 18)), 0);
    assert_eq!(map.link_width(cell(&tree, 18)), 0);
  }

  struct Counting {
    calls: Cell<usize>,
  }

  impl ConcealSource for Counting {
    fn concealed(&self, _node: NodeView<'_>) -> usize {
      self.calls.set(self.calls.get() + 1);
      3
    }

    fn link_width(&self, _node: NodeView<'_>) -> usize {
      1
    }
  }

  #[test]
  fn context_memoizes_per_node() {
    let tree = link_tree();
    let config = Config::default();
    let source = Counting {
      calls: Cell::new(0),
    };
    let host = Host::new(80).with_conceal(&source);
    let mut cx = RenderContext::new(&tree, &config, host);
    let link = cell(&tree, 2);
    assert_eq!(cx.concealed(link), 3);
    assert_eq!(cx.concealed(link), 3);
    assert_eq!(cx.link_width(link), 1);
    assert_eq!(source.calls.get(), 1);
    assert_eq!(cx.concealed(cell(&tree, 18)), 3);
    assert_eq!(source.calls.get(), 2);
  }

  #[test]
  fn hidden_nodes() {
    let tree = link_tree();
    let config = Config::default();
    let mut map = ConcealMap::new();
    map.conceal(0, 18..19, 0);
    let host = Host::new(80).with_conceal(&map);
    let mut cx = RenderContext::new(&tree, &config, host);
    assert!(cx.hidden(None));
    assert!(cx.hidden(Some(cell(&tree, 18))));
    assert!(!cx.hidden(Some(cell(&tree, 2))));
  }

  #[test]
  fn width_respects_max_width() {
    let tree = link_tree();
    let mut config = Config::default();
    assert_eq!(RenderContext::new(&tree, &config, Host::new(120)).width(), 120);
    config.max_width = Some(80);
    let cx = RenderContext::new(&tree, &config, Host::new(120));
    assert_eq!(cx.width(), 80);
    assert_eq!(cx.viewport_width(), 120);
    assert_eq!(RenderContext::new(&tree, &config, Host::new(40)).width(), 40);
  }
}
