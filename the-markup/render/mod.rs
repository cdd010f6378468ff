//! Renderers turning captured nodes into [`Mark`]s.
//!
//! One pass owns a fresh [`RenderContext`], a fresh [`PassState`] and a
//! [`MarkCollector`]; nothing survives between passes, so rendering an
//! unchanged tree twice yields the same marks.

pub mod code;
pub mod collector;
pub mod dash;
pub mod dispatch;
pub mod heading;
pub mod inline;
pub mod list;
pub mod mark;
pub mod quote;
pub mod sign;
pub mod table;

pub use collector::MarkCollector;
pub use dispatch::Dispatcher;
pub use mark::{
  Anchor,
  Highlight,
  Mark,
  Priority,
  Segment,
};
use tracing::debug;

use crate::{
  config::Config,
  context::{
    Host,
    RenderContext,
  },
  query,
  tree::SyntaxTree,
};

/// Mutable facts shared between renderer calls of one pass.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PassState {
  /// Blank row last used as a heading's bottom border.
  pub last_heading_border: Option<usize>,
}

/// Runs a complete pass over `tree`: block captures first, then inline ones.
pub fn render(tree: &SyntaxTree, config: &Config, host: &Host<'_>) -> Vec<Mark> {
  if !config.enabled {
    debug!("markup decorations disabled");
    return Vec::new();
  }
  let mut dispatcher = Dispatcher::new(RenderContext::new(tree, config, *host));
  dispatcher.run(query::block_captures(tree));
  dispatcher.run(query::inline_captures(tree));
  dispatcher.finish()
}
