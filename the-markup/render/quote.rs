//! Block quote markers, recolored when the quote is a callout.

use crate::{
  component::{
    self,
    MatchMode,
  },
  context::RenderContext,
  render::{
    collector::MarkCollector,
    mark::{
      Highlight,
      Mark,
      Segment,
    },
  },
  tree::NodeView,
};

/// Icon highlight for the quote enclosing `node`.
fn highlight<'c>(cx: &RenderContext<'c>, node: NodeView<'_>) -> &'c str {
  let config = cx.config();
  node
    .ancestors()
    .find(|ancestor| ancestor.kind() == "block_quote")
    .and_then(|quote| component::callout(config, &quote.text(), MatchMode::Contains))
    .map_or(config.quote.highlight.as_str(), |callout| {
      callout.highlight.as_str()
    })
}

/// Draws the quote icon over every `>` of a marker or continuation token.
pub fn marker(cx: &mut RenderContext<'_>, marks: &mut MarkCollector, node: NodeView<'_>) {
  let config = &cx.config().quote;
  if !config.enabled {
    return;
  }
  let highlight = highlight(cx, node);
  let text = node.text();
  let row = node.start_row();
  for (offset, _) in text.match_indices('>') {
    marks.push(
      Mark::at((row, node.start_col() + offset))
        .text(Segment::new(config.icon.as_str(), Highlight::group(highlight)))
        .repeat_linebreak(config.repeat_linebreak),
    );
  }
}
