use the_core::grapheme::str_width;
use tracing::debug;

use crate::{
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

/// Draws a thematic break as a line of dash icons across the row.
pub fn render(cx: &mut RenderContext<'_>, marks: &mut MarkCollector, node: NodeView<'_>) {
  let dash = &cx.config().dash;
  if !dash.enabled {
    return;
  }
  let icon_width = str_width(&dash.icon);
  if icon_width == 0 {
    debug!(row = node.start_row(), "dash icon has no width");
    return;
  }
  let count = dash.width.unwrap_or_else(|| cx.width() / icon_width);
  marks.push(Mark::at((node.start_row(), 0)).text(Segment::new(
    dash.icon.repeat(count),
    Highlight::group(&dash.highlight),
  )));
}
