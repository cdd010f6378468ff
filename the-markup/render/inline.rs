//! Inline spans: code spans, callout titles and bracketed checkboxes.

use the_core::grapheme::pad_to;
use tracing::debug;

use crate::{
  component::{
    self,
    MatchMode,
  },
  context::RenderContext,
  render::{
    collector::MarkCollector,
    mark::{
      Anchor,
      Highlight,
      Mark,
      Priority,
      Segment,
    },
  },
  tree::NodeView,
};

pub fn code(cx: &mut RenderContext<'_>, marks: &mut MarkCollector, node: NodeView<'_>) {
  let config = &cx.config().code;
  if !config.enabled || !config.style.has_background() {
    return;
  }
  marks.push(
    Mark::at(node.start())
      .until(node.end())
      .highlight(Highlight::group(&config.highlight_inline)),
  );
}

/// `[text]` links that spell a callout or a custom checkbox.
pub fn shortcut(cx: &mut RenderContext<'_>, marks: &mut MarkCollector, node: NodeView<'_>) {
  let config = cx.config();
  let text = node.text();

  if let Some(callout) = component::callout(config, &text, MatchMode::Exact) {
    marks.push(
      Mark::over(node)
        .text(Segment::new(
          pad_to(&callout.rendered, node.width()),
          Highlight::group(&callout.highlight),
        ))
        .priority(Priority::Emphasis),
    );
    return;
  }

  if !config.checkbox.enabled {
    return;
  }
  let Some(checkbox) = component::checkbox(config, &text, MatchMode::Exact) else {
    return;
  };
  if !cx.capabilities().inline_virtual_text {
    debug!(row = node.start_row(), "custom checkbox needs inline virtual text");
    return;
  }
  marks.push(
    Mark::over(node)
      .text(Segment::new(
        pad_to(&checkbox.rendered, node.width()),
        Highlight::group(&checkbox.highlight),
      ))
      .anchor(Anchor::Inline)
      .hide_text()
      .priority(Priority::Emphasis),
  );
}
