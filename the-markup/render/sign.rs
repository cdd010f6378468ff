use crate::{
  context::RenderContext,
  render::{
    collector::MarkCollector,
    mark::{
      Highlight,
      Mark,
    },
  },
  tree::NodeView,
};

/// Puts `text` in the sign column next to `node`, drawn in `highlight`'s
/// foreground over the sign background.
pub fn add(
  cx: &RenderContext<'_>,
  marks: &mut MarkCollector,
  node: NodeView<'_>,
  text: Option<&str>,
  highlight: &str,
) {
  let sign = &cx.config().sign;
  if !sign.enabled {
    return;
  }
  let Some(text) = text.filter(|text| !text.is_empty()) else {
    return;
  };
  marks.push(
    Mark::at((node.start_row(), node.start_col()))
      .sign(text, Highlight::combine(highlight, &sign.highlight)),
  );
}
