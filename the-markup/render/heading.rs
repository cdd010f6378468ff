//! ATX heading decorations: marker icon, background, block width, borders,
//! padding and sign.

use smallvec::smallvec;
use the_core::{
  chars::line_is_blank,
  grapheme::{
    spaces,
    str_width,
  },
};
use tracing::debug;

use crate::{
  config::{
    HeadingConfig,
    HeadingPosition,
    WidthMode,
    clamp,
    cycle,
  },
  context::RenderContext,
  render::{
    PassState,
    collector::MarkCollector,
    mark::{
      Anchor,
      Highlight,
      Highlights,
      Mark,
      Priority,
      Segment,
      SegmentLine,
    },
    sign,
  },
  tree::{
    Adjacent,
    NodeView,
  },
};

/// Level of an `atx_hN_marker` node.
pub fn level(kind: &str) -> Option<usize> {
  kind
    .strip_prefix("atx_h")?
    .strip_suffix("_marker")?
    .parse()
    .ok()
    .filter(|level| (1..=6).contains(level))
}

/// Columns the marker run and the space after it leave for an icon.
pub fn available_width(cx: &mut RenderContext<'_>, marker: NodeView<'_>, level: usize) -> usize {
  (level + 1).saturating_sub(cx.concealed(marker))
}

struct Style<'c> {
  level:      usize,
  icon:       Option<&'c str>,
  sign:       Option<&'c str>,
  foreground: &'c str,
  background: &'c str,
}

impl<'c> Style<'c> {
  fn new(config: &'c HeadingConfig, level: usize) -> Self {
    Self {
      level,
      icon: cycle(&config.icons, level).map(String::as_str),
      sign: cycle(&config.signs, level).map(String::as_str),
      foreground: clamp(&config.foregrounds, level).map_or("Normal", String::as_str),
      background: clamp(&config.backgrounds, level).map_or("Normal", String::as_str),
    }
  }

  fn highlights(&self) -> Highlights {
    smallvec![
      Highlight::group(self.foreground),
      Highlight::group(self.background)
    ]
  }
}

pub fn render<'a>(
  cx: &mut RenderContext<'a>,
  marks: &mut MarkCollector,
  state: &mut PassState,
  marker: NodeView<'a>,
) {
  let config = &cx.config().heading;
  if !config.enabled {
    return;
  }
  let Some(level) = level(marker.kind()) else {
    debug!(kind = marker.kind(), "not a heading marker");
    return;
  };
  let Some(node) = marker.parent().filter(|parent| parent.kind() == "atx_heading") else {
    debug!(row = marker.start_row(), "heading marker outside of a heading");
    return;
  };
  let style = Style::new(config, level);

  let icon_width = icon(cx, marks, marker, &style);
  if config.sign {
    sign::add(cx, marks, marker, style.sign, style.foreground);
  }

  let width = match config.width {
    WidthMode::Full => cx.width(),
    WidthMode::Block => {
      let text = marker.sibling("inline").map_or(0, |inline| {
        (inline.width() + cx.link_width(inline)).saturating_sub(cx.concealed(inline))
      });
      (config.left_pad + icon_width + config.right_pad + text).max(config.min_width)
    },
  };

  marks.push(
    Mark::over(node)
      .highlight(Highlight::group(style.background))
      .to_eol(),
  );
  if config.width == WidthMode::Block {
    let fill = cx.viewport_width().saturating_sub(width);
    if fill > 0 {
      marks.push(
        Mark::at((node.start_row(), 0))
          .text(Segment::new(spaces(fill), Highlight::normal()))
          .anchor(Anchor::WinCol(width))
          .priority(Priority::Fill),
      );
    }
  }

  if config.left_pad > 0 {
    marks.push(
      Mark::at(node.start())
        .text(Segment::new(
          spaces(config.left_pad),
          Highlight::group(style.background),
        ))
        .anchor(Anchor::Inline)
        .priority(Priority::Fill),
    );
  }

  if config.border {
    border(marks, state, config, node, &style, width);
  }
}

/// Replaces the marker run with the level's icon and returns the columns the
/// icon ends up occupying.
fn icon(
  cx: &mut RenderContext<'_>,
  marks: &mut MarkCollector,
  marker: NodeView<'_>,
  style: &Style<'_>,
) -> usize {
  let available = available_width(cx, marker, style.level);
  let Some(icon) = style.icon else {
    return available;
  };
  let icon_width = str_width(icon);
  let inline = cx.config().heading.position == HeadingPosition::Inline;
  if inline || icon_width > available {
    marks.push(
      Mark::over(marker)
        .text(Segment::stacked(icon, style.highlights()))
        .anchor(Anchor::Inline)
        .hide_text(),
    );
    icon_width
  } else {
    let padded = format!("{}{icon}", spaces(available - icon_width));
    marks.push(Mark::over(marker).text(Segment::stacked(padded, style.highlights())));
    available
  }
}

fn border_line(
  glyph: &str,
  config: &HeadingConfig,
  style: &Style<'_>,
  width: usize,
) -> SegmentLine {
  let prefix = if config.border_prefix { style.level } else { 0 };
  let left = config.left_pad;
  vec![
    Segment::new(glyph.repeat(left), Highlight::inverse(style.background)),
    Segment::new(glyph.repeat(prefix), Highlight::group(style.foreground)),
    Segment::new(
      glyph.repeat(width.saturating_sub(left + prefix)),
      Highlight::inverse(style.background),
    ),
  ]
}

fn border(
  marks: &mut MarkCollector,
  state: &mut PassState,
  config: &HeadingConfig,
  node: NodeView<'_>,
  style: &Style<'_>,
  width: usize,
) {
  let blank = |adjacent: Adjacent| node.line(adjacent).is_some_and(|line| line_is_blank(&line));

  let above = border_line(&config.above, config, style, width);
  let above_row = node
    .start_row()
    .checked_sub(1)
    .filter(|&row| blank(Adjacent::Above) && state.last_heading_border != Some(row));
  match above_row {
    Some(row) => marks.push(Mark::at((row, 0)).segments(above)),
    None => marks.push(Mark::at((node.start_row(), 0)).lines(vec![above], true)),
  };

  let below = border_line(&config.below, config, style, width);
  if blank(Adjacent::Below) {
    let row = node.last_row() + 1;
    marks.push(Mark::at((row, 0)).segments(below));
    state.last_heading_border = Some(row);
  } else {
    marks.push(Mark::at((node.last_row(), 0)).lines(vec![below], false));
  }
}
