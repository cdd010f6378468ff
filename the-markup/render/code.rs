//! Fenced code block decorations: language label, thin borders, background,
//! block fill and left padding.

use smallvec::smallvec;
use the_core::grapheme::{
  spaces,
  str_width,
};
use tracing::debug;

use crate::{
  config::{
    CodeBorder,
    CodeConfig,
    CodePosition,
    CodeStyle,
    WidthMode,
  },
  context::RenderContext,
  geometry::{
    ParsedCodeBlock,
    code_block,
  },
  render::{
    collector::MarkCollector,
    mark::{
      Anchor,
      Highlight,
      Mark,
      Priority,
      Segment,
    },
    sign,
  },
  tree::NodeView,
};

pub fn render<'a>(cx: &mut RenderContext<'a>, marks: &mut MarkCollector, node: NodeView<'a>) {
  let config = &cx.config().code;
  if !config.enabled || config.style == CodeStyle::None {
    return;
  }
  let block = match code_block::parse(cx, node) {
    Ok(block) => block,
    Err(err) => {
      debug!(%err, "skipping code block");
      return;
    },
  };

  let icon_added = config.style.has_language() && language(cx, marks, config, &block);
  let background = config.style.has_background() && !background_disabled(config, &block);
  if background {
    self::background(cx, marks, config, &block, icon_added);
  }
  left_pad(marks, config, &block, background);
}

fn background_disabled(config: &CodeConfig, block: &ParsedCodeBlock<'_>) -> bool {
  block.language.is_some_and(|language| {
    let language = language.text();
    config
      .disable_background
      .iter()
      .any(|disabled| *disabled == language)
  })
}

/// Adds the language icon and name, returning whether an icon was placed.
fn language(
  cx: &mut RenderContext<'_>,
  marks: &mut MarkCollector,
  config: &CodeConfig,
  block: &ParsedCodeBlock<'_>,
) -> bool {
  let Some(language) = block.language else {
    return false;
  };
  let name = language.text();
  let Some(icon) = cx.icons().icon(&name) else {
    debug!(language = %name, "no icon for code block language");
    return false;
  };
  if config.sign {
    sign::add(cx, marks, language, Some(icon.glyph.as_str()), &icon.highlight);
  }
  let highlights = smallvec![
    Highlight::group(&icon.highlight),
    Highlight::group(&config.highlight)
  ];

  match config.position {
    CodePosition::Left => {
      let mut text = format!("{} ", icon.glyph);
      if block.code_info_hidden {
        // Indentation folded into the fence is exposed once the info string
        // is hidden.
        text = format!(
          "{}{text}{name}",
          spaces(block.leading_spaces)
        );
      }
      marks.push(
        Mark::over(language)
          .text(Segment::stacked(text, highlights))
          .anchor(Anchor::Inline),
      )
    },
    CodePosition::Right => {
      let text = format!("{} {name}", icon.glyph);
      let mut win_col = block.longest_line;
      if config.width == WidthMode::Block {
        win_col = win_col.saturating_sub(str_width(&text));
      }
      marks.push(
        Mark::at((language.start_row(), 0))
          .text(Segment::stacked(text, highlights))
          .anchor(Anchor::WinCol(win_col)),
      )
    },
  }
}

fn border_width(cx: &RenderContext<'_>, config: &CodeConfig, block: &ParsedCodeBlock<'_>) -> usize {
  match config.width {
    WidthMode::Block => block.width.saturating_sub(block.col),
    WidthMode::Full => cx.width().saturating_sub(block.col),
  }
}

fn background(
  cx: &mut RenderContext<'_>,
  marks: &mut MarkCollector,
  config: &CodeConfig,
  block: &ParsedCodeBlock<'_>,
  icon_added: bool,
) {
  let (mut start_row, mut end_row) = (block.start_row, block.end_row);
  if config.border == CodeBorder::Thin {
    let width = border_width(cx, config, block);
    let border = |row: usize, glyph: &str| {
      Mark::at((row, block.col)).text(Segment::new(
        glyph.repeat(width),
        Highlight::inverse(&config.highlight),
      ))
    };
    if !icon_added && block.code_info_hidden && block.start_delim_hidden {
      marks.push(border(start_row, &config.above));
      start_row += 1;
    }
    if block.end_delim_hidden {
      marks.push(border(end_row - 1, &config.below));
      end_row -= 1;
    }
  }
  if start_row >= end_row {
    return;
  }

  marks.push(
    Mark::at((start_row, block.col))
      .until((end_row, 0))
      .highlight(Highlight::group(&config.highlight))
      .to_eol(),
  );

  if config.width == WidthMode::Block {
    let win_col = block.width;
    let fill = cx.viewport_width().saturating_sub(win_col);
    if fill == 0 {
      return;
    }
    for row in start_row..end_row {
      marks.push(
        Mark::at((row, block.col))
          .text(Segment::new(spaces(fill), Highlight::normal()))
          .anchor(Anchor::WinCol(win_col))
          .priority(Priority::Fill),
      );
    }
  }
}

fn left_pad(
  marks: &mut MarkCollector,
  config: &CodeConfig,
  block: &ParsedCodeBlock<'_>,
  background: bool,
) {
  if config.left_pad == 0 {
    return;
  }
  let highlight = if background {
    Highlight::group(&config.highlight)
  } else {
    Highlight::normal()
  };
  for row in block.rows() {
    marks.push(
      Mark::at((row, block.col))
        .text(Segment::new(spaces(config.left_pad), highlight.clone()))
        .anchor(Anchor::Inline)
        .priority(Priority::Fill),
    );
  }
}
