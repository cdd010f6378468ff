//! Decoration records handed to the host.
//!
//! A [`Mark`] is one instruction: highlight a range, draw virtual text at a
//! position, insert virtual lines, or put a glyph in the sign column. Marks
//! are built by exactly one renderer call and never change after they are
//! collected.

use smallvec::{
  SmallVec,
  smallvec,
};
use the_core::grapheme::str_width;

use crate::{
  Tendril,
  position::Position,
  tree::NodeView,
};

/// A highlight group reference. Combined and inverted groups are derived by
/// the host from the named ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Highlight {
  Group(Tendril),
  /// Foreground of `fg` drawn over the background of `bg`.
  Combined { fg: Tendril, bg: Tendril },
  /// The group's background used as a foreground.
  Inverse(Tendril),
}

impl Highlight {
  pub fn group(name: &str) -> Self {
    Self::Group(name.into())
  }

  pub fn combine(fg: &str, bg: &str) -> Self {
    Self::Combined {
      fg: fg.into(),
      bg: bg.into(),
    }
  }

  pub fn inverse(name: &str) -> Self {
    Self::Inverse(name.into())
  }

  pub fn normal() -> Self {
    Self::group("Normal")
  }
}

/// Highlights applied to one segment, later ones on top.
pub type Highlights = SmallVec<[Highlight; 2]>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
  pub text:       Tendril,
  pub highlights: Highlights,
}

impl Segment {
  pub fn new(text: impl Into<Tendril>, highlight: Highlight) -> Self {
    Self {
      text:       text.into(),
      highlights: smallvec![highlight],
    }
  }

  pub fn stacked(text: impl Into<Tendril>, highlights: Highlights) -> Self {
    Self {
      text: text.into(),
      highlights,
    }
  }

  pub fn width(&self) -> usize {
    str_width(&self.text)
  }
}

/// A row of virtual text.
pub type SegmentLine = Vec<Segment>;

/// Where virtual text goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
  /// Drawn over the buffer text starting at the mark.
  #[default]
  Overlay,
  /// Inserted at the mark, shifting the text after it.
  Inline,
  /// Pinned at a window column regardless of the line's text.
  WinCol(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtLines {
  pub lines: Vec<SegmentLine>,
  pub above: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sign {
  pub text:      Tendril,
  pub highlight: Highlight,
}

/// Stacking order between marks at the same place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Priority {
  /// Padding and fill that anything else may cover.
  Fill,
  #[default]
  Normal,
  /// Replacements that must win over neighbouring overlays.
  Emphasis,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mark {
  /// Replaces the visual content of exactly one node's span.
  pub conceal:          bool,
  pub start:            Position,
  pub end:              Option<Position>,
  pub highlight:        Option<Highlight>,
  /// Extend `highlight` to the window edge on every covered line.
  pub hl_eol:           bool,
  pub virt_text:        SegmentLine,
  pub anchor:           Anchor,
  pub virt_lines:       Option<VirtLines>,
  pub sign:             Option<Sign>,
  /// Hide the span's own text.
  pub hide_text:        bool,
  /// Redraw the virtual text on every wrapped screen line.
  pub repeat_linebreak: bool,
  pub priority:         Priority,
}

impl Mark {
  /// An additive mark at `start`. It depends on hiding nothing.
  pub fn at(start: impl Into<Position>) -> Self {
    Self {
      conceal:          false,
      start:            start.into(),
      end:              None,
      highlight:        None,
      hl_eol:           false,
      virt_text:        Vec::new(),
      anchor:           Anchor::Overlay,
      virt_lines:       None,
      sign:             None,
      hide_text:        false,
      repeat_linebreak: false,
      priority:         Priority::Normal,
    }
  }

  /// A replacement covering exactly `node`'s span.
  pub fn over(node: NodeView<'_>) -> Self {
    Self {
      conceal: true,
      end: Some(node.end()),
      ..Self::at(node.start())
    }
  }

  pub fn until(mut self, end: impl Into<Position>) -> Self {
    self.end = Some(end.into());
    self
  }

  /// Moves the start of a replacement `cols` bytes into its node, for
  /// markers whose reported span includes leading indentation.
  pub fn trim_start(mut self, cols: usize) -> Self {
    self.start.col += cols;
    self
  }

  pub fn highlight(mut self, highlight: Highlight) -> Self {
    self.highlight = Some(highlight);
    self
  }

  pub fn to_eol(mut self) -> Self {
    self.hl_eol = true;
    self
  }

  pub fn text(mut self, segment: Segment) -> Self {
    self.virt_text.push(segment);
    self
  }

  pub fn segments(mut self, segments: impl IntoIterator<Item = Segment>) -> Self {
    self.virt_text.extend(segments);
    self
  }

  pub fn anchor(mut self, anchor: Anchor) -> Self {
    self.anchor = anchor;
    self
  }

  pub fn lines(mut self, lines: Vec<SegmentLine>, above: bool) -> Self {
    self.virt_lines = Some(VirtLines { lines, above });
    self
  }

  pub fn sign(mut self, text: impl Into<Tendril>, highlight: Highlight) -> Self {
    self.sign = Some(Sign {
      text: text.into(),
      highlight,
    });
    self
  }

  pub fn hide_text(mut self) -> Self {
    self.hide_text = true;
    self
  }

  pub fn repeat_linebreak(mut self, repeat: bool) -> Self {
    self.repeat_linebreak = repeat;
    self
  }

  pub fn priority(mut self, priority: Priority) -> Self {
    self.priority = priority;
    self
  }

  /// Concatenated virtual text, handy for inspection.
  pub fn virt_text_str(&self) -> String {
    self.virt_text.iter().map(|segment| segment.text.as_str()).collect()
  }

  /// Display width of the virtual text.
  pub fn virt_text_width(&self) -> usize {
    self.virt_text.iter().map(Segment::width).sum()
  }
}
