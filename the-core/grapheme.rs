//! Display-width helpers for terminal cells.
//!
//! Every width here is measured in screen columns, not bytes or chars: wide
//! CJK glyphs and most emoji occupy two columns, combining marks occupy none
//! of their own, and tabs expand to the next tab stop.

use ropey::RopeSlice;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::chars::char_is_line_ending;

/// Tab stop used when a tab is measured without an explicit setting.
pub const DEFAULT_TAB_WIDTH: u16 = 4;

#[inline]
pub fn tab_width_at(visual_x: usize, tab_width: u16) -> usize {
  tab_width as usize - (visual_x % tab_width as usize)
}

#[must_use]
pub fn grapheme_width(g: &str) -> usize {
  if g.is_ascii() {
    // Fast-path for pure ASCII: each byte renders with width 1.
    g.len()
  } else {
    // Ensure a minimum width of 1 for ill-formed clusters so
    // they remain visible.
    UnicodeWidthStr::width(g).max(1)
  }
}

/// Display width of `text` starting at visual column `visual_x`.
///
/// Measurement stops at the first line ending.
#[must_use]
pub fn str_width_at(text: &str, visual_x: usize, tab_width: u16) -> usize {
  let mut x = visual_x;
  for g in text.graphemes(true) {
    if g.chars().next().is_some_and(char_is_line_ending) {
      break;
    }
    x += match g {
      "\t" => tab_width_at(x, tab_width),
      g => grapheme_width(g),
    };
  }
  x - visual_x
}

/// Display width of the first line of `text`.
#[must_use]
#[inline]
pub fn str_width(text: &str) -> usize {
  str_width_at(text, 0, DEFAULT_TAB_WIDTH)
}

/// Display width of a single rope line, excluding its line ending.
#[must_use]
pub fn line_width(line: RopeSlice) -> usize {
  let mut x = 0;
  for chunk in line.chunks() {
    let width = str_width_at(chunk, x, DEFAULT_TAB_WIDTH);
    x += width;
    if chunk.chars().any(char_is_line_ending) {
      break;
    }
  }
  x
}

/// Number of leading ASCII spaces.
#[must_use]
pub fn leading_spaces(text: &str) -> usize {
  text.bytes().take_while(|&b| b == b' ').count()
}

/// A run of `n` spaces.
#[must_use]
pub fn spaces(n: usize) -> String {
  " ".repeat(n)
}

/// Appends spaces to `text` until it is at least `width` columns wide.
#[must_use]
pub fn pad_to(text: &str, width: usize) -> String {
  let mut padded = String::with_capacity(text.len() + width);
  padded.push_str(text);
  padded.push_str(&spaces(width.saturating_sub(str_width(text))));
  padded
}

#[cfg(test)]
mod tests {
  use ropey::Rope;

  use super::*;

  #[test]
  fn test_tab_width_at() {
    assert_eq!(tab_width_at(0, 4), 4);
    assert_eq!(tab_width_at(1, 4), 3);
    assert_eq!(tab_width_at(4, 4), 4);
  }

  #[test]
  fn test_grapheme_width_function() {
    assert_eq!(grapheme_width("a"), 1);
    assert_eq!(grapheme_width("中"), 2);
    assert_eq!(grapheme_width("e\u{301}"), 1);
    assert_eq!(grapheme_width("\u{301}"), 1);
  }

  #[test]
  fn test_str_width_wide_and_combining() {
    assert_eq!(str_width("abc"), 3);
    assert_eq!(str_width("中文"), 4);
    assert_eq!(str_width("☐"), 1);
    assert_eq!(str_width("cafe\u{301}"), 4);
  }

  #[test]
  fn test_str_width_stops_at_line_end() {
    assert_eq!(str_width("ab\ncd"), 2);
    assert_eq!(str_width("ab\r\n"), 2);
  }

  #[test]
  fn test_str_width_tabs() {
    assert_eq!(str_width("\tx"), 5);
    assert_eq!(str_width_at("\t", 2, 4), 2);
  }

  #[test]
  fn test_line_width() {
    let text = Rope::from("# 标题\nplain\n");
    assert_eq!(line_width(text.line(0)), 6);
    assert_eq!(line_width(text.line(1)), 5);
    assert_eq!(line_width(text.line(2)), 0);
  }

  #[test]
  fn test_padding_helpers() {
    assert_eq!(leading_spaces("  - "), 2);
    assert_eq!(leading_spaces("-"), 0);
    assert_eq!(spaces(3), "   ");
    assert_eq!(pad_to("☐", 3), "☐  ");
    assert_eq!(pad_to("wide", 2), "wide");
  }
}
