use std::{
  collections::BTreeMap,
  ops::Bound,
};

use tracing::debug;

use crate::{
  context::HostCapabilities,
  position::Position,
  render::mark::{
    Anchor,
    Mark,
  },
};

/// Append-only list of the marks produced by one pass.
#[derive(Debug)]
pub struct MarkCollector {
  marks:               Vec<Mark>,
  /// Ends of accepted replacements, keyed by start.
  concealed:           BTreeMap<Position, Vec<Position>>,
  /// Most rows any accepted replacement spans.
  concealed_rows:      usize,
  inline_virtual_text: bool,
}

impl Default for MarkCollector {
  fn default() -> Self {
    Self::new(HostCapabilities::default())
  }
}

impl MarkCollector {
  pub fn new(capabilities: HostCapabilities) -> Self {
    Self {
      marks:               Vec::new(),
      concealed:           BTreeMap::new(),
      concealed_rows:      0,
      inline_virtual_text: capabilities.inline_virtual_text,
    }
  }

  /// Adds `mark` unless it is unusable, returning whether it was kept.
  ///
  /// Rejected: spans that end before they start, replacements without an
  /// end, replacements that cross an earlier replacement (overlap without
  /// one containing the other) and inline text the host cannot show.
  pub fn push(&mut self, mark: Mark) -> bool {
    if let Some(end) = mark.end
      && end < mark.start
    {
      debug!(start = ?mark.start, end = ?end, "dropping mark with inverted span");
      return false;
    }
    if mark.anchor == Anchor::Inline && !self.inline_virtual_text {
      debug!(start = ?mark.start, "host cannot display inline virtual text");
      return false;
    }
    if mark.conceal {
      let Some(end) = mark.end else {
        debug!(start = ?mark.start, "dropping replacement without an end");
        return false;
      };
      if let Some(other_start) = self.crossing(mark.start, end) {
        debug!(
          start = ?mark.start,
          end = ?end,
          other_start = ?other_start,
          "dropping replacement crossing another"
        );
        return false;
      }
      self.concealed.entry(mark.start).or_default().push(end);
      self.concealed_rows = self.concealed_rows.max(end.row - mark.start.row);
    }
    self.marks.push(mark);
    true
  }

  /// Start of an accepted replacement that overlaps `start..end` without
  /// either one containing the other.
  fn crossing(&self, start: Position, end: Position) -> Option<Position> {
    if start >= end {
      return None;
    }
    let starts_inside = self
      .concealed
      .range((Bound::Excluded(start), Bound::Excluded(end)))
      .find(|(_, ends)| ends.iter().any(|&other_end| end < other_end));
    if let Some((&other_start, _)) = starts_inside {
      return Some(other_start);
    }
    let first = Position::line_start(start.row.saturating_sub(self.concealed_rows));
    self
      .concealed
      .range(first..start)
      .find(|(_, ends)| {
        ends
          .iter()
          .any(|&other_end| start < other_end && other_end < end)
      })
      .map(|(&other_start, _)| other_start)
  }

  pub fn len(&self) -> usize {
    self.marks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.marks.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Mark> {
    self.marks.iter()
  }

  /// Marks ordered by start position; marks starting at the same place keep
  /// the order they were added in.
  pub fn finish(mut self) -> Vec<Mark> {
    self.marks.sort_by_key(|mark| mark.start);
    self.marks
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::render::mark::{
    Highlight,
    Segment,
  };

  fn replacement(start: (usize, usize), end: (usize, usize)) -> Mark {
    let mut mark = Mark::at(start).until(end);
    mark.conceal = true;
    mark
  }

  #[test]
  fn rejects_inverted_spans() {
    let mut marks = MarkCollector::default();
    assert!(!marks.push(Mark::at((2, 4)).until((2, 1))));
    assert!(marks.is_empty());
  }

  #[test]
  fn replacements_need_an_end() {
    let mut marks = MarkCollector::new(HostCapabilities::default());
    let mut mark = Mark::at((0, 0));
    mark.conceal = true;
    assert!(!marks.push(mark));
  }

  #[test]
  fn nested_replacements_are_fine_crossing_ones_are_not() {
    let mut marks = MarkCollector::new(HostCapabilities::default());
    assert!(marks.push(replacement((0, 0), (1, 0))));
    assert!(marks.push(replacement((0, 0), (0, 2))));
    assert!(marks.push(replacement((0, 0), (0, 2))));
    assert!(marks.push(replacement((0, 2), (0, 6))));
    assert!(!marks.push(replacement((0, 4), (1, 3))));
    assert!(marks.push(replacement((1, 0), (1, 3))));
    // Additive marks may overlap anything.
    assert!(marks.push(Mark::at((0, 4)).until((1, 3))));
    assert_eq!(marks.len(), 6);
  }

  #[test]
  fn crossing_replacements_spanning_many_rows() {
    let mut marks = MarkCollector::default();
    assert!(marks.push(replacement((0, 5), (6, 0))));
    assert!(!marks.push(replacement((5, 0), (7, 0))));
    assert!(!marks.push(replacement((0, 0), (3, 0))));
    assert!(marks.push(replacement((2, 0), (4, 0))));
    assert!(marks.push(replacement((8, 0), (8, 0))));
    assert!(marks.push(replacement((6, 0), (9, 0))));
    assert_eq!(marks.len(), 4);
  }

  #[test]
  fn inline_text_needs_host_support() {
    let mut marks = MarkCollector::new(HostCapabilities {
      inline_virtual_text: false,
    });
    let pad = Mark::at((0, 0))
      .text(Segment::new(" ", Highlight::normal()))
      .anchor(Anchor::Inline);
    assert!(!marks.push(pad.clone()));
    assert!(marks.push(pad.anchor(Anchor::Overlay)));
  }

  #[test]
  fn finish_orders_by_position_stably() {
    let mut marks = MarkCollector::new(HostCapabilities::default());
    marks.push(Mark::at((2, 0)).text(Segment::new("c", Highlight::normal())));
    marks.push(Mark::at((0, 3)).text(Segment::new("b", Highlight::normal())));
    marks.push(Mark::at((0, 0)).text(Segment::new("a1", Highlight::normal())));
    marks.push(Mark::at((0, 0)).text(Segment::new("a2", Highlight::normal())));
    let texts: Vec<_> = marks.finish().iter().map(Mark::virt_text_str).collect();
    assert_eq!(texts, vec!["a1", "a2", "b", "c"]);
  }
}
