//! List bullets and task checkboxes.

use the_core::grapheme::{
  leading_spaces,
  pad_to,
  spaces,
};

use crate::{
  component::{
    self,
    MatchMode,
  },
  config::{
    Config,
    cycle,
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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkbox {
  Unchecked,
  Checked,
}

/// Whether a checkbox next to the marker will draw the item's icon.
fn sibling_checkbox(config: &Config, node: NodeView<'_>) -> bool {
  if !config.checkbox.enabled {
    return false;
  }
  if node.sibling("task_list_marker_unchecked").is_some()
    || node.sibling("task_list_marker_checked").is_some()
  {
    return true;
  }
  node.sibling("paragraph").is_some_and(|paragraph| {
    component::checkbox(config, &paragraph.text(), MatchMode::Starts).is_some()
  })
}

pub fn marker(cx: &mut RenderContext<'_>, marks: &mut MarkCollector, node: NodeView<'_>) {
  let config = cx.config();
  if sibling_checkbox(config, node) {
    marks.push(Mark::over(node).hide_text());
    return;
  }

  let bullet = &config.bullet;
  if !bullet.enabled {
    return;
  }
  let level = node.level_in_section("list");
  let Some(icon) = cycle(&bullet.icons, level) else {
    return;
  };
  // The grammar sometimes folds indentation into nested markers.
  let leading = leading_spaces(&node.text());
  let width = node.width().saturating_sub(leading);
  marks.push(
    Mark::over(node)
      .trim_start(leading)
      .text(Segment::new(pad_to(icon, width), Highlight::group(&bullet.highlight))),
  );

  if bullet.left_pad > 0 {
    marks.push(
      Mark::at((node.start_row(), node.start_col() + leading))
        .text(Segment::new(spaces(bullet.left_pad), Highlight::normal()))
        .anchor(Anchor::Inline)
        .priority(Priority::Fill),
    );
  }
  if bullet.right_pad > 0 {
    marks.push(
      Mark::at(node.end())
        .text(Segment::new(spaces(bullet.right_pad), Highlight::normal()))
        .anchor(Anchor::Inline),
    );
  }
}

pub fn checkbox(
  cx: &mut RenderContext<'_>,
  marks: &mut MarkCollector,
  node: NodeView<'_>,
  state: Checkbox,
) {
  let config = &cx.config().checkbox;
  if !config.enabled {
    return;
  }
  let state = match state {
    Checkbox::Unchecked => &config.unchecked,
    Checkbox::Checked => &config.checked,
  };
  marks.push(Mark::over(node).text(Segment::new(
    pad_to(&state.icon, node.width()),
    Highlight::group(&state.highlight),
  )));
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    context::Host,
    position::Position,
    tree::{
      SyntaxTree,
      TreeBuilder,
    },
  };

  // - [ ] task
  //   - two
  // - [-] doing
  fn list_tree() -> SyntaxTree {
    let text = "- [ ] task\n  - two\n- [-] doing\n";
    let mut builder = TreeBuilder::new(text);
    builder
      .open("section", (0, 0), (3, 0))
      .open("list", (0, 0), (3, 0))
      .open("list_item", (0, 0), (2, 0))
      .leaf("list_marker_minus", (0, 0), (0, 2))
      .leaf("task_list_marker_unchecked", (0, 2), (0, 5))
      .leaf("paragraph", (0, 6), (1, 0))
      .open("list", (1, 0), (2, 0))
      .open("list_item", (1, 0), (2, 0))
      .leaf("list_marker_minus", (1, 0), (1, 4))
      .leaf("paragraph", (1, 4), (2, 0))
      .close()
      .close()
      .close()
      .open("list_item", (2, 0), (3, 0))
      .leaf("list_marker_minus", (2, 0), (2, 2))
      .leaf("paragraph", (2, 2), (3, 0))
      .close()
      .close()
      .close();
    builder.build().unwrap()
  }

  fn find<'t>(tree: &'t SyntaxTree, kind: &str, row: usize) -> NodeView<'t> {
    tree
      .preorder()
      .find(|node| node.kind() == kind && node.start_row() == row)
      .unwrap()
  }

  fn render_marker(tree: &SyntaxTree, config: &Config, row: usize) -> Vec<Mark> {
    let mut cx = RenderContext::new(tree, config, Host::new(80));
    let mut marks = MarkCollector::default();
    marker(&mut cx, &mut marks, find(tree, "list_marker_minus", row));
    marks.finish()
  }

  #[test]
  fn list_checkbox_pads_to_bracket_width() {
    let tree = list_tree();
    let mut config = Config::default();
    config.checkbox.unchecked.icon = "☐".into();
    let mut cx = RenderContext::new(&tree, &config, Host::new(80));
    let mut marks = MarkCollector::default();
    let node = find(&tree, "task_list_marker_unchecked", 0);
    checkbox(&mut cx, &mut marks, node, Checkbox::Unchecked);

    let marks = marks.finish();
    assert_eq!(marks.len(), 1);
    let mark = &marks[0];
    assert!(mark.conceal);
    assert_eq!(mark.anchor, Anchor::Overlay);
    assert_eq!(mark.start, Position::new(0, 2));
    assert_eq!(mark.end, Some(Position::new(0, 5)));
    assert_eq!(mark.virt_text_str(), "☐  ");
    assert_eq!(mark.virt_text_width(), 3);
    assert_eq!(
      mark.virt_text[0].highlights[0],
      Highlight::group("MarkupUnchecked")
    );
  }

  #[test]
  fn list_marker_hidden_next_to_checkbox() {
    let tree = list_tree();
    let config = Config::default();
    for row in [0, 2] {
      let marks = render_marker(&tree, &config, row);
      assert_eq!(marks.len(), 1);
      assert!(marks[0].hide_text);
      assert!(marks[0].virt_text.is_empty());
    }

    let mut config = Config::default();
    config.checkbox.enabled = false;
    let marks = render_marker(&tree, &config, 0);
    assert_eq!(marks[0].virt_text_str(), "● ");
  }

  #[test]
  fn list_bullet_cycles_by_level_and_skips_indent() {
    let tree = list_tree();
    let mut config = Config::default();
    config.bullet.left_pad = 1;
    config.bullet.right_pad = 2;
    let marks = render_marker(&tree, &config, 1);
    assert_eq!(marks.len(), 3);

    let bullet = marks.iter().find(|mark| mark.conceal).unwrap();
    assert_eq!(bullet.start, Position::new(1, 2));
    assert_eq!(bullet.end, Some(Position::new(1, 4)));
    assert_eq!(bullet.virt_text_str(), "○ ");

    let pads: Vec<_> = marks
      .iter()
      .filter(|mark| mark.anchor == Anchor::Inline)
      .map(|mark| (mark.start.col, mark.virt_text_width(), mark.priority))
      .collect();
    assert_eq!(pads, vec![(2, 1, Priority::Fill), (4, 2, Priority::Normal)]);
  }
}
