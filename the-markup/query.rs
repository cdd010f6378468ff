//! Capture streams over a [`SyntaxTree`].
//!
//! The host usually runs grammar queries and feeds their `(name, node)`
//! pairs to the dispatcher. The walkers here produce the same captures the
//! standard markdown queries would, for hosts that only hand over a tree.

use crate::tree::{
  NodeView,
  SyntaxTree,
};

/// Node categories the renderers know how to decorate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Capture {
  Heading,
  Dash,
  Code,
  ListMarker,
  CheckboxUnchecked,
  CheckboxChecked,
  Quote,
  QuoteMarker,
  Table,
  InlineCode,
  Shortcut,
  Unhandled(String),
}

impl Capture {
  pub fn from_name(name: &str) -> Self {
    match name {
      "heading" => Self::Heading,
      "dash" => Self::Dash,
      "code" => Self::Code,
      "list_marker" => Self::ListMarker,
      "checkbox_unchecked" => Self::CheckboxUnchecked,
      "checkbox_checked" => Self::CheckboxChecked,
      "quote" => Self::Quote,
      "quote_marker" => Self::QuoteMarker,
      "table" => Self::Table,
      "code_inline" => Self::InlineCode,
      "shortcut" | "callout" => Self::Shortcut,
      other => Self::Unhandled(other.to_string()),
    }
  }

  pub fn name(&self) -> &str {
    match self {
      Self::Heading => "heading",
      Self::Dash => "dash",
      Self::Code => "code",
      Self::ListMarker => "list_marker",
      Self::CheckboxUnchecked => "checkbox_unchecked",
      Self::CheckboxChecked => "checkbox_checked",
      Self::Quote => "quote",
      Self::QuoteMarker => "quote_marker",
      Self::Table => "table",
      Self::InlineCode => "code_inline",
      Self::Shortcut => "shortcut",
      Self::Unhandled(name) => name.as_str(),
    }
  }
}

fn block_capture(kind: &str) -> Option<Capture> {
  let capture = match kind {
    "atx_h1_marker" | "atx_h2_marker" | "atx_h3_marker" | "atx_h4_marker" | "atx_h5_marker"
    | "atx_h6_marker" => Capture::Heading,
    "thematic_break" => Capture::Dash,
    "fenced_code_block" => Capture::Code,
    "list_marker_minus" | "list_marker_plus" | "list_marker_star" | "list_marker_dot"
    | "list_marker_parenthesis" => Capture::ListMarker,
    "task_list_marker_unchecked" => Capture::CheckboxUnchecked,
    "task_list_marker_checked" => Capture::CheckboxChecked,
    "block_quote" => Capture::Quote,
    "pipe_table" => Capture::Table,
    _ => return None,
  };
  Some(capture)
}

fn inline_capture(kind: &str) -> Option<Capture> {
  match kind {
    "code_span" => Some(Capture::InlineCode),
    "shortcut_link" => Some(Capture::Shortcut),
    _ => None,
  }
}

/// Block-level captures in document order.
pub fn block_captures(tree: &SyntaxTree) -> Vec<(Capture, NodeView<'_>)> {
  tree
    .preorder()
    .filter_map(|node| block_capture(node.kind()).map(|capture| (capture, node)))
    .collect()
}

/// Inline captures in document order.
pub fn inline_captures(tree: &SyntaxTree) -> Vec<(Capture, NodeView<'_>)> {
  tree
    .preorder()
    .filter_map(|node| inline_capture(node.kind()).map(|capture| (capture, node)))
    .collect()
}

/// Marker and continuation tokens belonging to `quote` itself. Nested quotes
/// are captured on their own and are not entered.
pub fn quote_captures(quote: NodeView<'_>) -> Vec<(Capture, NodeView<'_>)> {
  let mut captures = Vec::new();
  let mut stack: Vec<_> = quote.children().collect();
  stack.reverse();
  while let Some(node) = stack.pop() {
    match node.kind() {
      "block_quote_marker" | "block_continuation" => {
        captures.push((Capture::QuoteMarker, node));
      },
      "block_quote" => {},
      _ => {
        let start = stack.len();
        stack.extend(node.children());
        stack[start..].reverse();
      },
    }
  }
  captures
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::tree::TreeBuilder;

  #[test]
  fn names_round_trip() {
    for name in [
      "heading",
      "dash",
      "code",
      "list_marker",
      "checkbox_unchecked",
      "checkbox_checked",
      "quote",
      "quote_marker",
      "table",
      "code_inline",
      "shortcut",
    ] {
      assert_eq!(Capture::from_name(name).name(), name);
    }
    assert_eq!(Capture::from_name("callout"), Capture::Shortcut);
    assert_eq!(
      Capture::from_name("wiki_link"),
      Capture::Unhandled("wiki_link".into())
    );
  }

  #[test]
  fn block_and_inline_walks() {
    let text = "# Title\n\n- `x`\n\n---\n";
    let mut builder = TreeBuilder::new(text);
    builder
      .open("section", (0, 0), (5, 0))
      .open("atx_heading", (0, 0), (1, 0))
      .leaf("atx_h1_marker", (0, 0), (0, 1))
      .leaf("inline", (0, 2), (0, 7))
      .close()
      .open("list", (2, 0), (3, 0))
      .open("list_item", (2, 0), (3, 0))
      .leaf("list_marker_minus", (2, 0), (2, 2))
      .open("paragraph", (2, 2), (3, 0))
      .open("inline", (2, 2), (2, 5))
      .leaf("code_span", (2, 2), (2, 5))
      .close()
      .close()
      .close()
      .close()
      .leaf("thematic_break", (4, 0), (5, 0))
      .close();
    let tree = builder.build().unwrap();

    let blocks: Vec<_> = block_captures(&tree)
      .into_iter()
      .map(|(capture, node)| (capture, node.start_row()))
      .collect();
    assert_eq!(blocks, vec![
      (Capture::Heading, 0),
      (Capture::ListMarker, 2),
      (Capture::Dash, 4),
    ]);
    let inlines: Vec<_> = inline_captures(&tree)
      .into_iter()
      .map(|(capture, node)| (capture, node.start_col()))
      .collect();
    assert_eq!(inlines, vec![(Capture::InlineCode, 2)]);
  }

  #[test]
  fn quote_walk_skips_nested_quotes() {
    let text = "> a\n> > b\n> c\n";
    let mut builder = TreeBuilder::new(text);
    builder
      .open("block_quote", (0, 0), (3, 0))
      .leaf("block_quote_marker", (0, 0), (0, 2))
      .leaf("paragraph", (0, 2), (1, 0))
      .leaf("block_continuation", (1, 0), (1, 2))
      .open("block_quote", (1, 2), (2, 0))
      .leaf("block_quote_marker", (1, 2), (1, 4))
      .leaf("paragraph", (1, 4), (2, 0))
      .close()
      .open("paragraph", (2, 0), (3, 0))
      .leaf("block_continuation", (2, 0), (2, 2))
      .close()
      .close();
    let tree = builder.build().unwrap();
    let quote = tree.roots().next().unwrap();
    let markers: Vec<_> = quote_captures(quote)
      .into_iter()
      .map(|(capture, node)| {
        assert_eq!(capture, Capture::QuoteMarker);
        (node.start_row(), node.start_col())
      })
      .collect();
    assert_eq!(markers, vec![(0, 0), (1, 0), (2, 0)]);

    let nested = tree
      .preorder()
      .filter(|node| node.kind() == "block_quote")
      .nth(1)
      .unwrap();
    assert_eq!(quote_captures(nested).len(), 1);
  }
}
