use tracing::{
  trace,
  warn,
};

use crate::{
  context::RenderContext,
  query::{
    self,
    Capture,
  },
  render::{
    PassState,
    code,
    collector::MarkCollector,
    dash,
    heading,
    inline,
    list,
    mark::Mark,
    quote,
    table,
  },
  tree::NodeView,
};

/// Routes captures to their renderer for one pass.
pub struct Dispatcher<'a> {
  cx:    RenderContext<'a>,
  marks: MarkCollector,
  state: PassState,
}

impl<'a> Dispatcher<'a> {
  pub fn new(cx: RenderContext<'a>) -> Self {
    let marks = MarkCollector::new(cx.capabilities());
    Self {
      cx,
      marks,
      state: PassState::default(),
    }
  }

  pub fn run(&mut self, captures: impl IntoIterator<Item = (Capture, NodeView<'a>)>) {
    for (capture, node) in captures {
      self.dispatch(&capture, node);
    }
  }

  /// Dispatches a capture reported by its query name.
  pub fn dispatch_named(&mut self, name: &str, node: NodeView<'a>) {
    self.dispatch(&Capture::from_name(name), node);
  }

  pub fn dispatch(&mut self, capture: &Capture, node: NodeView<'a>) {
    trace!(
      capture = capture.name(),
      kind = node.kind(),
      row = node.start_row(),
      col = node.start_col(),
      "dispatching capture"
    );
    match capture {
      Capture::Heading => heading::render(&mut self.cx, &mut self.marks, &mut self.state, node),
      Capture::Dash => dash::render(&mut self.cx, &mut self.marks, node),
      Capture::Code => code::render(&mut self.cx, &mut self.marks, node),
      Capture::ListMarker => list::marker(&mut self.cx, &mut self.marks, node),
      Capture::CheckboxUnchecked => {
        list::checkbox(&mut self.cx, &mut self.marks, node, list::Checkbox::Unchecked)
      },
      Capture::CheckboxChecked => {
        list::checkbox(&mut self.cx, &mut self.marks, node, list::Checkbox::Checked)
      },
      Capture::Quote => {
        for (capture, marker) in query::quote_captures(node) {
          self.dispatch(&capture, marker);
        }
      },
      Capture::QuoteMarker => quote::marker(&mut self.cx, &mut self.marks, node),
      Capture::Table => table::render(&mut self.cx, &mut self.marks, node),
      Capture::InlineCode => inline::code(&mut self.cx, &mut self.marks, node),
      Capture::Shortcut => inline::shortcut(&mut self.cx, &mut self.marks, node),
      Capture::Unhandled(name) => {
        warn!(
          capture = %name,
          kind = node.kind(),
          row = node.start_row(),
          "unhandled capture"
        );
      },
    }
  }

  pub fn marks(&self) -> &MarkCollector {
    &self.marks
  }

  pub fn finish(self) -> Vec<Mark> {
    self.marks.finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{
    config::Config,
    context::Host,
    tree::TreeBuilder,
  };

  #[test]
  fn unhandled_captures_are_skipped() {
    let mut builder = TreeBuilder::new("[[wiki]]\n---\n");
    builder
      .leaf("wiki_link", (0, 0), (0, 8))
      .leaf("thematic_break", (1, 0), (2, 0));
    let tree = builder.build().unwrap();
    let config = Config::default();
    let mut dispatcher = Dispatcher::new(RenderContext::new(&tree, &config, Host::new(10)));
    let mut roots = tree.roots();
    let (wiki, dash) = (roots.next().unwrap(), roots.next().unwrap());

    dispatcher.dispatch_named("wiki_link", wiki);
    assert!(dispatcher.marks().is_empty());
    dispatcher.dispatch_named("dash", dash);
    let marks = dispatcher.finish();
    assert_eq!(marks.len(), 1);
    assert_eq!(marks[0].virt_text_str(), "─".repeat(10));
  }
}
