//! Lookup of callouts and custom checkboxes by their raw text.

use crate::config::{
  Config,
  CustomComponent,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
  Exact,
  Contains,
  Starts,
}

impl MatchMode {
  /// Case-insensitive comparison of `text` against a component's raw form.
  fn matches(self, text: &str, raw: &str) -> bool {
    let text = text.to_lowercase();
    let raw = raw.to_lowercase();
    match self {
      Self::Exact => text == raw,
      Self::Contains => text.contains(&raw),
      Self::Starts => text.starts_with(&raw),
    }
  }
}

fn find<'c>(
  components: impl IntoIterator<Item = &'c CustomComponent>,
  text: &str,
  mode: MatchMode,
) -> Option<&'c CustomComponent> {
  components
    .into_iter()
    .find(|component| mode.matches(text, &component.raw))
}

pub fn callout<'c>(config: &'c Config, text: &str, mode: MatchMode) -> Option<&'c CustomComponent> {
  find(config.callout.values(), text, mode)
}

pub fn checkbox<'c>(config: &'c Config, text: &str, mode: MatchMode) -> Option<&'c CustomComponent> {
  find(config.checkbox.custom.values(), text, mode)
}
