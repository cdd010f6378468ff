//! Code-block language icons.
//!
//! The glyph table belongs to the host (it usually comes from an icon font
//! package); the engine only asks for one language at a time.

use std::collections::HashMap;

use crate::Tendril;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageIcon {
  pub glyph:     Tendril,
  pub highlight: Tendril,
}

pub trait IconProvider {
  fn icon(&self, language: &str) -> Option<LanguageIcon>;
}

#[derive(Debug, Default)]
pub struct NoIcons;

impl IconProvider for NoIcons {
  fn icon(&self, _language: &str) -> Option<LanguageIcon> {
    None
  }
}

/// A fixed language-to-icon map. Lookups ignore ASCII case.
#[derive(Debug, Default, Clone)]
pub struct IconTable {
  icons: HashMap<String, LanguageIcon>,
}

impl IconTable {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with(
    mut self,
    language: &str,
    glyph: impl Into<Tendril>,
    highlight: impl Into<Tendril>,
  ) -> Self {
    self.icons.insert(language.to_ascii_lowercase(), LanguageIcon {
      glyph:     glyph.into(),
      highlight: highlight.into(),
    });
    self
  }
}

impl IconProvider for IconTable {
  fn icon(&self, language: &str) -> Option<LanguageIcon> {
    self.icons.get(&language.to_ascii_lowercase()).cloned()
  }
}
