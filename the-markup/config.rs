//! Decoration settings.
//!
//! Every option set is closed: strings come from a fixed vocabulary and
//! deserialize into enums, unknown keys are rejected. Settings that vary by
//! nesting depth are ordered lists looked up with [`cycle`] or [`clamp`].

use std::collections::BTreeMap;

use serde::{
  Deserialize,
  Serialize,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("invalid markup config: {0}")]
  Parse(#[from] toml::de::Error),
}

/// Item for a 1-based `level`, wrapping around past the end.
pub fn cycle<T>(items: &[T], level: usize) -> Option<&T> {
  if items.is_empty() {
    return None;
  }
  items.get(level.saturating_sub(1) % items.len())
}

/// Item for a 1-based `level`, sticking to the last one past the end.
pub fn clamp<T>(items: &[T], level: usize) -> Option<&T> {
  let last = items.len().checked_sub(1)?;
  items.get(level.saturating_sub(1).min(last))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WidthMode {
  #[default]
  Full,
  Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum HeadingPosition {
  #[default]
  Overlay,
  Inline,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct HeadingConfig {
  pub enabled:       bool,
  pub sign:          bool,
  pub position:      HeadingPosition,
  pub icons:         Vec<String>,
  pub signs:         Vec<String>,
  pub width:         WidthMode,
  pub left_pad:      usize,
  pub right_pad:     usize,
  pub min_width:     usize,
  pub border:        bool,
  pub border_prefix: bool,
  pub above:         String,
  pub below:         String,
  pub backgrounds:   Vec<String>,
  pub foregrounds:   Vec<String>,
}

impl Default for HeadingConfig {
  fn default() -> Self {
    Self {
      enabled:       true,
      sign:          true,
      position:      HeadingPosition::Overlay,
      icons:         ["󰲡 ", "󰲣 ", "󰲥 ", "󰲧 ", "󰲩 ", "󰲫 "]
        .map(String::from)
        .to_vec(),
      signs:         vec!["󰫎 ".into()],
      width:         WidthMode::Full,
      left_pad:      0,
      right_pad:     0,
      min_width:     0,
      border:        false,
      border_prefix: false,
      above:         "▄".into(),
      below:         "▀".into(),
      backgrounds:   (1..=6).map(|level| format!("MarkupH{level}Bg")).collect(),
      foregrounds:   (1..=6).map(|level| format!("MarkupH{level}")).collect(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct DashConfig {
  pub enabled:   bool,
  pub icon:      String,
  /// Fixed number of icons; the full render width when unset.
  pub width:     Option<usize>,
  pub highlight: String,
}

impl Default for DashConfig {
  fn default() -> Self {
    Self {
      enabled:   true,
      icon:      "─".into(),
      width:     None,
      highlight: "MarkupDash".into(),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CodeStyle {
  None,
  Normal,
  Language,
  #[default]
  Full,
}

impl CodeStyle {
  pub fn has_background(self) -> bool {
    matches!(self, Self::Normal | Self::Full)
  }

  pub fn has_language(self) -> bool {
    matches!(self, Self::Language | Self::Full)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CodePosition {
  #[default]
  Left,
  Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CodeBorder {
  #[default]
  Thick,
  Thin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct CodeConfig {
  pub enabled:            bool,
  pub sign:               bool,
  pub style:              CodeStyle,
  pub position:           CodePosition,
  pub disable_background: Vec<String>,
  pub width:              WidthMode,
  pub left_pad:           usize,
  pub right_pad:          usize,
  pub min_width:          usize,
  pub border:             CodeBorder,
  pub above:              String,
  pub below:              String,
  pub highlight:          String,
  pub highlight_inline:   String,
}

impl Default for CodeConfig {
  fn default() -> Self {
    Self {
      enabled:            true,
      sign:               true,
      style:              CodeStyle::Full,
      position:           CodePosition::Left,
      disable_background: vec!["diff".into()],
      width:              WidthMode::Full,
      left_pad:           0,
      right_pad:          0,
      min_width:          0,
      border:             CodeBorder::Thin,
      above:              "▄".into(),
      below:              "▀".into(),
      highlight:          "MarkupCode".into(),
      highlight_inline:   "MarkupCodeInline".into(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct BulletConfig {
  pub enabled:   bool,
  pub icons:     Vec<String>,
  pub left_pad:  usize,
  pub right_pad: usize,
  pub highlight: String,
}

impl Default for BulletConfig {
  fn default() -> Self {
    Self {
      enabled:   true,
      icons:     ["●", "○", "◆", "◇"].map(String::from).to_vec(),
      left_pad:  0,
      right_pad: 0,
      highlight: "MarkupBullet".into(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CheckboxState {
  pub icon:      String,
  pub highlight: String,
}

/// A user-defined replacement for bracketed text such as `[-]` or
/// `[!NOTE]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct CustomComponent {
  pub raw:       String,
  pub rendered:  String,
  pub highlight: String,
}

impl CustomComponent {
  fn new(raw: &str, rendered: &str, highlight: &str) -> Self {
    Self {
      raw:       raw.into(),
      rendered:  rendered.into(),
      highlight: highlight.into(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct CheckboxConfig {
  pub enabled:   bool,
  pub unchecked: CheckboxState,
  pub checked:   CheckboxState,
  pub custom:    BTreeMap<String, CustomComponent>,
}

impl Default for CheckboxConfig {
  fn default() -> Self {
    Self {
      enabled:   true,
      unchecked: CheckboxState {
        icon:      "󰄱 ".into(),
        highlight: "MarkupUnchecked".into(),
      },
      checked:   CheckboxState {
        icon:      "󰱒 ".into(),
        highlight: "MarkupChecked".into(),
      },
      custom:    BTreeMap::from([(
        "todo".into(),
        CustomComponent::new("[-]", "󰥔 ", "MarkupTodo"),
      )]),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct QuoteConfig {
  pub enabled:          bool,
  pub icon:             String,
  pub repeat_linebreak: bool,
  pub highlight:        String,
}

impl Default for QuoteConfig {
  fn default() -> Self {
    Self {
      enabled:          true,
      icon:             "▋".into(),
      repeat_linebreak: false,
      highlight:        "MarkupQuote".into(),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TableStyle {
  None,
  Normal,
  #[default]
  Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TableCell {
  Raw,
  #[default]
  Padded,
  Overlay,
}

/// Table border glyphs, indexed by [`TableBorder`] slot.
pub type TableBorders = [String; 11];

/// Slots of [`TableBorders`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableBorder {
  TopLeft,
  TopMid,
  TopRight,
  DelimiterLeft,
  DelimiterMid,
  DelimiterRight,
  BottomLeft,
  BottomMid,
  BottomRight,
  Vertical,
  Horizontal,
}

impl TableBorder {
  pub fn of(self, borders: &TableBorders) -> &str {
    &borders[self as usize]
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct PipeTableConfig {
  pub enabled:             bool,
  pub style:               TableStyle,
  pub cell:                TableCell,
  pub alignment_indicator: String,
  pub border:              TableBorders,
  pub head:                String,
  pub row:                 String,
  pub filler:              String,
}

impl Default for PipeTableConfig {
  fn default() -> Self {
    Self {
      enabled:             true,
      style:               TableStyle::Full,
      cell:                TableCell::Padded,
      alignment_indicator: "━".into(),
      border:              ["┌", "┬", "┐", "├", "┼", "┤", "└", "┴", "┘", "│", "─"].map(String::from),
      head:                "MarkupTableHead".into(),
      row:                 "MarkupTableRow".into(),
      filler:              "MarkupTableFill".into(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct SignConfig {
  pub enabled:   bool,
  pub highlight: String,
}

impl Default for SignConfig {
  fn default() -> Self {
    Self {
      enabled:   true,
      highlight: "MarkupSign".into(),
    }
  }
}

fn default_callouts() -> BTreeMap<String, CustomComponent> {
  BTreeMap::from([
    ("note".into(), CustomComponent::new("[!NOTE]", "󰋽 Note", "MarkupInfo")),
    ("tip".into(), CustomComponent::new("[!TIP]", "󰌶 Tip", "MarkupSuccess")),
    (
      "important".into(),
      CustomComponent::new("[!IMPORTANT]", "󰅾 Important", "MarkupHint"),
    ),
    (
      "warning".into(),
      CustomComponent::new("[!WARNING]", "󰀪 Warning", "MarkupWarn"),
    ),
    (
      "caution".into(),
      CustomComponent::new("[!CAUTION]", "󰳦 Caution", "MarkupError"),
    ),
  ])
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
  pub enabled:    bool,
  /// Upper bound for the render width; the viewport width when unset.
  pub max_width:  Option<usize>,
  pub heading:    HeadingConfig,
  pub dash:       DashConfig,
  pub code:       CodeConfig,
  pub bullet:     BulletConfig,
  pub checkbox:   CheckboxConfig,
  pub quote:      QuoteConfig,
  pub pipe_table: PipeTableConfig,
  pub callout:    BTreeMap<String, CustomComponent>,
  pub sign:       SignConfig,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      enabled:    true,
      max_width:  None,
      heading:    HeadingConfig::default(),
      dash:       DashConfig::default(),
      code:       CodeConfig::default(),
      bullet:     BulletConfig::default(),
      checkbox:   CheckboxConfig::default(),
      quote:      QuoteConfig::default(),
      pipe_table: PipeTableConfig::default(),
      callout:    default_callouts(),
      sign:       SignConfig::default(),
    }
  }
}

impl Config {
  pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
    Ok(toml::from_str(source)?)
  }
}
