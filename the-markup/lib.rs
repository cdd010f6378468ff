//! Cosmetic decorations for parsed markdown.
//!
//! The engine walks a syntax tree, routes every query capture to a renderer
//! and collects [`render::mark::Mark`]s describing highlights, virtual text,
//! virtual lines and signs. The document text is never modified: a host
//! applies the marks on top of the canonical buffer and throws them away
//! before the next pass.
//!
//! # Example
//!
//! ```
//! use the_markup::{
//!   config::Config,
//!   context::Host,
//!   render,
//!   tree::TreeBuilder,
//! };
//!
//! let mut builder = TreeBuilder::new("# Title\n");
//! builder
//!   .open("section", (0, 0), (1, 0))
//!   .open("atx_heading", (0, 0), (1, 0))
//!   .leaf("atx_h1_marker", (0, 0), (0, 1))
//!   .leaf("inline", (0, 2), (0, 7))
//!   .close()
//!   .close();
//! let tree = builder.build().unwrap();
//!
//! let marks = render(&tree, &Config::default(), &Host::new(80));
//! assert!(!marks.is_empty());
//! ```

use smartstring::{
  LazyCompact,
  SmartString,
};

pub mod component;
pub mod config;
pub mod context;
pub mod geometry;
pub mod icons;
pub mod position;
pub mod query;
pub mod render;
pub mod tree;

pub use render::render;

pub type Tendril = SmartString<LazyCompact>;
