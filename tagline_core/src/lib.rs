//! `tagline_core` is a small engine of chainable tag functions. A tag takes
//! a literal template, a run of fixed segments with values between them,
//! and produces a string. Tags compose: `outer.chain(&inner)` runs `inner`
//! first and feeds its output to `outer`, and the composite is itself a tag
//! with the name `outer(inner)`.
//!
//! ## Transforms
//!
//! - `identity` and `raw`: merge the template (cooked or raw segments).
//! - `paragraph`: one non-blank line per paragraph.
//! - `fold`: remove line breaks.
//! - `flush`: trim every line.
//! - `outdent`: remove the common indentation.
//! - `indent(n)`: add `n` spaces, or remove up to `-n` common ones.
//! - `wrap(n)`: reflow to `n` columns, merging lines that share indentation.
//! - `numbering(options)`: prefix every line with a padded counter rendered
//!   in a numeral scheme (`digit`, `Digit`, `sub`, `alpha`, `Alpha`, `roman`,
//!   `Roman`).
//!
//! ## Modules
//!
//! - [`config`]: Numbering defaults and named pipelines loaded from
//!   `tagline.toml`.
//! - [`pipeline`]: Parsing of pipeline expressions like
//!   `outdent|wrap:72|numbering:"roman"` into a composed [`Tag`].
//! - [`transforms`]: The transform library.
//!
//! ## Quick Start
//!
//! ```rust
//! use tagline_core::template;
//! use tagline_core::transforms::indent;
//! use tagline_core::transforms::outdent;
//!
//! let tidy = indent(2).chain(&outdent());
//! assert_eq!(tidy.name(), "indent:2(outdent)");
//!
//! let item = "b";
//! let text = tidy.apply(&template!("    a\n    {}", item));
//! assert_eq!(text, "  a\n  b");
//! ```

pub use config::*;
pub use error::*;
pub use lines::*;
pub use numbering::*;
pub use numerals::*;
pub use tag::*;
pub use template::*;

pub mod config;
#[allow(unused_assignments)]
mod error;
mod lines;
mod numbering;
mod numerals;
pub mod pipeline;
mod tag;
mod template;
pub mod transforms;

#[cfg(test)]
mod __fixtures;
#[cfg(test)]
mod __tests;
