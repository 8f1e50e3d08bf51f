//! Screen renderer: HTML markup and stylesheet
//!
//! - [`node`]: element tree and escaping
//! - [`stylesheet`]: screen rules and `@media print` overrides
//! - [`screen`]: projection of CV data into the tree

pub mod node;
mod screen;
pub mod stylesheet;

pub use node::{Element, Node};
pub use screen::{page_title, HeaderState, ScreenRenderer};
