//! Renders a paginated PDF résumé with `genpdf`.
//!
//! The résumé content lives in [`content`], the block builders in [`layout`] and the page-flow
//! setup in [`builder`].  [`builder::ResumeGenerator`] ties them together.

pub mod builder;
pub mod config;
pub mod content;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod model;
pub mod naming;
pub mod pages;
pub mod theme;

#[cfg(feature = "bookmarks")]
pub mod bookmarks;

pub use builder::{RenderedPdf, ResumeGenerator};
pub use config::{GeneratorConfig, IconPolicy};
pub use error::ResumeError;
