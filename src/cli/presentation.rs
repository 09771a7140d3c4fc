//! CLI presentation: text and json formatters per command family.

mod build;
mod catalog;
mod shared;

pub use build::{format_build_json, format_build_text};
pub use catalog::{format_catalog_json, format_catalog_text};
pub use shared::status_label;
