//! Script summary formatters.

pub mod text;

pub use text::{format_section_counts, format_summary};
