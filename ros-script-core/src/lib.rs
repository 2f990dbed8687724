//! Generic RouterOS script building and writing primitives used by higher-level tools.

pub mod command;
pub mod format;
pub mod quote;
pub mod script;
pub mod writer;

pub use command::{Action, Arg, Command, Line};
pub use format::{format_section_counts, format_summary};
pub use quote::quote_value;
pub use script::{Script, Section};
pub use writer::{write, write_file, WriteError};
