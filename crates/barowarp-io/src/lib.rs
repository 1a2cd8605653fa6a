//! Curve loading and gnuplot script rendering for barowarp.

mod error;
pub mod format;
mod reader;
mod render;
mod template;

pub use error::IoError;
pub use format::{FormatArg, sprintf};
pub use reader::SeriesReader;
pub use render::ScriptRenderer;
pub use template::Template;
