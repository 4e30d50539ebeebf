mod prints;
mod types;

pub mod utils;

pub use prints::{render_json, render_text};
pub use types::*;
