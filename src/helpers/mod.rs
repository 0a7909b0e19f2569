//! Helper functions shared by the templates and the content loader

mod date;
mod html;

pub use date::*;
pub use html::*;
