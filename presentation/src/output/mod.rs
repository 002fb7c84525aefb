//! Output formatting for the final debate view

pub mod console;
pub mod formatter;
