//! Output formatting for one-shot runs

pub mod console;
