//! Progress reporting for one-shot runs

pub mod reporter;
