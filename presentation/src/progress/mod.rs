//! Progress reporting while a debate replays

pub mod reporter;
