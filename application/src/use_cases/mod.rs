//! Use cases
//!
//! Application-level operations that drive the debate engine.

pub mod replay_debate;
