//! Checkpoint domain
//!
//! A checkpoint freezes every agent's text at a notable moment of the
//! debate (an agent finishing, a round starting, a user constraint). The
//! ordered list of checkpoints is what time travel navigates.

pub mod entities;
