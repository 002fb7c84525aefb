//! Debate orchestration domain
//!
//! Phases a debate moves through and the policy deciding which phase
//! changes are accepted.

pub mod entities;
pub mod policy;
