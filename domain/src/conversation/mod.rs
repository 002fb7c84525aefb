//! Multi-turn conversation domain
//!
//! - [`entities::DebateTurnSnapshot`] - a finished turn, frozen for display
//! - [`entities::FollowUpNode`] - a user question chaining one turn to the next

pub mod entities;
