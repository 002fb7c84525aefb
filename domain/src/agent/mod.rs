//! Agent subdomain
//!
//! - [`value_objects`] - identifiers, roster entries and backend-reported metrics
//! - [`entities`] - the mutable [`AgentRecord`](entities::AgentRecord)
//! - [`failure`] - per-agent error taxonomy

pub mod entities;
pub mod failure;
pub mod value_objects;
