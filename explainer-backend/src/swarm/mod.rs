//! Agent swarm for collaborative document explanation
//!
//! Five role-bound agents share one conversation and pass control with
//! explicit handoff tools:
//!
//! - **explainer** - step-by-step breakdowns (default active agent)
//! - **developer** - code examples and technical demonstrations
//! - **summarizer** - TL;DR and key points
//! - **analogy_creator** - everyday analogies for hard concepts
//! - **vulnerability_expert** - critique of arguments and methodology
//!
//! ## Flow
//!
//! ```text
//! user message → active agent → answer            (turn ends)
//!                             → transfer_to_<x>   (x becomes active, re-invoked)
//! ```
//!
//! The chain within one turn ends at the first direct answer; a bounded
//! number of handoff rounds guarantees termination.

pub mod router;
pub mod tools;
pub mod types;

pub use router::SwarmRouter;
pub use types::{AgentName, Handoff, SwarmError, SwarmState, TurnReply};
