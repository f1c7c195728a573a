//! Agent swarm types

use crate::ai::{AiError, Message};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The five specialized agents in the swarm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentName {
    /// Code examples and technical implementations
    Developer,
    /// Concise summaries, key points, TL;DR responses
    Summarizer,
    /// Step-by-step breakdowns and educational explanations
    Explainer,
    /// Relatable analogies and metaphors for complex concepts
    AnalogyCreator,
    /// Critique of arguments and methodology
    VulnerabilityExpert,
}

impl Default for AgentName {
    fn default() -> Self {
        AgentName::Explainer
    }
}

impl std::fmt::Display for AgentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentName::Developer => write!(f, "developer"),
            AgentName::Summarizer => write!(f, "summarizer"),
            AgentName::Explainer => write!(f, "explainer"),
            AgentName::AnalogyCreator => write!(f, "analogy_creator"),
            AgentName::VulnerabilityExpert => write!(f, "vulnerability_expert"),
        }
    }
}

impl AgentName {
    pub fn all() -> [AgentName; 5] {
        [
            AgentName::Developer,
            AgentName::Summarizer,
            AgentName::Explainer,
            AgentName::AnalogyCreator,
            AgentName::VulnerabilityExpert,
        ]
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "developer" => Some(AgentName::Developer),
            "summarizer" => Some(AgentName::Summarizer),
            "explainer" => Some(AgentName::Explainer),
            "analogy_creator" => Some(AgentName::AnalogyCreator),
            "vulnerability_expert" => Some(AgentName::VulnerabilityExpert),
            _ => None,
        }
    }

    /// Every agent can hand off to every other agent, never to itself
    pub fn peers(&self) -> Vec<AgentName> {
        Self::all().into_iter().filter(|a| a != self).collect()
    }

    /// Human-readable label for UI display
    pub fn label(&self) -> &'static str {
        match self {
            AgentName::Developer => "Developer",
            AgentName::Summarizer => "Summarizer",
            AgentName::Explainer => "Explainer",
            AgentName::AnalogyCreator => "Analogy Creator",
            AgentName::VulnerabilityExpert => "Vulnerability Expert",
        }
    }
}

/// Conversation state threaded through the router. Exactly one agent is
/// active at any instant; only handoffs move the pointer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwarmState {
    /// Shared message history driving the agents, seeded with the document
    /// context as a synthetic first user message
    pub messages: Vec<Message>,
    /// The agent that owns the next turn
    pub active: AgentName,
}

impl SwarmState {
    pub fn new(document_context: &str) -> Self {
        let seed = format!(
            "Here is the content of the uploaded document:\n\n{}",
            document_context
        );
        SwarmState {
            messages: vec![Message::user(seed)],
            active: AgentName::default(),
        }
    }
}

/// A completed handoff within a turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Handoff {
    pub from: AgentName,
    pub to: AgentName,
}

/// The visible result of one user turn: a single direct answer from whichever
/// agent ended the handoff chain
#[derive(Debug, Clone)]
pub struct TurnReply {
    pub answer: String,
    pub agent: AgentName,
    pub handoffs: Vec<Handoff>,
}

#[derive(Debug, Error)]
pub enum SwarmError {
    #[error(transparent)]
    Ai(#[from] AiError),
    #[error("agents handed off {0} times without answering; giving up on this turn")]
    HandoffLimitExceeded(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_agent_is_explainer() {
        assert_eq!(AgentName::default(), AgentName::Explainer);
    }

    #[test]
    fn fresh_state_starts_at_explainer_with_seeded_context() {
        let state = SwarmState::new("chapter one text");
        assert_eq!(state.active, AgentName::Explainer);
        assert_eq!(state.messages.len(), 1);
        assert!(state.messages[0].content.contains("chapter one text"));
    }

    #[test]
    fn peers_exclude_self() {
        for agent in AgentName::all() {
            let peers = agent.peers();
            assert_eq!(peers.len(), 4);
            assert!(!peers.contains(&agent));
        }
    }

    #[test]
    fn name_round_trips_through_display() {
        for agent in AgentName::all() {
            assert_eq!(AgentName::from_str(&agent.to_string()), Some(agent));
        }
    }
}
