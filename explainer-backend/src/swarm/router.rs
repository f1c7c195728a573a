//! Swarm router - drives one user turn through the handoff chain

use super::tools::{handoff_tools_for, parse_handoff};
use super::types::{AgentName, Handoff, SwarmError, SwarmState, TurnReply};
use crate::ai::{ChatBackend, Message, ToolHistoryEntry, ToolResponse};
use std::sync::Arc;

/// Maximum handoff rounds within a single user turn. Two agents bouncing a
/// request back and forth must terminate with an error, not loop.
const MAX_HANDOFFS_PER_TURN: u32 = 5;

pub struct SwarmRouter {
    backend: Arc<dyn ChatBackend>,
}

impl SwarmRouter {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    /// Fixed role prompt for each agent. These are the behavioral contract
    /// for the agent's output style; kept as versioned markdown files.
    fn system_prompt(agent: AgentName) -> &'static str {
        match agent {
            AgentName::Developer => include_str!("prompts/developer.md"),
            AgentName::Summarizer => include_str!("prompts/summarizer.md"),
            AgentName::Explainer => include_str!("prompts/explainer.md"),
            AgentName::AnalogyCreator => include_str!("prompts/analogy_creator.md"),
            AgentName::VulnerabilityExpert => include_str!("prompts/vulnerability_expert.md"),
        }
    }

    /// Process one user turn. The input state is untouched; the caller
    /// commits the returned state only on success, so a failed model call
    /// leaves both the history and the active-agent pointer as they were.
    pub async fn advance(
        &self,
        state: &SwarmState,
        user_message: &str,
    ) -> Result<(SwarmState, TurnReply), SwarmError> {
        let mut next = state.clone();
        next.messages.push(Message::user(user_message));

        let mut tool_history: Vec<ToolHistoryEntry> = Vec::new();
        let mut handoffs: Vec<Handoff> = Vec::new();
        let mut tool_rounds: u32 = 0;

        loop {
            let agent = next.active;
            let mut messages = vec![Message::system(Self::system_prompt(agent))];
            messages.extend(next.messages.iter().cloned());

            let response = self
                .backend
                .complete(messages, tool_history.clone(), handoff_tools_for(agent))
                .await?;

            if !response.is_tool_use() {
                // Direct answer: the chain ends here and this is the one
                // visible assistant message for the turn
                next.messages.push(Message::assistant(response.content.clone()));
                return Ok((
                    next,
                    TurnReply {
                        answer: response.content,
                        agent,
                        handoffs,
                    },
                ));
            }

            tool_rounds += 1;
            if tool_rounds > MAX_HANDOFFS_PER_TURN {
                log::warn!(
                    "[SWARM] Turn aborted after {} handoff rounds (active: {})",
                    MAX_HANDOFFS_PER_TURN,
                    agent
                );
                return Err(SwarmError::HandoffLimitExceeded(MAX_HANDOFFS_PER_TURN));
            }

            // First parseable handoff wins; every call still gets a response
            // so the tool protocol stays well-formed
            let target = response
                .tool_calls
                .iter()
                .find_map(|tc| parse_handoff(&tc.name));

            let mut responses = Vec::new();
            let mut transferred = false;
            for tc in &response.tool_calls {
                let content = match (parse_handoff(&tc.name), target) {
                    (Some(t), Some(chosen)) if t == chosen && !transferred => {
                        transferred = true;
                        format!("Transferred to {}", chosen.label())
                    }
                    (Some(_), _) => "Ignored: control already transferred this round".to_string(),
                    (None, _) => format!("Unknown tool '{}'", tc.name),
                };
                responses.push(ToolResponse {
                    tool_call_id: tc.id.clone(),
                    content,
                });
            }
            tool_history.push(ToolHistoryEntry::new(response.tool_calls.clone(), responses));

            match target {
                Some(to) => {
                    log::info!("[SWARM] Handoff {} → {}", agent, to);
                    handoffs.push(Handoff { from: agent, to });
                    next.active = to;
                }
                None => {
                    // The model called something that isn't a handoff tool;
                    // re-invoke the same agent with the error fed back
                    log::warn!("[SWARM] {} called an unknown tool", agent);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{AiError, AiResponse, ToolCall};
    use crate::tools::ToolDefinition;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct ScriptedBackend {
        responses: Mutex<VecDeque<Result<AiResponse, AiError>>>,
        tools_seen: Mutex<Vec<Vec<String>>>,
    }

    impl ScriptedBackend {
        fn new(responses: Vec<Result<AiResponse, AiError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: Mutex::new(responses.into()),
                tools_seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn complete(
            &self,
            _messages: Vec<Message>,
            _tool_history: Vec<ToolHistoryEntry>,
            tools: Vec<ToolDefinition>,
        ) -> Result<AiResponse, AiError> {
            self.tools_seen
                .lock()
                .unwrap()
                .push(tools.iter().map(|t| t.name.clone()).collect());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .expect("script exhausted")
        }
    }

    fn handoff_to(target: AgentName) -> AiResponse {
        AiResponse {
            content: String::new(),
            tool_calls: vec![ToolCall {
                id: "call_1".to_string(),
                name: format!("transfer_to_{}", target),
                arguments: json!({}),
            }],
            stop_reason: Some("tool_use".to_string()),
        }
    }

    #[tokio::test]
    async fn direct_answer_leaves_active_agent_unchanged() {
        let backend = ScriptedBackend::new(vec![Ok(AiResponse::text("an explanation"))]);
        let router = SwarmRouter::new(backend);
        let state = SwarmState::new("doc text");

        let (next, reply) = router.advance(&state, "what is this about?").await.unwrap();

        assert_eq!(next.active, AgentName::Explainer);
        assert_eq!(reply.agent, AgentName::Explainer);
        assert_eq!(reply.answer, "an explanation");
        assert!(reply.handoffs.is_empty());
        // One user entry and one assistant entry per turn
        assert_eq!(next.messages.len(), state.messages.len() + 2);
    }

    #[tokio::test]
    async fn single_handoff_moves_pointer_to_target() {
        let backend = ScriptedBackend::new(vec![
            Ok(handoff_to(AgentName::Developer)),
            Ok(AiResponse::text("fn main() {}")),
        ]);
        let router = SwarmRouter::new(backend.clone());
        let state = SwarmState::new("doc text");

        let (next, reply) = router.advance(&state, "show me code").await.unwrap();

        assert_eq!(next.active, AgentName::Developer);
        assert_eq!(reply.agent, AgentName::Developer);
        assert_eq!(reply.handoffs.len(), 1);
        assert_eq!(reply.handoffs[0].from, AgentName::Explainer);
        assert_eq!(reply.handoffs[0].to, AgentName::Developer);
        // Only the developer's answer lands in the history
        assert_eq!(next.messages.len(), state.messages.len() + 2);

        // The second model call offered the developer's tools, which never
        // include a self-transfer
        let tools_seen = backend.tools_seen.lock().unwrap();
        assert_eq!(tools_seen.len(), 2);
        assert!(!tools_seen[1].contains(&"transfer_to_developer".to_string()));
        assert!(tools_seen[1].contains(&"transfer_to_explainer".to_string()));
    }

    #[tokio::test]
    async fn handoff_cycle_terminates_with_error() {
        // Two agents bouncing the request back and forth forever
        let mut script = Vec::new();
        for _ in 0..4 {
            script.push(Ok(handoff_to(AgentName::Developer)));
            script.push(Ok(handoff_to(AgentName::Explainer)));
        }
        let backend = ScriptedBackend::new(script);
        let router = SwarmRouter::new(backend);
        let state = SwarmState::new("doc text");

        let err = router.advance(&state, "who answers?").await.unwrap_err();
        assert!(matches!(err, SwarmError::HandoffLimitExceeded(_)));
        // Input state is untouched by the failed turn
        assert_eq!(state.active, AgentName::Explainer);
        assert_eq!(state.messages.len(), 1);
    }

    #[tokio::test]
    async fn model_failure_surfaces_without_touching_state() {
        let backend =
            ScriptedBackend::new(vec![Err(AiError::Api("quota exceeded".to_string()))]);
        let router = SwarmRouter::new(backend);
        let state = SwarmState::new("doc text");

        let err = router.advance(&state, "hello").await.unwrap_err();
        assert!(matches!(err, SwarmError::Ai(_)));
        assert_eq!(state.active, AgentName::Explainer);
        assert_eq!(state.messages.len(), 1);
    }

    #[tokio::test]
    async fn unknown_tool_call_reinvokes_same_agent() {
        let weird_call = AiResponse {
            content: String::new(),
            tool_calls: vec![ToolCall {
                id: "call_9".to_string(),
                name: "make_coffee".to_string(),
                arguments: json!({}),
            }],
            stop_reason: Some("tool_use".to_string()),
        };
        let backend = ScriptedBackend::new(vec![
            Ok(weird_call),
            Ok(AiResponse::text("back on track")),
        ]);
        let router = SwarmRouter::new(backend);
        let state = SwarmState::new("doc text");

        let (next, reply) = router.advance(&state, "hm").await.unwrap();
        assert_eq!(reply.agent, AgentName::Explainer);
        assert!(reply.handoffs.is_empty());
        assert_eq!(next.active, AgentName::Explainer);
    }
}
