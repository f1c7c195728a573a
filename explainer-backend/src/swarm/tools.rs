//! Handoff tools exposed to each agent
//!
//! Every agent sees one `transfer_to_<peer>` tool per peer agent (complete
//! graph minus the self-loop). Invoking one ends the caller's turn and makes
//! the target the active agent.

use super::types::AgentName;
use crate::tools::{PropertySchema, ToolDefinition, ToolInputSchema};
use std::collections::HashMap;

const TOOL_PREFIX: &str = "transfer_to_";

fn handoff_description(target: AgentName) -> String {
    let specialty = match target {
        AgentName::Developer => "code examples and technical implementations",
        AgentName::Summarizer => "concise summaries, key points, and TL;DR responses",
        AgentName::Explainer => {
            "detailed step-by-step breakdowns and educational explanations"
        }
        AgentName::AnalogyCreator => {
            "creating relatable analogies and metaphors for complex concepts"
        }
        AgentName::VulnerabilityExpert => {
            "analyzing potential weaknesses in arguments and methodology"
        }
    };
    format!(
        "Tool to hand control to the {} for {}.",
        target.label(),
        specialty
    )
}

/// Build the handoff tool targeting one agent
pub fn handoff_tool(target: AgentName) -> ToolDefinition {
    let mut properties = HashMap::new();
    properties.insert(
        "reason".to_string(),
        PropertySchema {
            schema_type: "string".to_string(),
            description: "Why this agent is better suited for the request".to_string(),
            default: None,
            enum_values: None,
        },
    );

    ToolDefinition {
        name: format!("{}{}", TOOL_PREFIX, target),
        description: handoff_description(target),
        input_schema: ToolInputSchema {
            schema_type: "object".to_string(),
            properties,
            required: vec![],
        },
    }
}

/// All handoff tools available to `agent` (one per peer)
pub fn handoff_tools_for(agent: AgentName) -> Vec<ToolDefinition> {
    agent.peers().into_iter().map(handoff_tool).collect()
}

/// Parse a tool name back into its handoff target, if it is one
pub fn parse_handoff(tool_name: &str) -> Option<AgentName> {
    tool_name
        .strip_prefix(TOOL_PREFIX)
        .and_then(AgentName::from_str)
}
