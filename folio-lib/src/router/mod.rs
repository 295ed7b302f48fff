//! LLM-driven tool routing
//!
//! Sends free-text user input to a hosted chat model, asks it for a JSON
//! plan naming which registered tools to invoke, then dispatches each
//! named tool. Unknown tool names are reported as warnings, never errors;
//! a malformed plan is an error carrying the raw model response.
//!
//! ```text
//! AwaitingInput -> PlanRequested -> Dispatched
//!                        |
//!                      Error
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use folio_lib::router::{api_key_from_env, ChatClient, ToolRouter};
//!
//! let key = api_key_from_env("OPENAI_API_KEY")?;
//! let client = ChatClient::new(key, "gpt-4o".to_string())?;
//! let mut router = ToolRouter::with_default_tools(client);
//!
//! let (plan, outcomes) = router.run("show me the rust-lang/rust repo")?;
//! ```

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::{Error, Result};

mod llm;
mod tools;

pub use llm::*;
pub use tools::*;

/// Sampling temperature for the planning request
const PLAN_TEMPERATURE: f32 = 0.3;

/// Lifecycle of a single routed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterState {
    /// No request in flight
    AwaitingInput,
    /// A plan has been requested from the chat model
    PlanRequested,
    /// The plan was dispatched to its tools
    Dispatched,
    /// Planning or parsing failed
    Error,
}

/// The plan returned by the chat model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolPlan {
    /// Tools to invoke, in order. May be empty.
    pub tools_to_call: Vec<ToolCall>,
}

/// A single tool invocation named by the plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolCall {
    /// Registered tool name
    pub name: String,
    /// Free-form tool argument (e.g. an `owner/repo` slug)
    #[serde(default)]
    pub args: Option<String>,
}

/// Result of dispatching one planned tool call.
#[derive(Debug)]
pub enum ToolOutcome {
    /// The tool ran and produced a JSON payload
    Success { tool: String, payload: Value },
    /// The tool was registered but its handler failed
    Failed { tool: String, error: String },
    /// The plan named a tool that is not registered
    Unknown { tool: String },
}

/// Handler invoked when the plan names a registered tool.
pub type ToolHandler = Box<dyn Fn(Option<&str>) -> Result<Value> + Send + Sync>;

struct Tool {
    description: String,
    handler: ToolHandler,
}

/// Registry of named tools with their planning descriptions.
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Tool>,
}

impl ToolRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool under `name`.
    ///
    /// The description is shown to the planning model, so it should say
    /// when the tool applies.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        handler: ToolHandler,
    ) {
        self.tools.insert(
            name.into(),
            Tool {
                description: description.into(),
                handler,
            },
        );
    }

    /// One `- name: description` line per registered tool.
    fn descriptions(&self) -> String {
        self.tools
            .iter()
            .map(|(name, tool)| format!("- {name}: {}", tool.description))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Dispatch every call in the plan, in order.
    ///
    /// Unknown tool names are logged and reported as
    /// [`ToolOutcome::Unknown`]; handler failures become
    /// [`ToolOutcome::Failed`]. Dispatch itself never fails.
    pub fn dispatch(&self, plan: &ToolPlan) -> Vec<ToolOutcome> {
        plan.tools_to_call
            .iter()
            .map(|call| match self.tools.get(&call.name) {
                Some(tool) => match (tool.handler)(call.args.as_deref()) {
                    Ok(payload) => ToolOutcome::Success {
                        tool: call.name.clone(),
                        payload,
                    },
                    Err(e) => ToolOutcome::Failed {
                        tool: call.name.clone(),
                        error: e.to_string(),
                    },
                },
                None => {
                    warn!(tool = %call.name, "plan named an unregistered tool");
                    ToolOutcome::Unknown {
                        tool: call.name.clone(),
                    }
                }
            })
            .collect()
    }
}

/// Tool router: plans with a chat model, dispatches to registered tools.
pub struct ToolRouter {
    client: ChatClient,
    registry: ToolRegistry,
    state: RouterState,
}

impl ToolRouter {
    /// Create a router over an explicit registry.
    #[must_use]
    pub fn new(client: ChatClient, registry: ToolRegistry) -> Self {
        Self {
            client,
            registry,
            state: RouterState::AwaitingInput,
        }
    }

    /// Create a router with the two built-in tools registered:
    /// `github` (repository metadata) and `rest` (placeholder posts).
    pub fn with_default_tools(client: ChatClient) -> Self {
        let mut registry = ToolRegistry::new();
        registry.register(
            "github",
            "for anything related to repositories",
            Box::new(github_repo_info),
        );
        registry.register(
            "rest",
            "for fetching placeholder posts",
            Box::new(placeholder_posts),
        );
        Self::new(client, registry)
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> RouterState {
        self.state
    }

    /// Ask the chat model for a tool plan for `user_input`.
    pub fn plan(&mut self, user_input: &str) -> Result<ToolPlan> {
        self.state = RouterState::PlanRequested;

        let prompt = planning_prompt(&self.registry.descriptions(), user_input);
        let response = self
            .client
            .complete_json(&prompt, PLAN_TEMPERATURE)
            .inspect_err(|_| self.state = RouterState::Error)?;

        parse_plan(&response).inspect_err(|_| self.state = RouterState::Error)
    }

    /// Dispatch an already-obtained plan.
    pub fn dispatch(&mut self, plan: &ToolPlan) -> Vec<ToolOutcome> {
        let outcomes = self.registry.dispatch(plan);
        self.state = RouterState::Dispatched;
        outcomes
    }

    /// Full cycle: plan for `user_input`, then dispatch the plan.
    pub fn run(&mut self, user_input: &str) -> Result<(ToolPlan, Vec<ToolOutcome>)> {
        let plan = self.plan(user_input)?;
        let outcomes = self.dispatch(&plan);
        Ok((plan, outcomes))
    }
}

fn planning_prompt(tool_descriptions: &str, user_input: &str) -> String {
    format!(
        r#"You are an AI that receives a user input and decides which tools to call.

Tools:
{tool_descriptions}

User input: "{user_input}"

Respond in JSON like:
{{"tools_to_call": [{{"name": "github", "args": "rust-lang/rust"}}]}}"#
    )
}

/// Parse a model response into a [`ToolPlan`].
///
/// Malformed JSON or a missing `tools_to_call` key is an error carrying
/// the raw response for display.
pub fn parse_plan(response: &str) -> Result<ToolPlan> {
    serde_json::from_str(response).map_err(|e| {
        Error::Router(format!(
            "failed to parse tool plan: {e}\nResponse: {response}"
        ))
    })
}

/// Read an API key from the environment, prompting on stdin if unset.
pub fn api_key_from_env(var: &str) -> Result<String> {
    if let Ok(key) = std::env::var(var) {
        if !key.trim().is_empty() {
            return Ok(key);
        }
    }

    print!("Enter your {var}: ");
    io::stdout()
        .flush()
        .map_err(|e| Error::Router(e.to_string()))?;

    let mut key = String::new();
    io::stdin()
        .lock()
        .read_line(&mut key)
        .map_err(|e| Error::Router(e.to_string()))?;

    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(Error::InvalidInput(format!("no {var} provided")));
    }
    Ok(key)
}
