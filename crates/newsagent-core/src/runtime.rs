//! Tool-calling loop: drives one conversational turn.
//!
//! Implements the think → act → observe cycle:
//! 1. Send system prompt + working history + tool definitions to the LLM (think)
//! 2. If the LLM returns tool calls, dispatch them in order (act)
//! 3. Append one tool result per call to the working history (observe)
//! 4. Loop back to step 1, at most `max_rounds` times
//! 5. If the LLM returns text only, that is the answer
//!
//! All work happens on a scratch copy of the history. The caller commits
//! [`TurnOutcome::history`] only when [`TurnRunner::run`] returns `Ok`.

use chrono::Utc;
use newsagent_types::{
    Result,
    config::AgentConfig,
    item::{LedgerItem, ToolCallRecord},
    message::{Message, Role, ToolCallRequest},
};
use crate::ports::*;
use crate::tools::{ToolArgs, ToolContext, ToolRegistry};

/// What a finished turn hands back to the agent
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// Final assistant text, or the configured fallback
    pub answer: String,
    /// Cards and tool-call records in the order they were produced
    pub items: Vec<LedgerItem>,
    /// Working history to persist (untrimmed)
    pub history: Vec<Message>,
    /// Model invocations performed
    pub rounds: usize,
    /// True when the round bound ran out before a final answer
    pub exhausted: bool,
}

pub struct TurnRunner<'a> {
    config: &'a AgentConfig,
    tools: &'a ToolRegistry,
}

impl<'a> TurnRunner<'a> {
    pub fn new(config: &'a AgentConfig, tools: &'a ToolRegistry) -> Self {
        Self { config, tools }
    }

    /// Run one turn starting from `history`, which should already end with
    /// the user's message.
    ///
    /// A model failure aborts the turn with its error; nothing produced so far
    /// is returned. Tool failures are recorded on their own items and the loop
    /// carries on so the model can react to them.
    pub async fn run(
        &self,
        history: &[Message],
        llm: &dyn LlmPort,
        graph: &dyn QueryPort,
    ) -> Result<TurnOutcome> {
        let mut working = history.to_vec();
        let mut items = Vec::new();
        let definitions = self.tools.definitions();
        let max_rounds = self.config.tool_loop.max_rounds;
        let mut ctx = ToolContext::new(graph, llm, &self.config.llm);

        for round in 1..=max_rounds {
            // Think: call the LLM
            let mut messages = Vec::with_capacity(working.len() + 1);
            messages.push(Message::system(self.config.render_system_prompt(Utc::now())));
            messages.extend(working.iter().cloned());

            let req = ChatRequest {
                messages,
                tools: definitions.clone(),
                tool_choice: ToolChoice::Auto,
                model: self.config.llm.model.clone(),
                max_tokens: self.config.llm.max_tokens,
                temperature: self.config.llm.temperature,
            };

            let response = llm.chat_completion(req).await.map_err(|e| {
                log::warn!("Model invocation failed in round {}: {}", round, e);
                e
            })?;

            let mut reply = response.message;
            reply.role = Role::Assistant;
            let calls = reply.tool_calls.clone();
            let text = reply.content.clone();
            working.push(reply);

            if calls.is_empty() {
                log::debug!("Turn answered after {} round(s)", round);
                return Ok(TurnOutcome {
                    answer: text,
                    items,
                    history: working,
                    rounds: round,
                    exhausted: false,
                });
            }

            log::debug!("Round {}: model requested {} tool call(s)", round, calls.len());

            // Act + observe, strictly in the order the model asked
            for call in &calls {
                let (record, tool_msg) = self.execute_tool(call, &mut ctx).await?;
                items.extend(ctx.take_cards().into_iter().map(LedgerItem::card));
                items.push(LedgerItem::tool_call(record));
                working.push(tool_msg);
            }
        }

        log::warn!(
            "Tool loop reached {} round(s) without a final answer, using fallback",
            max_rounds
        );
        Ok(TurnOutcome {
            answer: self.config.tool_loop.fallback_answer.clone(),
            items,
            history: working,
            rounds: max_rounds,
            exhausted: true,
        })
    }

    /// Dispatch a single call and settle its record.
    ///
    /// Only errors that are not tool-local escape as `Err`.
    async fn execute_tool(
        &self,
        call: &ToolCallRequest,
        ctx: &mut ToolContext<'_>,
    ) -> Result<(ToolCallRecord, Message)> {
        let name = call.function.name.as_str();
        let args = ToolArgs::parse(&call.function.arguments);
        let record = ToolCallRecord::executing(&call.id, name, args.as_map().clone());

        match self.tools.dispatch(name, &args, ctx).await {
            Ok(result) => {
                let content = result.to_string();
                Ok((record.complete(result), Message::tool_result(&call.id, content)))
            }
            Err(e) if e.is_tool_local() => {
                log::warn!("Tool {} ({}) failed: {}", name, call.id, e);
                let content = format!("Error: {}", e);
                Ok((record.fail(e.to_string()), Message::tool_result(&call.id, content)))
            }
            Err(e) => {
                log::warn!("Tool {} ({}) aborted the turn: {}", name, call.id, e);
                Err(e)
            }
        }
    }
}
