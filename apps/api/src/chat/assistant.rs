//! Conversation assembly for the chat assistant.
//!
//! The model sees at most `MAX_TURNS` turns, always starting with a user turn
//! and ending with the question being asked.

use tracing::warn;

use crate::chat::prompts::ASSISTANT_SYSTEM;
use crate::errors::AppError;
use crate::llm_client::{ChatTurn, Role, TextGenerator};
use crate::models::chat::ChatLogRow;

pub const MAX_TURNS: usize = 50;

/// Rebuilds turns from stored log rows. Rows with an unknown role are skipped.
pub fn history_turns(rows: Vec<ChatLogRow>) -> Vec<ChatTurn> {
    rows.into_iter()
        .filter_map(|row| {
            let role = match row.role.as_str() {
                "user" => Role::User,
                "assistant" => Role::Assistant,
                other => {
                    warn!("Skipping chat log {} with role {other:?}", row.id);
                    return None;
                }
            };
            Some(ChatTurn {
                role,
                content: row.content,
            })
        })
        .collect()
}

/// Validates and bounds a conversation before it goes to the model.
///
/// Blank turns are dropped and consecutive turns from the same side are
/// joined. The final turn must be a user turn.
pub fn prepare_conversation(turns: Vec<ChatTurn>) -> Result<Vec<ChatTurn>, AppError> {
    let mut merged: Vec<ChatTurn> = Vec::with_capacity(turns.len());
    for turn in turns {
        let content = turn.content.trim();
        if content.is_empty() {
            continue;
        }
        match merged.last_mut() {
            Some(last) if last.role == turn.role => {
                last.content.push_str("\n\n");
                last.content.push_str(content);
            }
            _ => merged.push(ChatTurn {
                role: turn.role,
                content: content.to_string(),
            }),
        }
    }

    match merged.last() {
        None => return Err(AppError::Validation("Message is required".to_string())),
        Some(last) if last.role != Role::User => {
            return Err(AppError::Validation(
                "The last message must come from the user".to_string(),
            ))
        }
        Some(_) => {}
    }

    let mut start = merged.len().saturating_sub(MAX_TURNS);
    while merged[start].role != Role::User {
        start += 1;
    }
    Ok(merged.split_off(start))
}

/// Asks the model for the next assistant reply.
pub async fn reply(llm: &dyn TextGenerator, turns: &[ChatTurn]) -> Result<String, AppError> {
    let text = llm
        .chat(ASSISTANT_SYSTEM, turns)
        .await
        .map_err(|e| AppError::Llm(format!("Chat reply failed: {e}")))?;
    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::Llm("Chat reply was empty".to_string()));
    }
    Ok(text.to_string())
}
