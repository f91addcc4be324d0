//! Axum route handlers for the Chat API.

use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::chat::assistant::{history_turns, prepare_conversation, reply, MAX_TURNS};
use crate::errors::AppError;
use crate::llm_client::{ChatTurn, Role};
use crate::models::chat::ChatLogRow;
use crate::response::{success, ApiJson, ApiQuery, ApiResult, Items, UserScope};
use crate::state::AppState;

/// Either a full `messages` transcript, or a single `message` that is
/// appended to the user's stored history.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatTurn>,
    pub message: Option<String>,
    #[serde(alias = "userId")]
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

/// POST /api/v1/chat-assistant
pub async fn handle_chat(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ChatRequest>,
) -> ApiResult<ChatResponse> {
    let turns = match (request.messages.is_empty(), request.message) {
        (false, _) => request.messages,
        (true, Some(message)) => {
            let mut turns = match request.user_id {
                Some(user_id) => {
                    history_turns(state.store.recent_chat(user_id, MAX_TURNS).await?)
                }
                None => Vec::new(),
            };
            turns.push(ChatTurn {
                role: Role::User,
                content: message,
            });
            turns
        }
        (true, None) => return Err(AppError::Validation("Message is required".to_string())),
    };
    let turns = prepare_conversation(turns)?;

    let response = reply(state.llm.as_ref(), &turns).await?;

    if let Some(user_id) = request.user_id {
        // prepare_conversation guarantees a trailing user turn
        let mut exchange: Vec<ChatTurn> = turns.last().cloned().into_iter().collect();
        exchange.push(ChatTurn {
            role: Role::Assistant,
            content: response.clone(),
        });
        state.store.append_chat(user_id, &exchange).await?;
        info!("Chat exchange stored for user {user_id}");
    }

    success(ChatResponse { response })
}

/// GET /api/v1/chat/history?user_id=
pub async fn handle_chat_history(
    State(state): State<AppState>,
    ApiQuery(scope): ApiQuery<UserScope>,
) -> ApiResult<Items<ChatLogRow>> {
    let items = state.store.list_chat(scope.user_id).await?;
    success(Items { items })
}
