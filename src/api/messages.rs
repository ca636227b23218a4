//! Internal messaging endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::message::{CreateMessage, Message, UnreadCountResponse},
};

use super::AuthenticatedUser;

/// Send a message
#[utoipa::path(
    post,
    path = "/messages",
    tag = "messages",
    security(("bearer_auth" = [])),
    request_body = CreateMessage,
    responses(
        (status = 201, description = "Message sent", body = Message),
        (status = 400, description = "No or unknown recipients")
    )
)]
pub async fn send_message(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateMessage>,
) -> AppResult<(StatusCode, Json<Message>)> {
    let message = state.services.messages.send(&data, claims.user_id).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

/// Messages received by the caller
#[utoipa::path(
    get,
    path = "/messages/inbox",
    tag = "messages",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Inbox", body = Vec<Message>)
    )
)]
pub async fn inbox(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Message>>> {
    let messages = state.services.messages.inbox(claims.user_id).await?;
    Ok(Json(messages))
}

/// Messages sent by the caller
#[utoipa::path(
    get,
    path = "/messages/sent",
    tag = "messages",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Sent messages", body = Vec<Message>)
    )
)]
pub async fn sent(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Message>>> {
    let messages = state.services.messages.sent(claims.user_id).await?;
    Ok(Json(messages))
}

/// Number of unread messages in the caller's inbox
#[utoipa::path(
    get,
    path = "/messages/unread-count",
    tag = "messages",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Unread count", body = UnreadCountResponse)
    )
)]
pub async fn unread_count(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<UnreadCountResponse>> {
    let unread = state.services.messages.unread_count(claims.user_id).await?;
    Ok(Json(UnreadCountResponse { unread }))
}

/// Get a message (sender or recipients only)
#[utoipa::path(
    get,
    path = "/messages/{id}",
    tag = "messages",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Message", body = Message),
        (status = 403, description = "Not a participant")
    )
)]
pub async fn get_message(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Message>> {
    let message = state.services.messages.get(id, claims.user_id).await?;
    Ok(Json(message))
}

/// Mark a message as read by the caller
#[utoipa::path(
    post,
    path = "/messages/{id}/read",
    tag = "messages",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Message marked as read", body = Message),
        (status = 403, description = "Not a recipient")
    )
)]
pub async fn mark_read(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Message>> {
    let message = state.services.messages.mark_read(id, claims.user_id).await?;
    Ok(Json(message))
}

/// Delete a message (sender only)
#[utoipa::path(
    delete,
    path = "/messages/{id}",
    tag = "messages",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Message ID")),
    responses(
        (status = 204, description = "Message deleted"),
        (status = 403, description = "Not the sender")
    )
)]
pub async fn delete_message(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    state.services.messages.delete(id, claims.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
