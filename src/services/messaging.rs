//! Student/admin conversations and messages.
//!
//! A conversation is the single thread between one student and one admin;
//! it is created by the first message either side sends.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr, TransactionTrait,
};

use crate::db::DbConn;
use crate::error::{AppError, Result};
use crate::models::prelude::*;
use crate::models::role::Role;
use crate::models::{admin, conversation, message, student};
use crate::schemas::ConversationSummary;
use crate::services::accounts::find_account;

/// A message to deliver, already checked for shape by the caller
#[derive(Debug, Clone)]
pub struct OutgoingMessage {
    pub sender_id: i64,
    pub sender_role: Role,
    pub receiver_id: i64,
    pub content: String,
}

/// Store a message, opening the conversation if this is the first one
pub async fn send_message(
    db: &DbConn,
    outgoing: OutgoingMessage,
) -> Result<(conversation::Model, message::Model)> {
    let content = outgoing.content.trim().to_string();
    if content.is_empty() {
        return Err(AppError::Validation("content must not be empty".to_string()));
    }

    let receiver_role = outgoing.sender_role.counterpart();
    if find_account(db, outgoing.sender_role, outgoing.sender_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(format!(
            "Sender {} {} not found",
            outgoing.sender_role, outgoing.sender_id
        )));
    }
    if find_account(db, receiver_role, outgoing.receiver_id)
        .await?
        .is_none()
    {
        return Err(AppError::NotFound(format!(
            "Receiver {} {} not found",
            receiver_role, outgoing.receiver_id
        )));
    }

    let (student_id, admin_id) = match outgoing.sender_role {
        Role::Student => (outgoing.sender_id, outgoing.receiver_id),
        Role::Admin => (outgoing.receiver_id, outgoing.sender_id),
    };

    let txn = db.begin().await?;
    let conversation = find_or_open_conversation(&txn, student_id, admin_id).await?;

    let saved = message::ActiveModel {
        conversation_id: Set(conversation.id),
        sender_id: Set(outgoing.sender_id),
        sender_role: Set(outgoing.sender_role.as_str().to_string()),
        receiver_id: Set(outgoing.receiver_id),
        receiver_role: Set(receiver_role.as_str().to_string()),
        content: Set(content),
        is_read: Set(false),
        sent_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::debug!(
        "Message {} sent in conversation {} by {} {}",
        saved.id,
        conversation.id,
        outgoing.sender_role,
        outgoing.sender_id
    );

    Ok((conversation, saved))
}

async fn find_or_open_conversation(
    txn: &DatabaseTransaction,
    student_id: i64,
    admin_id: i64,
) -> Result<conversation::Model> {
    if let Some(existing) = find_conversation(txn, student_id, admin_id).await? {
        return Ok(existing);
    }
    open_conversation(txn, student_id, admin_id).await
}

/// Insert the conversation inside a savepoint, so losing the race on the
/// unique index leaves the outer transaction usable for the re-read.
async fn open_conversation(
    txn: &DatabaseTransaction,
    student_id: i64,
    admin_id: i64,
) -> Result<conversation::Model> {
    let savepoint = txn.begin().await?;
    let inserted = conversation::ActiveModel {
        student_id: Set(student_id),
        admin_id: Set(admin_id),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&savepoint)
    .await;

    match inserted {
        Ok(created) => {
            savepoint.commit().await?;
            Ok(created)
        }
        // Another request opened it first
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            savepoint.rollback().await?;
            find_conversation(txn, student_id, admin_id)
                .await?
                .ok_or(AppError::Database(e))
        }
        Err(e) => Err(e.into()),
    }
}

async fn find_conversation<C: ConnectionTrait>(
    db: &C,
    student_id: i64,
    admin_id: i64,
) -> Result<Option<conversation::Model>> {
    Ok(Conversation::find()
        .filter(conversation::Column::StudentId.eq(student_id))
        .filter(conversation::Column::AdminId.eq(admin_id))
        .one(db)
        .await?)
}

/// Conversations for one participant, most recent activity first
pub async fn list_conversations(
    db: &DbConn,
    role: Role,
    user_id: i64,
) -> Result<Vec<ConversationSummary>> {
    let participant = match role {
        Role::Student => conversation::Column::StudentId,
        Role::Admin => conversation::Column::AdminId,
    };
    let conversations = Conversation::find()
        .filter(participant.eq(user_id))
        .all(db)
        .await?;
    if conversations.is_empty() {
        return Ok(vec![]);
    }

    let counterpart_ids: Vec<i64> = conversations
        .iter()
        .map(|c| match role {
            Role::Student => c.admin_id,
            Role::Admin => c.student_id,
        })
        .collect();
    let names = counterpart_names(db, role.counterpart(), counterpart_ids).await?;

    let conversation_ids: Vec<i64> = conversations.iter().map(|c| c.id).collect();
    let mut latest: HashMap<i64, message::Model> = HashMap::new();
    let mut unread: HashMap<i64, u64> = HashMap::new();
    for m in Message::find()
        .filter(message::Column::ConversationId.is_in(conversation_ids))
        .order_by_asc(message::Column::SentAt)
        .order_by_asc(message::Column::Id)
        .all(db)
        .await?
    {
        if !m.is_read && m.receiver_id == user_id && m.receiver_role == role.as_str() {
            *unread.entry(m.conversation_id).or_default() += 1;
        }
        // Ascending order, so the last one seen wins
        latest.insert(m.conversation_id, m);
    }

    let mut summaries = Vec::with_capacity(conversations.len());
    for c in conversations {
        let last = latest.remove(&c.id);
        let counterpart_id = match role {
            Role::Student => c.admin_id,
            Role::Admin => c.student_id,
        };
        summaries.push(ConversationSummary {
            id: c.id,
            student_id: c.student_id,
            admin_id: c.admin_id,
            counterpart_id,
            counterpart_name: names.get(&counterpart_id).cloned(),
            last_message: last.as_ref().map(|m| m.content.clone()),
            last_message_at: last.map(|m| m.sent_at),
            unread_count: unread.get(&c.id).copied().unwrap_or(0),
            created_at: c.created_at,
        });
    }

    summaries.sort_by(|a, b| {
        let a_at = a.last_message_at.unwrap_or(a.created_at);
        let b_at = b.last_message_at.unwrap_or(b.created_at);
        b_at.cmp(&a_at).then(b.id.cmp(&a.id))
    });
    Ok(summaries)
}

async fn counterpart_names<C: ConnectionTrait>(
    db: &C,
    role: Role,
    ids: Vec<i64>,
) -> Result<HashMap<i64, String>> {
    let names = match role {
        Role::Student => Student::find()
            .filter(student::Column::Id.is_in(ids))
            .all(db)
            .await?
            .into_iter()
            .map(|s| (s.id, s.full_name))
            .collect(),
        Role::Admin => Admin::find()
            .filter(admin::Column::Id.is_in(ids))
            .all(db)
            .await?
            .into_iter()
            .map(|a| (a.id, a.full_name))
            .collect(),
    };
    Ok(names)
}

/// Messages in a conversation, oldest first
pub async fn list_messages(db: &DbConn, conversation_id: i64) -> Result<Vec<message::Model>> {
    Conversation::find_by_id(conversation_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Conversation not found".to_string()))?;

    Ok(Message::find()
        .filter(message::Column::ConversationId.eq(conversation_id))
        .order_by_asc(message::Column::SentAt)
        .order_by_asc(message::Column::Id)
        .all(db)
        .await?)
}

/// Mark every message addressed to the reader in a conversation as read.
/// Returns the number of messages that changed.
pub async fn mark_read(
    db: &DbConn,
    conversation_id: i64,
    reader_id: i64,
    reader_role: Role,
) -> Result<u64> {
    let conversation = Conversation::find_by_id(conversation_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Conversation not found".to_string()))?;

    let participant = match reader_role {
        Role::Student => conversation.student_id,
        Role::Admin => conversation.admin_id,
    };
    if participant != reader_id {
        return Err(AppError::Forbidden(
            "Reader is not part of this conversation".to_string(),
        ));
    }

    let result = Message::update_many()
        .col_expr(message::Column::IsRead, Expr::value(true))
        .filter(message::Column::ConversationId.eq(conversation_id))
        .filter(message::Column::ReceiverId.eq(reader_id))
        .filter(message::Column::ReceiverRole.eq(reader_role.as_str()))
        .filter(message::Column::IsRead.eq(false))
        .exec(db)
        .await?;

    Ok(result.rows_affected)
}
