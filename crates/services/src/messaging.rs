//! Direct messages between two users.

use std::sync::Arc;

use chrono::format::{Item, StrftimeItems};
use chrono::Utc;
use domains::{
    Conversation, ConversationId, ConversationRepository, DomainError, Message, MessageId, Result,
    SiteRepository, UserId, UserRepository,
};
use tracing::{info, warn};

const FALLBACK_TIMESTAMP_FORMAT: &str = "%H:%M";

#[derive(Clone)]
pub struct MessagingService {
    conversations: Arc<dyn ConversationRepository>,
    users: Arc<dyn UserRepository>,
    site: Arc<dyn SiteRepository>,
    timestamp_format: String,
}

impl MessagingService {
    pub fn new(
        conversations: Arc<dyn ConversationRepository>,
        users: Arc<dyn UserRepository>,
        site: Arc<dyn SiteRepository>,
        timestamp_format: impl Into<String>,
    ) -> Self {
        let mut timestamp_format = timestamp_format.into();
        if StrftimeItems::new(&timestamp_format).any(|item| matches!(item, Item::Error)) {
            warn!(format = %timestamp_format, "invalid message timestamp format, using {FALLBACK_TIMESTAMP_FORMAT}");
            timestamp_format = FALLBACK_TIMESTAMP_FORMAT.into();
        }
        Self {
            conversations,
            users,
            site,
            timestamp_format,
        }
    }

    pub async fn conversations_for(&self, actor: &UserId) -> Result<Vec<Conversation>> {
        self.conversations.list_for(actor).await
    }

    pub async fn conversation_with(
        &self,
        actor: &UserId,
        counterpart: &UserId,
    ) -> Result<Option<Conversation>> {
        Ok(self
            .conversations
            .list_for(actor)
            .await?
            .into_iter()
            .find(|c| c.is_between(actor, counterpart)))
    }

    /// Returns the conversation between `actor` and `counterpart`, starting
    /// one when none exists. The flag reports whether it was created.
    pub async fn open_conversation(
        &self,
        actor: &UserId,
        counterpart: &UserId,
    ) -> Result<(Conversation, bool)> {
        self.ensure_enabled().await?;
        if actor == counterpart {
            return Err(DomainError::validation("cannot start a conversation with yourself"));
        }
        for id in [actor, counterpart] {
            if self.users.get(id).await?.is_none() {
                return Err(DomainError::not_found("User", id));
            }
        }

        let (conversation, created) = self.conversations.find_or_create(actor, counterpart).await?;
        if created {
            info!(conversation = %conversation.id, user = %actor, counterpart = %counterpart, "conversation started");
        }
        Ok((conversation, created))
    }

    pub async fn send_message(
        &self,
        actor: &UserId,
        conversation_id: &ConversationId,
        text: &str,
    ) -> Result<Message> {
        self.ensure_enabled().await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::validation("message text is required"));
        }
        let sender = self
            .users
            .get(actor)
            .await?
            .ok_or_else(|| DomainError::not_found("User", actor))?;
        if sender.is_banned {
            return Err(DomainError::forbidden(format!("{actor} is banned")));
        }
        let conversation = self
            .conversations
            .get(conversation_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Conversation", conversation_id))?;
        if !conversation.involves(actor) {
            return Err(DomainError::forbidden(format!(
                "{actor} is not part of conversation {conversation_id}"
            )));
        }

        let now = Utc::now();
        let message = Message {
            id: MessageId::generate(),
            sender_id: actor.clone(),
            text: text.to_string(),
            timestamp: now.format(&self.timestamp_format).to_string(),
            sent_at: now,
        };
        self.conversations.append(conversation_id, message.clone()).await?;
        info!(conversation = %conversation_id, sender = %actor, "message sent");
        Ok(message)
    }

    async fn ensure_enabled(&self) -> Result<()> {
        if self.site.settings().await?.flags.allow_messaging {
            Ok(())
        } else {
            Err(DomainError::validation("messaging is disabled"))
        }
    }
}
