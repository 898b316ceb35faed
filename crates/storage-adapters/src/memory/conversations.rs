use async_trait::async_trait;
use domains::{
    Conversation, ConversationId, ConversationRepository, DomainError, Message, Result, UserId,
};
use tokio::sync::RwLock;

/// Conversations, most recently started first.
#[derive(Default)]
pub struct MemoryConversationRepository {
    conversations: RwLock<Vec<Conversation>>,
}

impl MemoryConversationRepository {
    pub fn new(conversations: Vec<Conversation>) -> Self {
        Self {
            conversations: RwLock::new(conversations),
        }
    }
}

#[async_trait]
impl ConversationRepository for MemoryConversationRepository {
    async fn list_for(&self, user: &UserId) -> Result<Vec<Conversation>> {
        let conversations = self.conversations.read().await;
        Ok(conversations
            .iter()
            .filter(|c| c.involves(user))
            .cloned()
            .collect())
    }

    async fn get(&self, id: &ConversationId) -> Result<Option<Conversation>> {
        let conversations = self.conversations.read().await;
        Ok(conversations.iter().find(|c| &c.id == id).cloned())
    }

    async fn find_or_create(&self, a: &UserId, b: &UserId) -> Result<(Conversation, bool)> {
        let mut conversations = self.conversations.write().await;
        if let Some(existing) = conversations.iter().find(|c| c.is_between(a, b)) {
            return Ok((existing.clone(), false));
        }
        let conversation = Conversation::between(a.clone(), b.clone());
        conversations.insert(0, conversation.clone());
        Ok((conversation, true))
    }

    async fn append(&self, id: &ConversationId, message: Message) -> Result<Conversation> {
        let mut conversations = self.conversations.write().await;
        let conversation = conversations
            .iter_mut()
            .find(|c| &c.id == id)
            .ok_or_else(|| DomainError::not_found("Conversation", id))?;
        conversation.messages.push(message);
        Ok(conversation.clone())
    }
}

#[cfg(test)]
mod tests {
    use crate::seed;

    use super::*;

    #[tokio::test]
    async fn find_or_create_is_idempotent_per_pair() {
        let repo = MemoryConversationRepository::new(seed::conversations());
        let me = UserId::from("currentUser");

        let (existing, created) = repo.find_or_create(&"1".into(), &me).await.unwrap();
        assert!(!created);
        assert_eq!(existing.id.as_str(), "conv1");

        let (fresh, created) = repo.find_or_create(&me, &"4".into()).await.unwrap();
        assert!(created);
        let (again, created) = repo.find_or_create(&"4".into(), &me).await.unwrap();
        assert!(!created);
        assert_eq!(fresh.id, again.id);

        let mine = repo.list_for(&me).await.unwrap();
        assert_eq!(mine.len(), 3);
        assert_eq!(mine[0].id, fresh.id);
    }
}
