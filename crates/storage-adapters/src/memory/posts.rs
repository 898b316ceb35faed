use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use domains::{
    AuctionBlock, Engagement, EngagementStats, Feed, Placement, Post, PostId, PostRepository,
    PostStatus, Result, UserId,
};
use tokio::sync::RwLock;

#[derive(Default)]
struct PostState {
    feed: Feed,
    /// Who currently likes / retweets each post.
    engagements: HashMap<(PostId, Engagement), HashSet<UserId>>,
}

/// In-memory [`PostRepository`] backed by a single [`Feed`].
#[derive(Default)]
pub struct MemoryPostRepository {
    state: RwLock<PostState>,
}

impl MemoryPostRepository {
    pub fn new(feed: Feed) -> Self {
        Self {
            state: RwLock::new(PostState {
                feed,
                engagements: HashMap::new(),
            }),
        }
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn list_threaded(&self) -> Result<Vec<Post>> {
        let state = self.state.read().await;
        Ok(state.feed.threaded().into_iter().cloned().collect())
    }

    async fn get(&self, id: &PostId) -> Result<Option<Post>> {
        Ok(self.state.read().await.feed.get(id).cloned())
    }

    async fn replies(&self, id: &PostId) -> Result<Vec<Post>> {
        let state = self.state.read().await;
        Ok(state.feed.replies(id).into_iter().cloned().collect())
    }

    async fn insert(&self, post: Post) -> Result<Placement> {
        Ok(self.state.write().await.feed.insert(post))
    }

    async fn remove(&self, id: &PostId, cascade: bool) -> Result<Vec<PostId>> {
        let mut state = self.state.write().await;
        let removed: Vec<PostId> = state
            .feed
            .remove(id, cascade)?
            .into_iter()
            .map(|p| p.id)
            .collect();
        state
            .engagements
            .retain(|(post_id, _), _| !removed.contains(post_id));
        Ok(removed)
    }

    async fn toggle_status(&self, id: &PostId) -> Result<PostStatus> {
        self.state.write().await.feed.toggle_status(id)
    }

    async fn place_bid(&self, id: &PostId, amount: f64) -> Result<AuctionBlock> {
        self.state.write().await.feed.place_bid(id, amount)
    }

    async fn toggle_engagement(
        &self,
        id: &PostId,
        actor: &UserId,
        kind: Engagement,
    ) -> Result<(bool, EngagementStats)> {
        let mut state = self.state.write().await;
        let key = (id.clone(), kind);
        let on = !state
            .engagements
            .get(&key)
            .is_some_and(|users| users.contains(actor));

        let stats = state
            .feed
            .adjust_engagement(id, kind, if on { 1 } else { -1 })?;

        let users = state.engagements.entry(key).or_default();
        if on {
            users.insert(actor.clone());
        } else {
            users.remove(actor);
        }
        Ok((on, stats))
    }
}
