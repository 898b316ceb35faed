//! # Ports
//!
//! Store contracts implemented by the adapters in `storage-adapters`.
//! Every mutating method is atomic: an adapter applies it completely under
//! one lock (or one transaction) and either succeeds or leaves state as it
//! was. Validation that belongs to the data itself (bid rules, threading)
//! runs inside the adapter through the domain types; permission checks and
//! input policy stay in the services.

use async_trait::async_trait;

use crate::errors::Result;
use crate::models::{
    AuctionBlock, Conversation, ConversationId, Engagement, EngagementStats, FeatureFlag,
    FollowOutcome, Message, Notification, Permissions, PermissionsPatch, Placement, Post, PostId,
    PostStatus, Section, SectionId, SectionPatch, SiteSettings, Supervisor, User, UserId, UserPatch,
};

/// Threaded post collection.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Every post in threaded display order.
    async fn list_threaded(&self) -> Result<Vec<Post>>;
    async fn get(&self, id: &PostId) -> Result<Option<Post>>;
    /// Direct replies, in arrival order.
    async fn replies(&self, id: &PostId) -> Result<Vec<Post>>;
    /// Inserts following the threading rules; bumps the parent's comment count.
    async fn insert(&self, post: Post) -> Result<Placement>;
    /// Removes a post (and its subtree when `cascade`). Returns removed ids.
    async fn remove(&self, id: &PostId, cascade: bool) -> Result<Vec<PostId>>;
    async fn toggle_status(&self, id: &PostId) -> Result<PostStatus>;
    async fn place_bid(&self, id: &PostId, amount: f64) -> Result<AuctionBlock>;
    /// Flips the actor's like/retweet and moves the counter with it.
    /// Returns whether the engagement is now on, plus the new counters.
    async fn toggle_engagement(
        &self,
        id: &PostId,
        actor: &UserId,
        kind: Engagement,
    ) -> Result<(bool, EngagementStats)>;
}

#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<User>>;
    async fn get(&self, id: &UserId) -> Result<Option<User>>;
    async fn update(&self, id: &UserId, patch: UserPatch) -> Result<User>;
    /// Returns the new banned flag.
    async fn toggle_ban(&self, id: &UserId) -> Result<bool>;
    /// Returns the new whatsapp-enabled flag.
    async fn toggle_whatsapp(&self, id: &UserId) -> Result<bool>;
    /// Flips `actor` following `target`, adjusting both counts together.
    async fn toggle_follow(&self, actor: &UserId, target: &UserId) -> Result<FollowOutcome>;
    async fn following(&self, actor: &UserId) -> Result<Vec<UserId>>;
}

#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait ConversationRepository: Send + Sync {
    /// Conversations involving `user`, most recently started first.
    async fn list_for(&self, user: &UserId) -> Result<Vec<Conversation>>;
    async fn get(&self, id: &ConversationId) -> Result<Option<Conversation>>;
    /// Returns the conversation for the unordered pair, creating it if needed.
    /// The flag is true when a new conversation was created.
    async fn find_or_create(&self, a: &UserId, b: &UserId) -> Result<(Conversation, bool)>;
    async fn append(&self, id: &ConversationId, message: Message) -> Result<Conversation>;
}

#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait NotificationRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Notification>>;
    /// Sets every read flag; returns how many were unread before.
    async fn mark_all_read(&self) -> Result<usize>;
}

#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait SupervisorRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Supervisor>>;
    async fn get(&self, user_id: &UserId) -> Result<Option<Supervisor>>;
    /// Adds with default-denied permissions. Idempotent: the flag is false
    /// when the user was already a supervisor.
    async fn add(&self, user_id: &UserId) -> Result<(Supervisor, bool)>;
    /// Returns whether an entry was removed.
    async fn remove(&self, user_id: &UserId) -> Result<bool>;
    async fn update_permissions(
        &self,
        user_id: &UserId,
        patch: PermissionsPatch,
    ) -> Result<Permissions>;
}

/// Site-wide settings and the ordered section list.
#[cfg_attr(feature = "testing", mockall::automock)]
#[async_trait]
pub trait SiteRepository: Send + Sync {
    async fn settings(&self) -> Result<SiteSettings>;
    async fn set_site_name(&self, name: String) -> Result<SiteSettings>;
    async fn set_logo_url(&self, url: Option<String>) -> Result<SiteSettings>;
    /// Returns the flag's new value.
    async fn toggle_flag(&self, flag: FeatureFlag) -> Result<bool>;
    async fn sections(&self) -> Result<Vec<Section>>;
    async fn add_section(&self, section: Section) -> Result<Section>;
    async fn update_section(&self, id: &SectionId, patch: SectionPatch) -> Result<Section>;
    async fn delete_section(&self, id: &SectionId) -> Result<bool>;
    /// Replaces the order; `ids` must be a permutation of the current ids.
    async fn reorder_sections(&self, ids: Vec<SectionId>) -> Result<Vec<Section>>;
    /// Clears every section binding that points at `user_id`; returns how many.
    async fn unbind_supervisor(&self, user_id: &UserId) -> Result<usize>;
}
