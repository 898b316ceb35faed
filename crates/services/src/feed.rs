//! # FeedService
//!
//! Composing, threading, moderating and bidding on posts.

use std::sync::Arc;

use chrono::Utc;
use domains::{
    AuctionBlock, DomainError, Engagement, EngagementStats, NewPost, Permission, Placement, Post,
    PostId, PostRepository, PostStatus, Result, SiteRepository, User, UserId, UserRepository,
};
use tracing::{debug, info, warn};

use crate::access::AccessControl;

/// Feed rules that come from configuration.
#[derive(Debug, Clone)]
pub struct FeedPolicy {
    pub auction_category: String,
    pub home_category: String,
    pub max_post_length: usize,
    pub strict_reply_parent: bool,
    pub cascade_reply_deletes: bool,
}

impl Default for FeedPolicy {
    fn default() -> Self {
        Self {
            auction_category: "Auctions".into(),
            home_category: "General".into(),
            max_post_length: 1000,
            strict_reply_parent: false,
            cascade_reply_deletes: false,
        }
    }
}

#[derive(Clone)]
pub struct FeedService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
    site: Arc<dyn SiteRepository>,
    access: AccessControl,
    policy: FeedPolicy,
}

impl FeedService {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        users: Arc<dyn UserRepository>,
        site: Arc<dyn SiteRepository>,
        access: AccessControl,
        policy: FeedPolicy,
    ) -> Self {
        Self {
            posts,
            users,
            site,
            access,
            policy,
        }
    }

    pub fn policy(&self) -> &FeedPolicy {
        &self.policy
    }

    /// The threaded feed. `category` narrows it to one section; the home
    /// category also matches uncategorised posts.
    pub async fn feed(&self, category: Option<&str>) -> Result<Vec<Post>> {
        let posts = self.posts.list_threaded().await?;
        let Some(category) = category else {
            return Ok(posts);
        };
        let home = category == self.policy.home_category;
        Ok(posts
            .into_iter()
            .filter(|p| match p.category.as_deref() {
                Some(c) => c == category,
                None => home,
            })
            .collect())
    }

    /// A post and its direct replies.
    pub async fn thread(&self, id: &PostId) -> Result<(Post, Vec<Post>)> {
        let post = self.require_post(id).await?;
        let replies = self.posts.replies(id).await?;
        debug!(post_id = %id, replies = replies.len(), "loaded thread");
        Ok((post, replies))
    }

    pub async fn posts_by(&self, author: &UserId) -> Result<Vec<Post>> {
        self.require_user(author).await?;
        Ok(self
            .posts
            .list_threaded()
            .await?
            .into_iter()
            .filter(|p| &p.author_id == author)
            .collect())
    }

    /// Composes a post or a reply on behalf of `actor`.
    pub async fn create_post(&self, actor: &UserId, new: NewPost) -> Result<(Post, Placement)> {
        let author = self.require_active_user(actor).await?;

        let content = new.content.trim();
        if content.is_empty() {
            return Err(DomainError::validation("post content is required"));
        }
        if content.chars().count() > self.policy.max_post_length {
            return Err(DomainError::validation(format!(
                "post content exceeds {} characters",
                self.policy.max_post_length
            )));
        }

        let settings = self.site.settings().await?;
        if !new.image_urls.is_empty() && !settings.flags.allow_image_upload {
            return Err(DomainError::validation("image uploads are disabled"));
        }
        if new.video_url.is_some() && !settings.flags.allow_video_upload {
            return Err(DomainError::validation("video uploads are disabled"));
        }

        let mut replying_to = None;
        let mut inherited_category = None;
        if let Some(parent_id) = &new.parent_id {
            match self.posts.get(parent_id).await? {
                Some(parent) => {
                    if !parent.is_active() {
                        return Err(DomainError::validation(format!(
                            "post {parent_id} is inactive and cannot be replied to"
                        )));
                    }
                    replying_to = self.users.get(&parent.author_id).await?.map(|u| u.handle);
                    inherited_category = parent.category;
                }
                None if self.policy.strict_reply_parent => {
                    return Err(DomainError::not_found("Post", parent_id));
                }
                None => {
                    warn!(author = %actor, parent_id = %parent_id, "reply target missing, posting top-level");
                }
            }
        }

        // An inherited category is kept even if its section has since gone.
        let category = match (new.category, inherited_category) {
            (Some(category), _) => {
                self.check_category(&category).await?;
                category
            }
            (None, Some(inherited)) => inherited,
            (None, None) => self.policy.home_category.clone(),
        };

        let auction = match new.auction {
            Some(terms) => {
                if new.parent_id.is_some() {
                    return Err(DomainError::validation("replies cannot be auctions"));
                }
                if category != self.policy.auction_category {
                    return Err(DomainError::validation(format!(
                        "auction terms are only accepted in {:?}",
                        self.policy.auction_category
                    )));
                }
                if !terms.starting_price.is_finite() || terms.starting_price <= 0.0 {
                    return Err(DomainError::validation("starting price must be positive"));
                }
                let days = terms.duration_days.unwrap_or(1);
                if days == 0 {
                    return Err(DomainError::validation("auction must last at least one day"));
                }
                Some(AuctionBlock::open(terms.starting_price, days))
            }
            None => None,
        };

        let post = Post {
            id: PostId::generate(),
            author_id: author.id,
            content: content.to_string(),
            image_urls: new.image_urls,
            video_url: new.video_url,
            stats: EngagementStats::default(),
            status: PostStatus::Active,
            category: Some(category),
            parent_id: new.parent_id,
            replying_to,
            auction,
            created_at: Utc::now(),
        };

        let placement = self.posts.insert(post.clone()).await?;
        info!(post_id = %post.id, author = %actor, ?placement, "post created");
        Ok((post, placement))
    }

    pub async fn delete_post(&self, actor: &UserId, id: &PostId) -> Result<Vec<PostId>> {
        let post = self.require_post(id).await?;
        self.access
            .require_moderation(actor, Permission::DeletePost, &post.author_id)
            .await?;

        let removed = self.posts.remove(id, self.policy.cascade_reply_deletes).await?;
        info!(post_id = %id, moderator = %actor, removed = removed.len(), "post deleted");
        Ok(removed)
    }

    pub async fn toggle_status(&self, actor: &UserId, id: &PostId) -> Result<PostStatus> {
        let post = self.require_post(id).await?;
        self.access
            .require_moderation(actor, Permission::ToggleStatus, &post.author_id)
            .await?;

        let status = self.posts.toggle_status(id).await?;
        info!(post_id = %id, moderator = %actor, ?status, "post status toggled");
        Ok(status)
    }

    pub async fn place_bid(&self, actor: &UserId, id: &PostId, amount: f64) -> Result<AuctionBlock> {
        self.require_active_user(actor).await?;
        match self.posts.place_bid(id, amount).await {
            Ok(block) => {
                info!(post_id = %id, bidder = %actor, amount, bids = block.bid_count, "bid accepted");
                Ok(block)
            }
            Err(e) => {
                warn!(post_id = %id, bidder = %actor, amount, error = %e, "bid refused");
                Err(e)
            }
        }
    }

    pub async fn toggle_engagement(
        &self,
        actor: &UserId,
        id: &PostId,
        kind: Engagement,
    ) -> Result<(bool, EngagementStats)> {
        self.require_active_user(actor).await?;
        let (on, stats) = self.posts.toggle_engagement(id, actor, kind).await?;
        debug!(post_id = %id, user = %actor, ?kind, on, "engagement toggled");
        Ok((on, stats))
    }

    async fn check_category(&self, category: &str) -> Result<()> {
        if category == self.policy.home_category {
            return Ok(());
        }
        let sections = self.site.sections().await?;
        if sections.iter().any(|s| s.name == category) {
            Ok(())
        } else {
            Err(DomainError::validation(format!("unknown category {category:?}")))
        }
    }

    async fn require_post(&self, id: &PostId) -> Result<Post> {
        self.posts
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Post", id))
    }

    async fn require_user(&self, id: &UserId) -> Result<User> {
        self.users
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    async fn require_active_user(&self, id: &UserId) -> Result<User> {
        let user = self.require_user(id).await?;
        if user.is_banned {
            return Err(DomainError::forbidden(format!("{id} is banned")));
        }
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use domains::{
        ContactVisibility, FeatureFlags, Gender, MockPostRepository, MockSiteRepository,
        MockSupervisorRepository, MockUserRepository, SiteSettings,
    };

    use super::*;

    fn user(id: &str, banned: bool) -> User {
        User {
            id: id.into(),
            name: id.into(),
            handle: format!("@{id}"),
            avatar: String::new(),
            banner: None,
            bio: None,
            location: None,
            gender: Gender::Female,
            phone: String::new(),
            join_date: None,
            is_banned: banned,
            contact: ContactVisibility::default(),
            followers: 0,
            following: 0,
        }
    }

    fn service(posts: MockPostRepository, users: MockUserRepository) -> FeedService {
        let mut site = MockSiteRepository::new();
        site.expect_settings().returning(|| {
            Ok(SiteSettings {
                site_name: "test".into(),
                logo_url: None,
                flags: FeatureFlags {
                    allow_video_upload: false,
                    ..FeatureFlags::default()
                },
            })
        });
        site.expect_sections().returning(|| Ok(vec![]));
        let mut supervisors = MockSupervisorRepository::new();
        supervisors.expect_get().returning(|_| Ok(None));
        FeedService::new(
            Arc::new(posts),
            Arc::new(users),
            Arc::new(site),
            AccessControl::new(Arc::new(supervisors), "admin".into()),
            FeedPolicy::default(),
        )
    }

    #[tokio::test]
    async fn blank_content_never_reaches_the_store() {
        let mut posts = MockPostRepository::new();
        posts.expect_insert().never();
        let mut users = MockUserRepository::new();
        users.expect_get().returning(|id| Ok(Some(user(id.as_str(), false))));

        let err = service(posts, users)
            .create_post(&"u".into(), NewPost { content: "   ".into(), ..NewPost::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn banned_authors_cannot_post() {
        let mut posts = MockPostRepository::new();
        posts.expect_insert().never();
        let mut users = MockUserRepository::new();
        users.expect_get().returning(|id| Ok(Some(user(id.as_str(), true))));

        let err = service(posts, users)
            .create_post(&"u".into(), NewPost { content: "hi".into(), ..NewPost::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn disabled_video_upload_is_rejected() {
        let mut posts = MockPostRepository::new();
        posts.expect_insert().never();
        let mut users = MockUserRepository::new();
        users.expect_get().returning(|id| Ok(Some(user(id.as_str(), false))));

        let err = service(posts, users)
            .create_post(
                &"u".into(),
                NewPost {
                    content: "clip".into(),
                    video_url: Some("https://example.com/v".into()),
                    ..NewPost::default()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::validation("video uploads are disabled"));
    }

    #[tokio::test]
    async fn non_supervisor_delete_is_forbidden_before_removal() {
        let mut posts = MockPostRepository::new();
        posts.expect_get().returning(|id| {
            Ok(Some(Post {
                id: id.clone(),
                author_id: "author".into(),
                content: "x".into(),
                image_urls: vec![],
                video_url: None,
                stats: EngagementStats::default(),
                status: PostStatus::Active,
                category: None,
                parent_id: None,
                replying_to: None,
                auction: None,
                created_at: Utc::now(),
            }))
        });
        posts.expect_remove().never();

        let err = service(posts, MockUserRepository::new())
            .delete_post(&"stranger".into(), &"p".into())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[tokio::test]
    async fn home_category_includes_uncategorised_posts() {
        let mut posts = MockPostRepository::new();
        posts.expect_list_threaded().returning(|| {
            let base = Post {
                id: "a".into(),
                author_id: "u".into(),
                content: "x".into(),
                image_urls: vec![],
                video_url: None,
                stats: EngagementStats::default(),
                status: PostStatus::Active,
                category: None,
                parent_id: None,
                replying_to: None,
                auction: None,
                created_at: Utc::now(),
            };
            let general = Post { id: "b".into(), category: Some("General".into()), ..base.clone() };
            let cars = Post { id: "c".into(), category: Some("Cars".into()), ..base.clone() };
            Ok(vec![base, general, cars])
        });
        let feed = service(posts, MockUserRepository::new());

        let home: Vec<_> = feed.feed(Some("General")).await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(home, vec![PostId::from("a"), PostId::from("b")]);
        let cars = feed.feed(Some("Cars")).await.unwrap();
        assert_eq!(cars.len(), 1);
        assert_eq!(feed.feed(None).await.unwrap().len(), 3);
    }
}
