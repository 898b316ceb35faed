//! # Domain Models
//!
//! These structs represent the core entities of MAZADNET.
//! Identifiers are opaque strings: seed records carry readable ids
//! (`"auction-1"`, `"currentUser"`) while runtime records get UUID v4 text.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, Result};

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Fresh random identifier.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

string_id!(
    /// Identifies a post (top-level or reply).
    PostId
);
string_id!(UserId);
string_id!(ConversationId);
string_id!(MessageId);
string_id!(NotificationId);
string_id!(
    /// Identifies a commercial section (category) of the site.
    SectionId
);

// ── Posts ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    #[default]
    Active,
    Inactive,
}

impl PostStatus {
    pub fn toggled(self) -> Self {
        match self {
            Self::Active => Self::Inactive,
            Self::Inactive => Self::Active,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngagementStats {
    pub comments: u32,
    pub retweets: u32,
    pub likes: u32,
    pub views: u64,
}

/// Engagement kinds an actor can toggle on a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Engagement {
    Like,
    Retweet,
}

/// The bidding state attached to an auction post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionBlock {
    pub current_bid: f64,
    /// Human-readable label, e.g. "ends in 3 days".
    pub end_time: String,
    pub bid_count: u32,
}

impl AuctionBlock {
    pub fn open(starting_price: f64, duration_days: u32) -> Self {
        let unit = if duration_days == 1 { "day" } else { "days" };
        Self {
            current_bid: starting_price,
            end_time: format!("ends in {duration_days} {unit}"),
            bid_count: 0,
        }
    }

    /// Replaces the current bid and counts it, or leaves `self` untouched.
    pub fn place_bid(&mut self, amount: f64) -> Result<()> {
        if !amount.is_finite() || amount <= 0.0 || amount <= self.current_bid {
            return Err(DomainError::InvalidBid {
                current: self.current_bid,
                offered: amount,
            });
        }
        self.current_bid = amount;
        self.bid_count += 1;
        Ok(())
    }
}

/// The fundamental unit of the feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub author_id: UserId,
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_urls: Vec<String>,
    pub video_url: Option<String>,
    pub stats: EngagementStats,
    pub status: PostStatus,
    pub category: Option<String>,
    /// Set on replies. May dangle once the parent is deleted.
    pub parent_id: Option<PostId>,
    /// Handle of the parent's author, for "replying to @x" display.
    pub replying_to: Option<String>,
    pub auction: Option<AuctionBlock>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn is_active(&self) -> bool {
        self.status == PostStatus::Active
    }

    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    /// Adjusts one engagement counter, saturating at zero.
    pub fn adjust_engagement(&mut self, kind: Engagement, delta: i32) {
        let counter = match kind {
            Engagement::Like => &mut self.stats.likes,
            Engagement::Retweet => &mut self.stats.retweets,
        };
        *counter = counter.saturating_add_signed(delta);
    }
}

/// Terms supplied when composing an auction listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionTerms {
    pub starting_price: f64,
    #[serde(default)]
    pub duration_days: Option<u32>,
}

/// Input for composing a post or a reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPost {
    pub content: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub parent_id: Option<PostId>,
    #[serde(default)]
    pub auction: Option<AuctionTerms>,
}

/// Where the feed put a freshly inserted post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    Root,
    Reply { parent_id: PostId },
    /// A reply whose parent was missing, placed at the head of the feed.
    Detached { missing_parent: PostId },
}

// ── Users ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactVisibility {
    pub whatsapp_enabled: bool,
    pub whatsapp_number: Option<String>,
    pub show_whatsapp_in_posts: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    /// Display handle including the leading `@`.
    pub handle: String,
    pub avatar: String,
    pub banner: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub gender: Gender,
    pub phone: String,
    pub join_date: Option<String>,
    pub is_banned: bool,
    pub contact: ContactVisibility,
    pub followers: u64,
    pub following: u64,
}

impl User {
    pub fn adjust_followers(&mut self, delta: i64) {
        self.followers = self.followers.saturating_add_signed(delta);
    }

    pub fn adjust_following(&mut self, delta: i64) {
        self.following = self.following.saturating_add_signed(delta);
    }
}

/// Partial profile update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPatch {
    pub name: Option<String>,
    pub handle: Option<String>,
    pub avatar: Option<String>,
    pub banner: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub phone: Option<String>,
    pub whatsapp_number: Option<String>,
    pub show_whatsapp_in_posts: Option<bool>,
}

impl UserPatch {
    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(handle) = self.handle {
            user.handle = handle;
        }
        if let Some(avatar) = self.avatar {
            user.avatar = avatar;
        }
        if let Some(banner) = self.banner {
            user.banner = Some(banner);
        }
        if let Some(bio) = self.bio {
            user.bio = Some(bio);
        }
        if let Some(location) = self.location {
            user.location = Some(location);
        }
        if let Some(phone) = self.phone {
            user.phone = phone;
        }
        if let Some(number) = self.whatsapp_number {
            user.contact.whatsapp_number = Some(number);
        }
        if let Some(show) = self.show_whatsapp_in_posts {
            user.contact.show_whatsapp_in_posts = show;
        }
    }
}

/// Result of a follow toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FollowOutcome {
    pub following: bool,
    pub actor_following: u64,
    pub target_followers: u64,
}

// ── Conversations ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender_id: UserId,
    pub text: String,
    /// Display-formatted send time.
    pub timestamp: String,
    pub sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    pub participants: [UserId; 2],
    pub messages: Vec<Message>,
}

impl Conversation {
    pub fn between(a: UserId, b: UserId) -> Self {
        Self {
            id: ConversationId::generate(),
            participants: [a, b],
            messages: Vec::new(),
        }
    }

    pub fn involves(&self, user: &UserId) -> bool {
        self.participants.contains(user)
    }

    /// True for the unordered pair `{a, b}`.
    pub fn is_between(&self, a: &UserId, b: &UserId) -> bool {
        let [x, y] = &self.participants;
        (x == a && y == b) || (x == b && y == a)
    }

    pub fn counterpart_of(&self, user: &UserId) -> Option<&UserId> {
        match &self.participants {
            [x, y] if x == user => Some(y),
            [x, y] if y == user => Some(x),
            _ => None,
        }
    }
}

// ── Notifications ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Like,
    Retweet,
    Reply,
    Follow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationActor {
    pub id: UserId,
    pub name: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub kind: NotificationKind,
    pub from_users: Vec<NotificationActor>,
    pub post_excerpt: Option<String>,
    pub timestamp: String,
    pub is_read: bool,
}

// ── Supervisors ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    DeletePost,
    ToggleStatus,
    BanUser,
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::DeletePost => "delete posts",
            Self::ToggleStatus => "toggle post status",
            Self::BanUser => "ban users",
        })
    }
}

/// Default is everything denied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    pub can_delete_post: bool,
    pub can_toggle_status: bool,
    pub can_ban_user: bool,
}

impl Permissions {
    pub fn all() -> Self {
        Self {
            can_delete_post: true,
            can_toggle_status: true,
            can_ban_user: true,
        }
    }

    pub fn allows(&self, permission: Permission) -> bool {
        match permission {
            Permission::DeletePost => self.can_delete_post,
            Permission::ToggleStatus => self.can_toggle_status,
            Permission::BanUser => self.can_ban_user,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionsPatch {
    pub can_delete_post: Option<bool>,
    pub can_toggle_status: Option<bool>,
    pub can_ban_user: Option<bool>,
}

impl PermissionsPatch {
    pub fn apply(self, permissions: &mut Permissions) {
        if let Some(v) = self.can_delete_post {
            permissions.can_delete_post = v;
        }
        if let Some(v) = self.can_toggle_status {
            permissions.can_toggle_status = v;
        }
        if let Some(v) = self.can_ban_user {
            permissions.can_ban_user = v;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supervisor {
    pub user_id: UserId,
    pub permissions: Permissions,
}

impl Supervisor {
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            permissions: Permissions::default(),
        }
    }
}

// ── Site configuration ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeatureFlag {
    ShowTrends,
    AllowImageUpload,
    AllowVideoUpload,
    AllowMessaging,
    AllowFollowing,
}

impl std::str::FromStr for FeatureFlag {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "show_trends" => Ok(Self::ShowTrends),
            "allow_image_upload" => Ok(Self::AllowImageUpload),
            "allow_video_upload" => Ok(Self::AllowVideoUpload),
            "allow_messaging" => Ok(Self::AllowMessaging),
            "allow_following" => Ok(Self::AllowFollowing),
            other => Err(DomainError::validation(format!("unknown feature flag {other:?}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    pub show_trends: bool,
    pub allow_image_upload: bool,
    pub allow_video_upload: bool,
    pub allow_messaging: bool,
    pub allow_following: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            show_trends: true,
            allow_image_upload: true,
            allow_video_upload: true,
            allow_messaging: true,
            allow_following: true,
        }
    }
}

impl FeatureFlags {
    pub fn is_enabled(&self, flag: FeatureFlag) -> bool {
        match flag {
            FeatureFlag::ShowTrends => self.show_trends,
            FeatureFlag::AllowImageUpload => self.allow_image_upload,
            FeatureFlag::AllowVideoUpload => self.allow_video_upload,
            FeatureFlag::AllowMessaging => self.allow_messaging,
            FeatureFlag::AllowFollowing => self.allow_following,
        }
    }

    /// Flips `flag` and returns its new value.
    pub fn toggle(&mut self, flag: FeatureFlag) -> bool {
        let slot = match flag {
            FeatureFlag::ShowTrends => &mut self.show_trends,
            FeatureFlag::AllowImageUpload => &mut self.allow_image_upload,
            FeatureFlag::AllowVideoUpload => &mut self.allow_video_upload,
            FeatureFlag::AllowMessaging => &mut self.allow_messaging,
            FeatureFlag::AllowFollowing => &mut self.allow_following,
        };
        *slot = !*slot;
        *slot
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSettings {
    pub site_name: String,
    pub logo_url: Option<String>,
    pub flags: FeatureFlags,
}

/// A named content category, optionally bound to a supervisor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub name: String,
    pub supervisor_id: Option<UserId>,
    /// Icon identifier understood by the front end (e.g. "Gavel").
    pub icon: String,
}

/// Partial section update. `supervisor_id: null` clears the binding,
/// an absent `supervisor_id` leaves it alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionPatch {
    pub name: Option<String>,
    pub icon: Option<String>,
    #[serde(default, deserialize_with = "present_or_null")]
    pub supervisor_id: Option<Option<UserId>>,
}

impl SectionPatch {
    pub fn apply(self, section: &mut Section) {
        if let Some(name) = self.name {
            section.name = name;
        }
        if let Some(icon) = self.icon {
            section.icon = icon;
        }
        if let Some(binding) = self.supervisor_id {
            section.supervisor_id = binding;
        }
    }
}

fn present_or_null<'de, D, T>(deserializer: D) -> std::result::Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bid_must_beat_current_price() {
        let mut auction = AuctionBlock {
            current_bid: 7500.0,
            end_time: "ends in 1 day".into(),
            bid_count: 12,
        };
        let before = auction.clone();

        assert!(matches!(
            auction.place_bid(5000.0),
            Err(DomainError::InvalidBid { current, .. }) if current == 7500.0
        ));
        assert!(auction.place_bid(7500.0).is_err());
        assert!(auction.place_bid(f64::NAN).is_err());
        assert!(auction.place_bid(-1.0).is_err());
        assert_eq!(auction, before);

        auction.place_bid(8000.0).unwrap();
        assert_eq!(auction.current_bid, 8000.0);
        assert_eq!(auction.bid_count, 13);
    }

    #[test]
    fn auction_end_label_pluralises() {
        assert_eq!(AuctionBlock::open(10.0, 1).end_time, "ends in 1 day");
        assert_eq!(AuctionBlock::open(10.0, 3).end_time, "ends in 3 days");
    }

    #[test]
    fn status_toggle_is_an_involution() {
        assert_eq!(PostStatus::Active.toggled().toggled(), PostStatus::Active);
        assert_eq!(PostStatus::Active.toggled(), PostStatus::Inactive);
    }

    #[test]
    fn conversation_pair_is_unordered() {
        let conv = Conversation::between("a".into(), "b".into());
        assert!(conv.is_between(&"b".into(), &"a".into()));
        assert!(!conv.is_between(&"a".into(), &"c".into()));
        assert_eq!(conv.counterpart_of(&"a".into()), Some(&UserId::from("b")));
        assert_eq!(conv.counterpart_of(&"z".into()), None);
    }

    #[test]
    fn section_patch_distinguishes_null_from_absent() {
        let clear: SectionPatch = serde_json::from_str(r#"{"supervisor_id": null}"#).unwrap();
        assert_eq!(clear.supervisor_id, Some(None));

        let untouched: SectionPatch = serde_json::from_str(r#"{"name": "Cars"}"#).unwrap();
        assert_eq!(untouched.supervisor_id, None);

        let mut section = Section {
            id: "cars".into(),
            name: "Car sales".into(),
            supervisor_id: Some("1".into()),
            icon: "Car".into(),
        };
        untouched.apply(&mut section);
        assert_eq!(section.supervisor_id, Some("1".into()));
        clear.apply(&mut section);
        assert_eq!(section.supervisor_id, None);
    }

    #[test]
    fn engagement_counters_never_underflow() {
        let mut post = Post {
            id: "p".into(),
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
        post.adjust_engagement(Engagement::Like, -1);
        assert_eq!(post.stats.likes, 0);
        post.adjust_engagement(Engagement::Retweet, 1);
        assert_eq!(post.stats.retweets, 1);
    }

    #[test]
    fn feature_flags_parse_and_toggle() {
        let mut flags = FeatureFlags::default();
        let flag: FeatureFlag = "allow_messaging".parse().unwrap();
        assert!(!flags.toggle(flag));
        assert!(!flags.is_enabled(FeatureFlag::AllowMessaging));
        assert!("nope".parse::<FeatureFlag>().is_err());
    }
}
