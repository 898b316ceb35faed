//! Fixed data every store starts from.

use chrono::{Duration, Utc};
use domains::{
    AuctionBlock, ContactVisibility, Conversation, EngagementStats, FeatureFlags, Feed, Gender,
    Message, Notification, NotificationActor, NotificationKind, Permissions, Post, PostStatus,
    Section, SiteSettings, Supervisor, User,
};

pub const ADMIN_ID: &str = "currentUser";

fn avatar(seed: &str) -> String {
    format!("https://i.pravatar.cc/150?u={seed}")
}

fn banner(photo: &str) -> Option<String> {
    Some(format!(
        "https://images.unsplash.com/photo-{photo}?q=80&w=2070&auto=format&fit=crop"
    ))
}

pub fn users() -> Vec<User> {
    vec![
        User {
            id: ADMIN_ID.into(),
            name: "Site Admin".into(),
            handle: "@admin".into(),
            avatar: avatar("currentuser"),
            banner: banner("1504805572947-34fad45aed93"),
            bio: Some("Founder and owner of the site. Into tech and entrepreneurship.".into()),
            location: Some("Riyadh, Saudi Arabia".into()),
            gender: Gender::Male,
            phone: "+966500000000".into(),
            join_date: Some("January 2025".into()),
            is_banned: false,
            contact: ContactVisibility {
                whatsapp_enabled: true,
                whatsapp_number: Some("+966500000000".into()),
                show_whatsapp_in_posts: true,
            },
            followers: 12_500,
            following: 0,
        },
        User {
            id: "1".into(),
            name: "Mohammed Al-Ahmad".into(),
            handle: "@mohammed".into(),
            avatar: avatar("user1"),
            banner: banner("1519681393784-d120267933ba"),
            bio: Some("Front-end developer and specialty coffee lover.".into()),
            location: Some("Jeddah".into()),
            gender: Gender::Male,
            phone: "+966501234567".into(),
            join_date: Some("February 2025".into()),
            is_banned: false,
            contact: ContactVisibility {
                whatsapp_enabled: true,
                whatsapp_number: Some("+966501234567".into()),
                show_whatsapp_in_posts: false,
            },
            followers: 320,
            following: 150,
        },
        User {
            id: "2".into(),
            name: "Fatima Ali".into(),
            handle: "@fatima".into(),
            avatar: avatar("user2"),
            banner: banner("1444703686981-a3abbc4d4fe3"),
            bio: Some("Graphic designer with a thing for digital art.".into()),
            location: Some("Dubai".into()),
            gender: Gender::Female,
            phone: "+966559876543".into(),
            join_date: Some("March 2025".into()),
            is_banned: false,
            contact: ContactVisibility {
                whatsapp_enabled: true,
                whatsapp_number: Some("+966559876543".into()),
                show_whatsapp_in_posts: true,
            },
            followers: 1_800,
            following: 400,
        },
        User {
            id: "3".into(),
            name: "Khalid Al-Amri".into(),
            handle: "@khalid".into(),
            avatar: avatar("user4"),
            banner: banner("1506744038136-46273834b3fb"),
            bio: Some("Banned user".into()),
            location: Some("Unknown".into()),
            gender: Gender::Male,
            phone: "+966541122334".into(),
            join_date: Some("April 2025".into()),
            is_banned: true,
            contact: ContactVisibility::default(),
            followers: 10,
            following: 5,
        },
        User {
            id: "4".into(),
            name: "Sara Abdullah".into(),
            handle: "@sara".into(),
            avatar: avatar("user5"),
            banner: banner("1470770841072-f978cf4d019e"),
            bio: Some("Digital marketing specialist.".into()),
            location: Some("Dammam".into()),
            gender: Gender::Female,
            phone: "+966567788990".into(),
            join_date: Some("May 2025".into()),
            is_banned: false,
            contact: ContactVisibility {
                whatsapp_enabled: true,
                whatsapp_number: None,
                show_whatsapp_in_posts: false,
            },
            followers: 540,
            following: 210,
        },
    ]
}

fn stats(comments: u32, retweets: u32, likes: u32, views: u64) -> EngagementStats {
    EngagementStats {
        comments,
        retweets,
        likes,
        views,
    }
}

fn post(
    id: &str,
    author: &str,
    content: &str,
    minutes_ago: i64,
    stats: EngagementStats,
    category: &str,
) -> Post {
    Post {
        id: id.into(),
        author_id: author.into(),
        content: content.into(),
        image_urls: Vec::new(),
        video_url: None,
        stats,
        status: PostStatus::Active,
        category: Some(category.into()),
        parent_id: None,
        replying_to: None,
        auction: None,
        created_at: Utc::now() - Duration::minutes(minutes_ago),
    }
}

/// Seed posts, newest first.
pub fn posts() -> Vec<Post> {
    vec![
        post(
            "1",
            "1",
            "Building a new UI with React and Tailwind CSS is so much fun! 🚀 #webdev",
            58,
            stats(12, 34, 152, 12_300),
            "General",
        ),
        Post {
            image_urls: vec![
                "https://images.unsplash.com/photo-1552519507-da3b142c6e3d?q=80&w=2070&auto=format&fit=crop".into(),
            ],
            ..post(
                "car-1",
                "2",
                "Family sedan, 2025 model, for sale in excellent condition.",
                60,
                stats(5, 10, 45, 8_900),
                "Car sales",
            )
        },
        post(
            "2",
            "2",
            "What's the best book you've read this year?",
            120,
            stats(88, 105, 430, 50_100),
            "General",
        ),
        Post {
            video_url: Some("https://www.youtube.com/watch?v=LXb3EKWsInQ".into()),
            ..post(
                "video-1",
                "4",
                "Watch this amazing nature video! 🏞️",
                180,
                stats(20, 50, 250, 40_000),
                "General",
            )
        },
        Post {
            auction: Some(AuctionBlock {
                current_bid: 7500.0,
                end_time: "ends in 1 day, 5 hours".into(),
                bid_count: 12,
            }),
            ..post(
                "auction-1",
                ADMIN_ID,
                "A collection of rare watches going to public auction next Friday.",
                185,
                stats(18, 25, 90, 15_000),
                "Auctions",
            )
        },
        post(
            "estate-1",
            "1",
            "Luxury villa for sale in Al Yasmin. 5 bedrooms, private pool.",
            240,
            stats(22, 30, 110, 25_000),
            "Real estate",
        ),
        post(
            "fashion-1",
            "4",
            "End-of-season sale: up to 50% off the new collection.",
            480,
            stats(15, 40, 200, 33_000),
            "Fashion",
        ),
    ]
}

pub fn feed() -> Feed {
    Feed::from_seed(posts())
}

fn message(id: &str, sender: &str, text: &str, timestamp: &str, minutes_ago: i64) -> Message {
    Message {
        id: id.into(),
        sender_id: sender.into(),
        text: text.into(),
        timestamp: timestamp.into(),
        sent_at: Utc::now() - Duration::minutes(minutes_ago),
    }
}

pub fn conversations() -> Vec<Conversation> {
    vec![
        Conversation {
            id: "conv1".into(),
            participants: [ADMIN_ID.into(), "1".into()],
            messages: vec![
                message("m1", "1", "Hi there! How can I help?", "10:30", 90),
                message(
                    "m2",
                    ADMIN_ID,
                    "Hi, I was asking about the car listing.",
                    "10:31",
                    89,
                ),
            ],
        },
        Conversation {
            id: "conv2".into(),
            participants: [ADMIN_ID.into(), "2".into()],
            messages: vec![message(
                "m3",
                "2",
                "Hello, thanks for your interest. Any questions?",
                "Yesterday",
                1_440,
            )],
        },
    ]
}

fn actor(id: &str, name: &str, avatar_seed: &str) -> NotificationActor {
    NotificationActor {
        id: id.into(),
        name: name.into(),
        avatar: avatar(avatar_seed),
    }
}

/// Two of the four start unread.
pub fn notifications() -> Vec<Notification> {
    vec![
        Notification {
            id: "1".into(),
            kind: NotificationKind::Like,
            from_users: vec![
                actor("2", "Fatima Ali", "user2"),
                actor("4", "Sara Abdullah", "user5"),
            ],
            post_excerpt: Some("Building a new UI with React...".into()),
            timestamp: "1 hour".into(),
            is_read: false,
        },
        Notification {
            id: "2".into(),
            kind: NotificationKind::Follow,
            from_users: vec![actor("3", "Khalid Al-Amri", "user4")],
            post_excerpt: None,
            timestamp: "3 hours".into(),
            is_read: false,
        },
        Notification {
            id: "3".into(),
            kind: NotificationKind::Retweet,
            from_users: vec![actor("1", "Mohammed Al-Ahmad", "user1")],
            post_excerpt: Some("What's the best book you've read this year?".into()),
            timestamp: "5 hours".into(),
            is_read: true,
        },
        Notification {
            id: "4".into(),
            kind: NotificationKind::Reply,
            from_users: vec![actor("2", "Fatima Ali", "user2")],
            post_excerpt: Some("Replying to you: \"Definitely, Atomic Habits...\"".into()),
            timestamp: "1 day".into(),
            is_read: true,
        },
    ]
}

pub fn supervisors() -> Vec<Supervisor> {
    vec![
        Supervisor {
            user_id: "1".into(),
            permissions: Permissions {
                can_delete_post: true,
                can_toggle_status: true,
                can_ban_user: false,
            },
        },
        Supervisor {
            user_id: "2".into(),
            permissions: Permissions {
                can_delete_post: true,
                can_toggle_status: false,
                can_ban_user: false,
            },
        },
    ]
}

pub fn site_settings() -> SiteSettings {
    SiteSettings {
        site_name: "MAZADNET".into(),
        logo_url: None,
        flags: FeatureFlags::default(),
    }
}

pub fn sections() -> Vec<Section> {
    let section = |id: &str, name: &str, supervisor: Option<&str>, icon: &str| Section {
        id: id.into(),
        name: name.into(),
        supervisor_id: supervisor.map(Into::into),
        icon: icon.into(),
    };
    vec![
        section("cars", "Car sales", Some("1"), "Car"),
        section("realty", "Real estate", Some("2"), "Building2"),
        section("fashion", "Fashion", None, "Shirt"),
        section("auctions", "Auctions", None, "Gavel"),
    ]
}
