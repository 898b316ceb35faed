//! # Feed
//!
//! The threaded post collection. Posts live in a map; display order is an
//! explicit adjacency model:
//!
//! - `roots`: top-level posts, newest first
//! - `children`: parent id to its direct replies, in arrival order
//! - `slot_of`: which sibling list each post sits in (`None` for roots)
//!
//! The flattened feed walks each root depth-first, so every reply is shown
//! after its parent and after any earlier reply to the same parent.

use std::collections::HashMap;

use crate::errors::{DomainError, Result};
use crate::models::{AuctionBlock, Engagement, EngagementStats, Placement, Post, PostId, PostStatus};

#[derive(Debug, Clone, Default)]
pub struct Feed {
    posts: HashMap<PostId, Post>,
    roots: Vec<PostId>,
    children: HashMap<PostId, Vec<PostId>>,
    /// Orphans keep their dangling `parent_id` but sit under their former
    /// grandparent, so the slot is tracked separately.
    slot_of: HashMap<PostId, Option<PostId>>,
}

impl Feed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a feed from posts already in display order. Counters are
    /// taken as-is; a reply whose parent appears earlier is attached to it,
    /// anything else becomes a root in the order given.
    pub fn from_seed(posts: impl IntoIterator<Item = Post>) -> Self {
        let mut feed = Self::new();
        for post in posts {
            let id = post.id.clone();
            let parent = post.parent_id.clone().filter(|p| feed.posts.contains_key(p));
            feed.sibling_list_mut(parent.as_ref()).push(id.clone());
            feed.slot_of.insert(id.clone(), parent);
            feed.posts.insert(id, post);
        }
        feed
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn get(&self, id: &PostId) -> Option<&Post> {
        self.posts.get(id)
    }

    pub fn contains(&self, id: &PostId) -> bool {
        self.posts.contains_key(id)
    }

    /// Inserts a new post following the threading rules and reports where
    /// it landed. A reply to an unknown parent is placed at the head of the
    /// feed and keeps its parent reference.
    pub fn insert(&mut self, post: Post) -> Placement {
        let id = post.id.clone();
        let placement = match &post.parent_id {
            Some(parent_id) => match self.posts.get_mut(parent_id) {
                Some(parent) => {
                    parent.stats.comments += 1;
                    self.children.entry(parent_id.clone()).or_default().push(id.clone());
                    self.slot_of.insert(id.clone(), Some(parent_id.clone()));
                    Placement::Reply {
                        parent_id: parent_id.clone(),
                    }
                }
                None => {
                    self.roots.insert(0, id.clone());
                    self.slot_of.insert(id.clone(), None);
                    Placement::Detached {
                        missing_parent: parent_id.clone(),
                    }
                }
            },
            None => {
                self.roots.insert(0, id.clone());
                self.slot_of.insert(id.clone(), None);
                Placement::Root
            }
        };
        self.posts.insert(id, post);
        placement
    }

    /// Removes a post. Without `cascade`, its direct replies take its slot
    /// in the sibling list and keep their now-dangling parent id. With
    /// `cascade`, the whole reply subtree goes too. Returns the removed
    /// posts, target first.
    pub fn remove(&mut self, id: &PostId, cascade: bool) -> Result<Vec<Post>> {
        let target = self
            .posts
            .remove(id)
            .ok_or_else(|| DomainError::not_found("Post", id))?;

        let parent = self.slot_of.remove(id).flatten();
        let siblings = self.sibling_list_mut(parent.as_ref());
        let slot = siblings.iter().position(|p| p == id);
        if let Some(slot) = slot {
            siblings.remove(slot);
        }

        let orphans = self.children.remove(id).unwrap_or_default();
        let mut removed = vec![target];

        if cascade {
            let mut stack = orphans;
            while let Some(next) = stack.pop() {
                if let Some(grandchildren) = self.children.remove(&next) {
                    stack.extend(grandchildren);
                }
                self.slot_of.remove(&next);
                if let Some(post) = self.posts.remove(&next) {
                    removed.push(post);
                }
            }
        } else {
            for orphan in &orphans {
                self.slot_of.insert(orphan.clone(), parent.clone());
            }
            let siblings = self.sibling_list_mut(parent.as_ref());
            let slot = slot.unwrap_or(siblings.len());
            siblings.splice(slot..slot, orphans);
        }

        Ok(removed)
    }

    pub fn toggle_status(&mut self, id: &PostId) -> Result<PostStatus> {
        let post = self.post_mut(id)?;
        post.status = post.status.toggled();
        Ok(post.status)
    }

    /// Validates and applies a bid in one step; on error nothing changes.
    pub fn place_bid(&mut self, id: &PostId, amount: f64) -> Result<AuctionBlock> {
        let post = self.active_post_mut(id)?;
        let auction = post
            .auction
            .as_mut()
            .ok_or_else(|| DomainError::validation(format!("post {id} is not an auction")))?;
        auction.place_bid(amount)?;
        Ok(auction.clone())
    }

    pub fn adjust_engagement(
        &mut self,
        id: &PostId,
        kind: Engagement,
        delta: i32,
    ) -> Result<EngagementStats> {
        let post = self.active_post_mut(id)?;
        post.adjust_engagement(kind, delta);
        Ok(post.stats.clone())
    }

    /// Posts listed directly under `id`, in display order. This includes
    /// replies re-slotted there when their own parent was deleted.
    pub fn replies(&self, id: &PostId) -> Vec<&Post> {
        self.children
            .get(id)
            .map(|ids| ids.iter().filter_map(|c| self.posts.get(c)).collect())
            .unwrap_or_default()
    }

    /// All posts in threaded display order.
    pub fn threaded(&self) -> Vec<&Post> {
        let mut out = Vec::with_capacity(self.posts.len());
        let mut stack: Vec<&PostId> = self.roots.iter().rev().collect();
        while let Some(id) = stack.pop() {
            if let Some(post) = self.posts.get(id) {
                out.push(post);
            }
            if let Some(kids) = self.children.get(id) {
                stack.extend(kids.iter().rev());
            }
        }
        out
    }

    fn post_mut(&mut self, id: &PostId) -> Result<&mut Post> {
        self.posts
            .get_mut(id)
            .ok_or_else(|| DomainError::not_found("Post", id))
    }

    fn active_post_mut(&mut self, id: &PostId) -> Result<&mut Post> {
        let post = self.post_mut(id)?;
        if !post.is_active() {
            return Err(DomainError::validation(format!("post {id} is inactive")));
        }
        Ok(post)
    }

    fn sibling_list_mut(&mut self, parent: Option<&PostId>) -> &mut Vec<PostId> {
        match parent {
            Some(parent) => self.children.entry(parent.clone()).or_default(),
            None => &mut self.roots,
        }
    }
}
