use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use domains::{DomainError, FollowOutcome, Result, User, UserId, UserPatch, UserRepository};
use tokio::sync::RwLock;

#[derive(Default)]
struct UserState {
    users: Vec<User>,
    /// Actor id to the ids it follows.
    follows: HashMap<UserId, HashSet<UserId>>,
}

impl UserState {
    fn index_of(&self, id: &UserId) -> Result<usize> {
        self.users
            .iter()
            .position(|u| &u.id == id)
            .ok_or_else(|| DomainError::not_found("User", id))
    }
}

#[derive(Default)]
pub struct MemoryUserRepository {
    state: RwLock<UserState>,
}

impl MemoryUserRepository {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            state: RwLock::new(UserState {
                users,
                follows: HashMap::new(),
            }),
        }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn list(&self) -> Result<Vec<User>> {
        Ok(self.state.read().await.users.clone())
    }

    async fn get(&self, id: &UserId) -> Result<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| &u.id == id).cloned())
    }

    async fn update(&self, id: &UserId, patch: UserPatch) -> Result<User> {
        let mut state = self.state.write().await;
        let idx = state.index_of(id)?;
        let user = &mut state.users[idx];
        patch.apply(user);
        Ok(user.clone())
    }

    async fn toggle_ban(&self, id: &UserId) -> Result<bool> {
        let mut state = self.state.write().await;
        let idx = state.index_of(id)?;
        let user = &mut state.users[idx];
        user.is_banned = !user.is_banned;
        Ok(user.is_banned)
    }

    async fn toggle_whatsapp(&self, id: &UserId) -> Result<bool> {
        let mut state = self.state.write().await;
        let idx = state.index_of(id)?;
        let contact = &mut state.users[idx].contact;
        contact.whatsapp_enabled = !contact.whatsapp_enabled;
        Ok(contact.whatsapp_enabled)
    }

    async fn toggle_follow(&self, actor: &UserId, target: &UserId) -> Result<FollowOutcome> {
        let mut state = self.state.write().await;
        let actor_idx = state.index_of(actor)?;
        let target_idx = state.index_of(target)?;

        let followed = state.follows.entry(actor.clone()).or_default();
        let following = if followed.remove(target) {
            false
        } else {
            followed.insert(target.clone());
            true
        };
        let delta = if following { 1 } else { -1 };

        state.users[actor_idx].adjust_following(delta);
        state.users[target_idx].adjust_followers(delta);

        Ok(FollowOutcome {
            following,
            actor_following: state.users[actor_idx].following,
            target_followers: state.users[target_idx].followers,
        })
    }

    async fn following(&self, actor: &UserId) -> Result<Vec<UserId>> {
        let state = self.state.read().await;
        let mut ids: Vec<UserId> = state
            .follows
            .get(actor)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        ids.sort();
        Ok(ids)
    }
}
