use std::sync::Arc;

use domains::{
    DomainError, FollowOutcome, Permission, Result, SiteRepository, User, UserId, UserPatch,
    UserRepository,
};
use tracing::info;

use crate::access::AccessControl;

/// Profiles, bans and the follow graph.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    site: Arc<dyn SiteRepository>,
    access: AccessControl,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        site: Arc<dyn SiteRepository>,
        access: AccessControl,
    ) -> Self {
        Self {
            users,
            site,
            access,
        }
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        self.users.list().await
    }

    pub async fn get(&self, id: &UserId) -> Result<User> {
        self.users
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    /// Partial profile update; users edit themselves, the admin edits anyone.
    pub async fn update(&self, actor: &UserId, id: &UserId, mut patch: UserPatch) -> Result<User> {
        if actor != id {
            self.access.require_admin(actor)?;
        }
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("name must not be blank"));
            }
        }
        if let Some(handle) = patch.handle.take() {
            let handle = handle.trim().trim_start_matches('@');
            if handle.is_empty() {
                return Err(DomainError::validation("handle must not be blank"));
            }
            patch.handle = Some(format!("@{handle}"));
        }

        let user = self.users.update(id, patch).await?;
        info!(user = %id, editor = %actor, "profile updated");
        Ok(user)
    }

    /// Flips the ban flag. Returns the new value.
    pub async fn toggle_ban(&self, actor: &UserId, target: &UserId) -> Result<bool> {
        self.get(target).await?;
        if self.access.is_admin(target) {
            return Err(DomainError::forbidden("the site admin cannot be banned"));
        }
        self.access
            .require_moderation(actor, Permission::BanUser, target)
            .await?;

        let banned = self.users.toggle_ban(target).await?;
        info!(user = %target, moderator = %actor, banned, "ban toggled");
        Ok(banned)
    }

    /// Flips whether the user's WhatsApp contact is enabled. Admin only.
    pub async fn toggle_whatsapp(&self, actor: &UserId, target: &UserId) -> Result<bool> {
        self.access.require_admin(actor)?;
        let enabled = self.users.toggle_whatsapp(target).await?;
        info!(user = %target, enabled, "whatsapp contact toggled");
        Ok(enabled)
    }

    pub async fn toggle_follow(&self, actor: &UserId, target: &UserId) -> Result<FollowOutcome> {
        if !self.site.settings().await?.flags.allow_following {
            return Err(DomainError::validation("following is disabled"));
        }
        if actor == target {
            return Err(DomainError::validation("users cannot follow themselves"));
        }
        self.get(actor).await?;
        self.get(target).await?;

        let outcome = self.users.toggle_follow(actor, target).await?;
        info!(user = %actor, target = %target, following = outcome.following, "follow toggled");
        Ok(outcome)
    }

    pub async fn following(&self, actor: &UserId) -> Result<Vec<UserId>> {
        self.users.following(actor).await
    }

    pub async fn is_following(&self, actor: &UserId, target: &UserId) -> Result<bool> {
        Ok(self.users.following(actor).await?.contains(target))
    }
}
