//! Permission checks shared by every service.
//!
//! The site admin holds every permission. A supervisor holds only what its
//! permission record grants and never acts on its own content or account.

use std::sync::Arc;

use domains::{DomainError, Permission, Permissions, Result, SupervisorRepository, UserId};

#[derive(Clone)]
pub struct AccessControl {
    supervisors: Arc<dyn SupervisorRepository>,
    admin: UserId,
}

impl AccessControl {
    pub fn new(supervisors: Arc<dyn SupervisorRepository>, admin: UserId) -> Self {
        Self { supervisors, admin }
    }

    pub fn admin(&self) -> &UserId {
        &self.admin
    }

    pub fn is_admin(&self, actor: &UserId) -> bool {
        actor == &self.admin
    }

    pub fn require_admin(&self, actor: &UserId) -> Result<()> {
        if self.is_admin(actor) {
            Ok(())
        } else {
            Err(DomainError::forbidden(format!("{actor} is not the site admin")))
        }
    }

    /// What `actor` may do right now. Non-supervisors get nothing.
    pub async fn effective_permissions(&self, actor: &UserId) -> Result<Permissions> {
        if self.is_admin(actor) {
            return Ok(Permissions::all());
        }
        Ok(self
            .supervisors
            .get(actor)
            .await?
            .map(|s| s.permissions)
            .unwrap_or_default())
    }

    /// Gate a moderation action on something owned by `owner`.
    pub async fn require_moderation(
        &self,
        actor: &UserId,
        permission: Permission,
        owner: &UserId,
    ) -> Result<()> {
        if self.is_admin(actor) {
            return Ok(());
        }
        if actor == owner {
            return Err(DomainError::forbidden(format!(
                "{actor} cannot moderate their own content"
            )));
        }
        match self.supervisors.get(actor).await? {
            Some(s) if s.permissions.allows(permission) => Ok(()),
            Some(_) => Err(DomainError::forbidden(format!(
                "{actor} may not {permission}"
            ))),
            None => Err(DomainError::forbidden(format!("{actor} is not a supervisor"))),
        }
    }
}
