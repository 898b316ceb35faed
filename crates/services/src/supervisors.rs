use std::sync::Arc;

use domains::{
    DomainError, Permissions, PermissionsPatch, Result, SiteRepository, Supervisor,
    SupervisorRepository, UserId, UserRepository,
};
use tracing::info;

use crate::access::AccessControl;

/// Admin management of supervisors and their permission sets.
#[derive(Clone)]
pub struct SupervisorService {
    supervisors: Arc<dyn SupervisorRepository>,
    users: Arc<dyn UserRepository>,
    site: Arc<dyn SiteRepository>,
    access: AccessControl,
}

impl SupervisorService {
    pub fn new(
        supervisors: Arc<dyn SupervisorRepository>,
        users: Arc<dyn UserRepository>,
        site: Arc<dyn SiteRepository>,
        access: AccessControl,
    ) -> Self {
        Self {
            supervisors,
            users,
            site,
            access,
        }
    }

    pub async fn list(&self) -> Result<Vec<Supervisor>> {
        self.supervisors.list().await
    }

    pub async fn get(&self, user_id: &UserId) -> Result<Option<Supervisor>> {
        self.supervisors.get(user_id).await
    }

    pub async fn is_supervisor(&self, user_id: &UserId) -> Result<bool> {
        Ok(self.supervisors.get(user_id).await?.is_some())
    }

    /// What `actor` may currently do; the admin gets everything.
    pub async fn permissions_for(&self, actor: &UserId) -> Result<Permissions> {
        self.access.effective_permissions(actor).await
    }

    /// Idempotent. The flag is true when the user was newly added.
    pub async fn add(&self, actor: &UserId, user_id: &UserId) -> Result<(Supervisor, bool)> {
        self.access.require_admin(actor)?;
        if self.access.is_admin(user_id) {
            return Err(DomainError::validation("the site admin already holds every permission"));
        }
        if self.users.get(user_id).await?.is_none() {
            return Err(DomainError::not_found("User", user_id));
        }

        let (supervisor, added) = self.supervisors.add(user_id).await?;
        if added {
            info!(user = %user_id, "supervisor added");
        }
        Ok((supervisor, added))
    }

    /// Removes the supervisor and clears any section bound to them.
    pub async fn remove(&self, actor: &UserId, user_id: &UserId) -> Result<bool> {
        self.access.require_admin(actor)?;
        let removed = self.supervisors.remove(user_id).await?;
        if removed {
            let unbound = self.site.unbind_supervisor(user_id).await?;
            info!(user = %user_id, unbound_sections = unbound, "supervisor removed");
        }
        Ok(removed)
    }

    pub async fn update_permissions(
        &self,
        actor: &UserId,
        user_id: &UserId,
        patch: PermissionsPatch,
    ) -> Result<Permissions> {
        self.access.require_admin(actor)?;
        let permissions = self.supervisors.update_permissions(user_id, patch).await?;
        info!(user = %user_id, ?permissions, "supervisor permissions updated");
        Ok(permissions)
    }
}
