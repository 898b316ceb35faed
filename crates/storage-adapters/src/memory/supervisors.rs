use async_trait::async_trait;
use domains::{
    DomainError, Permissions, PermissionsPatch, Result, Supervisor, SupervisorRepository, UserId,
};
use tokio::sync::RwLock;

/// Supervisors in the order they were appointed.
#[derive(Default)]
pub struct MemorySupervisorRepository {
    supervisors: RwLock<Vec<Supervisor>>,
}

impl MemorySupervisorRepository {
    pub fn new(supervisors: Vec<Supervisor>) -> Self {
        Self {
            supervisors: RwLock::new(supervisors),
        }
    }
}

#[async_trait]
impl SupervisorRepository for MemorySupervisorRepository {
    async fn list(&self) -> Result<Vec<Supervisor>> {
        Ok(self.supervisors.read().await.clone())
    }

    async fn get(&self, user_id: &UserId) -> Result<Option<Supervisor>> {
        let supervisors = self.supervisors.read().await;
        Ok(supervisors.iter().find(|s| &s.user_id == user_id).cloned())
    }

    async fn add(&self, user_id: &UserId) -> Result<(Supervisor, bool)> {
        let mut supervisors = self.supervisors.write().await;
        if let Some(existing) = supervisors.iter().find(|s| &s.user_id == user_id) {
            return Ok((existing.clone(), false));
        }
        let supervisor = Supervisor::new(user_id.clone());
        supervisors.push(supervisor.clone());
        Ok((supervisor, true))
    }

    async fn remove(&self, user_id: &UserId) -> Result<bool> {
        let mut supervisors = self.supervisors.write().await;
        let before = supervisors.len();
        supervisors.retain(|s| &s.user_id != user_id);
        Ok(supervisors.len() != before)
    }

    async fn update_permissions(
        &self,
        user_id: &UserId,
        patch: PermissionsPatch,
    ) -> Result<Permissions> {
        let mut supervisors = self.supervisors.write().await;
        let supervisor = supervisors
            .iter_mut()
            .find(|s| &s.user_id == user_id)
            .ok_or_else(|| DomainError::not_found("Supervisor", user_id))?;
        patch.apply(&mut supervisor.permissions);
        Ok(supervisor.permissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn add_is_idempotent_and_default_denied() {
        let repo = MemorySupervisorRepository::default();
        let id = UserId::from("4");

        let (first, added) = repo.add(&id).await.unwrap();
        assert!(added);
        assert_eq!(first.permissions, Permissions::default());

        repo.update_permissions(
            &id,
            PermissionsPatch {
                can_ban_user: Some(true),
                ..PermissionsPatch::default()
            },
        )
        .await
        .unwrap();

        let (second, added) = repo.add(&id).await.unwrap();
        assert!(!added);
        assert!(second.permissions.can_ban_user);
        assert!(!second.permissions.can_delete_post);
        assert_eq!(repo.list().await.unwrap().len(), 1);

        assert!(repo.remove(&id).await.unwrap());
        assert!(!repo.remove(&id).await.unwrap());
    }
}
