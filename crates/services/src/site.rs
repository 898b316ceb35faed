use std::sync::Arc;

use domains::{
    DomainError, FeatureFlag, Result, Section, SectionId, SectionPatch, SiteRepository,
    SiteSettings, SupervisorRepository, UserId,
};
use tracing::info;

use crate::access::AccessControl;

const DEFAULT_SECTION_ICON: &str = "Tag";

/// Site name, logo, feature flags and the section list. Reads are open,
/// every mutation is admin only.
#[derive(Clone)]
pub struct SiteService {
    site: Arc<dyn SiteRepository>,
    supervisors: Arc<dyn SupervisorRepository>,
    access: AccessControl,
}

impl SiteService {
    pub fn new(
        site: Arc<dyn SiteRepository>,
        supervisors: Arc<dyn SupervisorRepository>,
        access: AccessControl,
    ) -> Self {
        Self {
            site,
            supervisors,
            access,
        }
    }

    pub async fn settings(&self) -> Result<SiteSettings> {
        self.site.settings().await
    }

    pub async fn set_site_name(&self, actor: &UserId, name: &str) -> Result<SiteSettings> {
        self.access.require_admin(actor)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("site name must not be blank"));
        }
        let settings = self.site.set_site_name(name.to_string()).await?;
        info!(site_name = %settings.site_name, "site renamed");
        Ok(settings)
    }

    /// `None` or a blank URL clears the logo.
    pub async fn set_logo_url(&self, actor: &UserId, url: Option<String>) -> Result<SiteSettings> {
        self.access.require_admin(actor)?;
        let url = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty());
        self.site.set_logo_url(url).await
    }

    pub async fn toggle_flag(&self, actor: &UserId, flag: FeatureFlag) -> Result<bool> {
        self.access.require_admin(actor)?;
        let enabled = self.site.toggle_flag(flag).await?;
        info!(?flag, enabled, "feature flag toggled");
        Ok(enabled)
    }

    pub async fn sections(&self) -> Result<Vec<Section>> {
        self.site.sections().await
    }

    pub async fn add_section(&self, actor: &UserId, name: &str) -> Result<Section> {
        self.access.require_admin(actor)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("section name must not be blank"));
        }
        if self.site.sections().await?.iter().any(|s| s.name == name) {
            return Err(DomainError::Conflict(format!("section {name:?} already exists")));
        }
        let section = self
            .site
            .add_section(Section {
                id: SectionId::generate(),
                name: name.to_string(),
                supervisor_id: None,
                icon: DEFAULT_SECTION_ICON.into(),
            })
            .await?;
        info!(section = %section.id, name = %section.name, "section added");
        Ok(section)
    }

    pub async fn update_section(
        &self,
        actor: &UserId,
        id: &SectionId,
        mut patch: SectionPatch,
    ) -> Result<Section> {
        self.access.require_admin(actor)?;
        if let Some(name) = patch.name.take() {
            let name = name.trim();
            if name.is_empty() {
                return Err(DomainError::validation("section name must not be blank"));
            }
            let sections = self.site.sections().await?;
            if sections.iter().any(|s| s.name == name && &s.id != id) {
                return Err(DomainError::Conflict(format!("section {name:?} already exists")));
            }
            patch.name = Some(name.to_string());
        }
        if let Some(Some(supervisor)) = &patch.supervisor_id {
            if self.supervisors.get(supervisor).await?.is_none() {
                return Err(DomainError::validation(format!("{supervisor} is not a supervisor")));
            }
        }
        let section = self.site.update_section(id, patch).await?;
        info!(section = %id, "section updated");
        Ok(section)
    }

    pub async fn delete_section(&self, actor: &UserId, id: &SectionId) -> Result<()> {
        self.access.require_admin(actor)?;
        if !self.site.delete_section(id).await? {
            return Err(DomainError::not_found("Section", id));
        }
        info!(section = %id, "section deleted");
        Ok(())
    }

    pub async fn reorder_sections(&self, actor: &UserId, ids: Vec<SectionId>) -> Result<Vec<Section>> {
        self.access.require_admin(actor)?;
        self.site.reorder_sections(ids).await
    }
}
