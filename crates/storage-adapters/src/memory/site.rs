use std::collections::HashSet;

use async_trait::async_trait;
use domains::{
    DomainError, FeatureFlag, Result, Section, SectionId, SectionPatch, SiteRepository,
    SiteSettings, UserId,
};
use tokio::sync::RwLock;

struct SiteState {
    settings: SiteSettings,
    sections: Vec<Section>,
}

pub struct MemorySiteRepository {
    state: RwLock<SiteState>,
}

impl MemorySiteRepository {
    pub fn new(settings: SiteSettings, sections: Vec<Section>) -> Self {
        Self {
            state: RwLock::new(SiteState { settings, sections }),
        }
    }
}

#[async_trait]
impl SiteRepository for MemorySiteRepository {
    async fn settings(&self) -> Result<SiteSettings> {
        Ok(self.state.read().await.settings.clone())
    }

    async fn set_site_name(&self, name: String) -> Result<SiteSettings> {
        let mut state = self.state.write().await;
        state.settings.site_name = name;
        Ok(state.settings.clone())
    }

    async fn set_logo_url(&self, url: Option<String>) -> Result<SiteSettings> {
        let mut state = self.state.write().await;
        state.settings.logo_url = url;
        Ok(state.settings.clone())
    }

    async fn toggle_flag(&self, flag: FeatureFlag) -> Result<bool> {
        Ok(self.state.write().await.settings.flags.toggle(flag))
    }

    async fn sections(&self) -> Result<Vec<Section>> {
        Ok(self.state.read().await.sections.clone())
    }

    async fn add_section(&self, section: Section) -> Result<Section> {
        let mut state = self.state.write().await;
        if state.sections.iter().any(|s| s.id == section.id) {
            return Err(DomainError::Conflict(format!("section {} already exists", section.id)));
        }
        state.sections.push(section.clone());
        Ok(section)
    }

    async fn update_section(&self, id: &SectionId, patch: SectionPatch) -> Result<Section> {
        let mut state = self.state.write().await;
        let section = state
            .sections
            .iter_mut()
            .find(|s| &s.id == id)
            .ok_or_else(|| DomainError::not_found("Section", id))?;
        patch.apply(section);
        Ok(section.clone())
    }

    async fn delete_section(&self, id: &SectionId) -> Result<bool> {
        let mut state = self.state.write().await;
        let before = state.sections.len();
        state.sections.retain(|s| &s.id != id);
        Ok(state.sections.len() != before)
    }

    async fn reorder_sections(&self, ids: Vec<SectionId>) -> Result<Vec<Section>> {
        let mut state = self.state.write().await;
        let current: HashSet<&SectionId> = state.sections.iter().map(|s| &s.id).collect();
        let requested: HashSet<&SectionId> = ids.iter().collect();
        if ids.len() != state.sections.len() || requested != current {
            return Err(DomainError::validation(
                "section order must list every existing section exactly once",
            ));
        }

        let mut reordered = Vec::with_capacity(ids.len());
        for id in &ids {
            if let Some(pos) = state.sections.iter().position(|s| &s.id == id) {
                reordered.push(state.sections.swap_remove(pos));
            }
        }
        state.sections = reordered;
        Ok(state.sections.clone())
    }

    async fn unbind_supervisor(&self, user_id: &UserId) -> Result<usize> {
        let mut state = self.state.write().await;
        let mut cleared = 0;
        for section in state
            .sections
            .iter_mut()
            .filter(|s| s.supervisor_id.as_ref() == Some(user_id))
        {
            section.supervisor_id = None;
            cleared += 1;
        }
        Ok(cleared)
    }
}

#[cfg(test)]
mod tests {
    use crate::seed;

    use super::*;

    fn repo() -> MemorySiteRepository {
        MemorySiteRepository::new(seed::site_settings(), seed::sections())
    }

    #[tokio::test]
    async fn reorder_requires_a_permutation() {
        let repo = repo();
        let ids = |v: &[&str]| v.iter().map(|s| SectionId::from(*s)).collect::<Vec<_>>();

        assert!(repo.reorder_sections(ids(&["cars", "realty"])).await.is_err());
        assert!(repo
            .reorder_sections(ids(&["cars", "cars", "fashion", "auctions"]))
            .await
            .is_err());

        let sections = repo
            .reorder_sections(ids(&["auctions", "fashion", "realty", "cars"]))
            .await
            .unwrap();
        let names: Vec<_> = sections.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(names, ["auctions", "fashion", "realty", "cars"]);
    }

    #[tokio::test]
    async fn unbinding_clears_only_matching_sections() {
        let repo = repo();
        assert_eq!(repo.unbind_supervisor(&"1".into()).await.unwrap(), 1);
        let sections = repo.sections().await.unwrap();
        assert!(sections.iter().all(|s| s.supervisor_id.as_ref() != Some(&UserId::from("1"))));
        assert_eq!(sections[1].supervisor_id, Some("2".into()));
    }
}
