/// In-memory project library with rename and delete
use crate::error::{Result, VizTwinError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub date: String,
    pub thumbnail: String,
}

impl Project {
    pub fn new(id: &str, name: &str, date: &str, thumbnail: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            date: date.to_string(),
            thumbnail: thumbnail.to_string(),
        }
    }
}

const MODERN_BUILDING: &str = "https://images.unsplash.com/photo-1703014172880-a9ad043097c1?crop=entropy&cs=tinysrgb&fit=max&fm=jpg&q=80&w=1080";
const POINT_CLOUD: &str = "https://images.unsplash.com/photo-1601648933230-1fcd7e547bc3?crop=entropy&cs=tinysrgb&fit=max&fm=jpg&q=80&w=1080";
const BLUEPRINT: &str = "https://images.unsplash.com/photo-1684450471771-b70596cf13dd?crop=entropy&cs=tinysrgb&fit=max&fm=jpg&q=80&w=1080";

/// A pending rename: which project, and the text typed so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameDraft {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default)]
pub struct ProjectLibrary {
    projects: Vec<Project>,
    draft: Option<RenameDraft>,
}

impl ProjectLibrary {
    pub fn new(projects: Vec<Project>) -> Self {
        Self {
            projects,
            draft: None,
        }
    }

    /// The demo library shipped with the dashboard
    pub fn seeded() -> Self {
        Self::new(vec![
            Project::new("1", "Downtown Office Building", "Oct 5, 2025", MODERN_BUILDING),
            Project::new("2", "Residential Complex A", "Oct 3, 2025", POINT_CLOUD),
            Project::new("3", "Warehouse Facility", "Sep 28, 2025", BLUEPRINT),
            Project::new("4", "Shopping Mall West Wing", "Sep 25, 2025", MODERN_BUILDING),
            Project::new("5", "Historic Building Restoration", "Sep 20, 2025", POINT_CLOUD),
            Project::new("6", "Corporate Headquarters", "Sep 15, 2025", BLUEPRINT),
        ])
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    /// True when the library should show its empty state
    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// "N projects in your library"
    pub fn summary(&self) -> String {
        format!("{} projects in your library", self.len())
    }

    pub fn draft(&self) -> Option<&RenameDraft> {
        self.draft.as_ref()
    }

    /// Open the rename editor for a project, seeded with its current name.
    /// Replaces any other rename in progress.
    pub fn begin_rename(&mut self, id: &str) -> Result<()> {
        let project = self
            .get(id)
            .ok_or_else(|| VizTwinError::UnknownProject(id.to_string()))?;
        self.draft = Some(RenameDraft {
            id: project.id.clone(),
            name: project.name.clone(),
        });
        Ok(())
    }

    pub fn edit_draft(&mut self, name: impl Into<String>) -> Result<()> {
        let draft = self.draft.as_mut().ok_or(VizTwinError::NotRenaming)?;
        draft.name = name.into();
        Ok(())
    }

    pub fn cancel_rename(&mut self) {
        self.draft = None;
    }

    /// Commit the draft. Only the project's `name` changes, and it is
    /// stored as typed. A blank name is rejected and the draft stays open.
    pub fn save_rename(&mut self) -> Result<&Project> {
        let draft = self.draft.as_ref().ok_or(VizTwinError::NotRenaming)?;
        if draft.name.trim().is_empty() {
            return Err(VizTwinError::EmptyName);
        }
        let name = draft.name.clone();
        let id = draft.id.clone();

        let project = self
            .projects
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| VizTwinError::UnknownProject(id.clone()))?;
        log::debug!("renaming project {} to {:?}", id, name);
        project.name = name;
        self.draft = None;
        Ok(project)
    }

    /// Remove the project with `id`, closing its rename draft if open
    pub fn delete(&mut self, id: &str) -> Result<Project> {
        let index = self
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| VizTwinError::UnknownProject(id.to_string()))?;
        if self.draft.as_ref().is_some_and(|d| d.id == id) {
            self.draft = None;
        }
        log::debug!("deleting project {}", id);
        Ok(self.projects.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded() {
        let library = ProjectLibrary::seeded();
        assert_eq!(library.len(), 6);
        assert_eq!(library.summary(), "6 projects in your library");
        assert_eq!(library.get("3").unwrap().name, "Warehouse Facility");
    }

    #[test]
    fn test_rename_only_changes_name() {
        let mut library = ProjectLibrary::seeded();
        let before = library.get("2").unwrap().clone();

        library.begin_rename("2").unwrap();
        assert_eq!(library.draft().unwrap().name, "Residential Complex A");
        library.edit_draft("Residential Complex B").unwrap();
        let after = library.save_rename().unwrap().clone();

        assert_eq!(after.name, "Residential Complex B");
        assert_eq!(after.id, before.id);
        assert_eq!(after.date, before.date);
        assert_eq!(after.thumbnail, before.thumbnail);
        assert!(library.draft().is_none());
        // other projects untouched
        assert_eq!(library.get("1").unwrap().name, "Downtown Office Building");
    }

    #[test]
    fn test_rename_errors() {
        let mut library = ProjectLibrary::seeded();
        assert!(matches!(library.save_rename(), Err(VizTwinError::NotRenaming)));
        assert!(matches!(library.begin_rename("42"), Err(VizTwinError::UnknownProject(_))));

        library.begin_rename("1").unwrap();
        library.edit_draft("   ").unwrap();
        assert!(matches!(library.save_rename(), Err(VizTwinError::EmptyName)));
        assert!(library.draft().is_some());
        library.cancel_rename();
        assert_eq!(library.get("1").unwrap().name, "Downtown Office Building");
    }

    #[test]
    fn test_rename_keeps_text_as_typed() {
        let mut library = ProjectLibrary::seeded();
        library.begin_rename("2").unwrap();
        library.edit_draft("  Spaced  ").unwrap();
        assert_eq!(library.save_rename().unwrap().name, "  Spaced  ");
        assert_eq!(library.get("2").unwrap().name, "  Spaced  ");
    }

    #[test]
    fn test_delete_one() {
        let mut library = ProjectLibrary::seeded();
        let removed = library.delete("4").unwrap();
        assert_eq!(removed.name, "Shopping Mall West Wing");
        assert_eq!(library.len(), 5);
        assert!(library.get("4").is_none());
        assert!(library.delete("4").is_err());
        assert_eq!(library.len(), 5);
    }

    #[test]
    fn test_delete_all_reaches_empty_state() {
        let mut library = ProjectLibrary::seeded();
        library.begin_rename("6").unwrap();
        for id in ["1", "2", "3", "4", "5", "6"] {
            assert!(!library.is_empty());
            library.delete(id).unwrap();
        }
        assert!(library.is_empty());
        assert!(library.draft().is_none());
        assert_eq!(library.summary(), "0 projects in your library");
    }
}
