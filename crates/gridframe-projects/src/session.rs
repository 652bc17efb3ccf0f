//! Editor session: the working edit state paired with project storage.
//!
//! Loading a project resets the edit store and repopulates it from the
//! saved snapshot; saving merges the current snapshot back into the
//! project record.

use crate::error::{ProjectError, ProjectResult};
use crate::manager::ProjectStore;
use crate::model::{ImageRecord, Project};
use chrono::Utc;
use gridframe_designer::{EditCommand, EditStore, GridLayout};

#[derive(Debug)]
pub struct EditorSession {
    projects: ProjectStore,
    edits: EditStore,
    image: Option<ImageRecord>,
    current_id: Option<String>,
}

impl EditorSession {
    pub fn new(projects: ProjectStore, edits: EditStore) -> Self {
        Self {
            projects,
            edits,
            image: None,
            current_id: None,
        }
    }

    pub fn projects(&self) -> &ProjectStore {
        &self.projects
    }

    pub fn edits(&self) -> &EditStore {
        &self.edits
    }

    pub fn edits_mut(&mut self) -> &mut EditStore {
        &mut self.edits
    }

    pub fn image(&self) -> Option<&ImageRecord> {
        self.image.as_ref()
    }

    /// Id of the project being edited, `None` until first save
    pub fn current_id(&self) -> Option<&str> {
        self.current_id.as_deref()
    }

    pub fn dispatch(&mut self, command: EditCommand) -> bool {
        self.edits.dispatch(command)
    }

    /// Start editing a new image with fresh edits
    pub fn open_image(&mut self, image: ImageRecord) {
        self.edits.reset();
        self.current_id = None;
        self.note_natural_size(&image);
        tracing::info!(uri = %image.uri, "Opened image");
        self.image = Some(image);
    }

    /// Load a saved project. Returns false, with the selection cleared,
    /// when the project is missing or unreadable.
    pub async fn load_project(&mut self, id: &str) -> ProjectResult<bool> {
        let Some(project) = self.projects.get_detail(id).await? else {
            tracing::warn!(id, "Project could not be loaded, clearing selection");
            self.clear();
            return Ok(false);
        };

        self.edits
            .load(project.edit_state_snapshot, project.manipulations);
        self.note_natural_size(&project.image_record);
        self.image = Some(project.image_record);
        self.current_id = Some(project.id);
        tracing::info!(id, "Loaded project");
        Ok(true)
    }

    /// Save the working state. The first save of an image creates the
    /// project; later saves update it and stamp `updated_at`.
    pub async fn save_current(&mut self, name: Option<&str>) -> ProjectResult<Project> {
        let Some(image) = self.image.clone() else {
            return Err(ProjectError::InvalidProject("no image is open".to_string()));
        };

        let existing = match &self.current_id {
            Some(id) => self.projects.get_detail(id).await?,
            None => None,
        };

        let mut project = match existing {
            Some(mut project) => {
                project.touch();
                project
            }
            None => {
                let mut project = Project::new(default_name(&image), image.clone());
                if let Some(id) = &self.current_id {
                    // The record vanished underneath us; recreate it under the same id.
                    project.id = id.clone();
                }
                project
            }
        };

        if let Some(name) = name {
            project.name = name.to_string();
        }
        project.image_record = image;
        project.image_record.apply_paper(&self.edits.state().paper);
        project.edit_state_snapshot = self.edits.snapshot();
        project.manipulations = self.edits.manipulations().to_vec();

        self.projects.save(&project).await?;
        self.image = Some(project.image_record.clone());
        self.current_id = Some(project.id.clone());
        Ok(project)
    }

    /// Drop the current image and edits
    pub fn clear(&mut self) {
        self.edits.reset();
        self.image = None;
        self.current_id = None;
    }

    /// Alias of [`clear`](Self::clear) for the "new project" action
    pub fn new_project(&mut self) {
        self.clear();
    }

    /// Delete the current project from storage and clear the session.
    /// Returns false when nothing was saved yet.
    pub async fn delete_current(&mut self) -> ProjectResult<bool> {
        let Some(id) = self.current_id.clone() else {
            return Ok(false);
        };
        self.projects.delete(&id).await?;
        self.clear();
        Ok(true)
    }

    /// Grid layout for the working paper settings over a container
    pub fn grid_layout(&self, container_width_px: f64, container_height_px: f64) -> GridLayout {
        let Some(image) = &self.image else {
            return GridLayout::default();
        };
        let mut record = image.clone();
        record.apply_paper(&self.edits.state().paper);
        match record.geometry() {
            Some(geometry) => self
                .edits
                .grid_layout(container_width_px, container_height_px, &geometry),
            None => GridLayout::default(),
        }
    }

    fn note_natural_size(&mut self, image: &ImageRecord) {
        if let (Some(width), Some(height)) = (image.pixel_width, image.pixel_height) {
            self.edits.dispatch(EditCommand::SetNaturalSize {
                width: f64::from(width),
                height: f64::from(height),
            });
        }
    }
}

fn default_name(image: &ImageRecord) -> String {
    image
        .file_name
        .clone()
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| format!("Project {}", Utc::now().format("%Y-%m-%d %H:%M")))
}
