//! Project records as persisted in the key-value store.
//!
//! Field names are camelCase on the wire so that records written by
//! earlier clients of the same storage layout keep loading.

use chrono::{DateTime, Utc};
use gridframe_core::units::LengthUnit;
use gridframe_designer::{EditSnapshot, ImageGeometry, Manipulation, PaperPreset, PaperSettings};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where an image came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageSource {
    Camera,
    Gallery,
    /// Bundled sample image
    #[default]
    Default,
}

/// Image as handed over by the acquisition layer.
///
/// `uri` is an opaque handle; its bytes are never interpreted here.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcquiredImage {
    pub uri: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub format: Option<String>,
    pub mime_type: Option<String>,
    pub file_size: Option<u64>,
    pub file_name: Option<String>,
}

/// The image a project is built around
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub uri: String,
    #[serde(default)]
    pub source: ImageSource,
    #[serde(default)]
    pub pixel_width: Option<u32>,
    #[serde(default)]
    pub pixel_height: Option<u32>,
    /// Only meaningful when `paper_preset` is set
    #[serde(default)]
    pub real_world_width: Option<f64>,
    /// Only meaningful when `paper_preset` is set
    #[serde(default)]
    pub real_world_height: Option<f64>,
    #[serde(default)]
    pub real_world_unit: LengthUnit,
    #[serde(default)]
    pub paper_preset: PaperPreset,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub file_name: Option<String>,
}

impl ImageRecord {
    pub fn new(uri: impl Into<String>, source: ImageSource) -> Self {
        Self {
            uri: uri.into(),
            source,
            pixel_width: None,
            pixel_height: None,
            real_world_width: None,
            real_world_height: None,
            real_world_unit: LengthUnit::Mm,
            paper_preset: PaperPreset::Unset,
            format: None,
            mime_type: None,
            file_size: None,
            file_name: None,
        }
    }

    pub fn from_acquired(image: AcquiredImage, source: ImageSource) -> Self {
        Self {
            pixel_width: image.width,
            pixel_height: image.height,
            format: image.format,
            mime_type: image.mime_type,
            file_size: image.file_size,
            file_name: image.file_name,
            ..Self::new(image.uri, source)
        }
    }

    /// Pixel width / height when both are known and non-zero
    pub fn aspect_ratio(&self) -> Option<f64> {
        match (self.pixel_width, self.pixel_height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some(f64::from(w) / f64::from(h)),
            _ => None,
        }
    }

    /// Real-world size for grid computation.
    ///
    /// `None` while no paper preset is chosen, when either dimension is
    /// missing or non-positive, or when the unit is pixels.
    pub fn geometry(&self) -> Option<ImageGeometry> {
        if !self.paper_preset.is_set() {
            return None;
        }
        let unit = self.real_world_unit.physical()?;
        match (self.real_world_width, self.real_world_height) {
            (Some(w), Some(h)) if w > 0.0 && h > 0.0 => Some(ImageGeometry {
                real_width: w,
                real_height: h,
                unit,
            }),
            _ => None,
        }
    }

    /// Copy the paper selection from the edit state into the record
    pub fn apply_paper(&mut self, paper: &PaperSettings) {
        self.paper_preset = paper.preset;
        if paper.preset.is_set() {
            self.real_world_width = paper.width;
            self.real_world_height = paper.height;
            self.real_world_unit = paper.unit;
        } else {
            self.real_world_width = None;
            self.real_world_height = None;
        }
    }
}

/// A saved unit of work: one image plus its edits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub image_record: ImageRecord,
    #[serde(default)]
    pub edit_state_snapshot: EditSnapshot,
    #[serde(default)]
    pub manipulations: Vec<Manipulation>,
    #[serde(default)]
    pub thumbnail_uri: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
}

impl Project {
    /// New project with a fresh id and both timestamps set to now
    pub fn new(name: impl Into<String>, image_record: ImageRecord) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            created_at: now,
            updated_at: now,
            image_record,
            edit_state_snapshot: EditSnapshot::default(),
            manipulations: Vec::new(),
            thumbnail_uri: None,
            is_favorite: false,
        }
    }

    pub fn summary(&self) -> ProjectSummary {
        ProjectSummary::from(self)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Index entry: a project without its edit detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub image_record: ImageRecord,
    #[serde(default)]
    pub thumbnail_uri: Option<String>,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub manipulation_count: usize,
}

impl From<&Project> for ProjectSummary {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id.clone(),
            name: project.name.clone(),
            created_at: project.created_at,
            updated_at: project.updated_at,
            image_record: project.image_record.clone(),
            thumbnail_uri: project.thumbnail_uri.clone(),
            is_favorite: project.is_favorite,
            manipulation_count: project.manipulations.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_project_has_unique_id() {
        let a = Project::new("a", ImageRecord::new("file:///a.jpg", ImageSource::Gallery));
        let b = Project::new("b", ImageRecord::new("file:///b.jpg", ImageSource::Gallery));
        assert_ne!(a.id, b.id);
        assert_eq!(a.created_at, a.updated_at);
    }

    #[test]
    fn test_aspect_ratio() {
        let mut image = ImageRecord::new("x", ImageSource::Camera);
        assert_eq!(image.aspect_ratio(), None);
        image.pixel_width = Some(400);
        image.pixel_height = Some(0);
        assert_eq!(image.aspect_ratio(), None);
        image.pixel_height = Some(200);
        assert_eq!(image.aspect_ratio(), Some(2.0));
    }

    #[test]
    fn test_geometry_requires_paper() {
        let mut image = ImageRecord::new("x", ImageSource::Camera);
        image.real_world_width = Some(210.0);
        image.real_world_height = Some(297.0);
        assert_eq!(image.geometry(), None);

        image.paper_preset = PaperPreset::A4;
        let geometry = image.geometry().unwrap();
        assert_eq!(geometry.real_width, 210.0);

        image.real_world_unit = LengthUnit::Px;
        assert_eq!(image.geometry(), None);
    }

    #[test]
    fn test_apply_paper() {
        let mut image = ImageRecord::new("x", ImageSource::Camera);
        image.apply_paper(&PaperSettings {
            preset: PaperPreset::Custom,
            width: Some(30.0),
            height: Some(40.0),
            unit: LengthUnit::Cm,
        });
        assert_eq!(image.real_world_unit, LengthUnit::Cm);
        assert!(image.geometry().is_some());

        image.apply_paper(&PaperSettings::default());
        assert_eq!(image.real_world_width, None);
        assert_eq!(image.geometry(), None);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let project = Project::new("demo", ImageRecord::new("content://1", ImageSource::Camera));
        let json = serde_json::to_value(&project).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("editStateSnapshot").is_some());
        assert_eq!(json["imageRecord"]["source"], "camera");
        assert_eq!(json["isFavorite"], false);

        let summary = serde_json::to_value(project.summary()).unwrap();
        assert!(summary.get("editStateSnapshot").is_none());
        assert!(summary.get("manipulations").is_none());
    }

    #[test]
    fn test_from_acquired() {
        let image = ImageRecord::from_acquired(
            AcquiredImage {
                uri: "file:///photo.png".to_string(),
                width: Some(1200),
                height: Some(800),
                file_name: Some("photo.png".to_string()),
                ..Default::default()
            },
            ImageSource::Gallery,
        );
        assert_eq!(image.aspect_ratio(), Some(1.5));
        assert_eq!(image.file_name.as_deref(), Some("photo.png"));
        assert_eq!(image.paper_preset, PaperPreset::Unset);
    }
}
