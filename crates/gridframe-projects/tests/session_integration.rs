//! Integration tests for the editor session

use gridframe_designer::{EditCommand, EditStore, PaperPreset, RatioPreset};
use gridframe_projects::{
    AcquiredImage, EditorSession, ImageRecord, ImageSource, MemoryStorage, ProjectError,
    ProjectStore,
};
use std::sync::Arc;

fn session() -> EditorSession {
    let store = ProjectStore::new(Arc::new(MemoryStorage::new()));
    EditorSession::new(store, EditStore::default())
}

fn photo() -> ImageRecord {
    ImageRecord::from_acquired(
        AcquiredImage {
            uri: "file:///photos/wall.jpg".to_string(),
            width: Some(3000),
            height: Some(2000),
            file_name: Some("wall.jpg".to_string()),
            ..Default::default()
        },
        ImageSource::Camera,
    )
}

#[tokio::test]
async fn test_save_requires_an_image() {
    let mut session = session();
    let err = session.save_current(None).await.unwrap_err();
    assert!(matches!(err, ProjectError::InvalidProject(_)));
}

#[tokio::test]
async fn test_first_save_creates_then_updates() {
    let mut session = session();
    session.open_image(photo());
    session.dispatch(EditCommand::SetGridVisible(true));

    let created = session.save_current(None).await.unwrap();
    assert_eq!(created.name, "wall.jpg");
    assert_eq!(session.current_id(), Some(created.id.as_str()));
    assert!(created.edit_state_snapshot.grid.is_grid_visible);
    assert_eq!(created.manipulations.len(), 1);

    session.dispatch(EditCommand::RotateRight);
    let updated = session.save_current(Some("Wall")).await.unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Wall");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);
    assert_eq!(updated.edit_state_snapshot.rotation, 90.0);

    let index = session.projects().list_summaries().await.unwrap();
    assert_eq!(index.len(), 1);
    assert_eq!(index[0].manipulation_count, 2);
}

#[tokio::test]
async fn test_load_restores_edits_and_image() {
    let mut session = session();
    session.open_image(photo());
    session.dispatch(EditCommand::SetPaperPreset(PaperPreset::A4));
    session.dispatch(EditCommand::SetGridVisible(true));
    let saved = session.save_current(None).await.unwrap();
    assert_eq!(saved.image_record.paper_preset, PaperPreset::A4);
    assert_eq!(saved.image_record.real_world_width, Some(210.0));

    session.new_project();
    assert!(session.image().is_none());
    assert!(!session.edits().state().grid.is_grid_visible);

    assert!(session.load_project(&saved.id).await.unwrap());
    assert_eq!(session.current_id(), Some(saved.id.as_str()));
    assert_eq!(session.edits().state().ratio_preset, RatioPreset::A4);
    assert_eq!(session.edits().state().natural_aspect, Some(1.5));
    assert!(!session.edits().can_undo());

    let layout = session.grid_layout(210.0, 297.0);
    assert_eq!(layout.cols, 10);
    assert_eq!(layout.rows, 14);
}

#[tokio::test]
async fn test_loading_missing_project_clears_selection() {
    let mut session = session();
    session.open_image(photo());
    session.save_current(None).await.unwrap();

    assert!(!session.load_project("does-not-exist").await.unwrap());
    assert!(session.current_id().is_none());
    assert!(session.image().is_none());
}

#[tokio::test]
async fn test_delete_current() {
    let mut session = session();
    assert!(!session.delete_current().await.unwrap());

    session.open_image(photo());
    let saved = session.save_current(None).await.unwrap();
    assert!(session.delete_current().await.unwrap());
    assert!(session.current_id().is_none());
    assert!(session.projects().get_detail(&saved.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_grid_layout_needs_paper() {
    let mut session = session();
    session.open_image(photo());
    session.dispatch(EditCommand::SetGridVisible(true));
    assert!(session.grid_layout(300.0, 200.0).is_empty());

    session.dispatch(EditCommand::SetCustomDimensions {
        width: Some(60.0),
        height: Some(40.0),
        unit: gridframe_core::LengthUnit::Cm,
    });
    let layout = session.grid_layout(300.0, 200.0);
    // 2 cm cells on a 60 x 40 cm page
    assert_eq!(layout.cols, 30);
    assert_eq!(layout.rows, 20);
}
