//! # GridFrame Projects
//!
//! Saved projects and the local key-value persistence behind them.
//!
//! - [`model`]: project, image and summary records
//! - [`storage`]: the async key-value port with memory and file backends
//! - [`manager`]: the project store (index, detail records, import/export)
//! - [`session`]: the editor session tying edits to storage

pub mod error;
pub mod manager;
pub mod model;
pub mod session;
pub mod storage;

pub use error::{ProjectError, ProjectResult};
pub use manager::{ProjectStore, ReconcileReport};
pub use model::{AcquiredImage, ImageRecord, ImageSource, Project, ProjectSummary};
pub use session::EditorSession;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
