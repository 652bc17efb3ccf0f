//! # GridFrame
//!
//! Real-world grid overlays for photos of documents, artwork and walls.
//!
//! ## Architecture
//!
//! GridFrame is organized as a workspace with multiple crates:
//!
//! 1. **gridframe-core** - Unit conversion, shared constants, error taxonomy
//! 2. **gridframe-designer** - Grid geometry, crop ratios, edit state
//! 3. **gridframe-projects** - Project records and key-value persistence
//! 4. **gridframe-settings** - Configuration files
//! 5. **gridframe** - Logging and session bootstrap plus the `gridframe` CLI
//!
//! ## Data flow
//!
//! ```text
//! EditCommand -> EditStore -> grid_layout() -> GridLayout (renderer)
//!                    ^  |
//!          load      |  v  save
//!               ProjectStore -> KeyValueStorage (memory | files)
//! ```

pub mod cli;

pub use gridframe_core::{Error, LengthUnit, Measurement, PhysicalUnit, Result, StrokeColor};
pub use gridframe_designer as designer;
pub use gridframe_projects as projects;
pub use gridframe_settings as settings;

use anyhow::Context;
use gridframe_designer::EditStore;
use gridframe_projects::{EditorSession, FileStorage, KeyValueStorage, MemoryStorage, ProjectStore};
use gridframe_settings::{Config, LoggingSettings, StorageBackend, StorageSettings};
use std::sync::Arc;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - RUST_LOG environment variable support, falling back to the configured level
/// - Human-readable or JSON lines output on stderr
///
/// Calling this twice is an error rather than a panic.
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .with_context(|| format!("Invalid log level '{}'", settings.level))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if settings.json {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_current_span(false);
        registry.with(fmt_layer).try_init()
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true);
        registry.with(fmt_layer).try_init()
    };

    result.map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))
}

/// Open the configured key-value backend
pub async fn open_storage(settings: &StorageSettings) -> anyhow::Result<Arc<dyn KeyValueStorage>> {
    match settings.backend {
        StorageBackend::Memory => {
            tracing::debug!("Using in-memory project storage");
            Ok(Arc::new(MemoryStorage::new()))
        }
        StorageBackend::File => {
            let dir = settings.resolved_data_dir()?;
            let storage = FileStorage::open(&dir)
                .await
                .with_context(|| format!("Failed to open project storage at {}", dir.display()))?;
            Ok(Arc::new(storage))
        }
    }
}

/// Project store for `config`, reconciled against its backend.
///
/// A failed reconciliation is logged and does not prevent startup.
pub async fn open_project_store(config: &Config) -> anyhow::Result<ProjectStore> {
    let storage = open_storage(&config.storage).await?;
    let store = ProjectStore::new(storage).with_max_projects(config.storage.max_projects);

    match store.reconcile().await {
        Ok(report) if !report.is_clean() => tracing::info!(
            orphans = report.orphans_removed.len(),
            dangling = report.dangling_removed.len(),
            "Startup reconciliation repaired project storage"
        ),
        Ok(_) => {}
        Err(e) => tracing::warn!("Startup reconciliation skipped: {}", e),
    }

    Ok(store)
}

/// Editor session seeded with the configured grid defaults
pub async fn bootstrap_session(config: &Config) -> anyhow::Result<EditorSession> {
    let defaults = config.grid.edit_defaults()?;
    let projects = open_project_store(config).await?;
    Ok(EditorSession::new(projects, EditStore::with_defaults(&defaults)))
}
