//! Project ingestion: mapping a local web project onto sandbox records.
//!
//! The pipeline reads `package.json`, `public/index.html` and the `src/`
//! tree through the [`crate::ports`] traits, and produces an
//! [`IngestionPayload`]. Per-item problems (unreadable files, unresolvable
//! dependencies) are collected alongside the results; only precondition
//! and size-limit failures abort.

pub mod deps;
pub mod error;
pub mod html;
pub mod model;
pub mod pipeline;
pub mod tree;

pub use deps::{map_dependencies, DependencyMapping};
pub use error::IngestError;
pub use html::{split_html, HtmlSplit};
pub use model::{DirectoryRecord, FileError, ModuleRecord, ResolutionFailure};
pub use pipeline::{
    check_size, deploy, prepare, Checkpoint, DeployOutcome, IngestionPayload, ProjectLayout,
    MAX_DIRECTORY_COUNT, MAX_MODULE_COUNT,
};
pub use tree::{map_tree, TreeMapping, INDEX_MODULE_TITLE};
