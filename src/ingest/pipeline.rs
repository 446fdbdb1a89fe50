//! Ingestion orchestrator: from a project directory to a published sandbox.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::deps::{map_dependencies, DependencyMapping};
use super::error::IngestError;
use super::html::{split_html, HtmlSplit};
use super::model::{DirectoryRecord, FileError, ModuleRecord, ResolutionFailure};
use super::tree::{map_tree, TreeMapping};
use crate::context::ServiceContext;
use crate::ports::{CreatedSandbox, SandboxDraft};

/// Most modules a sandbox may contain.
pub const MAX_MODULE_COUNT: usize = 50;

/// Most directories a sandbox may contain.
pub const MAX_DIRECTORY_COUNT: usize = 30;

const MANIFEST_FILE: &str = "package.json";
const SOURCE_DIR: &str = "src";

/// Everything gathered from a project, ready to hand to the sandbox API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestionPayload {
    /// Directory records.
    pub directories: Vec<DirectoryRecord>,
    /// Module records, including the generated index module.
    pub modules: Vec<ModuleRecord>,
    /// External script and stylesheet URLs from the entry point.
    pub external_resources: Vec<String>,
    /// Package name to exact version.
    pub dependencies: BTreeMap<String, String>,
    /// Files that were left out.
    pub file_errors: Vec<FileError>,
    /// Dependencies that could not be resolved.
    pub resolution_failures: Vec<ResolutionFailure>,
}

impl IngestionPayload {
    fn assemble(tree: TreeMapping, deps: DependencyMapping, html: HtmlSplit) -> Self {
        Self {
            directories: tree.directories,
            modules: tree.modules,
            external_resources: html.external_resources,
            dependencies: deps.resolved,
            file_errors: tree.errors,
            resolution_failures: deps.failures,
        }
    }

    /// Returns `true` if anything was left out of the payload.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.file_errors.is_empty() || !self.resolution_failures.is_empty()
    }

    /// Builds the upload body for the sandbox API.
    #[must_use]
    pub fn draft(&self) -> SandboxDraft {
        SandboxDraft {
            directories: self.directories.clone(),
            external_resources: self.external_resources.clone(),
            modules: self.modules.clone(),
            npm_dependencies: self.dependencies.clone(),
        }
    }
}

/// The confirmation an operator turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkpoint {
    /// Continuing despite files or dependencies that were left out.
    Warnings,
    /// Making the project public.
    Publication,
}

/// How a deployment ended, short of an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployOutcome {
    /// The sandbox was created.
    Published(CreatedSandbox),
    /// The operator stopped the deployment; nothing was uploaded.
    Declined(Checkpoint),
}

#[derive(Deserialize)]
struct Manifest {
    dependencies: Option<BTreeMap<String, String>>,
}

/// Paths the pipeline reads, relative to a project root.
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    /// The project root.
    pub root: PathBuf,
}

impl ProjectLayout {
    /// Creates the layout for the project at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// `<root>/package.json`.
    #[must_use]
    pub fn manifest(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    /// `<root>/public/index.html`.
    #[must_use]
    pub fn entry_point(&self) -> PathBuf {
        self.root.join("public").join("index.html")
    }

    /// `<root>/src`.
    #[must_use]
    pub fn source_dir(&self) -> PathBuf {
        self.root.join(SOURCE_DIR)
    }
}

/// Loads, maps and bounds-checks the project at `project`.
///
/// # Errors
///
/// Returns an error if the project, its manifest or its dependency block is
/// missing, if the entry point or source directory cannot be read, or if the
/// mapped project exceeds [`MAX_MODULE_COUNT`] or [`MAX_DIRECTORY_COUNT`].
pub async fn prepare(
    ctx: &ServiceContext,
    project: &Path,
) -> Result<IngestionPayload, IngestError> {
    if !ctx.fs.is_dir(project) {
        return Err(IngestError::MissingProject(project.to_path_buf()));
    }
    let layout = ProjectLayout::new(project);

    let ranges = load_dependencies(ctx, &layout)?;
    let index_html = load_entry_point(ctx, &layout)?;

    let deps = map_dependencies(ctx.registry.as_ref(), &ranges).await;
    let html = split_html(&index_html);
    let tree = map_tree(ctx.fs.as_ref(), ctx.id_gen.as_ref(), &layout.source_dir(), &html.body)?;

    let payload = IngestionPayload::assemble(tree, deps, html);
    check_size(&payload)?;
    Ok(payload)
}

/// Runs the whole pipeline: prepare, confirm with the operator, upload.
///
/// Warnings about left-out files or dependencies are written to `out` once
/// and need the operator's approval. Publication always needs it.
///
/// # Errors
///
/// Returns any [`prepare`] error, a prompt or output failure, or
/// [`IngestError::Upload`] if the sandbox service rejects the payload.
pub async fn deploy(
    ctx: &ServiceContext,
    project: &Path,
    token: &str,
    out: &mut dyn Write,
) -> Result<DeployOutcome, IngestError> {
    let payload = prepare(ctx, project).await?;

    if payload.has_warnings() {
        write_warnings(&payload, project, out)?;
        if !confirm(ctx, "Do you still want to continue deployment?", false)? {
            return Ok(DeployOutcome::Declined(Checkpoint::Warnings));
        }
    }

    writeln!(out, "By deploying, the code of your project will be made public.")?;
    if !confirm(ctx, "Are you sure you want to proceed with the deployment?", true)? {
        return Ok(DeployOutcome::Declined(Checkpoint::Publication));
    }

    writeln!(
        out,
        "Uploading {} modules and {} directories...",
        payload.modules.len(),
        payload.directories.len()
    )?;
    let created =
        ctx.sandbox.create_sandbox(&payload.draft(), token).await.map_err(IngestError::Upload)?;
    Ok(DeployOutcome::Published(created))
}

/// Fails if the payload is larger than the sandbox service accepts.
///
/// # Errors
///
/// Returns [`IngestError::TooManyModules`] or [`IngestError::TooManyDirectories`].
pub fn check_size(payload: &IngestionPayload) -> Result<(), IngestError> {
    if payload.modules.len() > MAX_MODULE_COUNT {
        return Err(IngestError::TooManyModules {
            count: payload.modules.len(),
            max: MAX_MODULE_COUNT,
        });
    }
    if payload.directories.len() > MAX_DIRECTORY_COUNT {
        return Err(IngestError::TooManyDirectories {
            count: payload.directories.len(),
            max: MAX_DIRECTORY_COUNT,
        });
    }
    Ok(())
}

fn load_dependencies(
    ctx: &ServiceContext,
    layout: &ProjectLayout,
) -> Result<BTreeMap<String, String>, IngestError> {
    let path = layout.manifest();
    if !ctx.fs.exists(&path) {
        return Err(IngestError::MissingManifest);
    }
    let contents =
        ctx.fs.read_to_string(&path).map_err(|e| IngestError::InvalidManifest(e.to_string()))?;
    let manifest: Manifest =
        serde_json::from_str(&contents).map_err(|e| IngestError::InvalidManifest(e.to_string()))?;
    manifest.dependencies.ok_or(IngestError::MissingDependencies)
}

fn load_entry_point(ctx: &ServiceContext, layout: &ProjectLayout) -> Result<String, IngestError> {
    let path = layout.entry_point();
    if !ctx.fs.exists(&path) {
        return Ok(String::new());
    }
    ctx.fs
        .read_to_string(&path)
        .map_err(|e| IngestError::EntryPoint { path, message: e.to_string() })
}

fn confirm(ctx: &ServiceContext, question: &str, default: bool) -> Result<bool, IngestError> {
    ctx.prompt.confirm(question, default).map_err(|e| IngestError::Prompt(e.to_string()))
}

fn write_warnings(
    payload: &IngestionPayload,
    project: &Path,
    out: &mut dyn Write,
) -> Result<(), IngestError> {
    if !payload.file_errors.is_empty() {
        writeln!(
            out,
            "Warning: there are {} files that cannot be uploaded:",
            payload.file_errors.len()
        )?;
        for error in &payload.file_errors {
            let relative = error.path.strip_prefix(project).unwrap_or(&error.path);
            writeln!(out, "  {}: {}", relative.display(), error.message)?;
        }
    }

    if !payload.resolution_failures.is_empty() {
        writeln!(
            out,
            "Warning: there are {} dependencies that cannot be resolved:",
            payload.resolution_failures.len()
        )?;
        for failure in &payload.resolution_failures {
            writeln!(out, "  {}@{}: {}", failure.name, failure.range, failure.message)?;
        }
    }
    Ok(())
}
