//! API facade for the application.
//!
//! Builds the filesystem-backed context (settings, stack documents, instance registry) and
//! hands it to the command layer.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::adapters::{FilesystemStackSource, YamlInstanceStore};
use crate::app::AppContext;
use crate::app::commands::{deploy, destroy, list, plan, status};
use crate::domain::overlay::parse_overlay_content;
use crate::domain::settings::{SETTINGS_FILE, parse_settings_content};
use crate::domain::{DeploymentPlan, InstanceRecord, Overlay, Settings};
use crate::ports::StackSource;

pub use crate::app::commands::deploy::{DeployOptions, DeployOutcome};
pub use crate::app::commands::destroy::DestroyOutcome;
pub use crate::app::commands::plan::{PlanFormat, PlanOptions};
pub use crate::domain::AppError;

type FilesystemContext = AppContext<FilesystemStackSource, YamlInstanceStore>;

fn home_dir() -> Result<PathBuf, AppError> {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .ok_or_else(|| AppError::config_error("HOME environment variable is not set"))
}

/// Load `~/.config/stack/config.toml`. A missing file yields default settings.
pub fn load_settings(home: &Path) -> Result<Settings, AppError> {
    let path = home.join(SETTINGS_FILE);
    if !path.exists() {
        return Ok(Settings::default());
    }
    debug!(path = %path.display(), "loading settings");
    parse_settings_content(&fs::read_to_string(&path)?)
}

/// Create an `AppContext` resolving stack references from `base_dir`.
fn create_context(base_dir: PathBuf, home: &Path) -> Result<FilesystemContext, AppError> {
    let settings = load_settings(home)?;
    let instances = YamlInstanceStore::new(settings.instances_file(home));
    Ok(AppContext::new(FilesystemStackSource::new(base_dir), instances, settings))
}

fn current_context() -> Result<FilesystemContext, AppError> {
    create_context(std::env::current_dir()?, &home_dir()?)
}

/// Read the overlay given on the command line, else the `config.yaml` beside the root stack.
fn load_overlay(
    source: &FilesystemStackSource,
    spec: &str,
    config: Option<&Path>,
) -> Result<Overlay, AppError> {
    let path = match config {
        Some(path) => Some(path.to_path_buf()),
        None => FilesystemStackSource::overlay_beside(&source.resolve(spec, None)?),
    };
    let Some(path) = path else {
        return Ok(Overlay::default());
    };

    debug!(path = %path.display(), "loading overlay");
    let content = fs::read_to_string(&path).map_err(|e| {
        AppError::config_error(format!("Failed to read overlay '{}': {}", path.display(), e))
    })?;
    parse_overlay_content(&content)
}

fn plan_options(
    ctx: &FilesystemContext,
    spec: &str,
    config: Option<&Path>,
    model: Option<&str>,
) -> Result<PlanOptions, AppError> {
    Ok(PlanOptions {
        spec: spec.to_string(),
        overlay: load_overlay(ctx.source(), spec, config)?,
        model: model.map(str::to_string),
    })
}

// =============================================================================
// Plan Command API
// =============================================================================

/// Compile the stack at `spec` into a deployment plan.
pub fn plan(
    spec: &str,
    config: Option<&Path>,
    model: Option<&str>,
) -> Result<DeploymentPlan, AppError> {
    let ctx = current_context()?;
    let options = plan_options(&ctx, spec, config, model)?;
    plan::execute(&ctx, &options)
}

// =============================================================================
// Instance Command API
// =============================================================================

/// Record a stack instance and return the commands that create it.
pub fn deploy(
    spec: &str,
    instance: &str,
    config: Option<&Path>,
    model: Option<&str>,
) -> Result<DeployOutcome, AppError> {
    let ctx = current_context()?;
    let options = DeployOptions {
        plan: plan_options(&ctx, spec, config, model)?,
        instance: instance.to_string(),
    };
    deploy::execute(&ctx, &options)
}

/// Look up a recorded instance.
pub fn status(instance: &str) -> Result<InstanceRecord, AppError> {
    status::execute(&current_context()?, instance)
}

/// Forget a recorded instance and return its teardown commands.
pub fn destroy(instance: &str) -> Result<DestroyOutcome, AppError> {
    destroy::execute(&current_context()?, instance)
}

/// All recorded instances.
pub fn list() -> Result<Vec<InstanceRecord>, AppError> {
    list::execute(&current_context()?)
}
