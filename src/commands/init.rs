//! Init command - Write commented configuration templates

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::color::{self, ColorMode};
use crate::config::Config;
use crate::integrations::git::repo_root;

/// What happened to one config file
#[derive(Debug, PartialEq, Eq)]
enum Written {
    Created,
    Skipped,
}

/// Shorten paths under the home directory to `~/...`
fn display_path(path: &Path) -> String {
    dirs::home_dir()
        .and_then(|home| path.strip_prefix(home).ok().map(Path::to_path_buf))
        .map_or_else(
            || path.display().to_string(),
            |rest| format!("~/{}", rest.display()),
        )
}

fn write_template(path: &Path, template: &str, force: bool) -> Result<Written> {
    if path.exists() && !force {
        return Ok(Written::Skipped);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
    }
    std::fs::write(path, template)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    Ok(Written::Created)
}

fn init_one(
    path: &Path,
    template: &str,
    force: bool,
    label: &str,
    color_mode: ColorMode,
) -> Result<()> {
    match write_template(path, template, force)? {
        Written::Created => eprintln!(
            "{}",
            color::success(
                color_mode,
                format!("Created {label} config: {}", display_path(path))
            )
        ),
        Written::Skipped => {
            eprintln!(
                "{}",
                color::warn(
                    color_mode,
                    format!("{label} config already exists: {}", display_path(path))
                )
            );
            eprintln!("Use --force to overwrite");
        }
    }
    Ok(())
}

/// `.gh-buddy.toml` at the repository top level, or in the current directory
fn local_target() -> PathBuf {
    repo_root().map_or_else(
        |_| Config::local_config_path(),
        |root| Config::local_config_path_from(&root),
    )
}

/// Initialize configuration files (both scopes unless one is selected)
///
/// # Errors
/// Returns an error if:
/// - Global config path cannot be determined
/// - File write fails
pub fn cmd_init(
    scope_global: bool,
    scope_local: bool,
    force: bool,
    color_mode: ColorMode,
) -> Result<()> {
    if scope_global || !scope_local {
        let Some(path) = Config::global_config_path() else {
            anyhow::bail!(
                "Could not determine global config path (HOME directory not found). \
                 Please set the HOME environment variable or XDG_CONFIG_HOME."
            );
        };
        init_one(&path, Config::template_global(), force, "Global", color_mode)?;
    }

    if scope_local || !scope_global {
        init_one(
            &local_target(),
            Config::template_local(),
            force,
            "Local",
            color_mode,
        )?;
    }

    Ok(())
}
