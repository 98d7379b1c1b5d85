//! Configuration discovery and effective settings resolution.
//!
//! ros-hooks reads `ros-hooks.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config.
//! Defaults:
//! - `output`: `human`
//! - `include_guard.allow_nolint`: false
//! - `include_guard.package_marker`: `package.xml`
//! - `include_guard.exclude`: none
//! - `gitmodules.path`: `.gitmodules`
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::{HookError, Result};
use crate::gitmodules::DEFAULT_GITMODULES;
use crate::include_guard::macro_name::DEFAULT_PACKAGE_MARKER;
use crate::include_guard::GuardOptions;
use glob::Pattern;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILES: [&str; 3] = ["ros-hooks.toml", "ros-hooks.yaml", "ros-hooks.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Include guard section under `[include_guard]`.
pub struct IncludeGuardCfg {
    pub allow_nolint: Option<bool>,
    pub package_marker: Option<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// `.gitmodules` section under `[gitmodules]`.
pub struct GitmodulesCfg {
    pub path: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `ros-hooks.toml|yaml`.
pub struct HooksConfig {
    pub output: Option<String>,
    pub include_guard: Option<IncludeGuardCfg>,
    pub gitmodules: Option<GitmodulesCfg>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_file: Option<PathBuf>,
    pub output: String,
    pub allow_nolint: bool,
    pub package_marker: String,
    pub exclude: Vec<Pattern>,
    pub gitmodules: PathBuf,
}

impl Effective {
    pub fn guard_options(&self) -> GuardOptions {
        GuardOptions {
            allow_nolint: self.allow_nolint,
            package_marker: self.package_marker.clone(),
            repo_root: self.repo_root.clone(),
            exclude: self.exclude.clone(),
        }
    }
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a config file or a `.git` entry is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_FILES.iter().any(|f| cur.join(f).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Path of the config file in `root`, if any.
pub fn config_path(root: &Path) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|f| root.join(f))
        .find(|p| p.is_file())
}

/// Load `HooksConfig` from `root`. `Ok(None)` when no config file exists.
pub fn load_config(root: &Path) -> Result<Option<HooksConfig>> {
    let Some(path) = config_path(root) else {
        return Ok(None);
    };
    let s = fs::read_to_string(&path).map_err(|e| HookError::io(&path, e))?;
    let invalid = |message: String| HookError::Config {
        path: path.clone(),
        message,
    };
    let cfg = if path.extension().is_some_and(|ext| ext == "toml") {
        toml::from_str::<HooksConfig>(&s).map_err(|e| invalid(e.to_string()))?
    } else {
        serde_yaml::from_str::<HooksConfig>(&s).map_err(|e| invalid(e.to_string()))?
    };
    Ok(Some(cfg))
}

/// CLI values that take precedence over the config file.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides<'a> {
    pub repo_root: Option<&'a str>,
    pub output: Option<&'a str>,
    pub allow_nolint: Option<bool>,
    pub gitmodules: Option<&'a str>,
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &CliOverrides<'_>) -> Result<Effective> {
    let start = PathBuf::from(cli.repo_root.unwrap_or("."));
    let start = fs::canonicalize(&start).unwrap_or(start);
    let repo_root = detect_repo_root(&start);
    let config_file = config_path(&repo_root);
    let cfg = load_config(&repo_root)?.unwrap_or_default();
    let guard = cfg.include_guard.unwrap_or_default();

    let output = cli
        .output
        .map(str::to_string)
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    if output != "human" && output != "json" {
        return Err(HookError::Config {
            path: config_file.clone().unwrap_or_else(|| repo_root.clone()),
            message: format!("unknown output mode '{}' (expected human|json)", output),
        });
    }

    let allow_nolint = cli.allow_nolint.or(guard.allow_nolint).unwrap_or(false);
    let package_marker = guard
        .package_marker
        .unwrap_or_else(|| DEFAULT_PACKAGE_MARKER.to_string());

    let mut exclude = Vec::with_capacity(guard.exclude.len());
    for pat in &guard.exclude {
        let compiled = Pattern::new(pat).map_err(|e| HookError::Config {
            path: config_file.clone().unwrap_or_else(|| repo_root.clone()),
            message: format!("bad exclude glob '{}': {}", pat, e),
        })?;
        exclude.push(compiled);
    }

    let gitmodules = cli
        .gitmodules
        .map(str::to_string)
        .or(cfg.gitmodules.and_then(|g| g.path))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_GITMODULES));

    Ok(Effective {
        repo_root,
        config_file,
        output,
        allow_nolint,
        package_marker,
        exclude,
        gitmodules,
    })
}
