//! Include guard normalizer for C/C++ headers in ROS packages.
//!
//! For each header the expected guard macro is derived from the path below
//! the nearest package root (the directory holding `package.xml`). The
//! header's first `#ifndef`, first `#define` and last `#endif` are compared
//! against it and mismatched lines are rewritten in place.
//!
//! Outcomes per file:
//! - no package root or excluded by config: skipped;
//! - `#pragma once`: accepted as is;
//! - incomplete guard: reported, left untouched, fails the run;
//! - wrong guard: reported, fixed, still fails the run so the commit is
//!   re-staged with the fix.

pub mod directive;
pub mod macro_name;

use crate::error::{HookError, Result};
use crate::models::{HookReport, Issue, IssueKind};
use crate::utils::display_path;
use directive::IncludeGuard;
use glob::Pattern;
use std::fs;
use std::path::{Path, PathBuf};

pub const HOOK_NAME: &str = "include-guard";

/// Resolved settings for one include guard run.
#[derive(Debug, Clone)]
pub struct GuardOptions {
    pub allow_nolint: bool,
    pub package_marker: String,
    /// Canonical repository root that `exclude` globs are relative to.
    pub repo_root: PathBuf,
    pub exclude: Vec<Pattern>,
}

impl Default for GuardOptions {
    fn default() -> Self {
        GuardOptions {
            allow_nolint: false,
            package_marker: macro_name::DEFAULT_PACKAGE_MARKER.to_string(),
            repo_root: PathBuf::from("."),
            exclude: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoPackageRoot,
    Excluded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Conformant,
    PragmaOnce,
    Skipped(SkipReason),
    NoGuard,
    Fixed { macro_name: String },
}

impl FileOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, FileOutcome::NoGuard | FileOutcome::Fixed { .. })
    }
}

/// Match excludes lexically so excluded paths never touch the filesystem.
fn is_excluded(path: &Path, opts: &GuardOptions) -> bool {
    if opts.exclude.is_empty() {
        return false;
    }
    let abs = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let rel = pathdiff::diff_paths(&abs, &opts.repo_root).unwrap_or(abs);
    opts.exclude
        .iter()
        .any(|pat| pat.matches_path(&rel) || pat.matches_path(path))
}

/// Check one header and fix its guard when it is wrong.
pub fn check_file(path: &Path, opts: &GuardOptions) -> Result<FileOutcome> {
    if is_excluded(path, opts) {
        tracing::debug!(file = %path.display(), "excluded by config");
        return Ok(FileOutcome::Skipped(SkipReason::Excluded));
    }
    let abs = fs::canonicalize(path).map_err(|e| HookError::io(path, e))?;

    let Some(root) = macro_name::find_package_root(&abs, &opts.package_marker) else {
        tracing::debug!(file = %path.display(), marker = %opts.package_marker, "no package root");
        return Ok(FileOutcome::Skipped(SkipReason::NoPackageRoot));
    };
    let relative = pathdiff::diff_paths(&abs, &root).unwrap_or_else(|| abs.clone());
    let name = macro_name::macro_name(&relative);

    let text = fs::read_to_string(path).map_err(|e| HookError::io(path, e))?;
    let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
    let mut guard = IncludeGuard::scan(&lines);

    if guard.has_pragma_once {
        return Ok(FileOutcome::PragmaOnce);
    }
    if !guard.is_present() {
        return Ok(FileOutcome::NoGuard);
    }

    guard.prepare(&name, opts.allow_nolint);
    if !guard.mismatch() {
        return Ok(FileOutcome::Conformant);
    }
    guard.overwrite(&mut lines);
    fs::write(path, lines.join("\n")).map_err(|e| HookError::io(path, e))?;
    tracing::debug!(file = %path.display(), macro_name = %name, "rewrote include guard");
    Ok(FileOutcome::Fixed { macro_name: name })
}

/// Run the hook over `files` in order, stopping at the first fatal error.
///
/// The report covers every file handled before the error, so fixes already
/// written to disk are still reported.
pub fn run_include_guard<P: AsRef<Path>>(
    files: &[P],
    opts: &GuardOptions,
) -> (HookReport, Option<HookError>) {
    let mut report = HookReport::default();
    for file in files {
        let path = file.as_ref();
        let outcome = match check_file(path, opts) {
            Ok(o) => o,
            Err(e) => return (report, Some(e)),
        };
        report.summary.files += 1;
        let shown = display_path(path);
        match &outcome {
            FileOutcome::Skipped(_) => report.summary.skipped += 1,
            FileOutcome::Conformant | FileOutcome::PragmaOnce => report.summary.checked += 1,
            FileOutcome::NoGuard => {
                report.summary.checked += 1;
                report.issues.push(Issue {
                    file: shown.clone(),
                    hook: HOOK_NAME.into(),
                    kind: IssueKind::NoIncludeGuard,
                    message: format!("No include guard in {}", shown),
                    fixed: false,
                });
            }
            FileOutcome::Fixed { macro_name } => {
                report.summary.checked += 1;
                report.summary.fixed += 1;
                report.issues.push(Issue {
                    file: shown.clone(),
                    hook: HOOK_NAME.into(),
                    kind: IssueKind::IncludeGuardMismatch,
                    message: format!("Fix include guard in {} (expected {})", shown, macro_name),
                    fixed: true,
                });
            }
        }
        if outcome.is_failure() {
            report.summary.failed += 1;
        }
    }
    (report, None)
}
