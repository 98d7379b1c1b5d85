//! Structural checks for `.gitmodules`.
//!
//! Every `[submodule "<name>"]` section must have a `path` equal to its
//! name, and must either track a `branch` or opt out with `update = none`.

use crate::error::{HookError, Result};
use crate::models::{HookReport, Issue, IssueKind};
use crate::utils::display_path;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const HOOK_NAME: &str = "check-gitmodules";

pub const DEFAULT_GITMODULES: &str = ".gitmodules";

/// One `[header]` with its keys. Keys are lowercased; later values win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub header: String,
    pub entries: BTreeMap<String, String>,
}

impl Section {
    /// Submodule name for `submodule "<name>"` headers.
    pub fn submodule_name(&self) -> Option<&str> {
        self.header
            .strip_prefix("submodule \"")
            .and_then(|rest| rest.strip_suffix('"'))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

/// Parse the git-config subset used by `.gitmodules`.
pub fn parse(path: &Path, text: &str) -> Result<Vec<Section>> {
    let mut sections: Vec<Section> = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        let fail = |message: &str| HookError::Gitmodules {
            path: path.to_path_buf(),
            line: idx + 1,
            message: message.to_string(),
        };
        if let Some(inner) = line.strip_prefix('[') {
            let header = inner
                .strip_suffix(']')
                .ok_or_else(|| fail("unterminated section header"))?;
            sections.push(Section {
                header: header.trim().to_string(),
                entries: BTreeMap::new(),
            });
            continue;
        }
        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| fail("expected `key = value`"))?;
        let section = sections
            .last_mut()
            .ok_or_else(|| fail("key outside of a section"))?;
        section.entries.insert(
            key.trim().to_ascii_lowercase(),
            unquote(value.trim()).to_string(),
        );
    }
    Ok(sections)
}

/// Findings for parsed sections, in file order.
pub fn check_sections(file: &str, sections: &[Section]) -> Vec<Issue> {
    let issue = |kind, message: String| Issue {
        file: file.to_string(),
        hook: HOOK_NAME.into(),
        kind,
        message,
        fixed: false,
    };
    let mut issues = Vec::new();
    for section in sections {
        let Some(name) = section.submodule_name() else {
            continue;
        };
        let Some(path) = section.get("path") else {
            issues.push(issue(
                IssueKind::GitmodulesMissingPath,
                format!("Error: Submodule '{}' has no path", name),
            ));
            continue;
        };
        if name != path {
            issues.push(issue(
                IssueKind::GitmodulesNameMismatch,
                format!(
                    "Error: Submodule name '{}' does not match path '{}'",
                    name, path
                ),
            ));
        }
        let has_branch = section.get("branch").is_some();
        let update_none = section.get("update") == Some("none");
        if !(has_branch || update_none) {
            issues.push(issue(
                IssueKind::GitmodulesMissingBranch,
                format!(
                    "Error: Submodule '{}' must have either 'branch' field or 'update = none'",
                    name
                ),
            ));
        }
    }
    issues
}

/// Check the `.gitmodules` at `path`. A missing file passes.
pub fn run_check_gitmodules(path: &Path) -> Result<HookReport> {
    let mut report = HookReport::default();
    if !path.exists() {
        tracing::debug!(file = %path.display(), "no .gitmodules; nothing to check");
        return Ok(report);
    }
    let text = fs::read_to_string(path).map_err(|e| HookError::io(path, e))?;
    let sections = parse(path, &text)?;
    report.issues = check_sections(&display_path(path), &sections);
    report.summary.files = 1;
    report.summary.checked = 1;
    if !report.issues.is_empty() {
        report.summary.failed = 1;
    }
    Ok(report)
}
