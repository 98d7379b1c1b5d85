//! Shared report models produced by every hook and consumed by printers.

use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
/// What a reported issue is about.
pub enum IssueKind {
    NoIncludeGuard,
    IncludeGuardMismatch,
    UnsortedPackageXml,
    GitmodulesMissingPath,
    GitmodulesNameMismatch,
    GitmodulesMissingBranch,
}

#[derive(Serialize, Debug, Clone)]
/// A single finding. `fixed` is set when the hook rewrote the file.
pub struct Issue {
    pub file: String,
    pub hook: String,
    pub kind: IssueKind,
    pub message: String,
    pub fixed: bool,
}

#[derive(Serialize, Debug, Default, Clone, PartialEq, Eq)]
/// Per-run counters.
pub struct Summary {
    pub files: usize,
    pub checked: usize,
    pub skipped: usize,
    pub fixed: usize,
    pub failed: usize,
}

#[derive(Serialize, Debug, Default, Clone)]
/// Result of one hook invocation.
pub struct HookReport {
    pub issues: Vec<Issue>,
    pub summary: Summary,
}

impl HookReport {
    /// A run fails when any file failed, even if it was auto-corrected.
    pub fn failed(&self) -> bool {
        self.summary.failed > 0
    }

    pub fn exit_code(&self) -> i32 {
        if self.failed() {
            1
        } else {
            0
        }
    }
}
