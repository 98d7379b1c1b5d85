//! Output rendering for hook reports.
//!
//! Supports `human` (default) and `json` outputs. The JSON form is the
//! serialized `HookReport`: issues plus a top-level summary.

use crate::models::{HookReport, Issue};
use crate::utils::use_colors;
use owo_colors::OwoColorize;
use serde_json::Value as JsonVal;

/// Print a hook report in the requested format.
pub fn print_report(report: &HookReport, output: &str) {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_report_json(report)).unwrap_or_default()
        ),
        _ => {
            let color = use_colors(output);
            for issue in &report.issues {
                println!("{}", render_issue(issue, color));
            }
            if !report.issues.is_empty() {
                let summary = render_summary(report);
                if color {
                    println!("{}", summary.bold());
                } else {
                    println!("{}", summary);
                }
            }
        }
    }
}

fn render_issue(issue: &Issue, color: bool) -> String {
    let (icon, badge) = match (issue.fixed, color) {
        (true, true) => ("✎".yellow().to_string(), "⟦fixed⟧".yellow().bold().to_string()),
        (true, false) => ("✎".to_string(), "⟦fixed⟧".to_string()),
        (false, true) => ("✖".red().to_string(), "⟦error⟧".red().bold().to_string()),
        (false, false) => ("✖".to_string(), "⟦error⟧".to_string()),
    };
    format!("{} {} ❲{}❳ {}", icon, badge, issue.hook, issue.message)
}

/// One-line summary used by the human printer.
pub fn render_summary(report: &HookReport) -> String {
    let s = &report.summary;
    format!(
        "— Summary — files={} checked={} skipped={} fixed={} failed={}",
        s.files, s.checked, s.skipped, s.fixed, s.failed
    )
}

/// Compose report JSON object (pure) for testing/snapshot purposes.
pub fn compose_report_json(report: &HookReport) -> JsonVal {
    serde_json::to_value(report).unwrap_or(JsonVal::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IssueKind, Summary};

    fn sample() -> HookReport {
        HookReport {
            issues: vec![Issue {
                file: "include/pkg/a.hpp".into(),
                hook: "include-guard".into(),
                kind: IssueKind::IncludeGuardMismatch,
                message: "Fix include guard in include/pkg/a.hpp (expected PKG__A_HPP_)".into(),
                fixed: true,
            }],
            summary: Summary {
                files: 2,
                checked: 2,
                skipped: 0,
                fixed: 1,
                failed: 1,
            },
        }
    }

    #[test]
    fn test_compose_report_json_shape() {
        let out = compose_report_json(&sample());
        assert_eq!(out["summary"]["fixed"], 1);
        assert_eq!(out["summary"]["failed"], 1);
        assert_eq!(out["issues"][0]["kind"], "include-guard-mismatch");
        assert_eq!(out["issues"][0]["fixed"], true);
    }

    #[test]
    fn test_render_issue_plain() {
        let line = render_issue(&sample().issues[0], false);
        assert_eq!(
            line,
            "✎ ⟦fixed⟧ ❲include-guard❳ Fix include guard in include/pkg/a.hpp (expected PKG__A_HPP_)"
        );
        assert!(render_summary(&sample()).contains("fixed=1 failed=1"));
    }
}
