//! Alphabetical ordering of dependency tags in `package.xml`.
//!
//! Lines carrying the same dependency tag are gathered into one block at the
//! position of the first such line; every other line stays where it is.
//! Blocks are sorted by their text content with the XML tags removed.

use crate::error::{HookError, Result};
use crate::models::{HookReport, Issue, IssueKind};
use crate::utils::display_path;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

pub const HOOK_NAME: &str = "sort-package-xml";

/// Tag prefixes without the closing bracket so attributes like
/// `condition="..."` still match.
pub const DEPENDENCY_TAGS: [&str; 8] = [
    "<build_depend",
    "<build_export_depend",
    "<buildtool_depend",
    "<buildtool_export_depend",
    "<exec_depend",
    "<depend",
    "<doc_depend",
    "<test_depend",
];

fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*?>").expect("static regex"))
}

fn tag_of(line: &str) -> Option<&'static str> {
    let trimmed = line.trim();
    DEPENDENCY_TAGS.iter().copied().find(|tag| trimmed.starts_with(tag))
}

/// Sort key: the line with every `<...>` tag removed.
pub fn sort_key(line: &str) -> String {
    tag_regex().replace_all(line, "").into_owned()
}

/// Split `lines` into blocks, pulling each dependency tag's lines together.
pub fn blocks(lines: &[String]) -> Vec<Vec<String>> {
    let mut rest: Vec<String> = lines.to_vec();
    let mut out = Vec::new();
    while !rest.is_empty() {
        match tag_of(&rest[0]) {
            Some(tag) => {
                let (block, remaining): (Vec<String>, Vec<String>) = rest
                    .into_iter()
                    .partition(|line| line.trim().starts_with(tag));
                out.push(block);
                rest = remaining;
            }
            None => out.push(vec![rest.remove(0)]),
        }
    }
    out
}

/// Sorted copy of `lines`; the sort is stable within each block.
pub fn sort_lines(lines: &[String]) -> Vec<String> {
    blocks(lines)
        .into_iter()
        .flat_map(|mut block| {
            block.sort_by_cached_key(|line| sort_key(line));
            block
        })
        .collect()
}

/// Sort one file in place. Returns true when it was rewritten.
pub fn sort_file(path: &Path) -> Result<bool> {
    let text = fs::read_to_string(path).map_err(|e| HookError::io(path, e))?;
    let lines: Vec<String> = text.lines().map(|l| l.trim_end().to_string()).collect();
    let sorted = sort_lines(&lines);
    if sorted == lines {
        return Ok(false);
    }
    let mut out = sorted.join("\n");
    out.push('\n');
    fs::write(path, out).map_err(|e| HookError::io(path, e))?;
    Ok(true)
}

/// Sort every file in order. On a fatal error the report still covers the
/// files rewritten before it.
pub fn run_sort_package_xml<P: AsRef<Path>>(files: &[P]) -> (HookReport, Option<HookError>) {
    let mut report = HookReport::default();
    for file in files {
        let path = file.as_ref();
        let rewritten = match sort_file(path) {
            Ok(r) => r,
            Err(e) => return (report, Some(e)),
        };
        report.summary.files += 1;
        report.summary.checked += 1;
        if rewritten {
            let shown = display_path(path);
            tracing::debug!(file = %shown, "sorted dependency tags");
            report.summary.fixed += 1;
            report.summary.failed += 1;
            report.issues.push(Issue {
                file: shown.clone(),
                hook: HOOK_NAME.into(),
                kind: IssueKind::UnsortedPackageXml,
                message: format!("Fixing file `{}`", shown),
                fixed: true,
            });
        }
    }
    (report, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn owned(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sort_key_strips_tags() {
        assert_eq!(sort_key("  <depend>rclcpp</depend>"), "  rclcpp");
        assert_eq!(
            sort_key("<exec_depend condition=\"$ROS_VERSION == 2\">foo</exec_depend>"),
            "foo"
        );
    }

    #[test]
    fn test_blocks_gather_scattered_tags() {
        let lines = owned(&[
            "<package>",
            "  <depend>b</depend>",
            "  <test_depend>z</test_depend>",
            "  <depend>a</depend>",
            "</package>",
        ]);
        let got = blocks(&lines);
        assert_eq!(got.len(), 4);
        assert_eq!(got[1], owned(&["  <depend>b</depend>", "  <depend>a</depend>"]));
        assert_eq!(got[2], owned(&["  <test_depend>z</test_depend>"]));
    }

    #[test]
    fn test_sort_lines_keeps_other_lines_in_place() {
        let lines = owned(&[
            "<package format=\"3\">",
            "  <name>pkg</name>",
            "  <buildtool_depend>ament_cmake</buildtool_depend>",
            "",
            "  <depend>std_msgs</depend>",
            "  <depend>rclcpp</depend>",
            "  <depend condition=\"$ROS_VERSION == 2\">ament_index_cpp</depend>",
            "",
            "  <test_depend>ament_lint_common</test_depend>",
            "  <test_depend>ament_lint_auto</test_depend>",
            "</package>",
        ]);
        let sorted = sort_lines(&lines);
        assert_eq!(
            sorted,
            owned(&[
                "<package format=\"3\">",
                "  <name>pkg</name>",
                "  <buildtool_depend>ament_cmake</buildtool_depend>",
                "",
                "  <depend condition=\"$ROS_VERSION == 2\">ament_index_cpp</depend>",
                "  <depend>rclcpp</depend>",
                "  <depend>std_msgs</depend>",
                "",
                "  <test_depend>ament_lint_auto</test_depend>",
                "  <test_depend>ament_lint_common</test_depend>",
                "</package>",
            ])
        );
    }

    #[test]
    fn test_build_depend_and_build_export_depend_are_separate_blocks() {
        let lines = owned(&[
            "<build_depend>b</build_depend>",
            "<build_export_depend>a</build_export_depend>",
            "<build_depend>a</build_depend>",
        ]);
        assert_eq!(
            sort_lines(&lines),
            owned(&[
                "<build_depend>a</build_depend>",
                "<build_depend>b</build_depend>",
                "<build_export_depend>a</build_export_depend>",
            ])
        );
    }

    #[test]
    fn test_sort_file_rewrites_once() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("package.xml");
        fs::write(
            &path,
            "<package>\n  <depend>b</depend>\n  <depend>a</depend>\n</package>\n",
        )
        .unwrap();

        let (report, err) = run_sort_package_xml(&[&path]);
        assert!(err.is_none());
        assert_eq!(report.exit_code(), 1);
        assert_eq!(report.issues[0].kind, IssueKind::UnsortedPackageXml);
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "<package>\n  <depend>a</depend>\n  <depend>b</depend>\n</package>\n"
        );

        let (again, _) = run_sort_package_xml(&[&path]);
        assert_eq!(again.exit_code(), 0);
    }

    #[test]
    fn test_sorted_file_without_trailing_newline_is_left_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("package.xml");
        let text = "<package>\n  <depend>a</depend>\n</package>";
        fs::write(&path, text).unwrap();
        assert!(!sort_file(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), text);
    }

    #[test]
    fn test_fatal_error_keeps_earlier_fixes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("package.xml");
        fs::write(&path, "<package>\n  <depend>b</depend>\n  <depend>a</depend>\n</package>\n").unwrap();
        let missing = dir.path().join("missing").join("package.xml");

        let (report, err) = run_sort_package_xml(&[&path, &missing]);
        assert!(matches!(err, Some(HookError::Io { .. })));
        assert_eq!(report.summary.fixed, 1);
        assert_eq!(report.issues[0].kind, IssueKind::UnsortedPackageXml);
    }
}
