//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "ros-hooks",
    version,
    about = "pre-commit hooks for ROS repositories",
    long_about = "ros-hooks — lint and auto-fix metadata files of ROS repositories: C/C++ include guards, package.xml dependency order, and .gitmodules structure.\n\nConfiguration precedence: CLI > ros-hooks.toml > defaults.",
    after_help = "Examples:\n  ros-hooks include-guard include/my_pkg/node.hpp\n  ros-hooks include-guard --allow-nolint src/detail/impl.hpp\n  ros-hooks sort-package-xml package.xml\n  ros-hooks check-gitmodules",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// One subcommand per hook.
pub enum Commands {
    /// Show version
    #[command(
        about = "Show version",
        long_about = "Print the current ros-hooks version."
    )]
    Version,
    /// Fix include guard macros
    #[command(
        about = "Check and fix C/C++ include guards",
        long_about = "Derive the guard macro from the header path below its package root (the directory holding package.xml) and rewrite mismatched #ifndef/#define/#endif lines. Files using #pragma once are accepted as is. Exits 1 when any file lacked a guard or was rewritten.",
        after_help = "Examples:\n  ros-hooks include-guard include/my_pkg/node.hpp\n  ros-hooks include-guard --allow-nolint --output json src/a.hpp"
    )]
    IncludeGuard {
        #[arg(long, help = "Repository root used for config discovery (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Never rewrite guard lines carrying a // NOLINT comment")]
        allow_nolint: bool,
        #[arg(help = "Header files to check")]
        files: Vec<String>,
    },
    /// Sort package.xml dependencies
    #[command(
        about = "Sort package.xml dependency tags",
        long_about = "Group each dependency tag (depend, build_depend, exec_depend, test_depend, ...) into one block and sort it alphabetically by package name. Exits 1 when a file was rewritten.",
        after_help = "Examples:\n  ros-hooks sort-package-xml package.xml"
    )]
    SortPackageXml {
        #[arg(long, help = "Repository root used for config discovery (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(help = "package.xml files to sort")]
        files: Vec<String>,
    },
    /// Check .gitmodules structure
    #[command(
        about = "Check .gitmodules structure",
        long_about = "Require every submodule name to equal its path, and every submodule to set either a branch or update = none. File arguments only trigger the hook; the checked file is .gitmodules in the current directory unless --gitmodules is given.",
        after_help = "Examples:\n  ros-hooks check-gitmodules\n  ros-hooks check-gitmodules --gitmodules path/to/.gitmodules"
    )]
    CheckGitmodules {
        #[arg(long, help = "Repository root used for config discovery (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Path to .gitmodules (default: ./.gitmodules)")]
        gitmodules: Option<String>,
        #[arg(help = "Files that triggered the hook (ignored)")]
        files: Vec<String>,
    },
}
