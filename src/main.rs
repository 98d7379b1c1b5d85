//! ros-hooks CLI binary entry point.
//! Resolves config, runs the selected hook and maps its report to an exit code.

use clap::Parser;
use ros_hooks::cli::{Cli, Commands};
use ros_hooks::config::{self, CliOverrides, Effective};
use ros_hooks::models::HookReport;
use ros_hooks::utils::{error_prefix, info_prefix, note_prefix};
use ros_hooks::{gitmodules, include_guard, output, package_xml, HookError};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ros_hooks=warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn resolve_or_exit(cli: CliOverrides<'_>) -> Effective {
    let mode = cli.output.unwrap_or("human");
    match config::resolve_effective(&cli) {
        Ok(eff) => {
            if let Some(path) = eff.config_file.as_ref() {
                tracing::debug!(config = %path.display(), "loaded config");
            }
            eff
        }
        Err(e) => fail(e, mode),
    }
}

fn fail(e: HookError, mode: &str) -> ! {
    eprintln!("{} {}", error_prefix(mode), e);
    std::process::exit(2);
}

/// Print the report first so files handled before a fatal error are still
/// listed, then exit 2 on that error or with the report's own status.
fn finish(report: HookReport, fatal: Option<HookError>, mode: &str) -> ! {
    output::print_report(&report, mode);
    if report.summary.fixed > 0 && mode != "json" {
        eprintln!(
            "{} {} file(s) rewritten; review and stage the changes.",
            info_prefix(mode),
            report.summary.fixed
        );
    }
    if let Some(e) = fatal {
        fail(e, mode);
    }
    std::process::exit(report.exit_code());
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::IncludeGuard {
            repo_root,
            output,
            allow_nolint,
            files,
        } => {
            let eff = resolve_or_exit(CliOverrides {
                repo_root: repo_root.as_deref(),
                output: output.as_deref(),
                allow_nolint: if allow_nolint { Some(true) } else { None },
                gitmodules: None,
            });
            let (report, fatal) = include_guard::run_include_guard(&files, &eff.guard_options());
            finish(report, fatal, &eff.output);
        }
        Commands::SortPackageXml {
            repo_root,
            output,
            files,
        } => {
            let eff = resolve_or_exit(CliOverrides {
                repo_root: repo_root.as_deref(),
                output: output.as_deref(),
                ..CliOverrides::default()
            });
            let (report, fatal) = package_xml::run_sort_package_xml(&files);
            finish(report, fatal, &eff.output);
        }
        Commands::CheckGitmodules {
            repo_root,
            output,
            gitmodules: gitmodules_path,
            files,
        } => {
            let eff = resolve_or_exit(CliOverrides {
                repo_root: repo_root.as_deref(),
                output: output.as_deref(),
                gitmodules: gitmodules_path.as_deref(),
                ..CliOverrides::default()
            });
            tracing::debug!(triggered_by = files.len(), "checking .gitmodules");
            if !eff.gitmodules.exists() && eff.output != "json" {
                eprintln!(
                    "{} No {} found; nothing to check.",
                    note_prefix(&eff.output),
                    eff.gitmodules.to_string_lossy()
                );
            }
            match gitmodules::run_check_gitmodules(&eff.gitmodules) {
                Ok(report) => finish(report, None, &eff.output),
                Err(e) => finish(HookReport::default(), Some(e), &eff.output),
            }
        }
    }
}
