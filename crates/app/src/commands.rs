//! Subcommand implementations.

use std::fmt::Write as _;
use std::path::Path;

use strand_application::ports::SnapshotRepository;
use strand_application::use_cases::{
    DeleteVariable, LoadProject, SaveProject, SyncReport, rename_identifier, sync_dimensions,
};
use strand_application::{
    ApplicationError, ApplicationResult, ResolutionResult, SelectionRules, UsageAnalyzer,
    VariableResolver,
};
use strand_domain::SelectionState;
use strand_infrastructure::FileSnapshotRepository;
use thiserror::Error;
use tracing::{info, warn};

use crate::cli::{Cli, Command, ResolveArgs};
use crate::config::resolver_config;

/// Errors reported by the binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// A library operation failed.
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// `--strict` was given and some references stayed literal.
    #[error("resolution incomplete: {0}")]
    Incomplete(String),
}

/// Runs the parsed command and returns what to print on stdout.
pub async fn run(cli: &Cli) -> Result<String, CliError> {
    let project = cli.project.as_path();
    match &cli.command {
        Command::Resolve(args) => {
            let result = resolve(project, args).await?;
            if args.strict && !result.is_complete {
                return Err(CliError::Incomplete(describe_incomplete(&result)));
            }
            Ok(format!("{}\n", result.resolved))
        }
        Command::Usage(args) => Ok(usage(project, args.identifier.as_deref()).await?),
        Command::Sync(args) => Ok(sync(project, args.dry_run).await?),
        Command::Rename(args) => Ok(rename(project, &args.old, &args.new).await?),
        Command::Delete(args) => {
            let output = DeleteVariable::new(FileSnapshotRepository::new())
                .execute(project, &args.identifier)
                .await?;
            Ok(format!("deleted {}\n", output.removed.identifier))
        }
    }
}

async fn resolve(project: &Path, args: &ResolveArgs) -> ApplicationResult<ResolutionResult> {
    let store = LoadProject::new(FileSnapshotRepository::new())
        .execute(project)
        .await?;
    let rules = SelectionRules::new(&store);
    let mut state = SelectionState::new();
    for (conditional, choice) in &args.selections {
        rules.select(&mut state, conditional, choice)?;
    }

    let resolver = VariableResolver::with_config(&store, resolver_config(args.max_depth));
    let result = match (&args.text, &args.variable) {
        (Some(text), _) => resolver.resolve(text, &mut state),
        (None, Some(name)) => {
            let variable = store
                .find_by_identifier(name)
                .ok_or_else(|| ApplicationError::NotFound(name.clone()))?;
            resolver.resolve_variable(variable, &mut state)
        }
        (None, None) => ResolutionResult::no_placeholders(""),
    };

    if !result.unresolved.is_empty() {
        warn!(names = ?result.unresolved, "unknown placeholders left literal");
    }
    if !result.cycles.is_empty() {
        warn!(names = ?result.cycles, "cyclic placeholders left literal");
    }
    if result.truncated {
        warn!("nesting bound reached, output contains unexpanded text");
    }
    Ok(result)
}

fn describe_incomplete(result: &ResolutionResult) -> String {
    let mut parts = Vec::new();
    if !result.unresolved.is_empty() {
        parts.push(format!("unknown {}", result.unresolved.join(", ")));
    }
    if !result.cycles.is_empty() {
        parts.push(format!("cyclic {}", result.cycles.join(", ")));
    }
    if result.truncated {
        parts.push("nesting bound reached".to_string());
    }
    parts.join("; ")
}

async fn usage(project: &Path, identifier: Option<&str>) -> ApplicationResult<String> {
    let store = LoadProject::new(FileSnapshotRepository::new())
        .execute(project)
        .await?;
    let analyzer = UsageAnalyzer::new(&store);

    let mut out = String::new();
    match identifier {
        Some(name) => {
            let variable = store
                .find_by_identifier(name)
                .ok_or_else(|| ApplicationError::NotFound(name.to_string()))?;
            let record = analyzer.analyze(variable);
            if record.is_in_use {
                let _ = writeln!(out, "{} is in use:", variable.identifier);
                for line in record.describe() {
                    let _ = writeln!(out, "  {line}");
                }
            } else {
                let _ = writeln!(out, "{} is not in use", variable.identifier);
            }
        }
        None => {
            for variable in analyzer.unused() {
                let _ = writeln!(out, "{}", variable.identifier);
            }
        }
    }
    Ok(out)
}

async fn sync(project: &Path, dry_run: bool) -> ApplicationResult<String> {
    let repository = FileSnapshotRepository::new();
    let mut snapshot = repository.load(project).await?;
    let report = if dry_run {
        sync_dimensions(&mut snapshot)
    } else {
        SaveProject::new(repository).execute(project, &mut snapshot).await?
    };
    Ok(format_sync_report(&report))
}

async fn rename(project: &Path, old: &str, new: &str) -> ApplicationResult<String> {
    let repository = FileSnapshotRepository::new();
    let mut snapshot = repository.load(project).await?;
    let report = rename_identifier(&mut snapshot, old, new)?;
    SaveProject::new(repository)
        .execute(project, &mut snapshot)
        .await?;
    info!(old, new, "project saved after rename");

    let mut out = format!("renamed {old} to {new}\n");
    for identifier in &report.rewritten_content {
        let _ = writeln!(out, "  rewrote {identifier}");
    }
    if report.rewritten_values > 0 {
        let _ = writeln!(out, "  updated {} dimension value(s)", report.rewritten_values);
    }
    Ok(out)
}

fn format_sync_report(report: &SyncReport) -> String {
    if report.is_clean() {
        return "dimensions already consistent\n".to_string();
    }
    let mut out = String::new();
    for name in &report.created {
        let _ = writeln!(out, "created dimension {name}");
    }
    for name in &report.orphans_removed {
        let _ = writeln!(out, "removed orphan dimension {name}");
    }
    for name in &report.duplicates_removed {
        let _ = writeln!(out, "removed duplicate dimension {name}");
    }
    if report.values_deduplicated > 0 {
        let _ = writeln!(out, "removed {} duplicate value(s)", report.values_deduplicated);
    }
    for name in &report.hidden_adjusted {
        let _ = writeln!(out, "adjusted hide option of {name}");
    }
    out
}
