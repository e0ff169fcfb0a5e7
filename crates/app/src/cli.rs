//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use strand_domain::Selection;

#[derive(Debug, Parser)]
#[command(
    name = "strand",
    version,
    about = "Resolve and inspect Strand variable projects",
    long_about = "Resolve {{placeholders}} against a project file, report where \
                  variables are used and keep dimensions consistent.\n\n\
                  Log output goes to stderr and is filtered by RUST_LOG."
)]
pub struct Cli {
    /// Project file to operate on.
    #[arg(long, short, value_name = "FILE", global = true, default_value = "project.json")]
    pub project: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve text or a variable and print the result.
    Resolve(ResolveArgs),

    /// Show what uses a variable, or list variables nothing uses.
    Usage(UsageArgs),

    /// Make every conditional own exactly one consistent dimension.
    Sync(SyncArgs),

    /// Rename a variable and rewrite every reference to it.
    Rename(RenameArgs),

    /// Delete a variable nothing depends on.
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Raw text containing placeholders.
    #[arg(long, conflicts_with = "variable", required_unless_present = "variable")]
    pub text: Option<String>,

    /// Identifier of a variable to render.
    #[arg(long)]
    pub variable: Option<String>,

    /// Selection for a conditional, as CONDITIONAL=SPAWN. Use `Hidden` to
    /// hide the conditional. May be repeated; applied in order.
    #[arg(long = "select", short = 's', value_name = "COND=SPAWN", value_parser = parse_selection)]
    pub selections: Vec<(String, Selection)>,

    /// Nesting bound, overriding `STRAND_MAX_DEPTH`.
    #[arg(long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Exit with an error when anything stayed unresolved.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Args)]
pub struct UsageArgs {
    /// Variable to analyze. Lists unused variables when omitted.
    pub identifier: Option<String>,
}

#[derive(Debug, Args)]
pub struct SyncArgs {
    /// Report changes without writing the project.
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct RenameArgs {
    /// Current identifier.
    pub old: String,

    /// New identifier.
    pub new: String,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Identifier of the variable to delete.
    pub identifier: String,
}

/// Parses `CONDITIONAL=SPAWN`, splitting at the first `=`.
pub fn parse_selection(raw: &str) -> Result<(String, Selection), String> {
    let (conditional, spawn) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected CONDITIONAL=SPAWN, got `{raw}`"))?;
    if conditional.is_empty() || spawn.is_empty() {
        return Err(format!("expected CONDITIONAL=SPAWN, got `{raw}`"));
    }
    Ok((conditional.to_string(), Selection::from(spawn.to_string())))
}
