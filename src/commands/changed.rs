//! `changescope changed` - Resolve changed files to impacted targets
//!
//! This command detects file changes (via git) or accepts explicit target
//! specs, then resolves the impacted target set:
//! - which targets own the changed files
//! - which targets depend on those, per the dependee inclusion mode
//! - minus anything matching the exclusion patterns

use crate::core::context::WorkspaceContext;
use crate::core::error::{ScopeError, ScopeResult};
use crate::core::vcs::{ChangeSpec, SystemGit};
use crate::graph::closure::DependeeMode;
use crate::graph::ownership::OwnershipIndex;
use crate::graph::resolver::{self, ChangeSet, ImpactRequest, SeedInput};

/// Output format for the changed command
#[derive(Debug, Clone, Copy)]
enum OutputFormat {
  /// One entry per line, sorted (script-friendly, the default)
  Names,
  Text,
  Json,
}

impl OutputFormat {
  fn from_str(s: &str) -> ScopeResult<Self> {
    match s.to_lowercase().as_str() {
      "names" | "names-only" => Ok(Self::Names),
      "text" => Ok(Self::Text),
      "json" => Ok(Self::Json),
      _ => Err(ScopeError::message(format!(
        "Unknown format '{}'. Valid formats: names, text, json",
        s
      ))),
    }
  }
}

/// Run the changed command
#[allow(clippy::too_many_arguments)]
pub fn run_changed(
  ctx: &WorkspaceContext,
  targets: Vec<String>,
  since: Option<String>,
  diffspec: Option<String>,
  include_dependees: String,
  exclude_target_regexp: Vec<String>,
  files: bool,
  format: String,
) -> ScopeResult<()> {
  let mode = DependeeMode::from_str(&include_dependees)?;
  let output_format = OutputFormat::from_str(&format)?;

  if !targets.is_empty() {
    if files {
      return Err(ScopeError::message("--files cannot be combined with explicit target specs"));
    }
    if since.is_some() || diffspec.is_some() {
      return Err(ScopeError::message(
        "--since/--diffspec cannot be combined with explicit target specs",
      ));
    }

    let request = ImpactRequest {
      mode,
      exclude_patterns: exclude_target_regexp,
      seeds: SeedInput::Specs(targets),
    };
    let ownership = OwnershipIndex::build(&ctx.graph);
    let result = resolver::resolve(&ctx.graph, &ownership, &request)?;
    return display_targets(None, result, mode, output_format);
  }

  let change_set = detect_changes(ctx, since, diffspec)?;

  if files {
    for file in resolver::resolve_files(&change_set) {
      println!("{}", file);
    }
    return Ok(());
  }

  let ownership = OwnershipIndex::build(&ctx.graph);
  let request = ImpactRequest {
    mode,
    exclude_patterns: exclude_target_regexp,
    seeds: SeedInput::Files(change_set.clone()),
  };
  let result = resolver::resolve(&ctx.graph, &ownership, &request)?;

  display_targets(Some(&change_set), result, mode, output_format)
}

/// Materialize the changed-file set from git
fn detect_changes(ctx: &WorkspaceContext, since: Option<String>, diffspec: Option<String>) -> ScopeResult<ChangeSet> {
  let spec = match (since, diffspec) {
    (None, Some(revision)) => ChangeSpec::Diffspec(revision),
    (Some(reference), None) => ChangeSpec::Since(reference),
    (None, None) => ChangeSpec::WorkingCopy,
    (Some(_), Some(_)) => {
      return Err(ScopeError::message("--since and --diffspec are mutually exclusive"));
    }
  };

  let git = SystemGit::open(ctx.workspace_root())?;
  let changed = git.changed_files(&spec)?;
  Ok(ChangeSet::from_paths(changed))
}

/// Display the resolved target set.
///
/// `change_set` is `None` for spec-seeded runs, which have no changed files
/// to report.
fn display_targets(
  change_set: Option<&ChangeSet>,
  result: std::collections::HashSet<String>,
  mode: DependeeMode,
  format: OutputFormat,
) -> ScopeResult<()> {
  let mut sorted: Vec<_> = result.into_iter().collect();
  sorted.sort();

  match format {
    OutputFormat::Names => {
      for address in &sorted {
        println!("{}", address);
      }
    }
    OutputFormat::Text => {
      if let Some(change_set) = change_set {
        if change_set.is_empty() {
          println!("No changed files");
        } else {
          println!("Changed files: {}", change_set.len());
          for file in change_set.files() {
            println!("  {}", file);
          }
        }
        println!();
      }
      println!("Impacted targets ({:?}): {}", mode, sorted.len());
      for address in &sorted {
        println!("  🎯 {}", address);
      }
    }
    OutputFormat::Json => {
      let mut output = serde_json::json!({
          "targets": sorted,
          "summary": {
              "target_count": sorted.len(),
          }
      });
      if let Some(change_set) = change_set {
        let changed_files: Vec<_> = change_set.files().collect();
        output["summary"]["changed_files_count"] = serde_json::json!(changed_files.len());
        output["changed_files"] = serde_json::json!(changed_files);
      }
      println!("{}", serde_json::to_string_pretty(&output)?);
    }
  }

  Ok(())
}
