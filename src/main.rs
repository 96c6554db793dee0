mod commands;
mod core;
mod graph;
mod utils;

use clap::{Parser, Subcommand};
use crate::core::error::{ScopeError, print_error};
use crate::core::vcs::SystemGit;

/// Map changed files to impacted build targets
#[derive(Parser)]
#[command(name = "changescope")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Resolve changed files (or explicit target specs) to impacted targets
  Changed {
    /// Seed the resolution with explicit target addresses instead of git changes
    targets: Vec<String>,

    /// Include changes since this reference, committed or not (e.g. HEAD, a branch, a SHA)
    #[arg(long)]
    since: Option<String>,

    /// Include only the changes introduced by this revision
    #[arg(long, conflicts_with = "since")]
    diffspec: Option<String>,

    /// Dependee inclusion mode: none, direct, or transitive
    #[arg(long, default_value = "none")]
    include_dependees: String,

    /// Exclude targets whose address matches this regex (repeatable, any match excludes)
    #[arg(long = "exclude-target-regexp")]
    exclude_target_regexp: Vec<String>,

    /// Print the raw changed files instead of targets
    #[arg(long)]
    files: bool,

    /// Output format: names, text, or json
    #[arg(long, default_value = "names")]
    format: String,
  },

  /// Print every target address declared in the manifest
  List,

  /// Show which targets claim the given files
  Owners {
    /// File paths to look up (workspace-relative or absolute)
    #[arg(required = true)]
    paths: Vec<String>,
  },

  /// Run manifest health checks
  Check,
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();

  let cwd = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => {
      eprintln!("Error: Failed to get current directory: {}", e);
      std::process::exit(1);
    }
  };

  // The manifest lives at the git work tree root; fall back to the current
  // directory when not inside a repository (changed will then fail with a
  // proper git error of its own).
  let workspace_root = match SystemGit::open(&cwd) {
    Ok(git) => git.work_tree().to_path_buf(),
    Err(_) => cwd,
  };

  // Build workspace context once (loads the manifest, builds the graph).
  // Duplicate addresses and dangling dependencies are fatal here, before any
  // command logic runs.
  let ctx = match crate::core::context::WorkspaceContext::build(&workspace_root) {
    Ok(ctx) => ctx,
    Err(e) => handle_error(e),
  };

  let result = match cli.command {
    Commands::Changed {
      targets,
      since,
      diffspec,
      include_dependees,
      exclude_target_regexp,
      files,
      format,
    } => commands::run_changed(
      &ctx,
      targets,
      since,
      diffspec,
      include_dependees,
      exclude_target_regexp,
      files,
      format,
    ),
    Commands::List => commands::run_list(&ctx),
    Commands::Owners { paths } => commands::run_owners(&ctx, paths),
    Commands::Check => commands::run_check(&ctx),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: ScopeError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
