pub mod system_git;

pub use system_git::SystemGit;

/// Which edits to translate into a changed-file set.
///
/// The default with no reference given is the uncommitted working copy.
#[derive(Debug, Clone)]
pub enum ChangeSpec {
  /// Uncommitted working-copy edits (tracked diffs plus untracked files)
  WorkingCopy,

  /// Everything changed since a reference, committed or not ("HEAD", a branch, a SHA)
  Since(String),

  /// Changes introduced by one specific revision or revision range
  Diffspec(String),
}
