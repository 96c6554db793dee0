//! Cross-platform path normalization
//!
//! Ownership lookups compare paths by exact string equality, so declared
//! sources and changed files must be reduced to one canonical representation
//! before either side touches the index: workspace-relative, forward slashes,
//! no `.` components. A silent mismatch here reads as "unclaimed", which is
//! why normalization lives in one place.

use std::path::{Component, Path};

/// Normalize a workspace-relative path to its canonical lookup form.
///
/// - backslashes become forward slashes (git format, even on Windows)
/// - `.` components are dropped
/// - `..` components are kept verbatim; a path escaping the workspace never
///   matches a declared source, which is the correct outcome
pub fn normalize_rel_path(path: &Path) -> String {
  let mut parts: Vec<String> = Vec::new();

  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::RootDir => parts.push(String::new()),
      Component::Normal(part) => parts.push(part.to_string_lossy().replace('\\', "/")),
      other => parts.push(other.as_os_str().to_string_lossy().to_string()),
    }
  }

  parts.join("/")
}

/// Normalize a possibly-absolute path against the workspace root.
///
/// Absolute paths under the root are relativized; anything else is normalized
/// as-is.
pub fn normalize_against_root(path: &Path, root: &Path) -> String {
  match path.strip_prefix(root) {
    Ok(rel) => normalize_rel_path(rel),
    Err(_) => normalize_rel_path(path),
  }
}
