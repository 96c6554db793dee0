//! Integration tests for `changescope changed`

use crate::helpers::{chain_workspace, run_changescope, run_changescope_raw, stdout_lines};
use anyhow::Result;
use std::collections::BTreeSet;

fn set(items: &[&str]) -> BTreeSet<String> {
  items.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_working_copy_change_default_mode() -> Result<()> {
  let ws = chain_workspace()?;

  // Uncommitted edit; no --since needed, working copy is the default.
  ws.touch_file("lib/library.py")?;

  let output = run_changescope(&ws.path, &["changed"])?;
  assert_eq!(stdout_lines(&output), set(&["lib:library"]));

  Ok(())
}

#[test]
fn test_since_with_direct_dependees() -> Result<()> {
  let ws = chain_workspace()?;

  ws.touch_file("lib/library.py")?;
  ws.commit("Touch library")?;

  let output = run_changescope(
    &ws.path,
    &["changed", "--since", "HEAD^", "--include-dependees", "direct"],
  )?;
  assert_eq!(
    stdout_lines(&output),
    set(&["lib:library", "lib:direct_dependee", "app:binary"])
  );

  Ok(())
}

#[test]
fn test_transitive_closure_over_chain() -> Result<()> {
  let ws = chain_workspace()?;

  ws.touch_file("lib/library.py")?;

  let output = run_changescope(&ws.path, &["changed", "--include-dependees", "transitive"])?;
  assert_eq!(
    stdout_lines(&output),
    set(&[
      "lib:library",
      "lib:direct_dependee",
      "lib:dependee_2",
      "lib:dependee_3",
      "app:binary",
    ])
  );

  Ok(())
}

#[test]
fn test_resource_change_pulls_in_binary() -> Result<()> {
  let ws = chain_workspace()?;

  ws.touch_file("res/README.md")?;

  let none = run_changescope(&ws.path, &["changed"])?;
  assert_eq!(stdout_lines(&none), set(&["res:resource"]));

  let direct = run_changescope(&ws.path, &["changed", "--include-dependees", "direct"])?;
  assert_eq!(stdout_lines(&direct), set(&["res:resource", "app:binary"]));

  let transitive = run_changescope(&ws.path, &["changed", "--include-dependees", "transitive"])?;
  assert_eq!(stdout_lines(&transitive), set(&["res:resource", "app:binary"]));

  Ok(())
}

#[test]
fn test_exclude_target_regexp() -> Result<()> {
  let ws = chain_workspace()?;

  ws.touch_file("lib/library.py")?;

  let output = run_changescope(
    &ws.path,
    &[
      "changed",
      "--include-dependees",
      "transitive",
      "--exclude-target-regexp",
      "_[0-9]",
    ],
  )?;
  assert_eq!(
    stdout_lines(&output),
    set(&["lib:library", "lib:direct_dependee", "app:binary"])
  );

  Ok(())
}

#[test]
fn test_unclaimed_file_yields_empty_set() -> Result<()> {
  let ws = chain_workspace()?;

  ws.touch_file("lib/unclaimed.py")?;

  for mode in ["none", "direct", "transitive"] {
    let output = run_changescope(&ws.path, &["changed", "--include-dependees", mode])?;
    assert!(
      stdout_lines(&output).is_empty(),
      "expected empty set for mode {}",
      mode
    );
  }

  Ok(())
}

#[test]
fn test_files_output_shape() -> Result<()> {
  let ws = chain_workspace()?;

  ws.touch_file("lib/library.py")?;
  ws.touch_file("res/README.md")?;

  let output = run_changescope(&ws.path, &["changed", "--files"])?;
  assert_eq!(stdout_lines(&output), set(&["lib/library.py", "res/README.md"]));

  Ok(())
}

#[test]
fn test_files_includes_untracked() -> Result<()> {
  let ws = chain_workspace()?;

  ws.write_file("lib/new_file.py", "# brand new\n")?;

  let output = run_changescope(&ws.path, &["changed", "--files"])?;
  assert_eq!(stdout_lines(&output), set(&["lib/new_file.py"]));

  Ok(())
}

#[test]
fn test_diffspec_single_commit() -> Result<()> {
  let ws = chain_workspace()?;

  ws.touch_file("lib/library.py")?;
  let sha = ws.commit("Touch library")?;
  ws.touch_file("res/README.md")?;
  ws.commit("Touch resource")?;

  // Only the named commit's files, not later ones.
  let output = run_changescope(&ws.path, &["changed", "--diffspec", &sha, "--files"])?;
  assert_eq!(stdout_lines(&output), set(&["lib/library.py"]));

  Ok(())
}

#[test]
fn test_spec_seeded_resolution() -> Result<()> {
  let ws = chain_workspace()?;

  let output = run_changescope(
    &ws.path,
    &["changed", "lib:library", "--include-dependees", "direct"],
  )?;
  assert_eq!(
    stdout_lines(&output),
    set(&["lib:library", "lib:direct_dependee", "app:binary"])
  );

  Ok(())
}

#[test]
fn test_json_format() -> Result<()> {
  let ws = chain_workspace()?;

  ws.touch_file("lib/library.py")?;

  let output = run_changescope(&ws.path, &["changed", "--format", "json"])?;
  let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;

  assert_eq!(json["targets"], serde_json::json!(["lib:library"]));
  assert_eq!(json["summary"]["changed_files_count"], 1);

  Ok(())
}

#[test]
fn test_json_format_spec_seeded_omits_changed_files() -> Result<()> {
  let ws = chain_workspace()?;

  let output = run_changescope(&ws.path, &["changed", "lib:library", "--format", "json"])?;
  let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;

  // Spec-seeded runs have no changed files to report, so the json output
  // carries no changed_files block at all rather than a misleading empty one.
  assert_eq!(json["targets"], serde_json::json!(["lib:library"]));
  assert!(json.get("changed_files").is_none());
  assert!(json["summary"].get("changed_files_count").is_none());

  Ok(())
}

#[test]
fn test_exclude_intermediate_keeps_downstream_dependees() -> Result<()> {
  let ws = chain_workspace()?;

  ws.touch_file("lib/library.py")?;

  // Excluding the first link in the chain must not cut off the later links:
  // the closure runs first, exclusion only filters the result.
  let output = run_changescope(
    &ws.path,
    &[
      "changed",
      "--include-dependees",
      "transitive",
      "--exclude-target-regexp",
      "direct_dependee$",
    ],
  )?;
  assert_eq!(
    stdout_lines(&output),
    set(&["lib:library", "lib:dependee_2", "lib:dependee_3", "app:binary"])
  );

  Ok(())
}

#[test]
fn test_bad_revision_fails() -> Result<()> {
  let ws = chain_workspace()?;

  let output = run_changescope_raw(&ws.path, &["changed", "--since", "no-such-ref"])?;
  assert!(!output.status.success());
  // System error exit code, and no partial output.
  assert_eq!(output.status.code(), Some(2));
  assert!(output.stdout.is_empty());

  Ok(())
}

#[test]
fn test_invalid_exclude_pattern_fails() -> Result<()> {
  let ws = chain_workspace()?;

  ws.touch_file("lib/library.py")?;

  let output = run_changescope_raw(&ws.path, &["changed", "--exclude-target-regexp", "_[0-9"])?;
  assert!(!output.status.success());
  assert_eq!(output.status.code(), Some(1));

  Ok(())
}

#[test]
fn test_unknown_spec_address_fails() -> Result<()> {
  let ws = chain_workspace()?;

  let output = run_changescope_raw(&ws.path, &["changed", "no:such_target"])?;
  assert!(!output.status.success());

  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("no:such_target"), "stderr: {}", stderr);

  Ok(())
}
