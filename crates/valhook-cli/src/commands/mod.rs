//! CLI commands

pub mod post_install;
pub mod pre_install;

use console::style;
use std::path::{Path, PathBuf};
use valhook_core::{Values, parse_set_values};
use valhook_kube::HookOutcome;

use crate::error::{CliError, Result};

/// Merge values files in order, then apply --set overrides
pub fn load_values(values_files: &[PathBuf], set_values: &[String]) -> Result<Values> {
    let mut values = Values::new();

    for vf in values_files {
        let overlay = Values::from_file(vf)?;
        values.merge(&overlay);
    }

    if !set_values.is_empty() {
        let set_values_map = parse_set_values(set_values)?;
        values.merge(&set_values_map);
    }

    if !values.inner().is_object() {
        return Err(CliError::values("values root must be a mapping"));
    }

    Ok(values)
}

/// Write the resulting values as YAML to a file or stdout
pub fn write_values(values: &Values, output: Option<&Path>) -> Result<()> {
    let yaml = values.to_yaml()?;
    match output {
        Some(path) => std::fs::write(path, yaml)?,
        None => print!("{}", yaml),
    }
    Ok(())
}

/// Report a hook outcome on stderr
pub fn report(hook: &str, outcome: HookOutcome) {
    match outcome {
        HookOutcome::Applied => {
            eprintln!("{} {}: values updated", style("✓").green().bold(), hook)
        }
        HookOutcome::Skipped(reason) => eprintln!(
            "{} {}: skipped ({:?})",
            style("→").blue().bold(),
            hook,
            reason
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_values_merges_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("base.yaml");
        let overlay = dir.path().join("overlay.yaml");
        std::fs::write(&base, "upstream:\n  postgresql:\n    nameOverride: db\n  foo: baz\n").unwrap();
        std::fs::write(&overlay, "upstream:\n  postgresql:\n    nameOverride: pg\n").unwrap();

        let values = load_values(
            &[base, overlay],
            &["global.clusterRouterBase=apps.example.com".to_string()],
        )
        .unwrap();

        assert_eq!(values.get("upstream.postgresql.nameOverride").unwrap(), "pg");
        assert_eq!(values.get("upstream.foo").unwrap(), "baz");
        assert_eq!(values.get("global.clusterRouterBase").unwrap(), "apps.example.com");
    }

    #[test]
    fn test_load_values_without_inputs_is_empty() {
        assert!(load_values(&[], &[]).unwrap().is_empty());
    }

    #[test]
    fn test_load_values_rejects_list_root() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("values.yaml");
        std::fs::write(&path, "- a\n- b\n").unwrap();

        let err = load_values(&[path], &[]).unwrap_err();
        assert!(matches!(err, CliError::Values { .. }));
    }

    #[test]
    fn test_write_values_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.yaml");
        let mut values = Values::new();
        values.set_leaf(&["global"], "clusterRouterBase", "apps.example.com");

        write_values(&values, Some(&path)).unwrap();

        let written = Values::from_file(&path).unwrap();
        assert_eq!(written, values);
    }
}
