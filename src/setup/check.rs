/* src/setup/check.rs */

use super::config::Config;
use crate::error::BundleError;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

// Main validation entry point
pub fn validate_config(config: &Config) -> Result<(), BundleError> {
    info!("> Performing configuration checks...");

    validate_tool(config)?;
    validate_output_paths(config)?;
    validate_bundle_dir(&config.output.bundle)?;

    info!("+ Configuration checks passed successfully.");
    Ok(())
}

fn validate_tool(config: &Config) -> Result<(), BundleError> {
    if config.tool.program.trim().is_empty() {
        return Err(BundleError::Config(
            "'tool.program' is empty. Point it at the certificate tool executable.".to_string(),
        ));
    }
    if config.tool.hosts.is_empty() {
        return Err(BundleError::Config(
            "'tool.hosts' must name at least one host (usually \"localhost\").".to_string(),
        ));
    }
    if config.tool.hosts.iter().any(|h| h.trim().is_empty()) {
        return Err(BundleError::Config(
            "'tool.hosts' contains a blank entry.".to_string(),
        ));
    }
    Ok(())
}

// certificate, private_key and bundle must be set and must not collide
fn validate_output_paths(config: &Config) -> Result<(), BundleError> {
    let paths = [
        ("output.certificate", &config.output.certificate),
        ("output.private_key", &config.output.private_key),
        ("output.bundle", &config.output.bundle),
    ];

    for (key, path) in paths {
        if path.as_os_str().is_empty() {
            return Err(BundleError::Config(format!("'{}' is empty.", key)));
        }
    }

    let resolved: Vec<PathBuf> = paths.iter().map(|(_, path)| resolve_path(path)).collect();
    for (i, (key_a, path_a)) in paths.iter().enumerate() {
        for (j, (key_b, _)) in paths.iter().enumerate().skip(i + 1) {
            if resolved[i] == resolved[j] {
                return Err(BundleError::Config(format!(
                    "'{}' and '{}' both point at '{}'. Each output needs its own file.",
                    key_a,
                    key_b,
                    path_a.display()
                )));
            }
        }
    }
    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

// `..` and symlinks in the directory part are resolved so two spellings of one file compare equal.
fn resolve_path(path: &Path) -> PathBuf {
    match (fs::canonicalize(parent_dir(path)), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}

// bundle directory must exist and be writable
fn validate_bundle_dir(bundle: &Path) -> Result<(), BundleError> {
    let dir = parent_dir(bundle);

    if !dir.is_dir() {
        return Err(BundleError::Config(format!(
            "bundle directory '{}' does not exist or is not a directory.",
            dir.display()
        )));
    }

    // Attempt to write and delete a temporary file
    let temp_path = dir.join(format!("lancert-write-check-{}.tmp", Uuid::new_v4()));

    if fs::write(&temp_path, "test").is_err() {
        return Err(BundleError::Config(format!(
            "no write permission for bundle directory '{}'.",
            dir.display()
        )));
    }

    if fs::remove_file(&temp_path).is_err() {
        return Err(BundleError::Config(format!(
            "failed to clean up temporary file in '{}'. Check permissions.",
            dir.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &Path) -> Config {
        let mut cfg = Config::default();
        cfg.output.certificate = dir.join("cert.pem");
        cfg.output.private_key = dir.join("key.pem");
        cfg.output.bundle = dir.join("bundle.pem");
        cfg
    }

    #[test]
    fn accepts_a_writable_layout() {
        let dir = tempfile::tempdir().unwrap();
        validate_config(&config_in(dir.path())).unwrap();

        // The write probe must not be left behind.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn rejects_colliding_paths() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config_in(dir.path());
        cfg.output.bundle = cfg.output.certificate.clone();

        let err = validate_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("output.certificate"));
        assert!(err.to_string().contains("output.bundle"));
    }

    #[test]
    fn rejects_the_same_file_spelled_through_a_parent_alias() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config_in(dir.path());
        let dir_name = dir.path().file_name().unwrap();
        cfg.output.bundle = dir.path().join("..").join(dir_name).join("cert.pem");

        let err = validate_config(&cfg).unwrap_err();
        assert!(matches!(err, BundleError::Config(_)));
        assert!(err.to_string().contains("output.certificate"));
        assert!(err.to_string().contains("output.bundle"));
    }

    #[test]
    fn distinct_files_in_an_aliased_directory_pass() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config_in(dir.path());
        let dir_name = dir.path().file_name().unwrap();
        cfg.output.bundle = dir.path().join("..").join(dir_name).join("bundle.pem");

        validate_config(&cfg).unwrap();
    }

    #[test]
    fn rejects_missing_bundle_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config_in(dir.path());
        cfg.output.bundle = dir.path().join("nope").join("bundle.pem");

        assert!(matches!(validate_config(&cfg), Err(BundleError::Config(_))));
    }

    #[test]
    fn rejects_empty_tool_and_hosts() {
        let dir = tempfile::tempdir().unwrap();

        let mut cfg = config_in(dir.path());
        cfg.tool.program = "  ".to_string();
        assert!(validate_config(&cfg).is_err());

        let mut cfg = config_in(dir.path());
        cfg.tool.hosts.clear();
        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn rejects_a_blank_host_next_to_a_real_one() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config_in(dir.path());
        cfg.tool.hosts = vec!["".to_string(), "localhost".to_string()];

        let err = validate_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("blank entry"));
    }

    #[test]
    fn rejects_empty_output_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config_in(dir.path());
        cfg.output.private_key = PathBuf::new();
        assert!(validate_config(&cfg).is_err());
    }
}
