/* src/setup/gen_conf.rs */

use super::config::Config;
use crate::error::BundleError;
use std::fs::File;
use std::io::Write;
use std::path::Path;

// Renders one value with TOML quoting and escaping.
fn toml_value<V: Into<toml::Value>>(value: V) -> String {
    value.into().to_string()
}

fn render_config(cfg: &Config) -> String {
    format!(
        r#"[setup]
log_level = {}

[tool]
# Certificate tool executable (mkcert or compatible).
program = {}
# Extra arguments placed before -key-file, e.g. when running through a shell.
leading_args = {}
hosts = {}
hide_window = {}

[output]
certificate = {}
private_key = {}
bundle = {}

[network]
# Destination used only to ask the routing table for a source address.
probe = {}
"#,
        toml_value(cfg.setup.log_level.as_str()),
        toml_value(cfg.tool.program.as_str()),
        toml_value(cfg.tool.leading_args.clone()),
        toml_value(cfg.tool.hosts.clone()),
        toml_value(cfg.tool.hide_window),
        toml_value(cfg.output.certificate.display().to_string()),
        toml_value(cfg.output.private_key.display().to_string()),
        toml_value(cfg.output.bundle.display().to_string()),
        toml_value(cfg.network.probe.to_string()),
    )
}

// Writes a commented default configuration. Existing files are kept unless `force` is set.
pub fn generate_default_config<P: AsRef<Path>>(path: P, force: bool) -> Result<(), BundleError> {
    let path = path.as_ref();
    if path.exists() && !force {
        return Err(BundleError::Config(format!(
            "'{}' already exists. Pass --force to overwrite it.",
            path.display()
        )));
    }

    let write_err = |source| BundleError::FileWrite {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::create(path).map_err(write_err)?;
    file.write_all(render_config(&Config::default()).as_bytes())
        .map_err(write_err)?;
    println!("+ Default configuration file created at {}.", path.display());
    Ok(())
}
