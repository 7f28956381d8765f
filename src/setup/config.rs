/* src/setup/config.rs */

use crate::error::BundleError;
use crate::net::DEFAULT_PROBE;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct SetupConfig {
    pub log_level: String,
}

impl Default for SetupConfig {
    fn default() -> Self {
        SetupConfig {
            log_level: "info".to_string(),
        }
    }
}

// How the external certificate tool is launched.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ToolConfig {
    pub program: String,
    /// Arguments placed before `-key-file`, e.g. when the tool runs through a shell.
    pub leading_args: Vec<String>,
    pub hosts: Vec<String>,
    pub hide_window: bool,
}

impl Default for ToolConfig {
    fn default() -> Self {
        ToolConfig {
            program: "mkcert".to_string(),
            leading_args: Vec::new(),
            hosts: vec!["localhost".to_string()],
            hide_window: true,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub certificate: PathBuf,
    pub private_key: PathBuf,
    pub bundle: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            certificate: PathBuf::from("localhost-cert.pem"),
            private_key: PathBuf::from("localhost-key.pem"),
            bundle: PathBuf::from("localhost-bundle.pem"),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct NetworkConfig {
    pub probe: SocketAddr,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            probe: DEFAULT_PROBE
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([8, 8, 8, 8], 80))),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub setup: SetupConfig,
    pub tool: ToolConfig,
    pub output: OutputConfig,
    pub network: NetworkConfig,
}

/// Values given on the command line. Each one replaces its file counterpart.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub tool: Option<String>,
    pub certificate: Option<PathBuf>,
    pub private_key: Option<PathBuf>,
    pub bundle: Option<PathBuf>,
    pub probe: Option<SocketAddr>,
    pub log_level: Option<String>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, BundleError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            BundleError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        toml::from_str(&content).map_err(|e| {
            BundleError::Config(format!("failed to parse {}: {}", path.display(), e))
        })
    }

    /// Loads `path` when given, otherwise starts from the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, BundleError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Config::default()),
        }
    }

    pub fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(tool) = &overrides.tool {
            self.tool.program = tool.clone();
        }
        if let Some(certificate) = &overrides.certificate {
            self.output.certificate = certificate.clone();
        }
        if let Some(private_key) = &overrides.private_key {
            self.output.private_key = private_key.clone();
        }
        if let Some(bundle) = &overrides.bundle {
            self.output.bundle = bundle.clone();
        }
        if let Some(probe) = overrides.probe {
            self.network.probe = probe;
        }
        if let Some(level) = &overrides.log_level {
            self.setup.log_level = level.clone();
        }
    }
}
