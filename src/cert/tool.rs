/* src/cert/tool.rs */

use super::platform::hide_console_window;
use crate::error::BundleError;
use crate::setup::config::ToolConfig;
use log::{debug, info};
use std::ffi::OsString;
use std::net::IpAddr;
use std::path::Path;
use std::process::{Command, Output};

/// Everything the tool needs to mint one certificate/key pair.
#[derive(Debug, Clone)]
pub struct MintRequest<'a> {
    pub cert_path: &'a Path,
    pub key_path: &'a Path,
    pub hosts: &'a [String],
    pub address: IpAddr,
}

impl MintRequest<'_> {
    /// `-key-file <key> -cert-file <cert> <hosts...> <address>`
    pub fn tool_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-key-file".into(),
            self.key_path.into(),
            "-cert-file".into(),
            self.cert_path.into(),
        ];
        args.extend(self.hosts.iter().map(OsString::from));
        args.push(self.address.to_string().into());
        args
    }
}

/// Produces the certificate and key files named in a [`MintRequest`].
pub trait CertificateMinter {
    fn mint(&self, request: &MintRequest<'_>) -> Result<(), BundleError>;
}

/// mkcert, or anything accepting the same flags, run as a child process.
#[derive(Debug, Clone)]
pub struct ExternalTool {
    program: String,
    leading_args: Vec<String>,
    hide_window: bool,
}

impl ExternalTool {
    pub fn from_config(cfg: &ToolConfig) -> Self {
        ExternalTool {
            program: cfg.program.clone(),
            leading_args: cfg.leading_args.clone(),
            hide_window: cfg.hide_window,
        }
    }

    fn command(&self, request: &MintRequest<'_>) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.leading_args).args(request.tool_args());
        if self.hide_window {
            hide_console_window(&mut cmd);
        }
        cmd
    }
}

fn combined_output(output: &Output) -> String {
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    text
}

impl CertificateMinter for ExternalTool {
    fn mint(&self, request: &MintRequest<'_>) -> Result<(), BundleError> {
        let mut cmd = self.command(request);
        info!("> Running {} for {}...", self.program, request.address);
        debug!("> Command: {:?}", cmd);

        let output = cmd.output().map_err(|e| BundleError::Subprocess {
            program: self.program.clone(),
            reason: format!("could not be started: {}", e),
            output: String::new(),
        })?;

        let text = combined_output(&output);
        if !output.status.success() {
            return Err(BundleError::Subprocess {
                program: self.program.clone(),
                reason: format!("failed with {}", output.status),
                output: text,
            });
        }

        debug!("{}", text.trim_end());
        info!("+ Certificate and key generated successfully.");
        Ok(())
    }
}
