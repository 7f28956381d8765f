/* src/run.rs */

use crate::cert::{write_bundle, BundleSummary, CertificateMinter, ExternalTool, MintRequest};
use crate::error::BundleError;
use crate::net::resolve_outbound_address;
use crate::setup::config::Config;
use log::warn;
use std::io::Write;
use std::net::IpAddr;

fn emit(out: &mut dyn Write, line: &str) -> Result<(), BundleError> {
    writeln!(out, "{}", line).map_err(BundleError::Output)
}

/// Prints the outbound address and nothing else.
pub fn resolve_only(cfg: &Config, out: &mut dyn Write) -> Result<IpAddr, BundleError> {
    let address = resolve_outbound_address(cfg.network.probe)?;
    emit(out, &address.to_string())?;
    Ok(address)
}

/// Full run: resolve the address, mint the pair with the configured tool, bundle it.
pub fn run(cfg: &Config, out: &mut dyn Write) -> Result<BundleSummary, BundleError> {
    let address = resolve_outbound_address(cfg.network.probe)?;
    let tool = ExternalTool::from_config(&cfg.tool);
    run_with_address(cfg, address, &tool, out)
}

pub fn run_with_address(
    cfg: &Config,
    address: IpAddr,
    minter: &dyn CertificateMinter,
    out: &mut dyn Write,
) -> Result<BundleSummary, BundleError> {
    emit(out, &address.to_string())?;

    minter.mint(&MintRequest {
        cert_path: &cfg.output.certificate,
        key_path: &cfg.output.private_key,
        hosts: &cfg.tool.hosts,
        address,
    })?;

    let summary = write_bundle(
        &cfg.output.certificate,
        &cfg.output.private_key,
        &cfg.output.bundle,
    )?;

    let name = summary
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| summary.path.display().to_string());
    // The bundle already exists at this point; a lost status line is not a failed run.
    if let Err(e) = emit(out, &format!("+ Successfully created {}", name)) {
        warn!("! Bundle written but the status line was lost: {}", e);
    }
    Ok(summary)
}
