/* src/main.rs */

mod cert;
mod console;
mod error;
mod net;
mod run;
mod setup;

use clap::{Parser, Subcommand};
use console::logger::init_logger;
use error::BundleError;
use setup::check::validate_config;
use setup::config::{Config, Overrides};
use setup::gen_conf::generate_default_config;
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

/// Mints a certificate for localhost and this machine's LAN address, then bundles it with its key.
#[derive(Parser, Debug)]
#[command(name = "lancert", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Certificate tool executable (defaults to mkcert on PATH)
    #[arg(long, global = true)]
    tool: Option<String>,

    /// Where the tool writes the certificate
    #[arg(long, global = true)]
    cert_file: Option<PathBuf>,

    /// Where the tool writes the private key
    #[arg(long, global = true)]
    key_file: Option<PathBuf>,

    /// Combined certificate + key output
    #[arg(long, global = true)]
    bundle_file: Option<PathBuf>,

    /// Destination used to pick the outbound route, e.g. 8.8.8.8:80
    #[arg(long, global = true)]
    probe: Option<SocketAddr>,

    /// error, warn, info, debug or trace
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the outbound address and exit
    Resolve,
    /// Write a default configuration file
    Init {
        #[arg(default_value = "lancert.toml")]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            tool: self.tool.clone(),
            certificate: self.cert_file.clone(),
            private_key: self.key_file.clone(),
            bundle: self.bundle_file.clone(),
            probe: self.probe,
            log_level: self.log_level.clone(),
        }
    }
}

fn execute(args: Args) -> Result<(), BundleError> {
    if let Some(Command::Init { path, force }) = &args.command {
        return generate_default_config(path, *force);
    }

    let mut cfg = Config::load(args.config.as_deref())?;
    cfg.apply_overrides(&args.overrides());
    init_logger(&cfg.setup.log_level);

    let mut stdout = io::stdout().lock();
    match args.command {
        Some(Command::Resolve) => {
            run::resolve_only(&cfg, &mut stdout)?;
        }
        _ => {
            validate_config(&cfg)?;
            run::run(&cfg, &mut stdout)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    match execute(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("! {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn flags_become_overrides() {
        let args = Args::try_parse_from([
            "lancert",
            "--tool",
            "/opt/mkcert",
            "--bundle-file",
            "out.pem",
            "--probe",
            "1.1.1.1:53",
        ])
        .unwrap();

        let overrides = args.overrides();
        assert_eq!(overrides.tool.as_deref(), Some("/opt/mkcert"));
        assert_eq!(overrides.bundle, Some(PathBuf::from("out.pem")));
        assert_eq!(overrides.probe, Some("1.1.1.1:53".parse().unwrap()));
        assert!(overrides.certificate.is_none());
        assert!(args.command.is_none());
    }

    #[test]
    fn init_defaults_its_path() {
        let args = Args::try_parse_from(["lancert", "init"]).unwrap();
        match args.command {
            Some(Command::Init { path, force }) => {
                assert_eq!(path, PathBuf::from("lancert.toml"));
                assert!(!force);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn rejects_malformed_probe() {
        assert!(Args::try_parse_from(["lancert", "--probe", "8.8.8.8"]).is_err());
    }
}
