/* src/error.rs */

use std::io;
use std::path::PathBuf;

/// Every failure that can end a run. All of them are fatal for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    #[error("could not resolve the outbound address: {0}")]
    Resolution(#[source] io::Error),

    #[error("certificate tool '{program}' {reason}\nOutput: {output}")]
    Subprocess {
        program: String,
        reason: String,
        output: String,
    },

    #[error("failed to read {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write to standard output: {0}")]
    Output(#[source] io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}
