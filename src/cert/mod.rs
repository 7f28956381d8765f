/* src/cert/mod.rs */

pub mod bundle;
pub mod platform;
pub mod tool;

pub use bundle::{write_bundle, BundleSummary};
pub use tool::{CertificateMinter, ExternalTool, MintRequest};
