/* src/net/mod.rs */

pub mod resolve;

pub use resolve::{resolve_outbound_address, DEFAULT_PROBE};
