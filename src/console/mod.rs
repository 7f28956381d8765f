/* src/console/mod.rs */

pub mod logger;
