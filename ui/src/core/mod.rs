//! Platform glue, configuration and small presentation helpers.

pub mod config;
pub mod format;
pub mod platform;
pub mod routes;
pub mod timing;
