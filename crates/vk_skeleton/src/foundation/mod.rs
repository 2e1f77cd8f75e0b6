//! Foundation module - logging setup shared by binaries built on the skeleton

pub mod logging;
