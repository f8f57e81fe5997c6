// Library root: the config-driven season runner around `shotvalue-core`.
// Exposed so integration tests can drive the same pipeline as the binary.

pub mod config;
pub mod pbp;
pub mod report;
pub mod run;
