// tilegrid - Shared Library
// Ambient services used by every tilegrid binary: logging bootstrap and
// INI configuration with environment overrides.

pub mod config;
pub mod log;

/// Environment variable prefix consulted before the configuration file
/// (e.g. `Probe_LogLevel` overrides `LogLevel`)
pub const PROBE_ENV_PREFIX: &str = "Probe_";
