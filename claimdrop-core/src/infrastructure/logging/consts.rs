/// Main log file.
pub const LOG_FILE_NAME: &str = "claimdrop.log";
/// Warn+error log file.
pub const ERR_LOG_FILE_NAME: &str = "claimdrop_err.log";

/// Console pattern: `timestamp [LEVEL] message [module] [thread-id]`.
pub const LOG_LINE_PATTERN_COLORED: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{h({l:5})}] {m} [{M}] [{I}]{n}";

pub const LOG_LINE_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S%.3f)} [{l:5}] {m} [{M}] [{I}]{n}";

/// Rotate at 20 MB.
pub const LOG_FILE_MAX_SIZE: u64 = 20_000_000;

pub const LOG_FILE_MAX_ROLLS: u32 = 5;

/// Crates that log at the requested level; everything else is off unless named.
pub const WHITELISTED_CRATES: &[&str] = &["claimdrop_core", "claimdrop"];
