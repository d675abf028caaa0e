//! Logging through `log` + `log4rs`.

mod consts;

pub use consts::*;

use crate::foundation::ClaimError;
use log::LevelFilter;
use log4rs::{
    append::{
        console::{ConsoleAppender, Target},
        rolling_file::{
            policy::compound::{roll::fixed_window::FixedWindowRoller, trigger::size::SizeTrigger, CompoundPolicy},
            RollingFileAppender,
        },
    },
    config::{Appender, Logger, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::io::IsTerminal;
use std::path::Path;

const CONSOLE_APPENDER: &str = "stderr";
const LOG_FILE_APPENDER: &str = "log_file";
const ERR_LOG_FILE_APPENDER: &str = "err_log_file";

/// Initialize the global logger.
///
/// `filters` is a comma-separated expression: a bare level applies to our own
/// crates (default INFO), `<crate>=<level>` opts a module in, and
/// `root=<level>` opens up every third-party crate. Without `root`, external
/// crates stay silent.
///
/// When `log_dir` is set, `claimdrop.log` and a warn+ `claimdrop_err.log` are
/// written there with size-triggered gzip rotation. Repeated calls are ignored.
pub fn init_logger(log_dir: Option<&str>, filters: &str) -> Result<(), ClaimError> {
    let app_level = parse_app_level(filters);
    let root_level = parse_root_override(filters).unwrap_or(LevelFilter::Off);
    let module_levels = parse_module_levels(filters);

    let console_pattern = if std::io::stderr().is_terminal() { LOG_LINE_PATTERN_COLORED } else { LOG_LINE_PATTERN };
    let console = ConsoleAppender::builder().target(Target::Stderr).encoder(Box::new(PatternEncoder::new(console_pattern))).build();

    let mut config_builder = Config::builder().appender(Appender::builder().build(CONSOLE_APPENDER, Box::new(console)));
    let mut root_appenders: Vec<&str> = vec![CONSOLE_APPENDER];

    if let Some(dir) = log_dir.map(str::trim).filter(|dir| !dir.is_empty()) {
        let dir = Path::new(dir);
        config_builder = config_builder.appender(Appender::builder().build(LOG_FILE_APPENDER, Box::new(rolling_file(dir, LOG_FILE_NAME)?)));
        root_appenders.push(LOG_FILE_APPENDER);

        config_builder = config_builder.appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Warn)))
                .build(ERR_LOG_FILE_APPENDER, Box::new(rolling_file(dir, ERR_LOG_FILE_NAME)?)),
        );
        root_appenders.push(ERR_LOG_FILE_APPENDER);
    }

    let appender_names: Vec<String> = root_appenders.iter().map(|name| (*name).to_string()).collect();

    for crate_name in WHITELISTED_CRATES {
        if !module_levels.iter().any(|(module, _)| module == crate_name) {
            config_builder =
                config_builder.logger(Logger::builder().appenders(appender_names.clone()).additive(false).build(*crate_name, app_level));
        }
    }

    for (module, level) in &module_levels {
        config_builder = config_builder.logger(Logger::builder().appenders(appender_names.clone()).additive(false).build(module, *level));
    }

    let config = config_builder
        .build(Root::builder().appenders(root_appenders).build(root_level))
        .map_err(|err| ClaimError::ConfigError(format!("invalid logger configuration: {err}")))?;
    let _ = log4rs::init_config(config);
    Ok(())
}

fn rolling_file(dir: &Path, file_name: &str) -> Result<RollingFileAppender, ClaimError> {
    let archive_pattern = dir.join(format!("{file_name}.{{}}.gz"));
    let archive_pattern = archive_pattern
        .to_str()
        .ok_or_else(|| ClaimError::ConfigError(format!("log directory is not valid UTF-8: {}", dir.display())))?;
    let roller = FixedWindowRoller::builder()
        .base(1)
        .build(archive_pattern, LOG_FILE_MAX_ROLLS)
        .map_err(|err| ClaimError::ConfigError(format!("log roller for {file_name}: {err}")))?;
    let policy = CompoundPolicy::new(Box::new(SizeTrigger::new(LOG_FILE_MAX_SIZE)), Box::new(roller));
    RollingFileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_LINE_PATTERN)))
        .build(dir.join(file_name), Box::new(policy))
        .map_err(|err| ClaimError::ConfigError(format!("log file {file_name}: {err}")))
}

fn parse_app_level(filters: &str) -> LevelFilter {
    filters
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty() && !part.contains('='))
        .find_map(|part| part.parse().ok())
        .unwrap_or(LevelFilter::Info)
}

fn parse_root_override(filters: &str) -> Option<LevelFilter> {
    filters.split(',').find_map(|part| {
        let (module, level) = part.trim().split_once('=')?;
        if module.trim() != "root" {
            return None;
        }
        level.trim().parse().ok()
    })
}

fn parse_module_levels(filters: &str) -> Vec<(String, LevelFilter)> {
    let mut result = Vec::new();
    for part in filters.split(',') {
        let Some((module, level)) = part.trim().split_once('=') else {
            continue;
        };
        let module = module.trim();
        if module.is_empty() || module == "root" {
            continue;
        }
        if let Ok(level) = level.trim().parse() {
            result.push((module.to_string(), level));
        }
    }
    result
}
