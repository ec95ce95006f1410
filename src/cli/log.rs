//! Logging setup on stderr.

use colored::*;
use log::{Level, LevelFilter};
use std::str::FromStr;
use time::macros::format_description;
use time::OffsetDateTime;

const CRATE_TARGET: &str = "confd_template";

fn base_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Parse a `COMPONENT[=LEVEL]` specification.
///
/// Components without a level are set to debug. Short names are taken
/// relative to this crate: `backend` means `confd_template::backend`.
fn parse_component(spec: &str) -> Result<(String, LevelFilter), String> {
    let (component, level) = match spec.split_once('=') {
        Some((component, level)) => {
            let level = LevelFilter::from_str(level.trim()).map_err(|_| {
                format!(
                    "Invalid log level '{}' for component '{}': expected off, error, warn, info, debug or trace",
                    level, component
                )
            })?;
            (component.trim(), level)
        }
        None => (spec, LevelFilter::Debug),
    };
    if component.is_empty() {
        return Err(format!("Invalid log specification '{}': missing component", spec));
    }
    let target = if component == CRATE_TARGET || component.starts_with("confd_template::") {
        component.to_string()
    } else {
        format!("{}::{}", CRATE_TARGET, component)
    };
    Ok((target, level))
}

fn colored_level(level: Level) -> ColoredString {
    match level {
        Level::Error => "ERROR".bright_red(),
        Level::Warn => "WARN ".yellow(),
        Level::Info => "INFO ".green(),
        Level::Debug => "DEBUG".blue(),
        Level::Trace => "TRACE".dimmed(),
    }
}

pub fn setup(verbose: u8, components: Vec<&str>, log_time: bool) -> Result<(), String> {
    let mut dispatch = fern::Dispatch::new().level(base_level(verbose));
    for spec in components {
        let (target, level) = parse_component(spec)?;
        dispatch = dispatch.level_for(target, level);
    }

    dispatch
        .format(move |out, message, record| {
            let level = colored_level(record.level());
            if log_time {
                let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
                let stamp = now
                    .format(format_description!(
                        "[hour]:[minute]:[second].[subsecond digits:3]"
                    ))
                    .unwrap_or_default();
                out.finish(format_args!(
                    "{} {} [{}] {}",
                    stamp.dimmed(),
                    level,
                    record.target(),
                    message
                ))
            } else {
                out.finish(format_args!("{} [{}] {}", level, record.target(), message))
            }
        })
        .chain(std::io::stderr())
        .apply()
        .map_err(|e| format!("Failed to set up logging: {}", e))
}
