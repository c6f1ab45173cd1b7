use std::ffi::OsStr;
use std::path::PathBuf;
use boolean_enums::gen_boolean_enum;
use log::warn;
use syslog::{BasicLogger, Facility};

pub fn init_daemon_logging(use_syslog: UseSyslog) {
    if use_syslog.into() {
        init_logging_syslog()
    } else {
        init_logging_env();
    }
}
gen_boolean_enum!(pub UseSyslog);

fn init_logging_syslog() {
    let formatter = syslog::Formatter3164 {
        facility: Facility::LOG_DAEMON,
        hostname: None,
        process: std::env::args()
            .next()
            .and_then(|name|
                PathBuf::from(name)
                    .file_name()
                    .map(|n| OsStr::to_string_lossy(n).into_owned())
            )
            .unwrap_or_default(),
        pid: std::process::id(),
    };
    let result = syslog::unix(formatter)
        .map_err(|e| e.to_string())
        .and_then(|logger|
            log::set_boxed_logger(Box::new(BasicLogger::new(logger)))
                .map_err(|e| e.to_string())
        );
    match result {
        Ok(()) => log::set_max_level(log::STATIC_MAX_LEVEL),
        Err(e) => {
            init_logging_env();
            warn!("syslog is unavailable, logging to stderr: {e}");
        },
    }
}

fn init_logging_env() {
    env_logger::Builder::new()
        .filter_level(
            if cfg!(debug_assertions) {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            }
        )
        .parse_default_env()
        .init()
}
