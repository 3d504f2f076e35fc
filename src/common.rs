//! Common functionality used by the host adapter and the android bindings

use std::any::Any;

use log::LevelFilter;

/// Tag under which host log lines show up in logcat.
pub const LOG_TAG: &str = "BrightsideHost";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Installs the host logger. Safe to call more than once: later calls only
/// adjust the maximum level, which is how the level configured in
/// `host.toml` gets applied after the first lines have already been logged.
pub fn init_logging(level: &str) {
    let level = parse_level(level);

    #[cfg(target_os = "android")]
    android_logger::init_once(
        android_logger::Config::default().with_max_level(level).with_tag(LOG_TAG),
    );

    #[cfg(not(target_os = "android"))]
    let _ = env_logger::builder().filter_level(level).try_init();

    log::set_max_level(level);
}

fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Readable message from a caught panic payload. Panics raised by the
/// `panic!` macro carry a `&str` or a `String`; anything else is opaque.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    match payload.downcast_ref::<&str>() {
        Some(msg) => (*msg).to_string(),
        None => match payload.downcast_ref::<String>() {
            Some(msg) => msg.clone(),
            None => "unknown panic".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use std::panic::{catch_unwind, panic_any};

    use log::LevelFilter;

    use crate::common::{init_logging, panic_message, parse_level, DEFAULT_LOG_LEVEL};

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging(DEFAULT_LOG_LEVEL);
        init_logging("debug");

        assert_eq!(log::max_level(), LevelFilter::Debug);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("error"), LevelFilter::Error);
        assert_eq!(parse_level("WARN"), LevelFilter::Warn);
        assert_eq!(parse_level("info"), LevelFilter::Info);
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level("trace"), LevelFilter::Trace);
    }

    #[test]
    fn test_parse_unknown_level_falls_back_to_info() {
        assert_eq!(parse_level("chatty"), LevelFilter::Info);
    }

    #[test]
    fn test_panic_message_from_str_payload() {
        let payload = catch_unwind(|| panic!("engine exploded")).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "engine exploded");
    }

    #[test]
    fn test_panic_message_from_string_payload() {
        let payload = catch_unwind(|| panic!("engine {} exploded", 7)).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "engine 7 exploded");
    }

    #[test]
    fn test_panic_message_from_opaque_payload() {
        let payload = catch_unwind(|| panic_any(7)).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "unknown panic");
    }
}
