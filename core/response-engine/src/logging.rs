//! FILENAME: core/response-engine/src/logging.rs
// PURPOSE: Category-tagged logging macros shared by the pipeline crates.
// CONTEXT: Lines are emitted through the `log` facade with the category as
//          the target, so a host can route "PIVOT" / "AGG" / "DISPLAY"
//          independently. The library never installs a logger itself.

/// Log at debug level under a category, e.g. `log_debug!("PIVOT", "rows={}", n)`.
#[macro_export]
macro_rules! log_debug {
    ($category:expr, $($arg:tt)+) => {
        $crate::__log::debug!(target: $category, $($arg)+)
    };
}

/// Log at info level under a category.
#[macro_export]
macro_rules! log_info {
    ($category:expr, $($arg:tt)+) => {
        $crate::__log::info!(target: $category, $($arg)+)
    };
}

/// Log at warn level under a category.
#[macro_export]
macro_rules! log_warn {
    ($category:expr, $($arg:tt)+) => {
        $crate::__log::warn!(target: $category, $($arg)+)
    };
}
