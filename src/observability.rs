//! Crate-internal logging macros.
//!
//! Config loading reports what it read and what it compiled, never file contents:
//! - `tracing` feature => `tracing` events
//! - `logging` feature (default) => `log` records
//! - neither => no-op, format arguments are still type checked

macro_rules! log_event {
    ($level:ident, $($arg:tt)*) => {{
        #[cfg(feature = "tracing")]
        { tracing::$level!(target: "transport_security", $($arg)*); }

        #[cfg(all(not(feature = "tracing"), feature = "logging"))]
        { log::$level!(target: "transport_security", $($arg)*); }

        #[cfg(all(not(feature = "tracing"), not(feature = "logging")))]
        { let _ = format_args!($($arg)*); }
    }};
}

macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::observability::log_event!(debug, $($arg)*) };
}

macro_rules! log_info {
    ($($arg:tt)*) => { $crate::observability::log_event!(info, $($arg)*) };
}

macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::observability::log_event!(warn, $($arg)*) };
}

pub(crate) use log_debug;
pub(crate) use log_event;
pub(crate) use log_info;
pub(crate) use log_warn;
