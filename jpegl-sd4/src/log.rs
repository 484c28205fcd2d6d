//! Logging macros that forward to the `log` crate when the `logging` feature
//! is enabled and otherwise only touch their arguments.

macro_rules! log_at {
    ($level:ident, $fmt:literal $(, $($arg:expr),* $(,)?)?) => {
        #[cfg(feature = "logging")]
        ::log::$level!(target: "jpegl_sd4", $fmt $(, $($arg),*)?);
        #[cfg(not(feature = "logging"))]
        { $($(let _ = &$arg;)*)? }
    };
}

macro_rules! ldebug {
    ($($tt:tt)*) => {
        log_at!(debug, $($tt)*)
    };
}

macro_rules! ltrace {
    ($($tt:tt)*) => {
        log_at!(trace, $($tt)*)
    };
}

macro_rules! lwarn {
    ($($tt:tt)*) => {
        log_at!(warn, $($tt)*)
    };
}
