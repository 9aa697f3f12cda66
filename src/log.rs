//! Logging macros that forward to `defmt` when the `defmt` feature is on.
//!
//! Declared with `#[macro_use]` ahead of the other modules. Host builds compile
//! them away so tests need no global logger. Arguments are still borrowed in
//! that case to keep the call sites warning-free.

macro_rules! forward_log {
    ($level:ident, $fmt:literal $(, $arg:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        defmt::$level!($fmt $(, $arg)*);
        #[cfg(not(feature = "defmt"))]
        {
            let _ = ($(&$arg,)*);
        }
    }};
}

macro_rules! trace {
    ($($tt:tt)*) => { forward_log!(trace, $($tt)*) };
}

macro_rules! debug {
    ($($tt:tt)*) => { forward_log!(debug, $($tt)*) };
}

macro_rules! info {
    ($($tt:tt)*) => { forward_log!(info, $($tt)*) };
}

macro_rules! warn {
    ($($tt:tt)*) => { forward_log!(warn, $($tt)*) };
}
