//! Logging shims.
//!
//! Forward to `tracing` when the `tracing` feature is enabled; compile to
//! nothing otherwise, so call sites cost nothing in the default build.

macro_rules! trace {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::trace!($($arg)*)
    };
}

macro_rules! debug {
    ($($arg:tt)*) => {
        #[cfg(feature = "tracing")]
        ::tracing::debug!($($arg)*)
    };
}

pub(crate) use {debug, trace};
