//! Logging macros: `defmt` on the board, no-ops on host builds.
//!
//! Host test binaries have no `defmt` global logger to link against, so the
//! arguments are only borrowed there to keep them "used".
#![allow(unused_macros, reason = "not every level is used by every build")]

macro_rules! trace {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(not(feature = "host"))]
            ::defmt::trace!($s $(, $x)*);
            #[cfg(feature = "host")]
            {
                $( let _ = &$x; )*
            }
        }
    };
}

macro_rules! debug {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(not(feature = "host"))]
            ::defmt::debug!($s $(, $x)*);
            #[cfg(feature = "host")]
            {
                $( let _ = &$x; )*
            }
        }
    };
}

macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(not(feature = "host"))]
            ::defmt::info!($s $(, $x)*);
            #[cfg(feature = "host")]
            {
                $( let _ = &$x; )*
            }
        }
    };
}

macro_rules! warn {
    ($s:literal $(, $x:expr)* $(,)?) => {
        {
            #[cfg(not(feature = "host"))]
            ::defmt::warn!($s $(, $x)*);
            #[cfg(feature = "host")]
            {
                $( let _ = &$x; )*
            }
        }
    };
}
