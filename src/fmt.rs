// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Logging macros.
//!
//! On the MCU these forward to `defmt` (RTT transport); on the host they forward to the `log`
//! facade so the library stays testable. Format strings must only use `{}` and `{:?}`, which both
//! backends accept.
#![allow(unused_macros)]

macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(target_os = "none")]
        ::defmt::trace!($($arg)*);
        #[cfg(not(target_os = "none"))]
        ::log::trace!($($arg)*);
    }};
}

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(target_os = "none")]
        ::defmt::debug!($($arg)*);
        #[cfg(not(target_os = "none"))]
        ::log::debug!($($arg)*);
    }};
}

macro_rules! info {
    ($($arg:tt)*) => {{
        #[cfg(target_os = "none")]
        ::defmt::info!($($arg)*);
        #[cfg(not(target_os = "none"))]
        ::log::info!($($arg)*);
    }};
}

macro_rules! warn {
    ($($arg:tt)*) => {{
        #[cfg(target_os = "none")]
        ::defmt::warn!($($arg)*);
        #[cfg(not(target_os = "none"))]
        ::log::warn!($($arg)*);
    }};
}

macro_rules! error {
    ($($arg:tt)*) => {{
        #[cfg(target_os = "none")]
        ::defmt::error!($($arg)*);
        #[cfg(not(target_os = "none"))]
        ::log::error!($($arg)*);
    }};
}
