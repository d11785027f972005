//! Logging macros shared by the portable modules.
//!
//! On the badge they forward to `defmt`; on the host they go through the
//! `log` facade so unit tests link without a defmt transport. Format
//! strings must stick to the common subset (`{}` for integers and strings,
//! `{:?}` for everything else).

#![macro_use]
#![allow(unused_macros)]

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "xtensa")]
        ::defmt::debug!($($arg)*);
        #[cfg(not(target_arch = "xtensa"))]
        ::log::debug!($($arg)*);
    }};
}

macro_rules! info {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "xtensa")]
        ::defmt::info!($($arg)*);
        #[cfg(not(target_arch = "xtensa"))]
        ::log::info!($($arg)*);
    }};
}

macro_rules! warn {
    ($($arg:tt)*) => {{
        #[cfg(target_arch = "xtensa")]
        ::defmt::warn!($($arg)*);
        #[cfg(not(target_arch = "xtensa"))]
        ::log::warn!($($arg)*);
    }};
}
