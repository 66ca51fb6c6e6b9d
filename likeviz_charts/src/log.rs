// Copyright 2025 the likeviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conditional logging macros.
//!
//! With the `tracing` feature these are the `tracing` macros; without it they expand to
//! nothing. The `log_` prefix keeps them apart from the built-in `warn` lint attribute.

#[cfg(feature = "tracing")]
pub(crate) use tracing::{debug as log_debug, warn as log_warn};

#[cfg(not(feature = "tracing"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub(crate) use {log_debug, log_warn};
