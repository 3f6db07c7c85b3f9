//! Adapters — the outer ring of the hexagon.
//!
//! Each adapter implements one or more port traits from
//! [`crate::app::ports`] and owns the concrete resources (drivers, the
//! logger) needed to do so. The domain core only ever sees the traits.

pub mod hardware;
pub mod log_sink;
